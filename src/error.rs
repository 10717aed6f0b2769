//! Error types for the classics crate.

use thiserror::Error;

use crate::common::NodeId;

/// Convenient Result type alias.
///
/// Instead of writing `Result<T, Error>` everywhere, we can write `Result<T>`.
/// This is a common Rust pattern (see `std::io::Result`).
pub type Result<T> = std::result::Result<T, Error>;

/// All errors the tree structures can report.
///
/// Expected outcomes (a key that is simply absent) are not errors at the
/// public API: `BTree::delete` answers `Ok(false)` and `BTree::get`
/// answers `None`. The variants below describe precondition violations
/// at the node and primitive level.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum Error {
    /// The requested key is not stored in the node.
    #[error("key not found")]
    KeyNotFound,

    /// The maximum branching degree is too small to form a B-tree.
    #[error("invalid branching degree {0}: must be at least 3")]
    InvalidDegree(usize),

    /// The id does not name a live node in this tree's arena.
    ///
    /// Usually a stale id kept across a join that freed the node.
    #[error("{0} does not exist")]
    NodeNotFound(NodeId),

    /// Key/value slot index past the end of the node.
    #[error("key index {index} out of range for node with {len} keys")]
    KeyIndexOutOfRange { index: usize, len: usize },

    /// Child slot index past the end of the node.
    #[error("child index {index} out of range for node with {len} children")]
    ChildIndexOutOfRange { index: usize, len: usize },

    /// `child` is not listed among `parent`'s children.
    ///
    /// Raised when a rotation or join is handed nodes that are not
    /// adjacent siblings around the given separator.
    #[error("{child} is not a child of {parent}")]
    NotAChild { parent: NodeId, child: NodeId },

    /// The node has no parent but the operation needs one.
    #[error("{0} has no parent")]
    Detached(NodeId),

    /// A structural invariant does not hold (reported by validation).
    #[error("invariant violated: {0}")]
    InvariantViolation(String),
}
