//! Generic B-tree.
//!
//! The tree is split along the line between *mechanism* and *policy*:
//!
//! ```text
//!   BTree<K, V, P>            public API: build / insert / delete / search
//!     ├── P: BalancePolicy    when to split, rotate or join
//!     └── BTreeCore<K, V>     root + degree + arena, and the primitives
//!           ├── rotate_left / rotate_right / join
//!           ├── get_min_node / get_max_node / index_at_parent
//!           └── NodeArena ── Node<K, V> ...
//! ```
//!
//! # Components
//! - [`Node`] - Sorted entries, child ids, parent link, fullness predicates
//! - [`NodeArena`] - Slab storage giving each node a stable [`NodeId`](crate::NodeId)
//! - [`BTreeCore`] - Edge maintenance and the rebalancing primitives
//! - [`BalancePolicy`] - The hooks a tree variant implements
//! - [`ClassicPolicy`] - Textbook B-tree (2-3, 2-3-4, ... by degree)
//! - [`BTree`] - The orchestrator
//! - [`SharedBTree`] - Whole-tree `RwLock` for multi-threaded use
//! - [`RebalanceStats`] - Split/rotation/join counters

mod arena;
mod base;
mod classic;
mod node;
mod policy;
mod shared;
mod stats;
mod tree;
pub mod validate;

pub use arena::NodeArena;
pub use base::BTreeCore;
pub use classic::ClassicPolicy;
pub use node::Node;
pub use policy::BalancePolicy;
pub use shared::SharedBTree;
pub use stats::RebalanceStats;
pub use tree::BTree;
