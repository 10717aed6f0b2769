//! Node identifier type.

use std::fmt;

/// Identifies a node slot in a tree's arena.
///
/// Using `usize` because:
/// 1. Nodes live in a `slab::Slab`, which hands out `usize` keys
/// 2. Ids stay stable while other nodes are inserted or freed
/// 3. A parent link is then a plain `Option<NodeId>`, not a pointer cycle
///
/// An id is only meaningful for the tree that issued it. Once a node is
/// freed (e.g. merged away by a join), its slot may be reused.
///
/// # Example
/// ```
/// use classics::NodeId;
///
/// let id = NodeId::new(5);
/// assert_eq!(id.0, 5);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub usize);

impl NodeId {
    /// Create a new NodeId.
    #[inline]
    pub fn new(id: usize) -> Self {
        NodeId(id)
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Node({})", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_node_id_new() {
        let id = NodeId::new(7);
        assert_eq!(id.0, 7);
        assert_eq!(id, NodeId(7));
        assert_ne!(id, NodeId(8));
    }

    #[test]
    fn test_node_id_display() {
        assert_eq!(format!("{}", NodeId::new(42)), "Node(42)");
    }
}
