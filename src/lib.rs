//! Classics - a generic, policy-driven B-tree and a few textbook algorithms.
//!
//! # Architecture
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                            classics                             │
//! ├─────────────────────────────────────────────────────────────────┤
//! │  ┌─────────────────────────────────────────────────────────┐   │
//! │  │        SharedBTree (index/btree/shared.rs)               │   │
//! │  │            Arc<RwLock<BTree>> for threads                │   │
//! │  └─────────────────────────────────────────────────────────┘   │
//! │                              ↓                                  │
//! │  ┌─────────────────────────────────────────────────────────┐   │
//! │  │       BTree<K, V, P>  [Compile-Time Swappable Policy]    │   │
//! │  │    build / insert / delete / search / sorted_key_values  │   │
//! │  │   ┌─────────────────────────────────────────────────┐   │   │
//! │  │   │  BalancePolicy: ClassicPolicy | your own        │   │   │
//! │  │   └─────────────────────────────────────────────────┘   │   │
//! │  └─────────────────────────────────────────────────────────┘   │
//! │                              ↓                                  │
//! │  ┌─────────────────────────────────────────────────────────┐   │
//! │  │               BTreeCore (rebalancing primitives)         │   │
//! │  │   rotate_left | rotate_right | join | get_min/max_node   │   │
//! │  └─────────────────────────────────────────────────────────┘   │
//! │                              ↓                                  │
//! │  ┌─────────────────────────────────────────────────────────┐   │
//! │  │          NodeArena (slab) of Node<K, V>                  │   │
//! │  └─────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────┘
//! ```
//!
//! # Modules
//! - [`common`] - Shared primitives (NodeId, Error, config)
//! - [`index`] - Index structures (B-tree, red-black node)
//! - [`algorithms`] - Searching, sorting, suffix arrays
//!
//! # Quick Start
//! ```
//! use classics::BTree;
//!
//! let mut tree = BTree::new(4).unwrap();
//! tree.build([10, 20, 5, 6, 12, 30, 7, 17].map(|k| (k, k * 10))).unwrap();
//!
//! assert!(tree.delete(&6).unwrap());
//! let keys: Vec<i32> = tree
//!     .sorted_key_values()
//!     .unwrap()
//!     .into_iter()
//!     .map(|(k, _)| *k)
//!     .collect();
//! assert_eq!(keys, vec![5, 7, 10, 12, 17, 20, 30]);
//! tree.validate().unwrap();
//! ```

pub mod algorithms;
pub mod common;
pub mod error;
pub mod index;

// Re-export commonly used items at crate root for convenience
pub use common::config::Degree;
pub use common::{Error, NodeId, Result};

pub use index::btree::{
    BTree, BTreeCore, BalancePolicy, ClassicPolicy, Node, RebalanceStats, SharedBTree,
};
