//! Index structures.
//!
//! - [`btree`] - Generic, policy-driven B-tree (the main structure)
//! - [`rbtree`] - Red-black node type and its rotation primitives

pub mod btree;
pub mod rbtree;
