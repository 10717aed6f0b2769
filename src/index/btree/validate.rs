//! Structural invariant checks.
//!
//! Walks the whole tree and reports the first broken rule:
//! - keys strictly increase inside a node and respect the separator bounds
//! - internal nodes have exactly one more child than keys
//! - every leaf sits at the same depth
//! - non-root nodes hold between `min_keys` and `max_keys` keys
//! - each child's parent link names the node that lists it
//!
//! O(n). Meant for tests and debugging, not for the hot path.

use crate::common::{Error, NodeId, Result};
use crate::index::btree::BTreeCore;

/// Validate every invariant of `core`.
pub fn check<K: Ord, V>(core: &BTreeCore<K, V>) -> Result<()> {
    let root = core.root();
    if core.node(root)?.parent().is_some() {
        return Err(violation(format!("root {} has a parent link", root)));
    }
    let mut leaf_depth = None;
    check_node(core, root, None, None, 0, &mut leaf_depth)?;
    Ok(())
}

fn check_node<K: Ord, V>(
    core: &BTreeCore<K, V>,
    id: NodeId,
    lower: Option<&K>,
    upper: Option<&K>,
    depth: usize,
    leaf_depth: &mut Option<usize>,
) -> Result<()> {
    let node = core.node(id)?;
    let degree = core.degree();

    if !node.is_root() && node.is_underflow() {
        return Err(violation(format!(
            "{} holds {} keys, below minimum {}",
            id,
            node.len(),
            degree.min_keys()
        )));
    }
    if node.is_overflow() {
        return Err(violation(format!(
            "{} holds {} keys, above maximum {}",
            id,
            node.len(),
            degree.max_keys()
        )));
    }

    let keys: Vec<&K> = node.keys().collect();
    if keys.windows(2).any(|w| w[0] >= w[1]) {
        return Err(violation(format!("{} keys are not strictly increasing", id)));
    }
    if let (Some(lower), Some(first)) = (lower, keys.first()) {
        if *first <= lower {
            return Err(violation(format!("{} has a key below its lower separator", id)));
        }
    }
    if let (Some(upper), Some(last)) = (upper, keys.last()) {
        if *last >= upper {
            return Err(violation(format!("{} has a key above its upper separator", id)));
        }
    }

    if node.is_leaf() {
        match *leaf_depth {
            None => *leaf_depth = Some(depth),
            Some(expected) if expected != depth => {
                return Err(violation(format!(
                    "leaf {} at depth {}, expected {}",
                    id, depth, expected
                )));
            }
            Some(_) => {}
        }
        return Ok(());
    }

    if node.children().len() != node.len() + 1 {
        return Err(violation(format!(
            "{} has {} keys but {} children",
            id,
            node.len(),
            node.children().len()
        )));
    }

    for (i, &child) in node.children().iter().enumerate() {
        if core.node(child)?.parent() != Some(id) {
            return Err(violation(format!(
                "{} is listed under {} but links elsewhere",
                child, id
            )));
        }
        let child_lower = if i == 0 { lower } else { Some(keys[i - 1]) };
        let child_upper = keys.get(i).copied().or(upper);
        check_node(core, child, child_lower, child_upper, depth + 1, leaf_depth)?;
    }

    Ok(())
}

fn violation(message: String) -> Error {
    Error::InvariantViolation(message)
}
