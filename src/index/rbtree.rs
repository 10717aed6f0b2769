//! Red-black tree node.
//!
//! Only the node type and its local primitives live here: colors, color
//! flips and the two single rotations used by left-leaning red-black
//! (LLRB) trees. Each primitive is O(1).

use std::fmt;

/// Color of the link from a node's parent to the node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Color {
    Red,
    Black,
}

impl Color {
    /// The opposite color.
    #[inline]
    pub fn flipped(self) -> Self {
        match self {
            Color::Red => Color::Black,
            Color::Black => Color::Red,
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Color::Red => write!(f, "R"),
            Color::Black => write!(f, "B"),
        }
    }
}

/// Owned child link. `None` is a black leaf.
pub type Link<K, V> = Option<Box<RbNode<K, V>>>;

/// A red-black tree node that owns its children.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RbNode<K, V> {
    pub key: K,
    pub value: V,
    pub color: Color,
    pub left: Link<K, V>,
    pub right: Link<K, V>,
}

impl<K, V> RbNode<K, V> {
    /// New nodes are red: inserting one never changes black height.
    pub fn new(key: K, value: V) -> Self {
        Self {
            key,
            value,
            color: Color::Red,
            left: None,
            right: None,
        }
    }

    #[inline]
    pub fn is_red(&self) -> bool {
        self.color == Color::Red
    }

    #[inline]
    pub fn is_black(&self) -> bool {
        self.color == Color::Black
    }

    #[inline]
    pub fn is_leaf(&self) -> bool {
        self.left.is_none() && self.right.is_none()
    }

    pub fn flip_color(&mut self) {
        self.color = self.color.flipped();
    }

    /// Flip this node and both children: splits or re-forms a temporary
    /// 4-node in the 2-3-4 view of the tree.
    pub fn flip_colors(&mut self) {
        self.flip_color();
        if let Some(left) = self.left.as_mut() {
            left.flip_color();
        }
        if let Some(right) = self.right.as_mut() {
            right.flip_color();
        }
    }

    /// Turn a right-leaning red link into a left-leaning one.
    ///
    /// ```text
    ///     h                x
    ///    / \\            // \
    ///   a   x    ==>    h    c
    ///      / \         / \
    ///     b   c       a   b
    /// ```
    ///
    /// Returns `self` unchanged when there is no right child.
    pub fn rotate_left(mut self: Box<Self>) -> Box<Self> {
        let Some(mut x) = self.right.take() else {
            return self;
        };
        self.right = x.left.take();
        x.color = self.color;
        self.color = Color::Red;
        x.left = Some(self);
        x
    }

    /// Mirror of [`rotate_left`](Self::rotate_left).
    pub fn rotate_right(mut self: Box<Self>) -> Box<Self> {
        let Some(mut x) = self.left.take() else {
            return self;
        };
        self.left = x.right.take();
        x.color = self.color;
        self.color = Color::Red;
        x.right = Some(self);
        x
    }

    /// Number of nodes in this subtree.
    pub fn size(&self) -> usize {
        1 + self.left.as_ref().map_or(0, |n| n.size()) + self.right.as_ref().map_or(0, |n| n.size())
    }
}

/// `true` if `link` is a red node. Empty links are black.
#[inline]
pub fn is_red<K, V>(link: &Link<K, V>) -> bool {
    link.as_ref().is_some_and(|n| n.is_red())
}
