// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Tree nodes stored in the [`Hbv`](crate::Hbv) arena.

use alloc::vec::Vec;
use kurbo::Rect;

use crate::types::{NodeId, Range2d};

/// What a node holds: a rectangle index or an ordered list of children.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Contents {
    /// A leaf referring to `rects[i]` of the owning index.
    Leaf(usize),
    /// An internal node. Order follows the partition split order.
    NonLeaf(Vec<NodeId>),
}

/// A node of the hierarchy.
///
/// `U` is a per-node annotation owned by the host. It starts out as
/// `U::default()` whenever the tree is rebuilt and is never read by this crate.
#[derive(Clone, Debug)]
pub struct Node<U> {
    pub(crate) contents: Contents,
    pub(crate) range: Range2d,
    pub(crate) parent: Option<NodeId>,
    pub(crate) user_data: U,
}

impl<U: Default> Node<U> {
    pub(crate) fn new(contents: Contents) -> Self {
        Self {
            contents,
            range: Range2d::ZERO,
            parent: None,
            user_data: U::default(),
        }
    }
}

impl<U> Node<U> {
    /// The contents of the node.
    pub fn contents(&self) -> &Contents {
        &self.contents
    }

    /// Bounding range of everything below this node.
    ///
    /// For a leaf this is the range of the matching rectangle as of the last update.
    pub fn range(&self) -> Range2d {
        self.range
    }

    /// The bounding range as a Kurbo rectangle.
    pub fn rect(&self) -> Rect {
        self.range.to_rect()
    }

    /// The parent node, or `None` for the root.
    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    /// Index into the rectangle array if this node is a leaf.
    pub fn leaf_index(&self) -> Option<usize> {
        match self.contents {
            Contents::Leaf(i) => Some(i),
            Contents::NonLeaf(_) => None,
        }
    }

    /// True if this node is a leaf.
    pub fn is_leaf(&self) -> bool {
        matches!(self.contents, Contents::Leaf(_))
    }

    /// Children of an internal node; `None` for a leaf.
    pub fn children(&self) -> Option<&[NodeId]> {
        match &self.contents {
            Contents::Leaf(_) => None,
            Contents::NonLeaf(children) => Some(children),
        }
    }

    /// The host annotation.
    pub fn user_data(&self) -> &U {
        &self.user_data
    }
}
