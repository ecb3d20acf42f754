// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Pruned queries and generic walks over an [`Hbv`].
//!
//! All traversals are depth-first and pre-order, visiting children in the order
//! the builder produced them. Rectangle queries prune with
//! [`Range2d::is_outside`] (touching counts as overlapping); point queries
//! prune with [`Range2d::contains`] (edges are excluded).

use alloc::vec::Vec;
use kurbo::{Point, Rect};

use crate::hbv::Hbv;
use crate::node::Contents;
use crate::types::{NodeId, Range2d};

impl<U> Hbv<U> {
    fn contents_of(&self, id: NodeId) -> &Contents {
        &self.nodes[id.idx()].contents
    }

    fn range_of(&self, id: NodeId) -> Range2d {
        self.nodes[id.idx()].range
    }

    fn parent_of(&self, id: NodeId) -> Option<NodeId> {
        self.nodes[id.idx()].parent
    }

    /// Call `callback` with the index of every leaf whose range overlaps `rect`.
    pub fn find_leaf_intersections<F: FnMut(usize)>(&self, rect: Rect, mut callback: F) {
        self.leaf_intersections(self.root, &Range2d::from(rect), &mut callback);
    }

    fn leaf_intersections<F: FnMut(usize)>(&self, id: NodeId, range: &Range2d, f: &mut F) {
        if self.range_of(id).is_outside(range) {
            return;
        }
        match self.contents_of(id) {
            Contents::Leaf(i) => f(*i),
            Contents::NonLeaf(children) => {
                for &child in children {
                    self.leaf_intersections(child, range, f);
                }
            }
        }
    }

    /// Call `callback` for every node (leaf or internal) whose range overlaps `rect`.
    ///
    /// Returning `false` from the callback skips that node's children; the
    /// traversal still continues with its siblings.
    pub fn find_intersections<F: FnMut(NodeId) -> bool>(&self, rect: Rect, mut callback: F) {
        self.intersections(self.root, &Range2d::from(rect), &mut callback);
    }

    fn intersections<F: FnMut(NodeId) -> bool>(&self, id: NodeId, range: &Range2d, f: &mut F) {
        if self.range_of(id).is_outside(range) || !f(id) {
            return;
        }
        if let Contents::NonLeaf(children) = self.contents_of(id) {
            for &child in children {
                self.intersections(child, range, f);
            }
        }
    }

    /// Call `callback` with the index of every leaf whose range strictly contains `point`.
    ///
    /// Overlapping rectangles each report the point.
    pub fn find_indices_containing<F: FnMut(usize)>(&self, point: Point, mut callback: F) {
        self.containing(self.root, point, &mut |_: NodeId, i: usize| callback(i));
    }

    /// Call `callback` with every leaf node whose range strictly contains `point`.
    pub fn find_nodes_containing<F: FnMut(NodeId)>(&self, point: Point, mut callback: F) {
        self.containing(self.root, point, &mut |id: NodeId, _: usize| callback(id));
    }

    fn containing<F: FnMut(NodeId, usize)>(&self, id: NodeId, point: Point, f: &mut F) {
        if !self.range_of(id).contains(point) {
            return;
        }
        match self.contents_of(id) {
            Contents::Leaf(i) => f(id, *i),
            Contents::NonLeaf(children) => {
                for &child in children {
                    self.containing(child, point, f);
                }
            }
        }
    }

    /// Total number of nodes in the tree, leaves included.
    pub fn node_count(&self) -> usize {
        self.subtree_node_count(self.root)
    }

    /// Number of nodes in the subtree rooted at `id`, including `id`; zero if `id` is stale.
    pub fn subtree_node_count(&self, id: NodeId) -> usize {
        if !self.is_alive(id) {
            return 0;
        }
        self.count_nodes(id)
    }

    fn count_nodes(&self, id: NodeId) -> usize {
        match self.contents_of(id) {
            Contents::Leaf(_) => 1,
            Contents::NonLeaf(children) => children
                .iter()
                .fold(1, |n, &c| n + self.count_nodes(c)),
        }
    }

    /// Visit every node below and including `from`, pre-order.
    pub fn find_nodes<F: FnMut(NodeId)>(&self, from: NodeId, mut callback: F) {
        self.walk(from, |id| {
            callback(id);
            true
        });
    }

    /// Pre-order walk from `from`. Returning `false` skips that node's children
    /// but not its siblings.
    ///
    /// A stale `from` visits nothing. The same holds for every traversal built
    /// on this one.
    pub fn walk<F: FnMut(NodeId) -> bool>(&self, from: NodeId, mut callback: F) {
        if !self.is_alive(from) {
            return;
        }
        self.walk_inner(from, &mut callback);
    }

    fn walk_inner<F: FnMut(NodeId) -> bool>(&self, id: NodeId, f: &mut F) {
        if !f(id) {
            return;
        }
        if let Contents::NonLeaf(children) = self.contents_of(id) {
            for &child in children {
                self.walk_inner(child, f);
            }
        }
    }

    /// Follow parent links toward the root, stopping after the root or as soon
    /// as `callback` returns `false`. A stale `id` visits nothing.
    pub fn walk_up<F: FnMut(NodeId) -> bool>(
        &self,
        id: NodeId,
        include_self: bool,
        mut callback: F,
    ) {
        if !self.is_alive(id) {
            return;
        }
        let mut cur = if include_self { Some(id) } else { self.parent_of(id) };
        while let Some(node) = cur {
            if !callback(node) {
                return;
            }
            cur = self.parent_of(node);
        }
    }

    /// Follow parent links all the way to the root.
    pub fn walk_to_root<F: FnMut(NodeId)>(
        &self,
        id: NodeId,
        include_self: bool,
        mut callback: F,
    ) {
        self.walk_up(id, include_self, |node| {
            callback(node);
            true
        });
    }

    /// The nearest strict ancestor of `id` matching `predicate`.
    pub fn closest_ancestor<F: FnMut(NodeId) -> bool>(
        &self,
        id: NodeId,
        mut predicate: F,
    ) -> Option<NodeId> {
        let mut found = None;
        self.walk_up(id, false, |node| {
            if predicate(node) {
                found = Some(node);
                false
            } else {
                true
            }
        });
        found
    }

    /// Call `callback` on each terminal node; descent stops at the first
    /// terminal node on every path.
    pub fn find_terminal_nodes<T, F>(&self, from: NodeId, mut is_terminal: T, mut callback: F)
    where
        T: FnMut(NodeId) -> bool,
        F: FnMut(NodeId),
    {
        self.walk(from, |id| {
            if is_terminal(id) {
                callback(id);
                false
            } else {
                true
            }
        });
    }

    /// Call `callback` with every leaf node below `from` and its rectangle index.
    pub fn find_leaf_nodes<F: FnMut(NodeId, usize)>(&self, from: NodeId, mut callback: F) {
        self.walk(from, |id| {
            if let Contents::Leaf(i) = self.contents_of(id) {
                callback(id, *i);
            }
            true
        });
    }

    /// All nodes at depth `level` (the root is level 0), left to right.
    ///
    /// Meant for debugging and tuning.
    pub fn nodes_at_level(&self, level: usize) -> Vec<NodeId> {
        let mut out = Vec::new();
        self.gather_level(self.root, level, &mut out);
        out
    }

    fn gather_level(&self, id: NodeId, level: usize, out: &mut Vec<NodeId>) {
        if level == 0 {
            out.push(id);
        } else if let Contents::NonLeaf(children) = self.contents_of(id) {
            for &child in children {
                self.gather_level(child, level - 1, out);
            }
        }
    }

    /// For every leaf in pre-order, one more than its distance from the root.
    ///
    /// Useful for judging how well a rectangle set partitions.
    pub fn leaf_depths(&self) -> Vec<usize> {
        let mut out = Vec::new();
        self.gather_depths(self.root, 0, &mut out);
        out
    }

    fn gather_depths(&self, id: NodeId, depth: usize, out: &mut Vec<usize>) {
        match self.contents_of(id) {
            Contents::Leaf(_) => out.push(depth + 1),
            Contents::NonLeaf(children) => {
                for &child in children {
                    self.gather_depths(child, depth + 1, out);
                }
            }
        }
    }
}
