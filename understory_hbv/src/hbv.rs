// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The [`Hbv`] container: construction, rebuild, and bound refresh.

use alloc::vec;
use alloc::vec::Vec;
use kurbo::Rect;

use crate::node::{Contents, Node};
use crate::partition::{BuildOptions, BuildStats, Partition, partition};
use crate::types::{NodeId, Range2d};

/// A 2D hierarchical bounding volume over a flat array of rectangles.
///
/// Leaf nodes refer to rectangles by their position in the array passed to
/// [`update`](Self::update). Internal nodes cache the union of their children.
///
/// `U` is an optional per-node annotation for host bookkeeping.
pub struct Hbv<U = ()> {
    pub(crate) nodes: Vec<Node<U>>,
    generation: u32,
    pub(crate) root: NodeId,
    height: usize,
    pub(crate) rects: Vec<Rect>,
    bottom_nodes: Vec<NodeId>,
    options: BuildOptions,
    stats: BuildStats,
}

impl<U> core::fmt::Debug for Hbv<U> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Hbv")
            .field("rects", &self.rects.len())
            .field("nodes", &self.nodes.len())
            .field("bottom_nodes", &self.bottom_nodes.len())
            .field("height", &self.height)
            .field("generation", &self.generation)
            .field("options", &self.options)
            .finish_non_exhaustive()
    }
}

impl<U: Default> Default for Hbv<U> {
    fn default() -> Self {
        Self::new()
    }
}

impl<U: Default> Hbv<U> {
    /// Create an empty hierarchy: a lone internal root with no children.
    pub fn new() -> Self {
        Self::with_options(BuildOptions::default())
    }

    /// Create an empty hierarchy that will build with `options`.
    pub fn with_options(options: BuildOptions) -> Self {
        debug_assert!(options.min_group >= 1, "min_group must be at least 1");
        let generation = 1;
        Self {
            nodes: vec![Node::new(Contents::NonLeaf(Vec::new()))],
            generation,
            root: NodeId::new(0, generation),
            height: 0,
            rects: Vec::new(),
            bottom_nodes: Vec::new(),
            options,
            stats: BuildStats::default(),
        }
    }

    /// Build a hierarchy for `rects` with default options.
    pub fn from_rects(rects: Vec<Rect>) -> Self {
        let mut hbv = Self::new();
        hbv.update(rects);
        hbv
    }

    /// Replace the rectangle array and bring the tree up to date.
    ///
    /// If the number of rectangles changed, the tree is rebuilt from scratch
    /// and every previously returned [`NodeId`] becomes stale. Otherwise the
    /// topology is kept and only the cached ranges are recomputed.
    pub fn update(&mut self, rects: Vec<Rect>) {
        debug_assert!(
            rects.iter().all(|r| !Range2d::from(*r).is_nan()),
            "rectangles must not contain NaN coordinates"
        );
        let rebuild = rects.len() != self.rects.len();
        if rebuild {
            self.rebuild(&rects);
        }
        self.rects = rects;
        self.refresh();
        if !rebuild {
            log::trace!(
                "refreshed {} bottom nodes over {} rects",
                self.bottom_nodes.len(),
                self.rects.len()
            );
        }
    }

    fn rebuild(&mut self, rects: &[Rect]) {
        self.generation = self.generation.wrapping_add(1);
        self.nodes.clear();
        self.bottom_nodes.clear();

        if rects.is_empty() {
            self.nodes.push(Node::new(Contents::NonLeaf(Vec::new())));
            self.root = self.id_at(0);
            self.height = 0;
            self.stats = BuildStats::default();
            log::debug!("rebuilt empty hierarchy");
            return;
        }

        let parts = partition(rects.iter().copied().map(Range2d::from), self.options);
        let (root, height) = self.assemble(parts.root);
        debug_assert_eq!(height, parts.height, "assembled height must match partition");
        self.root = root;
        self.height = height;
        self.stats = BuildStats {
            rects: rects.len(),
            height,
            fewest: parts.fewest,
            most: parts.most,
            nodes: self.nodes.len(),
            bottom_nodes: self.bottom_nodes.len(),
        };
        log::debug!(
            "rebuilt hierarchy: {} rects, {} levels, atoms {}..={}, {} nodes",
            rects.len(),
            height,
            parts.fewest,
            parts.most,
            self.nodes.len()
        );
    }

    /// Convert a finished partition into arena nodes, children before parents.
    fn assemble(&mut self, part: Partition) -> (NodeId, usize) {
        match part {
            Partition::Atom(boxes) => {
                let leaves = boxes
                    .iter()
                    .map(|b| self.push(Node::new(Contents::Leaf(b.index))))
                    .collect();
                let id = self.adopt(leaves);
                self.bottom_nodes.push(id);
                (id, 1)
            }
            Partition::Split(child0, child1) => {
                let (a, h0) = self.assemble(*child0);
                let (b, h1) = self.assemble(*child1);
                (self.adopt(vec![a, b]), 1 + h0.max(h1))
            }
        }
    }

    fn adopt(&mut self, children: Vec<NodeId>) -> NodeId {
        let id = self.id_at(self.nodes.len());
        for &c in &children {
            let child = &mut self.nodes[c.idx()];
            debug_assert!(child.parent.is_none(), "parent links are set once");
            child.parent = Some(id);
        }
        self.nodes.push(Node::new(Contents::NonLeaf(children)));
        id
    }

    fn push(&mut self, node: Node<U>) -> NodeId {
        let id = self.id_at(self.nodes.len());
        self.nodes.push(node);
        id
    }
}

impl<U> Hbv<U> {
    #[allow(
        clippy::cast_possible_truncation,
        reason = "NodeId uses 32-bit indices by design."
    )]
    fn id_at(&self, idx: usize) -> NodeId {
        NodeId::new(idx as u32, self.generation)
    }

    /// Recompute cached ranges: bottom nodes from their leaves, then everything above.
    fn refresh(&mut self) {
        for k in 0..self.bottom_nodes.len() {
            let id = self.bottom_nodes[k];
            self.refresh_bottom(id);
        }
        self.refresh_subtree(self.root);
    }

    fn refresh_bottom(&mut self, id: NodeId) {
        let contents = core::mem::replace(
            &mut self.nodes[id.idx()].contents,
            Contents::NonLeaf(Vec::new()),
        );
        if let Contents::NonLeaf(children) = &contents {
            let mut acc: Option<Range2d> = None;
            for &child in children {
                let node = &mut self.nodes[child.idx()];
                if let Contents::Leaf(i) = node.contents {
                    debug_assert!(i < self.rects.len(), "leaf index out of bounds");
                    let r = Range2d::from(self.rects[i]);
                    node.range = r;
                    acc = Some(acc.map_or(r, |a| a.union(&r)));
                }
            }
            if let Some(r) = acc {
                self.nodes[id.idx()].range = r;
            }
        }
        self.nodes[id.idx()].contents = contents;
    }

    /// Bottom nodes are skipped here; [`Self::refresh_bottom`] already did them.
    fn refresh_subtree(&mut self, id: NodeId) {
        let contents = core::mem::replace(
            &mut self.nodes[id.idx()].contents,
            Contents::NonLeaf(Vec::new()),
        );
        match &contents {
            Contents::Leaf(i) => {
                self.nodes[id.idx()].range = Range2d::from(self.rects[*i]);
            }
            Contents::NonLeaf(children) => {
                if let Some(&first) = children.first()
                    && !self.nodes[first.idx()].is_leaf()
                {
                    let mut acc: Option<Range2d> = None;
                    for &child in children {
                        self.refresh_subtree(child);
                        let r = self.nodes[child.idx()].range;
                        acc = Some(acc.map_or(r, |a| a.union(&r)));
                    }
                    if let Some(r) = acc {
                        self.nodes[id.idx()].range = r;
                    }
                }
            }
        }
        self.nodes[id.idx()].contents = contents;
    }

    /// The root node. Before the first non-empty update this is an internal node without children.
    pub fn root(&self) -> NodeId {
        self.root
    }

    /// Height of the current tree; zero when empty.
    pub fn height(&self) -> usize {
        self.height
    }

    /// The rectangle array of record; leaf index `i` refers to `rects()[i]`.
    pub fn rects(&self) -> &[Rect] {
        &self.rects
    }

    /// Internal nodes whose children are all leaves.
    pub fn bottom_nodes(&self) -> &[NodeId] {
        &self.bottom_nodes
    }

    /// Options used for rebuilds.
    pub fn options(&self) -> BuildOptions {
        self.options
    }

    /// Counters recorded by the most recent rebuild.
    pub fn build_stats(&self) -> BuildStats {
        self.stats
    }

    /// Whether `id` refers to a node of the current tree.
    pub fn is_alive(&self, id: NodeId) -> bool {
        id.generation() == self.generation && id.idx() < self.nodes.len()
    }

    /// Look up a node, or `None` if `id` is stale.
    pub fn get(&self, id: NodeId) -> Option<&Node<U>> {
        if self.is_alive(id) {
            self.nodes.get(id.idx())
        } else {
            None
        }
    }

    /// Look up a node; panics if `id` is stale.
    pub fn node(&self, id: NodeId) -> &Node<U> {
        self.get(id).expect("dangling NodeId")
    }

    /// Mutable access to a node's annotation; panics if `id` is stale.
    pub fn user_data_mut(&mut self, id: NodeId) -> &mut U {
        assert!(self.is_alive(id), "dangling NodeId");
        &mut self.nodes[id.idx()].user_data
    }
}
