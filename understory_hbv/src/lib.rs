// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=understory_hbv --heading-base-level=0

//! Understory HBV: a Kurbo-native 2D hierarchical bounding volume.
//!
//! Understory HBV answers "which shapes overlap this area" and "which shapes contain this point"
//! over a flat array of rectangles, for example when hit testing hundreds or thousands of items
//! on a 2D canvas.
//!
//! - Build a binary partition of the rectangles with a median-split heuristic.
//! - Refresh cached bounds in place when rectangles move but their number stays the same.
//! - Query by rectangle or point; prune whole subtrees by their cached bounds.
//! - Walk the tree, follow parent links, and attach host data to nodes.
//!
//! ## Rebuild versus refresh
//!
//! [`Hbv::update`] takes the full rectangle array every time. Leaf `i` always refers to
//! `rects[i]`.
//!
//! - If the rectangle count is unchanged, the topology is kept. Leaf ranges are recomputed from
//!   the new rectangles, bottom nodes (parents of leaves) are recomputed from their leaves, and
//!   the remaining internal nodes are recomputed from their children. Every [`NodeId`] stays
//!   valid and host annotations are preserved.
//! - If the count changed, the tree is rebuilt from scratch. Previous [`NodeId`]s become stale
//!   (see [`Hbv::is_alive`]) and annotations start over from `U::default()`.
//!
//! ## Boundary conventions
//!
//! Rectangle queries treat touching edges as overlapping. Point queries use a strict interior
//! test: a point exactly on an edge of a rectangle is not inside it.
//! See [`Range2d::is_outside`] and [`Range2d::contains`].
//!
//! ## API overview
//!
//! - [`Hbv`]: owns the rectangles, the node arena, and the list of bottom nodes.
//! - [`Node`] / [`Contents`]: a leaf (rectangle index) or an internal node (ordered children).
//! - [`NodeId`]: generational node handle.
//! - [`Range2d`]: axis-aligned bounds used internally and exposed on every node.
//! - [`BuildOptions`] / [`BuildStats`]: build tuning and diagnostics.
//!
//! Key operations:
//! - [`Hbv::update`]: rebuild or refresh.
//! - [`Hbv::find_leaf_intersections`] and [`Hbv::find_intersections`]: rectangle queries.
//! - [`Hbv::find_indices_containing`] and [`Hbv::find_nodes_containing`]: point queries.
//! - [`Hbv::walk`], [`Hbv::walk_up`], [`Hbv::closest_ancestor`], [`Hbv::find_terminal_nodes`]:
//!   generic traversals.
//!
//! # Example
//!
//! ```rust
//! use kurbo::{Point, Rect, Vec2};
//! use understory_hbv::Hbv;
//!
//! // Five unit squares on a diagonal.
//! let rects: Vec<Rect> = (0..5_i32)
//!     .map(|i| {
//!         let o = f64::from(i) * 2.0;
//!         Rect::new(o, o, o + 1.0, o + 1.0)
//!     })
//!     .collect();
//! let mut hbv: Hbv = Hbv::from_rects(rects.clone());
//!
//! let mut hits = Vec::new();
//! hbv.find_leaf_intersections(Rect::new(0.0, 0.0, 9.0, 9.0), |i| hits.push(i));
//! hits.sort_unstable();
//! assert_eq!(hits, [0, 1, 2, 3, 4]);
//!
//! let mut inside = Vec::new();
//! hbv.find_indices_containing(Point::new(4.5, 4.5), |i| inside.push(i));
//! assert_eq!(inside, [2]);
//!
//! // Same count: bounds are refreshed, node handles stay valid.
//! let root = hbv.root();
//! let moved: Vec<Rect> = rects.iter().map(|r| *r + Vec2::new(100.0, 0.0)).collect();
//! hbv.update(moved);
//! assert!(hbv.is_alive(root));
//! assert_eq!(hbv.node(root).rect(), Rect::new(100.0, 0.0, 109.0, 9.0));
//! ```
//!
//! Host annotations ride along on every node:
//!
//! ```rust
//! use kurbo::Rect;
//! use understory_hbv::Hbv;
//!
//! let rects = vec![Rect::new(0.0, 0.0, 10.0, 10.0), Rect::new(20.0, 0.0, 30.0, 10.0)];
//! let mut hbv: Hbv<bool> = Hbv::from_rects(rects);
//!
//! let mut hovered = None;
//! hbv.find_nodes_containing(kurbo::Point::new(25.0, 5.0), |id| hovered = Some(id));
//! let hovered = hovered.unwrap();
//! *hbv.user_data_mut(hovered) = true;
//!
//! assert_eq!(hbv.node(hovered).leaf_index(), Some(1));
//! assert!(*hbv.node(hovered).user_data());
//! ```
//!
//! ## Threading
//!
//! [`Hbv`] has no interior mutability. Share it immutably across threads for concurrent queries;
//! an [`update`](Hbv::update) needs exclusive access and must finish before the next query.
//!
//! ## Logging
//!
//! Rebuilds emit a `debug` record with [`BuildStats`]-style counters and refreshes a `trace`
//! record through the [`log`] facade. No logger is installed by this crate.
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

pub mod hbv;
pub mod node;
pub mod partition;
pub mod query;
pub mod types;

pub use hbv::Hbv;
pub use node::{Contents, Node};
pub use partition::{BuildOptions, BuildStats};
pub use types::{Axis, NodeId, Range2d};
