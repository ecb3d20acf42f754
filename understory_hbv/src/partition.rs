// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Transient partition builder used by every rebuild.
//!
//! Boxes are grouped by recursive median splits:
//!
//! - A group smaller than `2 * min_group` becomes an atom.
//! - Otherwise the group's bounding box is split at its midpoint, trying the
//!   longer axis first. Boxes strictly above the split line go to the first
//!   child; boxes below it or straddling it go to the second.
//! - A split is accepted only if both sides keep at least `max(min_group, 3)` boxes.
//!   When neither midpoint works, positions at 1/8 … 7/8 of each axis are tried in
//!   order and the first acceptable one wins.
//! - A group no position can split becomes an (oversized) atom.
//!
//! The result only lives for the duration of one build; see
//! [`Hbv::update`](crate::Hbv::update).

use alloc::boxed::Box;
use alloc::vec::Vec;

use crate::types::{Axis, Range2d};

/// Tuning knobs for tree construction.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct BuildOptions {
    /// Minimum group parameter: groups with fewer than `2 * min_group` boxes are
    /// never split, and a split must leave at least `max(min_group, 3)` boxes on
    /// each side.
    pub min_group: usize,
}

impl Default for BuildOptions {
    fn default() -> Self {
        Self { min_group: 2 }
    }
}

/// Diagnostic counters recorded by the last rebuild.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct BuildStats {
    /// Number of rectangles the tree was built from.
    pub rects: usize,
    /// Height of the tree (an atom alone has height 1).
    pub height: usize,
    /// Size of the smallest atom.
    pub fewest: usize,
    /// Size of the largest atom.
    pub most: usize,
    /// Total node count, leaves included.
    pub nodes: usize,
    /// Number of bottom nodes (atoms).
    pub bottom_nodes: usize,
}

/// Which side of a candidate split line a box falls on.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
enum Side {
    Below,
    #[default]
    Straddle,
    Above,
}

#[derive(Clone, Debug)]
pub(crate) struct PartitionBox {
    pub(crate) range: Range2d,
    pub(crate) index: usize,
    side: [Side; 2],
}

impl PartitionBox {
    fn classify(&mut self, mid: f64, axis: Axis) -> Side {
        let side = if axis.coord(self.range.max) < mid {
            Side::Below
        } else if axis.coord(self.range.min) > mid {
            Side::Above
        } else {
            Side::Straddle
        };
        self.side[axis.slot()] = side;
        side
    }
}

#[derive(Debug)]
pub(crate) enum Partition {
    Atom(Vec<PartitionBox>),
    Split(Box<Partition>, Box<Partition>),
}

/// A finished partition together with its diagnostic counters.
#[derive(Debug)]
pub(crate) struct Partitioned {
    pub(crate) root: Partition,
    pub(crate) height: usize,
    pub(crate) fewest: usize,
    pub(crate) most: usize,
}

/// Partition `ranges` (indexed by position) into a binary tree of atoms.
pub(crate) fn partition(
    ranges: impl IntoIterator<Item = Range2d>,
    options: BuildOptions,
) -> Partitioned {
    debug_assert!(options.min_group >= 1, "min_group must be at least 1");
    let boxes = ranges
        .into_iter()
        .enumerate()
        .map(|(index, range)| PartitionBox {
            range,
            index,
            side: [Side::default(); 2],
        })
        .collect();
    let mut counters = Counters {
        fewest: usize::MAX,
        most: 0,
    };
    let (root, height) = make_group(boxes, options.min_group, &mut counters);
    Partitioned {
        root,
        height,
        fewest: counters.fewest,
        most: counters.most,
    }
}

struct Counters {
    fewest: usize,
    most: usize,
}

impl Counters {
    fn atom(&mut self, boxes: Vec<PartitionBox>) -> (Partition, usize) {
        self.fewest = self.fewest.min(boxes.len());
        self.most = self.most.max(boxes.len());
        (Partition::Atom(boxes), 1)
    }
}

fn is_ok_division(div: usize, n: usize, lim: usize) -> bool {
    div.min(n - div) >= lim.max(3)
}

/// Classify every box against `mid` on `axis`; returns the count strictly above.
fn try_division(boxes: &mut [PartitionBox], mid: f64, axis: Axis) -> usize {
    boxes
        .iter_mut()
        .map(|b| b.classify(mid, axis))
        .filter(|side| *side == Side::Above)
        .count()
}

/// Find the first acceptable split, leaving each box classified on the returned axis.
fn choose_split(boxes: &mut [PartitionBox], bounds: &Range2d, lim: usize) -> Option<Axis> {
    let n = boxes.len();
    let order = if bounds.extent(Axis::X) < bounds.extent(Axis::Y) {
        [Axis::Y, Axis::X]
    } else {
        [Axis::X, Axis::Y]
    };

    let middle = bounds.center();
    for axis in order {
        if is_ok_division(try_division(boxes, axis.coord(middle), axis), n, lim) {
            return Some(axis);
        }
    }

    // Midpoints failed; sweep eighths along each axis and take the first that works.
    for axis in order {
        let start = axis.coord(bounds.min);
        let delta = bounds.extent(axis);
        for j in 1..=7_i32 {
            let m = start + f64::from(j) * delta / 8.0;
            if is_ok_division(try_division(boxes, m, axis), n, lim) {
                return Some(axis);
            }
        }
    }
    None
}

fn make_group(
    mut boxes: Vec<PartitionBox>,
    lim: usize,
    counters: &mut Counters,
) -> (Partition, usize) {
    if boxes.len() < lim.saturating_mul(2) {
        return counters.atom(boxes);
    }

    let Some(first) = boxes.first().map(|b| b.range) else {
        return counters.atom(boxes);
    };
    let bounds = boxes[1..].iter().fold(first, |acc, b| acc.union(&b.range));

    let Some(axis) = choose_split(&mut boxes, &bounds, lim) else {
        return counters.atom(boxes);
    };

    // Straddling boxes travel with the ones below the line.
    let (above, rest): (Vec<_>, Vec<_>) = boxes
        .into_iter()
        .partition(|b| b.side[axis.slot()] == Side::Above);

    let (child0, h0) = make_group(above, lim, counters);
    let (child1, h1) = make_group(rest, lim, counters);
    (
        Partition::Split(Box::new(child0), Box::new(child1)),
        1 + h0.max(h1),
    )
}
