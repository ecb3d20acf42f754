// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Primitive geometry types and node handles.

use kurbo::{Point, Rect, Size};

/// Axis-aligned bounding range in 2D.
///
/// `min` is assumed to be component-wise less than or equal to `max`; this is
/// not enforced. Float inputs are assumed to be finite.
///
/// The two predicates use different boundary conventions:
/// [`is_outside`](Self::is_outside) treats touching edges as overlapping,
/// while [`contains`](Self::contains) excludes points lying on an edge.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Range2d {
    /// Minimum corner (left, top).
    pub min: Point,
    /// Maximum corner (right, bottom).
    pub max: Point,
}

impl Default for Range2d {
    fn default() -> Self {
        Self::ZERO
    }
}

impl Range2d {
    /// The degenerate range at the origin.
    pub const ZERO: Self = Self::new(Point::ZERO, Point::ZERO);

    /// Create a range from its min/max corners.
    pub const fn new(min: Point, max: Point) -> Self {
        Self { min, max }
    }

    /// Component-wise union of two ranges.
    pub fn union(&self, other: &Self) -> Self {
        Self {
            min: Point::new(self.min.x.min(other.min.x), self.min.y.min(other.min.y)),
            max: Point::new(self.max.x.max(other.max.x), self.max.y.max(other.max.y)),
        }
    }

    /// True iff the two ranges are separated by a gap on some axis.
    ///
    /// Ranges that only share an edge or a corner are not outside each other.
    pub fn is_outside(&self, other: &Self) -> bool {
        other.max.x < self.min.x
            || other.max.y < self.min.y
            || self.max.x < other.min.x
            || self.max.y < other.min.y
    }

    /// Strict interior test: a point on an edge is not contained.
    pub fn contains(&self, point: Point) -> bool {
        self.min.x < point.x && self.max.x > point.x && self.min.y < point.y && self.max.y > point.y
    }

    /// Width and height of the range.
    pub fn size(&self) -> Size {
        Size::new(self.max.x - self.min.x, self.max.y - self.min.y)
    }

    /// Extent of the range along `axis`.
    pub fn extent(&self, axis: Axis) -> f64 {
        axis.coord(self.max) - axis.coord(self.min)
    }

    /// Center point of the range.
    pub fn center(&self) -> Point {
        self.min.midpoint(self.max)
    }

    /// The range as a Kurbo rectangle.
    pub fn to_rect(&self) -> Rect {
        Rect::new(self.min.x, self.min.y, self.max.x, self.max.y)
    }

    /// Whether any coordinate is NaN.
    pub fn is_nan(&self) -> bool {
        self.min.x.is_nan() || self.min.y.is_nan() || self.max.x.is_nan() || self.max.y.is_nan()
    }
}

impl From<Rect> for Range2d {
    #[inline]
    fn from(r: Rect) -> Self {
        Self {
            min: Point::new(r.x0, r.y0),
            max: Point::new(r.x1, r.y1),
        }
    }
}

impl From<Range2d> for Rect {
    #[inline]
    fn from(r: Range2d) -> Self {
        r.to_rect()
    }
}

/// One of the two coordinate axes.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Axis {
    /// Horizontal axis.
    X,
    /// Vertical axis.
    Y,
}

impl Axis {
    /// Both axes, x first.
    pub const ALL: [Self; 2] = [Self::X, Self::Y];

    /// The coordinate of `p` along this axis.
    #[inline]
    pub fn coord(self, p: Point) -> f64 {
        match self {
            Self::X => p.x,
            Self::Y => p.y,
        }
    }

    /// Slot of this axis in per-axis arrays.
    #[inline]
    pub(crate) const fn slot(self) -> usize {
        match self {
            Self::X => 0,
            Self::Y => 1,
        }
    }
}

/// Identifier for a node in an [`Hbv`](crate::Hbv).
///
/// A small, copyable handle consisting of an arena slot and a generation.
///
/// ## Semantics
///
/// - Refreshing bounds with the same number of rectangles keeps every `NodeId` valid.
/// - Rebuilding (the rectangle count changed) bumps the generation; every `NodeId`
///   handed out before the rebuild becomes stale.
///
/// Use [`Hbv::is_alive`](crate::Hbv::is_alive) to check whether a `NodeId` still
/// refers to a node of the current tree. Stale ids never alias a node of a newer
/// tree because the generation must match.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub struct NodeId(pub(crate) u32, pub(crate) u32);

impl NodeId {
    pub(crate) const fn new(idx: u32, generation: u32) -> Self {
        Self(idx, generation)
    }

    pub(crate) const fn idx(self) -> usize {
        self.0 as usize
    }

    pub(crate) const fn generation(self) -> u32 {
        self.1
    }
}
