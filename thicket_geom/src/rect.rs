// Copyright 2026 the Thicket Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Axis-aligned integer rectangle with half-open predicates.

/// Axis-aligned rectangle with integer origin and size.
///
/// The occupied region is the half-open span `[x, x + width) × [y, y + height)`.
/// Width and height may be zero or negative; such a rectangle is *empty* and
/// satisfies no positive predicate.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct Rect {
    /// Horizontal coordinate of the left edge.
    pub x: i32,
    /// Vertical coordinate of the top edge.
    pub y: i32,
    /// Width of the rectangle.
    pub width: i32,
    /// Height of the rectangle.
    pub height: i32,
}

impl Rect {
    /// The zero-sized rectangle at the origin.
    pub const ZERO: Self = Self::new(0, 0, 0, 0);

    /// Create a rectangle from origin and size.
    pub const fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Coordinate one past the right edge.
    pub const fn right(&self) -> i32 {
        self.x + self.width
    }

    /// Coordinate one past the bottom edge.
    pub const fn bottom(&self) -> i32 {
        self.y + self.height
    }

    /// Whether the rectangle has no area.
    pub const fn is_empty(&self) -> bool {
        self.width <= 0 || self.height <= 0
    }

    /// Area in a widened accumulator. Empty rectangles report zero.
    pub const fn area(&self) -> i64 {
        if self.is_empty() {
            0
        } else {
            self.width as i64 * self.height as i64
        }
    }

    /// Whether the point lies within the half-open span of this rectangle.
    pub const fn contains_point(&self, x: i32, y: i32) -> bool {
        !self.is_empty()
            && x >= self.x
            && x < self.right()
            && y >= self.y
            && y < self.bottom()
    }

    /// Whether `other` lies entirely within this rectangle.
    ///
    /// Both rectangles must have positive area; shared edges count as
    /// contained under the half-open convention.
    pub const fn contains(&self, other: &Self) -> bool {
        !self.is_empty()
            && !other.is_empty()
            && self.x <= other.x
            && self.y <= other.y
            && other.right() <= self.right()
            && other.bottom() <= self.bottom()
    }

    /// Whether this rectangle lies entirely within `other`.
    pub const fn contained_by(&self, other: &Self) -> bool {
        other.contains(self)
    }

    /// Whether the two rectangles overlap with positive area.
    pub const fn intersects(&self, other: &Self) -> bool {
        !self.is_empty()
            && !other.is_empty()
            && min(self.right(), other.right()) > max(self.x, other.x)
            && min(self.bottom(), other.bottom()) > max(self.y, other.y)
    }

    /// Smallest rectangle enclosing both rectangles.
    ///
    /// This is corner arithmetic: a zero-sized rectangle still contributes
    /// its origin, which is what bounding-box accumulation wants.
    pub const fn union(&self, other: &Self) -> Self {
        let x = min(self.x, other.x);
        let y = min(self.y, other.y);
        let right = max(self.right(), other.right());
        let bottom = max(self.bottom(), other.bottom());
        Self::new(x, y, right - x, bottom - y)
    }

    /// Overlap of the two rectangles. May be empty (non-positive size) when
    /// the rectangles are disjoint on either axis.
    pub const fn intersection(&self, other: &Self) -> Self {
        let x = max(self.x, other.x);
        let y = max(self.y, other.y);
        let right = min(self.right(), other.right());
        let bottom = min(self.bottom(), other.bottom());
        Self::new(x, y, right - x, bottom - y)
    }
}

const fn min(a: i32, b: i32) -> i32 {
    if a < b { a } else { b }
}

const fn max(a: i32, b: i32) -> i32 {
    if a > b { a } else { b }
}

/// How much area would be wasted by merging the two rectangles into one,
/// as a percentage of their combined area.
///
/// The waste is how far the union's area exceeds `area(first) +
/// area(second) - overlap(first, second)`. A pair where either side has no
/// area scores maximally wasteful, so empty rectangles never become
/// attractive split seeds.
pub fn wasted_area(first: &Rect, second: &Rect) -> i64 {
    if first.width > 0 && first.height > 0 && second.width > 0 && second.height > 0 {
        let combined = first.area() + second.area();
        let union = first.union(second).area();
        let overlap = first.intersection(second).area();
        (union - (combined - overlap)) * 100 / combined
    } else {
        i64::MAX / 2
    }
}
