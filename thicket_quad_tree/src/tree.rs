// Copyright 2026 the Thicket Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Public `QuadTree` API.

use alloc::vec::Vec;
use core::mem;

use thicket_geom::{Bounded, Rect};

use crate::node::Node;

/// Rejected [`QuadTree::add`] input.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum AddError {
    /// The object's bounds have a width or height below 1, so no query
    /// could ever return it.
    EmptyBounds(Rect),
}

impl core::fmt::Display for AddError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::EmptyBounds(bounds) => {
                write!(f, "object bounds {bounds:?} enclose no area")
            }
        }
    }
}

impl core::error::Error for AddError {}

/// Storage and quick retrieval for 2D spatially-oriented objects over a
/// fixed partition.
///
/// The tree owns its elements; membership is decided by `PartialEq`.
/// Objects falling outside the root region accumulate in an overflow set;
/// once that set outgrows the threshold the tree reorganizes itself around
/// the union of everything it holds. The threshold doubles as the
/// per-node capacity that triggers quadrant splits.
///
/// See the [crate docs](crate) for the stable-bounds contract and the
/// external-synchronization requirement.
pub struct QuadTree<T> {
    root: Node<T>,
    outside: Vec<T>,
    threshold: usize,
}

impl<T> core::fmt::Debug for QuadTree<T> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("QuadTree")
            .field("region", &self.root.region)
            .field("outside", &self.outside.len())
            .field("threshold", &self.threshold)
            .finish_non_exhaustive()
    }
}

impl<T: Bounded> Default for QuadTree<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Bounded> QuadTree<T> {
    /// Create a new, empty tree with a threshold of 64.
    pub fn new() -> Self {
        Self::with_threshold(64)
    }

    /// Create a new, empty tree with the given overflow threshold, which
    /// also serves as the node capacity.
    pub fn with_threshold(threshold: usize) -> Self {
        Self {
            root: Node::new(Rect::ZERO, threshold),
            outside: Vec::new(),
            threshold,
        }
    }

    /// The overflow threshold and node capacity this tree was built with.
    pub fn threshold(&self) -> usize {
        self.threshold
    }

    /// Add an object to the tree.
    ///
    /// Objects with empty bounds are rejected: no query could ever return
    /// them, and they would distort the region computed by
    /// [`reorganize`](Self::reorganize).
    pub fn add(&mut self, obj: T) -> Result<(), AddError>
    where
        T: Clone + PartialEq,
    {
        let bounds = obj.bounds();
        if bounds.is_empty() {
            return Err(AddError::EmptyBounds(bounds));
        }
        if self.root.region.contains(&bounds) {
            self.root.add(obj);
        } else {
            self.outside.push(obj);
            if self.outside.len() > self.threshold {
                self.reorganize();
            }
        }
        Ok(())
    }

    /// Rebuild the partition to fit the current contents exactly. The new
    /// root region is the union of every member's bounds, so the overflow
    /// set comes out empty.
    pub fn reorganize(&mut self)
    where
        T: Clone + PartialEq,
    {
        let mut members = mem::take(&mut self.outside);
        self.root.collect_all(&mut |_| true, &mut members);
        let region = members
            .iter()
            .map(Bounded::bounds)
            .reduce(|acc, b| acc.union(&b))
            .unwrap_or(Rect::ZERO);
        self.root = Node::new(region, self.threshold);
        for one in members {
            self.root.add(one);
        }
    }

    /// Remove an object. Returns whether an equal object was present.
    pub fn remove(&mut self, obj: &T) -> bool
    where
        T: PartialEq,
    {
        if let Some(pos) = self.outside.iter().position(|one| one == obj) {
            self.outside.swap_remove(pos);
            true
        } else {
            self.root.remove(obj)
        }
    }

    /// Remove every object.
    pub fn clear(&mut self) {
        self.root = Node::new(Rect::ZERO, self.threshold);
        self.outside.clear();
    }

    /// Whether any object's bounds contain the point. Stops at the first hit.
    pub fn contains(&self, x: i32, y: i32) -> bool {
        self.contains_matching(x, y, |_| true)
    }

    /// Whether any object containing the point passes `matcher`.
    pub fn contains_matching(&self, x: i32, y: i32, mut matcher: impl FnMut(&T) -> bool) -> bool {
        self.root.hit_point(x, y, &mut matcher)
            || self
                .outside
                .iter()
                .any(|one| one.bounds().contains_point(x, y) && matcher(one))
    }

    /// Whether any object intersects `bounds`. Stops at the first hit.
    pub fn intersects(&self, bounds: &Rect) -> bool {
        self.intersects_matching(bounds, |_| true)
    }

    /// Whether any object intersecting `bounds` passes `matcher`.
    pub fn intersects_matching(&self, bounds: &Rect, mut matcher: impl FnMut(&T) -> bool) -> bool {
        self.root.hit_intersects(bounds, &mut matcher)
            || self
                .outside
                .iter()
                .any(|one| one.bounds().intersects(bounds) && matcher(one))
    }

    /// Whether any object lies entirely within `bounds`. Stops at the
    /// first hit.
    pub fn contained_by(&self, bounds: &Rect) -> bool {
        self.contained_by_matching(bounds, |_| true)
    }

    /// Whether any object lying entirely within `bounds` passes `matcher`.
    pub fn contained_by_matching(
        &self,
        bounds: &Rect,
        mut matcher: impl FnMut(&T) -> bool,
    ) -> bool {
        self.root.hit_inside(bounds, &mut matcher)
            || self
                .outside
                .iter()
                .any(|one| one.bounds().contained_by(bounds) && matcher(one))
    }

    /// Every object in the tree, each reported once.
    pub fn all(&self) -> Vec<T>
    where
        T: Clone + PartialEq,
    {
        self.all_matching(|_| true)
    }

    /// Every object passing `matcher`, each reported once.
    pub fn all_matching(&self, mut matcher: impl FnMut(&T) -> bool) -> Vec<T>
    where
        T: Clone + PartialEq,
    {
        let mut out = Vec::new();
        self.root.collect_all(&mut matcher, &mut out);
        self.sweep_outside(&mut out, |_| true, &mut matcher);
        out
    }

    /// All objects whose bounds contain the point.
    pub fn find_contains(&self, x: i32, y: i32) -> Vec<T>
    where
        T: Clone + PartialEq,
    {
        self.find_contains_matching(x, y, |_| true)
    }

    /// All objects whose bounds contain the point and pass `matcher`.
    pub fn find_contains_matching(
        &self,
        x: i32,
        y: i32,
        mut matcher: impl FnMut(&T) -> bool,
    ) -> Vec<T>
    where
        T: Clone + PartialEq,
    {
        let mut out = Vec::new();
        self.root.collect_point(x, y, &mut matcher, &mut out);
        self.sweep_outside(&mut out, |b| b.contains_point(x, y), &mut matcher);
        out
    }

    /// All objects intersecting `bounds`.
    pub fn find_intersects(&self, bounds: &Rect) -> Vec<T>
    where
        T: Clone + PartialEq,
    {
        self.find_intersects_matching(bounds, |_| true)
    }

    /// All objects intersecting `bounds` that pass `matcher`.
    pub fn find_intersects_matching(
        &self,
        bounds: &Rect,
        mut matcher: impl FnMut(&T) -> bool,
    ) -> Vec<T>
    where
        T: Clone + PartialEq,
    {
        let mut out = Vec::new();
        self.root.collect_intersects(bounds, &mut matcher, &mut out);
        self.sweep_outside(&mut out, |b| b.intersects(bounds), &mut matcher);
        out
    }

    /// All objects lying entirely within `bounds`.
    pub fn find_contained_by(&self, bounds: &Rect) -> Vec<T>
    where
        T: Clone + PartialEq,
    {
        self.find_contained_by_matching(bounds, |_| true)
    }

    /// All objects lying entirely within `bounds` that pass `matcher`.
    pub fn find_contained_by_matching(
        &self,
        bounds: &Rect,
        mut matcher: impl FnMut(&T) -> bool,
    ) -> Vec<T>
    where
        T: Clone + PartialEq,
    {
        let mut out = Vec::new();
        self.root.collect_inside(bounds, &mut matcher, &mut out);
        self.sweep_outside(&mut out, |b| b.contained_by(bounds), &mut matcher);
        out
    }

    /// Append the overflow-set members whose bounds pass `test` and that
    /// pass `matcher`, skipping any already collected.
    fn sweep_outside(
        &self,
        out: &mut Vec<T>,
        test: impl Fn(&Rect) -> bool,
        matcher: &mut dyn FnMut(&T) -> bool,
    ) where
        T: Clone + PartialEq,
    {
        for one in &self.outside {
            if test(&one.bounds()) && matcher(one) && !out.contains(one) {
                out.push(one.clone());
            }
        }
    }
}
