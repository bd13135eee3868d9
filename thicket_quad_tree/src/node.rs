// Copyright 2026 the Thicket Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Quadrant nodes and the region-pruned traversals.
//!
//! A node either holds all four quadrants or none of them; the partition
//! is structural, fixed at split time, and never rebalances. An object
//! touching several quadrants is filed into each, so result collectors
//! deduplicate. An object covering a node's whole region stays in that
//! node's contents instead of fanning out below it.

use alloc::boxed::Box;
use alloc::vec::Vec;
use core::mem;

use thicket_geom::{Bounded, Rect};

pub(crate) struct Quadrants<T> {
    pub(crate) north_west: Node<T>,
    pub(crate) north_east: Node<T>,
    pub(crate) south_west: Node<T>,
    pub(crate) south_east: Node<T>,
}

pub(crate) struct Node<T> {
    pub(crate) region: Rect,
    pub(crate) capacity: usize,
    pub(crate) contents: Vec<T>,
    pub(crate) quadrants: Option<Box<Quadrants<T>>>,
}

impl<T: Bounded> Node<T> {
    pub(crate) fn new(region: Rect, capacity: usize) -> Self {
        Self {
            region,
            capacity,
            contents: Vec::new(),
            quadrants: None,
        }
    }

    /// File an object below this node. The caller has already verified the
    /// region covers the object's bounds.
    pub(crate) fn add(&mut self, obj: T)
    where
        T: Clone,
    {
        // A full leaf splits first, unless the region is already too small
        // to divide on both axes.
        if self.quadrants.is_none()
            && self.contents.len() >= self.capacity
            && self.region.width > 1
            && self.region.height > 1
        {
            self.split();
        }
        let bounds = obj.bounds();
        match &mut self.quadrants {
            // An object covering the whole region stays here; pushing it
            // into all four quadrants would gain nothing.
            Some(_) if bounds.contains(&self.region) => self.contents.push(obj),
            Some(q) => {
                if q.north_east.region.intersects(&bounds) {
                    q.north_east.add(obj.clone());
                }
                if q.north_west.region.intersects(&bounds) {
                    q.north_west.add(obj.clone());
                }
                if q.south_east.region.intersects(&bounds) {
                    q.south_east.add(obj.clone());
                }
                if q.south_west.region.intersects(&bounds) {
                    q.south_west.add(obj);
                }
            }
            None => self.contents.push(obj),
        }
    }

    /// Divide the region into four quadrants and re-file the contents.
    /// The east and south quadrants absorb any odd remainder.
    fn split(&mut self)
    where
        T: Clone,
    {
        let Rect {
            x,
            y,
            width,
            height,
        } = self.region;
        let hw = width / 2;
        let hh = height / 2;
        self.quadrants = Some(Box::new(Quadrants {
            north_west: Self::new(Rect::new(x, y, hw, hh), self.capacity),
            north_east: Self::new(Rect::new(x + hw, y, width - hw, hh), self.capacity),
            south_west: Self::new(Rect::new(x, y + hh, hw, height - hh), self.capacity),
            south_east: Self::new(
                Rect::new(x + hw, y + hh, width - hw, height - hh),
                self.capacity,
            ),
        }));
        for one in mem::take(&mut self.contents) {
            self.add(one);
        }
    }

    /// Remove every copy of `obj` below this node. An object found in a
    /// node's own contents lives nowhere below it, so the search stops
    /// there; otherwise all four quadrants are tried.
    pub(crate) fn remove(&mut self, obj: &T) -> bool
    where
        T: PartialEq,
    {
        if let Some(pos) = self.contents.iter().position(|one| one == obj) {
            self.contents.swap_remove(pos);
            return true;
        }
        let mut removed = false;
        if let Some(q) = &mut self.quadrants
            && self.region.intersects(&obj.bounds())
        {
            removed |= q.north_east.remove(obj);
            removed |= q.north_west.remove(obj);
            removed |= q.south_east.remove(obj);
            removed |= q.south_west.remove(obj);
        }
        removed
    }

    pub(crate) fn hit_point(&self, x: i32, y: i32, accept: &mut dyn FnMut(&T) -> bool) -> bool {
        if !self.region.contains_point(x, y) {
            return false;
        }
        if self
            .contents
            .iter()
            .any(|one| one.bounds().contains_point(x, y) && accept(one))
        {
            return true;
        }
        match &self.quadrants {
            Some(q) => {
                q.north_west.hit_point(x, y, accept)
                    || q.north_east.hit_point(x, y, accept)
                    || q.south_west.hit_point(x, y, accept)
                    || q.south_east.hit_point(x, y, accept)
            }
            None => false,
        }
    }

    pub(crate) fn hit_intersects(
        &self,
        bounds: &Rect,
        accept: &mut dyn FnMut(&T) -> bool,
    ) -> bool {
        if !self.region.intersects(bounds) {
            return false;
        }
        if self
            .contents
            .iter()
            .any(|one| one.bounds().intersects(bounds) && accept(one))
        {
            return true;
        }
        match &self.quadrants {
            Some(q) => {
                q.north_west.hit_intersects(bounds, accept)
                    || q.north_east.hit_intersects(bounds, accept)
                    || q.south_west.hit_intersects(bounds, accept)
                    || q.south_east.hit_intersects(bounds, accept)
            }
            None => false,
        }
    }

    pub(crate) fn hit_inside(&self, bounds: &Rect, accept: &mut dyn FnMut(&T) -> bool) -> bool {
        if !self.region.intersects(bounds) {
            return false;
        }
        if self
            .contents
            .iter()
            .any(|one| one.bounds().contained_by(bounds) && accept(one))
        {
            return true;
        }
        match &self.quadrants {
            Some(q) => {
                q.north_west.hit_inside(bounds, accept)
                    || q.north_east.hit_inside(bounds, accept)
                    || q.south_west.hit_inside(bounds, accept)
                    || q.south_east.hit_inside(bounds, accept)
            }
            None => false,
        }
    }

    pub(crate) fn collect_all(&self, accept: &mut dyn FnMut(&T) -> bool, out: &mut Vec<T>)
    where
        T: Clone + PartialEq,
    {
        for one in &self.contents {
            if accept(one) && !out.contains(one) {
                out.push(one.clone());
            }
        }
        if let Some(q) = &self.quadrants {
            q.north_west.collect_all(accept, out);
            q.north_east.collect_all(accept, out);
            q.south_west.collect_all(accept, out);
            q.south_east.collect_all(accept, out);
        }
    }

    pub(crate) fn collect_point(
        &self,
        x: i32,
        y: i32,
        accept: &mut dyn FnMut(&T) -> bool,
        out: &mut Vec<T>,
    ) where
        T: Clone + PartialEq,
    {
        if !self.region.contains_point(x, y) {
            return;
        }
        for one in &self.contents {
            if one.bounds().contains_point(x, y) && accept(one) && !out.contains(one) {
                out.push(one.clone());
            }
        }
        if let Some(q) = &self.quadrants {
            q.north_west.collect_point(x, y, accept, out);
            q.north_east.collect_point(x, y, accept, out);
            q.south_west.collect_point(x, y, accept, out);
            q.south_east.collect_point(x, y, accept, out);
        }
    }

    pub(crate) fn collect_intersects(
        &self,
        bounds: &Rect,
        accept: &mut dyn FnMut(&T) -> bool,
        out: &mut Vec<T>,
    ) where
        T: Clone + PartialEq,
    {
        if !self.region.intersects(bounds) {
            return;
        }
        for one in &self.contents {
            if one.bounds().intersects(bounds) && accept(one) && !out.contains(one) {
                out.push(one.clone());
            }
        }
        if let Some(q) = &self.quadrants {
            q.north_west.collect_intersects(bounds, accept, out);
            q.north_east.collect_intersects(bounds, accept, out);
            q.south_west.collect_intersects(bounds, accept, out);
            q.south_east.collect_intersects(bounds, accept, out);
        }
    }

    pub(crate) fn collect_inside(
        &self,
        bounds: &Rect,
        accept: &mut dyn FnMut(&T) -> bool,
        out: &mut Vec<T>,
    ) where
        T: Clone + PartialEq,
    {
        if !self.region.intersects(bounds) {
            return;
        }
        for one in &self.contents {
            if one.bounds().contained_by(bounds) && accept(one) && !out.contains(one) {
                out.push(one.clone());
            }
        }
        if let Some(q) = &self.quadrants {
            q.north_west.collect_inside(bounds, accept, out);
            q.north_east.collect_inside(bounds, accept, out);
            q.south_west.collect_inside(bounds, accept, out);
            q.south_east.collect_inside(bounds, accept, out);
        }
    }
}
