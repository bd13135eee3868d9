// Copyright 2026 the Thicket Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Node storage and the insertion, condensation, and traversal algorithms.
//!
//! Nodes live in an arena owned by the tree; parent and child links are
//! indices into it, so nothing dangles while splits and dissolves shuffle
//! the structure around.

use alloc::vec::Vec;
use core::mem;

use thicket_geom::{Bounded, Rect, wasted_area};

use crate::tree::AreaTree;

/// Entries a node holds in steady state. One extra slot of transient
/// overflow is tolerated between an append and the split resolving it.
pub(crate) const MAX_PER_NODE: usize = 4;

/// Below this many entries a non-root node is dissolved and its contents
/// reinserted.
pub(crate) const MIN_PER_NODE: usize = MAX_PER_NODE / 2;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub(crate) struct NodeIdx(usize);

impl NodeIdx {
    pub(crate) const fn new(i: usize) -> Self {
        Self(i)
    }

    pub(crate) const fn get(self) -> usize {
        self.0
    }
}

/// A node's children: either stored objects or further nodes, never mixed.
pub(crate) enum Bucket<T> {
    Leaf(Vec<T>),
    Internal(Vec<NodeIdx>),
}

pub(crate) struct Node<T> {
    pub(crate) parent: Option<NodeIdx>,
    pub(crate) bounds: Rect,
    pub(crate) bucket: Bucket<T>,
}

impl<T> Node<T> {
    pub(crate) fn empty_leaf() -> Self {
        Self {
            parent: None,
            bounds: Rect::ZERO,
            bucket: Bucket::Leaf(Vec::with_capacity(MAX_PER_NODE + 1)),
        }
    }

    pub(crate) fn len(&self) -> usize {
        match &self.bucket {
            Bucket::Leaf(items) => items.len(),
            Bucket::Internal(kids) => kids.len(),
        }
    }
}

impl<T: Bounded> AreaTree<T> {
    pub(crate) fn node(&self, ix: NodeIdx) -> &Node<T> {
        self.nodes[ix.get()].as_ref().expect("live node")
    }

    pub(crate) fn node_mut(&mut self, ix: NodeIdx) -> &mut Node<T> {
        self.nodes[ix.get()].as_mut().expect("live node")
    }

    fn alloc(&mut self, node: Node<T>) -> NodeIdx {
        if let Some(slot) = self.free.pop() {
            self.nodes[slot] = Some(node);
            NodeIdx::new(slot)
        } else {
            self.nodes.push(Some(node));
            NodeIdx::new(self.nodes.len() - 1)
        }
    }

    fn sweep(&mut self, dead: Vec<NodeIdx>) {
        for ix in dead {
            self.nodes[ix.get()] = None;
            self.free.push(ix.get());
        }
    }

    /// Recompute a node's cached bounds from its current children.
    pub(crate) fn adjust_bounds(&mut self, ix: NodeIdx) {
        let bounds = match &self.node(ix).bucket {
            Bucket::Leaf(items) => {
                let mut it = items.iter();
                match it.next() {
                    Some(first) => it.fold(first.bounds(), |acc, item| acc.union(&item.bounds())),
                    None => Rect::ZERO,
                }
            }
            Bucket::Internal(kids) => {
                let mut it = kids.iter();
                match it.next() {
                    Some(&first) => it.fold(self.node(first).bounds, |acc, &kid| {
                        acc.union(&self.node(kid).bounds)
                    }),
                    None => Rect::ZERO,
                }
            }
        };
        self.node_mut(ix).bounds = bounds;
    }

    /// Insert an object, splitting and growing the tree as needed.
    pub(crate) fn insert_entry(&mut self, obj: T) {
        let bounds = obj.bounds();

        // Descend to the leaf whose bounds would grow the least by taking
        // the new object. Ties keep the last candidate scanned.
        let mut leaf = self.root;
        loop {
            let kids = match &self.node(leaf).bucket {
                Bucket::Leaf(_) => break,
                Bucket::Internal(kids) => kids,
            };
            let mut next = leaf;
            let mut growth = i64::MAX;
            for &kid in kids {
                let kid_bounds = self.node(kid).bounds;
                let grown = kid_bounds.union(&bounds).area() - kid_bounds.area();
                if grown <= growth {
                    growth = grown;
                    next = kid;
                }
            }
            leaf = next;
        }

        match &mut self.node_mut(leaf).bucket {
            Bucket::Leaf(items) => items.push(obj),
            Bucket::Internal(_) => unreachable!("descent ends at a leaf"),
        }
        let mut split = (self.node(leaf).len() > MAX_PER_NODE).then(|| self.split_node(leaf));

        // Walk back to the root, refreshing cached bounds. A split-off
        // sibling joins the parent's bucket, which may overflow in turn.
        let mut cursor = Some(leaf);
        while let Some(ix) = cursor {
            self.adjust_bounds(ix);
            let parent = self.node(ix).parent;
            if let Some(sibling) = split {
                self.adjust_bounds(sibling);
                if let Some(parent) = parent {
                    match &mut self.node_mut(parent).bucket {
                        Bucket::Internal(kids) => kids.push(sibling),
                        Bucket::Leaf(_) => unreachable!("parents are internal"),
                    }
                    self.node_mut(sibling).parent = Some(parent);
                    split =
                        (self.node(parent).len() > MAX_PER_NODE).then(|| self.split_node(parent));
                }
            }
            cursor = parent;
        }

        // The old root split: put a new root above both halves.
        if let Some(sibling) = split {
            let old_root = self.root;
            let new_root = self.alloc(Node {
                parent: None,
                bounds: Rect::ZERO,
                bucket: Bucket::Internal(alloc::vec![old_root, sibling]),
            });
            self.node_mut(old_root).parent = Some(new_root);
            self.node_mut(sibling).parent = Some(new_root);
            self.adjust_bounds(new_root);
            self.root = new_root;
        }
    }

    /// Split an overflowing node, returning the new sibling.
    fn split_node(&mut self, ix: NodeIdx) -> NodeIdx {
        let parent = self.node(ix).parent;
        let bucket = mem::replace(&mut self.node_mut(ix).bucket, Bucket::Leaf(Vec::new()));
        match bucket {
            Bucket::Leaf(items) => {
                let (left, left_bounds, right, right_bounds) =
                    quadratic_split(items, |item| item.bounds());
                let node = self.node_mut(ix);
                node.bounds = left_bounds;
                node.bucket = Bucket::Leaf(left);
                self.alloc(Node {
                    parent,
                    bounds: right_bounds,
                    bucket: Bucket::Leaf(right),
                })
            }
            Bucket::Internal(kids) => {
                let entries: Vec<(NodeIdx, Rect)> =
                    kids.iter().map(|&kid| (kid, self.node(kid).bounds)).collect();
                let (left, left_bounds, right, right_bounds) =
                    quadratic_split(entries, |&(_, bounds)| bounds);
                let node = self.node_mut(ix);
                node.bounds = left_bounds;
                node.bucket = Bucket::Internal(left.iter().map(|&(kid, _)| kid).collect());
                let sibling = self.alloc(Node {
                    parent,
                    bounds: right_bounds,
                    bucket: Bucket::Internal(right.iter().map(|&(kid, _)| kid).collect()),
                });
                for &(kid, _) in &right {
                    self.node_mut(kid).parent = Some(sibling);
                }
                sibling
            }
        }
    }

    /// Find the leaf currently holding `obj`, pruning by intersection.
    pub(crate) fn find_leaf(&self, ix: NodeIdx, obj: &T, bounds: &Rect) -> Option<NodeIdx>
    where
        T: PartialEq,
    {
        match &self.node(ix).bucket {
            Bucket::Leaf(items) => items
                .iter()
                .any(|item| bounds.intersects(&item.bounds()) && item == obj)
                .then_some(ix),
            Bucket::Internal(kids) => {
                for &kid in kids {
                    if bounds.intersects(&self.node(kid).bounds)
                        && let Some(found) = self.find_leaf(kid, obj, bounds)
                    {
                        return Some(found);
                    }
                }
                None
            }
        }
    }

    /// Remove one object, condensing the tree afterwards.
    pub(crate) fn remove_entry(&mut self, obj: &T) -> Option<T>
    where
        T: PartialEq,
    {
        let bounds = obj.bounds();
        let leaf = self.find_leaf(self.root, obj, &bounds)?;
        let removed = match &mut self.node_mut(leaf).bucket {
            Bucket::Leaf(items) => {
                let pos = items.iter().position(|item| item == obj)?;
                items.swap_remove(pos)
            }
            Bucket::Internal(_) => unreachable!("find_leaf returns leaves"),
        };

        let mut saved = Vec::new();
        let mut dead = Vec::new();
        self.condense_from(leaf, &mut saved, &mut dead);
        self.sweep(dead);
        for item in saved {
            self.insert_entry(item);
        }
        self.collapse_root();
        let root = self.root;
        self.adjust_bounds(root);
        Some(removed)
    }

    /// Remove many objects at once, visiting each affected leaf only once
    /// before condensing, so shared ancestors are not reworked per object.
    pub(crate) fn remove_batch<'a, I>(&mut self, items: I) -> Vec<T>
    where
        T: PartialEq + 'a,
        I: IntoIterator<Item = &'a T>,
    {
        let mut removed = Vec::new();
        let mut visited: Vec<NodeIdx> = Vec::new();
        for obj in items {
            let bounds = obj.bounds();
            if let Some(leaf) = self.find_leaf(self.root, obj, &bounds) {
                if !visited.contains(&leaf) {
                    visited.push(leaf);
                }
                if let Bucket::Leaf(bucket) = &mut self.node_mut(leaf).bucket
                    && let Some(pos) = bucket.iter().position(|item| item == obj)
                {
                    removed.push(bucket.swap_remove(pos));
                }
            }
        }

        let mut saved = Vec::new();
        let mut dead = Vec::new();
        for leaf in visited {
            self.condense_from(leaf, &mut saved, &mut dead);
        }
        self.sweep(dead);
        for item in saved {
            self.insert_entry(item);
        }
        self.collapse_root();
        let root = self.root;
        self.adjust_bounds(root);
        removed
    }

    /// Walk from a modified leaf to the root. Under-full nodes along the way
    /// are dissolved into `saved` for reinsertion; the rest just get their
    /// bounds refreshed. Dissolved nodes stay allocated until the caller
    /// sweeps `dead`, since a batch walk may still revisit them.
    fn condense_from(&mut self, start: NodeIdx, saved: &mut Vec<T>, dead: &mut Vec<NodeIdx>) {
        let mut ix = start;
        while let Some(parent) = self.node(ix).parent {
            if self.node(ix).len() < MIN_PER_NODE {
                self.dissolve(ix, saved, dead);
                if !dead.contains(&ix) {
                    dead.push(ix);
                }
                let mut emptied = false;
                if let Bucket::Internal(kids) = &mut self.node_mut(parent).bucket {
                    if let Some(pos) = kids.iter().position(|&kid| kid == ix) {
                        kids.swap_remove(pos);
                    }
                    emptied = kids.is_empty();
                }
                if emptied {
                    self.node_mut(parent).bucket = Bucket::Leaf(Vec::new());
                }
                self.node_mut(ix).parent = None;
            } else {
                self.adjust_bounds(ix);
            }
            ix = parent;
        }
    }

    /// Collect every stored object below `ix` into `saved`, leaving the
    /// emptied nodes behind for the caller to sweep.
    fn dissolve(&mut self, ix: NodeIdx, saved: &mut Vec<T>, dead: &mut Vec<NodeIdx>) {
        let bucket = mem::replace(&mut self.node_mut(ix).bucket, Bucket::Leaf(Vec::new()));
        match bucket {
            Bucket::Leaf(items) => saved.extend(items),
            Bucket::Internal(kids) => {
                for kid in kids {
                    self.dissolve(kid, saved, dead);
                    dead.push(kid);
                }
            }
        }
    }

    /// An internal root left with a single child hands the root role down.
    fn collapse_root(&mut self) {
        let root = self.root;
        if let Bucket::Internal(kids) = &self.node(root).bucket
            && kids.len() == 1
        {
            let child = kids[0];
            self.nodes[root.get()] = None;
            self.free.push(root.get());
            self.node_mut(child).parent = None;
            self.root = child;
        }
    }

    pub(crate) fn collect_rect<'a>(
        &'a self,
        ix: NodeIdx,
        bounds: Option<Rect>,
        exact: bool,
        accept: &mut dyn FnMut(&T) -> bool,
        out: &mut Vec<&'a T>,
    ) {
        match &self.node(ix).bucket {
            Bucket::Leaf(items) => {
                for item in items {
                    let item_bounds = item.bounds();
                    if bounds.is_none_or(|b| b.intersects(&item_bounds))
                        && (!exact || bounds.is_none_or(|b| b == item_bounds))
                        && accept(item)
                    {
                        out.push(item);
                    }
                }
            }
            Bucket::Internal(kids) => {
                for &kid in kids {
                    if bounds.is_none_or(|b| b.intersects(&self.node(kid).bounds)) {
                        self.collect_rect(kid, bounds, exact, accept, out);
                    }
                }
            }
        }
    }

    pub(crate) fn collect_point<'a>(
        &'a self,
        ix: NodeIdx,
        x: i32,
        y: i32,
        accept: &mut dyn FnMut(&T) -> bool,
        out: &mut Vec<&'a T>,
    ) {
        match &self.node(ix).bucket {
            Bucket::Leaf(items) => {
                for item in items {
                    if item.bounds().contains_point(x, y) && accept(item) {
                        out.push(item);
                    }
                }
            }
            Bucket::Internal(kids) => {
                for &kid in kids {
                    if self.node(kid).bounds.contains_point(x, y) {
                        self.collect_point(kid, x, y, accept, out);
                    }
                }
            }
        }
    }

    pub(crate) fn hit_point(&self, ix: NodeIdx, x: i32, y: i32) -> bool {
        match &self.node(ix).bucket {
            Bucket::Leaf(items) => items.iter().any(|item| item.bounds().contains_point(x, y)),
            Bucket::Internal(kids) => {
                for &kid in kids {
                    if self.node(kid).bounds.contains_point(x, y) && self.hit_point(kid, x, y) {
                        return true;
                    }
                }
                false
            }
        }
    }

    pub(crate) fn hit_rect(
        &self,
        ix: NodeIdx,
        bounds: &Rect,
        accept: &mut dyn FnMut(&T) -> bool,
    ) -> bool {
        match &self.node(ix).bucket {
            Bucket::Leaf(items) => items
                .iter()
                .any(|item| bounds.intersects(&item.bounds()) && accept(item)),
            Bucket::Internal(kids) => {
                for &kid in kids {
                    if bounds.intersects(&self.node(kid).bounds)
                        && self.hit_rect(kid, bounds, accept)
                    {
                        return true;
                    }
                }
                false
            }
        }
    }

    pub(crate) fn count_rect(&self, ix: NodeIdx, bounds: Option<Rect>, exact: bool) -> usize {
        match &self.node(ix).bucket {
            Bucket::Leaf(items) => items
                .iter()
                .filter(|item| {
                    let item_bounds = item.bounds();
                    bounds.is_none_or(|b| b.intersects(&item_bounds))
                        && (!exact || bounds.is_none_or(|b| b == item_bounds))
                })
                .count(),
            Bucket::Internal(kids) => kids
                .iter()
                .filter(|&&kid| bounds.is_none_or(|b| b.intersects(&self.node(kid).bounds)))
                .map(|&kid| self.count_rect(kid, bounds, exact))
                .sum(),
        }
    }

    pub(crate) fn count_point(&self, ix: NodeIdx, x: i32, y: i32) -> usize {
        match &self.node(ix).bucket {
            Bucket::Leaf(items) => items
                .iter()
                .filter(|item| item.bounds().contains_point(x, y))
                .count(),
            Bucket::Internal(kids) => kids
                .iter()
                .filter(|&&kid| self.node(kid).bounds.contains_point(x, y))
                .map(|&kid| self.count_point(kid, x, y))
                .sum(),
        }
    }
}

/// Quadratic split: seed with the most wasteful pair, then deal the rest
/// out alternately, each time picking the entry that wastes the least area
/// joining the receiving side. Ties keep the last candidate scanned, which
/// is load-bearing for callers that pin exact output ordering.
fn quadratic_split<E>(
    mut entries: Vec<E>,
    bounds_of: impl Fn(&E) -> Rect,
) -> (Vec<E>, Rect, Vec<E>, Rect) {
    debug_assert!(entries.len() >= 2, "split requires an overflowing bucket");

    let mut largest = -1_i64;
    let (mut first, mut second) = (0, 1);
    for i in 0..entries.len() - 1 {
        for j in i + 1..entries.len() {
            let wasted = wasted_area(&bounds_of(&entries[i]), &bounds_of(&entries[j]));
            if wasted >= largest {
                largest = wasted;
                first = i;
                second = j;
            }
        }
    }

    // Pull the seeds out; swap-removing `first` may have moved the last
    // entry into its slot.
    let second_pos = if second == entries.len() - 1 {
        first
    } else {
        second
    };
    let left_seed = entries.swap_remove(first);
    let right_seed = entries.swap_remove(second_pos);

    let mut left = Vec::with_capacity(MAX_PER_NODE + 1);
    let mut left_bounds = bounds_of(&left_seed);
    left.push(left_seed);
    let mut right = Vec::with_capacity(MAX_PER_NODE + 1);
    let mut right_bounds = bounds_of(&right_seed);
    right.push(right_seed);

    let mut into_left = true;
    while !entries.is_empty() {
        let (side, side_bounds) = if into_left {
            (&mut left, &mut left_bounds)
        } else {
            (&mut right, &mut right_bounds)
        };
        let mut smallest = i64::MAX;
        let mut pick = 0;
        for (i, entry) in entries.iter().enumerate() {
            let wasted = wasted_area(side_bounds, &bounds_of(entry));
            if wasted <= smallest {
                smallest = wasted;
                pick = i;
            }
        }
        *side_bounds = side_bounds.union(&bounds_of(&entries[pick]));
        side.push(entries.swap_remove(pick));
        into_left = !into_left;
    }

    (left, left_bounds, right, right_bounds)
}
