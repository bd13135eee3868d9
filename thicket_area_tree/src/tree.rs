// Copyright 2026 the Thicket Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Public `AreaTree` API.

use alloc::vec::Vec;

use thicket_geom::{Bounded, Rect};

use crate::node::{Node, NodeIdx};

/// Storage and quick retrieval for 2D spatially-oriented objects.
///
/// The tree owns its elements. Membership is decided by `PartialEq`, so two
/// equal elements are interchangeable as far as `contains` and `remove` are
/// concerned.
///
/// See the [crate docs](crate) for the stable-bounds contract and the
/// external-synchronization requirement.
pub struct AreaTree<T> {
    pub(crate) nodes: Vec<Option<Node<T>>>,
    pub(crate) free: Vec<usize>,
    pub(crate) root: NodeIdx,
}

impl<T> core::fmt::Debug for AreaTree<T> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let total = self.nodes.len();
        let alive = self.nodes.iter().filter(|n| n.is_some()).count();
        f.debug_struct("AreaTree")
            .field("nodes_total", &total)
            .field("nodes_alive", &alive)
            .field("free_list", &self.free.len())
            .field("root", &self.root)
            .finish_non_exhaustive()
    }
}

impl<T: Bounded> Default for AreaTree<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Bounded> AreaTree<T> {
    /// Create a new, empty tree.
    pub fn new() -> Self {
        Self {
            nodes: alloc::vec![Some(Node::empty_leaf())],
            free: Vec::new(),
            root: NodeIdx::new(0),
        }
    }

    /// Remove every element.
    pub fn clear(&mut self) {
        self.nodes.clear();
        self.nodes.push(Some(Node::empty_leaf()));
        self.free.clear();
        self.root = NodeIdx::new(0);
    }

    /// Insert an object into the tree.
    pub fn insert(&mut self, obj: T) {
        self.insert_entry(obj);
    }

    /// Remove an object, returning it. Returns `None` (and changes nothing)
    /// if no equal object is present.
    pub fn remove(&mut self, obj: &T) -> Option<T>
    where
        T: PartialEq,
    {
        self.remove_entry(obj)
    }

    /// Remove a batch of objects, returning those actually removed.
    /// Objects not present are skipped.
    pub fn remove_all<'a, I>(&mut self, objects: I) -> Vec<T>
    where
        T: PartialEq + 'a,
        I: IntoIterator<Item = &'a T>,
    {
        self.remove_batch(objects)
    }

    /// Whether the tree currently holds an object equal to `obj`.
    pub fn contains(&self, obj: &T) -> bool
    where
        T: PartialEq,
    {
        self.find_leaf(self.root, obj, &obj.bounds()).is_some()
    }

    /// The number of elements in the tree.
    pub fn count(&self) -> usize {
        self.search_count(None, false)
    }

    /// Every element in the tree.
    pub fn all(&self) -> Vec<&T> {
        self.search(None, false)
    }

    /// The bounds the tree encompasses. An empty tree reports [`Rect::ZERO`].
    pub fn bounds(&self) -> Rect {
        self.node(self.root).bounds
    }

    /// All objects intersecting `bounds`, or — with `exact_match` — only
    /// those whose bounds equal it coordinate for coordinate. `None` matches
    /// everything.
    pub fn search(&self, bounds: Option<Rect>, exact_match: bool) -> Vec<&T> {
        let mut out = Vec::new();
        self.collect_rect(self.root, bounds, exact_match, &mut |_| true, &mut out);
        out
    }

    /// All objects intersecting `bounds` that also pass `matcher`.
    pub fn search_matching(
        &self,
        bounds: Option<Rect>,
        mut matcher: impl FnMut(&T) -> bool,
    ) -> Vec<&T> {
        let mut out = Vec::new();
        self.collect_rect(self.root, bounds, false, &mut matcher, &mut out);
        out
    }

    /// All objects whose bounds contain the point.
    pub fn search_point(&self, x: i32, y: i32) -> Vec<&T> {
        let mut out = Vec::new();
        self.collect_point(self.root, x, y, &mut |_| true, &mut out);
        out
    }

    /// All objects whose bounds contain the point and pass `matcher`.
    pub fn search_point_matching(
        &self,
        x: i32,
        y: i32,
        mut matcher: impl FnMut(&T) -> bool,
    ) -> Vec<&T> {
        let mut out = Vec::new();
        self.collect_point(self.root, x, y, &mut matcher, &mut out);
        out
    }

    /// Whether any object's bounds contain the point. Stops at the first hit.
    pub fn search_hit_point(&self, x: i32, y: i32) -> bool {
        self.hit_point(self.root, x, y)
    }

    /// Whether any object intersects `bounds`. Stops at the first hit.
    pub fn search_hit(&self, bounds: &Rect) -> bool {
        self.hit_rect(self.root, bounds, &mut |_| true)
    }

    /// Whether any object intersecting `bounds` passes `matcher`.
    pub fn search_hit_matching(&self, bounds: &Rect, mut matcher: impl FnMut(&T) -> bool) -> bool {
        self.hit_rect(self.root, bounds, &mut matcher)
    }

    /// The number of objects [`search`](Self::search) would return, without
    /// building the result list.
    pub fn search_count(&self, bounds: Option<Rect>, exact_match: bool) -> usize {
        self.count_rect(self.root, bounds, exact_match)
    }

    /// The number of objects whose bounds contain the point.
    pub fn search_count_point(&self, x: i32, y: i32) -> usize {
        self.count_point(self.root, x, y)
    }
}

impl<T: Bounded> Extend<T> for AreaTree<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for obj in iter {
            self.insert(obj);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::node::Bucket;
    use alloc::vec;

    #[derive(Clone, Debug, PartialEq)]
    struct Item {
        id: u32,
        rect: Rect,
    }

    impl Item {
        fn new(id: u32, x: i32, y: i32, w: i32, h: i32) -> Self {
            Self {
                id,
                rect: Rect::new(x, y, w, h),
            }
        }
    }

    impl Bounded for Item {
        fn bounds(&self) -> Rect {
            self.rect
        }
    }

    #[test]
    fn insert_remove_round_trip() {
        let mut tree = AreaTree::new();
        let item = Item::new(1, 5, 5, 10, 10);
        tree.insert(item.clone());
        assert!(tree.contains(&item));
        assert!(
            tree.search(Some(Rect::new(0, 0, 20, 20)), false)
                .iter()
                .any(|found| **found == item)
        );

        assert_eq!(tree.remove(&item), Some(item.clone()));
        assert!(!tree.contains(&item));
        assert!(tree.search(None, false).is_empty());
        assert!(!tree.search_hit_point(10, 10));
    }

    #[test]
    fn removing_twice_is_a_noop() {
        let mut tree = AreaTree::new();
        let item = Item::new(1, 0, 0, 4, 4);
        tree.insert(item.clone());
        assert!(tree.remove(&item).is_some());
        assert!(tree.remove(&item).is_none());
        assert_eq!(tree.count(), 0);
    }

    #[test]
    fn bounds_track_the_exact_union() {
        let mut tree = AreaTree::new();
        assert_eq!(tree.bounds(), Rect::ZERO);

        let items = vec![
            Item::new(0, -5, -5, 10, 10),
            Item::new(1, 20, 0, 10, 10),
            Item::new(2, 0, 30, 5, 5),
        ];
        let mut expected: Option<Rect> = None;
        for item in &items {
            tree.insert(item.clone());
            expected = Some(match expected {
                Some(acc) => acc.union(&item.rect),
                None => item.rect,
            });
            assert_eq!(tree.bounds(), expected.unwrap());
        }

        tree.remove(&items[1]);
        assert_eq!(
            tree.bounds(),
            Rect::new(-5, -5, 10, 10).union(&Rect::new(0, 30, 5, 5))
        );
        tree.remove(&items[0]);
        tree.remove(&items[2]);
        assert_eq!(tree.bounds(), Rect::ZERO);
    }

    #[test]
    fn fifth_insert_splits_the_root() {
        let mut tree = AreaTree::new();
        for (id, x) in [0, 10, 20, 30, 40].into_iter().enumerate() {
            #[expect(clippy::cast_possible_truncation, reason = "tiny test ids")]
            tree.insert(Item::new(id as u32, x, 0, 1, 1));
        }
        match &tree.node(tree.root).bucket {
            Bucket::Internal(kids) => assert_eq!(kids.len(), 2, "root should hold both halves"),
            Bucket::Leaf(_) => panic!("root should be internal after the split"),
        }
        assert_eq!(tree.search(None, false).len(), 5);
        assert_eq!(tree.bounds(), Rect::new(0, 0, 41, 1));
    }

    #[test]
    fn search_matches_brute_force() {
        let mut tree = AreaTree::new();
        let mut items = Vec::new();
        for i in 0..6_i32 {
            for j in 0..6_i32 {
                #[expect(clippy::cast_sign_loss, reason = "loop bounds are non-negative")]
                let item = Item::new((i * 6 + j) as u32, i * 7, j * 5, 6, 4);
                tree.insert(item.clone());
                items.push(item);
            }
        }

        let queries = [
            Rect::new(0, 0, 10, 10),
            Rect::new(14, 10, 6, 4),
            Rect::new(-3, -3, 2, 2),
            Rect::new(3, 3, 30, 1),
        ];
        for q in queries {
            let got = tree.search(Some(q), false);
            let want: Vec<&Item> = items.iter().filter(|i| i.rect.intersects(&q)).collect();
            assert_eq!(got.len(), want.len(), "intersection results for {q:?}");
            assert!(want.iter().all(|w| got.contains(w)));
            assert_eq!(tree.search_count(Some(q), false), want.len());

            let exact = tree.search(Some(q), true);
            let want_exact: Vec<&Item> = items.iter().filter(|i| i.rect == q).collect();
            assert_eq!(exact.len(), want_exact.len(), "exact results for {q:?}");
            assert_eq!(tree.search_count(Some(q), true), want_exact.len());
        }

        // Point queries against the same brute force.
        for (x, y) in [(0, 0), (10, 7), (20, 20), (-1, 0)] {
            let got = tree.search_point(x, y);
            let want = items.iter().filter(|i| i.rect.contains_point(x, y)).count();
            assert_eq!(got.len(), want, "point results at ({x},{y})");
            assert_eq!(tree.search_count_point(x, y), want);
            assert_eq!(tree.search_hit_point(x, y), want > 0);
        }
    }

    #[test]
    fn matcher_filters_results() {
        let mut tree = AreaTree::new();
        for id in 0..10 {
            tree.insert(Item::new(id, id as i32 * 2, 0, 3, 3));
        }
        let even = tree.search_matching(None, |item| item.id % 2 == 0);
        assert_eq!(even.len(), 5);
        let odd_at_point = tree.search_point_matching(4, 1, |item| item.id % 2 == 1);
        assert!(odd_at_point.iter().all(|item| item.id % 2 == 1));
        assert!(tree.search_hit_matching(&Rect::new(0, 0, 100, 3), |item| item.id == 7));
        assert!(!tree.search_hit_matching(&Rect::new(0, 0, 100, 3), |item| item.id == 99));
    }

    #[test]
    fn batch_removal_skips_missing_and_condenses() {
        let mut tree = AreaTree::new();
        let mut items = Vec::new();
        for i in 0..5_i32 {
            for j in 0..4_i32 {
                #[expect(clippy::cast_sign_loss, reason = "loop bounds are non-negative")]
                let item = Item::new((i * 4 + j) as u32, i * 10, j * 10, 8, 8);
                tree.insert(item.clone());
                items.push(item);
            }
        }
        assert_eq!(tree.count(), 20);

        let mut doomed: Vec<Item> = items.iter().filter(|i| i.id % 2 == 0).cloned().collect();
        doomed.push(Item::new(999, 500, 500, 1, 1)); // not in the tree
        let removed = tree.remove_all(doomed.iter());
        assert_eq!(removed.len(), 10);
        assert_eq!(tree.count(), 10);
        for item in &items {
            assert_eq!(tree.contains(item), item.id % 2 == 1);
        }
        // Bounds reflect the survivors exactly.
        let want = items
            .iter()
            .filter(|i| i.id % 2 == 1)
            .map(|i| i.rect)
            .reduce(|acc, r| acc.union(&r))
            .unwrap();
        assert_eq!(tree.bounds(), want);
    }

    #[test]
    fn grow_then_shrink_to_empty() {
        let mut tree = AreaTree::new();
        let items: Vec<Item> = (0..100)
            .map(|id| Item::new(id, (id as i32 % 10) * 12, (id as i32 / 10) * 9, 10, 7))
            .collect();
        tree.extend(items.iter().cloned());
        assert_eq!(tree.count(), 100);

        for item in &items {
            assert!(tree.contains(item));
            assert!(!tree.search_point(item.rect.x, item.rect.y).is_empty());
        }

        for (n, item) in items.iter().enumerate() {
            assert!(tree.remove(item).is_some(), "remove #{n}");
            assert_eq!(tree.count(), 100 - n - 1);
        }
        assert_eq!(tree.bounds(), Rect::ZERO);
        assert!(tree.all().is_empty());
    }

    #[test]
    fn clear_resets_everything() {
        let mut tree = AreaTree::new();
        tree.extend((0..20).map(|id| Item::new(id, id as i32, 0, 2, 2)));
        tree.clear();
        assert_eq!(tree.count(), 0);
        assert_eq!(tree.bounds(), Rect::ZERO);
        tree.insert(Item::new(0, 1, 1, 1, 1));
        assert_eq!(tree.count(), 1);
    }
}
