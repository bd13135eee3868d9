// Copyright 2026 the Thicket Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Thicket Area Tree: a dynamic rectangle tree for 2D spatial lookup.
//!
//! [`AreaTree`] stores bounded objects in a tree of nested minimum bounding
//! rectangles. Queries descend only into subtrees whose cached bounds can
//! match, which is what makes point, rectangle, and existence lookups cheap
//! on large collections.
//!
//! Nodes hold up to four entries. An overflowing node is split with a
//! quadratic seed heuristic: the pair of entries that would waste the most
//! area together seeds the two halves, and the rest are dealt out to
//! whichever half they extend the least. Removal condenses under-full nodes
//! and reinserts their contents, so the tree stays packed as it shrinks.
//!
//! Once an object has been inserted, its bounds must not change. To move an
//! object, remove it, change its bounds, then insert it again.
//!
//! This structure must be synchronized externally if multiple threads
//! access it at the same time.
//!
//! # Example
//!
//! ```rust
//! use thicket_area_tree::AreaTree;
//! use thicket_geom::Rect;
//!
//! let mut tree: AreaTree<Rect> = AreaTree::new();
//! tree.insert(Rect::new(0, 0, 10, 10));
//! tree.insert(Rect::new(20, 0, 10, 10));
//! assert_eq!(tree.count(), 2);
//! assert!(tree.search_hit_point(5, 5));
//!
//! let hits = tree.search(Some(Rect::new(5, 5, 30, 5)), false);
//! assert_eq!(hits.len(), 2);
//!
//! tree.remove(&Rect::new(0, 0, 10, 10));
//! assert_eq!(tree.count(), 1);
//! assert_eq!(tree.bounds(), Rect::new(20, 0, 10, 10));
//! ```

#![no_std]

extern crate alloc;

mod node;
mod tree;

pub use tree::AreaTree;
