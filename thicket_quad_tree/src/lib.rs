// Copyright 2026 the Thicket Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Thicket Quad Tree: a region quadtree for 2D spatial lookup.
//!
//! [`QuadTree`] partitions a fixed region into four quadrants, recursively,
//! and files objects into every quadrant they touch. Queries prune whole
//! quadrants whose region cannot match, which keeps point, intersection,
//! and containment lookups cheap on large collections.
//!
//! Unlike a dynamic bounding-box tree, the partition never adapts to its
//! contents. Objects that fall outside the root region collect in an
//! overflow set until it grows past the tree's threshold, at which point
//! the tree reorganizes itself around the union of everything it holds.
//! Call [`QuadTree::reorganize`] to force that refit at a convenient time.
//!
//! Once an object has been added, its bounds must not change. To move an
//! object, remove it, change its bounds, then add it again.
//!
//! This structure must be synchronized externally if multiple threads
//! access it at the same time.
//!
//! # Example
//!
//! ```rust
//! use thicket_geom::Rect;
//! use thicket_quad_tree::QuadTree;
//!
//! let mut tree: QuadTree<Rect> = QuadTree::new();
//! tree.add(Rect::new(0, 0, 10, 10))?;
//! tree.add(Rect::new(30, 30, 10, 10))?;
//! assert!(tree.contains(5, 5));
//! assert_eq!(tree.find_intersects(&Rect::new(0, 0, 50, 50)).len(), 2);
//!
//! assert!(tree.remove(&Rect::new(0, 0, 10, 10)));
//! assert!(!tree.contains(5, 5));
//! # Ok::<(), thicket_quad_tree::AddError>(())
//! ```

#![no_std]

extern crate alloc;

mod node;
mod tree;

pub use tree::{AddError, QuadTree};
