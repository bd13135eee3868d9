// Copyright 2026 the Thicket Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Thicket Geom: integer rectangle primitives for 2D spatial indexing.
//!
//! This crate holds the pieces shared by the thicket spatial indexes:
//!
//! - [`Rect`], an axis-aligned rectangle with integer origin and size and
//!   half-open containment/intersection predicates.
//! - [`Bounded`], the contract an object must satisfy to be indexed: it
//!   reports a rectangle that stays stable while the object is a member of
//!   an index.
//! - [`wasted_area`], the pairing cost heuristic used by node splitting.
//!
//! It does not depend on any geometry crate; higher layers compute whatever
//! world-space bounds they need and feed plain rectangles here.
//!
//! Empty rectangles (non-positive width or height) are inert: they contain
//! no point, contain and intersect no rectangle, and are not contained by
//! anything, themselves included.
//!
//! # Example
//!
//! ```rust
//! use thicket_geom::Rect;
//!
//! let a = Rect::new(0, 0, 10, 10);
//! let b = Rect::new(5, 5, 10, 10);
//! assert!(a.intersects(&b));
//! assert!(a.contains_point(9, 9));
//! assert!(!a.contains_point(10, 10)); // half-open
//! assert_eq!(a.union(&b), Rect::new(0, 0, 15, 15));
//! ```

#![no_std]

extern crate alloc;

pub mod bounded;
pub mod rect;

pub use bounded::Bounded;
pub use rect::{Rect, wasted_area};
