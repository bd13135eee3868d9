// Copyright 2026 the Thicket Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Basic usage of the quad tree: add, reorganize, and query.

use thicket_geom::Rect;
use thicket_quad_tree::QuadTree;

fn main() -> Result<(), thicket_quad_tree::AddError> {
    let mut tree: QuadTree<Rect> = QuadTree::with_threshold(8);
    for i in 0..12 {
        tree.add(Rect::new(i * 10, (i % 3) * 10, 12, 12))?;
    }

    // Adding past the threshold reorganized the partition already; force a
    // refit anyway to show the call.
    tree.reorganize();

    println!("hit at (15, 5): {}", tree.contains(15, 5));
    let hits = tree.find_intersects(&Rect::new(0, 0, 30, 30));
    println!("hits in the 30x30 window: {hits:?}");
    let inside = tree.find_contained_by(&Rect::new(-1, -1, 60, 60));
    println!("fully inside the 60x60 window: {}", inside.len());

    tree.remove(&Rect::new(0, 0, 12, 12));
    println!("{} rects remain", tree.all().len());
    Ok(())
}
