// Copyright 2026 the Thicket Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Basic usage of the area tree: insert, query, and remove.

use thicket_area_tree::AreaTree;
use thicket_geom::Rect;

fn main() {
    let mut tree: AreaTree<Rect> = AreaTree::new();
    tree.insert(Rect::new(0, 0, 10, 10));
    tree.insert(Rect::new(5, 5, 15, 15));
    tree.insert(Rect::new(40, 40, 10, 10));
    println!("holding {} rects within {:?}", tree.count(), tree.bounds());

    // Query a point
    let hits = tree.search_point(6, 6);
    println!("hits at (6,6): {hits:?}");

    // Query a window
    let hits = tree.search(Some(Rect::new(0, 0, 20, 20)), false);
    println!("hits in the 20x20 window: {hits:?}");

    // Move a rect: remove, then insert at the new position
    if let Some(moved) = tree.remove(&Rect::new(0, 0, 10, 10)) {
        tree.insert(Rect::new(moved.x + 100, moved.y, moved.width, moved.height));
    }
    println!("after the move: {:?}", tree.bounds());
}
