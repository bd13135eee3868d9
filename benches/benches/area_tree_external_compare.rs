// Copyright 2026 the Thicket Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

#![cfg(feature = "compare_rstar")]

use criterion::{BatchSize, Criterion, Throughput, black_box, criterion_group, criterion_main};
use thicket_area_tree::AreaTree;
use thicket_geom::Rect;

use rstar::primitives::Rectangle;
use rstar::{AABB, RTree};

fn gen_grid_rects(n: usize, cell: i32) -> Vec<Rect> {
    let mut out = Vec::with_capacity(n * n);
    for y in 0..n {
        for x in 0..n {
            let x0 = x as i32 * cell;
            let y0 = y as i32 * cell;
            out.push(Rect::new(x0, y0, cell, cell));
        }
    }
    out
}

fn to_rstar_rects(v: &[Rect]) -> Vec<Rectangle<[f64; 2]>> {
    v.iter()
        .map(|r| {
            Rectangle::from_corners(
                [r.x as f64, r.y as f64],
                [r.right() as f64, r.bottom() as f64],
            )
        })
        .collect()
}

fn bench_area_tree_external_compare(c: &mut Criterion) {
    let mut group = c.benchmark_group("area_tree_external_compare");
    for &n in &[64usize, 128] {
        let rects = gen_grid_rects(n, 10);
        let query = Rect::new(100, 100, 400, 400);
        group.throughput(Throughput::Elements((n * n) as u64));

        group.bench_function(format!("thicket_build_query_n{}", n), |b| {
            b.iter_batched(
                AreaTree::<Rect>::new,
                |mut tree| {
                    for r in rects.iter().copied() {
                        tree.insert(r);
                    }
                    let hits = tree.search_count(Some(query), false);
                    black_box(hits);
                },
                BatchSize::SmallInput,
            )
        });

        group.bench_function(format!("rstar_build_query_bulk_n{}", n), |b| {
            b.iter_batched(
                || to_rstar_rects(&rects),
                |rectangles| {
                    let tree = RTree::bulk_load(rectangles);
                    let aabb = AABB::from_corners(
                        [query.x as f64, query.y as f64],
                        [query.right() as f64, query.bottom() as f64],
                    );
                    let hits: usize = tree.locate_in_envelope_intersecting(&aabb).count();
                    black_box(hits);
                },
                BatchSize::SmallInput,
            )
        });
    }
    group.finish();
}

criterion_group!(benches, bench_area_tree_external_compare);
criterion_main!(benches);
