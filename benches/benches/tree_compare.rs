// Copyright 2026 the Thicket Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use criterion::{BatchSize, Criterion, Throughput, black_box, criterion_group, criterion_main};
use thicket_area_tree::AreaTree;
use thicket_geom::Rect;
use thicket_quad_tree::QuadTree;

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

fn gen_overlap_grid_rects(n: usize, cell: i32, scale: i32) -> Vec<Rect> {
    let mut out = Vec::with_capacity(n * n);
    for y in 0..n {
        for x in 0..n {
            let x0 = x as i32 * cell;
            let y0 = y as i32 * cell;
            out.push(Rect::new(x0, y0, cell * scale, cell * scale));
        }
    }
    out
}

#[derive(Clone)]
struct Rng(u64);

impl Rng {
    fn new(seed: u64) -> Self {
        Self(seed)
    }
    fn next_u64(&mut self) -> u64 {
        let mut x = self.0;
        x ^= x << 13;
        x ^= x >> 7;
        x ^= x << 17;
        self.0 = x;
        x
    }
    fn next_i32(&mut self, bound: i32) -> i32 {
        (self.next_u64() % bound as u64) as i32
    }
}

fn gen_random_rects(count: usize, max_w: i32, max_h: i32, rect_w: i32, rect_h: i32) -> Vec<Rect> {
    let mut out = Vec::with_capacity(count);
    let mut rng = Rng::new(0xCAFE_F00D_DEAD_BEEF);
    for _ in 0..count {
        let x0 = rng.next_i32((max_w - rect_w).max(1));
        let y0 = rng.next_i32((max_h - rect_h).max(1));
        out.push(Rect::new(x0, y0, rect_w, rect_h));
    }
    out
}

fn bench_area_tree(c: &mut Criterion) {
    let mut group = c.benchmark_group("area_tree");
    let query = Rect::new(100, 100, 400, 400);
    for &n in &[32usize, 64, 128] {
        let rects = gen_grid_rects(n, 10);
        group.throughput(Throughput::Elements((n * n) as u64));
        group.bench_function(format!("insert_query_n{}", n), |b| {
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
    }

    let rects = gen_overlap_grid_rects(64, 10, 3);
    group.bench_function("insert_query_overlap", |b| {
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

    let rects = gen_random_rects(4096, 2000, 2000, 12, 12);
    group.bench_function("remove_half_random", |b| {
        b.iter_batched(
            || {
                let mut tree = AreaTree::<Rect>::new();
                tree.extend(rects.iter().copied());
                tree
            },
            |mut tree| {
                let removed = tree.remove_all(rects.iter().step_by(2));
                black_box(removed.len());
            },
            BatchSize::SmallInput,
        )
    });
    group.finish();
}

fn bench_quad_tree(c: &mut Criterion) {
    let mut group = c.benchmark_group("quad_tree");
    let query = Rect::new(100, 100, 400, 400);
    for &n in &[32usize, 64, 128] {
        let rects = gen_grid_rects(n, 10);
        group.throughput(Throughput::Elements((n * n) as u64));
        group.bench_function(format!("add_query_n{}", n), |b| {
            b.iter_batched(
                QuadTree::<Rect>::new,
                |mut tree| {
                    for r in rects.iter().copied() {
                        let _ = tree.add(r);
                    }
                    let hits = tree.find_intersects(&query).len();
                    black_box(hits);
                },
                BatchSize::SmallInput,
            )
        });
    }

    let rects = gen_random_rects(4096, 2000, 2000, 12, 12);
    group.bench_function("add_reorganize_query_random", |b| {
        b.iter_batched(
            QuadTree::<Rect>::new,
            |mut tree| {
                for r in rects.iter().copied() {
                    let _ = tree.add(r);
                }
                tree.reorganize();
                let hits = tree.find_intersects(&Rect::new(800, 800, 400, 400)).len();
                black_box(hits);
            },
            BatchSize::SmallInput,
        )
    });
    group.finish();
}

fn bench_point_probes(c: &mut Criterion) {
    let mut group = c.benchmark_group("point_probes");
    let rects = gen_grid_rects(64, 10);
    let mut area = AreaTree::<Rect>::new();
    area.extend(rects.iter().copied());
    let mut quad = QuadTree::<Rect>::new();
    for r in rects.iter().copied() {
        let _ = quad.add(r);
    }
    quad.reorganize();

    group.throughput(Throughput::Elements(1024));
    group.bench_function("area_tree_hit_point", |b| {
        b.iter(|| {
            let mut rng = Rng::new(0xBADC_F00D_1234_5678);
            let mut hits = 0usize;
            for _ in 0..1024 {
                if area.search_hit_point(rng.next_i32(700), rng.next_i32(700)) {
                    hits += 1;
                }
            }
            black_box(hits);
        })
    });
    group.bench_function("quad_tree_contains", |b| {
        b.iter(|| {
            let mut rng = Rng::new(0xBADC_F00D_1234_5678);
            let mut hits = 0usize;
            for _ in 0..1024 {
                if quad.contains(rng.next_i32(700), rng.next_i32(700)) {
                    hits += 1;
                }
            }
            black_box(hits);
        })
    });
    group.finish();
}

criterion_group!(
    benches,
    bench_area_tree,
    bench_quad_tree,
    bench_point_probes
);
criterion_main!(benches);
