// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use criterion::{BatchSize, Criterion, Throughput, black_box, criterion_group, criterion_main};
use kurbo::{Point, Rect, Vec2};
use understory_hbv::{BuildOptions, Hbv};

fn gen_grid_rects(n: usize, cell: f64) -> Vec<Rect> {
    let mut out = Vec::with_capacity(n * n);
    for y in 0..n {
        for x in 0..n {
            let x0 = x as f64 * cell;
            let y0 = y as f64 * cell;
            out.push(Rect::new(x0, y0, x0 + cell, y0 + cell));
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
    fn next_f64(&mut self) -> f64 {
        let v = self.next_u64() >> 11;
        (v as f64) / ((1u64 << 53) as f64)
    }
}

fn gen_random_rects(count: usize, max_w: f64, max_h: f64, rect_w: f64, rect_h: f64) -> Vec<Rect> {
    let mut out = Vec::with_capacity(count);
    let mut rng = Rng::new(0xCAFE_F00D_DEAD_BEEF);
    for _ in 0..count {
        let x0 = rng.next_f64() * (max_w - rect_w).max(1.0);
        let y0 = rng.next_f64() * (max_h - rect_h).max(1.0);
        out.push(Rect::new(x0, y0, x0 + rect_w, y0 + rect_h));
    }
    out
}

fn gen_clustered_rects(n_clusters: usize, per_cluster: usize, spread: f64) -> Vec<Rect> {
    let mut out = Vec::with_capacity(n_clusters * per_cluster);
    let mut rng = Rng::new(0xC1A5_7E55_9999_ABCD);
    let mut centers = Vec::with_capacity(n_clusters);
    for _ in 0..n_clusters {
        centers.push((rng.next_f64() * 2000.0, rng.next_f64() * 2000.0));
    }
    for (cx, cy) in centers {
        for _ in 0..per_cluster {
            let dx = (rng.next_f64() - 0.5) * spread;
            let dy = (rng.next_f64() - 0.5) * spread;
            out.push(Rect::new(cx + dx, cy + dy, cx + dx + 12.0, cy + dy + 12.0));
        }
    }
    out
}

fn bench_build(c: &mut Criterion) {
    let mut group = c.benchmark_group("hbv_build");
    for &n in &[32usize, 64, 128] {
        let rects = gen_grid_rects(n, 10.0);
        group.throughput(Throughput::Elements((n * n) as u64));
        group.bench_function(format!("grid_n{}", n), |b| {
            b.iter_batched(
                || rects.clone(),
                |rects| black_box(Hbv::<()>::from_rects(rects)),
                BatchSize::SmallInput,
            )
        });
    }
    let rects = gen_random_rects(4096, 2000.0, 2000.0, 12.0, 12.0);
    group.bench_function("random_4096", |b| {
        b.iter_batched(
            || rects.clone(),
            |rects| black_box(Hbv::<()>::from_rects(rects)),
            BatchSize::SmallInput,
        )
    });
    let rects = gen_clustered_rects(16, 256, 128.0);
    group.bench_function("clustered_4096", |b| {
        b.iter_batched(
            || rects.clone(),
            |rects| black_box(Hbv::<()>::from_rects(rects)),
            BatchSize::SmallInput,
        )
    });
    for min_group in [2usize, 4, 8] {
        let rects = gen_random_rects(4096, 2000.0, 2000.0, 12.0, 12.0);
        group.bench_function(format!("random_4096_min_group{}", min_group), |b| {
            b.iter_batched(
                || rects.clone(),
                |rects| {
                    let mut hbv = Hbv::<()>::with_options(BuildOptions { min_group });
                    hbv.update(rects);
                    black_box(hbv)
                },
                BatchSize::SmallInput,
            )
        });
    }
    group.finish();
}

fn bench_refresh(c: &mut Criterion) {
    let mut group = c.benchmark_group("hbv_refresh");
    let rects = gen_grid_rects(64, 10.0);
    let moved: Vec<Rect> = rects
        .iter()
        .enumerate()
        .map(|(j, r)| {
            let dx = (j % 5) as f64 - 2.0;
            let dy = ((j * 7) % 5) as f64 - 2.0;
            *r + Vec2::new(dx, dy)
        })
        .collect();
    group.throughput(Throughput::Elements(rects.len() as u64));
    group.bench_function("move_all_same_count", |b| {
        b.iter_batched(
            || (Hbv::<()>::from_rects(rects.clone()), moved.clone()),
            |(mut hbv, moved)| {
                hbv.update(moved);
                black_box(hbv)
            },
            BatchSize::SmallInput,
        )
    });
    group.finish();
}

fn bench_query(c: &mut Criterion) {
    let mut group = c.benchmark_group("hbv_query");
    let hbv = Hbv::<()>::from_rects(gen_grid_rects(128, 8.0));
    group.bench_function("many_rect_queries", |b| {
        b.iter(|| {
            let mut total = 0usize;
            for q in 0..256 {
                let x = (q % 64) as f64 * 8.0;
                let y = (q / 64) as f64 * 8.0;
                hbv.find_leaf_intersections(Rect::new(x, y, x + 64.0, y + 64.0), |_| total += 1);
            }
            black_box(total)
        })
    });
    group.bench_function("many_point_queries", |b| {
        b.iter(|| {
            let mut total = 0usize;
            for q in 0..1024 {
                let p = Point::new((q % 128) as f64 * 8.0 + 3.0, (q / 8) as f64 * 8.0 + 3.0);
                hbv.find_indices_containing(p, |_| total += 1);
            }
            black_box(total)
        })
    });
    let clustered = Hbv::<()>::from_rects(gen_clustered_rects(16, 256, 128.0));
    group.bench_function("clustered_viewport", |b| {
        b.iter(|| {
            let mut total = 0usize;
            clustered.find_leaf_intersections(Rect::new(800.0, 800.0, 1200.0, 1200.0), |_| {
                total += 1;
            });
            black_box(total)
        })
    });
    group.finish();
}

criterion_group!(benches, bench_build, bench_refresh, bench_query);
criterion_main!(benches);
