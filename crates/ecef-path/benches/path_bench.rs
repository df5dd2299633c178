//! Criterion microbenches for path derivation and projection queries.
//!
//! - derive: noisy zig-zag routes at 1 NM spacing (3, 6 and 12 legs).
//! - queries: path distance and index/ratio of every raw point.
//!
//! Results live under `target/criterion`.

use criterion::{criterion_group, criterion_main, BatchSize, BenchmarkId, Criterion};
use ecef_path::prelude::*;

fn zig_zag(legs: usize) -> Vec<Point> {
    (0..=legs)
        .map(|i| {
            let lon = if (i / 2) % 2 == 0 { -1.0 } else { 1.0 };
            Point::from_lat_long(45.0 + i as f64, lon)
        })
        .collect()
}

fn bench_derive(c: &mut Criterion) {
    let mut group = c.benchmark_group("derive");
    let cfg = SampleCfg::default();
    let threshold = nm2rad(0.25);
    for legs in [3usize, 6, 12] {
        let waypoints = zig_zag(legs);
        group.bench_function(BenchmarkId::new("derive_horizontal_path", legs), |b| {
            b.iter_batched(
                || sample_route(&waypoints, cfg, ReplayToken { seed: 42, index: legs as u64 }),
                |points| {
                    let _ = derive_horizontal_path(&points, threshold);
                },
                BatchSize::SmallInput,
            )
        });
    }
    group.finish();
}

fn bench_queries(c: &mut Criterion) {
    let mut group = c.benchmark_group("queries");
    let threshold = nm2rad(0.25);
    let points = sample_route(&zig_zag(12), SampleCfg::default(), ReplayToken { seed: 7, index: 0 });
    let Ok(path) = derive_horizontal_path(&points, threshold) else {
        return;
    };
    group.bench_function(BenchmarkId::new("calculate_path_distances", points.len()), |b| {
        b.iter(|| path.calculate_path_distances(&points, threshold, 0))
    });
    group.bench_function(BenchmarkId::new("find_index_and_ratio", points.len()), |b| {
        b.iter(|| {
            points
                .iter()
                .map(|p| path.find_index_and_ratio(p))
                .collect::<Vec<_>>()
        })
    });
    let distances = path.calculate_path_distances(&points, threshold, 0);
    group.bench_function(BenchmarkId::new("calculate_positions", distances.len()), |b| {
        b.iter(|| path.calculate_positions(&distances))
    });
    group.finish();
}

criterion_group!(benches, bench_derive, bench_queries);
criterion_main!(benches);
