//! Criterion microbenches for the k-DOP pipeline.
//!
//! - extents: one projection pass over 10k points, per k.
//! - build: half-space intersection from precomputed extents, per k.
//! - dop: full `set_from_object` and a `change_k` round trip.
//!
//! Results live under `target/criterion`.

use criterion::{criterion_group, criterion_main, BatchSize, BenchmarkId, Criterion};
use kdop::api::{
    build, compute_extents, directions_for, sample_cloud, CloudParams, Dop, SUPPORTED_K,
};
use nalgebra::{Rotation3, Vector3};

fn cloud(count: usize) -> Vec<Vector3<f64>> {
    let mut params = CloudParams::ellipsoid(Vector3::new(3.0, 1.5, 0.75), count);
    params.rotation = Some(Rotation3::from_euler_angles(0.4, -0.3, 1.2));
    sample_cloud(&params, 42).unwrap()
}

fn bench_extents(c: &mut Criterion) {
    let mut group = c.benchmark_group("extents");
    let pts = cloud(10_000);
    for k in SUPPORTED_K {
        let dirs = directions_for(k).unwrap();
        group.bench_function(BenchmarkId::new("compute_extents_10k", k), |b| {
            b.iter(|| compute_extents(pts.as_slice(), &dirs).unwrap())
        });
    }
    group.finish();
}

fn bench_build(c: &mut Criterion) {
    let mut group = c.benchmark_group("build");
    let pts = cloud(2_000);
    for k in SUPPORTED_K {
        let cs = compute_extents(pts.as_slice(), &directions_for(k).unwrap()).unwrap();
        group.bench_function(BenchmarkId::new("build", k), |b| {
            b.iter(|| build(&cs).unwrap())
        });
    }
    group.finish();
}

fn bench_dop(c: &mut Criterion) {
    let mut group = c.benchmark_group("dop");
    let pts = cloud(5_000);
    group.bench_function(BenchmarkId::new("set_from_object", "k26_5k"), |b| {
        b.iter_batched(
            || Dop::new(26).unwrap(),
            |mut dop| {
                dop.set_from_object(pts.as_slice()).unwrap();
            },
            BatchSize::SmallInput,
        )
    });
    group.bench_function(BenchmarkId::new("change_k_round_trip", "6_26_6"), |b| {
        b.iter_batched(
            || {
                let mut dop = Dop::new(6).unwrap();
                dop.set_from_object(pts.as_slice()).unwrap();
                dop
            },
            |mut dop| {
                dop.change_k(26).unwrap();
                dop.change_k(6).unwrap();
            },
            BatchSize::SmallInput,
        )
    });
    group.finish();
}

criterion_group!(benches, bench_extents, bench_build, bench_dop);
criterion_main!(benches);
