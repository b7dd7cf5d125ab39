//! Benchmark der Shape-Berechnung: Spline-Interpolation und
//! Bézier-Abtastung im Hot-Path der Drag-Bearbeitung.

use criterion::{criterion_group, criterion_main, Criterion};
use std::hint::black_box;

use glam::DVec2;
use globe_markup_editor::shapes::spline::SplineShape;
use globe_markup_editor::shapes::ShapeComputer;
use globe_markup_editor::shared::spline_geometry::bezier_spline_chain;
use globe_markup_editor::GeoPosition;

fn anchors_2d(n: usize) -> Vec<DVec2> {
    (0..n)
        .map(|i| DVec2::new(i as f64 * 10.0, ((i * 7) % 13) as f64))
        .collect()
}

fn anchors_geo(n: usize) -> Vec<GeoPosition> {
    (0..n)
        .map(|i| GeoPosition::ground(i as f64 * 0.01, ((i * 7) % 13) as f64 * 0.001))
        .collect()
}

fn bench_spline_chain(c: &mut Criterion) {
    let points = anchors_2d(32);
    c.bench_function("bezier_spline_chain_32", |b| {
        b.iter(|| bezier_spline_chain(black_box(&points), 16, 0.85))
    });
}

fn bench_spline_shape(c: &mut Criterion) {
    let shape = SplineShape {
        samples_per_segment: 16,
        sharpness: 0.85,
    };
    let points = anchors_geo(32);
    c.bench_function("spline_shape_compute_32", |b| {
        b.iter(|| shape.compute(black_box(&points)))
    });
}

criterion_group!(benches, bench_spline_chain, bench_spline_shape);
criterion_main!(benches);
