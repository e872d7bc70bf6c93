//! Criterion benchmarks for freqgate-analysis components
//!
//! Run with: cargo bench -p freqgate-analysis
#![allow(missing_docs)]

use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use freqgate_analysis::{BinRange, DetectionMethod, SpectralDetector};
use std::f32::consts::PI;

const SAMPLE_RATE: f32 = 48000.0;
const FFT_SIZES: &[usize] = &[512, 1024, 2048, 4096];

/// Voice-like test frame: fundamental plus a few harmonics
fn generate_frame(size: usize) -> Vec<f32> {
    (0..size)
        .map(|i| {
            let t = i as f32 / SAMPLE_RATE;
            let f1 = (2.0 * PI * 180.0 * t).sin();
            let f2 = 0.5 * (2.0 * PI * 360.0 * t).sin();
            let f3 = 0.25 * (2.0 * PI * 540.0 * t).sin();
            (f1 + f2 + f3) * 0.3
        })
        .collect()
}

fn bench_analyze(c: &mut Criterion) {
    let mut group = c.benchmark_group("SpectralDetector");

    for &size in FFT_SIZES {
        let frame = generate_frame(size);
        for method in [DetectionMethod::Average, DetectionMethod::Median] {
            group.bench_with_input(
                BenchmarkId::new(format!("analyze_{}", method.label()), size),
                &size,
                |b, &size| {
                    let mut detector =
                        SpectralDetector::new(size, SAMPLE_RATE, 80.0, 4000.0).unwrap();
                    b.iter(|| black_box(detector.analyze(black_box(&frame), &frame, method)));
                },
            );
        }
    }

    group.finish();
}

fn bench_band_mapping(c: &mut Criterion) {
    c.bench_function("BinRange::from_band", |b| {
        b.iter(|| {
            black_box(BinRange::from_band(
                black_box(100.0),
                black_box(500.0),
                SAMPLE_RATE,
                2048,
            ))
        })
    });
}

criterion_group!(benches, bench_analyze, bench_band_mapping);
criterion_main!(benches);
