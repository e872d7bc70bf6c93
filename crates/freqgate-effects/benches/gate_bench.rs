//! Criterion benchmarks for the frequency gate
//!
//! Run with: cargo bench -p freqgate-effects
#![allow(missing_docs)]

use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use freqgate_core::Effect;
use freqgate_effects::{FftSize, FrequencyGate, GateParam, GateSettings, GateStateMachine};

const SAMPLE_RATE: f32 = 48000.0;
const BLOCK_SIZES: &[usize] = &[64, 128, 256, 512, 1024];

fn generate_test_signal(size: usize) -> Vec<f32> {
    (0..size)
        .map(|i| {
            let t = i as f32 / SAMPLE_RATE;
            (2.0 * std::f32::consts::PI * 300.0 * t).sin() * 0.5
        })
        .collect()
}

fn bench_block_sizes(c: &mut Criterion) {
    let mut group = c.benchmark_group("FrequencyGate");

    for &block_size in BLOCK_SIZES {
        let input = generate_test_signal(block_size);
        let mut gate = FrequencyGate::new(SAMPLE_RATE);
        gate.params().set(GateParam::PreOpen, 5.0);

        group.bench_with_input(
            BenchmarkId::from_parameter(block_size),
            &block_size,
            |b, _| {
                let mut out_l = vec![0.0; block_size];
                let mut out_r = vec![0.0; block_size];
                b.iter(|| {
                    gate.process_block_stereo(
                        black_box(&input),
                        black_box(&input),
                        &mut out_l,
                        &mut out_r,
                    );
                    black_box(out_l[0])
                })
            },
        );
    }

    group.finish();
}

fn bench_fft_sizes(c: &mut Criterion) {
    let mut group = c.benchmark_group("FrequencyGate/fft_size");
    let input = generate_test_signal(512);

    for size in FftSize::ALL {
        let mut gate = FrequencyGate::new(SAMPLE_RATE);
        gate.params().set(GateParam::FftSize, size.index() as f32);

        group.bench_with_input(
            BenchmarkId::from_parameter(size.samples()),
            &size,
            |b, _| {
                let mut l = input.clone();
                let mut r = input.clone();
                b.iter(|| {
                    l.copy_from_slice(&input);
                    r.copy_from_slice(&input);
                    gate.process_block_stereo_inplace(black_box(&mut l), black_box(&mut r));
                    black_box(l[0])
                })
            },
        );
    }

    group.finish();
}

fn bench_state_machine(c: &mut Criterion) {
    let mut gate = GateStateMachine::new(&GateSettings::default(), SAMPLE_RATE);
    let mut level = -60.0_f32;

    c.bench_function("GateStateMachine/hop+512 samples", |b| {
        b.iter(|| {
            level = if level > -20.0 { -60.0 } else { level + 7.0 };
            gate.update(black_box(level), 512);
            let mut acc = 0.0;
            for _ in 0..512 {
                acc += gate.next_gain();
            }
            black_box(acc)
        })
    });
}

criterion_group!(benches, bench_block_sizes, bench_fft_sizes, bench_state_machine);
criterion_main!(benches);
