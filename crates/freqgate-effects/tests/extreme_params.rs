//! Extreme parameter tests for the frequency gate.
//!
//! Verifies finite output with every parameter at its minimum or maximum,
//! at extreme sample rates (8 kHz and 192 kHz), and with out-of-range or
//! non-finite values pushed through the parameter surface.

use freqgate_core::{Effect, ParameterInfo};
use freqgate_effects::FrequencyGate;

const DEFAULT_SAMPLE_RATE: f32 = 48000.0;
const LOW_SAMPLE_RATE: f32 = 8000.0;
const HIGH_SAMPLE_RATE: f32 = 192000.0;
const NUM_SAMPLES: usize = 10_000;
const BLOCK: usize = 128;

/// Process `NUM_SAMPLES` through the gate and assert all outputs are finite.
fn assert_finite_output(gate: &mut FrequencyGate, label: &str) {
    let mut left = vec![0.0; BLOCK];
    let mut right = vec![0.0; BLOCK];
    for block in 0..NUM_SAMPLES / BLOCK {
        for (i, (l, r)) in left.iter_mut().zip(right.iter_mut()).enumerate() {
            let n = block * BLOCK + i;
            *l = match n % 3 {
                0 => 0.5,
                1 => -0.5,
                _ => 0.0,
            };
            *r = (n as f32 * 0.01).sin();
        }
        gate.process_block_stereo_inplace(&mut left, &mut right);
        for (i, (l, r)) in left.iter().zip(right.iter()).enumerate() {
            assert!(
                l.is_finite() && r.is_finite(),
                "{}: non-finite output at sample {}: ({}, {})",
                label,
                block * BLOCK + i,
                l,
                r
            );
        }
        let gain = gate.current_gain();
        assert!((0.0..=1.0).contains(&gain), "{label}: gain {gain}");
    }
}

fn set_all(gate: &mut FrequencyGate, pick: impl Fn(f32, f32) -> f32) {
    for i in 0..gate.param_count() {
        if let Some(desc) = gate.param_info(i) {
            gate.set_param(i, pick(desc.min, desc.max));
        }
    }
}

#[test]
fn all_params_min() {
    let mut gate = FrequencyGate::new(DEFAULT_SAMPLE_RATE);
    set_all(&mut gate, |min, _| min);
    assert_finite_output(&mut gate, "all min");
}

#[test]
fn all_params_max() {
    let mut gate = FrequencyGate::new(DEFAULT_SAMPLE_RATE);
    set_all(&mut gate, |_, max| max);
    assert_finite_output(&mut gate, "all max");
}

#[test]
fn extreme_sample_rates() {
    for sr in [LOW_SAMPLE_RATE, HIGH_SAMPLE_RATE] {
        let mut gate = FrequencyGate::new(sr);
        set_all(&mut gate, |_, max| max);
        assert_finite_output(&mut gate, &format!("{sr} Hz, all max"));

        let mut gate = FrequencyGate::new(sr);
        set_all(&mut gate, |min, _| min);
        assert_finite_output(&mut gate, &format!("{sr} Hz, all min"));
    }
}

#[test]
fn sample_rate_change_between_blocks() {
    let mut gate = FrequencyGate::new(DEFAULT_SAMPLE_RATE);
    gate.set_param(4, 20.0);
    assert_finite_output(&mut gate, "48 kHz");
    gate.set_sample_rate(HIGH_SAMPLE_RATE);
    assert_finite_output(&mut gate, "192 kHz");
    assert_eq!(gate.lookahead_samples(), 3840);
    gate.set_sample_rate(LOW_SAMPLE_RATE);
    assert_finite_output(&mut gate, "8 kHz");
    assert_eq!(gate.lookahead_samples(), 160);
}

#[test]
fn out_of_range_values_are_clamped() {
    let mut gate = FrequencyGate::new(DEFAULT_SAMPLE_RATE);
    for i in 0..gate.param_count() {
        let desc = gate.param_info(i).unwrap();
        gate.set_param(i, desc.max + 1.0e6);
        assert_eq!(gate.get_param(i), desc.max, "{} above max", desc.name);
        gate.set_param(i, desc.min - 1.0e6);
        assert_eq!(gate.get_param(i), desc.min, "{} below min", desc.name);
        gate.set_param(i, f32::NAN);
        assert!(desc.contains(gate.get_param(i)), "{} NaN", desc.name);
        gate.set_param(i, f32::INFINITY);
        assert_eq!(gate.get_param(i), desc.max, "{} +inf", desc.name);
    }
    assert_finite_output(&mut gate, "after abuse");
}

#[test]
fn inverted_band_is_healed() {
    let mut gate = FrequencyGate::new(DEFAULT_SAMPLE_RATE);
    gate.set_param(0, 20000.0);
    gate.set_param(1, 20.0);
    assert_finite_output(&mut gate, "inverted band");
    let bins = gate.bins().unwrap();
    assert!(bins.start >= 1 && bins.start < bins.end && bins.end <= 1024);
}
