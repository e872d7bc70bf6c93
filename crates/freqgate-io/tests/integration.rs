//! File-level rendering through the frequency gate.

use std::f32::consts::PI;

use freqgate_core::Effect;
use freqgate_effects::{FrequencyGate, GateParam};
use freqgate_io::{RenderOptions, StereoSamples, read_wav_stereo, render, write_wav_stereo};
use tempfile::TempDir;

const SR: u32 = 48000;

fn tone(freq: f32, len: usize) -> StereoSamples {
    let mono: Vec<f32> = (0..len)
        .map(|i| 0.5 * (2.0 * PI * freq * i as f32 / SR as f32).sin())
        .collect();
    StereoSamples::from_mono(mono)
}

#[test]
fn gate_file_roundtrip() {
    let dir = TempDir::new().unwrap();
    let in_path = dir.path().join("in.wav");
    let out_path = dir.path().join("out.wav");

    write_wav_stereo(&in_path, &tone(300.0, 24000), SR, 32).unwrap();
    let (input, info) = read_wav_stereo(&in_path).unwrap();

    let mut gate = FrequencyGate::new(info.sample_rate as f32);
    gate.params().set(GateParam::Threshold, -40.0);
    let output = render(&mut gate, &input, &RenderOptions::default(), |_| {});
    assert_eq!(output.len(), input.len());
    assert!(gate.is_gate_open());

    write_wav_stereo(&out_path, &output, info.sample_rate, 24).unwrap();
    let (reloaded, out_info) = read_wav_stereo(&out_path).unwrap();
    assert_eq!(out_info.bits_per_sample, 24);
    assert_eq!(reloaded.len(), output.len());
}

#[test]
fn compensated_render_lines_up_with_input() {
    let input = tone(300.0, 24000);
    let mut gate = FrequencyGate::new(SR as f32);
    let params = gate.params().clone();
    params.set(GateParam::Range, 0.0);
    params.set(GateParam::PreOpen, 10.0);

    let options = RenderOptions {
        block_size: 256,
        compensate_latency: true,
    };
    let output = render(&mut gate, &input, &options, |_| {});
    let latency = gate.latency_samples();
    assert_eq!(latency, 512 + 480);

    // unity range: only the lookahead delay remains, and it was removed
    // along with the hop latency, shifting the output early by one hop
    let shift = 512;
    for i in 0..input.len() - shift {
        assert_eq!(output.left[i], input.left[i + shift]);
    }
}
