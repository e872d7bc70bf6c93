//! Hop-by-hop detection summary for a WAV file.

use std::path::PathBuf;

use anyhow::Context;
use clap::Args;
use freqgate_core::{Effect, samples_to_ms};
use freqgate_effects::{DetectorStatus, FrequencyGate, GateParams};
use freqgate_io::read_wav_stereo;
use serde::Serialize;

use super::common::{GateOptions, latency_summary};

#[derive(Args)]
pub struct AnalyzeArgs {
    /// Input WAV file
    input: PathBuf,

    #[command(flatten)]
    gate: GateOptions,

    /// Print every open/close transition with its time
    #[arg(short, long)]
    transitions: bool,

    /// Print the report as JSON
    #[arg(long)]
    json: bool,
}

/// Gate transition at a hop boundary.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct Transition {
    /// Time in seconds from the start of the file.
    pub time_secs: f64,
    /// `true` when the gate opened.
    pub open: bool,
    /// Band level that caused the transition.
    pub level_db: f32,
}

/// Detection statistics collected over a file.
#[derive(Debug, Clone, Serialize)]
pub struct AnalysisReport {
    pub sample_rate: u32,
    pub fft_size: usize,
    pub hop_size: usize,
    pub start_bin: Option<usize>,
    pub end_bin: Option<usize>,
    pub latency_samples: usize,
    pub latency_ms: f32,
    pub hops: usize,
    pub level_min_db: f32,
    pub level_max_db: f32,
    pub level_mean_db: f32,
    pub open_ratio: f32,
    pub open_count: usize,
    pub close_count: usize,
    pub fft_failures: u64,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub transitions: Vec<Transition>,
}

/// Runs `gate` over both channels one hop at a time and collects the
/// detector's output after each hop.
pub fn analyze(
    gate: &mut FrequencyGate,
    left: &[f32],
    right: &[f32],
    sample_rate: u32,
    keep_transitions: bool,
) -> AnalysisReport {
    let hop = gate.hop_size();
    let mut l = vec![0.0_f32; hop];
    let mut r = vec![0.0_f32; hop];

    let mut hops = 0usize;
    let mut open_hops = 0usize;
    let mut level_min = f32::INFINITY;
    let mut level_max = f32::NEG_INFINITY;
    let mut level_sum = 0.0_f64;
    let mut open_count = 0;
    let mut close_count = 0;
    let mut transitions = Vec::new();
    let mut was_open = gate.is_gate_open();

    // only whole hops produce a fresh detection
    for (cl, cr) in left.chunks_exact(hop).zip(right.chunks_exact(hop)) {
        l.copy_from_slice(cl);
        r.copy_from_slice(cr);
        gate.process_block_stereo_inplace(&mut l, &mut r);

        let level = gate.detected_level_db();
        let open = gate.is_gate_open();
        hops += 1;
        level_min = level_min.min(level);
        level_max = level_max.max(level);
        level_sum += f64::from(level);
        if open {
            open_hops += 1;
        }
        if open != was_open {
            if open {
                open_count += 1;
            } else {
                close_count += 1;
            }
            if keep_transitions {
                transitions.push(Transition {
                    time_secs: (hops * hop) as f64 / f64::from(sample_rate),
                    open,
                    level_db: level,
                });
            }
            was_open = open;
        }
    }

    let bins = gate.bins();
    let (level_min_db, level_max_db, level_mean_db, open_ratio) = if hops == 0 {
        (0.0, 0.0, 0.0, 0.0)
    } else {
        (
            level_min,
            level_max,
            (level_sum / hops as f64) as f32,
            open_hops as f32 / hops as f32,
        )
    };

    AnalysisReport {
        sample_rate,
        fft_size: gate.fft_size().samples(),
        hop_size: hop,
        start_bin: bins.map(|b| b.start),
        end_bin: bins.map(|b| b.end),
        latency_samples: gate.latency_samples(),
        latency_ms: samples_to_ms(gate.latency_samples() as f32, gate.sample_rate()),
        hops,
        level_min_db,
        level_max_db,
        level_mean_db,
        open_ratio,
        open_count,
        close_count,
        fft_failures: gate.fft_failures(),
        transitions,
    }
}

pub fn run(args: AnalyzeArgs) -> anyhow::Result<()> {
    let settings = args.gate.settings()?;
    let (input, info) = read_wav_stereo(&args.input)
        .with_context(|| format!("reading {}", args.input.display()))?;

    let mut gate =
        FrequencyGate::with_params(GateParams::from_settings(&settings), info.sample_rate as f32);
    if gate.detector_status() == DetectorStatus::Unavailable {
        anyhow::bail!("spectral detector could not be initialized");
    }

    let report = analyze(
        &mut gate,
        &input.left,
        &input.right,
        info.sample_rate,
        args.transitions,
    );

    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    println!("File: {}", args.input.display());
    println!(
        "  {} Hz, {} channel(s), {:.2}s",
        info.sample_rate,
        info.channels,
        info.duration_secs()
    );
    println!(
        "Band: {:.0}-{:.0} Hz (bins {}-{}), {} detection",
        settings.freq_low_hz,
        settings.freq_high_hz,
        report.start_bin.unwrap_or(0),
        report.end_bin.unwrap_or(0),
        settings.detection.label()
    );
    println!(
        "FFT: {} points, hop {}, latency {}",
        report.fft_size,
        report.hop_size,
        latency_summary(report.latency_samples, gate.sample_rate())
    );
    println!();
    println!("Hops analyzed: {}", report.hops);
    println!(
        "Level:         min {:.1} dB, max {:.1} dB, mean {:.1} dB",
        report.level_min_db, report.level_max_db, report.level_mean_db
    );
    println!("Threshold:     {:.1} dB", settings.threshold_db);
    println!("Open ratio:    {:.1}%", report.open_ratio * 100.0);
    println!(
        "Transitions:   {} open, {} close",
        report.open_count, report.close_count
    );
    if report.fft_failures > 0 {
        println!("FFT failures:  {}", report.fft_failures);
    }

    if !report.transitions.is_empty() {
        println!();
        for t in &report.transitions {
            println!(
                "  {:>9.3}s  {:<5}  {:.1} dB",
                t.time_secs,
                if t.open { "open" } else { "close" },
                t.level_db
            );
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use freqgate_effects::GateSettings;
    use std::f32::consts::PI;

    const SR: u32 = 48000;

    fn burst(len: usize, on: std::ops::Range<usize>) -> Vec<f32> {
        (0..len)
            .map(|i| {
                if on.contains(&i) {
                    0.5 * (2.0 * PI * 300.0 * i as f32 / SR as f32).sin()
                } else {
                    0.0
                }
            })
            .collect()
    }

    fn gate() -> FrequencyGate {
        let settings = GateSettings {
            threshold_db: -40.0,
            hold_ms: 0.0,
            ..GateSettings::default()
        };
        FrequencyGate::with_params(GateParams::from_settings(&settings), SR as f32)
    }

    #[test]
    fn silence_never_opens() {
        let mut g = gate();
        let zeros = vec![0.0; SR as usize];
        let report = analyze(&mut g, &zeros, &zeros, SR, true);
        assert_eq!(report.hops, SR as usize / 512);
        assert_eq!(report.open_ratio, 0.0);
        assert_eq!(report.open_count, 0);
        assert_eq!(report.level_max_db, -96.0);
        assert!(report.transitions.is_empty());
    }

    #[test]
    fn burst_opens_and_closes_once() {
        let mut g = gate();
        let signal = burst(SR as usize, 12_000..36_000);
        let report = analyze(&mut g, &signal, &signal, SR, true);
        assert_eq!(report.open_count, 1);
        assert_eq!(report.close_count, 1);
        assert!(report.open_ratio > 0.4 && report.open_ratio < 0.65, "{}", report.open_ratio);
        assert!(report.level_max_db > -40.0);
        assert_eq!(report.transitions.len(), 2);
        assert!(report.transitions[0].open);
        assert!(report.transitions[0].time_secs < report.transitions[1].time_secs);
    }

    #[test]
    fn short_input_reports_no_hops() {
        let mut g = gate();
        let report = analyze(&mut g, &[0.1; 100], &[0.1; 100], SR, false);
        assert_eq!(report.hops, 0);
        assert_eq!(report.open_ratio, 0.0);
    }
}
