//! Gate a WAV file.

use std::path::PathBuf;

use anyhow::Context;
use clap::Args;
use freqgate_core::Effect;
use freqgate_effects::{FrequencyGate, GateParams};
use freqgate_io::{RenderOptions, read_wav_stereo, render, write_wav_stereo};
use indicatif::{ProgressBar, ProgressStyle};

use super::common::{GateOptions, latency_summary, level_summary};

#[derive(Args)]
pub struct ProcessArgs {
    /// Input WAV file (mono or stereo)
    input: PathBuf,

    /// Output WAV file (stereo)
    output: PathBuf,

    #[command(flatten)]
    gate: GateOptions,

    /// Processing block size in samples
    #[arg(long, default_value = "512")]
    block_size: usize,

    /// Output bit depth (16, 24, or 32)
    #[arg(long, default_value = "32")]
    bit_depth: u16,

    /// Trim the gate's reported latency so output lines up with input
    #[arg(long)]
    compensate_latency: bool,

    /// Don't draw a progress bar
    #[arg(short, long)]
    quiet: bool,
}

pub fn run(args: ProcessArgs) -> anyhow::Result<()> {
    if args.block_size == 0 {
        anyhow::bail!("block size must be at least 1");
    }
    let settings = args.gate.settings()?;

    println!("Reading {}...", args.input.display());
    let (input, info) = read_wav_stereo(&args.input)
        .with_context(|| format!("reading {}", args.input.display()))?;
    println!(
        "  {} Hz, {} channel(s), {:.2}s",
        info.sample_rate,
        info.channels,
        info.duration_secs()
    );

    let mut gate =
        FrequencyGate::with_params(GateParams::from_settings(&settings), info.sample_rate as f32);
    println!(
        "Gate: {:.0}-{:.0} Hz, threshold {:.1} dB, {} detection, FFT {}, latency {}",
        settings.freq_low_hz,
        settings.freq_high_hz,
        settings.threshold_db,
        settings.detection.label(),
        settings.fft_size.samples(),
        latency_summary(gate.latency_samples(), gate.sample_rate())
    );

    let options = RenderOptions {
        block_size: args.block_size,
        compensate_latency: args.compensate_latency,
    };

    let progress = if args.quiet {
        ProgressBar::hidden()
    } else {
        ProgressBar::new(input.len() as u64)
    };
    progress.set_style(
        ProgressStyle::default_bar()
            .template("[{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({eta})")?
            .progress_chars("##-"),
    );

    let output = render(&mut gate, &input, &options, |done| {
        progress.set_position(done as u64);
    });
    progress.finish_and_clear();

    if gate.fft_failures() > 0 {
        tracing::warn!(failures = gate.fft_failures(), "FFT rejected frames");
    }

    write_wav_stereo(&args.output, &output, info.sample_rate, args.bit_depth)
        .with_context(|| format!("writing {}", args.output.display()))?;

    println!("Input:  {}", level_summary(&input.left));
    println!("Output: {}", level_summary(&output.left));
    println!("Wrote {}", args.output.display());

    Ok(())
}
