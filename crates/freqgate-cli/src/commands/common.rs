//! Helpers shared by the commands.

use anyhow::Context;
use clap::Args;
use freqgate_config::{load_preset, parse_assignment};
use freqgate_core::{linear_to_db, samples_to_ms};
use freqgate_effects::{GateParam, GateSettings};

/// `--preset` and repeated `--param KEY=VALUE` options.
#[derive(Args, Debug, Clone, Default)]
pub struct GateOptions {
    /// Preset name (user or factory) or path to a preset TOML file
    #[arg(short, long)]
    pub preset: Option<String>,

    /// Parameter override, applied after the preset (e.g. "threshold=-40")
    #[arg(long = "param", value_name = "KEY=VALUE", value_parser = parse_assignment)]
    pub params: Vec<(GateParam, f32)>,
}

impl GateOptions {
    /// Defaults, overridden by the preset, overridden by `--param`s.
    pub fn settings(&self) -> anyhow::Result<GateSettings> {
        let mut values = match &self.preset {
            Some(name) => {
                let preset =
                    load_preset(name).with_context(|| format!("loading preset '{name}'"))?;
                tracing::info!(preset = %preset.name, "using preset");
                preset
                    .to_settings()
                    .with_context(|| format!("preset '{name}'"))?
                    .to_values()
            }
            None => GateSettings::default().to_values(),
        };
        for &(param, value) in &self.params {
            values[param.index()] = value;
        }
        Ok(GateSettings::from_values(&values))
    }
}

/// Root mean square of `samples`.
pub fn rms(samples: &[f32]) -> f32 {
    if samples.is_empty() {
        return 0.0;
    }
    let sum: f32 = samples.iter().map(|s| s * s).sum();
    (sum / samples.len() as f32).sqrt()
}

/// Largest absolute sample.
pub fn peak(samples: &[f32]) -> f32 {
    samples.iter().map(|s| s.abs()).fold(0.0, f32::max)
}

/// One-line level summary: RMS and peak in dBFS.
pub fn level_summary(samples: &[f32]) -> String {
    format!(
        "RMS {:.1} dB, Peak {:.1} dB",
        linear_to_db(rms(samples)),
        linear_to_db(peak(samples))
    )
}

/// Latency as samples and milliseconds, e.g. `512 samples (10.7 ms)`.
pub fn latency_summary(samples: usize, sample_rate: f32) -> String {
    format!(
        "{samples} samples ({:.1} ms)",
        samples_to_ms(samples as f32, sample_rate)
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use freqgate_effects::DetectionMethod;

    #[test]
    fn params_override_defaults() {
        let opts = GateOptions {
            preset: None,
            params: vec![(GateParam::Threshold, -50.0), (GateParam::Detection, 2.0)],
        };
        let s = opts.settings().unwrap();
        assert_eq!(s.threshold_db, -50.0);
        assert_eq!(s.detection, DetectionMethod::Median);
    }

    #[test]
    fn params_override_preset() {
        let opts = GateOptions {
            preset: Some("low-latency".to_string()),
            params: vec![(GateParam::Hold, 10.0)],
        };
        let s = opts.settings().unwrap();
        assert_eq!(s.hold_ms, 10.0);
        assert_eq!(s.detection, DetectionMethod::Peak);
    }

    #[test]
    fn unknown_preset_errors() {
        let opts = GateOptions {
            preset: Some("definitely-not-a-preset".to_string()),
            params: Vec::new(),
        };
        assert!(opts.settings().is_err());
    }

    #[test]
    fn level_helpers() {
        assert_eq!(rms(&[]), 0.0);
        assert_eq!(peak(&[0.25, -0.5]), 0.5);
        assert!((rms(&[0.5, -0.5]) - 0.5).abs() < 1e-6);
        assert_eq!(level_summary(&[]), "RMS -96.0 dB, Peak -96.0 dB");
    }

    #[test]
    fn latency_in_ms() {
        assert_eq!(latency_summary(480, 48000.0), "480 samples (10.0 ms)");
        assert_eq!(latency_summary(128, 48000.0), "128 samples (2.7 ms)");
        assert_eq!(latency_summary(0, 44100.0), "0 samples (0.0 ms)");
    }
}
