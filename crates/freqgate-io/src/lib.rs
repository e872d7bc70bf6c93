//! Audio file I/O and offline rendering for freqgate.
//!
//! - **WAV file I/O**: [`read_wav_stereo`] and [`write_wav_stereo`]; mono
//!   files are duplicated to both channels, files with more channels
//!   contribute their first two
//! - **Offline rendering**: [`render`] runs any stereo [`Effect`] over a
//!   whole buffer in fixed blocks, optionally removing its latency
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use freqgate_effects::FrequencyGate;
//! use freqgate_io::{RenderOptions, read_wav_stereo, render, write_wav_stereo};
//!
//! let (input, spec) = read_wav_stereo("take.wav")?;
//! let mut gate = FrequencyGate::new(spec.sample_rate as f32);
//! let output = render(&mut gate, &input, &RenderOptions::default(), |_| {});
//! write_wav_stereo("gated.wav", &output, spec.sample_rate, 24)?;
//! ```
//!
//! [`Effect`]: freqgate_core::Effect

mod render;
mod samples;
mod wav;

pub use render::{RenderOptions, render};
pub use samples::StereoSamples;
pub use wav::{SUPPORTED_BIT_DEPTHS, WavInfo, read_wav_info, read_wav_stereo, write_wav_stereo};

/// Error types for audio I/O operations.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// WAV file read/write error.
    #[error("WAV file error: {0}")]
    Wav(#[from] hound::Error),

    /// Output bit depth other than 16, 24 or 32.
    #[error("unsupported bit depth: {0} (expected 16, 24 or 32)")]
    UnsupportedBitDepth(u16),

    /// Standard I/O error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience result type for audio I/O operations.
pub type Result<T> = std::result::Result<T, Error>;
