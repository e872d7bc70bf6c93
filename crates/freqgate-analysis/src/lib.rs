//! freqgate Analysis - band-limited spectral level detection
//!
//! Turns overlapping stereo frames into a single band level in dBFS:
//!
//! - [`window`] - symmetric Hann window and coherent-gain compensation
//! - [`band`] - mapping `[low, high]` Hz onto an inclusive bin range
//! - [`transform`] - aligned, pre-allocated forward real FFT
//! - [`detector`] - five reduction statistics and the [`SpectralDetector`]
//!
//! ## Example
//!
//! ```rust
//! use freqgate_analysis::{DetectionMethod, SpectralDetector};
//! use std::f32::consts::PI;
//!
//! let n = 2048;
//! let mut detector = SpectralDetector::new(n, 48000.0, 100.0, 500.0).unwrap();
//!
//! // 0.5 amplitude sine centered on bin 13 (~305 Hz)
//! let frame: Vec<f32> = (0..n)
//!     .map(|i| 0.5 * (2.0 * PI * 13.0 * i as f32 / n as f32).sin())
//!     .collect();
//!
//! let level_db = detector.analyze(&frame, &frame, DetectionMethod::Peak);
//! assert!((level_db + 6.02).abs() < 0.2);
//! ```

pub mod band;
pub mod detector;
pub mod error;
pub mod transform;
pub mod window;

pub use band::{BinRange, MIN_DETECTION_HZ};
pub use detector::{DetectionMethod, SpectralDetector};
pub use error::AnalysisError;
pub use transform::{MIN_FFT_SIZE, SpectralTransform};
pub use window::{fill_hann, window_gain};
