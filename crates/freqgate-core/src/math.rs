//! Level and time conversions used throughout the gate.
//!
//! All functions are allocation-free and `no_std` compatible.
//!
//! # Level Conversions
//!
//! The gate works against a fixed -96 dBFS silence floor:
//!
//! - [`db_to_linear`] returns exactly `0.0` at or below the floor
//! - [`linear_to_db`] never returns less than the floor, and maps anything
//!   below [`LINEAR_EPSILON`] (including NaN) to the floor
//!
//! # Time Conversions
//!
//! - [`ms_to_samples`] / [`samples_to_ms`] - millisecond/sample conversions
//! - [`ms_to_samples_rounded`] - rounded sample counts for hold and lookahead
//! - [`time_constant_coeff`] - one-pole smoothing coefficient for attack/release

use libm::{expf, logf, roundf};

/// Silence floor in dBFS.
pub const SILENCE_FLOOR_DB: f32 = -96.0;

/// Smallest linear level treated as non-silent by [`linear_to_db`].
pub const LINEAR_EPSILON: f32 = 1e-10;

/// Convert decibels to linear gain.
///
/// Values at or below [`SILENCE_FLOOR_DB`] map to exactly `0.0`, so a
/// range of -96 dB fully mutes a closed gate.
///
/// # Example
/// ```rust
/// use freqgate_core::db_to_linear;
///
/// assert!((db_to_linear(0.0) - 1.0).abs() < 0.001);
/// assert!((db_to_linear(-6.02) - 0.5).abs() < 0.01);
/// assert_eq!(db_to_linear(-96.0), 0.0);
/// ```
#[inline]
pub fn db_to_linear(db: f32) -> f32 {
    if db <= SILENCE_FLOOR_DB {
        return 0.0;
    }
    // 10^(dB/20) = e^(dB * ln(10)/20)
    const FACTOR: f32 = core::f32::consts::LN_10 / 20.0;
    expf(db * FACTOR)
}

/// Convert a linear level to decibels, floored at [`SILENCE_FLOOR_DB`].
///
/// # Example
/// ```rust
/// use freqgate_core::linear_to_db;
///
/// assert!((linear_to_db(1.0) - 0.0).abs() < 0.001);
/// assert!((linear_to_db(0.5) - (-6.02)).abs() < 0.01);
/// assert_eq!(linear_to_db(0.0), -96.0);
/// ```
#[inline]
pub fn linear_to_db(linear: f32) -> f32 {
    if linear.is_nan() || linear < LINEAR_EPSILON {
        return SILENCE_FLOOR_DB;
    }
    // 20 * log10(linear) = 20 * ln(linear) / ln(10)
    const FACTOR: f32 = 20.0 / core::f32::consts::LN_10;
    (logf(linear) * FACTOR).max(SILENCE_FLOOR_DB)
}

/// Convert milliseconds to a (fractional) number of samples.
#[inline]
pub fn ms_to_samples(ms: f32, sample_rate: f32) -> f32 {
    ms * sample_rate / 1000.0
}

/// Convert samples to milliseconds.
#[inline]
pub fn samples_to_ms(samples: f32, sample_rate: f32) -> f32 {
    samples * 1000.0 / sample_rate
}

/// Convert milliseconds to a whole number of samples, rounded to nearest.
///
/// Negative or non-finite results clamp to zero.
///
/// ```rust
/// use freqgate_core::ms_to_samples_rounded;
///
/// assert_eq!(ms_to_samples_rounded(50.0, 48000.0), 2400);
/// assert_eq!(ms_to_samples_rounded(0.01, 48000.0), 0);
/// ```
#[inline]
pub fn ms_to_samples_rounded(ms: f32, sample_rate: f32) -> usize {
    let samples = roundf(ms_to_samples(ms, sample_rate));
    if samples.is_finite() && samples > 0.0 {
        samples as usize
    } else {
        0
    }
}

/// One-pole smoothing coefficient for a time constant in milliseconds.
///
/// Returns `exp(-1 / (sample_rate * ms / 1000))`. A non-positive time
/// constant yields `0.0` (instant response).
///
/// ```rust
/// use freqgate_core::time_constant_coeff;
///
/// let c = time_constant_coeff(5.0, 48000.0);
/// assert!(c > 0.99 && c < 1.0);
/// assert_eq!(time_constant_coeff(0.0, 48000.0), 0.0);
/// ```
#[inline]
pub fn time_constant_coeff(ms: f32, sample_rate: f32) -> f32 {
    let samples = ms_to_samples(ms, sample_rate);
    if samples > 0.0 && samples.is_finite() {
        expf(-1.0 / samples)
    } else {
        0.0
    }
}

/// Sum stereo to mono (average).
#[inline]
pub fn mono_sum(left: f32, right: f32) -> f32 {
    (left + right) * 0.5
}
