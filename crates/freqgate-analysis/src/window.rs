//! Hann analysis window and coherent-gain compensation.

use std::f32::consts::PI;

/// Smallest window sum used when computing the compensation factor.
const WINDOW_SUM_EPSILON: f32 = 1e-10;

/// Fills `out` with a symmetric Hann window.
///
/// `w[i] = 0.5 * (1 - cos(2*pi*i / (N - 1)))`, so both end points are zero.
/// A single-sample window is `[1.0]`.
pub fn fill_hann(out: &mut [f32]) {
    let n = out.len();
    if n <= 1 {
        out.fill(1.0);
        return;
    }
    let denom = (n - 1) as f32;
    for (i, w) in out.iter_mut().enumerate() {
        *w = 0.5 * (1.0 - (2.0 * PI * i as f32 / denom).cos());
    }
}

/// Amplitude compensation for a window: `N / sum(w)`.
///
/// Multiplying a windowed spectrum by this factor restores the amplitude a
/// rectangular window would have measured. The sum is floored at a tiny
/// epsilon so an all-zero window cannot divide by zero.
pub fn window_gain(coefficients: &[f32]) -> f32 {
    let sum: f32 = coefficients.iter().sum();
    coefficients.len() as f32 / sum.max(WINDOW_SUM_EPSILON)
}
