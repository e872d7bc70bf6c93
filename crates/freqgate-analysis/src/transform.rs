//! Forward real FFT of a windowed mono frame.
//!
//! All buffers are 64-byte aligned and allocated once in
//! [`SpectralTransform::new`]; [`SpectralTransform::analyze_frame`] runs
//! without touching the heap.
//!
//! The normalized spectrum is stored in an ordered real layout:
//!
//! | index | content |
//! |-------|---------|
//! | 0 | DC (real) |
//! | 1 | Nyquist (real) |
//! | 2k, 2k+1 | re/im of bin k, for k in 1..N/2 |
//!
//! Values are single-sided linear amplitudes: a sinusoid of amplitude `A`
//! centered on a bin reads `A` at that bin.

use std::fmt;
use std::sync::Arc;

use freqgate_core::{AlignedBuffer, mono_sum};
use realfft::num_complex::Complex;
use realfft::{RealFftPlanner, RealToComplex};

use crate::AnalysisError;
use crate::window::{fill_hann, window_gain};

/// Smallest supported transform size.
pub const MIN_FFT_SIZE: usize = 16;

/// Windowed real-to-complex transform with pre-allocated buffers.
pub struct SpectralTransform {
    fft: Arc<dyn RealToComplex<f32>>,
    window: AlignedBuffer<f32>,
    window_gain: f32,
    input: AlignedBuffer<f32>,
    spectrum: AlignedBuffer<Complex<f32>>,
    scratch: AlignedBuffer<Complex<f32>>,
    ordered: AlignedBuffer<f32>,
    size: usize,
}

impl fmt::Debug for SpectralTransform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SpectralTransform")
            .field("size", &self.size)
            .field("window_gain", &self.window_gain)
            .finish_non_exhaustive()
    }
}

impl SpectralTransform {
    /// Plans an `size`-point transform and allocates its buffers.
    pub fn new(size: usize) -> Result<Self, AnalysisError> {
        if size < MIN_FFT_SIZE || !size.is_power_of_two() {
            return Err(AnalysisError::UnsupportedSize(size));
        }

        let fft = RealFftPlanner::<f32>::new().plan_fft_forward(size);

        let mut window = AlignedBuffer::new(size)?;
        fill_hann(window.as_mut_slice());
        let window_gain = window_gain(window.as_slice());

        Ok(Self {
            input: AlignedBuffer::new(size)?,
            spectrum: AlignedBuffer::new(size / 2 + 1)?,
            scratch: AlignedBuffer::new(fft.get_scratch_len())?,
            ordered: AlignedBuffer::new(size)?,
            fft,
            window,
            window_gain,
            size,
        })
    }

    /// Transform size `N`.
    #[inline]
    pub fn size(&self) -> usize {
        self.size
    }

    /// Coherent-gain compensation applied to every bin.
    #[inline]
    pub fn window_gain(&self) -> f32 {
        self.window_gain
    }

    /// Window coefficients.
    pub fn window(&self) -> &[f32] {
        self.window.as_slice()
    }

    /// Downmixes, windows and transforms one stereo frame.
    ///
    /// `left` and `right` must each hold exactly `N` samples, oldest first.
    /// On success the ordered spectrum is available via
    /// [`ordered`](Self::ordered).
    pub fn analyze_frame(&mut self, left: &[f32], right: &[f32]) -> Result<(), AnalysisError> {
        let window = self.window.as_slice();
        for (((x, &l), &r), &w) in self
            .input
            .as_mut_slice()
            .iter_mut()
            .zip(left)
            .zip(right)
            .zip(window)
        {
            *x = mono_sum(l, r) * w;
        }

        self.fft.process_with_scratch(
            self.input.as_mut_slice(),
            self.spectrum.as_mut_slice(),
            self.scratch.as_mut_slice(),
        )?;

        self.write_ordered();
        Ok(())
    }

    /// Normalized spectrum in the ordered real layout.
    #[inline]
    pub fn ordered(&self) -> &[f32] {
        self.ordered.as_slice()
    }

    /// Linear magnitude of `bin` from the ordered spectrum.
    ///
    /// Bins `0` and `N/2` are real-only. Returns `0.0` past Nyquist.
    #[inline]
    pub fn magnitude(&self, bin: usize) -> f32 {
        let ordered = self.ordered.as_slice();
        let half = self.size / 2;
        if bin == 0 {
            ordered[0].abs()
        } else if bin == half {
            ordered[1].abs()
        } else if bin < half {
            let re = ordered[2 * bin];
            let im = ordered[2 * bin + 1];
            (re * re + im * im).sqrt()
        } else {
            0.0
        }
    }

    fn write_ordered(&mut self) {
        let half = self.size / 2;
        let base = self.window_gain / self.size as f32;
        let spectrum = self.spectrum.as_slice();
        let ordered = self.ordered.as_mut_slice();

        ordered[0] = spectrum[0].re * base;
        ordered[1] = spectrum[half].re * base;
        let doubled = 2.0 * base;
        for k in 1..half {
            ordered[2 * k] = spectrum[k].re * doubled;
            ordered[2 * k + 1] = spectrum[k].im * doubled;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::PI;

    fn bin_sine(n: usize, bin: usize, amplitude: f32) -> Vec<f32> {
        (0..n)
            .map(|i| amplitude * (2.0 * PI * bin as f32 * i as f32 / n as f32).sin())
            .collect()
    }

    #[test]
    fn test_rejects_bad_sizes() {
        assert!(matches!(
            SpectralTransform::new(1000),
            Err(AnalysisError::UnsupportedSize(1000))
        ));
        assert!(SpectralTransform::new(8).is_err());
        assert!(SpectralTransform::new(512).is_ok());
    }

    #[test]
    fn test_buffers_aligned() {
        let t = SpectralTransform::new(1024).unwrap();
        assert!(t.input.is_aligned());
        assert!(t.spectrum.is_aligned());
        assert!(t.ordered.is_aligned());
        assert_eq!(t.ordered().len(), 1024);
    }

    #[test]
    fn test_bin_centered_sine_reads_amplitude() {
        for &(n, bin) in &[(512usize, 10usize), (1024, 37), (2048, 13), (4096, 100)] {
            let mut t = SpectralTransform::new(n).unwrap();
            let signal = bin_sine(n, bin, 0.5);
            t.analyze_frame(&signal, &signal).unwrap();
            let mag = t.magnitude(bin);
            assert!(
                (mag - 0.5).abs() < 0.01,
                "N={n} bin={bin}: measured {mag}, expected 0.5"
            );
        }
    }

    #[test]
    fn test_downmix_cancels_opposite_channels() {
        let n = 512;
        let mut t = SpectralTransform::new(n).unwrap();
        let left = bin_sine(n, 20, 0.8);
        let right: Vec<f32> = left.iter().map(|x| -x).collect();
        t.analyze_frame(&left, &right).unwrap();
        assert!(t.magnitude(20) < 1e-6);
    }

    #[test]
    fn test_silence_is_zero() {
        let n = 256;
        let mut t = SpectralTransform::new(n).unwrap();
        let zeros = vec![0.0; n];
        t.analyze_frame(&zeros, &zeros).unwrap();
        assert!(t.ordered().iter().all(|&x| x == 0.0));
        assert_eq!(t.magnitude(n), 0.0);
    }
}
