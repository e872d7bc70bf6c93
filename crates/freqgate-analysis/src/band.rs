//! Mapping a detection band in Hz onto an inclusive range of FFT bins.
//!
//! The mapping is total: every combination of band edges, sample rate and
//! FFT size yields a range satisfying `1 <= start < end <= N/2`. DC is never
//! part of the band, inverted or empty bands are widened by one bin, and
//! edges beyond Nyquist are pulled back in.

/// Lowest frequency the detector will ever look at.
pub const MIN_DETECTION_HZ: f32 = 20.0;

/// Inclusive bin range `[start, end]` analyzed by the detector.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BinRange {
    /// First bin (never 0).
    pub start: usize,
    /// Last bin, inclusive (at most `N/2`).
    pub end: usize,
}

impl BinRange {
    /// Maps `[low_hz, high_hz]` onto bins for an `fft_size`-point transform.
    ///
    /// ```rust
    /// use freqgate_analysis::BinRange;
    ///
    /// // 48 kHz / 2048 = 23.4375 Hz per bin
    /// let bins = BinRange::from_band(100.0, 500.0, 48000.0, 2048);
    /// assert_eq!(bins, BinRange { start: 4, end: 22 });
    ///
    /// // inverted edges are widened to one bin above the low edge
    /// let bins = BinRange::from_band(1000.0, 200.0, 48000.0, 2048);
    /// assert_eq!(bins, BinRange { start: 42, end: 44 });
    /// ```
    pub fn from_band(low_hz: f32, high_hz: f32, sample_rate: f32, fft_size: usize) -> Self {
        let nyquist_bin = (fft_size / 2).max(2);
        let bin_width = sample_rate / fft_size as f32;
        let nyquist_hz = sample_rate * 0.5;

        let low = low_hz.max(MIN_DETECTION_HZ);
        let mut high = high_hz.min(nyquist_hz);
        // f32::max/min already replace NaN edges with the limits
        if low >= high {
            high = low + bin_width;
        }

        let start = bin_index((low / bin_width).floor()).clamp(1, nyquist_bin - 1);
        let mut end = bin_index((high / bin_width).ceil()).min(nyquist_bin);
        if end <= start {
            end = start + 1;
        }

        Self { start, end }
    }

    /// Number of bins in the range.
    #[inline]
    pub fn len(&self) -> usize {
        self.end - self.start + 1
    }

    /// Always `false`; a band holds at least two bins.
    #[inline]
    pub fn is_empty(&self) -> bool {
        false
    }

    /// Center frequency of `bin` in Hz.
    #[inline]
    pub fn bin_frequency(bin: usize, sample_rate: f32, fft_size: usize) -> f32 {
        bin as f32 * sample_rate / fft_size as f32
    }
}

fn bin_index(x: f32) -> usize {
    if x.is_finite() && x > 0.0 {
        x as usize
    } else {
        0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_voice_band_2048() {
        let bins = BinRange::from_band(100.0, 500.0, 48000.0, 2048);
        // floor(100 / 23.4375) = 4, ceil(500 / 23.4375) = 22
        assert_eq!(bins.start, 4);
        assert_eq!(bins.end, 22);
        assert_eq!(bins.len(), 19);
    }

    #[test]
    fn test_low_edge_clamped_to_20hz() {
        let bins = BinRange::from_band(0.0, 200.0, 48000.0, 4096);
        // 20 Hz / 11.72 Hz per bin = bin 1
        assert_eq!(bins.start, 1);
    }

    #[test]
    fn test_dc_never_included() {
        let bins = BinRange::from_band(20.0, 40.0, 48000.0, 512);
        // 20 / 93.75 floors to bin 0, forced up to 1
        assert_eq!(bins.start, 1);
        assert!(bins.end > bins.start);
    }

    #[test]
    fn test_high_edge_clamped_to_nyquist() {
        let bins = BinRange::from_band(1000.0, 20000.0, 16000.0, 1024);
        assert_eq!(bins.end, 512);
    }

    #[test]
    fn test_degenerate_equal_edges() {
        let bins = BinRange::from_band(440.0, 440.0, 48000.0, 1024);
        assert!(bins.start >= 1);
        assert!(bins.end > bins.start);
    }

    #[test]
    fn test_low_above_nyquist() {
        let bins = BinRange::from_band(20000.0, 20000.0, 8000.0, 512);
        assert_eq!(bins.end, 256);
        assert_eq!(bins.start, 255);
    }

    #[test]
    fn test_nan_edges_stay_valid() {
        let bins = BinRange::from_band(f32::NAN, f32::NAN, 48000.0, 2048);
        assert!(bins.start >= 1 && bins.start < bins.end && bins.end <= 1024);
    }

    #[test]
    fn test_bin_frequency() {
        assert_eq!(BinRange::bin_frequency(4, 48000.0, 2048), 93.75);
    }
}
