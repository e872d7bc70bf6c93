//! Band-limited level detection.
//!
//! [`SpectralDetector`] bundles the transform, the band's bin range and the
//! scratch buffers needed by the order-statistic reductions. One call to
//! [`SpectralDetector::analyze`] turns a stereo frame into a single level in
//! dBFS using one of five [`DetectionMethod`]s.

use freqgate_core::{AlignedBuffer, SILENCE_FLOOR_DB, linear_to_db};

use crate::AnalysisError;
use crate::band::BinRange;
use crate::transform::SpectralTransform;

/// Statistic used to reduce the band's bin magnitudes to one level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
pub enum DetectionMethod {
    /// Arithmetic mean.
    #[default]
    Average,
    /// Maximum.
    Peak,
    /// Median (mean of the two middle values for even counts).
    Median,
    /// Root mean square.
    Rms,
    /// Mean after dropping the lowest and highest 10% (at least one each).
    TrimmedMean,
}

impl DetectionMethod {
    /// All methods in parameter order.
    pub const ALL: [DetectionMethod; 5] = [
        DetectionMethod::Average,
        DetectionMethod::Peak,
        DetectionMethod::Median,
        DetectionMethod::Rms,
        DetectionMethod::TrimmedMean,
    ];

    /// Display labels in parameter order.
    pub const LABELS: &'static [&'static str] =
        &["Average", "Peak", "Median", "RMS", "Trimmed Mean"];

    /// Method for a parameter index. Out-of-range indices clamp to the
    /// nearest method.
    pub fn from_index(index: usize) -> Self {
        Self::ALL[index.min(Self::ALL.len() - 1)]
    }

    /// Parameter index of this method.
    pub fn index(self) -> usize {
        self as usize
    }

    /// Display label.
    pub fn label(self) -> &'static str {
        Self::LABELS[self.index()]
    }

    /// Reduces `values` to a single linear level.
    ///
    /// `scratch` must be at least as long as `values`; the order-statistic
    /// methods sort a copy there so the input is left untouched and nothing
    /// is allocated. An empty input reduces to `0.0`.
    ///
    /// ```rust
    /// use freqgate_analysis::DetectionMethod;
    ///
    /// let mags = [1.0, 2.0, 3.0, 4.0, 5.0];
    /// let mut scratch = [0.0; 5];
    /// assert_eq!(DetectionMethod::Peak.reduce(&mags, &mut scratch), 5.0);
    /// assert_eq!(DetectionMethod::Median.reduce(&mags, &mut scratch), 3.0);
    /// ```
    pub fn reduce(self, values: &[f32], scratch: &mut [f32]) -> f32 {
        let count = values.len();
        if count == 0 {
            return 0.0;
        }
        match self {
            DetectionMethod::Average => mean(values),
            DetectionMethod::Peak => values.iter().copied().fold(0.0, f32::max),
            DetectionMethod::Rms => {
                let sum_sq: f32 = values.iter().map(|v| v * v).sum();
                (sum_sq / count as f32).sqrt()
            }
            DetectionMethod::Median => {
                let sorted = sorted_copy(values, scratch);
                let mid = count / 2;
                if count % 2 == 0 {
                    (sorted[mid - 1] + sorted[mid]) * 0.5
                } else {
                    sorted[mid]
                }
            }
            DetectionMethod::TrimmedMean => {
                if count <= 4 {
                    return mean(values);
                }
                let trim = (count / 10).max(1);
                let sorted = sorted_copy(values, scratch);
                mean(&sorted[trim..count - trim])
            }
        }
    }
}

fn mean(values: &[f32]) -> f32 {
    values.iter().sum::<f32>() / values.len() as f32
}

fn sorted_copy<'a>(values: &[f32], scratch: &'a mut [f32]) -> &'a [f32] {
    let sorted = &mut scratch[..values.len()];
    sorted.copy_from_slice(values);
    sorted.sort_unstable_by(f32::total_cmp);
    sorted
}

/// Windowed STFT level detector over a configurable frequency band.
///
/// ```rust
/// use freqgate_analysis::{DetectionMethod, SpectralDetector};
///
/// let mut detector = SpectralDetector::new(2048, 48000.0, 100.0, 500.0).unwrap();
/// let silence = vec![0.0; 2048];
/// let level = detector.analyze(&silence, &silence, DetectionMethod::Average);
/// assert_eq!(level, -96.0);
/// ```
#[derive(Debug)]
pub struct SpectralDetector {
    transform: SpectralTransform,
    bins: BinRange,
    magnitudes: AlignedBuffer<f32>,
    scratch: AlignedBuffer<f32>,
    sample_rate: f32,
    failures: u64,
}

impl SpectralDetector {
    /// Builds a detector for an `fft_size`-point transform and the band
    /// `[low_hz, high_hz]`.
    pub fn new(
        fft_size: usize,
        sample_rate: f32,
        low_hz: f32,
        high_hz: f32,
    ) -> Result<Self, AnalysisError> {
        let transform = SpectralTransform::new(fft_size)?;
        let bin_count = fft_size / 2 + 1;
        let bins = BinRange::from_band(low_hz, high_hz, sample_rate, fft_size);

        #[cfg(feature = "tracing")]
        tracing::debug!(
            fft_size,
            sample_rate,
            start_bin = bins.start,
            end_bin = bins.end,
            "spectral detector allocated"
        );

        Ok(Self {
            transform,
            bins,
            magnitudes: AlignedBuffer::new(bin_count)?,
            scratch: AlignedBuffer::new(bin_count)?,
            sample_rate,
            failures: 0,
        })
    }

    /// Transform size `N`.
    #[inline]
    pub fn fft_size(&self) -> usize {
        self.transform.size()
    }

    /// Hop size `N/4`.
    #[inline]
    pub fn hop_size(&self) -> usize {
        self.transform.size() / 4
    }

    /// Current inclusive bin range.
    #[inline]
    pub fn bins(&self) -> BinRange {
        self.bins
    }

    /// Number of transforms the FFT backend rejected.
    #[inline]
    pub fn failure_count(&self) -> u64 {
        self.failures
    }

    /// Recomputes the bin range for new band edges. Never allocates.
    pub fn set_band(&mut self, low_hz: f32, high_hz: f32) -> BinRange {
        self.bins = BinRange::from_band(low_hz, high_hz, self.sample_rate, self.fft_size());
        self.bins
    }

    /// Linear magnitudes of the current band from the last analysis.
    pub fn band_magnitudes(&self) -> &[f32] {
        &self.magnitudes.as_slice()[self.bins.start..=self.bins.end]
    }

    /// Access to the underlying transform.
    pub fn transform(&self) -> &SpectralTransform {
        &self.transform
    }

    /// Analyzes one frame (`N` samples per channel, oldest first) and
    /// returns the band level in dBFS.
    ///
    /// A frame the FFT backend rejects counts as a failure and reads as
    /// silence.
    pub fn analyze(&mut self, left: &[f32], right: &[f32], method: DetectionMethod) -> f32 {
        if self.transform.analyze_frame(left, right).is_err() {
            self.failures = self.failures.saturating_add(1);
            return SILENCE_FLOOR_DB;
        }

        let BinRange { start, end } = self.bins;
        let magnitudes = self.magnitudes.as_mut_slice();
        for bin in start..=end {
            magnitudes[bin] = self.transform.magnitude(bin);
        }

        let level = method.reduce(&magnitudes[start..=end], self.scratch.as_mut_slice());
        linear_to_db(level)
    }
}
