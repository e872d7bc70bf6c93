//! Error types for spectral analysis.

use freqgate_core::AllocError;
use thiserror::Error;

/// Errors raised while building or running the spectral detector.
#[derive(Debug, Error)]
pub enum AnalysisError {
    /// FFT size is not a power of two or is too small to carry a band.
    #[error("unsupported FFT size {0} (expected a power of two >= {min})", min = crate::MIN_FFT_SIZE)]
    UnsupportedSize(usize),

    /// A transform buffer could not be allocated.
    #[error(transparent)]
    Alloc(#[from] AllocError),

    /// The FFT backend rejected a frame.
    #[error("FFT failed: {0}")]
    Transform(#[from] realfft::FftError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        let err = AnalysisError::UnsupportedSize(1000);
        assert!(err.to_string().contains("1000"));

        let err: AnalysisError = AllocError { requested: 7 }.into();
        assert!(err.to_string().contains("7 elements"));
    }
}
