//! Deinterleaved stereo sample buffers.

/// A pair of equal-length channel buffers.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StereoSamples {
    /// Left channel samples.
    pub left: Vec<f32>,
    /// Right channel samples.
    pub right: Vec<f32>,
}

impl StereoSamples {
    /// Create stereo samples from left and right channels.
    pub fn new(left: Vec<f32>, right: Vec<f32>) -> Self {
        debug_assert_eq!(left.len(), right.len(), "Channels must have same length");
        Self { left, right }
    }

    /// Create stereo samples from mono by duplicating to both channels.
    pub fn from_mono(mono: Vec<f32>) -> Self {
        Self {
            left: mono.clone(),
            right: mono,
        }
    }

    /// Splits interleaved frames of `channels` samples.
    ///
    /// Mono is duplicated; with more than two channels only the first two
    /// are kept. A trailing partial frame is dropped.
    pub fn from_interleaved(interleaved: &[f32], channels: usize) -> Self {
        match channels {
            0 => Self::default(),
            1 => Self::from_mono(interleaved.to_vec()),
            _ => {
                let frames = interleaved.len() / channels;
                let mut left = Vec::with_capacity(frames);
                let mut right = Vec::with_capacity(frames);
                for frame in interleaved.chunks_exact(channels) {
                    left.push(frame[0]);
                    right.push(frame[1]);
                }
                Self { left, right }
            }
        }
    }

    /// Number of samples per channel.
    pub fn len(&self) -> usize {
        self.left.len()
    }

    /// Whether the buffers are empty.
    pub fn is_empty(&self) -> bool {
        self.left.is_empty()
    }

    /// Largest absolute sample over both channels.
    pub fn peak(&self) -> f32 {
        self.left
            .iter()
            .chain(self.right.iter())
            .fold(0.0_f32, |m, x| m.max(x.abs()))
    }
}
