//! Stereo processing trait.
//!
//! The [`Effect`] trait is the seam between a processor and whatever drives
//! it (a plugin shell, the offline CLI, tests). Processing is stereo-in,
//! stereo-out at arbitrary block lengths; no method may allocate.

/// Core trait for stereo audio processors.
///
/// # Example
///
/// ```rust
/// use freqgate_core::Effect;
///
/// struct Swap;
///
/// impl Effect for Swap {
///     fn process_stereo(&mut self, left: f32, right: f32) -> (f32, f32) {
///         (right, left)
///     }
///
///     fn set_sample_rate(&mut self, _sample_rate: f32) {}
///
///     fn reset(&mut self) {}
/// }
///
/// let mut fx = Swap;
/// assert_eq!(fx.process_stereo(1.0, 0.0), (0.0, 1.0));
/// ```
pub trait Effect {
    /// Process one stereo sample frame.
    fn process_stereo(&mut self, left: f32, right: f32) -> (f32, f32);

    /// Process a block of stereo samples.
    ///
    /// Default implementation calls [`process_stereo`](Self::process_stereo)
    /// per frame. All four slices must share one length.
    fn process_block_stereo(
        &mut self,
        left_in: &[f32],
        right_in: &[f32],
        left_out: &mut [f32],
        right_out: &mut [f32],
    ) {
        debug_assert_eq!(left_in.len(), right_in.len());
        debug_assert_eq!(left_in.len(), left_out.len());
        debug_assert_eq!(left_in.len(), right_out.len());
        for i in 0..left_in.len() {
            let (l, r) = self.process_stereo(left_in[i], right_in[i]);
            left_out[i] = l;
            right_out[i] = r;
        }
    }

    /// Process a block of stereo samples in place.
    fn process_block_stereo_inplace(&mut self, left: &mut [f32], right: &mut [f32]) {
        debug_assert_eq!(left.len(), right.len());
        for (l, r) in left.iter_mut().zip(right.iter_mut()) {
            let (out_l, out_r) = self.process_stereo(*l, *r);
            *l = out_l;
            *r = out_r;
        }
    }

    /// Update the sample rate in Hz.
    fn set_sample_rate(&mut self, sample_rate: f32);

    /// Clear internal state without changing parameters.
    fn reset(&mut self);

    /// Processing latency in samples. Default: 0.
    fn latency_samples(&self) -> usize {
        0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Scale(f32);

    impl Effect for Scale {
        fn process_stereo(&mut self, left: f32, right: f32) -> (f32, f32) {
            (left * self.0, right * self.0)
        }
        fn set_sample_rate(&mut self, _: f32) {}
        fn reset(&mut self) {}
    }

    #[test]
    fn test_block_default_matches_per_sample() {
        let mut fx = Scale(0.5);
        let left = [1.0, 2.0, 3.0];
        let right = [-1.0, -2.0, -3.0];
        let mut out_l = [0.0; 3];
        let mut out_r = [0.0; 3];
        fx.process_block_stereo(&left, &right, &mut out_l, &mut out_r);
        assert_eq!(out_l, [0.5, 1.0, 1.5]);
        assert_eq!(out_r, [-0.5, -1.0, -1.5]);
    }

    #[test]
    fn test_inplace() {
        let mut fx = Scale(2.0);
        let mut left = [1.0, 2.0];
        let mut right = [3.0, 4.0];
        fx.process_block_stereo_inplace(&mut left, &mut right);
        assert_eq!(left, [2.0, 4.0]);
        assert_eq!(right, [6.0, 8.0]);
        assert_eq!(fx.latency_samples(), 0);
    }
}
