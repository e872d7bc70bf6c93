//! Stereo lookahead delay line.
//!
//! Storage is sized once for the largest delay that will ever be requested.
//! Changing the delay afterwards only moves the wrap point and clears the
//! line, so it never allocates and is safe on the audio thread.

#[cfg(not(feature = "std"))]
use alloc::vec;
#[cfg(not(feature = "std"))]
use alloc::vec::Vec;

/// Fixed-capacity stereo delay with a runtime-adjustable length.
///
/// A delay of 0 passes audio through unchanged.
///
/// ```rust
/// use freqgate_core::LookaheadDelay;
///
/// let mut delay = LookaheadDelay::with_capacity(8);
/// delay.set_delay(2);
/// assert_eq!(delay.process(1.0, -1.0), (0.0, 0.0));
/// assert_eq!(delay.process(2.0, -2.0), (0.0, 0.0));
/// assert_eq!(delay.process(3.0, -3.0), (1.0, -1.0));
/// ```
#[derive(Debug, Clone)]
pub struct LookaheadDelay {
    left: Vec<f32>,
    right: Vec<f32>,
    write_pos: usize,
    delay_samples: usize,
}

impl LookaheadDelay {
    /// Creates a delay line able to hold up to `capacity` samples of delay.
    ///
    /// The initial delay is 0.
    pub fn with_capacity(capacity: usize) -> Self {
        let len = capacity.max(1);
        Self {
            left: vec![0.0; len],
            right: vec![0.0; len],
            write_pos: 0,
            delay_samples: 0,
        }
    }

    /// Largest delay this line can apply.
    pub fn capacity(&self) -> usize {
        self.left.len()
    }

    /// Current delay in samples.
    pub fn delay_samples(&self) -> usize {
        self.delay_samples
    }

    /// Sets the delay, clamped to [`capacity`](Self::capacity).
    ///
    /// The line is cleared whenever the length actually changes. Returns the
    /// applied delay.
    pub fn set_delay(&mut self, samples: usize) -> usize {
        let samples = samples.min(self.capacity());
        if samples != self.delay_samples {
            #[cfg(feature = "tracing")]
            tracing::debug!(
                from = self.delay_samples,
                to = samples,
                capacity = self.capacity(),
                "lookahead length changed"
            );
            self.delay_samples = samples;
            self.clear();
        }
        self.delay_samples
    }

    /// Zeroes the line and rewinds the write position.
    pub fn clear(&mut self) {
        self.left.fill(0.0);
        self.right.fill(0.0);
        self.write_pos = 0;
    }

    /// Pushes one stereo sample and returns the one from `delay_samples` ago.
    #[inline]
    pub fn process(&mut self, left_in: f32, right_in: f32) -> (f32, f32) {
        if self.delay_samples == 0 {
            return (left_in, right_in);
        }
        let out_l = self.left[self.write_pos];
        let out_r = self.right[self.write_pos];
        self.left[self.write_pos] = left_in;
        self.right[self.write_pos] = right_in;
        self.write_pos += 1;
        if self.write_pos >= self.delay_samples {
            self.write_pos = 0;
        }
        (out_l, out_r)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_delay_passthrough() {
        let mut delay = LookaheadDelay::with_capacity(16);
        assert_eq!(delay.process(0.3, -0.7), (0.3, -0.7));
    }

    #[test]
    fn test_exact_delay() {
        let mut delay = LookaheadDelay::with_capacity(16);
        delay.set_delay(5);
        let outputs: Vec<f32> = (1..=12).map(|i| delay.process(i as f32, 0.0).0).collect();
        assert_eq!(&outputs[..5], &[0.0; 5]);
        assert_eq!(&outputs[5..], &[1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0]);
    }

    #[test]
    fn test_set_delay_clamps_and_clears() {
        let mut delay = LookaheadDelay::with_capacity(4);
        assert_eq!(delay.set_delay(100), 4);
        delay.process(1.0, 1.0);
        delay.set_delay(2);
        assert_eq!(delay.process(9.0, 9.0), (0.0, 0.0));
        assert_eq!(delay.process(9.0, 9.0), (0.0, 0.0));
        assert_eq!(delay.process(0.0, 0.0), (9.0, 9.0));
    }

    #[test]
    fn test_same_delay_keeps_contents() {
        let mut delay = LookaheadDelay::with_capacity(4);
        delay.set_delay(1);
        delay.process(5.0, 5.0);
        delay.set_delay(1);
        assert_eq!(delay.process(0.0, 0.0), (5.0, 5.0));
    }
}
