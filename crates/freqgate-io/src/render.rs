//! Offline block rendering of a stereo effect over a whole buffer.

use freqgate_core::Effect;

use crate::StereoSamples;

/// Options for [`render`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderOptions {
    /// Samples per processing block (minimum 1).
    pub block_size: usize,
    /// Drop the effect's reported latency from the head of the output and
    /// feed the same amount of silence at the tail, so the output lines up
    /// with the input sample for sample.
    pub compensate_latency: bool,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            block_size: 512,
            compensate_latency: false,
        }
    }
}

/// Runs `effect` over `input` in blocks of `options.block_size`.
///
/// The output has the same length as the input. `progress` is called after
/// every block with the number of input frames consumed so far.
pub fn render<E: Effect + ?Sized>(
    effect: &mut E,
    input: &StereoSamples,
    options: &RenderOptions,
    mut progress: impl FnMut(usize),
) -> StereoSamples {
    let block_size = options.block_size.max(1);
    let len = input.len();

    // an empty block applies pending parameter changes before latency is read
    if options.compensate_latency {
        let mut l = [0.0_f32; 0];
        let mut r = [0.0_f32; 0];
        effect.process_block_stereo_inplace(&mut l, &mut r);
    }
    let skip = if options.compensate_latency {
        effect.latency_samples()
    } else {
        0
    };
    let total = len + skip;

    tracing::debug!(frames = len, block_size, latency_skip = skip, "rendering");

    let mut left = vec![0.0_f32; total];
    let mut right = vec![0.0_f32; total];
    left[..len].copy_from_slice(&input.left);
    right[..len].copy_from_slice(&input.right);

    let mut done = 0;
    for (l, r) in left
        .chunks_mut(block_size)
        .zip(right.chunks_mut(block_size))
    {
        effect.process_block_stereo_inplace(l, r);
        done += l.len();
        progress(done.min(len));
    }

    left.drain(..skip);
    right.drain(..skip);
    StereoSamples::new(left, right)
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Pure delay with a reported latency.
    struct Delay {
        line: Vec<(f32, f32)>,
        pos: usize,
    }

    impl Delay {
        fn new(samples: usize) -> Self {
            Self {
                line: vec![(0.0, 0.0); samples],
                pos: 0,
            }
        }
    }

    impl Effect for Delay {
        fn process_stereo(&mut self, left: f32, right: f32) -> (f32, f32) {
            let out = self.line[self.pos];
            self.line[self.pos] = (left, right);
            self.pos = (self.pos + 1) % self.line.len();
            out
        }
        fn set_sample_rate(&mut self, _: f32) {}
        fn reset(&mut self) {}
        fn latency_samples(&self) -> usize {
            self.line.len()
        }
    }

    fn input(len: usize) -> StereoSamples {
        let left: Vec<f32> = (0..len).map(|i| i as f32).collect();
        let right: Vec<f32> = left.iter().map(|x| -x).collect();
        StereoSamples::new(left, right)
    }

    #[test]
    fn test_without_compensation_output_is_delayed() {
        let mut fx = Delay::new(10);
        let out = render(&mut fx, &input(100), &RenderOptions::default(), |_| {});
        assert_eq!(out.len(), 100);
        assert_eq!(out.left[10], 0.0);
        assert_eq!(out.left[11], 1.0);
        assert_eq!(out.right[99], -89.0);
    }

    #[test]
    fn test_compensation_realigns_output() {
        let mut fx = Delay::new(37);
        let options = RenderOptions {
            block_size: 16,
            compensate_latency: true,
        };
        let src = input(100);
        let out = render(&mut fx, &src, &options, |_| {});
        assert_eq!(out, src);
    }

    #[test]
    fn test_progress_reaches_input_length() {
        let mut fx = Delay::new(5);
        let mut calls = Vec::new();
        let options = RenderOptions {
            block_size: 30,
            compensate_latency: true,
        };
        render(&mut fx, &input(100), &options, |n| calls.push(n));
        assert_eq!(calls, vec![30, 60, 90, 100]);
    }

    #[test]
    fn test_zero_block_size_is_treated_as_one() {
        let mut fx = Delay::new(1);
        let options = RenderOptions {
            block_size: 0,
            compensate_latency: false,
        };
        let out = render(&mut fx, &input(8), &options, |_| {});
        assert_eq!(out.left, vec![0.0, 0.0, 1.0, 2.0, 3.0, 4.0, 5.0, 6.0]);
    }
}
