//! Doubled circular buffer for overlapping analysis frames.
//!
//! Each incoming sample is written twice, at `pos` and `pos + N`, into a
//! buffer of length `2N`. The most recent `N` samples are then always the
//! contiguous slice `[pos, pos + N)`, oldest first, so a frame can be
//! handed to the transform without wraparound handling or a copy.

use crate::aligned::{AlignedBuffer, AllocError};

/// Stereo doubled ring holding the last `frame_len` samples per channel.
///
/// ```rust
/// use freqgate_core::FrameRing;
///
/// let mut ring = FrameRing::new(4).unwrap();
/// for i in 1..=6 {
///     ring.push(i as f32, -(i as f32));
/// }
/// let (left, right) = ring.frame();
/// assert_eq!(left, &[3.0, 4.0, 5.0, 6.0]);
/// assert_eq!(right, &[-3.0, -4.0, -5.0, -6.0]);
/// ```
#[derive(Debug)]
pub struct FrameRing {
    left: AlignedBuffer<f32>,
    right: AlignedBuffer<f32>,
    frame_len: usize,
    pos: usize,
}

impl FrameRing {
    /// Allocates a zeroed ring for frames of `frame_len` samples.
    pub fn new(frame_len: usize) -> Result<Self, AllocError> {
        let doubled = frame_len
            .checked_mul(2)
            .ok_or(AllocError { requested: frame_len })?;
        Ok(Self {
            left: AlignedBuffer::new(doubled)?,
            right: AlignedBuffer::new(doubled)?,
            frame_len,
            pos: 0,
        })
    }

    /// Frame length `N`.
    #[inline]
    pub fn frame_len(&self) -> usize {
        self.frame_len
    }

    /// Current write position in `[0, N)`.
    #[inline]
    pub fn position(&self) -> usize {
        self.pos
    }

    /// Appends one stereo sample.
    #[inline]
    pub fn push(&mut self, left: f32, right: f32) {
        if self.frame_len == 0 {
            return;
        }
        let mirror = self.pos + self.frame_len;
        let l = self.left.as_mut_slice();
        l[self.pos] = left;
        l[mirror] = left;
        let r = self.right.as_mut_slice();
        r[self.pos] = right;
        r[mirror] = right;
        self.pos += 1;
        if self.pos == self.frame_len {
            self.pos = 0;
        }
    }

    /// The most recent `N` samples per channel, oldest first.
    #[inline]
    pub fn frame(&self) -> (&[f32], &[f32]) {
        let range = self.pos..self.pos + self.frame_len;
        (
            &self.left.as_slice()[range.clone()],
            &self.right.as_slice()[range],
        )
    }

    /// Zeroes the contents and rewinds the write position.
    pub fn reset(&mut self) {
        self.left.fill(0.0);
        self.right.fill(0.0);
        self.pos = 0;
    }
}
