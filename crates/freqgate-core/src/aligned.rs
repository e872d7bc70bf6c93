//! 64-byte aligned, fallibly allocated sample buffers.
//!
//! Transform buffers are over-allocated by up to one cache line and viewed
//! through an offset that lands on a 64-byte boundary. The storage is a
//! plain `Vec` that is never grown after construction, so the view stays
//! aligned for the buffer's lifetime and is released on drop.
//!
//! Allocation goes through `try_reserve_exact`, so an out-of-memory
//! condition surfaces as [`AllocError`] instead of aborting.

#[cfg(not(feature = "std"))]
use alloc::vec::Vec;

use core::fmt;

/// Alignment in bytes guaranteed by [`AlignedBuffer`].
pub const ALIGNMENT: usize = 64;

/// Failure to allocate an [`AlignedBuffer`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AllocError {
    /// Number of elements that was requested.
    pub requested: usize,
}

impl fmt::Display for AllocError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "failed to allocate {}-byte aligned buffer of {} elements",
            ALIGNMENT, self.requested
        )
    }
}

#[cfg(feature = "std")]
impl std::error::Error for AllocError {}

/// Heap buffer whose visible slice starts on a 64-byte boundary.
///
/// # Example
///
/// ```rust
/// use freqgate_core::AlignedBuffer;
///
/// let mut buf = AlignedBuffer::<f32>::new(1024).unwrap();
/// assert_eq!(buf.len(), 1024);
/// assert!(buf.is_aligned());
/// buf.as_mut_slice()[0] = 1.0;
/// assert_eq!(buf.as_slice()[0], 1.0);
/// ```
#[derive(Debug)]
pub struct AlignedBuffer<T> {
    storage: Vec<T>,
    offset: usize,
    len: usize,
}

impl<T: Copy + Default> AlignedBuffer<T> {
    /// Allocates a zeroed (default-filled) buffer of `len` elements.
    ///
    /// `size_of::<T>()` must divide [`ALIGNMENT`]; the aligned offset is
    /// counted in whole elements, so other element sizes are rejected with
    /// [`AllocError`] like a failed allocation.
    pub fn new(len: usize) -> Result<Self, AllocError> {
        let size = core::mem::size_of::<T>().max(1);
        if ALIGNMENT % size != 0 {
            return Err(alloc_failed(len));
        }
        let slack = (ALIGNMENT / core::mem::align_of::<T>()).saturating_sub(1);
        let total = len.checked_add(slack).ok_or_else(|| alloc_failed(len))?;

        let mut storage = Vec::new();
        storage
            .try_reserve_exact(total)
            .map_err(|_| alloc_failed(len))?;
        storage.resize(total, T::default());

        let offset = storage.as_ptr().align_offset(ALIGNMENT);
        if offset > slack {
            return Err(alloc_failed(len));
        }

        Ok(Self {
            storage,
            offset,
            len,
        })
    }
}

fn alloc_failed(requested: usize) -> AllocError {
    #[cfg(feature = "tracing")]
    tracing::warn!(requested, alignment = ALIGNMENT, "aligned buffer allocation failed");
    AllocError { requested }
}

impl<T> AlignedBuffer<T> {
    /// Number of visible elements.
    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns `true` if the buffer holds no elements.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// The aligned view.
    #[inline]
    pub fn as_slice(&self) -> &[T] {
        &self.storage[self.offset..self.offset + self.len]
    }

    /// The aligned view, mutably.
    #[inline]
    pub fn as_mut_slice(&mut self) -> &mut [T] {
        &mut self.storage[self.offset..self.offset + self.len]
    }

    /// Returns `true` if the view starts on an [`ALIGNMENT`] boundary.
    pub fn is_aligned(&self) -> bool {
        self.as_slice().as_ptr().addr() % ALIGNMENT == 0
    }
}

impl<T: Copy> AlignedBuffer<T> {
    /// Overwrites every visible element with `value`.
    pub fn fill(&mut self, value: T) {
        self.as_mut_slice().fill(value);
    }
}
