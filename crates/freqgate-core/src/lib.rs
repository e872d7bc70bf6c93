//! freqgate Core - DSP primitives for the frequency-selective gate
//!
//! Building blocks shared by the analysis and gating crates, designed for
//! real-time use with no allocation in the audio path.
//!
//! # Contents
//!
//! - [`Effect`] - stereo processing trait implemented by the gate
//! - [`ParameterInfo`] / [`ParamDescriptor`] - flat, ranged parameter surface
//! - [`AlignedBuffer`] - 64-byte aligned, fallibly allocated buffers
//! - [`FrameRing`] - doubled circular buffer yielding contiguous frames
//! - [`LookaheadDelay`] - fixed-capacity stereo delay with adjustable length
//! - Level and time conversions: [`db_to_linear`], [`linear_to_db`],
//!   [`time_constant_coeff`], [`ms_to_samples_rounded`]
//!
//! # no_std Support
//!
//! Disable the default `std` feature to build for embedded targets:
//!
//! ```toml
//! [dependencies]
//! freqgate-core = { version = "1", default-features = false }
//! ```

#![cfg_attr(not(feature = "std"), no_std)]

#[cfg(not(feature = "std"))]
extern crate alloc;

pub mod aligned;
pub mod delay;
pub mod effect;
pub mod math;
pub mod param_info;
pub mod ring;

pub use aligned::{ALIGNMENT, AlignedBuffer, AllocError};
pub use delay::LookaheadDelay;
pub use effect::Effect;
pub use math::{
    LINEAR_EPSILON, SILENCE_FLOOR_DB, db_to_linear, linear_to_db, mono_sum, ms_to_samples,
    ms_to_samples_rounded, samples_to_ms, time_constant_coeff,
};
pub use param_info::{ParamDescriptor, ParamFlags, ParamId, ParamScale, ParamUnit, ParameterInfo};
pub use ring::FrameRing;
