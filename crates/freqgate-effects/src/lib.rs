//! FreqGate Effects - the frequency-selective noise gate engine.
//!
//! - [`FrequencyGate`] - stereo engine: band detection, gate, lookahead
//! - [`GateStateMachine`] - hysteresis, hold and attack/release envelope
//! - [`GateParams`] - lock-free parameter store shared with control threads
//!
//! ## Example
//!
//! ```rust
//! use freqgate_core::Effect;
//! use freqgate_effects::{DetectionMethod, FrequencyGate, GateParam};
//!
//! let mut gate = FrequencyGate::new(48000.0);
//! let params = gate.params().clone();
//!
//! // from a UI or automation thread
//! params.set(GateParam::FreqLow, 150.0);
//! params.set(GateParam::FreqHigh, 3000.0);
//! params.set(GateParam::Detection, DetectionMethod::Rms.index() as f32);
//!
//! let input_l = vec![0.0_f32; 512];
//! let input_r = vec![0.0_f32; 512];
//! let mut out_l = vec![0.0_f32; 512];
//! let mut out_r = vec![0.0_f32; 512];
//! gate.process_block_stereo(&input_l, &input_r, &mut out_l, &mut out_r);
//! assert_eq!(gate.settings().freq_low_hz, 150.0);
//! ```

pub mod frequency_gate;
pub mod gate;
pub mod info;
pub mod params;

pub use frequency_gate::{DetectorStatus, FrequencyGate};
pub use gate::GateStateMachine;
pub use info::{DEFAULT_SAMPLE_RATE, PLUGIN_INFO, PluginInfo};
pub use params::{
    FftSize, GateParam, GateParams, GateSettings, MAX_PREOPEN_MS, PARAM_COUNT, PARAM_ID_BASE,
};

pub use freqgate_analysis::DetectionMethod;
