//! Presets and parameter configuration for the freqgate noise gate.
//!
//! # Features
//!
//! - **Presets**: load and save gate settings as TOML, keyed by parameter
//!   string id (`freq_low`, `threshold`, `detection`, ...)
//! - **Validation**: unknown keys and out-of-range values are rejected, enum
//!   parameters accept their labels
//! - **Paths**: platform-specific user preset directory
//! - **Factory Presets**: `voice`, `podcast`, `music-bleed`, `low-latency`
//!
//! # Example
//!
//! ```rust,no_run
//! use freqgate_config::{GatePreset, load_preset, user_presets_dir};
//! use freqgate_effects::FrequencyGate;
//!
//! let gate = FrequencyGate::new(48000.0);
//! load_preset("podcast").unwrap().apply_to(gate.params()).unwrap();
//!
//! let mine = GatePreset::from_settings("Mine", gate.settings());
//! mine.save(user_presets_dir().join("mine.toml")).unwrap();
//! ```

mod error;
mod preset;

/// Preset lookup and platform-specific paths.
pub mod paths;

/// Key and value validation against the parameter table.
pub mod validation;

/// Factory presets bundled with the library.
pub mod factory_presets;

pub use error::ConfigError;
pub use factory_presets::{FACTORY_PRESET_NAMES, factory_preset, factory_presets, is_factory_preset};
pub use paths::{
    find_preset, list_user_presets, load_preset, preset_file_name, user_presets_dir,
};
pub use preset::GatePreset;
pub use validation::{ParamValue, label_for, parse_assignment, resolve_param, resolve_value};
