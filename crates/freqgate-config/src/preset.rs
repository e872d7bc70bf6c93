//! Gate preset file format and operations.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

use freqgate_effects::{GateParam, GateParams, GateSettings};

use crate::error::ConfigError;
use crate::validation::{ParamValue, label_for, resolve_param, resolve_value};

/// A named gate configuration.
///
/// Parameters are keyed by string id. Missing parameters keep their
/// defaults; unknown keys and out-of-range values are rejected when the
/// preset is resolved.
///
/// # TOML Format
///
/// ```toml
/// name = "Voice"
/// description = "Speech band, medium threshold"
///
/// [params]
/// freq_low = 120.0
/// freq_high = 4000.0
/// threshold = -38.0
/// detection = "Trimmed Mean"
/// fft_size = "1024"
/// ```
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct GatePreset {
    /// Name of the preset.
    pub name: String,

    /// Optional description of the preset.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Parameter values keyed by string id.
    #[serde(default)]
    pub params: BTreeMap<String, ParamValue>,
}

impl GatePreset {
    /// Create a new empty preset.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: None,
            params: BTreeMap::new(),
        }
    }

    /// Create a preset with a description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Set one parameter value.
    pub fn with_param(mut self, key: impl Into<String>, value: impl Into<ParamValue>) -> Self {
        self.params.insert(key.into(), value.into());
        self
    }

    /// Capture every value of `settings`, writing enums by label.
    pub fn from_settings(name: impl Into<String>, settings: &GateSettings) -> Self {
        let mut preset = Self::new(name);
        for (param, value) in GateParam::ALL.into_iter().zip(settings.to_values()) {
            let value = label_for(param, value)
                .map_or(ParamValue::Number(value), ParamValue::from);
            preset
                .params
                .insert(param.descriptor().string_id.to_string(), value);
        }
        preset
    }

    /// Load a preset from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content =
            std::fs::read_to_string(path).map_err(|e| ConfigError::read_file(path, e))?;
        Self::from_toml(&content)
    }

    /// Load a preset from a TOML string.
    pub fn from_toml(toml_str: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(toml_str)?)
    }

    /// Save the preset to a TOML file.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        let path = path.as_ref();

        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
            && !parent.exists()
        {
            std::fs::create_dir_all(parent).map_err(|e| ConfigError::create_dir(parent, e))?;
        }

        let content = self.to_toml()?;
        std::fs::write(path, content).map_err(|e| ConfigError::write_file(path, e))?;
        Ok(())
    }

    /// Convert the preset to a TOML string.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Validated `(parameter, value)` pairs in key order.
    pub fn resolve(&self) -> Result<Vec<(GateParam, f32)>, ConfigError> {
        self.params
            .iter()
            .map(|(key, value)| {
                let param = resolve_param(key)?;
                Ok((param, resolve_value(param, value)?))
            })
            .collect()
    }

    /// Defaults overridden by this preset's values.
    pub fn to_settings(&self) -> Result<GateSettings, ConfigError> {
        let mut values = GateSettings::default().to_values();
        for (param, value) in self.resolve()? {
            values[param.index()] = value;
        }
        Ok(GateSettings::from_values(&values))
    }

    /// Validates the preset and writes it into a live parameter store.
    ///
    /// Nothing is written if any value is invalid.
    pub fn apply_to(&self, params: &GateParams) -> Result<(), ConfigError> {
        let settings = self.to_settings()?;
        params.apply(&settings);
        Ok(())
    }
}

impl Default for GatePreset {
    fn default() -> Self {
        Self::new("Untitled")
    }
}
