//! Resolving preset keys and values against the gate's parameter table.
//!
//! Keys are matched against each parameter's string id, display name or
//! short name. Values are numbers in the parameter's unit, or for the two
//! enumerated parameters one of their labels (`"median"`, `"1024"`, ...).
//! Out-of-range numbers are rejected rather than clamped so a typo in a
//! preset file does not silently turn into a different setting.

use std::fmt;

use freqgate_core::ParamDescriptor;
use freqgate_effects::GateParam;
use serde::{Deserialize, Serialize};

use crate::ConfigError;

/// A parameter value as written in a preset file or on the command line.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ParamValue {
    /// Plain value in the parameter's unit (or enum index).
    Number(f32),
    /// Enum label.
    Label(String),
}

impl From<f32> for ParamValue {
    fn from(value: f32) -> Self {
        ParamValue::Number(value)
    }
}

impl From<&str> for ParamValue {
    fn from(value: &str) -> Self {
        ParamValue::Label(value.to_string())
    }
}

impl fmt::Display for ParamValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParamValue::Number(v) => write!(f, "{v}"),
            ParamValue::Label(s) => f.write_str(s),
        }
    }
}

impl ParamValue {
    /// Parses a command-line value: a number if it parses as one, a label
    /// otherwise.
    pub fn parse(s: &str) -> Self {
        let s = s.trim();
        s.parse::<f32>()
            .map_or_else(|_| ParamValue::Label(s.to_string()), ParamValue::Number)
    }
}

/// Looks up a parameter by string id, name or short name.
pub fn resolve_param(key: &str) -> Result<GateParam, ConfigError> {
    GateParam::find(key.trim()).ok_or_else(|| ConfigError::UnknownParameter(key.to_string()))
}

/// Validates `value` for `param` and returns the plain value.
pub fn resolve_value(param: GateParam, value: &ParamValue) -> Result<f32, ConfigError> {
    let desc = param.descriptor();
    match value {
        // enum params also accept their label as a bare number: fft_size = 1024
        ParamValue::Number(v) => validate_number(&desc, *v).or_else(|err| {
            if desc.labels.is_empty() {
                Err(err)
            } else {
                resolve_label(&desc, &v.to_string()).map_err(|_| err)
            }
        }),
        ParamValue::Label(label) => resolve_label(&desc, label),
    }
}

/// Parses a `key=value` assignment into a parameter and validated value.
///
/// ```rust
/// use freqgate_config::parse_assignment;
/// use freqgate_effects::GateParam;
///
/// assert_eq!(parse_assignment("threshold=-42").unwrap(), (GateParam::Threshold, -42.0));
/// assert_eq!(parse_assignment("detection=median").unwrap(), (GateParam::Detection, 2.0));
/// assert!(parse_assignment("threshold=12").is_err());
/// ```
pub fn parse_assignment(s: &str) -> Result<(GateParam, f32), ConfigError> {
    let (key, value) = s
        .split_once('=')
        .ok_or_else(|| ConfigError::MalformedAssignment(s.to_string()))?;
    let param = resolve_param(key)?;
    let value = resolve_value(param, &ParamValue::parse(value))?;
    Ok((param, value))
}

fn validate_number(desc: &ParamDescriptor, value: f32) -> Result<f32, ConfigError> {
    if !value.is_finite() {
        return Err(ConfigError::invalid_value(desc.string_id, value, "not a finite number"));
    }
    if value < desc.min {
        return Err(ConfigError::invalid_value(
            desc.string_id,
            value,
            format!("below minimum {}", desc.min),
        ));
    }
    if value > desc.max {
        return Err(ConfigError::invalid_value(
            desc.string_id,
            value,
            format!("above maximum {}", desc.max),
        ));
    }
    if desc.is_stepped() && value.fract() != 0.0 {
        return Err(ConfigError::invalid_value(
            desc.string_id,
            value,
            "expected a whole number",
        ));
    }
    Ok(value)
}

fn resolve_label(desc: &ParamDescriptor, label: &str) -> Result<f32, ConfigError> {
    let wanted = label.trim();
    desc.labels
        .iter()
        .position(|l| {
            l.eq_ignore_ascii_case(wanted)
                || l.split_whitespace()
                    .next()
                    .is_some_and(|first| first.eq_ignore_ascii_case(wanted))
                || l.replace(' ', "_").eq_ignore_ascii_case(wanted)
        })
        .map(|i| i as f32)
        .ok_or_else(|| {
            let reason = if desc.labels.is_empty() {
                "expected a number".to_string()
            } else {
                format!("expected one of: {}", desc.labels.join(", "))
            };
            ConfigError::invalid_value(desc.string_id, wanted, reason)
        })
}

/// Label written to presets for an enumerated value, if the parameter has
/// labels.
pub fn label_for(param: GateParam, value: f32) -> Option<&'static str> {
    param.descriptor().label(value)
}
