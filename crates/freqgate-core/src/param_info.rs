//! Parameter introspection for the gate's flat parameter surface.
//!
//! Every control the gate exposes is a single `f32` with a declared range,
//! described by a [`ParamDescriptor`]. Enumerated controls (detection method,
//! FFT size) are stepped floats whose integer value indexes into
//! [`ParamDescriptor::labels`].
//!
//! Descriptors also carry:
//!
//! - [`ParamId`] — stable numeric ID for host automation and presets
//! - [`ParamScale`] — normalization curve (linear or logarithmic)
//! - [`ParamFlags`] — capability flags (automatable, stepped)
//! - `string_id` — stable symbol used as the preset key
//!
//! # Example
//!
//! ```rust
//! use freqgate_core::{ParameterInfo, ParamDescriptor, ParamId};
//!
//! struct Trim {
//!     gain_db: f32,
//! }
//!
//! impl ParameterInfo for Trim {
//!     fn param_count(&self) -> usize { 1 }
//!
//!     fn param_info(&self, index: usize) -> Option<ParamDescriptor> {
//!         match index {
//!             0 => Some(ParamDescriptor::gain_db("Trim", "Trim", -24.0, 24.0, 0.0)
//!                 .with_id(ParamId(10), "trim")),
//!             _ => None,
//!         }
//!     }
//!
//!     fn get_param(&self, index: usize) -> f32 {
//!         if index == 0 { self.gain_db } else { 0.0 }
//!     }
//!
//!     fn set_param(&mut self, index: usize, value: f32) {
//!         if let Some(desc) = self.param_info(index) {
//!             self.gain_db = desc.clamp(value);
//!         }
//!     }
//! }
//! ```

/// Scaling curve for parameter normalization.
///
/// - **Linear**: `normalized = (value - min) / (max - min)`
/// - **Logarithmic**: `normalized = ln(value/min) / ln(max/min)`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ParamScale {
    /// Linear mapping (default).
    #[default]
    Linear,
    /// Logarithmic mapping, more resolution at low values. Requires `min > 0`.
    Logarithmic,
}

/// Stable parameter identifier that survives reordering.
///
/// Once assigned, a `ParamId` must never change for a given parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ParamId(pub u32);

/// Parameter capability flags.
///
/// ```rust
/// use freqgate_core::ParamFlags;
///
/// let flags = ParamFlags::AUTOMATABLE.union(ParamFlags::STEPPED);
/// assert!(flags.contains(ParamFlags::STEPPED));
/// assert!(!ParamFlags::AUTOMATABLE.contains(ParamFlags::STEPPED));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParamFlags(u8);

impl ParamFlags {
    /// Host can automate this parameter.
    pub const AUTOMATABLE: Self = Self(1 << 0);
    /// Parameter has discrete integer steps.
    pub const STEPPED: Self = Self(1 << 1);

    /// Returns `true` if all bits in `other` are set in `self`.
    #[inline]
    pub const fn contains(self, other: Self) -> bool {
        self.0 & other.0 == other.0
    }

    /// Returns the union of two flag sets.
    #[inline]
    pub const fn union(self, other: Self) -> Self {
        Self(self.0 | other.0)
    }
}

impl Default for ParamFlags {
    fn default() -> Self {
        Self::AUTOMATABLE
    }
}

/// Trait for processors that expose introspectable parameters.
///
/// Parameters are addressed by a zero-based index that is stable for the
/// lifetime of the instance. Setters clamp to the declared range and ignore
/// out-of-range indices.
pub trait ParameterInfo {
    /// Number of parameters. Valid indices are `0..param_count()`.
    fn param_count(&self) -> usize;

    /// Descriptor for the parameter at `index`, or `None` if out of range.
    fn param_info(&self, index: usize) -> Option<ParamDescriptor>;

    /// Current value of the parameter at `index` (`0.0` if out of range).
    fn get_param(&self, index: usize) -> f32;

    /// Sets the parameter at `index`, clamped to its declared range.
    fn set_param(&mut self, index: usize, value: f32);

    /// Find a parameter index by name (case-insensitive).
    ///
    /// Matches the display name, the short name and the string id.
    fn find_param_by_name(&self, name: &str) -> Option<usize> {
        (0..self.param_count()).find(|&i| {
            self.param_info(i).is_some_and(|desc| {
                desc.name.eq_ignore_ascii_case(name)
                    || desc.short_name.eq_ignore_ascii_case(name)
                    || desc.string_id.eq_ignore_ascii_case(name)
            })
        })
    }

    /// Returns the stable [`ParamId`] for the parameter at `index`.
    fn param_id(&self, index: usize) -> Option<ParamId> {
        self.param_info(index).map(|d| d.id)
    }

    /// Finds a parameter index by its stable [`ParamId`].
    ///
    /// Scans all parameters (O(n)), suitable for setup paths, not audio.
    fn param_index_by_id(&self, id: ParamId) -> Option<usize> {
        (0..self.param_count()).find(|&i| self.param_info(i).is_some_and(|d| d.id == id))
    }
}

/// Describes a single parameter's metadata for display and validation.
///
/// ```rust
/// use freqgate_core::{ParamDescriptor, ParamId};
///
/// let hold = ParamDescriptor::time_ms("Hold", "Hold", 0.0, 500.0, 50.0)
///     .with_id(ParamId(6), "hold");
/// assert_eq!(hold.clamp(900.0), 500.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ParamDescriptor {
    /// Full parameter name for display (e.g. "Freq Low").
    pub name: &'static str,

    /// Short name for compact displays, max 8 characters.
    pub short_name: &'static str,

    /// Unit type for formatting the parameter value.
    pub unit: ParamUnit,

    /// Minimum allowed value.
    pub min: f32,

    /// Maximum allowed value.
    pub max: f32,

    /// Default value.
    pub default: f32,

    /// Recommended step increment for encoder-style control.
    pub step: f32,

    /// Stable numeric ID. Default: `ParamId(0)` (unassigned).
    pub id: ParamId,

    /// Stable symbol for presets and serialization. Default: `""`.
    pub string_id: &'static str,

    /// Normalization curve.
    pub scale: ParamScale,

    /// Capability flags.
    pub flags: ParamFlags,

    /// Value labels for stepped parameters, indexed by `value - min`.
    ///
    /// Empty for continuous parameters.
    pub labels: &'static [&'static str],
}

impl ParamDescriptor {
    /// Frequency parameter in Hz with logarithmic scaling.
    pub fn frequency_hz(
        name: &'static str,
        short_name: &'static str,
        min: f32,
        max: f32,
        default: f32,
    ) -> Self {
        Self {
            name,
            short_name,
            unit: ParamUnit::Hertz,
            min,
            max,
            default,
            step: 1.0,
            id: ParamId(0),
            string_id: "",
            scale: ParamScale::Logarithmic,
            flags: ParamFlags::AUTOMATABLE,
            labels: &[],
        }
    }

    /// Time parameter in milliseconds.
    pub fn time_ms(
        name: &'static str,
        short_name: &'static str,
        min: f32,
        max: f32,
        default: f32,
    ) -> Self {
        Self {
            name,
            short_name,
            unit: ParamUnit::Milliseconds,
            min,
            max,
            default,
            step: 1.0,
            id: ParamId(0),
            string_id: "",
            scale: ParamScale::Linear,
            flags: ParamFlags::AUTOMATABLE,
            labels: &[],
        }
    }

    /// Level parameter in decibels.
    pub fn gain_db(
        name: &'static str,
        short_name: &'static str,
        min: f32,
        max: f32,
        default: f32,
    ) -> Self {
        Self {
            name,
            short_name,
            unit: ParamUnit::Decibels,
            min,
            max,
            default,
            step: 0.5,
            id: ParamId(0),
            string_id: "",
            scale: ParamScale::Linear,
            flags: ParamFlags::AUTOMATABLE,
            labels: &[],
        }
    }

    /// Stepped parameter selecting one of `labels`, ranging `0..labels.len()`.
    pub fn enumerated(
        name: &'static str,
        short_name: &'static str,
        labels: &'static [&'static str],
        default: usize,
    ) -> Self {
        Self {
            name,
            short_name,
            unit: ParamUnit::None,
            min: 0.0,
            max: labels.len().saturating_sub(1) as f32,
            default: default as f32,
            step: 1.0,
            id: ParamId(0),
            string_id: "",
            scale: ParamScale::Linear,
            flags: ParamFlags::AUTOMATABLE.union(ParamFlags::STEPPED),
            labels,
        }
    }

    /// Sets the stable parameter ID and string ID.
    ///
    /// ```rust
    /// use freqgate_core::{ParamDescriptor, ParamId};
    ///
    /// let desc = ParamDescriptor::gain_db("Range", "Range", -96.0, 0.0, -96.0)
    ///     .with_id(ParamId(1909), "range");
    /// assert_eq!(desc.id, ParamId(1909));
    /// assert_eq!(desc.string_id, "range");
    /// ```
    pub const fn with_id(mut self, id: ParamId, string_id: &'static str) -> Self {
        self.id = id;
        self.string_id = string_id;
        self
    }

    /// Sets the normalization scale.
    pub const fn with_scale(mut self, scale: ParamScale) -> Self {
        self.scale = scale;
        self
    }

    /// Sets the recommended step increment.
    pub const fn with_step(mut self, step: f32) -> Self {
        self.step = step;
        self
    }

    /// Returns `true` for stepped (enumerated) parameters.
    #[inline]
    pub fn is_stepped(&self) -> bool {
        self.flags.contains(ParamFlags::STEPPED)
    }

    /// Clamps a value to this parameter's valid range.
    ///
    /// Stepped parameters are also rounded to the nearest step. NaN maps to
    /// the default.
    ///
    /// ```rust
    /// use freqgate_core::ParamDescriptor;
    ///
    /// let desc = ParamDescriptor::gain_db("Threshold", "Thresh", -96.0, 0.0, -30.0);
    /// assert_eq!(desc.clamp(-30.0), -30.0);
    /// assert_eq!(desc.clamp(-200.0), -96.0);
    /// assert_eq!(desc.clamp(6.0), 0.0);
    /// assert_eq!(desc.clamp(f32::NAN), -30.0);
    /// ```
    #[inline]
    pub fn clamp(&self, value: f32) -> f32 {
        if value.is_nan() {
            return self.default;
        }
        let value = if self.is_stepped() {
            libm::roundf(value)
        } else {
            value
        };
        if value < self.min {
            self.min
        } else if value > self.max {
            self.max
        } else {
            value
        }
    }

    /// Returns `true` if `value` lies within `[min, max]`.
    #[inline]
    pub fn contains(&self, value: f32) -> bool {
        value >= self.min && value <= self.max
    }

    /// Label for a stepped value, or `None` for continuous parameters.
    ///
    /// ```rust
    /// use freqgate_core::ParamDescriptor;
    ///
    /// let desc = ParamDescriptor::enumerated("Mode", "Mode", &["Soft", "Hard"], 0);
    /// assert_eq!(desc.label(1.0), Some("Hard"));
    /// assert_eq!(desc.label(7.0), Some("Hard"));
    /// ```
    pub fn label(&self, value: f32) -> Option<&'static str> {
        if self.labels.is_empty() {
            return None;
        }
        let index = (self.clamp(value) - self.min) as usize;
        self.labels.get(index).copied()
    }

    /// Converts a plain value to normalized range (0.0 to 1.0).
    ///
    /// ```rust
    /// use freqgate_core::ParamDescriptor;
    ///
    /// let desc = ParamDescriptor::frequency_hz("Freq", "Freq", 20.0, 20000.0, 100.0);
    /// assert_eq!(desc.normalize(20.0), 0.0);
    /// assert!((desc.normalize(20000.0) - 1.0).abs() < 1e-6);
    /// ```
    #[inline]
    pub fn normalize(&self, value: f32) -> f32 {
        let range = self.max - self.min;
        if range == 0.0 {
            return 0.0;
        }
        match self.scale {
            ParamScale::Linear => (value - self.min) / range,
            ParamScale::Logarithmic => {
                if self.min <= 0.0 || value <= 0.0 {
                    return 0.0;
                }
                libm::logf(value / self.min) / libm::logf(self.max / self.min)
            }
        }
    }

    /// Converts a normalized value (0.0 to 1.0) to the actual parameter range.
    ///
    /// Inverse of [`normalize`](Self::normalize).
    #[inline]
    pub fn denormalize(&self, normalized: f32) -> f32 {
        match self.scale {
            ParamScale::Linear => self.min + normalized * (self.max - self.min),
            ParamScale::Logarithmic => {
                if self.min <= 0.0 {
                    return self.min;
                }
                self.min * libm::powf(self.max / self.min, normalized)
            }
        }
    }
}

/// Unit type for parameter display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ParamUnit {
    /// Decibels (dB) - threshold, hysteresis, range.
    Decibels,
    /// Hertz (Hz) - band edges.
    Hertz,
    /// Milliseconds (ms) - lookahead, attack, hold, release.
    Milliseconds,
    /// No unit - enumerations.
    None,
}

impl ParamUnit {
    /// Returns the unit suffix string for display.
    ///
    /// ```rust
    /// use freqgate_core::ParamUnit;
    ///
    /// assert_eq!(ParamUnit::Decibels.suffix(), " dB");
    /// assert_eq!(ParamUnit::None.suffix(), "");
    /// ```
    pub const fn suffix(&self) -> &'static str {
        match self {
            ParamUnit::Decibels => " dB",
            ParamUnit::Hertz => " Hz",
            ParamUnit::Milliseconds => " ms",
            ParamUnit::None => "",
        }
    }
}
