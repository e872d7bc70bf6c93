//! Parameter table and lock-free parameter store for the gate.
//!
//! [`GateParams`] is shared between a control thread (host automation, UI,
//! preset loading) and the audio thread. Values live in `AtomicU32` cells
//! holding `f32` bits, so setters never block and the audio thread reads a
//! consistent-enough snapshot once per block via [`GateParams::snapshot`].
//!
//! Changing the FFT size cannot take effect immediately because it needs
//! new buffers. The setter instead raises a reinit flag that the engine
//! consumes exactly once at the top of its next block.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicU32, Ordering};

use freqgate_analysis::DetectionMethod;
use freqgate_core::{ParamDescriptor, ParamId, ParamScale};

/// First stable [`ParamId`] of the gate's parameter block.
pub const PARAM_ID_BASE: u32 = 1900;

/// Number of gate parameters.
pub const PARAM_COUNT: usize = 11;

/// Upper bound of the Pre-Open parameter; sizes the lookahead buffers.
pub const MAX_PREOPEN_MS: f32 = 20.0;

/// Gate parameters in host order.
///
/// | Index | Name | Range | Default |
/// |-------|------|-------|---------|
/// | 0 | Freq Low | 20–20000 Hz | 100 |
/// | 1 | Freq High | 20–20000 Hz | 500 |
/// | 2 | Threshold | -96–0 dB | -30 |
/// | 3 | Detection | 0–4 (enum) | 0 (Average) |
/// | 4 | Pre-Open | 0–20 ms | 0 |
/// | 5 | Attack | 0.1–100 ms | 5 |
/// | 6 | Hold | 0–500 ms | 50 |
/// | 7 | Release | 1–1000 ms | 100 |
/// | 8 | Hysteresis | 0–12 dB | 3 |
/// | 9 | Range | -96–0 dB | -96 |
/// | 10 | FFT Size | 0–3 (enum) | 2 (2048) |
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GateParam {
    /// Lower edge of the detection band.
    FreqLow,
    /// Upper edge of the detection band.
    FreqHigh,
    /// Opening threshold.
    Threshold,
    /// Band level statistic.
    Detection,
    /// Lookahead time.
    PreOpen,
    /// Envelope rise time.
    Attack,
    /// Time the gate stays open after the level drops.
    Hold,
    /// Envelope fall time.
    Release,
    /// Gap between the opening and closing thresholds.
    Hysteresis,
    /// Attenuation applied by the fully closed gate.
    Range,
    /// Analysis FFT size selection.
    FftSize,
}

impl GateParam {
    /// All parameters in index order.
    pub const ALL: [GateParam; PARAM_COUNT] = [
        GateParam::FreqLow,
        GateParam::FreqHigh,
        GateParam::Threshold,
        GateParam::Detection,
        GateParam::PreOpen,
        GateParam::Attack,
        GateParam::Hold,
        GateParam::Release,
        GateParam::Hysteresis,
        GateParam::Range,
        GateParam::FftSize,
    ];

    /// Parameter for a host index.
    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    /// Host index of this parameter.
    #[inline]
    pub fn index(self) -> usize {
        self as usize
    }

    /// Full descriptor: range, default, unit, stable ids and labels.
    pub fn descriptor(self) -> ParamDescriptor {
        let id = ParamId(PARAM_ID_BASE + self as u32);
        match self {
            GateParam::FreqLow => {
                ParamDescriptor::frequency_hz("Freq Low", "Low", 20.0, 20000.0, 100.0)
                    .with_id(id, "freq_low")
            }
            GateParam::FreqHigh => {
                ParamDescriptor::frequency_hz("Freq High", "High", 20.0, 20000.0, 500.0)
                    .with_id(id, "freq_high")
            }
            GateParam::Threshold => {
                ParamDescriptor::gain_db("Threshold", "Thresh", -96.0, 0.0, -30.0)
                    .with_id(id, "threshold")
            }
            GateParam::Detection => {
                ParamDescriptor::enumerated("Detection", "Detect", DetectionMethod::LABELS, 0)
                    .with_id(id, "detection")
            }
            GateParam::PreOpen => {
                ParamDescriptor::time_ms("Pre-Open", "PreOpen", 0.0, MAX_PREOPEN_MS, 0.0)
                    .with_step(0.1)
                    .with_id(id, "preopen")
            }
            GateParam::Attack => ParamDescriptor::time_ms("Attack", "Attack", 0.1, 100.0, 5.0)
                .with_scale(ParamScale::Logarithmic)
                .with_step(0.1)
                .with_id(id, "attack"),
            GateParam::Hold => {
                ParamDescriptor::time_ms("Hold", "Hold", 0.0, 500.0, 50.0).with_id(id, "hold")
            }
            GateParam::Release => {
                ParamDescriptor::time_ms("Release", "Release", 1.0, 1000.0, 100.0)
                    .with_scale(ParamScale::Logarithmic)
                    .with_id(id, "release")
            }
            GateParam::Hysteresis => {
                ParamDescriptor::gain_db("Hysteresis", "Hyst", 0.0, 12.0, 3.0)
                    .with_id(id, "hysteresis")
            }
            GateParam::Range => {
                ParamDescriptor::gain_db("Range", "Range", -96.0, 0.0, -96.0).with_id(id, "range")
            }
            GateParam::FftSize => {
                ParamDescriptor::enumerated("FFT Size", "FFT", FftSize::LABELS, 2)
                    .with_id(id, "fft_size")
            }
        }
    }

    /// Finds a parameter by string id, display name or short name
    /// (case-insensitive).
    pub fn find(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|p| {
            let d = p.descriptor();
            d.string_id.eq_ignore_ascii_case(name)
                || d.name.eq_ignore_ascii_case(name)
                || d.short_name.eq_ignore_ascii_case(name)
        })
    }
}

/// Analysis FFT size. Hop size is always a quarter of the FFT size.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
pub enum FftSize {
    /// 512 points.
    Size512,
    /// 1024 points.
    Size1024,
    /// 2048 points.
    #[default]
    Size2048,
    /// 4096 points.
    Size4096,
}

impl FftSize {
    /// All sizes in parameter order.
    pub const ALL: [FftSize; 4] = [
        FftSize::Size512,
        FftSize::Size1024,
        FftSize::Size2048,
        FftSize::Size4096,
    ];

    /// Display labels in parameter order.
    pub const LABELS: &'static [&'static str] =
        &["512 (~5ms)", "1024 (~10ms)", "2048 (~21ms)", "4096 (~42ms)"];

    /// Size for a parameter index, clamped to the valid range.
    pub fn from_index(index: usize) -> Self {
        Self::ALL[index.min(Self::ALL.len() - 1)]
    }

    /// Parameter index of this size.
    #[inline]
    pub fn index(self) -> usize {
        self as usize
    }

    /// Number of FFT points.
    #[inline]
    pub fn samples(self) -> usize {
        512 << self.index()
    }

    /// Hop size (`N / 4`).
    #[inline]
    pub fn hop(self) -> usize {
        self.samples() / 4
    }

    /// Size for an exact point count, if supported.
    pub fn from_samples(samples: usize) -> Option<Self> {
        Self::ALL.into_iter().find(|s| s.samples() == samples)
    }
}

/// Plain-value snapshot of every gate parameter.
///
/// Taken once per block so the whole block sees one consistent setting.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GateSettings {
    /// Lower band edge in Hz.
    pub freq_low_hz: f32,
    /// Upper band edge in Hz.
    pub freq_high_hz: f32,
    /// Opening threshold in dBFS.
    pub threshold_db: f32,
    /// Band level statistic.
    pub detection: DetectionMethod,
    /// Lookahead in ms.
    pub preopen_ms: f32,
    /// Attack time in ms.
    pub attack_ms: f32,
    /// Hold time in ms.
    pub hold_ms: f32,
    /// Release time in ms.
    pub release_ms: f32,
    /// Hysteresis in dB.
    pub hysteresis_db: f32,
    /// Closed-gate attenuation in dB.
    pub range_db: f32,
    /// Analysis FFT size.
    pub fft_size: FftSize,
}

impl GateSettings {
    /// Builds a snapshot from raw values in parameter order.
    ///
    /// Values are clamped to their descriptors.
    pub fn from_values(values: &[f32; PARAM_COUNT]) -> Self {
        let get = |p: GateParam| p.descriptor().clamp(values[p.index()]);
        Self {
            freq_low_hz: get(GateParam::FreqLow),
            freq_high_hz: get(GateParam::FreqHigh),
            threshold_db: get(GateParam::Threshold),
            detection: DetectionMethod::from_index(get(GateParam::Detection) as usize),
            preopen_ms: get(GateParam::PreOpen),
            attack_ms: get(GateParam::Attack),
            hold_ms: get(GateParam::Hold),
            release_ms: get(GateParam::Release),
            hysteresis_db: get(GateParam::Hysteresis),
            range_db: get(GateParam::Range),
            fft_size: FftSize::from_index(get(GateParam::FftSize) as usize),
        }
    }

    /// Raw values in parameter order.
    pub fn to_values(&self) -> [f32; PARAM_COUNT] {
        [
            self.freq_low_hz,
            self.freq_high_hz,
            self.threshold_db,
            self.detection.index() as f32,
            self.preopen_ms,
            self.attack_ms,
            self.hold_ms,
            self.release_ms,
            self.hysteresis_db,
            self.range_db,
            self.fft_size.index() as f32,
        ]
    }
}

impl Default for GateSettings {
    fn default() -> Self {
        Self::from_values(&default_values())
    }
}

fn default_values() -> [f32; PARAM_COUNT] {
    GateParam::ALL.map(|p| p.descriptor().default)
}

struct GateParamsInner {
    values: [AtomicU32; PARAM_COUNT],
    reinit: AtomicBool,
}

/// Lock-free parameter store shared between control and audio threads.
///
/// Cloning is cheap and yields another handle to the same values.
///
/// ```rust
/// use freqgate_effects::{FftSize, GateParam, GateParams};
///
/// let params = GateParams::new();
/// let control = params.clone();
///
/// control.set(GateParam::Threshold, -45.0);
/// control.set(GateParam::FftSize, FftSize::Size1024.index() as f32);
///
/// assert_eq!(params.get(GateParam::Threshold), -45.0);
/// assert!(params.take_reinit());
/// assert!(!params.take_reinit());
/// ```
#[derive(Clone)]
pub struct GateParams {
    inner: Arc<GateParamsInner>,
}

impl std::fmt::Debug for GateParams {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GateParams")
            .field("settings", &self.snapshot())
            .field("reinit", &self.inner.reinit.load(Ordering::Relaxed))
            .finish()
    }
}

impl Default for GateParams {
    fn default() -> Self {
        Self::new()
    }
}

impl GateParams {
    /// Creates a store holding every parameter's default.
    pub fn new() -> Self {
        Self::from_settings(&GateSettings::default())
    }

    /// Creates a store initialized from `settings`.
    pub fn from_settings(settings: &GateSettings) -> Self {
        let values = settings.to_values().map(|v| AtomicU32::new(v.to_bits()));
        Self {
            inner: Arc::new(GateParamsInner {
                values,
                reinit: AtomicBool::new(false),
            }),
        }
    }

    /// Descriptor for `index`, if valid.
    pub fn descriptor(&self, index: usize) -> Option<ParamDescriptor> {
        GateParam::from_index(index).map(GateParam::descriptor)
    }

    /// Current value of `param`.
    #[inline]
    pub fn get(&self, param: GateParam) -> f32 {
        f32::from_bits(self.inner.values[param.index()].load(Ordering::Acquire))
    }

    /// Current value at `index`, or `None` if out of range.
    pub fn get_index(&self, index: usize) -> Option<f32> {
        GateParam::from_index(index).map(|p| self.get(p))
    }

    /// Sets `param`, clamped to its declared range.
    ///
    /// Selecting a different FFT size raises the reinit flag.
    pub fn set(&self, param: GateParam, value: f32) {
        let clamped = param.descriptor().clamp(value);
        let previous = self.inner.values[param.index()].swap(clamped.to_bits(), Ordering::AcqRel);
        if param == GateParam::FftSize && f32::from_bits(previous) != clamped {
            self.request_reinit();
        }
    }

    /// Sets the parameter at `index`; out-of-range indices are ignored.
    pub fn set_index(&self, index: usize, value: f32) {
        if let Some(param) = GateParam::from_index(index) {
            self.set(param, value);
        }
    }

    /// Applies every value of `settings`.
    pub fn apply(&self, settings: &GateSettings) {
        for (param, value) in GateParam::ALL.into_iter().zip(settings.to_values()) {
            self.set(param, value);
        }
    }

    /// Restores every parameter to its default.
    pub fn reset_to_defaults(&self) {
        self.apply(&GateSettings::default());
    }

    /// Marks a deferred reinitialization for the next audio block.
    pub fn request_reinit(&self) {
        self.inner.reinit.store(true, Ordering::Release);
    }

    /// Consumes the reinit flag, returning whether it was set.
    pub fn take_reinit(&self) -> bool {
        self.inner.reinit.swap(false, Ordering::AcqRel)
    }

    /// Reads every parameter into a [`GateSettings`].
    pub fn snapshot(&self) -> GateSettings {
        GateSettings::from_values(&GateParam::ALL.map(|p| self.get(p)))
    }
}
