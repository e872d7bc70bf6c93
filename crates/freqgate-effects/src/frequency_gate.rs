//! Frequency-selective noise gate engine.
//!
//! The gate opens and closes on the level of one frequency band instead of
//! the broadband signal, so a voice can key the gate while keyboard clatter
//! or fan rumble outside the band cannot.
//!
//! # Signal flow
//!
//! ```text
//!            ┌──────────── FrameRing (2N) ── every hop: window ─ FFT ─ band level ─┐
//! in (L,R) ──┤                                                                    │
//!            │                                                       GateStateMachine
//!            │                                                                    │
//!            └── LookaheadDelay (K) ───────────────────────── × gain ─────────────┴── out
//! ```
//!
//! 1. Every input sample is written to a doubled circular buffer of length
//!    `2N`, so the latest `N` samples are always one contiguous slice.
//! 2. Every `N/4` samples (75% overlap) the frame is downmixed, Hann-windowed
//!    and transformed; the band's bin magnitudes are reduced to one level.
//! 3. The hop-rate gate decision (threshold, hysteresis, hold) feeds a
//!    per-sample attack/release envelope mapped onto `[range, 1]`.
//! 4. The gain is applied to the audio delayed by the Pre-Open time `K`,
//!    so the gate opens slightly before the onset reaches the output.
//!
//! # Real-time behavior
//!
//! Parameters are read once per block from the shared [`GateParams`].
//! Changing the FFT size or the sample rate only raises a flag; buffers are
//! rebuilt at the top of the next block on the audio thread. Outside that
//! point processing never allocates.
//!
//! If the analysis buffers cannot be allocated the detector is reported as
//! [`DetectorStatus::Unavailable`] and the gate stays closed, attenuating the
//! output to the Range gain.

use freqgate_analysis::{AnalysisError, BinRange, SpectralDetector};
use freqgate_core::{
    Effect, FrameRing, LookaheadDelay, ParamDescriptor, ParameterInfo, SILENCE_FLOOR_DB,
    ms_to_samples_rounded,
};

use crate::gate::GateStateMachine;
use crate::info::DEFAULT_SAMPLE_RATE;
use crate::params::{FftSize, GateParams, GateSettings, MAX_PREOPEN_MS, PARAM_COUNT};

/// Whether band analysis is running.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DetectorStatus {
    /// Transform buffers are allocated and analysis runs every hop.
    Ready,
    /// Allocation failed; the gate is held closed.
    Unavailable,
}

#[derive(Debug)]
struct AnalysisState {
    detector: SpectralDetector,
    ring: FrameRing,
}

impl AnalysisState {
    fn new(settings: &GateSettings, sample_rate: f32) -> Result<Self, AnalysisError> {
        let n = settings.fft_size.samples();
        Ok(Self {
            detector: SpectralDetector::new(
                n,
                sample_rate,
                settings.freq_low_hz,
                settings.freq_high_hz,
            )?,
            ring: FrameRing::new(n)?,
        })
    }
}

/// Stereo frequency-selective noise gate.
///
/// ## Parameter Indices (`ParameterInfo`)
///
/// | Index | Name | Range | Default |
/// |-------|------|-------|---------|
/// | 0 | Freq Low | 20–20000 Hz | 100 |
/// | 1 | Freq High | 20–20000 Hz | 500 |
/// | 2 | Threshold | -96–0 dB | -30 |
/// | 3 | Detection | 0–4 | 0 (Average) |
/// | 4 | Pre-Open | 0–20 ms | 0 |
/// | 5 | Attack | 0.1–100 ms | 5 |
/// | 6 | Hold | 0–500 ms | 50 |
/// | 7 | Release | 1–1000 ms | 100 |
/// | 8 | Hysteresis | 0–12 dB | 3 |
/// | 9 | Range | -96–0 dB | -96 |
/// | 10 | FFT Size | 0–3 | 2 (2048) |
///
/// # Example
///
/// ```rust
/// use freqgate_core::Effect;
/// use freqgate_effects::{FrequencyGate, GateParam};
///
/// let mut gate = FrequencyGate::new(48000.0);
/// gate.params().set(GateParam::Threshold, -40.0);
///
/// let mut left = vec![0.0_f32; 256];
/// let mut right = vec![0.0_f32; 256];
/// gate.process_block_stereo_inplace(&mut left, &mut right);
/// assert!(!gate.is_gate_open());
/// ```
#[derive(Debug)]
pub struct FrequencyGate {
    params: GateParams,
    settings: GateSettings,
    sample_rate: f32,

    analysis: Option<AnalysisState>,
    active_fft: FftSize,
    hop_size: usize,
    hop_counter: usize,
    band: (f32, f32),

    lookahead: LookaheadDelay,
    gate: GateStateMachine,
    detected_db: f32,
}

impl Default for FrequencyGate {
    fn default() -> Self {
        Self::new(DEFAULT_SAMPLE_RATE)
    }
}

impl FrequencyGate {
    /// Creates a gate with default parameters.
    pub fn new(sample_rate: f32) -> Self {
        Self::with_params(GateParams::new(), sample_rate)
    }

    /// Creates a gate driven by an existing parameter store.
    ///
    /// Any pending reinit request is consumed; buffers are allocated here.
    pub fn with_params(params: GateParams, sample_rate: f32) -> Self {
        let sample_rate = sanitize_sample_rate(sample_rate, DEFAULT_SAMPLE_RATE);
        let settings = params.snapshot();
        params.take_reinit();
        let mut gate = Self {
            gate: GateStateMachine::new(&settings, sample_rate),
            lookahead: LookaheadDelay::with_capacity(1),
            params,
            settings,
            sample_rate,
            analysis: None,
            active_fft: settings.fft_size,
            hop_size: settings.fft_size.hop(),
            hop_counter: 0,
            band: (settings.freq_low_hz, settings.freq_high_hz),
            detected_db: SILENCE_FLOOR_DB,
        };
        gate.reinitialize();
        gate
    }

    /// Handle to the shared parameter store.
    pub fn params(&self) -> &GateParams {
        &self.params
    }

    /// Settings in effect for the current block.
    pub fn settings(&self) -> &GateSettings {
        &self.settings
    }

    /// Current sample rate in Hz.
    pub fn sample_rate(&self) -> f32 {
        self.sample_rate
    }

    /// Re-reads parameters, rebuilds buffers and resets all state.
    pub fn activate(&mut self) {
        self.settings = self.params.snapshot();
        self.params.take_reinit();
        self.reinitialize();
    }

    /// Stops processing. Buffers are kept for the next activation.
    pub fn deactivate(&mut self) {}

    /// Start-of-block housekeeping: consumes a pending reinit request or
    /// applies cheap parameter changes.
    ///
    /// Called by the block processing methods; call it yourself only when
    /// driving the gate sample by sample through
    /// [`process_stereo`](Effect::process_stereo).
    pub fn begin_block(&mut self) {
        self.settings = self.params.snapshot();
        if self.params.take_reinit() || self.settings.fft_size != self.active_fft {
            self.reinitialize();
            return;
        }

        let band = (self.settings.freq_low_hz, self.settings.freq_high_hz);
        if band != self.band {
            self.band = band;
            if let Some(analysis) = self.analysis.as_mut() {
                let _bins = analysis.detector.set_band(band.0, band.1);
                #[cfg(feature = "tracing")]
                tracing::debug!(
                    low_hz = band.0,
                    high_hz = band.1,
                    start_bin = _bins.start,
                    end_bin = _bins.end,
                    "detection band updated"
                );
            }
        }

        self.apply_lookahead();
        self.gate.configure(&self.settings, self.sample_rate);
    }

    /// Band level measured at the most recent hop, in dBFS.
    pub fn detected_level_db(&self) -> f32 {
        self.detected_db
    }

    /// Whether the gate is open (including hold).
    pub fn is_gate_open(&self) -> bool {
        self.gate.is_open()
    }

    /// Gain applied to the most recent output sample.
    pub fn current_gain(&self) -> f32 {
        self.gate.gain()
    }

    /// Whether band analysis is running.
    pub fn detector_status(&self) -> DetectorStatus {
        if self.analysis.is_some() {
            DetectorStatus::Ready
        } else {
            DetectorStatus::Unavailable
        }
    }

    /// Transforms rejected by the FFT backend since the last reinit.
    pub fn fft_failures(&self) -> u64 {
        self.analysis
            .as_ref()
            .map_or(0, |a| a.detector.failure_count())
    }

    /// Analyzed bin range, if the detector is available.
    pub fn bins(&self) -> Option<BinRange> {
        self.analysis.as_ref().map(|a| a.detector.bins())
    }

    /// FFT size currently allocated.
    pub fn fft_size(&self) -> FftSize {
        self.active_fft
    }

    /// Samples between analyses.
    pub fn hop_size(&self) -> usize {
        self.hop_size
    }

    /// Current lookahead in samples.
    pub fn lookahead_samples(&self) -> usize {
        self.lookahead.delay_samples()
    }

    fn reinitialize(&mut self) {
        // release the old buffers before allocating new ones
        self.analysis = None;

        self.active_fft = self.settings.fft_size;
        self.hop_size = self.active_fft.hop();
        self.hop_counter = 0;
        self.band = (self.settings.freq_low_hz, self.settings.freq_high_hz);
        self.analysis = match AnalysisState::new(&self.settings, self.sample_rate) {
            Ok(state) => Some(state),
            Err(_err) => {
                #[cfg(feature = "tracing")]
                tracing::warn!(
                    fft_size = self.active_fft.samples(),
                    error = %_err,
                    "spectral detector unavailable, gate held closed"
                );
                None
            }
        };

        let capacity = ms_to_samples_rounded(MAX_PREOPEN_MS, self.sample_rate);
        self.lookahead = LookaheadDelay::with_capacity(capacity);
        self.apply_lookahead();

        self.gate.configure(&self.settings, self.sample_rate);
        self.gate.reset();
        self.detected_db = SILENCE_FLOOR_DB;

        #[cfg(feature = "tracing")]
        tracing::debug!(
            fft_size = self.active_fft.samples(),
            hop = self.hop_size,
            sample_rate = self.sample_rate,
            latency = self.latency_samples(),
            "frequency gate reinitialized"
        );
    }

    fn apply_lookahead(&mut self) {
        let samples = ms_to_samples_rounded(self.settings.preopen_ms, self.sample_rate);
        self.lookahead.set_delay(samples);
    }
}

fn sanitize_sample_rate(sample_rate: f32, fallback: f32) -> f32 {
    if sample_rate.is_finite() && sample_rate > 0.0 {
        sample_rate
    } else {
        fallback
    }
}

impl Effect for FrequencyGate {
    #[inline]
    fn process_stereo(&mut self, left: f32, right: f32) -> (f32, f32) {
        if let Some(AnalysisState { detector, ring }) = self.analysis.as_mut() {
            ring.push(left, right);
            self.hop_counter += 1;
            if self.hop_counter >= self.hop_size {
                self.hop_counter = 0;
                let (frame_l, frame_r) = ring.frame();
                self.detected_db = detector.analyze(frame_l, frame_r, self.settings.detection);
                self.gate.update(self.detected_db, self.hop_size);
            }
        }

        let gain = self.gate.next_gain();
        let (delayed_l, delayed_r) = self.lookahead.process(left, right);
        (delayed_l * gain, delayed_r * gain)
    }

    fn process_block_stereo(
        &mut self,
        left_in: &[f32],
        right_in: &[f32],
        left_out: &mut [f32],
        right_out: &mut [f32],
    ) {
        debug_assert_eq!(left_in.len(), right_in.len());
        debug_assert_eq!(left_in.len(), left_out.len());
        debug_assert_eq!(left_in.len(), right_out.len());
        self.begin_block();
        for i in 0..left_in.len() {
            let (l, r) = self.process_stereo(left_in[i], right_in[i]);
            left_out[i] = l;
            right_out[i] = r;
        }
    }

    fn process_block_stereo_inplace(&mut self, left: &mut [f32], right: &mut [f32]) {
        debug_assert_eq!(left.len(), right.len());
        self.begin_block();
        for (l, r) in left.iter_mut().zip(right.iter_mut()) {
            let (out_l, out_r) = self.process_stereo(*l, *r);
            *l = out_l;
            *r = out_r;
        }
    }

    /// Stores the new rate and defers the rebuild to the next block.
    fn set_sample_rate(&mut self, sample_rate: f32) {
        let sample_rate = sanitize_sample_rate(sample_rate, self.sample_rate);
        if sample_rate != self.sample_rate {
            self.sample_rate = sample_rate;
            self.params.request_reinit();
        }
    }

    fn reset(&mut self) {
        if let Some(analysis) = self.analysis.as_mut() {
            analysis.ring.reset();
        }
        self.hop_counter = 0;
        self.lookahead.clear();
        self.gate.reset();
        self.detected_db = SILENCE_FLOOR_DB;
    }

    /// One hop of analysis plus the Pre-Open delay.
    fn latency_samples(&self) -> usize {
        self.hop_size + self.lookahead.delay_samples()
    }
}

impl ParameterInfo for FrequencyGate {
    fn param_count(&self) -> usize {
        PARAM_COUNT
    }

    fn param_info(&self, index: usize) -> Option<ParamDescriptor> {
        self.params.descriptor(index)
    }

    fn get_param(&self, index: usize) -> f32 {
        self.params.get_index(index).unwrap_or(0.0)
    }

    fn set_param(&mut self, index: usize, value: f32) {
        self.params.set_index(index, value);
    }
}
