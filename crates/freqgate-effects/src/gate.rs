//! Hysteresis gate state machine with hold and attack/release envelope.
//!
//! Two clocks drive the gate:
//!
//! - **Hop rate**: [`GateStateMachine::update`] receives each new band level
//!   and decides whether the gate is open. Opening uses `threshold`; an
//!   already open gate only closes once the level falls below
//!   `threshold - hysteresis` *and* the hold timer has run out.
//! - **Sample rate**: [`GateStateMachine::next_gain`] moves a one-pole
//!   envelope toward 1 (open) or 0 (closed) and maps it onto
//!   `[range_gain, 1]`.
//!
//! The hold timer counts samples and is decremented by one hop per update,
//! so the gate stays open for the hold time rounded up to the next hop
//! regardless of FFT size.

use freqgate_core::{db_to_linear, ms_to_samples_rounded, time_constant_coeff};

use crate::params::GateSettings;

/// Gate decision plus envelope and gain state.
#[derive(Debug, Clone)]
pub struct GateStateMachine {
    open: bool,
    hold_remaining: usize,
    envelope: f32,
    gain: f32,

    open_threshold_db: f32,
    close_threshold_db: f32,
    hold_samples: usize,
    attack_coeff: f32,
    release_coeff: f32,
    range_gain: f32,
}

impl GateStateMachine {
    /// Creates a closed gate configured from `settings`.
    pub fn new(settings: &GateSettings, sample_rate: f32) -> Self {
        let mut gate = Self {
            open: false,
            hold_remaining: 0,
            envelope: 0.0,
            gain: 0.0,
            open_threshold_db: 0.0,
            close_threshold_db: 0.0,
            hold_samples: 0,
            attack_coeff: 0.0,
            release_coeff: 0.0,
            range_gain: 0.0,
        };
        gate.configure(settings, sample_rate);
        gate.reset();
        gate
    }

    /// Recomputes thresholds and time constants. Does not touch state.
    pub fn configure(&mut self, settings: &GateSettings, sample_rate: f32) {
        self.open_threshold_db = settings.threshold_db;
        self.close_threshold_db = settings.threshold_db - settings.hysteresis_db;
        self.hold_samples = ms_to_samples_rounded(settings.hold_ms, sample_rate);
        self.attack_coeff = time_constant_coeff(settings.attack_ms, sample_rate);
        self.release_coeff = time_constant_coeff(settings.release_ms, sample_rate);
        self.range_gain = db_to_linear(settings.range_db).clamp(0.0, 1.0);
    }

    /// Closes the gate: envelope 0, gain at the range floor, no hold.
    pub fn reset(&mut self) {
        self.open = false;
        self.hold_remaining = 0;
        self.envelope = 0.0;
        self.gain = self.range_gain;
    }

    /// Feeds one hop's band level (dBFS). Returns whether the gate is open.
    ///
    /// `hop_size` is the number of samples since the previous update.
    pub fn update(&mut self, level_db: f32, hop_size: usize) -> bool {
        let threshold = if self.open {
            self.close_threshold_db
        } else {
            self.open_threshold_db
        };

        if level_db >= threshold {
            self.open = true;
            self.hold_remaining = self.hold_samples;
        } else if self.hold_remaining > 0 {
            self.hold_remaining = self.hold_remaining.saturating_sub(hop_size);
        } else {
            self.open = false;
        }
        self.open
    }

    /// Advances the envelope one sample and returns the gain to apply.
    #[inline]
    pub fn next_gain(&mut self) -> f32 {
        let target = if self.open { 1.0 } else { 0.0 };
        if target > self.envelope {
            self.envelope = target - (target - self.envelope) * self.attack_coeff;
        } else if self.hold_remaining == 0 {
            self.envelope = target + (self.envelope - target) * self.release_coeff;
        }
        self.envelope = self.envelope.clamp(0.0, 1.0);
        self.gain = (self.range_gain + (1.0 - self.range_gain) * self.envelope)
            .clamp(self.range_gain, 1.0);
        self.gain
    }

    /// Whether the gate is currently open (including hold).
    #[inline]
    pub fn is_open(&self) -> bool {
        self.open
    }

    /// Envelope level in `[0, 1]`.
    #[inline]
    pub fn envelope(&self) -> f32 {
        self.envelope
    }

    /// Most recent gain returned by [`next_gain`](Self::next_gain).
    #[inline]
    pub fn gain(&self) -> f32 {
        self.gain
    }

    /// Linear gain of the fully closed gate.
    #[inline]
    pub fn range_gain(&self) -> f32 {
        self.range_gain
    }

    /// Hold samples remaining.
    #[inline]
    pub fn hold_remaining(&self) -> usize {
        self.hold_remaining
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SR: f32 = 48000.0;
    const HOP: usize = 512;

    fn settings(threshold: f32, hysteresis: f32, hold_ms: f32) -> GateSettings {
        GateSettings {
            threshold_db: threshold,
            hysteresis_db: hysteresis,
            hold_ms,
            attack_ms: 1.0,
            release_ms: 10.0,
            range_db: -96.0,
            ..GateSettings::default()
        }
    }

    #[test]
    fn test_starts_closed_at_range() {
        let s = GateSettings {
            range_db: -20.0,
            ..GateSettings::default()
        };
        let gate = GateStateMachine::new(&s, SR);
        assert!(!gate.is_open());
        assert_eq!(gate.envelope(), 0.0);
        assert!((gate.gain() - 0.1).abs() < 1e-6);
    }

    #[test]
    fn test_opens_at_threshold() {
        let mut gate = GateStateMachine::new(&settings(-30.0, 3.0, 0.0), SR);
        assert!(!gate.update(-30.1, HOP));
        assert!(gate.update(-30.0, HOP));
    }

    #[test]
    fn test_hysteresis_no_flutter() {
        let mut gate = GateStateMachine::new(&settings(-30.0, 6.0, 0.0), SR);
        assert!(gate.update(-20.0, HOP));
        // oscillate inside [close, open): stays open
        for i in 0..50 {
            let level = if i % 2 == 0 { -31.0 } else { -35.0 };
            assert!(gate.update(level, HOP), "closed at step {i}");
        }
        // below close threshold with no hold: closes
        assert!(!gate.update(-36.5, HOP));
        // same oscillation from closed: stays closed
        for i in 0..50 {
            let level = if i % 2 == 0 { -31.0 } else { -35.0 };
            assert!(!gate.update(level, HOP), "opened at step {i}");
        }
    }

    #[test]
    fn test_hold_bridges_drops_below_close_threshold() {
        // hold = 50 ms = 2400 samples, about 4.7 hops
        let mut gate = GateStateMachine::new(&settings(-30.0, 3.0, 50.0), SR);
        assert!(gate.update(-20.0, HOP));
        for i in 0..100 {
            // alternate above/below close threshold every hop
            let level = if i % 2 == 0 { -32.0 } else { -34.0 };
            assert!(gate.update(level, HOP), "fluttered at step {i}");
        }
    }

    #[test]
    fn test_hold_duration_in_hops() {
        let s = settings(-30.0, 3.0, 50.0);
        let hold = ms_to_samples_rounded(50.0, SR);
        let mut gate = GateStateMachine::new(&s, SR);
        gate.update(-10.0, HOP);

        let mut open_hops = 0;
        while gate.update(-90.0, HOP) {
            open_hops += 1;
            assert!(open_hops < 100);
        }
        let held = open_hops * HOP;
        assert!(held >= hold, "held {held} < {hold}");
        assert!(held < hold + HOP, "held {held} >= {}", hold + HOP);
    }

    #[test]
    fn test_zero_hold_closes_next_hop() {
        let mut gate = GateStateMachine::new(&settings(-30.0, 3.0, 0.0), SR);
        gate.update(-10.0, HOP);
        assert!(!gate.update(-90.0, HOP));
    }

    #[test]
    fn test_envelope_attack_then_release() {
        let mut gate = GateStateMachine::new(&settings(-30.0, 3.0, 0.0), SR);
        gate.update(-10.0, HOP);
        let mut prev = 0.0;
        for _ in 0..480 {
            let g = gate.next_gain();
            assert!(g >= prev);
            prev = g;
        }
        // 10 attack time constants
        assert!(prev > 0.9999, "after attack {prev}");

        gate.update(-90.0, HOP);
        assert!(!gate.is_open());
        for _ in 0..4800 {
            let g = gate.next_gain();
            assert!(g <= prev);
            prev = g;
        }
        assert!(prev < 1e-3, "after release {prev}");
    }

    #[test]
    fn test_release_waits_for_hold() {
        let mut gate = GateStateMachine::new(&settings(-30.0, 3.0, 50.0), SR);
        gate.update(-10.0, HOP);
        for _ in 0..2000 {
            gate.next_gain();
        }
        let opened = gate.envelope();
        // level drops but hold keeps the gate open and the envelope up
        gate.update(-90.0, HOP);
        assert!(gate.is_open());
        for _ in 0..HOP {
            gate.next_gain();
        }
        assert!(gate.envelope() >= opened);
    }

    #[test]
    fn test_gain_respects_range() {
        let s = GateSettings {
            range_db: -12.0,
            ..settings(-30.0, 3.0, 0.0)
        };
        let mut gate = GateStateMachine::new(&s, SR);
        let floor = db_to_linear(-12.0);
        for _ in 0..100 {
            let g = gate.next_gain();
            assert!((g - floor).abs() < 1e-6);
        }
        gate.update(0.0, HOP);
        for _ in 0..10_000 {
            let g = gate.next_gain();
            assert!(g >= floor - 1e-6 && g <= 1.0);
        }
    }

    #[test]
    fn test_reset_closes() {
        let mut gate = GateStateMachine::new(&settings(-30.0, 3.0, 100.0), SR);
        gate.update(0.0, HOP);
        gate.next_gain();
        gate.reset();
        assert!(!gate.is_open());
        assert_eq!(gate.hold_remaining(), 0);
        assert_eq!(gate.envelope(), 0.0);
        assert_eq!(gate.gain(), gate.range_gain());
    }
}
