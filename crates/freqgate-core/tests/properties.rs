//! Property-based tests for freqgate-core primitives.
//!
//! Covers level conversion round trips, the doubled ring's frame contents
//! and the lookahead delay's exact sample offset.

use freqgate_core::{
    FrameRing, LookaheadDelay, ParamDescriptor, SILENCE_FLOOR_DB, db_to_linear, linear_to_db,
};
use proptest::prelude::*;

proptest! {
    #![proptest_config(ProptestConfig::with_cases(500))]

    /// Above the silence floor, dB conversion round-trips to within 0.01%.
    #[test]
    fn db_roundtrip_above_floor(linear in 2e-5f32..=1.0f32) {
        let back = db_to_linear(linear_to_db(linear));
        prop_assert!(
            (back - linear).abs() / linear < 1e-4,
            "{} -> {} -> {}", linear, linear_to_db(linear), back
        );
    }

    /// Anything below 1e-10 reads as the floor.
    #[test]
    fn tiny_levels_hit_floor(linear in -1.0f32..1e-10f32) {
        prop_assert_eq!(linear_to_db(linear), SILENCE_FLOOR_DB);
    }

    /// linear_to_db is finite and never below the floor.
    #[test]
    fn linear_to_db_bounded(x in -2.0f32..1e3f32) {
        let db = linear_to_db(x);
        prop_assert!(db.is_finite());
        prop_assert!(db >= SILENCE_FLOOR_DB);
    }

    /// After any number of pushes the frame holds the last N values in order.
    #[test]
    fn ring_frame_is_last_n(n in 1usize..64, pushes in 0usize..300) {
        let mut ring = FrameRing::new(n).unwrap();
        for i in 0..pushes {
            ring.push(i as f32 + 1.0, -(i as f32) - 1.0);
        }
        let (left, right) = ring.frame();
        for k in 0..n {
            // sample k of the frame was pushed (n - k) pushes ago
            let age = n - k;
            let expected = if age <= pushes { (pushes - age) as f32 + 1.0 } else { 0.0 };
            prop_assert_eq!(left[k], expected);
            prop_assert_eq!(right[k], -expected);
        }
    }

    /// The delay returns exactly the sample pushed `d` calls earlier.
    #[test]
    fn delay_offset_exact(d in 0usize..64, len in 1usize..256) {
        let mut delay = LookaheadDelay::with_capacity(64);
        delay.set_delay(d);
        for t in 0..len {
            let (l, r) = delay.process(t as f32 + 1.0, 0.5);
            let expected = if t >= d { (t - d) as f32 + 1.0 } else { 0.0 };
            prop_assert_eq!(l, expected);
            if d == 0 || t >= d {
                prop_assert_eq!(r, 0.5);
            }
        }
    }

    /// Clamping always lands inside the declared range.
    #[test]
    fn clamp_within_range(value in -1e6f32..1e6f32) {
        let desc = ParamDescriptor::time_ms("Release", "Release", 1.0, 1000.0, 100.0);
        let c = desc.clamp(value);
        prop_assert!(desc.contains(c));
    }
}
