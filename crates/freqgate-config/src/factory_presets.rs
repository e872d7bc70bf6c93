//! Factory presets bundled with the library.
//!
//! Always available without any files on disk. Each is a starting point for
//! a common streaming setup.

use crate::{ConfigError, GatePreset};

/// Names of the factory presets, in display order.
pub static FACTORY_PRESET_NAMES: &[&str] = &["voice", "podcast", "music-bleed", "low-latency"];

static FACTORY_PRESETS_TOML: &[(&str, &str)] = &[
    ("voice", VOICE_PRESET),
    ("podcast", PODCAST_PRESET),
    ("music-bleed", MUSIC_BLEED_PRESET),
    ("low-latency", LOW_LATENCY_PRESET),
];

/// Default voice band on a live microphone.
const VOICE_PRESET: &str = r#"
name = "Voice"
description = "Speech fundamentals and first formant keying a live mic"

[params]
freq_low = 100.0
freq_high = 500.0
threshold = -30.0
detection = "Average"
preopen = 0.0
attack = 5.0
hold = 50.0
release = 100.0
hysteresis = 3.0
range = -96.0
fft_size = "2048"
"#;

/// Gentle gate for a treated room.
const PODCAST_PRESET: &str = r#"
name = "Podcast"
description = "Wide speech band, soft range and slow release for natural pauses"

[params]
freq_low = 80.0
freq_high = 3500.0
threshold = -42.0
detection = "RMS"
preopen = 5.0
attack = 2.0
hold = 150.0
release = 250.0
hysteresis = 6.0
range = -18.0
fft_size = "2048"
"#;

/// Keys on speech while background music sits in the same room.
const MUSIC_BLEED_PRESET: &str = r#"
name = "Music Bleed"
description = "Robust statistic against tonal bleed from speakers or a game soundtrack"

[params]
freq_low = 250.0
freq_high = 2500.0
threshold = -34.0
detection = "Median"
preopen = 10.0
attack = 3.0
hold = 120.0
release = 150.0
hysteresis = 4.0
range = -30.0
fft_size = "4096"
"#;

/// Smallest analysis latency for live monitoring.
const LOW_LATENCY_PRESET: &str = r#"
name = "Low Latency"
description = "512-point analysis and no pre-open for monitoring through the gate"

[params]
freq_low = 150.0
freq_high = 4000.0
threshold = -36.0
detection = "Peak"
preopen = 0.0
attack = 1.0
hold = 80.0
release = 80.0
hysteresis = 3.0
range = -96.0
fft_size = "512"
"#;

/// Returns the factory preset called `name` (case-insensitive).
pub fn factory_preset(name: &str) -> Option<GatePreset> {
    FACTORY_PRESETS_TOML
        .iter()
        .find(|(id, _)| id.eq_ignore_ascii_case(name))
        .and_then(|(_, toml_str)| GatePreset::from_toml(toml_str).ok())
}

/// All factory presets, in display order.
pub fn factory_presets() -> Result<Vec<GatePreset>, ConfigError> {
    FACTORY_PRESETS_TOML
        .iter()
        .map(|(_, toml_str)| GatePreset::from_toml(toml_str))
        .collect()
}

/// Whether `name` is a factory preset.
pub fn is_factory_preset(name: &str) -> bool {
    FACTORY_PRESET_NAMES
        .iter()
        .any(|n| n.eq_ignore_ascii_case(name))
}
