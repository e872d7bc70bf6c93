//! Platform-specific preset locations and preset lookup.
//!
//! - **User presets**: `~/.config/freqgate/presets/` (Linux),
//!   `~/Library/Application Support/freqgate/presets/` (macOS),
//!   `%APPDATA%\freqgate\presets\` (Windows)

use std::path::{Path, PathBuf};

use crate::factory_presets::factory_preset;
use crate::{ConfigError, GatePreset};

/// Application name used for directory paths.
const APP_NAME: &str = "freqgate";

/// Subdirectory name for presets.
const PRESETS_SUBDIR: &str = "presets";

/// Returns the user-specific presets directory.
///
/// Falls back to `./freqgate/presets` if the config directory cannot be
/// determined.
pub fn user_presets_dir() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(APP_NAME)
        .join(PRESETS_SUBDIR)
}

/// File name for a preset name, adding `.toml` if missing.
pub fn preset_file_name(name: &str) -> String {
    if Path::new(name)
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("toml"))
    {
        name.to_string()
    } else {
        format!("{name}.toml")
    }
}

/// Finds a preset file in `dir` or as a direct path.
///
/// `name` may be a path to a TOML file or a preset name with or without the
/// `.toml` extension.
pub fn find_preset_in(name: &str, dir: &Path) -> Option<PathBuf> {
    let path = PathBuf::from(name);
    if path.is_file() {
        return Some(path);
    }
    let candidate = dir.join(preset_file_name(name));
    candidate.is_file().then_some(candidate)
}

/// Finds a preset file by path or in the user presets directory.
pub fn find_preset(name: &str) -> Option<PathBuf> {
    find_preset_in(name, &user_presets_dir())
}

/// Loads a preset by file path, user preset name or factory preset name,
/// in that order.
pub fn load_preset_in(name: &str, dir: &Path) -> Result<GatePreset, ConfigError> {
    if let Some(path) = find_preset_in(name, dir) {
        return GatePreset::load(path);
    }
    factory_preset(name).ok_or_else(|| ConfigError::PresetNotFound(name.to_string()))
}

/// [`load_preset_in`] with the user presets directory.
pub fn load_preset(name: &str) -> Result<GatePreset, ConfigError> {
    load_preset_in(name, &user_presets_dir())
}

/// Names of the `.toml` presets stored in `dir`, sorted.
///
/// A missing directory yields an empty list.
pub fn list_presets_in(dir: &Path) -> Result<Vec<String>, ConfigError> {
    let entries = match std::fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
        Err(e) => return Err(ConfigError::read_file(dir, e)),
    };

    let mut names: Vec<String> = entries
        .filter_map(Result::ok)
        .map(|entry| entry.path())
        .filter(|path| {
            path.is_file()
                && path
                    .extension()
                    .is_some_and(|ext| ext.eq_ignore_ascii_case("toml"))
        })
        .filter_map(|path| path.file_stem().map(|s| s.to_string_lossy().into_owned()))
        .collect();
    names.sort();
    Ok(names)
}

/// Names of the presets in the user presets directory.
pub fn list_user_presets() -> Result<Vec<String>, ConfigError> {
    list_presets_in(&user_presets_dir())
}
