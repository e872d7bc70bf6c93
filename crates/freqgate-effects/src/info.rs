//! Product identity shared by every host adapter and the CLI.

/// Identity and metadata of the gate as a plugin product.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PluginInfo {
    /// Display name.
    pub name: &'static str,
    /// Vendor name.
    pub brand: &'static str,
    /// One-line description.
    pub description: &'static str,
    /// Four-character unique id.
    pub unique_id: [u8; 4],
    /// Semantic version.
    pub version: &'static str,
    /// Reverse-DNS CLAP identifier.
    pub clap_id: &'static str,
}

impl PluginInfo {
    /// Unique id as a string.
    pub fn unique_id_str(&self) -> &str {
        std::str::from_utf8(&self.unique_id).unwrap_or_default()
    }
}

/// The gate's product identity.
pub const PLUGIN_INFO: PluginInfo = PluginInfo {
    name: "FrequencyGate",
    brand: "StreamTools",
    description: "Frequency-selective noise gate for voice streaming",
    unique_id: *b"FqGt",
    version: env!("CARGO_PKG_VERSION"),
    clap_id: "com.streamtools.frequencygate",
};

/// Sample rate assumed until the host reports one.
pub const DEFAULT_SAMPLE_RATE: f32 = 48000.0;
