//! Configuration loading and management

use anyhow::Result;

/// Android identifiers used when no override is configured
const DEFAULT_RECORD_AUDIO_ID: &str = "android.permission.RECORD_AUDIO";
const DEFAULT_MODIFY_AUDIO_SETTINGS_ID: &str = "android.permission.MODIFY_AUDIO_SETTINGS";

/// The named capabilities the daemon negotiates at startup
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Capability {
    /// Capture audio from the device microphone
    RecordAudio,
    /// Adjust global audio routing and volume settings
    ModifyAudioSettings,
}

impl std::fmt::Display for Capability {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Capability::RecordAudio => write!(f, "record-audio"),
            Capability::ModifyAudioSettings => write!(f, "modify-audio-settings"),
        }
    }
}

/// Mapping of named capabilities to platform permission identifiers
///
/// The identifiers are opaque to the daemon; they must match whatever the
/// host platform's permission broker expects.
#[derive(Debug, Clone)]
pub struct CapabilityMap {
    record_audio: String,
    modify_audio_settings: String,
}

impl CapabilityMap {
    /// Resolve a capability to its platform identifier
    pub fn identifier(&self, capability: Capability) -> &str {
        match capability {
            Capability::RecordAudio => &self.record_audio,
            Capability::ModifyAudioSettings => &self.modify_audio_settings,
        }
    }
}

impl Default for CapabilityMap {
    fn default() -> Self {
        Self {
            record_audio: DEFAULT_RECORD_AUDIO_ID.to_string(),
            modify_audio_settings: DEFAULT_MODIFY_AUDIO_SETTINGS_ID.to_string(),
        }
    }
}

/// Daemon configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Capability-to-identifier mapping for permission requests
    pub capabilities: CapabilityMap,
}

impl Config {
    /// Load configuration from environment and defaults
    pub fn load() -> Result<Self> {
        let record_audio = std::env::var("STEPCAST_RECORD_AUDIO_ID")
            .unwrap_or_else(|_| DEFAULT_RECORD_AUDIO_ID.to_string());
        let modify_audio_settings = std::env::var("STEPCAST_MODIFY_AUDIO_SETTINGS_ID")
            .unwrap_or_else(|_| DEFAULT_MODIFY_AUDIO_SETTINGS_ID.to_string());

        Ok(Self {
            capabilities: CapabilityMap {
                record_audio,
                modify_audio_settings,
            },
        })
    }
}
