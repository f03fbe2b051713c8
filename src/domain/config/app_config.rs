//! Application configuration value object

use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::domain::error::ConfigError;

/// Directory name used under the platform data directory
pub const APP_DIR_NAME: &str = "voice-notes";

/// Name of the flat directory holding note files
pub const NOTES_DIR_NAME: &str = "voice_notes";

/// Default tracing level when neither RUST_LOG nor config set one
pub const DEFAULT_LOG_LEVEL: &str = "warn";

/// Valid values for `log_level`
pub const VALID_LOG_LEVELS: &[&str] = &["error", "warn", "info", "debug", "trace"];

/// How notes are shared
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ShareBackend {
    /// Put the note's path on the system clipboard
    #[default]
    Clipboard,
    /// Sharing disabled; every share reports unavailable
    None,
}

impl ShareBackend {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Clipboard => "clipboard",
            Self::None => "none",
        }
    }

    /// All accepted spellings
    pub const fn all() -> &'static [&'static str] {
        &["clipboard", "none"]
    }
}

impl FromStr for ShareBackend {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "clipboard" => Ok(Self::Clipboard),
            "none" | "off" => Ok(Self::None),
            _ => Err(ConfigError::ValidationError {
                key: "share".to_string(),
                message: format!(
                    "Invalid value '{}'. Valid options: {}",
                    s,
                    Self::all().join(", ")
                ),
            }),
        }
    }
}

impl fmt::Display for ShareBackend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Application configuration.
/// All fields are optional to support partial configs and merging.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppConfig {
    pub notes_dir: Option<String>,
    pub share: Option<String>,
    pub log_level: Option<String>,
}

impl AppConfig {
    /// Create config with default values
    pub fn defaults() -> Self {
        Self {
            notes_dir: Some(default_notes_dir().to_string_lossy().to_string()),
            share: Some(ShareBackend::default().to_string()),
            log_level: Some(DEFAULT_LOG_LEVEL.to_string()),
        }
    }

    /// Create an empty config (all None)
    pub fn empty() -> Self {
        Self::default()
    }

    /// Merge this config with another, where other takes precedence.
    /// Only non-None values from other will override this.
    pub fn merge(self, other: Self) -> Self {
        Self {
            notes_dir: other.notes_dir.or(self.notes_dir),
            share: other.share.or(self.share),
            log_level: other.log_level.or(self.log_level),
        }
    }

    /// Note directory, or the platform default if not set
    pub fn notes_dir_or_default(&self) -> PathBuf {
        self.notes_dir
            .as_ref()
            .filter(|s| !s.trim().is_empty())
            .map(PathBuf::from)
            .unwrap_or_else(default_notes_dir)
    }

    /// Share backend, or clipboard if not set/invalid
    pub fn share_or_default(&self) -> ShareBackend {
        self.share
            .as_ref()
            .and_then(|s| s.parse().ok())
            .unwrap_or_default()
    }

    /// Log level, or "warn" if not set/invalid
    pub fn log_level_or_default(&self) -> &str {
        self.log_level
            .as_deref()
            .filter(|l| VALID_LOG_LEVELS.contains(l))
            .unwrap_or(DEFAULT_LOG_LEVEL)
    }
}

/// Platform data directory for notes, e.g. `~/.local/share/voice-notes/voice_notes`
pub fn default_notes_dir() -> PathBuf {
    dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(APP_DIR_NAME)
        .join(NOTES_DIR_NAME)
}
