//! CLI argument definitions using Clap

use clap::{Parser, Subcommand};

/// voice-notes - Record, play and organize voice notes
#[derive(Parser, Debug)]
#[command(name = "voice-notes")]
#[command(version)]
#[command(about = "Record, play and organize voice notes from the terminal")]
#[command(long_about = None)]
pub struct Cli {
    /// Directory holding voice notes (overrides config and VOICE_NOTES_DIR)
    #[arg(long, global = true, value_name = "DIR")]
    pub notes_dir: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

/// Subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Record a new note (press Enter or Ctrl-C to stop)
    Record {
        /// Name for the note (defaults to "Note <n>")
        #[arg(short = 'n', long, value_name = "NAME")]
        name: Option<String>,

        /// Throw the clip away instead of saving it
        #[arg(long, conflicts_with = "name")]
        discard: bool,
    },
    /// List notes, optionally filtered by name
    List {
        /// Case-insensitive text to look for in note names
        query: Option<String>,
    },
    /// Play a note until it ends or Ctrl-C is pressed
    Play {
        /// Note name
        name: String,
    },
    /// Delete a note
    Delete {
        /// Note name
        name: String,
    },
    /// Share a note
    Share {
        /// Note name
        name: String,
    },
    /// Manage configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

/// Config action subcommands
#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Create config file with defaults
    Init,
    /// Set a config value
    Set {
        /// Config key
        key: String,
        /// Config value
        value: String,
    },
    /// Get a config value
    Get {
        /// Config key
        key: String,
    },
    /// List all config values
    List,
    /// Show config file path
    Path,
}

/// Parsed record options
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecordOptions {
    pub name: Option<String>,
    pub discard: bool,
}

/// Valid config keys
pub const VALID_CONFIG_KEYS: &[&str] = &["notes_dir", "share", "log_level"];

/// Check if a config key is valid
pub fn is_valid_config_key(key: &str) -> bool {
    VALID_CONFIG_KEYS.contains(&key)
}
