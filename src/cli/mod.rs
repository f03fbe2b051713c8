//! CLI layer - Command-line interface
//!
//! Contains argument parsing, output formatting, stop handling,
//! and the command handlers.

pub mod app;
pub mod args;
pub mod config_cmd;
pub mod notes_cmd;
pub mod presenter;
pub mod record_cmd;
pub mod signals;

// Re-export commonly used types
pub use app::{run_command, EXIT_ERROR, EXIT_SUCCESS, EXIT_USAGE_ERROR};
pub use args::{Cli, Commands, ConfigAction, RecordOptions};
pub use presenter::Presenter;
