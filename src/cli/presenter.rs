//! CLI presenter for output formatting

use std::time::SystemTime;

use chrono::{DateTime, Local};
use colored::*;
use indicatif::{ProgressBar, ProgressStyle};

use crate::domain::note::VoiceNote;
use crate::domain::recording::Elapsed;

/// Timestamp format used in note listings
const CREATED_FORMAT: &str = "%Y-%m-%d %H:%M";

/// Presenter for CLI output formatting
pub struct Presenter {
    spinner: Option<ProgressBar>,
}

impl Presenter {
    /// Create a new presenter
    pub fn new() -> Self {
        Self { spinner: None }
    }

    /// Start a spinner with message
    pub fn start_spinner(&mut self, message: &str) {
        let spinner = ProgressBar::new_spinner();
        let style = ProgressStyle::default_spinner()
            .tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏")
            .template("{spinner:.cyan} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner());
        spinner.set_style(style);
        spinner.set_message(message.to_string());
        spinner.enable_steady_tick(std::time::Duration::from_millis(80));
        self.spinner = Some(spinner);
    }

    /// Update spinner message
    pub fn update_spinner(&self, message: &str) {
        if let Some(ref spinner) = self.spinner {
            spinner.set_message(message.to_string());
        }
    }

    /// Mark spinner as success and finish
    pub fn spinner_success(&mut self, message: &str) {
        if let Some(spinner) = self.spinner.take() {
            spinner.finish_with_message(format!("{} {}", "✓".green(), message));
        }
    }

    /// Mark spinner as failed and finish
    pub fn spinner_fail(&mut self, message: &str) {
        if let Some(spinner) = self.spinner.take() {
            spinner.finish_with_message(format!("{} {}", "✗".red(), message));
        }
    }

    /// Print info message to stderr
    pub fn info(&self, message: &str) {
        eprintln!("{} {}", "ℹ".cyan(), message);
    }

    /// Print success message to stderr
    pub fn success(&self, message: &str) {
        eprintln!("{} {}", "✓".green(), message);
    }

    /// Print warning message to stderr
    pub fn warn(&self, message: &str) {
        eprintln!("{} {}", "⚠".yellow(), message);
    }

    /// Print error message to stderr
    pub fn error(&self, message: &str) {
        eprintln!("{} {}", "✗".red(), message);
    }

    /// Output text to stdout
    pub fn output(&self, text: &str) {
        println!("{}", text);
    }

    /// Recording timer line
    pub fn format_recording(&self, elapsed: Elapsed) -> String {
        format!(
            "{} {:>6}  {}",
            "●".red(),
            elapsed.to_string(),
            "(Enter or Ctrl-C to stop)".dimmed()
        )
    }

    /// Show the recording timer
    pub fn show_recording(&mut self) {
        let line = self.format_recording(Elapsed::ZERO);
        self.start_spinner(&line);
    }

    /// Update the recording timer
    pub fn update_recording(&self, elapsed: Elapsed) {
        self.update_spinner(&self.format_recording(elapsed));
    }

    /// One listing line: created time then name
    pub fn format_note(&self, note: &VoiceNote) -> String {
        format!("{}  {}", format_created(note.created_at()).dimmed(), note.name())
    }

    /// Print notes to stdout, one per line
    pub fn note_list(&self, notes: &[VoiceNote]) {
        for note in notes {
            self.output(&self.format_note(note));
        }
    }

    /// Print a key-value pair (for config list)
    pub fn key_value(&self, key: &str, value: &str) {
        println!("{}: {}", key.cyan(), value);
    }
}

impl Default for Presenter {
    fn default() -> Self {
        Self::new()
    }
}

/// Local time of a note's creation
pub fn format_created(created_at: SystemTime) -> String {
    DateTime::<Local>::from(created_at)
        .format(CREATED_FORMAT)
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn format_recording_shows_elapsed() {
        let presenter = Presenter::new();
        assert!(presenter
            .format_recording(Elapsed::from_secs(150))
            .contains("2m30s"));
    }

    #[test]
    fn format_note_has_name_and_date() {
        colored::control::set_override(false);
        let presenter = Presenter::new();
        let created = SystemTime::UNIX_EPOCH + Duration::from_secs(1_700_000_000);
        let note = VoiceNote::new("Groceries", "/notes/Groceries", created);

        let line = presenter.format_note(&note);
        assert!(line.ends_with("  Groceries"));
        assert!(line.starts_with("2023-11-1"));
    }

    #[test]
    fn format_created_is_minute_precision() {
        let formatted = format_created(SystemTime::UNIX_EPOCH + Duration::from_secs(1_700_000_000));
        assert_eq!(formatted.len(), "2023-11-14 22:13".len());
    }
}
