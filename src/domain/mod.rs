//! Domain layer - Core business logic
//!
//! Contains value objects, entities, and domain errors.
//! This layer has no dependencies on external systems.

pub mod config;
pub mod error;
pub mod note;
pub mod recording;

// Re-export common types
pub use config::AppConfig;
pub use error::*;
pub use note::{filter_notes, NoteName, VoiceNote};
pub use recording::{Elapsed, InvalidStateTransition, RecordingSession, SessionPhase, SessionState};
