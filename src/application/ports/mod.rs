//! Port interfaces (traits) for external systems
//!
//! These traits define the boundaries between the application
//! and infrastructure layers.

pub mod config;
pub mod permission;
pub mod playback;
pub mod recorder;
pub mod share;
pub mod storage;

// Re-export common types
pub use config::ConfigStore;
pub use permission::{MicrophonePermission, PermissionError, PermissionStatus};
pub use playback::{AudioPlayer, PlaybackError, PlaybackHandle};
pub use recorder::{AudioCapture, RecordingError};
pub use share::{ShareError, ShareSheet};
pub use storage::{NoteStorage, StorageError, StoredEntry};
