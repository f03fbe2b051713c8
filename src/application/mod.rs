//! Application layer - Components and port interfaces
//!
//! Contains the voice note components (permission gate, recording
//! controller, note store, playback controller, sharer) and the trait
//! definitions for the capability providers they drive.

pub mod error;
pub mod note_store;
pub mod permission_gate;
pub mod playback;
pub mod ports;
pub mod recording;
pub mod share;

// Re-export components
pub use error::MemoError;
pub use note_store::NoteStore;
pub use permission_gate::PermissionGate;
pub use playback::PlaybackController;
pub use recording::{RecordingController, StoppedClip};
pub use share::NoteSharer;
