//! Infrastructure layer - Adapter implementations
//!
//! Contains concrete implementations of the port interfaces,
//! integrating with cpal, rodio, arboard and the filesystem.

pub mod config;
pub mod permission;
pub mod playback;
pub mod recording;
pub mod share;
pub mod storage;

// Re-export adapters
pub use config::XdgConfigStore;
pub use permission::CpalMicrophonePermission;
pub use playback::RodioPlayer;
pub use recording::CpalRecorder;
pub use share::{create_share_sheet, ClipboardShareSheet, NoOpShareSheet};
pub use storage::FsNoteStorage;
