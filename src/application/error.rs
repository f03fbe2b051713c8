//! Error taxonomy shared by the application components
//!
//! Every capability provider failure is converted into one of these
//! variants at the component boundary.

use thiserror::Error;

use crate::domain::error::InvalidNoteName;
use crate::domain::recording::InvalidStateTransition;

use super::ports::{PlaybackError, RecordingError, ShareError, StorageError};

/// Errors reported by the voice note components
#[derive(Debug, Clone, Error)]
pub enum MemoError {
    #[error("Microphone permission denied. Grant microphone access and restart to record")]
    PermissionDenied,

    #[error("{0}")]
    InvalidState(#[from] InvalidStateTransition),

    #[error("Recorder fault: {0}")]
    RecorderFault(#[from] RecordingError),

    #[error("Playback fault: {0}")]
    PlaybackFault(#[from] PlaybackError),

    #[error("Storage fault: {0}")]
    StorageFault(#[from] StorageError),

    #[error("{0}")]
    InvalidName(#[from] InvalidNoteName),

    #[error("No note named \"{0}\"")]
    NoteNotFound(String),

    #[error("Sharing is not available on this device")]
    ShareUnavailable,

    #[error("Share failed: {0}")]
    ShareFault(String),
}

impl From<ShareError> for MemoError {
    fn from(err: ShareError) -> Self {
        match err {
            ShareError::Unavailable => Self::ShareUnavailable,
            ShareError::ShareFailed(msg) => Self::ShareFault(msg),
        }
    }
}

impl MemoError {
    /// Short title for user-facing messages
    pub const fn title(&self) -> &'static str {
        match self {
            Self::PermissionDenied => "Permission denied",
            Self::InvalidState(_) => "Not now",
            Self::RecorderFault(_) => "Recording failed",
            Self::PlaybackFault(_) => "Playback failed",
            Self::StorageFault(_) => "Storage error",
            Self::InvalidName(_) => "Invalid name",
            Self::NoteNotFound(_) => "Not found",
            Self::ShareUnavailable | Self::ShareFault(_) => "Share failed",
        }
    }
}
