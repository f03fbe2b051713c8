//! Microphone permission port interface

use std::fmt;

use async_trait::async_trait;
use thiserror::Error;

/// Outcome of a microphone permission request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PermissionStatus {
    Granted,
    Denied,
}

impl PermissionStatus {
    pub const fn is_granted(&self) -> bool {
        matches!(self, Self::Granted)
    }

    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Granted => "granted",
            Self::Denied => "denied",
        }
    }
}

impl fmt::Display for PermissionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Permission provider errors
#[derive(Debug, Clone, Error)]
pub enum PermissionError {
    #[error("Permission request failed: {0}")]
    RequestFailed(String),
}

/// Port for asking the platform for microphone access
#[async_trait]
pub trait MicrophonePermission: Send + Sync {
    /// Ask for microphone access. May prompt the user.
    async fn request(&self) -> Result<PermissionStatus, PermissionError>;
}
