//! Microphone permission via device presence
//!
//! Desktop platforms have no runtime prompt here; access counts as granted
//! when the host exposes a default input device.

use async_trait::async_trait;
use tracing::debug;

use crate::application::ports::{MicrophonePermission, PermissionError, PermissionStatus};
use crate::infrastructure::recording::CpalRecorder;

/// Permission provider backed by cpal device enumeration
pub struct CpalMicrophonePermission;

impl CpalMicrophonePermission {
    pub fn new() -> Self {
        Self
    }
}

impl Default for CpalMicrophonePermission {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl MicrophonePermission for CpalMicrophonePermission {
    async fn request(&self) -> Result<PermissionStatus, PermissionError> {
        let present = tokio::task::spawn_blocking(CpalRecorder::has_input_device)
            .await
            .map_err(|e| PermissionError::RequestFailed(format!("Task join error: {}", e)))?;

        debug!(input_device = present, "checked for microphone");
        Ok(if present {
            PermissionStatus::Granted
        } else {
            PermissionStatus::Denied
        })
    }
}
