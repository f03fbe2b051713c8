//! Audio capture port interface

use async_trait::async_trait;
use thiserror::Error;

/// Recording errors
#[derive(Debug, Clone, Error)]
pub enum RecordingError {
    #[error("Failed to start recording: {0}")]
    StartFailed(String),

    #[error("Recording failed: {0}")]
    RecordingFailed(String),

    #[error("Failed to write audio file: {0}")]
    WriteFailed(String),

    #[error("No audio device available")]
    NoAudioDevice,
}

/// Port for unbounded audio capture.
///
/// One capture is live at a time. `stop` finalizes the clip into a transient
/// resource owned by the caller until it is saved elsewhere or discarded.
#[async_trait]
pub trait AudioCapture: Send + Sync {
    /// Open the microphone and begin capturing.
    /// Returns once audio is flowing.
    async fn start(&self) -> Result<(), RecordingError>;

    /// Stop capturing and finalize the clip.
    ///
    /// # Returns
    /// URI of the transient clip
    async fn stop(&self) -> Result<String, RecordingError>;

    /// Abandon the live capture, releasing anything it created.
    async fn cancel(&self) -> Result<(), RecordingError>;

    /// Destroy a transient clip produced by `stop`.
    async fn discard(&self, uri: &str) -> Result<(), RecordingError>;
}
