//! Audio playback port interface

use async_trait::async_trait;
use thiserror::Error;

/// Errors that can occur during playback
#[derive(Error, Debug, Clone)]
pub enum PlaybackError {
    /// The URI does not point at a readable resource
    #[error("Cannot open audio '{uri}': {message}")]
    OpenFailed { uri: String, message: String },

    /// The resource could not be decoded
    #[error("Cannot decode audio '{uri}': {message}")]
    DecodeFailed { uri: String, message: String },

    /// No audio output device available
    #[error("Audio device not available: {0}")]
    DeviceNotAvailable(String),

    /// Failed to stop playback
    #[error("Failed to stop playback: {0}")]
    StopFailed(String),
}

/// A live playback bound to one URI
#[async_trait]
pub trait PlaybackHandle: Send + Sync {
    /// Stop playing and release the output.
    async fn stop(&mut self) -> Result<(), PlaybackError>;

    /// Whether the clip has played to its end
    fn is_finished(&self) -> bool;
}

/// Port for opening audio resources for playback
#[async_trait]
pub trait AudioPlayer: Send + Sync {
    /// Open `uri` and start playing it.
    async fn open(&self, uri: &str) -> Result<Box<dyn PlaybackHandle>, PlaybackError>;
}
