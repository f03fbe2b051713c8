//! Share sheet port interface

use async_trait::async_trait;
use thiserror::Error;

/// Share errors
#[derive(Debug, Clone, Error)]
pub enum ShareError {
    #[error("Sharing is not available on this device")]
    Unavailable,

    #[error("Failed to share: {0}")]
    ShareFailed(String),
}

/// Port for handing a stored clip to the platform's share mechanism
#[async_trait]
pub trait ShareSheet: Send + Sync {
    /// Whether sharing can be attempted at all
    async fn is_available(&self) -> bool;

    /// Share the resource at `uri`. Best effort.
    async fn share(&self, uri: &str) -> Result<(), ShareError>;
}

/// Blanket implementation for boxed share sheet types
#[async_trait]
impl ShareSheet for Box<dyn ShareSheet> {
    async fn is_available(&self) -> bool {
        self.as_ref().is_available().await
    }

    async fn share(&self, uri: &str) -> Result<(), ShareError> {
        self.as_ref().share(uri).await
    }
}
