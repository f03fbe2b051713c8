//! Disabled share sheet

use async_trait::async_trait;

use crate::application::ports::{ShareError, ShareSheet};

/// Share sheet that is never available
pub struct NoOpShareSheet;

impl NoOpShareSheet {
    pub fn new() -> Self {
        Self
    }
}

impl Default for NoOpShareSheet {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ShareSheet for NoOpShareSheet {
    async fn is_available(&self) -> bool {
        false
    }

    async fn share(&self, _uri: &str) -> Result<(), ShareError> {
        Err(ShareError::Unavailable)
    }
}
