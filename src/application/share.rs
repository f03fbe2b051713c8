//! Note sharing

use tracing::{info, warn};

use crate::domain::note::VoiceNote;

use super::error::MemoError;
use super::ports::ShareSheet;

/// Hands persisted notes to the share sheet
pub struct NoteSharer<H>
where
    H: ShareSheet,
{
    sheet: H,
}

impl<H> NoteSharer<H>
where
    H: ShareSheet,
{
    pub fn new(sheet: H) -> Self {
        Self { sheet }
    }

    /// Whether the share sheet can be used at all
    pub async fn is_available(&self) -> bool {
        self.sheet.is_available().await
    }

    /// Share one note. Availability is checked first; no retry on failure.
    pub async fn share(&self, note: &VoiceNote) -> Result<(), MemoError> {
        if !self.sheet.is_available().await {
            return Err(MemoError::ShareUnavailable);
        }

        self.sheet.share(note.uri()).await.map_err(|e| {
            warn!(name = note.name(), error = %e, "share failed");
            MemoError::from(e)
        })?;

        info!(name = note.name(), "note shared");
        Ok(())
    }
}
