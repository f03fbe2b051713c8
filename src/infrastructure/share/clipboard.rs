//! Clipboard share sheet using arboard

use async_trait::async_trait;

use crate::application::ports::{ShareError, ShareSheet};

/// Shares a note by copying its path to the system clipboard
pub struct ClipboardShareSheet;

impl ClipboardShareSheet {
    pub fn new() -> Self {
        Self
    }
}

impl Default for ClipboardShareSheet {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ShareSheet for ClipboardShareSheet {
    async fn is_available(&self) -> bool {
        // arboard operations are blocking
        tokio::task::spawn_blocking(|| arboard::Clipboard::new().is_ok())
            .await
            .unwrap_or(false)
    }

    async fn share(&self, uri: &str) -> Result<(), ShareError> {
        let text = uri.to_owned();

        tokio::task::spawn_blocking(move || {
            let mut clipboard =
                arboard::Clipboard::new().map_err(|_| ShareError::Unavailable)?;

            clipboard
                .set_text(text)
                .map_err(|e| ShareError::ShareFailed(e.to_string()))
        })
        .await
        .map_err(|e| ShareError::ShareFailed(format!("Task join error: {}", e)))?
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    #[ignore = "Requires a display server"]
    async fn copies_uri_to_clipboard() {
        let sheet = ClipboardShareSheet::new();
        assert!(sheet.is_available().await);
        sheet.share("/notes/Note 1").await.unwrap();
        let text = arboard::Clipboard::new().unwrap().get_text().unwrap();
        assert_eq!(text, "/notes/Note 1");
    }
}
