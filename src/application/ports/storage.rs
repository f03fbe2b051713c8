//! Durable storage port interface

use std::path::Path;
use std::time::SystemTime;

use async_trait::async_trait;
use thiserror::Error;

/// Storage errors
#[derive(Debug, Clone, Error)]
pub enum StorageError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Already exists: {0}")]
    AlreadyExists(String),

    #[error("Failed to list {path}: {message}")]
    ListFailed { path: String, message: String },

    #[error("Failed to copy {src} to {dst}: {message}")]
    CopyFailed {
        src: String,
        dst: String,
        message: String,
    },

    #[error("Failed to remove {path}: {message}")]
    RemoveFailed { path: String, message: String },
}

/// One file found in a storage directory
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredEntry {
    /// File name inside the directory
    pub file_name: String,
    /// Full path of the file
    pub uri: String,
    /// Creation time (modification time where creation time is unknown)
    pub created_at: SystemTime,
}

/// Port for the flat note directory
#[async_trait]
pub trait NoteStorage: Send + Sync {
    /// List regular files in `dir`.
    async fn list(&self, dir: &Path) -> Result<Vec<StoredEntry>, StorageError>;

    /// Copy `src` to `dst`, never overwriting an existing `dst`.
    ///
    /// # Returns
    /// The stored entry for `dst`
    async fn copy(&self, src: &str, dst: &Path) -> Result<StoredEntry, StorageError>;

    /// Remove the file at `uri`. Fails with `NotFound` if it is already gone.
    async fn remove(&self, uri: &str) -> Result<(), StorageError>;
}
