//! Filesystem note storage
//!
//! Notes are plain files in one flat directory. Copies never overwrite.

use std::io::ErrorKind;
use std::path::Path;
use std::time::SystemTime;

use async_trait::async_trait;
use tokio::fs::{self, OpenOptions};
use tracing::debug;

use crate::application::ports::{NoteStorage, StorageError, StoredEntry};

/// Note storage on the local filesystem
pub struct FsNoteStorage;

impl FsNoteStorage {
    pub fn new() -> Self {
        Self
    }
}

impl Default for FsNoteStorage {
    fn default() -> Self {
        Self::new()
    }
}

/// Creation time, falling back to modification time
fn created_at(meta: &std::fs::Metadata) -> SystemTime {
    meta.created()
        .or_else(|_| meta.modified())
        .unwrap_or(SystemTime::UNIX_EPOCH)
}

fn display(path: &Path) -> String {
    path.to_string_lossy().into_owned()
}

#[async_trait]
impl NoteStorage for FsNoteStorage {
    async fn list(&self, dir: &Path) -> Result<Vec<StoredEntry>, StorageError> {
        let list_failed = |e: std::io::Error| StorageError::ListFailed {
            path: display(dir),
            message: e.to_string(),
        };

        let mut entries = match fs::read_dir(dir).await {
            Ok(entries) => entries,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(list_failed(e)),
        };

        let mut found = Vec::new();
        while let Some(entry) = entries.next_entry().await.map_err(list_failed)? {
            let meta = entry.metadata().await.map_err(list_failed)?;
            if !meta.is_file() {
                continue;
            }
            found.push(StoredEntry {
                file_name: entry.file_name().to_string_lossy().into_owned(),
                uri: display(&entry.path()),
                created_at: created_at(&meta),
            });
        }

        debug!(dir = %dir.display(), count = found.len(), "listed note directory");
        Ok(found)
    }

    async fn copy(&self, src: &str, dst: &Path) -> Result<StoredEntry, StorageError> {
        let copy_failed = |e: std::io::Error| StorageError::CopyFailed {
            src: src.to_string(),
            dst: display(dst),
            message: e.to_string(),
        };

        let mut source = match fs::File::open(src).await {
            Ok(file) => file,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                return Err(StorageError::NotFound(src.to_string()))
            }
            Err(e) => return Err(copy_failed(e)),
        };

        if let Some(parent) = dst.parent() {
            fs::create_dir_all(parent).await.map_err(copy_failed)?;
        }

        let mut target = match OpenOptions::new().write(true).create_new(true).open(dst).await {
            Ok(file) => file,
            Err(e) if e.kind() == ErrorKind::AlreadyExists => {
                return Err(StorageError::AlreadyExists(display(dst)))
            }
            Err(e) => return Err(copy_failed(e)),
        };

        let written = match tokio::io::copy(&mut source, &mut target).await {
            Ok(_) => target.sync_all().await,
            Err(e) => Err(e),
        };
        drop(target);

        if let Err(e) = written {
            let _ = fs::remove_file(dst).await;
            return Err(copy_failed(e));
        }

        let meta = fs::metadata(dst).await.map_err(copy_failed)?;
        Ok(StoredEntry {
            file_name: dst
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_default(),
            uri: display(dst),
            created_at: created_at(&meta),
        })
    }

    async fn remove(&self, uri: &str) -> Result<(), StorageError> {
        match fs::remove_file(uri).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Err(StorageError::NotFound(uri.into())),
            Err(e) => Err(StorageError::RemoveFailed {
                path: uri.to_string(),
                message: e.to_string(),
            }),
        }
    }
}
