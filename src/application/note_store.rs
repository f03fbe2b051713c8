//! Durable note collection
//!
//! Mirrors the flat note directory in memory. Only this component writes into
//! that directory.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use tokio::sync::Mutex;
use tracing::{debug, info, warn};

use crate::domain::note::{NoteName, VoiceNote};

use super::error::MemoError;
use super::ports::{NoteStorage, StorageError};

/// Upper bound on names tried when the directory holds files the store has not loaded
const MAX_NAME_ATTEMPTS: usize = 100;

/// Collection of persisted voice notes
pub struct NoteStore<S>
where
    S: NoteStorage,
{
    storage: S,
    dir: PathBuf,
    notes: Mutex<Vec<VoiceNote>>,
}

impl<S> NoteStore<S>
where
    S: NoteStorage,
{
    /// Create an empty store over `dir`. Call `load_all` to populate it.
    pub fn new(storage: S, dir: impl Into<PathBuf>) -> Self {
        Self {
            storage,
            dir: dir.into(),
            notes: Mutex::new(Vec::new()),
        }
    }

    /// Directory holding the note files
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Re-read the note directory.
    ///
    /// A listing failure (e.g. the directory does not exist yet) yields an
    /// empty collection and is logged.
    pub async fn load_all(&self) -> Vec<VoiceNote> {
        let mut notes = self.notes.lock().await;

        let mut loaded: Vec<VoiceNote> = match self.storage.list(&self.dir).await {
            Ok(entries) => entries
                .into_iter()
                .filter(|e| !e.file_name.starts_with('.'))
                .map(|e| VoiceNote::new(e.file_name, e.uri, e.created_at))
                .collect(),
            Err(e) => {
                warn!(dir = %self.dir.display(), error = %e, "could not list notes, starting empty");
                Vec::new()
            }
        };
        loaded.sort_by(VoiceNote::display_order);

        debug!(count = loaded.len(), "notes loaded");
        *notes = loaded.clone();
        loaded
    }

    /// Snapshot of the notes in display order
    pub async fn notes(&self) -> Vec<VoiceNote> {
        self.notes.lock().await.clone()
    }

    /// Number of notes
    pub async fn len(&self) -> usize {
        self.notes.lock().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.notes.lock().await.is_empty()
    }

    /// Note with exactly this name
    pub async fn find(&self, name: &str) -> Option<VoiceNote> {
        self.notes
            .lock()
            .await
            .iter()
            .find(|n| n.name() == name)
            .cloned()
    }

    /// Copy `source_uri` into the note directory as a new note.
    ///
    /// The name is made unique by suffixing ` (2)`, ` (3)`, ... On failure the
    /// collection is unchanged.
    pub async fn add(&self, source_uri: &str, desired: NoteName) -> Result<VoiceNote, MemoError> {
        let mut notes = self.notes.lock().await;
        let mut taken_on_disk: HashSet<String> = HashSet::new();

        for _ in 0..MAX_NAME_ATTEMPTS {
            let name = desired.clone().disambiguate(|candidate| {
                taken_on_disk.contains(candidate) || notes.iter().any(|n| n.name() == candidate)
            });
            let dst = self.dir.join(name.as_str());

            match self.storage.copy(source_uri, &dst).await {
                Ok(entry) => {
                    let note = VoiceNote::new(name.into_string(), entry.uri, entry.created_at);
                    info!(name = note.name(), uri = note.uri(), "note saved");
                    notes.push(note.clone());
                    return Ok(note);
                }
                Err(StorageError::AlreadyExists(_)) => {
                    debug!(name = name.as_str(), "name taken on disk, trying next");
                    taken_on_disk.insert(name.into_string());
                }
                Err(e) => {
                    warn!(error = %e, "saving note failed");
                    return Err(e.into());
                }
            }
        }

        Err(StorageError::AlreadyExists(desired.into_string()).into())
    }

    /// Remove a note and its audio.
    ///
    /// The entry is only dropped once the audio is gone; if removal fails the
    /// note stays listed.
    pub async fn delete(&self, note: &VoiceNote) -> Result<(), MemoError> {
        let mut notes = self.notes.lock().await;

        let index = notes
            .iter()
            .position(|n| n.uri() == note.uri())
            .ok_or_else(|| MemoError::NoteNotFound(note.name().to_string()))?;

        match self.storage.remove(note.uri()).await {
            Ok(()) => {}
            Err(StorageError::NotFound(_)) => {
                debug!(uri = note.uri(), "note audio already gone");
            }
            Err(e) => {
                warn!(name = note.name(), error = %e, "deleting note failed");
                return Err(e.into());
            }
        }

        notes.remove(index);
        info!(name = note.name(), "note deleted");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::ports::StoredEntry;
    use async_trait::async_trait;
    use std::collections::BTreeMap;
    use std::sync::atomic::{AtomicBool, Ordering};
    use std::sync::Mutex as StdMutex;
    use std::time::{Duration, SystemTime};

    /// In-memory directory: uri -> created time
    struct MemoryStorage {
        files: StdMutex<BTreeMap<String, SystemTime>>,
        fail_list: AtomicBool,
        fail_copy: AtomicBool,
        fail_remove: AtomicBool,
        clock: StdMutex<u64>,
    }

    impl MemoryStorage {
        fn new() -> Self {
            Self {
                files: StdMutex::new(BTreeMap::new()),
                fail_list: AtomicBool::new(false),
                fail_copy: AtomicBool::new(false),
                fail_remove: AtomicBool::new(false),
                clock: StdMutex::new(0),
            }
        }

        fn tick(&self) -> SystemTime {
            let mut clock = self.clock.lock().unwrap();
            *clock += 1;
            SystemTime::UNIX_EPOCH + Duration::from_secs(*clock)
        }

        fn put(&self, uri: &str) {
            let at = self.tick();
            self.files.lock().unwrap().insert(uri.to_string(), at);
        }

        fn contains(&self, uri: &str) -> bool {
            self.files.lock().unwrap().contains_key(uri)
        }
    }

    #[async_trait]
    impl NoteStorage for MemoryStorage {
        async fn list(&self, dir: &Path) -> Result<Vec<StoredEntry>, StorageError> {
            if self.fail_list.load(Ordering::SeqCst) {
                return Err(StorageError::ListFailed {
                    path: dir.display().to_string(),
                    message: "missing".into(),
                });
            }
            let files = self.files.lock().unwrap();
            Ok(files
                .iter()
                .filter_map(|(uri, at)| {
                    let path = Path::new(uri);
                    if path.parent() != Some(dir) {
                        return None;
                    }
                    Some(StoredEntry {
                        file_name: path.file_name()?.to_string_lossy().to_string(),
                        uri: uri.clone(),
                        created_at: *at,
                    })
                })
                .collect())
        }

        async fn copy(&self, src: &str, dst: &Path) -> Result<StoredEntry, StorageError> {
            let dst_uri = dst.display().to_string();
            if self.fail_copy.load(Ordering::SeqCst) {
                return Err(StorageError::CopyFailed {
                    src: src.into(),
                    dst: dst_uri,
                    message: "disk full".into(),
                });
            }
            if !self.contains(src) {
                return Err(StorageError::NotFound(src.into()));
            }
            if self.contains(&dst_uri) {
                return Err(StorageError::AlreadyExists(dst_uri));
            }
            let at = self.tick();
            self.files.lock().unwrap().insert(dst_uri.clone(), at);
            Ok(StoredEntry {
                file_name: dst.file_name().unwrap().to_string_lossy().to_string(),
                uri: dst_uri,
                created_at: at,
            })
        }

        async fn remove(&self, uri: &str) -> Result<(), StorageError> {
            if self.fail_remove.load(Ordering::SeqCst) {
                return Err(StorageError::RemoveFailed {
                    path: uri.into(),
                    message: "busy".into(),
                });
            }
            match self.files.lock().unwrap().remove(uri) {
                Some(_) => Ok(()),
                None => Err(StorageError::NotFound(uri.into())),
            }
        }
    }

    const DIR: &str = "/notes";

    fn store_with_clip() -> NoteStore<MemoryStorage> {
        let storage = MemoryStorage::new();
        storage.put("/staging/clip.flac");
        NoteStore::new(storage, DIR)
    }

    fn name(s: &str) -> NoteName {
        NoteName::parse(s).unwrap()
    }

    #[tokio::test]
    async fn load_all_missing_dir_is_empty() {
        let storage = MemoryStorage::new();
        storage.fail_list.store(true, Ordering::SeqCst);
        let store = NoteStore::new(storage, DIR);

        assert!(store.load_all().await.is_empty());
        assert!(store.is_empty().await);
    }

    #[tokio::test]
    async fn load_all_orders_by_creation_and_skips_hidden() {
        let storage = MemoryStorage::new();
        storage.put("/notes/Second");
        storage.put("/notes/.DS_Store");
        storage.put("/notes/Third");
        storage.put("/elsewhere/Other");
        storage.files.lock().unwrap().insert(
            "/notes/First".into(),
            SystemTime::UNIX_EPOCH,
        );
        let store = NoteStore::new(storage, DIR);

        let names: Vec<String> = store
            .load_all()
            .await
            .iter()
            .map(|n| n.name().to_string())
            .collect();
        assert_eq!(names, vec!["First", "Second", "Third"]);
    }

    #[tokio::test]
    async fn add_then_load_round_trips_once() {
        let store = store_with_clip();
        let note = store.add("/staging/clip.flac", name("Idea")).await.unwrap();
        assert_eq!(note.name(), "Idea");
        assert_eq!(note.uri(), "/notes/Idea");

        let loaded = store.load_all().await;
        assert_eq!(loaded.iter().filter(|n| n.name() == "Idea").count(), 1);
    }

    #[tokio::test]
    async fn add_disambiguates_known_names() {
        let store = store_with_clip();
        store.add("/staging/clip.flac", name("Idea")).await.unwrap();
        let second = store.add("/staging/clip.flac", name("Idea")).await.unwrap();
        let third = store.add("/staging/clip.flac", name("Idea")).await.unwrap();

        assert_eq!(second.name(), "Idea (2)");
        assert_eq!(third.name(), "Idea (3)");
        assert_eq!(store.len().await, 3);
    }

    #[tokio::test]
    async fn add_skips_names_taken_on_disk_but_not_loaded() {
        let store = store_with_clip();
        store.storage.put("/notes/Idea");

        let note = store.add("/staging/clip.flac", name("Idea")).await.unwrap();
        assert_eq!(note.name(), "Idea (2)");
    }

    #[tokio::test]
    async fn add_failure_leaves_store_unchanged() {
        let store = store_with_clip();
        store.add("/staging/clip.flac", name("Keep")).await.unwrap();
        store.storage.fail_copy.store(true, Ordering::SeqCst);

        let err = store
            .add("/staging/clip.flac", name("Lost"))
            .await
            .unwrap_err();
        assert!(matches!(err, MemoError::StorageFault(_)));
        assert_eq!(store.len().await, 1);
        assert!(store.find("Lost").await.is_none());
    }

    #[tokio::test]
    async fn delete_removes_entry_and_resource() {
        let store = store_with_clip();
        let note = store.add("/staging/clip.flac", name("Gone")).await.unwrap();

        store.delete(&note).await.unwrap();

        assert!(store.find("Gone").await.is_none());
        assert!(!store.storage.contains(note.uri()));
        assert!(store.load_all().await.iter().all(|n| n.name() != "Gone"));
    }

    #[tokio::test]
    async fn delete_failure_keeps_entry() {
        let store = store_with_clip();
        let note = store.add("/staging/clip.flac", name("Stuck")).await.unwrap();
        store.storage.fail_remove.store(true, Ordering::SeqCst);

        let err = store.delete(&note).await.unwrap_err();
        assert!(matches!(err, MemoError::StorageFault(_)));
        assert!(store.find("Stuck").await.is_some());
        assert!(store.storage.contains(note.uri()));
    }

    #[tokio::test]
    async fn delete_of_vanished_resource_drops_entry() {
        let store = store_with_clip();
        let note = store.add("/staging/clip.flac", name("Vanished")).await.unwrap();
        store.storage.files.lock().unwrap().remove(note.uri());

        store.delete(&note).await.unwrap();
        assert!(store.is_empty().await);
    }

    #[tokio::test]
    async fn delete_unknown_note_fails() {
        let store = store_with_clip();
        let stranger = VoiceNote::new("Nobody", "/notes/Nobody", SystemTime::UNIX_EPOCH);

        let err = store.delete(&stranger).await.unwrap_err();
        assert!(matches!(err, MemoError::NoteNotFound(n) if n == "Nobody"));
    }
}
