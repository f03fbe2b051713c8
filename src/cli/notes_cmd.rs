//! Handlers for note commands: list, play, delete, share

use std::future::Future;

use tracing::debug;

use crate::application::ports::{AudioPlayer, NoteStorage, ShareSheet};
use crate::application::{MemoError, NoteSharer, NoteStore, PlaybackController};
use crate::domain::note::{filter_notes, VoiceNote};

use super::presenter::Presenter;

/// Look up a note by exact name in the loaded store
pub async fn find_note<S: NoteStorage>(
    store: &NoteStore<S>,
    name: &str,
) -> Result<VoiceNote, MemoError> {
    store
        .find(name)
        .await
        .ok_or_else(|| MemoError::NoteNotFound(name.to_string()))
}

/// Print notes whose names contain `query`
pub async fn handle_list<S: NoteStorage>(
    store: &NoteStore<S>,
    query: Option<&str>,
    presenter: &Presenter,
) -> Result<Vec<VoiceNote>, MemoError> {
    let notes = store.load_all().await;
    let matches = filter_notes(&notes, query.unwrap_or_default());

    if notes.is_empty() {
        presenter.info(&format!("No voice notes in {}", store.dir().display()));
    } else if matches.is_empty() {
        presenter.info("No notes match");
    } else {
        presenter.note_list(&matches);
    }

    Ok(matches)
}

/// Play a note until it ends or `interrupt` resolves
pub async fn handle_play<S, A, I>(
    store: &NoteStore<S>,
    playback: &PlaybackController<A>,
    name: &str,
    presenter: &mut Presenter,
    interrupt: I,
) -> Result<(), MemoError>
where
    S: NoteStorage,
    A: AudioPlayer,
    I: Future<Output = ()>,
{
    store.load_all().await;
    let note = find_note(store, name).await?;

    playback.play(note.uri()).await?;
    presenter.start_spinner(&format!("Playing \"{}\"", note.name()));

    tokio::select! {
        _ = playback.wait_until_finished() => {
            presenter.spinner_success(&format!("Played \"{}\"", note.name()));
        }
        _ = interrupt => {
            debug!(name = note.name(), "playback interrupted");
            playback.stop().await?;
            presenter.spinner_fail(&format!("Stopped \"{}\"", note.name()));
        }
    }

    Ok(())
}

/// Delete a note by name
pub async fn handle_delete<S: NoteStorage>(
    store: &NoteStore<S>,
    name: &str,
    presenter: &Presenter,
) -> Result<(), MemoError> {
    store.load_all().await;
    let note = find_note(store, name).await?;

    store.delete(&note).await?;
    presenter.success(&format!("Deleted \"{}\"", note.name()));
    Ok(())
}

/// Share a note by name
pub async fn handle_share<S, H>(
    store: &NoteStore<S>,
    sharer: &NoteSharer<H>,
    name: &str,
    presenter: &Presenter,
) -> Result<(), MemoError>
where
    S: NoteStorage,
    H: ShareSheet,
{
    store.load_all().await;
    let note = find_note(store, name).await?;

    sharer.share(&note).await?;
    presenter.success(&format!("Shared \"{}\" ({})", note.name(), note.uri()));
    Ok(())
}
