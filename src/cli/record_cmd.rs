//! Interactive recording

use std::future::Future;

use tracing::debug;

use crate::application::ports::{AudioCapture, MicrophonePermission, NoteStorage};
use crate::application::{MemoError, RecordingController};
use crate::domain::note::{NoteName, VoiceNote};

use super::args::RecordOptions;
use super::presenter::Presenter;
use super::signals::StopRequest;

/// Record until `stop` resolves, then save or discard the clip.
///
/// Returns the saved note, or `None` when the clip was discarded.
pub async fn record_note<C, P, S, F>(
    controller: &RecordingController<C, P, S>,
    options: &RecordOptions,
    presenter: &mut Presenter,
    stop: F,
) -> Result<Option<VoiceNote>, MemoError>
where
    C: AudioCapture,
    P: MicrophonePermission,
    S: NoteStorage,
    F: Future<Output = StopRequest>,
{
    // Reject an unusable name before the microphone opens
    if let Some(raw) = options.name.as_deref() {
        NoteName::parse(raw)?;
    }

    controller.start().await?;
    presenter.show_recording();

    let mut elapsed = controller.subscribe_elapsed();
    tokio::pin!(stop);

    let request = loop {
        tokio::select! {
            request = &mut stop => break request,
            Ok(()) = elapsed.changed() => {
                presenter.update_recording(*elapsed.borrow_and_update());
            }
        }
    };
    debug!(?request, "stop requested");

    let clip = match controller.stop().await {
        Ok(clip) => clip,
        Err(e) => {
            presenter.spinner_fail("Recording failed");
            return Err(e);
        }
    };
    presenter.spinner_success(&format!("Recorded {}", clip.elapsed));

    if options.discard {
        controller.discard().await?;
        presenter.info("Recording discarded");
        return Ok(None);
    }

    match controller.save(options.name.as_deref()).await {
        Ok(note) => {
            presenter.success(&format!("Saved \"{}\"", note.name()));
            presenter.output(note.uri());
            Ok(Some(note))
        }
        Err(e) => {
            presenter.warn(&format!("Unsaved clip kept at {}", clip.uri));
            Err(e)
        }
    }
}
