//! Recording session controller
//!
//! Drives the recording state machine against the capture provider, owns the
//! one-second elapsed ticker and hands finished clips to the note store.

use std::sync::Arc;
use std::time::SystemTime;

use tokio::sync::{watch, Mutex};
use tokio::task::JoinHandle;
use tokio::time::{interval_at, Instant};
use tracing::{debug, warn};

use crate::domain::note::{NoteName, VoiceNote};
use crate::domain::recording::{Elapsed, RecordingSession, SessionPhase};

use super::error::MemoError;
use super::note_store::NoteStore;
use super::permission_gate::PermissionGate;
use super::ports::{AudioCapture, MicrophonePermission, NoteStorage};

/// A clip that has been stopped but not yet saved or discarded
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoppedClip {
    /// Transient URI of the clip
    pub uri: String,
    /// Final elapsed time of the episode
    pub elapsed: Elapsed,
}

struct Inner {
    session: RecordingSession,
    ticker: Option<JoinHandle<()>>,
}

/// Controller for a single recording at a time
pub struct RecordingController<C, P, S>
where
    C: AudioCapture,
    P: MicrophonePermission,
    S: NoteStorage,
{
    capture: C,
    gate: Arc<PermissionGate<P>>,
    store: Arc<NoteStore<S>>,
    inner: Mutex<Inner>,
    elapsed: Arc<watch::Sender<Elapsed>>,
}

impl<C, P, S> RecordingController<C, P, S>
where
    C: AudioCapture,
    P: MicrophonePermission,
    S: NoteStorage,
{
    /// Create an idle controller
    pub fn new(capture: C, gate: Arc<PermissionGate<P>>, store: Arc<NoteStore<S>>) -> Self {
        let (elapsed, _) = watch::channel(Elapsed::ZERO);
        Self {
            capture,
            gate,
            store,
            inner: Mutex::new(Inner {
                session: RecordingSession::new(),
                ticker: None,
            }),
            elapsed: Arc::new(elapsed),
        }
    }

    /// Current session phase
    pub async fn state(&self) -> SessionPhase {
        self.inner.lock().await.session.phase()
    }

    /// Seconds counted so far in the current recording
    pub fn elapsed(&self) -> Elapsed {
        *self.elapsed.borrow()
    }

    /// Receiver that observes every tick of the elapsed counter
    pub fn subscribe_elapsed(&self) -> watch::Receiver<Elapsed> {
        self.elapsed.subscribe()
    }

    /// URI of the stopped clip awaiting save or discard
    pub async fn pending_uri(&self) -> Option<String> {
        self.inner
            .lock()
            .await
            .session
            .pending_uri()
            .map(str::to_owned)
    }

    /// Start recording.
    ///
    /// Requires granted microphone access. A stopped clip that was never saved
    /// is discarded first. While the recorder spins up the session is
    /// `Requesting` and further start/stop calls are rejected.
    pub async fn start(&self) -> Result<(), MemoError> {
        {
            let mut inner = self.inner.lock().await;
            self.gate.ensure_granted().await?;

            if inner.session.is_pending() {
                let uri = inner.session.take_pending("discard recording")?;
                debug!(%uri, "discarding unsaved clip before new recording");
                self.destroy_transient(&uri).await;
            }

            inner.session.begin_request()?;
        }

        let started = self.capture.start().await;

        let mut inner = self.inner.lock().await;
        if let Err(e) = started {
            warn!(error = %e, "recorder failed to start");
            if let Err(cleanup) = self.capture.cancel().await {
                warn!(error = %cleanup, "recorder cleanup failed");
            }
            inner.session.abort_request()?;
            return Err(e.into());
        }

        inner.session.recorder_ready(SystemTime::now())?;
        self.elapsed.send_replace(Elapsed::ZERO);
        inner.ticker = Some(self.spawn_ticker());
        debug!("recording started");
        Ok(())
    }

    /// Stop recording.
    ///
    /// Cancels the ticker before returning, so no tick lands after this call.
    /// The counter is reset to zero for the next recording; the final value
    /// is returned with the clip.
    pub async fn stop(&self) -> Result<StoppedClip, MemoError> {
        let mut inner = self.inner.lock().await;
        inner
            .session
            .require(SessionPhase::Recording, "stop recording")?;

        if let Some(ticker) = inner.ticker.take() {
            ticker.abort();
            let _ = ticker.await;
        }
        let elapsed = self.elapsed.send_replace(Elapsed::ZERO);

        match self.capture.stop().await {
            Ok(uri) => {
                inner.session.finish_recording(uri.clone())?;
                debug!(%uri, %elapsed, "recording stopped");
                Ok(StoppedClip { uri, elapsed })
            }
            Err(e) => {
                warn!(error = %e, "recorder failed to stop");
                if let Err(cleanup) = self.capture.cancel().await {
                    warn!(error = %cleanup, "recorder cleanup failed");
                }
                inner.session.fail_recording()?;
                Err(e.into())
            }
        }
    }

    /// Save the stopped clip as a note.
    ///
    /// Without a name the note is called `Note <n>` where `n` is one more
    /// than the number of stored notes. If the store rejects the clip the
    /// session keeps it so the save can be retried.
    pub async fn save(&self, name: Option<&str>) -> Result<VoiceNote, MemoError> {
        let mut inner = self.inner.lock().await;
        let uri = inner.session.pending("save recording")?.to_owned();

        let desired = match name {
            Some(raw) => NoteName::parse(raw)?,
            None => NoteName::synthesized(self.store.len().await),
        };

        let note = self.store.add(&uri, desired).await?;
        inner.session.take_pending("save recording")?;
        self.destroy_transient(&uri).await;
        Ok(note)
    }

    /// Drop the stopped clip without saving it
    pub async fn discard(&self) -> Result<(), MemoError> {
        let mut inner = self.inner.lock().await;
        let uri = inner.session.take_pending("discard recording")?;
        self.destroy_transient(&uri).await;
        debug!(%uri, "clip discarded");
        Ok(())
    }

    async fn destroy_transient(&self, uri: &str) {
        if let Err(e) = self.capture.discard(uri).await {
            warn!(%uri, error = %e, "could not remove transient clip");
        }
    }

    fn spawn_ticker(&self) -> JoinHandle<()> {
        let elapsed = Arc::clone(&self.elapsed);
        let period = Elapsed::tick_interval();

        tokio::spawn(async move {
            let mut ticker = interval_at(Instant::now() + period, period);
            loop {
                ticker.tick().await;
                elapsed.send_modify(|e| *e = Elapsed::from_secs(e.as_secs() + 1));
            }
        })
    }
}

impl<C, P, S> Drop for RecordingController<C, P, S>
where
    C: AudioCapture,
    P: MicrophonePermission,
    S: NoteStorage,
{
    fn drop(&mut self) {
        if let Some(ticker) = self.inner.get_mut().ticker.take() {
            ticker.abort();
        }
    }
}
