//! Playback controller
//!
//! Keeps at most one playback alive. Starting a new one stops the old one.

use std::time::Duration;

use tokio::sync::Mutex;
use tracing::{debug, warn};

use super::error::MemoError;
use super::ports::{AudioPlayer, PlaybackHandle};

/// How often `wait_until_finished` checks the handle
const FINISH_POLL_INTERVAL: Duration = Duration::from_millis(100);

struct ActivePlayback {
    uri: String,
    handle: Box<dyn PlaybackHandle>,
}

/// Owner of the single active playback handle
pub struct PlaybackController<A>
where
    A: AudioPlayer,
{
    player: A,
    active: Mutex<Option<ActivePlayback>>,
}

impl<A> PlaybackController<A>
where
    A: AudioPlayer,
{
    /// Create a controller with nothing playing
    pub fn new(player: A) -> Self {
        Self {
            player,
            active: Mutex::new(None),
        }
    }

    /// Play `uri`, replacing whatever is playing.
    ///
    /// If `uri` cannot be opened nothing is left playing.
    pub async fn play(&self, uri: &str) -> Result<(), MemoError> {
        let mut active = self.active.lock().await;

        if let Some(mut current) = active.take() {
            debug!(uri = %current.uri, "replacing active playback");
            if let Err(e) = current.handle.stop().await {
                warn!(uri = %current.uri, error = %e, "stopping previous playback failed");
            }
        }

        let handle = self.player.open(uri).await.map_err(|e| {
            warn!(%uri, error = %e, "playback failed to open");
            MemoError::from(e)
        })?;

        debug!(%uri, "playback started");
        *active = Some(ActivePlayback {
            uri: uri.to_string(),
            handle,
        });
        Ok(())
    }

    /// Stop playback. Does nothing when nothing is playing.
    pub async fn stop(&self) -> Result<(), MemoError> {
        let Some(mut current) = self.active.lock().await.take() else {
            return Ok(());
        };

        current.handle.stop().await?;
        debug!(uri = %current.uri, "playback stopped");
        Ok(())
    }

    /// URI bound to the active handle
    pub async fn active_uri(&self) -> Option<String> {
        self.active.lock().await.as_ref().map(|a| a.uri.clone())
    }

    /// Whether a handle is active and has not reached the end
    pub async fn is_playing(&self) -> bool {
        self.active
            .lock()
            .await
            .as_ref()
            .is_some_and(|a| !a.handle.is_finished())
    }

    /// Resolve once the active clip has played to its end or was stopped
    pub async fn wait_until_finished(&self) {
        while self.is_playing().await {
            tokio::time::sleep(FINISH_POLL_INTERVAL).await;
        }
    }
}
