//! Rodio-based playback adapter
//!
//! Each playback owns a thread holding the output stream and sink, since
//! rodio's OutputStream cannot leave the thread that created it.

use std::fs::File;
use std::io::BufReader;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread::JoinHandle;
use std::time::Duration;

use async_trait::async_trait;
use rodio::{Decoder, OutputStream, Sink};
use tokio::sync::oneshot;
use tracing::debug;

use crate::application::ports::{AudioPlayer, PlaybackError, PlaybackHandle};

/// How often the playback thread checks for stop or end of clip
const POLL_INTERVAL: Duration = Duration::from_millis(50);

/// Audio player using the default output device
pub struct RodioPlayer;

impl RodioPlayer {
    pub fn new() -> Self {
        Self
    }
}

impl Default for RodioPlayer {
    fn default() -> Self {
        Self::new()
    }
}

/// Open and decode `uri` before touching the output device
fn decode(uri: &str) -> Result<Decoder<BufReader<File>>, PlaybackError> {
    let file = File::open(uri).map_err(|e| PlaybackError::OpenFailed {
        uri: uri.to_string(),
        message: e.to_string(),
    })?;

    Decoder::new(BufReader::new(file)).map_err(|e| PlaybackError::DecodeFailed {
        uri: uri.to_string(),
        message: e.to_string(),
    })
}

/// Body of the playback thread
fn run_playback(
    uri: String,
    stop: Arc<AtomicBool>,
    finished: Arc<AtomicBool>,
    ready: oneshot::Sender<Result<(), PlaybackError>>,
) {
    let setup = decode(&uri).and_then(|source| {
        let (stream, handle) = OutputStream::try_default()
            .map_err(|e| PlaybackError::DeviceNotAvailable(e.to_string()))?;
        let sink =
            Sink::try_new(&handle).map_err(|e| PlaybackError::DeviceNotAvailable(e.to_string()))?;
        sink.append(source);
        Ok((stream, sink))
    });

    let (_stream, sink) = match setup {
        Ok(parts) => parts,
        Err(e) => {
            finished.store(true, Ordering::SeqCst);
            let _ = ready.send(Err(e));
            return;
        }
    };
    let _ = ready.send(Ok(()));

    while !stop.load(Ordering::SeqCst) && !sink.empty() {
        std::thread::sleep(POLL_INTERVAL);
    }

    sink.stop();
    finished.store(true, Ordering::SeqCst);
    debug!(%uri, "playback thread finished");
}

#[async_trait]
impl AudioPlayer for RodioPlayer {
    async fn open(&self, uri: &str) -> Result<Box<dyn PlaybackHandle>, PlaybackError> {
        let stop = Arc::new(AtomicBool::new(false));
        let finished = Arc::new(AtomicBool::new(false));
        let (ready_tx, ready_rx) = oneshot::channel();

        let thread = {
            let uri = uri.to_string();
            let stop = Arc::clone(&stop);
            let finished = Arc::clone(&finished);
            std::thread::spawn(move || run_playback(uri, stop, finished, ready_tx))
        };

        ready_rx.await.unwrap_or_else(|_| {
            Err(PlaybackError::DeviceNotAvailable(
                "Playback thread exited early".into(),
            ))
        })?;

        Ok(Box::new(RodioPlayback {
            stop,
            finished,
            thread: Some(thread),
        }))
    }
}

/// Handle to one rodio playback thread
pub struct RodioPlayback {
    stop: Arc<AtomicBool>,
    finished: Arc<AtomicBool>,
    thread: Option<JoinHandle<()>>,
}

#[async_trait]
impl PlaybackHandle for RodioPlayback {
    async fn stop(&mut self) -> Result<(), PlaybackError> {
        self.stop.store(true, Ordering::SeqCst);

        let Some(thread) = self.thread.take() else {
            return Ok(());
        };

        tokio::task::spawn_blocking(move || thread.join())
            .await
            .map_err(|e| PlaybackError::StopFailed(format!("Task join error: {}", e)))?
            .map_err(|_| PlaybackError::StopFailed("Playback thread panicked".into()))
    }

    fn is_finished(&self) -> bool {
        self.finished.load(Ordering::SeqCst)
    }
}

impl Drop for RodioPlayback {
    fn drop(&mut self) {
        self.stop.store(true, Ordering::SeqCst);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn missing_file_fails_to_open() {
        let err = RodioPlayer::new()
            .open("/nonexistent/voice-notes/clip.flac")
            .await
            .err()
            .unwrap();
        assert!(matches!(err, PlaybackError::OpenFailed { .. }));
    }

    #[tokio::test]
    async fn non_audio_file_fails_to_decode() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("notes.txt");
        std::fs::write(&path, "definitely not audio").unwrap();

        let err = RodioPlayer::new()
            .open(path.to_str().unwrap())
            .await
            .err()
            .unwrap();
        assert!(matches!(err, PlaybackError::DecodeFailed { .. }));
    }

    #[tokio::test]
    #[ignore = "Requires audio hardware"]
    async fn can_play_and_stop_flac() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("tone.flac");
        let samples: Vec<i16> = (0..16000)
            .map(|i| ((i as f32 / 16000.0 * 440.0 * std::f32::consts::TAU).sin() * 8000.0) as i16)
            .collect();
        let flac = crate::infrastructure::recording::encode_clip(&samples, 16000).unwrap();
        std::fs::write(&path, flac).unwrap();

        let mut handle = RodioPlayer::new().open(path.to_str().unwrap()).await.unwrap();
        assert!(!handle.is_finished());
        handle.stop().await.unwrap();
        assert!(handle.is_finished());
    }
}
