//! Microphone capture using cpal
//!
//! Captures mono audio on a dedicated thread (cpal::Stream is not Send),
//! resamples to 16kHz and writes each finished clip as a FLAC file in a
//! staging directory until it is saved or discarded.

use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, AtomicU32, AtomicU64, Ordering};
use std::sync::{Arc, Mutex as StdMutex, MutexGuard, PoisonError};
use std::thread::JoinHandle;
use std::time::{SystemTime, UNIX_EPOCH};

use async_trait::async_trait;
use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};
use cpal::{SampleFormat, SampleRate, StreamConfig};
use tokio::io::{AsyncWrite, AsyncWriteExt};
use tokio::sync::oneshot;
use tracing::{debug, error, warn};

use super::clip_codec::{encode_clip, CLIP_SAMPLE_RATE};
use crate::application::ports::{AudioCapture, RecordingError};

/// Subdirectory of the temp dir holding unsaved clips
const STAGING_DIR_NAME: &str = "voice-notes-staging";

/// How often the capture thread checks for a stop request
const STOP_POLL_MS: u64 = 20;

fn lock<T>(mutex: &StdMutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Audio capture adapter backed by the default input device
pub struct CpalRecorder {
    staging_dir: PathBuf,
    /// Recorded samples (mono, i16, at device sample rate)
    audio_buffer: Arc<StdMutex<Vec<i16>>>,
    device_sample_rate: Arc<AtomicU32>,
    is_recording: Arc<AtomicBool>,
    capture_thread: StdMutex<Option<JoinHandle<()>>>,
    clip_counter: AtomicU64,
}

impl CpalRecorder {
    /// Create a recorder staging clips under the system temp dir
    pub fn new() -> Self {
        Self::with_staging_dir(std::env::temp_dir().join(STAGING_DIR_NAME))
    }

    /// Create a recorder staging clips under `dir`
    pub fn with_staging_dir(dir: impl Into<PathBuf>) -> Self {
        Self {
            staging_dir: dir.into(),
            audio_buffer: Arc::new(StdMutex::new(Vec::new())),
            device_sample_rate: Arc::new(AtomicU32::new(0)),
            is_recording: Arc::new(AtomicBool::new(false)),
            capture_thread: StdMutex::new(None),
            clip_counter: AtomicU64::new(0),
        }
    }

    /// Whether a default input device is present
    pub fn has_input_device() -> bool {
        cpal::default_host().default_input_device().is_some()
    }

    fn get_input_device() -> Result<cpal::Device, RecordingError> {
        cpal::default_host()
            .default_input_device()
            .ok_or(RecordingError::NoAudioDevice)
    }

    /// Pick an input config, preferring mono and a range containing 16kHz
    fn get_input_config(
        device: &cpal::Device,
    ) -> Result<(StreamConfig, SampleFormat), RecordingError> {
        let supported_configs = device
            .supported_input_configs()
            .map_err(|e| RecordingError::StartFailed(format!("Failed to get configs: {}", e)))?;

        let mut best_config: Option<cpal::SupportedStreamConfigRange> = None;

        for config in supported_configs {
            if config.sample_format() != SampleFormat::I16
                && config.sample_format() != SampleFormat::F32
            {
                continue;
            }

            let includes_target = config.min_sample_rate().0 <= CLIP_SAMPLE_RATE
                && config.max_sample_rate().0 >= CLIP_SAMPLE_RATE;

            let is_better = match &best_config {
                None => true,
                Some(current) => {
                    let fewer_channels = config.channels() < current.channels();
                    let better_rate =
                        includes_target && current.min_sample_rate().0 > CLIP_SAMPLE_RATE;
                    fewer_channels || better_rate
                }
            };
            if is_better {
                best_config = Some(config);
            }
        }

        let config_range = best_config
            .ok_or_else(|| RecordingError::StartFailed("No suitable config found".into()))?;

        let sample_rate = if config_range.min_sample_rate().0 <= CLIP_SAMPLE_RATE
            && config_range.max_sample_rate().0 >= CLIP_SAMPLE_RATE
        {
            SampleRate(CLIP_SAMPLE_RATE)
        } else {
            config_range.min_sample_rate()
        };

        let config = StreamConfig {
            channels: config_range.channels(),
            sample_rate,
            buffer_size: cpal::BufferSize::Default,
        };

        Ok((config, config_range.sample_format()))
    }

    /// Average interleaved channels down to mono
    fn downmix(samples: &[i16], channels: u16) -> Vec<i16> {
        if channels == 1 {
            return samples.to_vec();
        }

        samples
            .chunks(channels as usize)
            .map(|chunk| {
                let sum: i32 = chunk.iter().map(|&s| i32::from(s)).sum();
                (sum / i32::from(channels)) as i16
            })
            .collect()
    }

    /// Build and start the input stream. Runs on the capture thread.
    fn open_stream(
        audio_buffer: &Arc<StdMutex<Vec<i16>>>,
        is_recording: &Arc<AtomicBool>,
        device_sample_rate: &AtomicU32,
    ) -> Result<cpal::Stream, RecordingError> {
        let device = Self::get_input_device()?;
        let (config, sample_format) = Self::get_input_config(&device)?;
        let channels = config.channels;
        device_sample_rate.store(config.sample_rate.0, Ordering::SeqCst);

        let on_error = |err: cpal::StreamError| error!(error = %err, "audio input stream error");

        let stream = match sample_format {
            SampleFormat::I16 => {
                let buffer = Arc::clone(audio_buffer);
                let recording = Arc::clone(is_recording);
                device.build_input_stream(
                    &config,
                    move |data: &[i16], _: &cpal::InputCallbackInfo| {
                        if recording.load(Ordering::SeqCst) {
                            lock(&buffer).extend_from_slice(&Self::downmix(data, channels));
                        }
                    },
                    on_error,
                    None,
                )
            }
            SampleFormat::F32 => {
                let buffer = Arc::clone(audio_buffer);
                let recording = Arc::clone(is_recording);
                device.build_input_stream(
                    &config,
                    move |data: &[f32], _: &cpal::InputCallbackInfo| {
                        if recording.load(Ordering::SeqCst) {
                            let pcm: Vec<i16> =
                                data.iter().map(|&s| (s * 32767.0) as i16).collect();
                            lock(&buffer).extend_from_slice(&Self::downmix(&pcm, channels));
                        }
                    },
                    on_error,
                    None,
                )
            }
            _ => {
                return Err(RecordingError::StartFailed(
                    "Unsupported sample format".into(),
                ))
            }
        }
        .map_err(|e| RecordingError::StartFailed(e.to_string()))?;

        stream
            .play()
            .map_err(|e| RecordingError::StartFailed(e.to_string()))?;

        Ok(stream)
    }

    /// Signal the capture thread to stop and wait for it to release the device
    async fn join_capture(&self) -> Result<(), RecordingError> {
        self.is_recording.store(false, Ordering::SeqCst);

        let Some(handle) = lock(&self.capture_thread).take() else {
            return Ok(());
        };

        tokio::task::spawn_blocking(move || handle.join())
            .await
            .map_err(|e| RecordingError::RecordingFailed(format!("Task join error: {}", e)))?
            .map_err(|_| RecordingError::RecordingFailed("Capture thread panicked".into()))
    }

    fn next_clip_path(&self) -> PathBuf {
        let millis = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_millis())
            .unwrap_or(0);
        let seq = self.clip_counter.fetch_add(1, Ordering::SeqCst);
        self.staging_dir.join(format!("clip-{}-{}.flac", millis, seq))
    }

    async fn write_clip(&self, bytes: &[u8]) -> Result<PathBuf, RecordingError> {
        tokio::fs::create_dir_all(&self.staging_dir)
            .await
            .map_err(|e| RecordingError::WriteFailed(e.to_string()))?;

        let path = self.next_clip_path();
        let write_failed =
            |e: std::io::Error| RecordingError::WriteFailed(format!("{}: {}", path.display(), e));

        let file = tokio::fs::File::create(&path).await.map_err(write_failed)?;
        write_or_remove(file, &path, bytes)
            .await
            .map_err(write_failed)?;

        Ok(path)
    }

    /// Directory unsaved clips are written to
    pub fn staging_dir(&self) -> &Path {
        &self.staging_dir
    }
}

/// Write `bytes` to the freshly created file at `path`. On failure the
/// partial file is removed before the error is returned.
async fn write_or_remove<W>(mut file: W, path: &Path, bytes: &[u8]) -> std::io::Result<()>
where
    W: AsyncWrite + Unpin,
{
    let written = match file.write_all(bytes).await {
        Ok(()) => file.flush().await,
        Err(e) => Err(e),
    };
    drop(file);

    if written.is_err() {
        if let Err(e) = tokio::fs::remove_file(path).await {
            warn!(path = %path.display(), error = %e, "partial clip left behind");
        }
    }
    written
}

impl Default for CpalRecorder {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl AudioCapture for CpalRecorder {
    async fn start(&self) -> Result<(), RecordingError> {
        if self.is_recording.load(Ordering::SeqCst) {
            return Err(RecordingError::StartFailed(
                "Recording already in progress".to_string(),
            ));
        }

        lock(&self.audio_buffer).clear();
        self.device_sample_rate.store(0, Ordering::SeqCst);
        self.is_recording.store(true, Ordering::SeqCst);

        let audio_buffer = Arc::clone(&self.audio_buffer);
        let device_sample_rate = Arc::clone(&self.device_sample_rate);
        let is_recording = Arc::clone(&self.is_recording);
        let (ready_tx, ready_rx) = oneshot::channel();

        let handle = std::thread::spawn(move || {
            let stream = match Self::open_stream(&audio_buffer, &is_recording, &device_sample_rate)
            {
                Ok(stream) => stream,
                Err(e) => {
                    is_recording.store(false, Ordering::SeqCst);
                    let _ = ready_tx.send(Err(e));
                    return;
                }
            };
            let _ = ready_tx.send(Ok(()));

            while is_recording.load(Ordering::SeqCst) {
                std::thread::sleep(std::time::Duration::from_millis(STOP_POLL_MS));
            }

            drop(stream);
        });
        *lock(&self.capture_thread) = Some(handle);

        let ready = ready_rx.await.unwrap_or_else(|_| {
            Err(RecordingError::StartFailed(
                "Capture thread exited early".into(),
            ))
        });

        if let Err(e) = ready {
            self.join_capture().await?;
            return Err(e);
        }

        debug!(
            sample_rate = self.device_sample_rate.load(Ordering::SeqCst),
            "microphone capture started"
        );
        Ok(())
    }

    async fn stop(&self) -> Result<String, RecordingError> {
        if !self.is_recording.load(Ordering::SeqCst) {
            return Err(RecordingError::RecordingFailed(
                "No recording in progress".to_string(),
            ));
        }

        self.join_capture().await?;

        let sample_rate = self.device_sample_rate.load(Ordering::SeqCst);
        if sample_rate == 0 {
            return Err(RecordingError::RecordingFailed("Sample rate not set".into()));
        }

        let samples = std::mem::take(&mut *lock(&self.audio_buffer));
        let captured = samples.len();

        let bytes = tokio::task::spawn_blocking(move || encode_clip(&samples, sample_rate))
            .await
            .map_err(|e| RecordingError::RecordingFailed(format!("Encode task error: {}", e)))?
            .map_err(|e| RecordingError::RecordingFailed(e.to_string()))?;

        let path = self.write_clip(&bytes).await?;
        debug!(path = %path.display(), samples = captured, "clip staged");
        Ok(path.to_string_lossy().into_owned())
    }

    async fn cancel(&self) -> Result<(), RecordingError> {
        let joined = self.join_capture().await;
        lock(&self.audio_buffer).clear();
        joined
    }

    async fn discard(&self, uri: &str) -> Result<(), RecordingError> {
        match tokio::fs::remove_file(uri).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                warn!(%uri, "staged clip already gone");
                Ok(())
            }
            Err(e) => Err(RecordingError::WriteFailed(format!("{}: {}", uri, e))),
        }
    }
}

impl Drop for CpalRecorder {
    fn drop(&mut self) {
        self.is_recording.store(false, Ordering::SeqCst);
    }
}
