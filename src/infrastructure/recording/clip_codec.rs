//! Clip encoding
//!
//! Turns captured mono PCM at the device rate into the body of a staged clip:
//! 16kHz, 16-bit, lossless FLAC.

use flacenc::bitsink::ByteSink;
use flacenc::component::BitRepr;
use flacenc::config;
use flacenc::error::Verify;
use flacenc::source::MemSource;
use rubato::{FftFixedIn, Resampler};

/// Sample rate clips are stored at
pub const CLIP_SAMPLE_RATE: u32 = 16000;

const BITS_PER_SAMPLE: usize = 16;

const CHANNELS: usize = 1;

/// Samples per FLAC frame (256ms at 16kHz)
const CLIP_BLOCK_SIZE: usize = 4096;

/// Clips at least this long (30s) are encoded on flacenc's worker threads
const PARALLEL_MIN_SAMPLES: usize = CLIP_SAMPLE_RATE as usize * 30;

/// Resampler input chunk size
const RESAMPLE_CHUNK: usize = 1024;

/// Clip encoding errors
#[derive(Debug, thiserror::Error)]
pub enum ClipEncodeError {
    #[error("Resampling failed: {0}")]
    Resample(String),

    #[error("FLAC config error: {0}")]
    Config(String),

    #[error("FLAC encoding failed: {0}")]
    Encode(String),

    #[error("FLAC write failed: {0}")]
    Write(String),
}

/// Resample `samples` captured at `source_rate` and encode them as a clip.
///
/// A capture with no samples still yields a playable clip holding a single
/// silent sample: a FLAC stream without frames carries block bounds that
/// decoders reject.
pub fn encode_clip(samples: &[i16], source_rate: u32) -> Result<Vec<u8>, ClipEncodeError> {
    let resampled = resample_to_clip_rate(samples, source_rate)?;
    encode_flac(&resampled)
}

/// Resample mono PCM from `source_rate` to [`CLIP_SAMPLE_RATE`]
fn resample_to_clip_rate(
    samples: &[i16],
    source_rate: u32,
) -> Result<Vec<i16>, ClipEncodeError> {
    if source_rate == CLIP_SAMPLE_RATE || samples.is_empty() {
        return Ok(samples.to_vec());
    }

    let ratio = f64::from(CLIP_SAMPLE_RATE) / f64::from(source_rate);
    let output_len = (samples.len() as f64 * ratio).ceil() as usize;

    let mut resampler = FftFixedIn::<f32>::new(
        source_rate as usize,
        CLIP_SAMPLE_RATE as usize,
        RESAMPLE_CHUNK,
        2,
        CHANNELS,
    )
    .map_err(|e| ClipEncodeError::Resample(e.to_string()))?;

    let mut output = Vec::with_capacity(output_len);
    for chunk in samples.chunks(RESAMPLE_CHUNK) {
        let mut frames: Vec<f32> = chunk.iter().map(|&s| f32::from(s) / 32768.0).collect();
        frames.resize(resampler.input_frames_next(), 0.0);
        let input = vec![frames];

        let resampled = resampler
            .process(&input, None)
            .map_err(|e| ClipEncodeError::Resample(e.to_string()))?;
        output.extend(resampled[0].iter().map(|&s| (s * 32767.0) as i16));
    }

    output.truncate(output_len);
    Ok(output)
}

fn encode_flac(pcm: &[i16]) -> Result<Vec<u8>, ClipEncodeError> {
    let samples: Vec<i32> = if pcm.is_empty() {
        vec![0]
    } else {
        pcm.iter().map(|&s| i32::from(s)).collect()
    };

    let mut encoder = config::Encoder::default();
    encoder.block_size = CLIP_BLOCK_SIZE;
    encoder.multithread = samples.len() >= PARALLEL_MIN_SAMPLES;
    let encoder = encoder
        .into_verified()
        .map_err(|(_, e)| ClipEncodeError::Config(format!("{:?}", e)))?;

    let source = MemSource::from_samples(
        &samples,
        CHANNELS,
        BITS_PER_SAMPLE,
        CLIP_SAMPLE_RATE as usize,
    );

    let stream = flacenc::encode_with_fixed_block_size(&encoder, source, encoder.block_size)
        .map_err(|e| ClipEncodeError::Encode(format!("{:?}", e)))?;

    let mut sink = ByteSink::new();
    stream
        .write(&mut sink)
        .map_err(|e| ClipEncodeError::Write(e.to_string()))?;

    Ok(sink.into_inner())
}
