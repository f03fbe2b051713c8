//! Recording infrastructure module
//!
//! Microphone capture via cpal, staged as 16kHz mono FLAC.

mod clip_codec;
mod cpal_recorder;

pub use clip_codec::{encode_clip, ClipEncodeError, CLIP_SAMPLE_RATE};
pub use cpal_recorder::CpalRecorder;
