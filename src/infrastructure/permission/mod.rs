//! Microphone permission adapters

mod cpal;

pub use cpal::CpalMicrophonePermission;
