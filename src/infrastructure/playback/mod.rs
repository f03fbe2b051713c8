//! Playback infrastructure adapters

mod rodio;

pub use rodio::{RodioPlayback, RodioPlayer};
