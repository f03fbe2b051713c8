//! Voice note domain module

mod name;
mod search;
mod voice_note;

pub use name::{NoteName, DEFAULT_NAME_PREFIX, MAX_NAME_BYTES};
pub use search::filter_notes;
pub use voice_note::VoiceNote;
