//! Note storage adapters

mod fs;

pub use fs::FsNoteStorage;
