//! Share sheet adapters
//!
//! Desktop has no native share sheet; the default hands the note's path
//! to the clipboard so it can be pasted into any other app.

mod clipboard;
mod noop;

pub use clipboard::ClipboardShareSheet;
pub use noop::NoOpShareSheet;

use crate::application::ports::ShareSheet;
use crate::domain::config::ShareBackend;

/// Create the share sheet for the configured backend
pub fn create_share_sheet(backend: ShareBackend) -> Box<dyn ShareSheet> {
    match backend {
        ShareBackend::Clipboard => Box::new(ClipboardShareSheet::new()),
        ShareBackend::None => Box::new(NoOpShareSheet::new()),
    }
}
