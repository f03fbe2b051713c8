//! Voice note entity

use std::cmp::Ordering;
use std::time::SystemTime;

/// A finished, persisted recording.
/// `name` is unique inside a store and `uri` identifies the stored audio.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VoiceNote {
    name: String,
    uri: String,
    created_at: SystemTime,
}

impl VoiceNote {
    /// Create a note entry
    pub fn new(name: impl Into<String>, uri: impl Into<String>, created_at: SystemTime) -> Self {
        Self {
            name: name.into(),
            uri: uri.into(),
            created_at,
        }
    }

    /// Display name, also the file name in the note directory
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Opaque handle to the stored audio
    pub fn uri(&self) -> &str {
        &self.uri
    }

    /// When the note was created
    pub fn created_at(&self) -> SystemTime {
        self.created_at
    }

    /// Display order: oldest first, ties broken by name
    pub fn display_order(a: &Self, b: &Self) -> Ordering {
        a.created_at
            .cmp(&b.created_at)
            .then_with(|| a.name.cmp(&b.name))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn accessors_return_fields() {
        let at = SystemTime::UNIX_EPOCH + Duration::from_secs(10);
        let note = VoiceNote::new("Note 1", "/notes/Note 1", at);
        assert_eq!(note.name(), "Note 1");
        assert_eq!(note.uri(), "/notes/Note 1");
        assert_eq!(note.created_at(), at);
    }

    #[test]
    fn display_order_by_time_then_name() {
        let early = SystemTime::UNIX_EPOCH;
        let late = early + Duration::from_secs(1);

        let mut notes = vec![
            VoiceNote::new("b", "/b", late),
            VoiceNote::new("z", "/z", early),
            VoiceNote::new("a", "/a", late),
        ];
        notes.sort_by(VoiceNote::display_order);

        let names: Vec<_> = notes.iter().map(VoiceNote::name).collect();
        assert_eq!(names, vec!["z", "a", "b"]);
    }
}
