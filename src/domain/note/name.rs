//! Note name value object
//!
//! A note's name doubles as its file name inside the note directory, so it is
//! sanitized once on the way in and never reinterpreted afterwards.

use std::fmt;

use crate::domain::error::InvalidNoteName;

/// Prefix used when a recording is saved without a name
pub const DEFAULT_NAME_PREFIX: &str = "Note";

/// Longest name kept after sanitizing, in UTF-8 bytes. File systems cap a
/// file name at 255 bytes; the rest is left for a ` (n)` suffix.
pub const MAX_NAME_BYTES: usize = 240;

/// Characters that cannot appear in a file name on at least one platform
const FORBIDDEN: &[char] = &['/', '\\', ':', '*', '?', '"', '<', '>', '|'];

/// Validated, file-system safe note name
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NoteName(String);

impl NoteName {
    /// Sanitize a user supplied name.
    ///
    /// Forbidden and control characters become `_`, surrounding whitespace and
    /// leading dots are dropped. Fails if nothing visible remains.
    pub fn parse(raw: &str) -> Result<Self, InvalidNoteName> {
        let replaced: String = raw
            .chars()
            .map(|c| {
                if FORBIDDEN.contains(&c) || c.is_control() {
                    '_'
                } else {
                    c
                }
            })
            .collect();

        let cleaned = replaced.trim().trim_start_matches('.').trim();
        let truncated = truncate_to_boundary(cleaned, MAX_NAME_BYTES).trim_end();

        if truncated.is_empty() {
            return Err(InvalidNoteName {
                input: raw.to_string(),
            });
        }

        Ok(Self(truncated.to_string()))
    }

    /// Name for an unnamed recording saved into a store of `count` notes
    pub fn synthesized(count: usize) -> Self {
        Self(format!("{} {}", DEFAULT_NAME_PREFIX, count + 1))
    }

    /// Borrow the name
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consume into the inner string
    pub fn into_string(self) -> String {
        self.0
    }

    /// First variant of this name that `is_taken` rejects: the name itself,
    /// then `name (2)`, `name (3)`, ...
    pub fn disambiguate(self, is_taken: impl Fn(&str) -> bool) -> Self {
        if !is_taken(&self.0) {
            return self;
        }

        let mut n: u32 = 2;
        loop {
            let candidate = format!("{} ({})", self.0, n);
            if !is_taken(&candidate) {
                return Self(candidate);
            }
            n += 1;
        }
    }
}

/// Longest prefix of `s` that fits in `max_bytes` without splitting a char
fn truncate_to_boundary(s: &str, max_bytes: usize) -> &str {
    if s.len() <= max_bytes {
        return s;
    }
    let mut end = max_bytes;
    while !s.is_char_boundary(end) {
        end -= 1;
    }
    &s[..end]
}

impl fmt::Display for NoteName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl AsRef<str> for NoteName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
