//! Case-insensitive search over note names

use super::VoiceNote;

/// Notes whose name contains `query`, ignoring case.
/// Order is preserved; a blank query matches everything.
pub fn filter_notes(notes: &[VoiceNote], query: &str) -> Vec<VoiceNote> {
    let needle = query.trim().to_lowercase();
    if needle.is_empty() {
        return notes.to_vec();
    }

    notes
        .iter()
        .filter(|note| note.name().to_lowercase().contains(&needle))
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::SystemTime;

    fn notes(names: &[&str]) -> Vec<VoiceNote> {
        names
            .iter()
            .map(|n| VoiceNote::new(*n, format!("/notes/{}", n), SystemTime::UNIX_EPOCH))
            .collect()
    }

    #[test]
    fn empty_query_is_identity() {
        let all = notes(&["Note 1", "Groceries", "Note 2"]);
        assert_eq!(filter_notes(&all, ""), all);
        assert_eq!(filter_notes(&all, "   "), all);
    }

    #[test]
    fn matching_is_case_insensitive() {
        let all = notes(&["Note 1"]);
        assert_eq!(filter_notes(&all, "note").len(), 1);
        assert_eq!(filter_notes(&all, "NOTE 1").len(), 1);
    }

    #[test]
    fn result_is_ordered_subset() {
        let all = notes(&["Note 1", "Groceries", "Note 2", "Keynote"]);
        let found = filter_notes(&all, "note");

        let names: Vec<_> = found.iter().map(VoiceNote::name).collect();
        assert_eq!(names, vec!["Note 1", "Note 2", "Keynote"]);
        assert!(found.iter().all(|n| all.contains(n)));
    }

    #[test]
    fn no_match_is_empty() {
        let all = notes(&["Note 1"]);
        assert!(filter_notes(&all, "xyz").is_empty());
    }

    #[test]
    fn unicode_names_fold_case() {
        let all = notes(&["Über Ideen"]);
        assert_eq!(filter_notes(&all, "über").len(), 1);
    }
}
