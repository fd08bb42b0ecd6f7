// src/domain/note.rs
use crate::constants::NOTE_ID_FORMAT;
use chrono::{DateTime, Local};
use serde::Serialize;
use std::path::{Path, PathBuf};

/// Opaque handle to the file backing a note
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct NoteLocation(PathBuf);

impl NoteLocation {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self(path.into())
    }

    pub fn as_path(&self) -> &Path {
        &self.0
    }
}

/// A note file as reported by storage, before the subject is attached
#[derive(Debug, Clone, PartialEq)]
pub struct StoredNote {
    pub id: String,
    pub content: String,
    pub created_at: DateTime<Local>,
    pub location: NoteLocation,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Note {
    pub id: String,
    pub subject: String,
    pub content: String,
    pub created_at: DateTime<Local>,
    pub location: NoteLocation,
}

impl Note {
    pub fn from_stored(subject: &str, stored: StoredNote) -> Self {
        Self {
            id: stored.id,
            subject: subject.to_string(),
            content: stored.content,
            created_at: stored.created_at,
            location: stored.location,
        }
    }

    /// Subject filter by equality, then case-insensitive substring match on
    /// subject OR content. `needle` must already be lowercase.
    pub fn matches(&self, subject_filter: Option<&str>, needle: &str) -> bool {
        if subject_filter.is_some_and(|subject| subject != self.subject) {
            return false;
        }
        needle.is_empty()
            || self.subject.to_lowercase().contains(needle)
            || self.content.to_lowercase().contains(needle)
    }
}

/// Mint the id of a new note from its creation time
pub fn mint_note_id(now: &DateTime<Local>) -> String {
    now.format(NOTE_ID_FORMAT).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn note(subject: &str, content: &str) -> Note {
        Note {
            id: "20240101120000".to_string(),
            subject: subject.to_string(),
            content: content.to_string(),
            created_at: Local.with_ymd_and_hms(2024, 1, 1, 12, 0, 0).unwrap(),
            location: NoteLocation::new(format!("notes/{subject}/20240101120000.txt")),
        }
    }

    #[test]
    fn given_timestamp_when_minting_id_then_uses_compact_second_resolution() {
        let now = Local.with_ymd_and_hms(2024, 3, 9, 7, 5, 1).unwrap();
        assert_eq!(mint_note_id(&now), "20240309070501");
    }

    #[test]
    fn given_no_filters_when_matching_then_every_note_matches() {
        assert!(note("Work", "anything").matches(None, ""));
    }

    #[test]
    fn given_other_subject_filter_when_matching_then_rejects() {
        assert!(!note("Work", "idea").matches(Some("Ideas"), ""));
    }

    #[test]
    fn given_needle_in_subject_only_when_matching_then_accepts() {
        assert!(note("Ideas", "buy milk").matches(None, "idea"));
    }

    #[test]
    fn given_needle_in_content_with_other_case_when_matching_then_accepts() {
        assert!(note("Work", "Great IDEA for project").matches(None, "idea"));
    }

    #[test]
    fn given_needle_in_neither_field_when_matching_then_rejects() {
        assert!(!note("Work", "buy milk").matches(Some("Work"), "idea"));
    }
}
