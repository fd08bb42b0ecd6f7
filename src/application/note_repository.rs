// src/application/note_repository.rs
use crate::application::{Clock, NoteStorage, SystemClock};
use crate::domain::{mint_note_id, validate_note_input, DomainError, Note, NoteLocation};
use std::path::Path;
use tracing::{debug, info, instrument};

/// Authoritative in-memory snapshot of all notes and subjects.
///
/// Every mutation goes to storage first and is followed by a full rescan, so
/// the snapshot always reflects what is on disk.
pub struct NoteRepository<S: NoteStorage, C: Clock = SystemClock> {
    storage: S,
    clock: C,
    notes: Vec<Note>,
    subjects: Vec<String>,
}

impl<S: NoteStorage> NoteRepository<S, SystemClock> {
    pub fn new(storage: S) -> Self {
        Self::with_clock(storage, SystemClock)
    }
}

impl<S: NoteStorage, C: Clock> NoteRepository<S, C> {
    pub fn with_clock(storage: S, clock: C) -> Self {
        Self {
            storage,
            clock,
            notes: Vec::new(),
            subjects: Vec::new(),
        }
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    /// All loaded notes in enumeration order
    pub fn notes(&self) -> &[Note] {
        &self.notes
    }

    /// Subject names, alphabetically
    pub fn subjects(&self) -> &[String] {
        &self.subjects
    }

    pub fn find(&self, location: &NoteLocation) -> Option<&Note> {
        self.notes.iter().find(|note| &note.location == location)
    }

    /// Rescan storage and replace the snapshot. On error the previous
    /// snapshot is kept.
    #[instrument(level = "debug", skip(self))]
    pub fn reload(&mut self) -> Result<(), DomainError> {
        self.storage.ensure_root()?;

        let mut notes = Vec::new();
        let mut subjects = self.storage.list_subjects()?;
        for subject in &subjects {
            let stored = self.storage.list_notes(subject)?;
            debug!(%subject, count = stored.len(), "Loaded subject");
            notes.extend(stored.into_iter().map(|s| Note::from_stored(subject, s)));
        }
        subjects.sort();

        info!(
            notes = notes.len(),
            subjects = subjects.len(),
            "Reloaded notes"
        );
        self.notes = notes;
        self.subjects = subjects;
        Ok(())
    }

    /// Notes matching the filters, most recently created first.
    ///
    /// The text filter is case-insensitive and matches subject OR content;
    /// ties on `created_at` keep enumeration order.
    pub fn query(&self, subject_filter: Option<&str>, text_filter: &str) -> Vec<Note> {
        let needle = text_filter.to_lowercase();
        let mut matched: Vec<Note> = self
            .notes
            .iter()
            .filter(|note| note.matches(subject_filter, &needle))
            .cloned()
            .collect();
        matched.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        matched
    }

    /// Validate and persist a new note (`existing == None`) or an edit of an
    /// existing one, then reload.
    ///
    /// Edits keep the note's id; a changed subject moves the file.
    #[instrument(level = "debug", skip(self, existing, content_input), fields(existing_id = existing.map(|n| n.id.as_str())))]
    pub fn save(
        &mut self,
        existing: Option<&Note>,
        subject_input: &str,
        content_input: &str,
    ) -> Result<NoteLocation, DomainError> {
        let (subject, content) = validate_note_input(subject_input, content_input)?;

        let location = match existing {
            None => {
                let id = mint_note_id(&self.clock.now());
                debug!(%id, %subject, "Creating note");
                self.storage.write_note(&subject, &id, &content)?
            }
            Some(note) if note.subject == subject => {
                debug!(id = %note.id, %subject, "Rewriting note in place");
                self.storage.write_note(&subject, &note.id, &content)?
            }
            Some(note) => {
                debug!(id = %note.id, from = %note.subject, to = %subject, "Moving note");
                self.storage
                    .move_note(&note.location, &subject, &note.id, &content)?
            }
        };

        info!(location = %location.as_path().display(), "Saved note");
        self.reload()?;
        Ok(location)
    }

    #[instrument(level = "debug", skip(self, note), fields(id = %note.id, subject = %note.subject))]
    pub fn delete(&mut self, note: &Note) -> Result<(), DomainError> {
        self.storage.delete_note(&note.location)?;
        info!(location = %note.location.as_path().display(), "Deleted note");
        self.reload()
    }

    pub fn export(&mut self, note: &Note, destination: &Path) -> Result<(), DomainError> {
        self.storage.export_note(&note.content, destination)?;
        info!(id = %note.id, destination = %destination.display(), "Exported note");
        Ok(())
    }
}
