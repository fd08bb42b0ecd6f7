// src/application/note_storage.rs
use crate::domain::{DomainError, NoteLocation, StoredNote};
use chrono::{DateTime, Local};
use std::path::Path;

/// Gateway to wherever note files live. Holds no note state of its own and
/// is consulted fresh on every reload.
pub trait NoteStorage {
    /// Create the notes root if it does not exist yet
    fn ensure_root(&mut self) -> Result<(), DomainError>;

    /// Names of all subject folders directly below the root
    fn list_subjects(&mut self) -> Result<Vec<String>, DomainError>;

    fn list_notes(&mut self, subject: &str) -> Result<Vec<StoredNote>, DomainError>;

    /// Create or fully overwrite `<subject>/<id>`, creating the subject folder
    /// when needed
    fn write_note(
        &mut self,
        subject: &str,
        id: &str,
        content: &str,
    ) -> Result<NoteLocation, DomainError>;

    /// Remove a note file. A file that is already gone is not an error.
    fn delete_note(&mut self, location: &NoteLocation) -> Result<(), DomainError>;

    /// Write content verbatim to a path outside the notes root
    fn export_note(&mut self, content: &str, destination: &Path) -> Result<(), DomainError>;

    /// Relocate a note to another subject, keeping its id.
    ///
    /// Writes the new file before removing the old one; a failure in between
    /// leaves both files on disk.
    fn move_note(
        &mut self,
        old_location: &NoteLocation,
        subject: &str,
        id: &str,
        content: &str,
    ) -> Result<NoteLocation, DomainError> {
        let location = self.write_note(subject, id, content)?;
        self.delete_note(old_location)?;
        Ok(location)
    }
}

pub trait Clock {
    fn now(&self) -> DateTime<Local>;
}

#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Local> {
        Local::now()
    }
}
