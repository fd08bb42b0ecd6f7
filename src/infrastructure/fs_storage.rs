// src/infrastructure/fs_storage.rs
use crate::application::NoteStorage;
use crate::constants::NOTE_EXTENSION;
use crate::domain::{DomainError, NoteLocation, StoredNote};
use chrono::{DateTime, Local};
use std::fs::{self, DirEntry, Metadata};
use std::io;
use std::path::{Path, PathBuf};
use tracing::{debug, instrument, trace, warn};

/// Notes stored as `<root>/<subject>/<id>.txt`, content only
#[derive(Debug, Clone)]
pub struct FileSystemStorage {
    root: PathBuf,
}

impl FileSystemStorage {
    pub fn new<P: AsRef<Path>>(root: P) -> Self {
        let root = root.as_ref().to_path_buf();
        debug!(?root, "Creating FileSystemStorage");
        Self { root }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn note_path(&self, subject: &str, id: &str) -> PathBuf {
        self.root
            .join(subject)
            .join(format!("{id}.{NOTE_EXTENSION}"))
    }

    /// Directory entries sorted by file name
    fn sorted_entries(dir: &Path) -> Result<Vec<DirEntry>, DomainError> {
        let mut entries = fs::read_dir(dir)
            .and_then(|entries| entries.collect::<io::Result<Vec<_>>>())
            .map_err(|e| DomainError::io(dir, e))?;
        entries.sort_by_key(|entry| entry.file_name());
        Ok(entries)
    }

    /// `None` for files that are not valid UTF-8
    fn read_note(path: &Path, id: String) -> Result<Option<StoredNote>, DomainError> {
        let content = match fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) if e.kind() == io::ErrorKind::InvalidData => {
                warn!(?path, "Skipping note file that is not valid UTF-8");
                return Ok(None);
            }
            Err(e) => return Err(DomainError::io(path, e)),
        };
        let metadata = fs::metadata(path).map_err(|e| DomainError::io(path, e))?;
        let created_at = creation_time(&metadata).map_err(|e| DomainError::io(path, e))?;
        trace!(?path, %created_at, "Read note file");

        Ok(Some(StoredNote {
            id,
            content,
            created_at,
            location: NoteLocation::new(path),
        }))
    }
}

/// Follows symlinks; dangling links yield `None`
fn target_metadata(path: &Path) -> Option<Metadata> {
    match fs::metadata(path) {
        Ok(metadata) => Some(metadata),
        Err(e) => {
            warn!(?path, error = %e, "Skipping unreadable entry");
            None
        }
    }
}

/// Whether two paths name the same file, e.g. through case folding or links
#[cfg(unix)]
fn same_file(a: &Path, b: &Path) -> bool {
    use std::os::unix::fs::MetadataExt;
    match (fs::metadata(a), fs::metadata(b)) {
        (Ok(a), Ok(b)) => a.dev() == b.dev() && a.ino() == b.ino(),
        _ => false,
    }
}

#[cfg(not(unix))]
fn same_file(a: &Path, b: &Path) -> bool {
    match (fs::canonicalize(a), fs::canonicalize(b)) {
        (Ok(a), Ok(b)) => a.to_string_lossy().to_lowercase() == b.to_string_lossy().to_lowercase(),
        _ => false,
    }
}

/// Birth time where the filesystem records one, modification time otherwise
fn creation_time(metadata: &Metadata) -> io::Result<DateTime<Local>> {
    metadata
        .created()
        .or_else(|_| metadata.modified())
        .map(DateTime::<Local>::from)
}

impl NoteStorage for FileSystemStorage {
    fn ensure_root(&mut self) -> Result<(), DomainError> {
        fs::create_dir_all(&self.root).map_err(|e| DomainError::io(&self.root, e))
    }

    #[instrument(level = "debug", skip(self))]
    fn list_subjects(&mut self) -> Result<Vec<String>, DomainError> {
        let mut subjects = Vec::new();
        for entry in Self::sorted_entries(&self.root)? {
            let path = entry.path();
            if !target_metadata(&path).is_some_and(|metadata| metadata.is_dir()) {
                continue;
            }
            match entry.file_name().into_string() {
                Ok(name) => subjects.push(name),
                Err(name) => warn!(?name, "Skipping subject folder with non UTF-8 name"),
            }
        }
        Ok(subjects)
    }

    #[instrument(level = "debug", skip(self))]
    fn list_notes(&mut self, subject: &str) -> Result<Vec<StoredNote>, DomainError> {
        let suffix = format!(".{NOTE_EXTENSION}");
        let mut notes = Vec::new();

        for entry in Self::sorted_entries(&self.root.join(subject))? {
            let path = entry.path();
            let Some(id) = entry
                .file_name()
                .to_str()
                .and_then(|name| name.strip_suffix(&suffix))
                .map(str::to_string)
            else {
                trace!(?path, "Ignoring non-note entry");
                continue;
            };
            let Some(metadata) = target_metadata(&path) else {
                continue;
            };
            if !metadata.is_file() {
                warn!(?path, "Ignoring note-named entry that is not a regular file");
                continue;
            }
            notes.extend(Self::read_note(&path, id)?);
        }
        Ok(notes)
    }

    #[instrument(level = "debug", skip(self, content))]
    fn write_note(
        &mut self,
        subject: &str,
        id: &str,
        content: &str,
    ) -> Result<NoteLocation, DomainError> {
        let dir = self.root.join(subject);
        fs::create_dir_all(&dir).map_err(|e| DomainError::io(&dir, e))?;

        let path = self.note_path(subject, id);
        fs::write(&path, content).map_err(|e| DomainError::io(&path, e))?;
        debug!(?path, bytes = content.len(), "Wrote note file");
        Ok(NoteLocation::new(path))
    }

    /// Write first, then remove the old file unless both paths turned out to
    /// be the same file (case-insensitive filesystems, linked folders).
    #[instrument(level = "debug", skip(self, content))]
    fn move_note(
        &mut self,
        old_location: &NoteLocation,
        subject: &str,
        id: &str,
        content: &str,
    ) -> Result<NoteLocation, DomainError> {
        let location = self.write_note(subject, id, content)?;
        if same_file(old_location.as_path(), location.as_path()) {
            debug!(path = ?location.as_path(), "Old and new location are the same file, keeping it");
            return Ok(location);
        }
        self.delete_note(old_location)?;
        Ok(location)
    }

    #[instrument(level = "debug", skip(self))]
    fn delete_note(&mut self, location: &NoteLocation) -> Result<(), DomainError> {
        let path = location.as_path();
        match fs::remove_file(path) {
            Ok(()) => {
                debug!(?path, "Removed note file");
                Ok(())
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                debug!(?path, "Note file already gone");
                Ok(())
            }
            Err(e) => Err(DomainError::io(path, e)),
        }
    }

    #[instrument(level = "debug", skip(self, content))]
    fn export_note(&mut self, content: &str, destination: &Path) -> Result<(), DomainError> {
        fs::write(destination, content).map_err(|e| DomainError::io(destination, e))
    }
}
