use anyhow::{Context, Result};
use notebox::application::{Controller, NoteRepository};
use notebox::infrastructure::FileSystemStorage;
use notebox::util::testing::{at, FixedClock};
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Test fixture owning a throwaway notes root
#[allow(dead_code)]
pub struct TestNotes {
    _temp_dir: TempDir,
    pub root: PathBuf,
}

#[allow(dead_code)]
impl TestNotes {
    /// Empty workspace; the notes root itself is not created yet
    pub fn new() -> Result<Self> {
        let temp_dir = tempfile::tempdir().context("Failed to create temporary directory")?;
        let root = temp_dir.path().join("notes");
        Ok(Self {
            _temp_dir: temp_dir,
            root,
        })
    }

    /// Place a note file directly on disk, bypassing the application
    pub fn write_raw(&self, subject: &str, id: &str, content: &str) -> Result<PathBuf> {
        let dir = self.root.join(subject);
        std::fs::create_dir_all(&dir).context("Failed to create subject folder")?;
        let path = dir.join(format!("{id}.txt"));
        std::fs::write(&path, content).context("Failed to write note file")?;
        Ok(path)
    }

    pub fn note_path(&self, subject: &str, id: &str) -> PathBuf {
        self.root.join(subject).join(format!("{id}.txt"))
    }

    /// Path outside the notes root for export targets
    pub fn outside(&self, name: &str) -> PathBuf {
        self.root
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_default()
            .join(name)
    }

    /// Repository with a frozen clock, already loaded
    pub fn repository(&self) -> Result<NoteRepository<FileSystemStorage, FixedClock>> {
        let mut repository = NoteRepository::with_clock(
            FileSystemStorage::new(&self.root),
            FixedClock::new(frozen_now()),
        );
        repository.reload()?;
        Ok(repository)
    }

    pub fn controller(&self) -> Result<Controller<FileSystemStorage, FixedClock>> {
        Ok(Controller::open(NoteRepository::with_clock(
            FileSystemStorage::new(&self.root),
            FixedClock::new(frozen_now()),
        ))?)
    }
}

/// Instant the fixture clock is frozen at
pub fn frozen_now() -> chrono::DateTime<chrono::Local> {
    at(2024, 7, 15, 18, 45, 30)
}

/// Id minted for new notes under the frozen clock
#[allow(dead_code)]
pub const FROZEN_ID: &str = "20240715184530";
