// src/util/testing.rs

use anyhow::Result;
use chrono::{DateTime, Duration, Local, TimeZone};
use std::collections::{BTreeMap, BTreeSet};
use std::env;
use std::io;
use std::path::{Path, PathBuf};
use tracing::{debug, info};
use tracing_subscriber::{
    filter::filter_fn,
    fmt::{self, format::FmtSpan},
    prelude::*,
    EnvFilter,
};

use crate::application::{Clock, NoteStorage};
use crate::constants::NOTE_EXTENSION;
use crate::domain::{DomainError, NoteLocation, StoredNote};

/// Local timestamp shorthand for fixtures
pub fn at(year: i32, month: u32, day: u32, hour: u32, min: u32, sec: u32) -> DateTime<Local> {
    Local
        .with_ymd_and_hms(year, month, day, hour, min, sec)
        .earliest()
        .expect("fixture timestamp must exist in local time")
}

/// Clock frozen at a single instant; every minted id is the same
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(DateTime<Local>);

impl FixedClock {
    pub fn new(now: DateTime<Local>) -> Self {
        Self(now)
    }
}

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Local> {
        self.0
    }
}

#[derive(Debug, Clone)]
struct MockEntry {
    content: String,
    created_at: DateTime<Local>,
}

/// In-memory storage for testing code that depends on NoteStorage
///
/// Behaves like the filesystem adapter: subject folders survive their last
/// note, rewriting a note keeps its creation time, deleting a missing note
/// succeeds. Newly written notes get creation times one second apart,
/// later than any fixture.
///
/// # Examples
///
/// ```
/// use notebox::util::testing::{at, MockNoteStorage};
///
/// let storage = MockNoteStorage::builder()
///     .with_note("Work", "20240101090000", "standup notes", at(2024, 1, 1, 9, 0, 0))
///     .with_empty_subject("Archive")
///     .build();
/// assert_eq!(storage.write_count(), 0);
/// ```
pub struct MockNoteStorage {
    subjects: BTreeSet<String>,
    notes: BTreeMap<(String, String), MockEntry>,
    fail_writes: bool,
    next_created_at: DateTime<Local>,
    writes: usize,
    exports: Vec<(PathBuf, String)>,
}

impl MockNoteStorage {
    pub fn builder() -> MockNoteStorageBuilder {
        MockNoteStorageBuilder::new()
    }

    /// Number of successful `write_note` calls, moves included
    pub fn write_count(&self) -> usize {
        self.writes
    }

    /// Every `(destination, content)` passed to `export_note`
    pub fn exports(&self) -> &[(PathBuf, String)] {
        &self.exports
    }

    fn location(subject: &str, id: &str) -> NoteLocation {
        NoteLocation::new(Path::new(subject).join(format!("{id}.{NOTE_EXTENSION}")))
    }

    fn refuse(&self, path: &Path) -> Result<(), DomainError> {
        if self.fail_writes {
            return Err(DomainError::io(
                path,
                io::Error::new(io::ErrorKind::PermissionDenied, "mock refuses writes"),
            ));
        }
        Ok(())
    }
}

impl NoteStorage for MockNoteStorage {
    fn ensure_root(&mut self) -> Result<(), DomainError> {
        Ok(())
    }

    fn list_subjects(&mut self) -> Result<Vec<String>, DomainError> {
        Ok(self.subjects.iter().cloned().collect())
    }

    fn list_notes(&mut self, subject: &str) -> Result<Vec<StoredNote>, DomainError> {
        Ok(self
            .notes
            .iter()
            .filter(|((s, _), _)| s == subject)
            .map(|((s, id), entry)| StoredNote {
                id: id.clone(),
                content: entry.content.clone(),
                created_at: entry.created_at,
                location: Self::location(s, id),
            })
            .collect())
    }

    fn write_note(
        &mut self,
        subject: &str,
        id: &str,
        content: &str,
    ) -> Result<NoteLocation, DomainError> {
        let location = Self::location(subject, id);
        self.refuse(location.as_path())?;

        let key = (subject.to_string(), id.to_string());
        match self.notes.get_mut(&key) {
            Some(entry) => entry.content = content.to_string(),
            None => {
                self.notes.insert(
                    key,
                    MockEntry {
                        content: content.to_string(),
                        created_at: self.next_created_at,
                    },
                );
                self.next_created_at += Duration::seconds(1);
            }
        }

        self.subjects.insert(subject.to_string());
        self.writes += 1;
        debug!(?location, "Mock wrote note");
        Ok(location)
    }

    fn delete_note(&mut self, location: &NoteLocation) -> Result<(), DomainError> {
        self.notes
            .retain(|(subject, id), _| &Self::location(subject, id) != location);
        Ok(())
    }

    fn export_note(&mut self, content: &str, destination: &Path) -> Result<(), DomainError> {
        self.refuse(destination)?;
        self.exports
            .push((destination.to_path_buf(), content.to_string()));
        Ok(())
    }
}

/// Builder for MockNoteStorage
///
/// Provides a fluent interface for configuring mock contents and behavior.
pub struct MockNoteStorageBuilder {
    subjects: BTreeSet<String>,
    notes: BTreeMap<(String, String), MockEntry>,
    fail_writes: bool,
}

impl MockNoteStorageBuilder {
    pub fn new() -> Self {
        Self {
            subjects: BTreeSet::new(),
            notes: BTreeMap::new(),
            fail_writes: false,
        }
    }

    /// Add a note file under `subject`
    pub fn with_note(
        mut self,
        subject: &str,
        id: &str,
        content: &str,
        created_at: DateTime<Local>,
    ) -> Self {
        self.subjects.insert(subject.to_string());
        self.notes.insert(
            (subject.to_string(), id.to_string()),
            MockEntry {
                content: content.to_string(),
                created_at,
            },
        );
        self
    }

    /// Add a subject folder without notes
    pub fn with_empty_subject(mut self, subject: &str) -> Self {
        self.subjects.insert(subject.to_string());
        self
    }

    /// Make every write and export fail with a permission error
    pub fn with_write_failure(mut self) -> Self {
        self.fail_writes = true;
        self
    }

    pub fn build(self) -> MockNoteStorage {
        MockNoteStorage {
            subjects: self.subjects,
            notes: self.notes,
            fail_writes: self.fail_writes,
            next_created_at: at(2025, 1, 1, 0, 0, 0),
            writes: 0,
            exports: Vec::new(),
        }
    }
}

impl Default for MockNoteStorageBuilder {
    fn default() -> Self {
        Self::new()
    }
}

pub fn init_test_setup() -> Result<()> {
    // Set up logging first
    setup_test_logging();

    info!("Test Setup complete");
    Ok(())
}

fn setup_test_logging() {
    debug!("INIT: Attempting logger init from testing.rs");
    if env::var("RUST_LOG").is_err() {
        env::set_var("RUST_LOG", "trace");
    }

    // Create a filter for noisy modules
    let noisy_modules = ["mio"];
    let module_filter = filter_fn(move |metadata| {
        !noisy_modules
            .iter()
            .any(|name| metadata.target().starts_with(name))
    });

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug"));

    let subscriber = tracing_subscriber::registry().with(
        fmt::layer()
            .with_writer(std::io::stderr)
            .with_target(true)
            .with_thread_names(false)
            .with_span_events(FmtSpan::CLOSE)
            .with_filter(module_filter)
            .with_filter(env_filter),
    );

    // Only set if we haven't already set a global subscriber
    if tracing::dispatcher::has_been_set() {
        debug!("Tracing subscriber already set");
    } else {
        subscriber.try_init().unwrap_or_else(|e| {
            eprintln!("Error: Failed to set up logging: {}", e);
        });
    }
}
