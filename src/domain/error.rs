// src/domain/error.rs
use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Input rejected before anything touches the disk
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Subject cannot be empty")]
    EmptySubject,
    #[error("Content cannot be empty")]
    EmptyContent,
    #[error("Subject cannot be '.' or '..'")]
    ReservedSubject,
}

#[derive(Error, Debug)]
pub enum DomainError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error("I/O error at {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("No note at position {} ({visible} shown)", .index + 1)]
    NoNoteAtPosition { index: usize, visible: usize },
    #[error("Cannot {action} in {mode} mode")]
    InvalidTransition {
        action: &'static str,
        mode: &'static str,
    },
}

impl DomainError {
    pub fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
