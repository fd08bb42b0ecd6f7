// src/domain/mod.rs
pub mod error;
pub mod note;
pub mod subject;

pub use error::{DomainError, ValidationError};
pub use note::{mint_note_id, Note, NoteLocation, StoredNote};
pub use subject::{sanitize_subject, validate_note_input};
