// src/application/mod.rs
pub mod controller;
pub mod note_repository;
pub mod note_storage;

pub use controller::{Controller, EditForm, Mode, ViewState};
pub use note_repository::NoteRepository;
pub use note_storage::{Clock, NoteStorage, SystemClock};
