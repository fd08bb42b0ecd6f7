// src/application/controller.rs
use crate::application::{Clock, NoteRepository, NoteStorage, SystemClock};
use crate::constants::ALL_NOTES_LABEL;
use crate::domain::{DomainError, Note, NoteLocation};
use std::path::Path;
use tracing::{debug, instrument};

/// Contents of the edit form
#[derive(Debug, Clone, PartialEq, Default)]
pub struct EditForm {
    pub subject: String,
    pub content: String,
    /// Note being edited, `None` for a new note
    pub editing: Option<Note>,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub enum Mode {
    #[default]
    Browse,
    View(Note),
    Edit(EditForm),
}

impl Mode {
    pub fn name(&self) -> &'static str {
        match self {
            Mode::Browse => "browse",
            Mode::View(_) => "view",
            Mode::Edit(_) => "edit",
        }
    }
}

/// Snapshot handed to the presentation layer
#[derive(Debug, Clone, PartialEq)]
pub struct ViewState {
    /// Alphabetical
    pub subjects: Vec<String>,
    pub subject_filter: Option<String>,
    pub search_text: String,
    /// Filtered, newest first
    pub notes: Vec<Note>,
    pub mode: Mode,
}

impl ViewState {
    /// e.g. `Work (3)` or `All Notes (12)`
    pub fn header(&self) -> String {
        let label = self.subject_filter.as_deref().unwrap_or(ALL_NOTES_LABEL);
        format!("{label} ({})", self.notes.len())
    }

    pub fn selected(&self) -> Option<&Note> {
        match &self.mode {
            Mode::View(note) => Some(note),
            _ => None,
        }
    }
}

/// Tracks filters, selection and display mode, and turns user intents into
/// repository calls
pub struct Controller<S: NoteStorage, C: Clock = SystemClock> {
    repository: NoteRepository<S, C>,
    subject_filter: Option<String>,
    search_text: String,
    mode: Mode,
}

impl<S: NoteStorage, C: Clock> Controller<S, C> {
    /// Load notes from storage and start in browse mode
    pub fn open(mut repository: NoteRepository<S, C>) -> Result<Self, DomainError> {
        repository.reload()?;
        Ok(Self {
            repository,
            subject_filter: None,
            search_text: String::new(),
            mode: Mode::Browse,
        })
    }

    pub fn repository(&self) -> &NoteRepository<S, C> {
        &self.repository
    }

    pub fn mode(&self) -> &Mode {
        &self.mode
    }

    pub fn view(&self) -> ViewState {
        ViewState {
            subjects: self.repository.subjects().to_vec(),
            subject_filter: self.subject_filter.clone(),
            search_text: self.search_text.clone(),
            notes: self.visible_notes(),
            mode: self.mode.clone(),
        }
    }

    fn visible_notes(&self) -> Vec<Note> {
        self.repository
            .query(self.subject_filter.as_deref(), &self.search_text)
    }

    fn invalid(&self, action: &'static str) -> DomainError {
        DomainError::InvalidTransition {
            action,
            mode: self.mode.name(),
        }
    }

    /// `None` shows all subjects
    pub fn select_subject(&mut self, subject: Option<&str>) {
        debug!(?subject, "Selecting subject");
        self.subject_filter = subject.map(str::to_string);
        self.mode = Mode::Browse;
    }

    pub fn set_search_text(&mut self, text: &str) {
        self.search_text = text.to_string();
        self.mode = Mode::Browse;
    }

    pub fn select_note(&mut self, note: Note) {
        self.mode = Mode::View(note);
    }

    /// Select by position in the currently displayed list (0-based)
    pub fn select_note_at(&mut self, index: usize) -> Result<Note, DomainError> {
        let mut visible = self.visible_notes();
        if index >= visible.len() {
            return Err(DomainError::NoNoteAtPosition {
                index,
                visible: visible.len(),
            });
        }
        let note = visible.swap_remove(index);
        debug!(index, id = %note.id, "Selected note");
        self.mode = Mode::View(note.clone());
        Ok(note)
    }

    /// Blank form, subject pre-filled from the active filter
    pub fn new_note(&mut self) {
        self.mode = Mode::Edit(EditForm {
            subject: self.subject_filter.clone().unwrap_or_default(),
            content: String::new(),
            editing: None,
        });
    }

    pub fn edit(&mut self) -> Result<(), DomainError> {
        let Mode::View(note) = &self.mode else {
            return Err(self.invalid("edit"));
        };
        self.mode = Mode::Edit(EditForm {
            subject: note.subject.clone(),
            content: note.content.clone(),
            editing: Some(note.clone()),
        });
        Ok(())
    }

    /// Persist the form. On failure the controller stays in edit mode with
    /// the rejected input kept in the form.
    #[instrument(level = "debug", skip(self, content))]
    pub fn save(&mut self, subject: &str, content: &str) -> Result<NoteLocation, DomainError> {
        let Mode::Edit(form) = &mut self.mode else {
            return Err(self.invalid("save"));
        };
        form.subject = subject.to_string();
        form.content = content.to_string();
        let editing = form.editing.clone();

        let location = self.repository.save(editing.as_ref(), subject, content)?;
        self.mode = Mode::Browse;
        Ok(location)
    }

    pub fn cancel(&mut self) -> Result<(), DomainError> {
        let Mode::Edit(form) = &mut self.mode else {
            return Err(self.invalid("cancel"));
        };
        self.mode = match form.editing.take() {
            Some(note) => Mode::View(note),
            None => Mode::Browse,
        };
        Ok(())
    }

    /// Delete the selected note once `confirm` agrees. Returns whether the
    /// note was deleted; a declined confirmation keeps the note selected.
    pub fn delete<F>(&mut self, confirm: F) -> Result<bool, DomainError>
    where
        F: FnOnce(&Note) -> bool,
    {
        let Mode::View(note) = &self.mode else {
            return Err(self.invalid("delete"));
        };
        if !confirm(note) {
            debug!(id = %note.id, "Delete not confirmed");
            return Ok(false);
        }
        let note = note.clone();
        self.repository.delete(&note)?;
        self.mode = Mode::Browse;
        Ok(true)
    }

    pub fn export(&mut self, destination: &Path) -> Result<(), DomainError> {
        let Mode::View(note) = &self.mode else {
            return Err(self.invalid("export"));
        };
        let note = note.clone();
        self.repository.export(&note, destination)
    }

    /// Pick up external changes without touching filters or mode
    pub fn reload(&mut self) -> Result<(), DomainError> {
        self.repository.reload()
    }
}
