// src/ports/text.rs
use crate::application::{EditForm, Mode, ViewState};
use crate::constants::ALL_NOTES_LABEL;
use crate::domain::Note;
use crate::infrastructure::config::DisplayConfig;
use crate::util::text::preview;
use std::fmt::Write;

const PLACEHOLDER: &str = "Select a note or create a new one";

/// Renders view-state as plain terminal text
#[derive(Debug, Clone)]
pub struct TextPresenter {
    date_format: String,
    preview_chars: usize,
}

impl TextPresenter {
    pub fn new(display: &DisplayConfig) -> Self {
        Self {
            date_format: display.date_format.clone(),
            preview_chars: display.preview_chars,
        }
    }

    /// Confirmation question shown before deleting `note`
    pub fn render_delete_prompt(&self, note: &Note) -> String {
        format!(
            "Delete \"{}\" from {}? [y/N] ",
            preview(&note.content, self.preview_chars),
            note.subject
        )
    }

    fn date(&self, note: &Note) -> String {
        note.created_at.format(&self.date_format).to_string()
    }

    /// `All Notes` first, then subjects alphabetically; the active one starred
    pub fn render_subjects(&self, state: &ViewState) -> String {
        let active = state.subject_filter.as_deref();
        let mut out = String::new();
        let marker = |selected: bool| if selected { '*' } else { ' ' };

        let _ = writeln!(out, "{} {ALL_NOTES_LABEL}", marker(active.is_none()));
        for subject in &state.subjects {
            let _ = writeln!(out, "{} {subject}", marker(active == Some(subject.as_str())));
        }
        out
    }

    /// Header plus one numbered row per visible note, positions 1-based
    pub fn render_note_list(&self, state: &ViewState) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "{}", state.header());
        if !state.search_text.is_empty() {
            let _ = writeln!(out, "Search: {}", state.search_text);
        }
        for (index, note) in state.notes.iter().enumerate() {
            let _ = writeln!(
                out,
                "{:>3}. {}: {}  {}",
                index + 1,
                note.subject,
                preview(&note.content, self.preview_chars),
                self.date(note)
            );
        }
        out
    }

    pub fn render_note(&self, note: &Note) -> String {
        format!(
            "{}  ({})\n\n{}\n",
            note.subject,
            self.date(note),
            note.content.trim_end()
        )
    }

    pub fn render_form(&self, form: &EditForm) -> String {
        let title = match &form.editing {
            Some(note) => format!("Editing note {}", note.id),
            None => "New note".to_string(),
        };
        format!(
            "{title}\nSubject: {}\nContent:\n{}\n",
            form.subject, form.content
        )
    }

    /// Everything the current mode shows
    pub fn render(&self, state: &ViewState) -> String {
        match &state.mode {
            Mode::Browse => format!("{}\n{PLACEHOLDER}\n", self.render_note_list(state)),
            Mode::View(note) => self.render_note(note),
            Mode::Edit(form) => self.render_form(form),
        }
    }
}
