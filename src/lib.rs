// src/lib.rs
pub mod application;
pub mod cli;
pub mod constants;
pub mod domain;
pub mod infrastructure;
pub mod ports;
pub mod util;

use anyhow::{Context, Result};
use application::{Controller, NoteRepository, NoteStorage};
use infrastructure::{Config, FileSystemStorage};
use ports::{shell, Shell, TextPresenter};
use std::io::{self, Read, Write};
use std::path::Path;
use tracing::{debug, info};
use crate::cli::args::{Args, Command, Filter};

pub fn run(args: Args) -> Result<()> {
    debug!(?args, "Starting notebox with arguments");

    let config = load_config(args.config.as_deref())?;
    let root = args.root.unwrap_or(config.storage.root);
    debug!(?root, "Using notes root");

    // Initialize application
    let repository = NoteRepository::new(FileSystemStorage::new(&root));
    let mut controller = Controller::open(repository)
        .with_context(|| format!("Failed to load notes from {}", root.display()))?;

    // Initialize presentation
    let presenter = TextPresenter::new(&config.display);
    let stdout = io::stdout();
    let mut out = stdout.lock();

    match args.command {
        Command::Subjects => {
            write!(out, "{}", presenter.render_subjects(&controller.view()))?;
        }
        Command::List { filter } => {
            apply_filter(&mut controller, &filter);
            write!(out, "{}", presenter.render_note_list(&controller.view()))?;
        }
        Command::Show {
            position,
            filter,
            json,
        } => {
            let note = select(&mut controller, &filter, position)?;
            if json {
                writeln!(out, "{}", serde_json::to_string_pretty(&note)?)?;
            } else {
                write!(out, "{}", presenter.render_note(&note))?;
            }
        }
        Command::New { subject, content } => {
            let content = match content {
                Some(content) => content,
                None => read_stdin()?,
            };
            controller.new_note();
            let location = controller.save(&subject, &content)?;
            info!(location = %location.as_path().display(), "Created note");
            writeln!(out, "Saved {}", location.as_path().display())?;
        }
        Command::Edit {
            position,
            filter,
            new_subject,
            content,
        } => {
            // omitted fields keep what the edit form was pre-filled with
            let note = select(&mut controller, &filter, position)?;
            controller.edit()?;
            let subject = new_subject.unwrap_or(note.subject);
            let content = content.unwrap_or(note.content);
            let location = controller.save(&subject, &content)?;
            writeln!(out, "Saved {}", location.as_path().display())?;
        }
        Command::Delete {
            position,
            filter,
            yes,
        } => {
            select(&mut controller, &filter, position)?;
            let stdin = io::stdin();
            let mut input = stdin.lock();
            let deleted = controller
                .delete(|note| yes || shell::confirm_delete(&mut input, &mut out, &presenter, note))?;
            writeln!(out, "{}", if deleted { "Deleted" } else { "Kept" })?;
        }
        Command::Export {
            position,
            destination,
            filter,
        } => {
            select(&mut controller, &filter, position)?;
            controller.export(&destination)?;
            writeln!(out, "Exported to {}", destination.display())?;
        }
        Command::Shell => {
            let stdin = io::stdin();
            Shell::new(&mut controller, &presenter).run(stdin.lock(), &mut out)?;
        }
    }

    Ok(())
}

/// Explicit path must exist; the default location is optional
pub fn load_config(path: Option<&Path>) -> Result<Config> {
    match path {
        Some(path) => Config::load(path),
        None => match Config::default_path() {
            Some(path) => Config::load_or_default(path),
            None => Ok(Config::default()),
        },
    }
}

fn apply_filter<S: NoteStorage>(controller: &mut Controller<S>, filter: &Filter) {
    controller.select_subject(filter.subject.as_deref());
    controller.set_search_text(filter.search.as_deref().unwrap_or_default());
}

/// Resolve a 1-based position against the filtered list and select it
fn select<S: NoteStorage>(
    controller: &mut Controller<S>,
    filter: &Filter,
    position: u32,
) -> Result<domain::Note> {
    apply_filter(controller, filter);
    let index = position
        .checked_sub(1)
        .and_then(|index| usize::try_from(index).ok())
        .context("Positions start at 1")?;
    Ok(controller.select_note_at(index)?)
}

fn read_stdin() -> Result<String> {
    let mut content = String::new();
    io::stdin()
        .read_to_string(&mut content)
        .context("Failed to read note content from stdin")?;
    Ok(content)
}
