// src/ports/shell.rs
use crate::application::{Clock, Controller, Mode, NoteStorage};
use crate::domain::{DomainError, Note};
use crate::ports::text::TextPresenter;
use std::io::{self, BufRead, Write};
use std::path::Path;
use tracing::debug;

const PROMPT: &str = "notebox> ";
const HELP: &str = "\
Commands:
  subjects           list subjects
  all                show notes of every subject
  subject <name>     show notes of one subject
  search [text]      filter by text in subject or content (empty clears)
  list               show the current list
  open <pos>         view the note at a list position
  new                write a new note
  edit               edit the open note
  save               re-enter the form after a failed save
  cancel             leave the form
  delete             delete the open note
  export <path>      write the open note's content to a file
  reload             rescan the notes folder
  quit               leave";

enum Flow {
    Continue,
    Quit,
}

/// Line-oriented interactive front end over a controller
pub struct Shell<'a, S: NoteStorage, C: Clock> {
    controller: &'a mut Controller<S, C>,
    presenter: &'a TextPresenter,
}

impl<'a, S: NoteStorage, C: Clock> Shell<'a, S, C> {
    pub fn new(controller: &'a mut Controller<S, C>, presenter: &'a TextPresenter) -> Self {
        Self {
            controller,
            presenter,
        }
    }

    /// Read commands until `quit` or end of input. Domain errors are printed
    /// and the session goes on; only I/O errors on the streams end it.
    pub fn run<R: BufRead, W: Write>(&mut self, mut input: R, mut output: W) -> io::Result<()> {
        writeln!(output, "{HELP}\n")?;
        self.show(&mut output)?;
        loop {
            write!(output, "{PROMPT}")?;
            output.flush()?;
            let Some(line) = read_line(&mut input)? else {
                break;
            };
            let line = line.trim();
            let (command, arg) = line
                .split_once(char::is_whitespace)
                .map(|(command, arg)| (command, arg.trim()))
                .unwrap_or((line, ""));
            debug!(command, arg, "Shell command");

            if let Flow::Quit = self.dispatch(command, arg, &mut input, &mut output)? {
                break;
            }
        }
        Ok(())
    }

    fn dispatch<R: BufRead, W: Write>(
        &mut self,
        command: &str,
        arg: &str,
        input: &mut R,
        output: &mut W,
    ) -> io::Result<Flow> {
        match command {
            "" => {}
            "help" => writeln!(output, "{HELP}")?,
            "quit" | "exit" => return Ok(Flow::Quit),
            "subjects" => write!(
                output,
                "{}",
                self.presenter.render_subjects(&self.controller.view())
            )?,
            "all" => {
                self.controller.select_subject(None);
                self.show(output)?;
            }
            "subject" if !arg.is_empty() => {
                self.controller.select_subject(Some(arg));
                self.show(output)?;
            }
            "search" => {
                self.controller.set_search_text(arg);
                self.show(output)?;
            }
            "list" => self.show(output)?,
            "open" => match arg.parse::<usize>() {
                Ok(position) if position >= 1 => {
                    let selected = self.controller.select_note_at(position - 1);
                    if report(output, selected)?.is_some() {
                        self.show(output)?;
                    }
                }
                _ => writeln!(output, "Usage: open <position>")?,
            },
            "new" => {
                self.controller.new_note();
                self.fill_form(input, output)?;
            }
            "edit" => {
                let edited = self.controller.edit();
                if report(output, edited)?.is_some() {
                    self.fill_form(input, output)?;
                }
            }
            "save" => {
                if matches!(self.controller.mode(), Mode::Edit(_)) {
                    self.fill_form(input, output)?;
                } else {
                    writeln!(output, "Nothing to save, use new or edit")?;
                }
            }
            "cancel" => {
                let cancelled = self.controller.cancel();
                if report(output, cancelled)?.is_some() {
                    self.show(output)?;
                }
            }
            "delete" => {
                let presenter = self.presenter;
                let deleted = self
                    .controller
                    .delete(|note| confirm_delete(&mut *input, &mut *output, presenter, note));
                match report(output, deleted)? {
                    Some(true) => {
                        writeln!(output, "Deleted")?;
                        self.show(output)?;
                    }
                    Some(false) => writeln!(output, "Kept")?,
                    None => {}
                }
            }
            "export" if !arg.is_empty() => {
                let exported = self.controller.export(Path::new(arg));
                if report(output, exported)?.is_some() {
                    writeln!(output, "Exported to {arg}")?;
                }
            }
            "reload" => {
                let reloaded = self.controller.reload();
                if report(output, reloaded)?.is_some() {
                    self.show(output)?;
                }
            }
            _ => writeln!(output, "Unknown command: {command} (try help)")?,
        }
        Ok(Flow::Continue)
    }

    fn show<W: Write>(&self, output: &mut W) -> io::Result<()> {
        write!(output, "{}", self.presenter.render(&self.controller.view()))
    }

    /// Prompt for subject and content, then save. Empty answers keep the
    /// form's current values.
    fn fill_form<R: BufRead, W: Write>(&mut self, input: &mut R, output: &mut W) -> io::Result<()> {
        let Mode::Edit(form) = self.controller.mode() else {
            return Ok(());
        };
        let form = form.clone();
        write!(output, "{}", self.presenter.render_form(&form))?;

        write!(output, "Subject [{}]: ", form.subject)?;
        output.flush()?;
        let Some(subject) = read_line(input)? else {
            return Ok(());
        };
        let subject = if subject.trim().is_empty() {
            form.subject
        } else {
            subject
        };

        writeln!(
            output,
            "Content, end with a line holding only '.' (nothing keeps the current text):"
        )?;
        let mut lines = Vec::new();
        while let Some(line) = read_line(input)? {
            if line == "." {
                break;
            }
            lines.push(line);
        }
        let content = if lines.is_empty() {
            form.content
        } else {
            lines.join("\n")
        };

        match self.controller.save(&subject, &content) {
            Ok(location) => writeln!(output, "Saved {}", location.as_path().display()),
            Err(e) => writeln!(
                output,
                "Error: {e}\nStill editing: save to retry, cancel to discard"
            ),
        }
    }
}

/// Ask on the terminal whether a note may be deleted; anything but y/yes
/// (or an unreadable answer) declines
pub fn confirm_delete<R: BufRead, W: Write>(
    input: &mut R,
    output: &mut W,
    presenter: &TextPresenter,
    note: &Note,
) -> bool {
    let asked = write!(output, "{}", presenter.render_delete_prompt(note))
        .and_then(|_| output.flush());
    if asked.is_err() {
        return false;
    }
    match read_line(input) {
        Ok(Some(answer)) => {
            let answer = answer.trim();
            answer.eq_ignore_ascii_case("y") || answer.eq_ignore_ascii_case("yes")
        }
        _ => false,
    }
}

fn read_line<R: BufRead>(input: &mut R) -> io::Result<Option<String>> {
    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Ok(None);
    }
    Ok(Some(line.trim_end_matches(|c| c == '\n' || c == '\r').to_string()))
}

/// Print a domain error for the user, pass successes through
fn report<T, W: Write>(output: &mut W, result: Result<T, DomainError>) -> io::Result<Option<T>> {
    match result {
        Ok(value) => Ok(Some(value)),
        Err(e) => {
            writeln!(output, "Error: {e}")?;
            Ok(None)
        }
    }
}
