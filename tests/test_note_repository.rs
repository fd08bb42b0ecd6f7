mod helpers;

use anyhow::Result;
use helpers::{TestNotes, FROZEN_ID};
use notebox::domain::{DomainError, ValidationError};
use std::fs;

#[test]
fn given_missing_root_when_reloading_then_creates_it_and_loads_nothing() -> Result<()> {
    // Arrange
    let notes = TestNotes::new()?;
    assert!(!notes.root.exists());

    // Act
    let repo = notes.repository()?;

    // Assert
    assert!(notes.root.is_dir());
    assert!(repo.notes().is_empty());
    assert!(repo.subjects().is_empty());
    Ok(())
}

#[test]
fn given_valid_input_when_saving_new_note_then_reload_yields_exactly_that_note() -> Result<()> {
    let notes = TestNotes::new()?;
    let mut repo = notes.repository()?;

    repo.save(None, "Work", "quarterly review")?;

    let all = repo.query(None, "");
    assert_eq!(all.len(), 1);
    assert_eq!(all[0].id, FROZEN_ID);
    assert_eq!(all[0].subject, "Work");
    assert_eq!(all[0].content, "quarterly review");
    assert_eq!(
        fs::read_to_string(notes.note_path("Work", FROZEN_ID))?,
        "quarterly review"
    );
    Ok(())
}

#[test]
fn given_unsafe_subject_when_saving_then_folder_name_is_sanitized() -> Result<()> {
    let notes = TestNotes::new()?;
    let mut repo = notes.repository()?;

    repo.save(None, r#"C:\Projects/"Q3" <draft>?|*"#, "plan")?;

    let expected = "C__Projects__Q3_ _draft____";
    assert!(notes.note_path(expected, FROZEN_ID).is_file());
    assert_eq!(repo.subjects(), [expected]);
    Ok(())
}

#[test]
fn given_blank_content_when_saving_then_validation_fails_and_no_file_is_created() -> Result<()> {
    let notes = TestNotes::new()?;
    let mut repo = notes.repository()?;

    let result = repo.save(None, "Work", "   ");

    assert!(matches!(
        result,
        Err(DomainError::Validation(ValidationError::EmptyContent))
    ));
    assert!(!notes.root.join("Work").exists());
    Ok(())
}

#[test]
fn given_blank_subject_when_saving_then_validation_fails() -> Result<()> {
    let notes = TestNotes::new()?;
    let mut repo = notes.repository()?;

    let result = repo.save(None, " \t", "content");

    assert!(matches!(
        result,
        Err(DomainError::Validation(ValidationError::EmptySubject))
    ));
    assert!(fs::read_dir(&notes.root)?.next().is_none());
    Ok(())
}

#[test]
fn given_two_notes_in_same_second_when_saving_then_second_overwrites_first() -> Result<()> {
    let notes = TestNotes::new()?;
    let mut repo = notes.repository()?;

    repo.save(None, "Ideas", "first idea")?;
    repo.save(None, "Ideas", "second idea")?;

    let ideas = repo.query(Some("Ideas"), "");
    assert_eq!(ideas.len(), 1);
    assert_eq!(ideas[0].content, "second idea");
    Ok(())
}

#[test]
fn given_note_when_changing_subject_then_file_moves_and_id_is_kept() -> Result<()> {
    let notes = TestNotes::new()?;
    let old_path = notes.write_raw("Work", "20200101080000", "move me")?;
    let mut repo = notes.repository()?;
    let note = repo.notes()[0].clone();

    repo.save(Some(&note), "Personal", "move me")?;

    assert!(!old_path.exists());
    assert!(notes.note_path("Personal", "20200101080000").is_file());
    let moved = repo.query(Some("Personal"), "");
    assert_eq!(moved.len(), 1);
    assert_eq!(moved[0].id, "20200101080000");
    assert!(repo.query(Some("Work"), "").is_empty());
    Ok(())
}

#[cfg(unix)]
#[test]
fn given_new_subject_resolving_to_same_folder_when_saving_then_note_survives() -> Result<()> {
    // Arrange: `work` names the same folder as `Work`, as on a case-insensitive filesystem
    let notes = TestNotes::new()?;
    let old_path = notes.write_raw("Work", "20230101000000", "keep me")?;
    std::os::unix::fs::symlink(notes.root.join("Work"), notes.root.join("work"))?;
    let mut repo = notes.repository()?;
    let note = repo.query(Some("Work"), "")[0].clone();

    // Act
    repo.save(Some(&note), "work", "keep me, edited")?;

    // Assert
    assert_eq!(fs::read_to_string(&old_path)?, "keep me, edited");
    let remaining = repo.query(None, "keep me");
    assert!(!remaining.is_empty());
    assert!(remaining.iter().all(|n| n.id == "20230101000000"));
    Ok(())
}

#[test]
fn given_note_when_editing_content_only_then_rewrites_same_file() -> Result<()> {
    let notes = TestNotes::new()?;
    let path = notes.write_raw("Work", "20200101080000", "draft")?;
    let mut repo = notes.repository()?;
    let note = repo.notes()[0].clone();

    let location = repo.save(Some(&note), "Work", "  final  ")?;

    assert_eq!(location.as_path(), path);
    assert_eq!(fs::read_to_string(&path)?, "final");
    assert_eq!(repo.notes().len(), 1);
    Ok(())
}

#[test]
fn given_note_when_deleting_then_file_and_note_are_gone() -> Result<()> {
    let notes = TestNotes::new()?;
    let path = notes.write_raw("Work", "1", "obsolete")?;
    notes.write_raw("Work", "2", "keep")?;
    let mut repo = notes.repository()?;
    let doomed = repo.query(None, "obsolete")[0].clone();

    repo.delete(&doomed)?;

    assert!(!path.exists());
    assert_eq!(repo.notes().len(), 1);
    assert_eq!(repo.notes()[0].content, "keep");
    Ok(())
}

#[test]
fn given_note_removed_externally_when_deleting_then_succeeds() -> Result<()> {
    let notes = TestNotes::new()?;
    let path = notes.write_raw("Work", "1", "vanishing")?;
    let mut repo = notes.repository()?;
    let note = repo.notes()[0].clone();
    fs::remove_file(&path)?;

    repo.delete(&note)?;

    assert!(repo.notes().is_empty());
    Ok(())
}

#[test]
fn given_search_text_when_querying_then_matches_subject_or_content() -> Result<()> {
    let notes = TestNotes::new()?;
    notes.write_raw("Ideas", "1", "buy milk")?;
    notes.write_raw("Work", "2", "Great idea for project")?;
    notes.write_raw("Work", "3", "expenses")?;
    let repo = notes.repository()?;

    let found = repo.query(None, "idea");

    let mut ids: Vec<_> = found.iter().map(|n| n.id.as_str()).collect();
    ids.sort();
    assert_eq!(ids, ["1", "2"]);
    Ok(())
}

#[test]
fn given_loaded_notes_when_querying_without_filters_then_returns_each_once_newest_first() -> Result<()> {
    let notes = TestNotes::new()?;
    notes.write_raw("A", "1", "one")?;
    notes.write_raw("B", "2", "two")?;
    notes.write_raw("B", "3", "three")?;
    let repo = notes.repository()?;

    let all = repo.query(None, "");

    assert_eq!(all.len(), 3);
    let mut ids: Vec<_> = all.iter().map(|n| n.id.as_str()).collect();
    ids.sort();
    ids.dedup();
    assert_eq!(ids.len(), 3);
    for pair in all.windows(2) {
        assert!(pair[0].created_at >= pair[1].created_at);
    }
    Ok(())
}

#[test]
fn given_externally_placed_empty_file_when_reloading_then_loads_empty_note() -> Result<()> {
    let notes = TestNotes::new()?;
    notes.write_raw("Inbox", "dropped", "")?;

    let repo = notes.repository()?;

    assert_eq!(repo.notes().len(), 1);
    assert_eq!(repo.notes()[0].id, "dropped");
    assert!(repo.notes()[0].content.is_empty());
    Ok(())
}

#[test]
fn given_empty_subject_folder_when_reloading_then_subject_is_listed() -> Result<()> {
    let notes = TestNotes::new()?;
    fs::create_dir_all(notes.root.join("Empty"))?;
    notes.write_raw("Busy", "1", "x")?;

    let repo = notes.repository()?;

    assert_eq!(repo.subjects(), ["Busy", "Empty"]);
    Ok(())
}

#[test]
fn given_note_when_exporting_then_destination_holds_content_verbatim() -> Result<()> {
    let notes = TestNotes::new()?;
    notes.write_raw("Work", "1", "line one\nline two\n")?;
    let mut repo = notes.repository()?;
    let note = repo.notes()[0].clone();
    let destination = notes.outside("export.txt");

    repo.export(&note, &destination)?;

    assert_eq!(fs::read_to_string(destination)?, "line one\nline two\n");
    Ok(())
}
