// src/domain/subject.rs
use crate::domain::ValidationError;
use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    static ref UNSAFE_PATH_CHARS: Regex =
        Regex::new(r#"[\\/*?:"<>|]"#).expect("Failed to compile unsafe path regex");
}

/// Replace every character that is illegal in common filesystem path
/// components with `_`.
///
/// The result is used verbatim as the subject's folder name.
///
/// # Examples
///
/// ```
/// use notebox::domain::subject::sanitize_subject;
///
/// assert_eq!(sanitize_subject("a/b: c?"), "a_b_ c_");
/// ```
pub fn sanitize_subject(subject: &str) -> String {
    UNSAFE_PATH_CHARS.replace_all(subject, "_").into_owned()
}

/// Trim and check user input for a save, returning the sanitized subject and
/// the trimmed content.
pub fn validate_note_input(
    subject_input: &str,
    content_input: &str,
) -> Result<(String, String), ValidationError> {
    let subject = subject_input.trim();
    if subject.is_empty() {
        return Err(ValidationError::EmptySubject);
    }
    let content = content_input.trim();
    if content.is_empty() {
        return Err(ValidationError::EmptyContent);
    }

    let subject = sanitize_subject(subject);
    if subject == "." || subject == ".." {
        return Err(ValidationError::ReservedSubject);
    }
    Ok((subject, content.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("Work", "Work")]
    #[case(r"a\b", "a_b")]
    #[case("a/b", "a_b")]
    #[case("what?*", "what__")]
    #[case(r#"say "hi""#, "say _hi_")]
    #[case("<tag>|pipe:", "_tag__pipe_")]
    #[case("Ünïcödé notes", "Ünïcödé notes")]
    fn given_subject_when_sanitizing_then_replaces_unsafe_chars(
        #[case] input: &str,
        #[case] expected: &str,
    ) {
        assert_eq!(sanitize_subject(input), expected);
    }

    #[test]
    fn given_sanitized_subject_when_sanitizing_again_then_unchanged() {
        let once = sanitize_subject(r#"\/*?:"<>|"#);
        assert_eq!(once, "_________");
        assert_eq!(sanitize_subject(&once), once);
    }

    #[test]
    fn given_blank_subject_when_validating_then_reports_empty_subject() {
        assert_eq!(
            validate_note_input("   ", "content"),
            Err(ValidationError::EmptySubject)
        );
    }

    #[test]
    fn given_blank_content_when_validating_then_reports_empty_content() {
        assert_eq!(
            validate_note_input("Work", " \n\t "),
            Err(ValidationError::EmptyContent)
        );
    }

    #[test]
    fn given_both_blank_when_validating_then_subject_is_reported_first() {
        assert_eq!(
            validate_note_input("", ""),
            Err(ValidationError::EmptySubject)
        );
    }

    #[rstest]
    #[case(".")]
    #[case("..")]
    #[case("  ..  ")]
    fn given_dot_subject_when_validating_then_rejects(#[case] subject: &str) {
        assert_eq!(
            validate_note_input(subject, "content"),
            Err(ValidationError::ReservedSubject)
        );
    }

    #[test]
    fn given_padded_input_when_validating_then_trims_and_sanitizes() {
        let (subject, content) =
            validate_note_input("  Work/Home ", "\n  remember this  \n").unwrap();
        assert_eq!(subject, "Work_Home");
        assert_eq!(content, "remember this");
    }
}
