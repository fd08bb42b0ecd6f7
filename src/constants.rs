// src/constants.rs
//
// Application-wide constants for the on-disk layout and default presentation.
// Each constant is documented with its purpose and usage context.

/// Default notes root, relative to the working directory.
///
/// Used in: `infrastructure/config.rs`
pub const DEFAULT_NOTES_ROOT: &str = "notes";

/// Extension of note files inside a subject directory (without the dot).
///
/// Used in: `infrastructure/fs_storage.rs`
pub const NOTE_EXTENSION: &str = "txt";

/// `chrono` format for ids minted for new notes (second resolution, local time).
///
/// Two notes created in the same second under the same subject share an id,
/// the later write replaces the earlier file.
///
/// Used in: `domain/note.rs`
pub const NOTE_ID_FORMAT: &str = "%Y%m%d%H%M%S";

/// Default `chrono` format for displaying creation dates.
///
/// Used in: `infrastructure/config.rs`, `ports/text.rs`
pub const DEFAULT_DATE_FORMAT: &str = "%Y-%m-%d %H:%M";

/// Default number of content characters shown in a note list row.
///
/// Used in: `infrastructure/config.rs`
pub const DEFAULT_PREVIEW_CHARS: usize = 30;

/// Header label used when no subject filter is active.
///
/// Used in: `application/controller.rs`, `ports/text.rs`
pub const ALL_NOTES_LABEL: &str = "All Notes";

/// Directory and file name of the optional config below the user config dir.
///
/// Used in: `infrastructure/config.rs`
pub const CONFIG_DIR_NAME: &str = "notebox";
pub const CONFIG_FILE_NAME: &str = "config.toml";
