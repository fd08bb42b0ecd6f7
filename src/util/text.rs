// src/util/text.rs

/// Shorten note content to a single-line preview of at most `max_chars`
/// characters.
///
/// This function:
/// 1. Flattens line breaks and tabs into spaces
/// 2. Takes the first `max_chars` characters (not bytes)
/// 3. Appends `...` when anything was cut off
///
/// # Examples
///
/// ```
/// use notebox::util::text::preview;
///
/// assert_eq!(preview("Buy milk\nand eggs", 8), "Buy milk...");
/// assert_eq!(preview("short", 30), "short");
/// ```
pub fn preview(content: &str, max_chars: usize) -> String {
    let flat: String = content
        .trim()
        .chars()
        .map(|c| if c.is_whitespace() { ' ' } else { c })
        .collect();

    let mut chars = flat.char_indices();
    match chars.nth(max_chars) {
        Some((cut, _)) => format!("{}...", &flat[..cut]),
        None => flat,
    }
}
