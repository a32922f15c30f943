//! Helpers shared by unit and integration tests.

/// Remove CSI escape sequences (colours, bold) from terminal output.
///
/// # Examples
///
/// ```
/// use lastfive::test_utils::strip_ansi_codes;
/// assert_eq!(strip_ansi_codes("\x1b[1mbold\x1b[0m text"), "bold text");
/// ```
#[must_use]
pub fn strip_ansi_codes(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    let mut chars = input.chars().peekable();
    while let Some(ch) = chars.next() {
        if ch == '\x1b' && chars.next_if_eq(&'[').is_some() {
            // parameters and intermediates run until a final byte in '@'..='~'
            for c in chars.by_ref() {
                if ('@'..='~').contains(&c) {
                    break;
                }
            }
            continue;
        }
        out.push(ch);
    }
    out
}

pub use crate::environment::{remove_var, set_var};
