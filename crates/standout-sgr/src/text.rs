//! SGR constants and helpers for styled text.

use once_cell::sync::Lazy;
use regex::Regex;
use unicode_width::UnicodeWidthStr;

/// The escape character that starts every control sequence.
pub const ESC: &str = "\x1b";

/// Control Sequence Introducer, `ESC [`.
pub const CSI: &str = "\x1b[";

/// Resets every attribute and color.
pub const CLEAR_CODE: &str = "\x1b[0m";

static SGR_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\x1b\[[0-9]+(?:;[0-9]+)*m").expect("SGR pattern is a valid regex"));

/// Removes every SGR escape sequence (`ESC [ n ; n ... m`) from `text`.
///
/// # Example
///
/// ```rust
/// use standout_sgr::uncolor;
///
/// assert_eq!(uncolor("\x1b[1m\x1b[38;5;196mhot\x1b[0m"), "hot");
/// ```
pub fn uncolor(text: &str) -> String {
    SGR_PATTERN.replace_all(text, "").into_owned()
}

/// Returns `true` if `text` contains at least one SGR sequence.
pub fn has_sgr(text: &str) -> bool {
    SGR_PATTERN.is_match(text)
}

/// Terminal column width of `text` once SGR sequences are stripped.
///
/// Uses Unicode width rules, so CJK characters count as two columns.
pub fn display_width(text: &str) -> usize {
    uncolor(text).width()
}
