//! Line-number gutter model.

use std::borrow::Cow;
use unicode_width::UnicodeWidthStr;

/// Number of `\n`-separated segments in `text` (at least 1).
pub fn line_count(text: &str) -> usize {
    text.bytes().filter(|&b| b == b'\n').count() + 1
}

/// Gutter numbers `1..=line_count(text)`.
pub fn line_numbers(text: &str) -> Vec<usize> {
    (1..=line_count(text)).collect()
}

/// Text to feed the highlighted overlay.
///
/// A trailing `\n` gets one space appended so the overlay renders the final empty line with the
/// same height as the input surface does.
pub fn display_text(text: &str) -> Cow<'_, str> {
    if text.ends_with('\n') {
        Cow::Owned(format!("{text} "))
    } else {
        Cow::Borrowed(text)
    }
}

/// Width of the widest line in terminal cells.
pub fn content_columns(text: &str) -> usize {
    text.split('\n')
        .map(|line| line.strip_suffix('\r').unwrap_or(line).width())
        .max()
        .unwrap_or(0)
}
