//! Offset → (line, column) conversion for the status bar and caret restoration.

use std::fmt;

/// A 1-based cursor position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CursorPosition {
    /// 1-based line number.
    pub line: usize,
    /// 1-based column (characters since the start of the line, plus one).
    pub column: usize,
}

impl CursorPosition {
    /// Create a new position.
    pub fn new(line: usize, column: usize) -> Self {
        Self { line, column }
    }
}

impl Default for CursorPosition {
    fn default() -> Self {
        Self { line: 1, column: 1 }
    }
}

impl fmt::Display for CursorPosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Ln {}, Col {}", self.line, self.column)
    }
}

/// Locate a character offset.
///
/// `line` is the number of `\n` before `offset` plus one. `column` is the distance from the
/// last preceding `\n` (or `offset + 1` on the first line). Offsets past the end are clamped.
pub fn locate(text: &str, offset: usize) -> CursorPosition {
    let mut line = 1;
    let mut last_newline: Option<usize> = None;
    let mut consumed = 0;

    for (i, ch) in text.chars().take(offset).enumerate() {
        if ch == '\n' {
            line += 1;
            last_newline = Some(i);
        }
        consumed = i + 1;
    }

    let column = match last_newline {
        Some(index) => consumed - index,
        None => consumed + 1,
    };

    CursorPosition { line, column }
}

/// Inverse of [`locate`]: the char offset of `position`.
///
/// Lines past the end map to the end of the text; columns past the line end clamp to it.
pub fn offset_of(text: &str, position: CursorPosition) -> usize {
    let target_line = position.line.max(1);
    let mut offset = 0;

    for (index, line) in text.split('\n').enumerate() {
        let line_len = line.chars().count();
        if index + 1 == target_line {
            return offset + position.column.saturating_sub(1).min(line_len);
        }
        offset += line_len + 1;
    }

    offset.saturating_sub(1)
}
