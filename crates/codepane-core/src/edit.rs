//! Selection and edit-result value types shared by the text engines.

/// A selection expressed in character offsets.
///
/// `start <= end` always holds; `start == end` is a caret.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
pub struct Selection {
    /// Inclusive start character offset.
    pub start: usize,
    /// Exclusive end character offset.
    pub end: usize,
}

impl Selection {
    /// Create a selection; reversed bounds are swapped.
    pub fn new(start: usize, end: usize) -> Self {
        Self {
            start: start.min(end),
            end: start.max(end),
        }
    }

    /// A zero-length selection at `offset`.
    pub fn caret(offset: usize) -> Self {
        Self {
            start: offset,
            end: offset,
        }
    }

    /// Returns `true` if this selection is a caret.
    pub fn is_caret(&self) -> bool {
        self.start == self.end
    }

    /// Number of selected characters.
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    /// Returns `true` for a caret.
    pub fn is_empty(&self) -> bool {
        self.is_caret()
    }

    /// Clamp both bounds to `len`.
    pub fn clamped(self, len: usize) -> Self {
        Self::new(self.start.min(len), self.end.min(len))
    }
}

/// The result of a text transform: new text plus the selection to restore.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditResult {
    /// The full transformed text.
    pub text: String,
    /// Selection start (char offset into `text`).
    pub start: usize,
    /// Selection end (char offset into `text`).
    pub end: usize,
}

impl EditResult {
    /// Build a result, normalizing the selection bounds.
    pub fn new(text: String, start: usize, end: usize) -> Self {
        let selection = Selection::new(start, end);
        Self {
            text,
            start: selection.start,
            end: selection.end,
        }
    }

    /// An unchanged result for `text` with `selection`.
    pub fn unchanged(text: &str, selection: Selection) -> Self {
        Self::new(text.to_string(), selection.start, selection.end)
    }

    /// The selection carried by this result.
    pub fn selection(&self) -> Selection {
        Selection::new(self.start, self.end)
    }
}
