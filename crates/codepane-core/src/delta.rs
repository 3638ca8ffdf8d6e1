//! Structured text change deltas.
//!
//! The surface only tells dependents "the text changed". When the change went through the
//! [`MinimalDiffApplier`](crate::MinimalDiffApplier) we know exactly which span was replaced, and
//! that is reported as a [`TextDelta`] in **character offsets** (Unicode scalar values).

use crate::text::{char_len, split_at_char};

/// A single text edit expressed in character offsets.
///
/// `start` is a character offset in the document before the edit; the deleted range is the length
/// of `deleted_text` in chars.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextDeltaEdit {
    /// Start character offset of the edit.
    pub start: usize,
    /// Exact deleted text (may be empty).
    pub deleted_text: String,
    /// Exact inserted text (may be empty).
    pub inserted_text: String,
}

impl TextDeltaEdit {
    /// Length of `deleted_text` in characters.
    pub fn deleted_len(&self) -> usize {
        char_len(&self.deleted_text)
    }

    /// Length of `inserted_text` in characters.
    pub fn inserted_len(&self) -> usize {
        char_len(&self.inserted_text)
    }

    /// Exclusive end character offset in the pre-edit document.
    pub fn end(&self) -> usize {
        self.start.saturating_add(self.deleted_len())
    }

    /// Apply this edit to `text`, which must be the pre-edit document.
    pub fn apply_to(&self, text: &str) -> String {
        let (before, rest) = split_at_char(text, self.start);
        let (_, after) = split_at_char(rest, self.deleted_len());
        format!("{before}{}{after}", self.inserted_text)
    }
}

/// A structured description of a document text change.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextDelta {
    /// Character count before applying `edits`.
    pub before_char_count: usize,
    /// Character count after applying `edits`.
    pub after_char_count: usize,
    /// Ordered edits transforming the "before" document into the "after" document.
    pub edits: Vec<TextDeltaEdit>,
}

impl TextDelta {
    /// A delta made of one edit.
    pub fn single(before_char_count: usize, edit: TextDeltaEdit) -> Self {
        let after_char_count = before_char_count - edit.deleted_len() + edit.inserted_len();
        Self {
            before_char_count,
            after_char_count,
            edits: vec![edit],
        }
    }

    /// Returns `true` if this delta contains no edits.
    pub fn is_empty(&self) -> bool {
        self.edits.is_empty()
    }

    /// Apply all edits in order.
    pub fn apply_to(&self, text: &str) -> String {
        self.edits
            .iter()
            .fold(text.to_string(), |acc, edit| edit.apply_to(&acc))
    }
}
