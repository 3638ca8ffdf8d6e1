//! The editable-surface capability the engines drive.
//!
//! A host (a browser `<textarea>`, a TUI input widget, ...) owns the text, the selection and a
//! native undo stack. The core only talks to it through [`EditableSurface`], so tests and headless
//! hosts can use [`MemorySurface`].

use crate::delta::TextDeltaEdit;
use crate::edit::Selection;
use crate::scroll::ScrollOffsets;
use crate::text::{char_len, char_slice};
use std::borrow::Cow;
use thiserror::Error;

/// Errors reported by an [`EditableSurface`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SurfaceError {
    /// The host has no incremental (undo-recording) insert primitive.
    #[error("incremental text insertion is not supported by this surface")]
    Unsupported,
    /// The host refused the edit.
    #[error("surface rejected the edit: {0}")]
    Rejected(String),
}

/// A host-controlled editable text surface with a native undo stack.
pub trait EditableSurface {
    /// Current text.
    fn text(&self) -> Cow<'_, str>;

    /// Current selection (char offsets).
    fn selection(&self) -> Selection;

    /// Set the selection (char offsets).
    fn select_range(&mut self, start: usize, end: usize);

    /// Replace the current selection with `text` as a native edit the undo stack records.
    fn insert_at_selection(&mut self, text: &str) -> Result<(), SurfaceError>;

    /// Overwrite the whole value. Hosts typically lose undo history here.
    fn replace_value(&mut self, text: &str);

    /// Give the surface input focus before editing. Default: no-op.
    fn focus(&mut self) {}

    /// Tell dependents (highlighting, line numbers) that the text changed. Default: no-op.
    fn notify_changed(&mut self) {}

    /// Current scroll offsets.
    fn scroll(&self) -> ScrollOffsets {
        ScrollOffsets::default()
    }

    /// Set the scroll offsets. Default: no-op.
    fn set_scroll(&mut self, _offsets: ScrollOffsets) {}
}

#[derive(Debug, Clone)]
struct UndoEntry {
    edit: TextDeltaEdit,
    selection_before: Selection,
}

/// An in-memory [`EditableSurface`] with browser-like undo semantics.
///
/// - every [`insert_at_selection`](EditableSurface::insert_at_selection) is one undo step and
///   leaves the caret after the inserted text;
/// - [`replace_value`](EditableSurface::replace_value) drops the undo history and moves the caret
///   to the end.
#[derive(Debug, Clone)]
pub struct MemorySurface {
    text: String,
    selection: Selection,
    scroll: ScrollOffsets,
    incremental: bool,
    undo_stack: Vec<UndoEntry>,
    redo_stack: Vec<UndoEntry>,
    change_notifications: usize,
    focused: bool,
}

impl MemorySurface {
    /// Create a surface holding `text` with the caret at the start.
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            selection: Selection::caret(0),
            scroll: ScrollOffsets::default(),
            incremental: true,
            undo_stack: Vec::new(),
            redo_stack: Vec::new(),
            change_notifications: 0,
            focused: false,
        }
    }

    /// Create a surface that has no incremental insert primitive.
    pub fn without_incremental_edits(text: impl Into<String>) -> Self {
        Self {
            incremental: false,
            ..Self::new(text)
        }
    }

    /// Number of undo steps available.
    pub fn undo_depth(&self) -> usize {
        self.undo_stack.len()
    }

    /// Number of redo steps available.
    pub fn redo_depth(&self) -> usize {
        self.redo_stack.len()
    }

    /// How many times [`notify_changed`](EditableSurface::notify_changed) was called.
    pub fn change_notifications(&self) -> usize {
        self.change_notifications
    }

    /// Whether [`focus`](EditableSurface::focus) was called.
    pub fn is_focused(&self) -> bool {
        self.focused
    }

    /// Undo the most recent edit. Returns `false` if there is nothing to undo.
    pub fn undo(&mut self) -> bool {
        let Some(entry) = self.undo_stack.pop() else {
            return false;
        };

        let inverse = TextDeltaEdit {
            start: entry.edit.start,
            deleted_text: entry.edit.inserted_text.clone(),
            inserted_text: entry.edit.deleted_text.clone(),
        };
        self.text = inverse.apply_to(&self.text);
        self.selection = entry.selection_before;
        self.redo_stack.push(entry);
        true
    }

    /// Redo the most recently undone edit. Returns `false` if there is nothing to redo.
    pub fn redo(&mut self) -> bool {
        let Some(entry) = self.redo_stack.pop() else {
            return false;
        };

        self.text = entry.edit.apply_to(&self.text);
        self.selection = Selection::caret(entry.edit.start + entry.edit.inserted_len());
        self.undo_stack.push(entry);
        true
    }
}

impl Default for MemorySurface {
    fn default() -> Self {
        Self::new(String::new())
    }
}

impl EditableSurface for MemorySurface {
    fn text(&self) -> Cow<'_, str> {
        Cow::Borrowed(&self.text)
    }

    fn selection(&self) -> Selection {
        self.selection
    }

    fn select_range(&mut self, start: usize, end: usize) {
        self.selection = Selection::new(start, end).clamped(char_len(&self.text));
    }

    fn insert_at_selection(&mut self, text: &str) -> Result<(), SurfaceError> {
        if !self.incremental {
            return Err(SurfaceError::Unsupported);
        }

        let selection_before = self.selection;
        let edit = TextDeltaEdit {
            start: selection_before.start,
            deleted_text: char_slice(&self.text, selection_before.start, selection_before.end)
                .to_string(),
            inserted_text: text.to_string(),
        };

        self.text = edit.apply_to(&self.text);
        self.selection = Selection::caret(edit.start + edit.inserted_len());
        self.undo_stack.push(UndoEntry {
            edit,
            selection_before,
        });
        self.redo_stack.clear();
        Ok(())
    }

    fn replace_value(&mut self, text: &str) {
        self.text = text.to_string();
        self.selection = Selection::caret(char_len(&self.text));
        self.undo_stack.clear();
        self.redo_stack.clear();
    }

    fn focus(&mut self) {
        self.focused = true;
    }

    fn notify_changed(&mut self) {
        self.change_notifications += 1;
    }

    fn scroll(&self) -> ScrollOffsets {
        self.scroll
    }

    fn set_scroll(&mut self, offsets: ScrollOffsets) {
        self.scroll = offsets;
    }
}
