use codepane_core::{CursorPosition, SaveRequest, TextDelta};
use std::sync::Arc;

/// Something the widget reports to its subscribers.
#[derive(Debug, Clone, PartialEq)]
pub enum WidgetEvent {
    /// The document text changed through the widget or the input surface.
    CodeChanged(String),
    /// The caret moved to a new line or column.
    CursorMoved(CursorPosition),
    /// The highlighted overlay was recomputed.
    HighlightUpdated {
        /// Grammar that produced the markup (or the requested id).
        language: String,
        /// Whether highlighting succeeded.
        valid: bool,
    },
    /// The language id changed.
    LanguageChanged(String),
    /// The user toggled the gutter.
    LineNumbersToggled(bool),
    /// The horizontal overflow flag flipped.
    OverflowChanged(bool),
    /// A document was loaded into the surface.
    FileLoaded {
        /// File name reported by the host.
        name: String,
    },
    /// The user asked to save. Subscribers that save it themselves should
    /// call [`EditorWidget::mark_save_handled`](crate::EditorWidget::mark_save_handled).
    SaveRequested(SaveRequest),
    /// The fallback save completed.
    FileSaved {
        /// Final file name.
        name: String,
    },
}

/// Change record passed to subscribers.
#[derive(Debug, Clone, PartialEq)]
pub struct WidgetChange {
    /// What happened.
    pub event: WidgetEvent,
    /// Version before the change.
    pub old_version: u64,
    /// Version after the change.
    pub new_version: u64,
    /// The replaced span, when the widget made the edit itself.
    pub text_delta: Option<Arc<TextDelta>>,
}

impl WidgetChange {
    /// Create a change record without a text delta.
    pub fn new(event: WidgetEvent, old_version: u64, new_version: u64) -> Self {
        Self {
            event,
            old_version,
            new_version,
            text_delta: None,
        }
    }

    /// Attach the structured delta of a text change.
    pub fn with_text_delta(mut self, delta: Arc<TextDelta>) -> Self {
        self.text_delta = Some(delta);
        self
    }
}

/// Subscriber callback type.
pub type WidgetCallback = Box<dyn FnMut(&WidgetChange) + Send>;
