#![warn(missing_docs)]
//! `codepane-widget` - an overlay code editor composed from `codepane-core`,
//! `codepane-highlight` and `codepane-lang`.
//!
//! The host supplies an [`EditableSurface`](codepane_core::EditableSurface)
//! (the native text input, with its own undo stack) and forwards key, input,
//! scroll and layout events to [`EditorWidget`]. The widget answers with
//! highlighted markup, gutter numbers, caret position and scroll offsets, and
//! reports changes to subscribers as [`WidgetChange`] records.

mod error;
mod events;
mod options;
mod widget;

pub use error::WidgetError;
pub use events::{WidgetCallback, WidgetChange, WidgetEvent};
pub use options::{EditorOptions, TabCapture};
pub use widget::{EditorWidget, KeyOutcome};
