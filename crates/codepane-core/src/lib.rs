#![warn(missing_docs)]
//! codepane-core - headless text engine for overlay code editors
//!
//! # Overview
//!
//! An overlay editor is a plain editable text surface (for example a `<textarea>`) with a
//! syntax-highlighted copy of the same text rendered underneath it, plus a line-number gutter.
//! This crate holds the parts of such an editor that are pure text arithmetic:
//!
//! - [`position`] - char offset → 1-based line/column
//! - [`indent`] - selection-aware indent/outdent producing an [`EditResult`]
//! - [`diff`] - minimal prefix/suffix-trimmed replacement, applied through the host's native
//!   insert primitive so undo history survives
//! - [`lines`] / [`scroll`] - gutter numbers, overlay scroll sync, overflow flag
//! - [`schedule`] - single-slot deferred recompute
//! - [`surface`] / [`io`] - the host capabilities the engines drive
//!
//! All offsets are character offsets (Unicode scalar values).
//!
//! # Quick Start
//!
//! ```rust
//! use codepane_core::{EditableSurface, MemorySurface, MinimalDiffApplier, Selection, apply_tab};
//!
//! let mut surface = MemorySurface::new("ab\ncd");
//! surface.select_range(0, 5);
//!
//! let result = apply_tab(&surface.text(), surface.selection(), false);
//! MinimalDiffApplier::new().apply(&mut surface, &result.text, result.selection());
//!
//! assert_eq!(surface.text(), "  ab\n  cd");
//! assert_eq!(surface.selection(), Selection::new(0, 9));
//! assert_eq!(surface.undo_depth(), 1);
//! ```

pub mod delta;
pub mod diff;
mod edit;
pub mod indent;
pub mod io;
pub mod lines;
pub mod position;
pub mod schedule;
pub mod scroll;
pub mod surface;
mod text;

pub use delta::{TextDelta, TextDeltaEdit};
pub use diff::{ApplyOutcome, MinimalDiffApplier, minimal_replacement};
pub use edit::{EditResult, Selection};
pub use indent::{INDENT_TOKEN, apply_tab};
pub use io::{DocumentIo, FileFilter, LoadRequest, LoadedDocument, SaveOutcome, SaveRequest};
pub use lines::{content_columns, display_text, line_count, line_numbers};
pub use position::{CursorPosition, locate, offset_of};
pub use schedule::{PendingRecompute, RecomputeSlot};
pub use scroll::{OverflowState, ScrollOffsets, ScrollSync, ScrollUpdate};
pub use surface::{EditableSurface, MemorySurface, SurfaceError};
