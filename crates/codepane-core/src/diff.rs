//! Undo-preserving programmatic edits.
//!
//! Overwriting a host surface's whole value collapses (or clears) its undo history. Instead we
//! trim the common prefix and suffix of the old and new text, select only the span in between and
//! replace it with a native insert, which the host records as one ordinary edit.

use crate::delta::{TextDelta, TextDeltaEdit};
use crate::edit::Selection;
use crate::surface::{EditableSurface, SurfaceError};
use crate::text::char_len;

/// Compute the smallest contiguous replacement turning `current` into `target`.
///
/// The common prefix `P` and common suffix `S` never overlap (`P + S <= min(len)`). Returns
/// `None` when the texts are equal.
pub fn minimal_replacement(current: &str, target: &str) -> Option<TextDeltaEdit> {
    if current == target {
        return None;
    }

    let current: Vec<char> = current.chars().collect();
    let target: Vec<char> = target.chars().collect();

    let prefix = current
        .iter()
        .zip(&target)
        .take_while(|(a, b)| a == b)
        .count();
    let suffix = current[prefix..]
        .iter()
        .rev()
        .zip(target[prefix..].iter().rev())
        .take_while(|(a, b)| a == b)
        .count();

    Some(TextDeltaEdit {
        start: prefix,
        deleted_text: current[prefix..current.len() - suffix].iter().collect(),
        inserted_text: target[prefix..target.len() - suffix].iter().collect(),
    })
}

/// What [`MinimalDiffApplier::apply`] did to the surface.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApplyOutcome {
    /// Text already matched; only the selection was restored.
    Unchanged,
    /// The minimal span was replaced through the native insert primitive.
    Incremental(TextDelta),
    /// The surface could not insert incrementally; the whole value was replaced.
    Replaced(TextDelta),
}

impl ApplyOutcome {
    /// The delta that was applied, if any.
    pub fn delta(&self) -> Option<&TextDelta> {
        match self {
            ApplyOutcome::Unchanged => None,
            ApplyOutcome::Incremental(delta) | ApplyOutcome::Replaced(delta) => Some(delta),
        }
    }

    /// Consume the outcome, keeping the applied delta.
    pub fn into_delta(self) -> Option<TextDelta> {
        match self {
            ApplyOutcome::Unchanged => None,
            ApplyOutcome::Incremental(delta) | ApplyOutcome::Replaced(delta) => Some(delta),
        }
    }

    /// Returns `true` if the text changed.
    pub fn changed(&self) -> bool {
        !matches!(self, ApplyOutcome::Unchanged)
    }
}

/// Applies target text to an [`EditableSurface`] without wiping its undo history.
#[derive(Debug, Clone, Copy, Default)]
pub struct MinimalDiffApplier;

impl MinimalDiffApplier {
    /// Create an applier.
    pub fn new() -> Self {
        Self
    }

    /// Make the surface hold `target`, then restore `desired` as the selection.
    ///
    /// The surface is always notified of a change afterwards, even if the text was already equal.
    pub fn apply<S>(&self, surface: &mut S, target: &str, desired: Selection) -> ApplyOutcome
    where
        S: EditableSurface + ?Sized,
    {
        surface.focus();

        let current = surface.text().into_owned();
        let outcome = match minimal_replacement(&current, target) {
            None => ApplyOutcome::Unchanged,
            Some(edit) => {
                let delta = TextDelta::single(char_len(&current), edit.clone());
                surface.select_range(edit.start, edit.end());
                match surface.insert_at_selection(&edit.inserted_text) {
                    Ok(()) => ApplyOutcome::Incremental(delta),
                    Err(SurfaceError::Unsupported) => {
                        log::debug!("surface has no incremental insert; replacing whole value");
                        surface.replace_value(target);
                        ApplyOutcome::Replaced(delta)
                    }
                    Err(err) => {
                        log::warn!("incremental edit failed ({err}); replacing whole value");
                        surface.replace_value(target);
                        ApplyOutcome::Replaced(delta)
                    }
                }
            }
        };

        let desired = desired.clamped(char_len(target));
        surface.select_range(desired.start, desired.end);
        surface.notify_changed();
        outcome
    }
}
