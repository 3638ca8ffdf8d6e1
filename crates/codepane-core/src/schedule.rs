//! Deferred recompute after edits.
//!
//! Highlighting is not recomputed inside the keystroke handler. The handler calls
//! [`RecomputeSlot::schedule`]; the host's next tick calls [`RecomputeSlot::take`] and, if a
//! request is pending, recomputes from the text as it is *then*. A newer request replaces an older
//! one, so a burst of keystrokes costs one recompute.

/// A scheduled recompute request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PendingRecompute {
    /// Generation of the request; strictly increasing per slot.
    pub generation: u64,
}

/// Single-slot pending-task register.
#[derive(Debug, Clone, Default)]
pub struct RecomputeSlot {
    generation: u64,
    pending: Option<PendingRecompute>,
}

impl RecomputeSlot {
    /// Create an empty slot.
    pub fn new() -> Self {
        Self::default()
    }

    /// Schedule a recompute, superseding any pending one.
    pub fn schedule(&mut self) -> PendingRecompute {
        self.generation += 1;
        let request = PendingRecompute {
            generation: self.generation,
        };
        if let Some(previous) = self.pending.replace(request) {
            log::trace!(
                "recompute {} superseded by {}",
                previous.generation,
                request.generation
            );
        }
        request
    }

    /// Take the pending request, leaving the slot empty.
    pub fn take(&mut self) -> Option<PendingRecompute> {
        self.pending.take()
    }

    /// Drop a pending request without running it.
    pub fn cancel(&mut self) {
        self.pending = None;
    }

    /// Returns `true` if a recompute is waiting.
    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Run `task` if a recompute is pending. Returns its result.
    pub fn run_pending<T>(&mut self, task: impl FnOnce(PendingRecompute) -> T) -> Option<T> {
        self.take().map(task)
    }
}
