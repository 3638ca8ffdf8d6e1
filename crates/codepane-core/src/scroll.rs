//! Scroll synchronization between the input surface, the highlighted overlay and the gutter.
//!
//! The host reports every scroll of the input surface through [`ScrollSync::on_scroll`] and calls
//! [`ScrollSync::on_frame`] once per animation frame. Several scroll events inside one frame
//! collapse into the latest offsets.

/// Scroll offsets in host units (usually CSS pixels).
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ScrollOffsets {
    /// Vertical offset.
    pub top: f64,
    /// Horizontal offset.
    pub left: f64,
}

impl ScrollOffsets {
    /// Create new offsets.
    pub fn new(top: f64, left: f64) -> Self {
        Self { top, left }
    }
}

/// Offsets to apply to the dependent surfaces for one frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScrollUpdate {
    /// Offsets for the highlighted overlay (both axes).
    pub display: ScrollOffsets,
    /// Vertical offset for the line-number gutter, `None` while the gutter is hidden.
    pub gutter_top: Option<f64>,
}

/// Frame-aligned scroll propagation.
#[derive(Debug, Clone, Default)]
pub struct ScrollSync {
    pending: Option<ScrollOffsets>,
    applied: ScrollOffsets,
}

impl ScrollSync {
    /// Create a scroll synchronizer with everything at the origin.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the input surface's offsets after a scroll event.
    pub fn on_scroll(&mut self, source: ScrollOffsets) {
        self.pending = Some(source);
    }

    /// Returns `true` if a scroll is waiting for the next frame.
    pub fn has_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Consume the pending scroll, if any, and produce the offsets for the dependent surfaces.
    pub fn on_frame(&mut self, gutter_visible: bool) -> Option<ScrollUpdate> {
        let source = self.pending.take()?;
        self.applied = source;
        Some(ScrollUpdate {
            display: source,
            gutter_top: gutter_visible.then_some(source.top),
        })
    }

    /// Offsets most recently propagated.
    pub fn applied(&self) -> ScrollOffsets {
        self.applied
    }
}

/// Presentation-only horizontal overflow flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct OverflowState {
    overflowing: bool,
}

impl OverflowState {
    /// Create a non-overflowing state.
    pub fn new() -> Self {
        Self::default()
    }

    /// Compare content width to visible width. Returns `true` if the flag flipped.
    pub fn update(&mut self, content_width: f64, visible_width: f64) -> bool {
        let overflowing = content_width > visible_width;
        let changed = overflowing != self.overflowing;
        self.overflowing = overflowing;
        changed
    }

    /// Whether the content is wider than the visible area.
    pub fn is_overflowing(&self) -> bool {
        self.overflowing
    }
}
