use crate::error::WidgetError;
use crate::events::{WidgetCallback, WidgetChange, WidgetEvent};
use crate::options::{EditorOptions, TabCapture};
use codepane_core::{
    CursorPosition, DocumentIo, EditableSurface, FileFilter, LoadRequest, LoadedDocument,
    MinimalDiffApplier, OverflowState, RecomputeSlot, SaveOutcome, SaveRequest, ScrollSync,
    ScrollUpdate, Selection, TextDelta, apply_tab, content_columns, display_text, line_numbers, locate,
};
use codepane_highlight::{
    GrammarRegistry, HighlightOptions, HighlightPipeline, HighlightedCode,
};
use codepane_lang::{FileType, accept_attribute_for, file_type_for, suggested_filename};
use std::sync::Arc;

/// What the host should do with the Tab key event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyOutcome {
    /// The widget consumed the key; suppress the default action.
    Handled,
    /// Let the key through (focus navigation).
    PassThrough,
}

#[derive(Debug, Default)]
struct SaveState {
    pending: Option<SaveRequest>,
    handled: bool,
}

/// An overlay code editor over a host-provided input surface.
///
/// The surface owns the text, the selection and the undo stack. The widget
/// keeps what is drawn on top of it: highlighted markup, the line-number
/// gutter, the caret position for the status bar and scroll offsets.
///
/// Edits made by the widget go through [`MinimalDiffApplier`], so each one is a
/// single native undo step. Highlighting after a keystroke is deferred: the host
/// calls [`run_pending`](Self::run_pending) on its next tick, and a burst of
/// keystrokes costs one recompute.
///
/// # Example
///
/// ```rust
/// use codepane_core::{EditableSurface, MemorySurface};
/// use codepane_widget::{EditorOptions, EditorWidget};
///
/// let mut surface = MemorySurface::new("a\nb");
/// surface.select_range(0, 3);
/// let mut widget = EditorWidget::with_builtin(surface, EditorOptions::default()).unwrap();
///
/// widget.handle_tab(false);
/// assert_eq!(widget.text(), "  a\n  b");
/// assert!(widget.run_pending());
/// assert_eq!(widget.line_numbers(), &[1, 2]);
/// ```
pub struct EditorWidget<S: EditableSurface> {
    surface: S,
    pipeline: HighlightPipeline,
    options: EditorOptions,
    language: String,
    line_numbers_override: Option<bool>,
    cursor: CursorPosition,
    highlighted: HighlightedCode,
    line_numbers: Vec<usize>,
    recompute: RecomputeSlot,
    scroll: ScrollSync,
    overflow: OverflowState,
    visible_columns: Option<usize>,
    save: SaveState,
    applier: MinimalDiffApplier,
    version: u64,
    callbacks: Vec<WidgetCallback>,
}

impl<S: EditableSurface> EditorWidget<S> {
    /// Create a widget highlighting with `registry`.
    pub fn new(surface: S, registry: Arc<GrammarRegistry>, options: EditorOptions) -> Self {
        let pipeline = HighlightPipeline::with_options(
            registry,
            HighlightOptions {
                class_prefix: options.class_prefix.clone(),
            },
        );
        let mut widget = Self {
            surface,
            pipeline,
            language: options.language.clone(),
            options,
            line_numbers_override: None,
            cursor: CursorPosition::default(),
            highlighted: HighlightedCode {
                html: String::new(),
                language: String::new(),
                valid: true,
            },
            line_numbers: vec![1],
            recompute: RecomputeSlot::new(),
            scroll: ScrollSync::new(),
            overflow: OverflowState::new(),
            visible_columns: None,
            save: SaveState::default(),
            applier: MinimalDiffApplier::new(),
            version: 0,
            callbacks: Vec::new(),
        };
        widget.refresh_view();
        widget.cursor = widget.locate_caret();
        widget
    }

    /// Create a widget over the bundled grammars.
    pub fn with_builtin(surface: S, options: EditorOptions) -> Result<Self, WidgetError> {
        let registry = GrammarRegistry::with_builtin()?;
        Ok(Self::new(surface, Arc::new(registry), options))
    }

    /// The input surface.
    pub fn surface(&self) -> &S {
        &self.surface
    }

    /// Mutable access to the input surface, for host-side edits.
    ///
    /// Call [`on_input`](Self::on_input) afterwards when the text changed.
    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    /// Consume the widget and return the surface.
    pub fn into_surface(self) -> S {
        self.surface
    }

    /// Current options.
    pub fn options(&self) -> &EditorOptions {
        &self.options
    }

    /// Current document text.
    pub fn text(&self) -> String {
        self.surface.text().into_owned()
    }

    /// Replace the document from the host side.
    ///
    /// This is a binding update, not a user edit: it does not go through the
    /// undo stack and emits no [`WidgetEvent::CodeChanged`].
    pub fn set_code(&mut self, text: &str) {
        if self.surface.text() == text {
            return;
        }
        self.surface.replace_value(text);
        self.recompute.cancel();
        self.refresh_view();
        self.update_cursor();
    }

    /// Handle a Tab (`shift == false`) or Shift+Tab key press.
    pub fn handle_tab(&mut self, shift: bool) -> KeyOutcome {
        let selection = self.surface.selection();
        if self.options.tab_capture == TabCapture::SelectionOnly && selection.is_caret() {
            return KeyOutcome::PassThrough;
        }

        let current = self.surface.text().into_owned();
        let result = apply_tab(&current, selection, shift);
        let outcome = self
            .applier
            .apply(&mut self.surface, &result.text, result.selection());
        match outcome.into_delta() {
            Some(delta) => {
                log::debug!(
                    "{} applied to {}..{}",
                    if shift { "outdent" } else { "indent" },
                    selection.start,
                    selection.end
                );
                self.text_changed(Some(Arc::new(delta)));
            }
            None => self.update_cursor(),
        }
        KeyOutcome::Handled
    }

    /// React to a text change on the input surface.
    pub fn on_input(&mut self) {
        self.text_changed(None);
    }

    fn text_changed(&mut self, delta: Option<Arc<TextDelta>>) {
        let text = self.text();
        self.emit_with_delta(WidgetEvent::CodeChanged(text), delta);
        self.update_cursor();
        self.recompute.schedule();
    }

    /// React to caret movement (click, arrow keys, selection changes).
    pub fn on_cursor_move(&mut self) {
        self.update_cursor();
    }

    /// Caret position for the status bar.
    pub fn cursor(&self) -> CursorPosition {
        self.cursor
    }

    /// Run the deferred highlight recompute, if one is pending.
    ///
    /// Reads the text as it is now, not as it was when the recompute was
    /// scheduled. Returns `true` if the view was refreshed.
    pub fn run_pending(&mut self) -> bool {
        match self.recompute.take() {
            Some(request) => {
                log::trace!("running recompute {}", request.generation);
                self.refresh_view();
                true
            }
            None => false,
        }
    }

    /// Whether a highlight recompute is waiting for [`run_pending`](Self::run_pending).
    pub fn has_pending_refresh(&self) -> bool {
        self.recompute.is_pending()
    }

    /// Recompute the highlighted overlay and the gutter now.
    pub fn refresh_view(&mut self) {
        let text = self.text();
        let display = display_text(&text);
        let highlighted = self.pipeline.highlight(&display, &self.language);
        self.line_numbers = line_numbers(&display);
        let event = WidgetEvent::HighlightUpdated {
            language: highlighted.language.clone(),
            valid: highlighted.valid,
        };
        self.highlighted = highlighted;
        self.emit(event);
        self.measure_cells();
    }

    /// Markup for the overlay.
    pub fn highlighted(&self) -> &HighlightedCode {
        &self.highlighted
    }

    /// Gutter line numbers.
    pub fn line_numbers(&self) -> &[usize] {
        &self.line_numbers
    }

    /// Placeholder text from the options.
    pub fn placeholder(&self) -> &str {
        &self.options.placeholder
    }

    /// Whether the placeholder should be shown.
    pub fn shows_placeholder(&self) -> bool {
        self.surface.text().is_empty()
    }

    /// Active language id, as requested.
    pub fn language(&self) -> &str {
        &self.language
    }

    /// Switch language and re-highlight immediately.
    pub fn set_language(&mut self, language: &str) {
        if self.language == language {
            return;
        }
        self.language = language.to_string();
        self.emit(WidgetEvent::LanguageChanged(self.language.clone()));
        self.recompute.cancel();
        self.refresh_view();
    }

    /// Whether the gutter is visible (user toggle first, then the option).
    pub fn show_line_numbers(&self) -> bool {
        self.line_numbers_override
            .unwrap_or(self.options.show_line_numbers)
    }

    /// Set the gutter option from the host. Clears any user toggle.
    pub fn set_show_line_numbers(&mut self, show: bool) {
        self.options.show_line_numbers = show;
        self.line_numbers_override = None;
    }

    /// Flip gutter visibility as a user action. Returns the new state.
    pub fn toggle_line_numbers(&mut self) -> bool {
        let show = !self.show_line_numbers();
        self.line_numbers_override = Some(show);
        self.emit(WidgetEvent::LineNumbersToggled(show));
        show
    }

    /// Record a scroll of the input surface; propagated on the next frame.
    pub fn on_scroll(&mut self) {
        self.scroll.on_scroll(self.surface.scroll());
    }

    /// Animation frame tick. Returns offsets for the overlay and the gutter.
    pub fn on_frame(&mut self) -> Option<ScrollUpdate> {
        self.scroll.on_frame(self.show_line_numbers())
    }

    /// Report measured widths after layout. Returns `true` if the overflow flag flipped.
    ///
    /// Stops any cell-based measuring started by [`on_cell_layout`](Self::on_cell_layout).
    pub fn on_layout(&mut self, content_width: f64, visible_width: f64) -> bool {
        self.visible_columns = None;
        self.update_overflow(content_width, visible_width)
    }

    /// Report the visible width of a cell-based host (terminal columns).
    ///
    /// The content width is measured from the text here and again after every
    /// view refresh. Returns `true` if the overflow flag flipped.
    pub fn on_cell_layout(&mut self, visible_columns: usize) -> bool {
        self.visible_columns = Some(visible_columns);
        self.measure_cells()
    }

    fn measure_cells(&mut self) -> bool {
        let Some(visible) = self.visible_columns else {
            return false;
        };
        let content = content_columns(&self.surface.text());
        self.update_overflow(content as f64, visible as f64)
    }

    fn update_overflow(&mut self, content_width: f64, visible_width: f64) -> bool {
        let changed = self.overflow.update(content_width, visible_width);
        if changed {
            self.emit(WidgetEvent::OverflowChanged(self.overflow.is_overflowing()));
        }
        changed
    }

    /// Whether the content is wider than the visible area.
    pub fn is_overflowing(&self) -> bool {
        self.overflow.is_overflowing()
    }

    /// Dialog parameters for loading a document in the current language.
    pub fn load_request(&self) -> LoadRequest {
        LoadRequest {
            filters: vec![file_filter(file_type_for(&self.language))],
            accept: accept_attribute_for(&self.language),
        }
    }

    /// Put a loaded document into the surface as one undoable edit.
    pub fn apply_loaded_document(&mut self, document: LoadedDocument) {
        let delta = if self.surface.text() != document.content.as_str() {
            self.applier
                .apply(&mut self.surface, &document.content, Selection::caret(0))
                .into_delta()
                .map(Arc::new)
        } else {
            None
        };
        log::info!(
            "loaded '{}' ({} chars)",
            document.name,
            document.content.chars().count()
        );
        self.emit(WidgetEvent::FileLoaded {
            name: document.name,
        });
        if delta.is_some() {
            let text = self.text();
            self.emit_with_delta(WidgetEvent::CodeChanged(text), delta);
        }
        self.recompute.cancel();
        self.refresh_view();
        self.update_cursor();
    }

    /// Ask the host for a document and load it.
    ///
    /// Returns the file name, or `None` when the user dismissed the dialog.
    pub fn load_with<D: DocumentIo>(&mut self, io: &mut D) -> Result<Option<String>, WidgetError> {
        match io.load(&self.load_request()) {
            Ok(Some(document)) => {
                let name = document.name.clone();
                self.apply_loaded_document(document);
                Ok(Some(name))
            }
            Ok(None) => {
                log::debug!("load dialog dismissed");
                Ok(None)
            }
            Err(err) => {
                log::warn!("document load failed: {err}");
                Err(WidgetError::Load(err.to_string()))
            }
        }
    }

    /// Start a save: notify subscribers and remember the request.
    ///
    /// Subscribers that save the content themselves call
    /// [`mark_save_handled`](Self::mark_save_handled) before
    /// [`complete_save`](Self::complete_save) runs.
    pub fn request_save(&mut self) -> SaveRequest {
        let file_type = file_type_for(&self.language);
        let request = SaveRequest {
            content: self.text(),
            language: self.language.clone(),
            suggested_name: suggested_filename(
                &self.language,
                self.options.default_filename.as_deref(),
            ),
            filters: vec![file_filter(file_type)],
        };
        self.save = SaveState {
            pending: Some(request.clone()),
            handled: false,
        };
        self.emit(WidgetEvent::SaveRequested(request.clone()));
        request
    }

    /// Record that a subscriber saved the pending request itself.
    pub fn mark_save_handled(&mut self) {
        self.save.handled = true;
    }

    /// Finish the pending save.
    ///
    /// Falls back to `io` only when no subscriber handled the request. Returns
    /// `None` when there was nothing to do.
    pub fn complete_save<D: DocumentIo>(
        &mut self,
        io: &mut D,
    ) -> Result<Option<SaveOutcome>, WidgetError> {
        let Some(request) = self.save.pending.take() else {
            return Ok(None);
        };
        if self.save.handled {
            log::debug!("save handled by a subscriber");
            return Ok(None);
        }

        match io.save(&request) {
            Ok(SaveOutcome::Saved { name }) => {
                log::info!("saved '{name}'");
                self.emit(WidgetEvent::FileSaved { name: name.clone() });
                Ok(Some(SaveOutcome::Saved { name }))
            }
            Ok(SaveOutcome::Cancelled) => {
                log::debug!("save dialog dismissed");
                Ok(Some(SaveOutcome::Cancelled))
            }
            Err(err) => {
                log::warn!("document save failed: {err}");
                Err(WidgetError::Save(err.to_string()))
            }
        }
    }

    /// Subscribe to widget changes.
    pub fn subscribe<F>(&mut self, callback: F)
    where
        F: FnMut(&WidgetChange) + Send + 'static,
    {
        self.callbacks.push(Box::new(callback));
    }

    /// Number of changes reported so far.
    pub fn version(&self) -> u64 {
        self.version
    }

    fn emit(&mut self, event: WidgetEvent) {
        self.emit_with_delta(event, None);
    }

    fn emit_with_delta(&mut self, event: WidgetEvent, delta: Option<Arc<TextDelta>>) {
        let old_version = self.version;
        self.version += 1;
        let mut change = WidgetChange::new(event, old_version, self.version);
        if let Some(delta) = delta {
            change = change.with_text_delta(delta);
        }
        for callback in &mut self.callbacks {
            callback(&change);
        }
    }

    fn locate_caret(&self) -> CursorPosition {
        locate(&self.surface.text(), self.surface.selection().start)
    }

    fn update_cursor(&mut self) {
        let cursor = self.locate_caret();
        if cursor != self.cursor {
            self.cursor = cursor;
            self.emit(WidgetEvent::CursorMoved(cursor));
        }
    }
}

fn file_filter(file_type: FileType) -> FileFilter {
    FileFilter {
        description: file_type.description,
        mime: file_type.mime.to_string(),
        extensions: file_type.extensions.iter().map(|e| e.to_string()).collect(),
    }
}
