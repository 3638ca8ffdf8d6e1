use codepane_core::{
    CursorPosition, DocumentIo, EditableSurface, LoadRequest, LoadedDocument, MemorySurface,
    SaveOutcome, SaveRequest, ScrollOffsets, ScrollUpdate, Selection,
};
use codepane_highlight::markup_to_text;
use codepane_widget::{
    EditorOptions, EditorWidget, KeyOutcome, TabCapture, WidgetChange, WidgetError, WidgetEvent,
};
use pretty_assertions::assert_eq;
use std::sync::{Arc, Mutex};

fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn widget_with(text: &str, options: EditorOptions) -> EditorWidget<MemorySurface> {
    init_logging();
    EditorWidget::with_builtin(MemorySurface::new(text), options).expect("bundled grammars")
}

fn widget(text: &str) -> EditorWidget<MemorySurface> {
    widget_with(text, EditorOptions::default())
}

fn record(widget: &mut EditorWidget<MemorySurface>) -> Arc<Mutex<Vec<WidgetChange>>> {
    let changes = Arc::new(Mutex::new(Vec::new()));
    let sink = changes.clone();
    widget.subscribe(move |change| sink.lock().unwrap().push(change.clone()));
    changes
}

fn events(changes: &Arc<Mutex<Vec<WidgetChange>>>) -> Vec<WidgetEvent> {
    changes
        .lock()
        .unwrap()
        .iter()
        .map(|c| c.event.clone())
        .collect()
}

#[derive(Debug, thiserror::Error)]
#[error("disk unavailable")]
struct DiskError;

#[derive(Default)]
struct FakeIo {
    document: Option<LoadedDocument>,
    fail: bool,
    cancel_save: bool,
    loads: Vec<LoadRequest>,
    saves: Vec<SaveRequest>,
}

impl DocumentIo for FakeIo {
    type Error = DiskError;

    fn load(&mut self, request: &LoadRequest) -> Result<Option<LoadedDocument>, DiskError> {
        self.loads.push(request.clone());
        if self.fail {
            return Err(DiskError);
        }
        Ok(self.document.take())
    }

    fn save(&mut self, request: &SaveRequest) -> Result<SaveOutcome, DiskError> {
        self.saves.push(request.clone());
        if self.fail {
            return Err(DiskError);
        }
        if self.cancel_save {
            return Ok(SaveOutcome::Cancelled);
        }
        Ok(SaveOutcome::Saved {
            name: request.suggested_name.clone(),
        })
    }
}

#[test]
fn tab_indents_selection_as_one_undo_step() {
    let mut w = widget("ab\ncd");
    let changes = record(&mut w);
    w.surface_mut().select_range(0, 5);

    assert_eq!(w.handle_tab(false), KeyOutcome::Handled);
    assert_eq!(w.text(), "  ab\n  cd");
    assert_eq!(w.surface().selection(), Selection::new(0, 9));
    assert_eq!(w.surface().undo_depth(), 1);
    assert!(w.has_pending_refresh());
    assert_eq!(
        events(&changes),
        vec![WidgetEvent::CodeChanged("  ab\n  cd".to_string())]
    );

    assert!(w.surface_mut().undo());
    assert_eq!(w.text(), "ab\ncd");
}

#[test]
fn widget_edits_carry_their_delta() {
    let mut w = widget("ab\ncd");
    let changes = record(&mut w);
    w.surface_mut().select_range(0, 5);
    w.handle_tab(false);
    w.on_input();

    let changes = changes.lock().unwrap();
    assert_eq!(changes.len(), 2);
    let delta = changes[0].text_delta.as_deref().expect("tab edit has a delta");
    assert_eq!(delta.before_char_count, 5);
    assert_eq!(delta.after_char_count, 9);
    assert_eq!(delta.edits[0].start, 0);
    assert_eq!(delta.apply_to("ab\ncd"), "  ab\n  cd");

    assert_eq!(
        changes[1].event,
        WidgetEvent::CodeChanged("  ab\n  cd".to_string())
    );
    assert_eq!(changes[1].text_delta, None);
}

#[test]
fn caret_tab_inserts_indent_and_moves_cursor() {
    let mut w = widget("x");
    let changes = record(&mut w);

    assert_eq!(w.handle_tab(false), KeyOutcome::Handled);
    assert_eq!(w.text(), "  x");
    assert_eq!(w.cursor(), CursorPosition::new(1, 3));
    assert!(events(&changes).contains(&WidgetEvent::CursorMoved(CursorPosition::new(1, 3))));
}

#[test]
fn selection_only_policy_lets_caret_tab_through() {
    let options = EditorOptions {
        tab_capture: TabCapture::SelectionOnly,
        ..EditorOptions::default()
    };
    let mut w = widget_with("x", options);

    assert_eq!(w.handle_tab(false), KeyOutcome::PassThrough);
    assert_eq!(w.text(), "x");
    assert!(!w.has_pending_refresh());

    w.surface_mut().select_range(0, 1);
    assert_eq!(w.handle_tab(false), KeyOutcome::Handled);
    assert_eq!(w.text(), "  x");
}

#[test]
fn shift_tab_on_unindented_line_changes_nothing() {
    let mut w = widget("abc");
    let changes = record(&mut w);

    assert_eq!(w.handle_tab(true), KeyOutcome::Handled);
    assert_eq!(w.text(), "abc");
    assert_eq!(w.cursor(), CursorPosition::new(1, 1));
    assert_eq!(w.surface().undo_depth(), 0);
    assert!(events(&changes).is_empty());
    assert!(!w.has_pending_refresh());
}

#[test]
fn rapid_input_coalesces_into_one_refresh() {
    let options = EditorOptions {
        language: "plaintext".to_string(),
        ..EditorOptions::default()
    };
    let mut w = widget_with("", options);
    for _ in 0..3 {
        w.surface_mut().insert_at_selection("a").unwrap();
        w.on_input();
    }

    assert_eq!(markup_to_text(&w.highlighted().html), "");
    assert!(w.run_pending());
    assert!(!w.run_pending());
    assert_eq!(w.highlighted().html, "aaa");
    assert_eq!(w.cursor(), CursorPosition::new(1, 4));
}

#[test]
fn trailing_newline_is_padded_in_overlay() {
    let mut w = widget("");
    let changes = record(&mut w);
    w.set_code("let x\n");

    let highlighted = w.highlighted();
    assert!(highlighted.valid);
    assert_eq!(highlighted.language, "javascript");
    assert!(highlighted.html.ends_with("\n "));
    assert_eq!(markup_to_text(&highlighted.html), "let x\n ");
    assert_eq!(w.line_numbers(), &[1, 2]);
    assert!(events(&changes).contains(&WidgetEvent::HighlightUpdated {
        language: "javascript".to_string(),
        valid: true,
    }));
}

#[test]
fn empty_document_shows_placeholder_and_one_line() {
    let w = widget("");
    assert!(w.shows_placeholder());
    assert_eq!(w.placeholder(), "Enter your code here...");
    assert_eq!(w.line_numbers(), &[1]);
    assert_eq!(w.highlighted().html, "");
    assert!(w.highlighted().valid);
}

#[test]
fn unknown_language_falls_back_to_detection() {
    let mut w = widget("def greet(name):\n    return None");
    w.set_language("snake-ish");
    assert_eq!(w.language(), "snake-ish");
    assert_eq!(w.highlighted().language, "python");
}

#[test]
fn user_toggle_overrides_option_until_host_resets_it() {
    let mut w = widget("a");
    let changes = record(&mut w);

    assert!(w.show_line_numbers());
    assert!(!w.toggle_line_numbers());
    assert!(!w.show_line_numbers());
    assert_eq!(events(&changes), vec![WidgetEvent::LineNumbersToggled(false)]);

    w.set_show_line_numbers(true);
    assert!(w.show_line_numbers());
    assert!(!w.toggle_line_numbers());
}

#[test]
fn scroll_events_coalesce_per_frame() {
    let mut w = widget("a\nb\nc");
    w.surface_mut().set_scroll(ScrollOffsets::new(10.0, 0.0));
    w.on_scroll();
    w.surface_mut().set_scroll(ScrollOffsets::new(40.0, 5.0));
    w.on_scroll();

    assert_eq!(
        w.on_frame(),
        Some(ScrollUpdate {
            display: ScrollOffsets::new(40.0, 5.0),
            gutter_top: Some(40.0),
        })
    );
    assert_eq!(w.on_frame(), None);

    w.toggle_line_numbers();
    w.on_scroll();
    assert_eq!(w.on_frame().and_then(|u| u.gutter_top), None);
}

#[test]
fn overflow_flag_reports_only_flips() {
    let mut w = widget("a");
    let changes = record(&mut w);

    assert!(w.on_layout(500.0, 300.0));
    assert!(w.is_overflowing());
    assert!(!w.on_layout(600.0, 300.0));
    assert!(w.on_layout(100.0, 300.0));
    assert_eq!(
        events(&changes),
        vec![
            WidgetEvent::OverflowChanged(true),
            WidgetEvent::OverflowChanged(false),
        ]
    );
}

#[test]
fn cell_hosts_remeasure_overflow_after_edits() {
    let mut w = widget("short");
    let changes = record(&mut w);

    assert!(!w.on_cell_layout(10));
    w.surface_mut().select_range(5, 5);
    w.surface_mut().insert_at_selection(" and longer").unwrap();
    w.on_input();
    assert!(!w.is_overflowing());
    assert!(w.run_pending());
    assert!(w.is_overflowing());

    w.set_code("字字字字字");
    assert!(!w.is_overflowing());
    w.set_code("字字字字字字");
    assert!(w.is_overflowing());

    assert!(w.on_layout(100.0, 200.0));
    w.set_code(&"x".repeat(50));
    assert!(!w.is_overflowing());

    let flips: Vec<WidgetEvent> = events(&changes)
        .into_iter()
        .filter(|e| matches!(e, WidgetEvent::OverflowChanged(_)))
        .collect();
    assert_eq!(
        flips,
        vec![
            WidgetEvent::OverflowChanged(true),
            WidgetEvent::OverflowChanged(false),
            WidgetEvent::OverflowChanged(true),
            WidgetEvent::OverflowChanged(false),
        ]
    );
}

#[test]
fn loaded_document_is_one_undoable_edit() {
    let options = EditorOptions {
        language: "rust".to_string(),
        ..EditorOptions::default()
    };
    let mut w = widget_with("old text", options);
    w.surface_mut().select_range(3, 3);
    w.on_cursor_move();
    let changes = record(&mut w);
    let mut io = FakeIo {
        document: Some(LoadedDocument {
            content: "fn main() {}\n".to_string(),
            name: "main.rs".to_string(),
        }),
        ..FakeIo::default()
    };

    let loaded = w.load_with(&mut io).unwrap();
    assert_eq!(loaded.as_deref(), Some("main.rs"));
    assert_eq!(w.text(), "fn main() {}\n");
    assert_eq!(w.surface().selection(), Selection::caret(0));
    assert_eq!(w.cursor(), CursorPosition::new(1, 1));
    assert_eq!(w.line_numbers(), &[1, 2]);
    assert_eq!(w.highlighted().language, "rust");
    assert!(!w.has_pending_refresh());

    assert_eq!(io.loads.len(), 1);
    assert_eq!(io.loads[0].accept, codepane_lang::accept_attribute_for("rust"));
    assert_eq!(io.loads[0].filters[0].extensions, vec![".rs".to_string()]);

    let seen = events(&changes);
    assert!(seen.contains(&WidgetEvent::FileLoaded {
        name: "main.rs".to_string()
    }));
    assert!(seen.contains(&WidgetEvent::CodeChanged("fn main() {}\n".to_string())));

    let delta = changes
        .lock()
        .unwrap()
        .iter()
        .find_map(|c| c.text_delta.clone())
        .expect("load edit has a delta");
    assert_eq!(delta.apply_to("old text"), "fn main() {}\n");

    assert!(w.surface_mut().undo());
    assert_eq!(w.text(), "old text");
}

#[test]
fn cancelled_load_changes_nothing() {
    let mut w = widget("keep");
    let changes = record(&mut w);
    let mut io = FakeIo::default();

    assert_eq!(w.load_with(&mut io).unwrap(), None);
    assert_eq!(w.text(), "keep");
    assert!(events(&changes).is_empty());
}

#[test]
fn failed_load_is_an_error() {
    let mut w = widget("keep");
    let mut io = FakeIo {
        fail: true,
        ..FakeIo::default()
    };

    match w.load_with(&mut io) {
        Err(WidgetError::Load(message)) => assert_eq!(message, "disk unavailable"),
        other => panic!("unexpected result: {other:?}"),
    }
    assert_eq!(w.text(), "keep");
}

#[test]
fn unhandled_save_falls_back_to_io() {
    let options = EditorOptions {
        language: "python".to_string(),
        ..EditorOptions::default()
    };
    let mut w = widget_with("print(1)", options);
    let changes = record(&mut w);
    let mut io = FakeIo::default();

    let request = w.request_save();
    assert_eq!(request.suggested_name, "code.py");
    assert_eq!(request.content, "print(1)");
    assert_eq!(request.filters[0].description, "Python files");

    let outcome = w.complete_save(&mut io).unwrap();
    assert_eq!(
        outcome,
        Some(SaveOutcome::Saved {
            name: "code.py".to_string()
        })
    );
    assert_eq!(io.saves, vec![request.clone()]);
    assert_eq!(
        events(&changes),
        vec![
            WidgetEvent::SaveRequested(request),
            WidgetEvent::FileSaved {
                name: "code.py".to_string()
            },
        ]
    );

    assert_eq!(w.complete_save(&mut io).unwrap(), None);
    assert_eq!(io.saves.len(), 1);
}

#[test]
fn handled_save_skips_io() {
    let mut w = widget("x");
    let mut io = FakeIo::default();

    w.request_save();
    w.mark_save_handled();
    assert_eq!(w.complete_save(&mut io).unwrap(), None);
    assert!(io.saves.is_empty());

    w.request_save();
    assert!(w.complete_save(&mut io).unwrap().is_some());
}

#[test]
fn cancelled_and_failed_saves() {
    let mut w = widget("x");
    let mut io = FakeIo {
        cancel_save: true,
        ..FakeIo::default()
    };
    w.request_save();
    assert_eq!(w.complete_save(&mut io).unwrap(), Some(SaveOutcome::Cancelled));

    io.fail = true;
    w.request_save();
    assert!(matches!(w.complete_save(&mut io), Err(WidgetError::Save(_))));
}

#[test]
fn default_filename_gets_language_extension() {
    let options = EditorOptions {
        language: "python".to_string(),
        default_filename: Some("notes".to_string()),
        ..EditorOptions::default()
    };
    let mut w = widget_with("", options);
    assert_eq!(w.request_save().suggested_name, "notes.py");

    let options = EditorOptions {
        language: "python".to_string(),
        default_filename: Some("notes.txt".to_string()),
        ..EditorOptions::default()
    };
    let mut w = widget_with("", options);
    assert_eq!(w.request_save().suggested_name, "notes.txt");
}

#[test]
fn versions_increase_by_one_per_change() {
    let mut w = widget("a");
    let start = w.version();
    let changes = record(&mut w);

    w.on_input();
    w.run_pending();
    w.toggle_line_numbers();

    let changes = changes.lock().unwrap();
    assert!(!changes.is_empty());
    for (i, change) in changes.iter().enumerate() {
        assert_eq!(change.old_version, start + i as u64);
        assert_eq!(change.new_version, change.old_version + 1);
    }
    assert_eq!(w.version(), start + changes.len() as u64);
}
