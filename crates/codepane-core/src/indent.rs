//! Selection-aware indent/outdent.
//!
//! These functions only compute text; applying the result to a live surface (so the host undo
//! stack records it) is [`MinimalDiffApplier`](crate::MinimalDiffApplier)'s job.

use crate::edit::{EditResult, Selection};
use crate::text::{byte_index, char_len, char_slice, split_at_char};

/// The indent unit inserted or removed per Tab press.
pub const INDENT_TOKEN: &str = "  ";

const INDENT_LEN: usize = INDENT_TOKEN.len();

/// Handle a Tab (`shift_held == false`) or Shift+Tab key press.
///
/// The selection is clamped to the text before use.
pub fn apply_tab(text: &str, selection: Selection, shift_held: bool) -> EditResult {
    let selection = selection.clamped(char_len(text));
    if shift_held {
        outdent(text, selection)
    } else {
        indent(text, selection)
    }
}

/// Indent: insert the token at a caret, or prefix every line of the selected block.
///
/// A selection that starts mid-line indents the selected part of that first line as if it were a
/// whole line.
pub fn indent(text: &str, selection: Selection) -> EditResult {
    let Selection { start, end } = selection;

    if selection.is_caret() {
        let (before, after) = split_at_char(text, start);
        let caret = start + INDENT_LEN;
        return EditResult::new(format!("{before}{INDENT_TOKEN}{after}"), caret, caret);
    }

    let block: String = char_slice(text, start, end)
        .split('\n')
        .map(|line| format!("{INDENT_TOKEN}{line}"))
        .collect::<Vec<_>>()
        .join("\n");

    splice_block(text, selection, block)
}

/// Outdent: strip one token from the caret's line, or from each line of the selected block.
///
/// Lines without a leading token are left alone; a caret on such a line is a no-op.
pub fn outdent(text: &str, selection: Selection) -> EditResult {
    let Selection { start, end } = selection;

    if selection.is_caret() {
        let line_start = line_start_before(text, start);
        let line_start_byte = byte_index(text, line_start);
        if !text[line_start_byte..].starts_with(INDENT_TOKEN) {
            return EditResult::unchanged(text, selection);
        }

        let mut out = String::with_capacity(text.len() - INDENT_LEN);
        out.push_str(&text[..line_start_byte]);
        out.push_str(&text[line_start_byte + INDENT_LEN..]);

        let caret = start.saturating_sub(INDENT_LEN).max(line_start);
        return EditResult::new(out, caret, caret);
    }

    let block: String = char_slice(text, start, end)
        .split('\n')
        .map(|line| line.strip_prefix(INDENT_TOKEN).unwrap_or(line))
        .collect::<Vec<_>>()
        .join("\n");

    splice_block(text, selection, block)
}

/// Char offset of the start of the line containing `offset`.
pub fn line_start_before(text: &str, offset: usize) -> usize {
    let (before, _) = split_at_char(text, offset);
    match before.rfind('\n') {
        Some(byte) => char_len(&before[..byte]) + 1,
        None => 0,
    }
}

fn splice_block(text: &str, selection: Selection, block: String) -> EditResult {
    let (before, rest) = split_at_char(text, selection.start);
    let (_, after) = split_at_char(rest, selection.len());
    let block_len = char_len(&block);

    EditResult::new(
        format!("{before}{block}{after}"),
        selection.start,
        selection.start + block_len,
    )
}
