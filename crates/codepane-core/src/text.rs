/// Number of Unicode scalar values in `text`.
pub(crate) fn char_len(text: &str) -> usize {
    text.chars().count()
}

/// Byte index of the `char_offset`-th char, clamped to `text.len()`.
pub(crate) fn byte_index(text: &str, char_offset: usize) -> usize {
    text.char_indices()
        .nth(char_offset)
        .map(|(byte, _)| byte)
        .unwrap_or(text.len())
}

/// `text[start..end]` in char offsets (clamped, `start` capped at `end`).
pub(crate) fn char_slice(text: &str, start: usize, end: usize) -> &str {
    let end_byte = byte_index(text, end);
    let start_byte = byte_index(text, start).min(end_byte);
    &text[start_byte..end_byte]
}

/// Splits `text` at a char offset.
pub(crate) fn split_at_char(text: &str, offset: usize) -> (&str, &str) {
    text.split_at(byte_index(text, offset))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_byte_index_multibyte() {
        let text = "aé中b";
        assert_eq!(byte_index(text, 0), 0);
        assert_eq!(byte_index(text, 2), 3);
        assert_eq!(byte_index(text, 3), 6);
        assert_eq!(byte_index(text, 99), text.len());
        assert_eq!(char_slice(text, 1, 3), "é中");
        assert_eq!(char_slice(text, 3, 1), "");
    }
}
