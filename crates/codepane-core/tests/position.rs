use codepane_core::{CursorPosition, line_numbers, locate};
use rand::Rng;

#[test]
fn test_locate_invariants_on_random_text() {
    let mut rng = rand::thread_rng();
    let alphabet = ['x', '\n', ' ', 'é', '\t'];

    for _ in 0..200 {
        let len = rng.gen_range(0..40);
        let text: String = (0..len)
            .map(|_| alphabet[rng.gen_range(0..alphabet.len())])
            .collect();
        let newlines = text.matches('\n').count();

        for offset in 0..=len {
            let pos = locate(&text, offset);
            assert!(pos.line >= 1 && pos.column >= 1);
            assert!(pos.line <= newlines + 1);
        }

        assert_eq!(line_numbers(&text).len(), newlines + 1);
        assert_eq!(locate(&text, len).line, newlines + 1);
    }
}

#[test]
fn test_status_bar_format() {
    let pos = locate("a\nbc", 4);
    assert_eq!(pos, CursorPosition::new(2, 3));
    assert_eq!(pos.to_string(), "Ln 2, Col 3");
}
