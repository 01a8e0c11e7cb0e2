//! Pure line transformations.
//!
//! Each operation maps a `(text, selection)` pair to its successor without
//! touching the host surface; [`LineEditor`](crate::editor::LineEditor)
//! composes them with the clipboard and the change notification. A selection
//! with extent is resolved using its `start` offset only.

use crate::editor::locator::{line_index_at, locate};
use crate::surface::Selection;

/// Direction for [`move_line`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveDirection {
    Up,
    Down,
}

/// Remove the line containing `selection.start`.
///
/// The trailing separator is consumed with the line so the line below moves
/// up, except on the last line of a buffer with no trailing separator, where
/// only the line content is removed. The selection collapses to a cursor at
/// the deleted line's start.
pub fn delete_line(text: &str, selection: Selection) -> (String, Selection) {
    let range = locate(text, selection.start);
    let end = if range.end < text.len() {
        range.end + 1
    } else {
        range.end
    };

    let mut next = String::with_capacity(text.len() - (end - range.start));
    next.push_str(&text[..range.start]);
    next.push_str(&text[end..]);
    (next, Selection::cursor(range.start))
}

/// The content of the line containing `selection.start`, without separator.
pub fn line_text(text: &str, selection: Selection) -> &str {
    let range = locate(text, selection.start);
    &text[range.start..range.end]
}

/// Swap the line containing `selection.start` with its neighbour.
///
/// Returns `None` when the line is already at the buffer edge in the given
/// direction. The cursor follows the moved line, keeping its pre-move
/// relative column clamped to the target line's length.
pub fn move_line(
    text: &str,
    selection: Selection,
    direction: MoveDirection,
) -> Option<(String, Selection)> {
    let mut lines: Vec<&str> = text.split('\n').collect();
    let (index, line_start) = line_index_at(&lines, selection.start);
    let column = selection.start - line_start;

    let target = match direction {
        MoveDirection::Up => index.checked_sub(1)?,
        MoveDirection::Down => {
            if index + 1 == lines.len() {
                return None;
            }
            index + 1
        }
    };
    lines.swap(index, target);

    let next = lines.join("\n");
    let target_start: usize = lines[..target].iter().map(|line| line.len() + 1).sum();
    let offset = target_start + column.min(lines[target].len());
    Some((next, Selection::cursor(offset)))
}

#[cfg(test)]
mod tests {
    use super::*;

    // --- delete_line ---

    #[test]
    fn test_delete_only_line_leaves_empty_buffer() {
        let (text, sel) = delete_line("abc", Selection::cursor(1));
        assert_eq!(text, "");
        assert_eq!(sel, Selection::cursor(0));
    }

    #[test]
    fn test_delete_first_line_consumes_separator() {
        let (text, sel) = delete_line("abc\ndef", Selection::cursor(1));
        assert_eq!(text, "def");
        assert_eq!(sel, Selection::cursor(0));
    }

    #[test]
    fn test_delete_last_line_without_trailing_separator() {
        let (text, sel) = delete_line("abc\ndef", Selection::cursor(5));
        assert_eq!(text, "abc\n");
        assert_eq!(sel, Selection::cursor(4));
    }

    #[test]
    fn test_delete_middle_line() {
        let (text, sel) = delete_line("a\nb\nc", Selection::cursor(2));
        assert_eq!(text, "a\nc");
        assert_eq!(sel, Selection::cursor(2));
    }

    #[test]
    fn test_delete_in_empty_buffer_is_stable() {
        let (text, sel) = delete_line("", Selection::cursor(0));
        assert_eq!(text, "");
        assert_eq!(sel, Selection::cursor(0));
    }

    #[test]
    fn test_delete_trailing_empty_line() {
        let (text, sel) = delete_line("abc\n", Selection::cursor(4));
        assert_eq!(text, "abc\n");
        assert_eq!(sel, Selection::cursor(4));
    }

    #[test]
    fn test_delete_uses_selection_start_only() {
        let (text, sel) = delete_line("abc\ndef", Selection::range(1, 6));
        assert_eq!(text, "def");
        assert_eq!(sel, Selection::cursor(0));
    }

    // --- line_text ---

    #[test]
    fn test_line_text_excludes_separator() {
        assert_eq!(line_text("abc\ndef", Selection::cursor(1)), "abc");
        assert_eq!(line_text("abc\ndef", Selection::cursor(5)), "def");
    }

    #[test]
    fn test_line_text_of_empty_line() {
        assert_eq!(line_text("a\n\nb", Selection::cursor(2)), "");
    }

    // --- move_line ---

    #[test]
    fn test_move_up_swaps_with_previous_line() {
        let (text, sel) = move_line("a\nb\nc", Selection::cursor(2), MoveDirection::Up)
            .expect("not at edge");
        assert_eq!(text, "b\na\nc");
        assert_eq!(sel, Selection::cursor(0));
    }

    #[test]
    fn test_move_up_at_first_line_is_noop() {
        assert!(move_line("a\nb", Selection::cursor(0), MoveDirection::Up).is_none());
    }

    #[test]
    fn test_move_down_at_last_line_is_noop() {
        assert!(move_line("a\nb", Selection::cursor(2), MoveDirection::Down).is_none());
    }

    #[test]
    fn test_move_down_swaps_with_next_line() {
        let (text, sel) = move_line("abc\ndef", Selection::cursor(1), MoveDirection::Down)
            .expect("not at edge");
        assert_eq!(text, "def\nabc");
        assert_eq!(sel, Selection::cursor(5));
    }

    #[test]
    fn test_move_preserves_relative_column() {
        // Cursor on column 2 of "def"; the line lands at offset 0.
        let (text, sel) = move_line("abc\ndef", Selection::cursor(6), MoveDirection::Up)
            .expect("not at edge");
        assert_eq!(text, "def\nabc");
        assert_eq!(sel, Selection::cursor(2));
    }

    #[test]
    fn test_move_single_line_buffer_is_noop_both_ways() {
        assert!(move_line("abc", Selection::cursor(1), MoveDirection::Up).is_none());
        assert!(move_line("abc", Selection::cursor(1), MoveDirection::Down).is_none());
    }

    #[test]
    fn test_move_trailing_empty_line_up() {
        // "abc\n" splits into ["abc", ""]; the empty line is movable.
        let (text, sel) = move_line("abc\n", Selection::cursor(4), MoveDirection::Up)
            .expect("not at edge");
        assert_eq!(text, "\nabc");
        assert_eq!(sel, Selection::cursor(0));
    }

    #[test]
    fn test_move_down_past_shorter_line() {
        let (text, sel) = move_line("hello\nhi\nworld", Selection::cursor(4), MoveDirection::Down)
            .expect("not at edge");
        assert_eq!(text, "hi\nhello\nworld");
        assert_eq!(sel, Selection::cursor(7));
    }
}
