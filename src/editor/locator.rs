//! Line boundary computation.

/// Byte range of one line; `end` excludes the `\n` separator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LineRange {
    /// First byte of the line.
    pub start: usize,
    /// One past the last byte of the line content.
    pub end: usize,
}

impl LineRange {
    /// Length of the line content in bytes.
    pub const fn len(&self) -> usize {
        self.end - self.start
    }

    /// Whether the line is empty.
    pub const fn is_empty(&self) -> bool {
        self.start == self.end
    }
}

/// Locate the line containing `offset`.
///
/// A line is the maximal run of text not containing `\n`. The scan walks
/// backward from `offset` to the previous separator and forward to the next
/// one; O(line length), no allocation. An offset sitting on a separator
/// belongs to the line the separator terminates.
///
/// # Panics
///
/// Panics if `offset` is greater than `text.len()` or does not lie on a
/// `char` boundary.
pub fn locate(text: &str, offset: usize) -> LineRange {
    let start = text[..offset].rfind('\n').map_or(0, |i| i + 1);
    let end = text[offset..]
        .find('\n')
        .map_or(text.len(), |i| offset + i);
    LineRange { start, end }
}

/// Index and starting byte offset of the line containing `offset`.
///
/// `lines` must be the buffer split on `\n` (so a trailing separator yields
/// a trailing empty line). The index is found by accumulating line length
/// plus one separator byte for every line but the last.
pub(crate) fn line_index_at(lines: &[&str], offset: usize) -> (usize, usize) {
    let mut line_start = 0;
    let mut index = 0;
    while index + 1 < lines.len() {
        let line_end = line_start + lines[index].len();
        if offset <= line_end {
            break;
        }
        line_start = line_end + 1;
        index += 1;
    }
    (index, line_start)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    // --- locate ---

    #[test]
    fn test_locate_in_empty_buffer() {
        assert_eq!(locate("", 0), LineRange { start: 0, end: 0 });
    }

    #[test]
    fn test_locate_single_line() {
        assert_eq!(locate("abc", 1), LineRange { start: 0, end: 3 });
    }

    #[test]
    fn test_locate_at_buffer_start() {
        assert_eq!(locate("abc\ndef", 0), LineRange { start: 0, end: 3 });
    }

    #[test]
    fn test_locate_at_buffer_end_without_trailing_separator() {
        assert_eq!(locate("abc\ndef", 7), LineRange { start: 4, end: 7 });
    }

    #[test]
    fn test_locate_inside_second_line() {
        assert_eq!(locate("abc\ndef", 5), LineRange { start: 4, end: 7 });
    }

    #[test]
    fn test_locate_on_separator_belongs_to_preceding_line() {
        assert_eq!(locate("abc\ndef", 3), LineRange { start: 0, end: 3 });
    }

    #[test]
    fn test_locate_just_after_separator_belongs_to_next_line() {
        assert_eq!(locate("abc\ndef", 4), LineRange { start: 4, end: 7 });
    }

    #[test]
    fn test_locate_empty_line_between_separators() {
        assert_eq!(locate("a\n\nb", 2), LineRange { start: 2, end: 2 });
    }

    #[test]
    fn test_locate_after_trailing_separator() {
        assert_eq!(locate("abc\n", 4), LineRange { start: 4, end: 4 });
    }

    #[test]
    fn test_locate_multibyte_line() {
        let text = "café\nmenu";
        assert_eq!(locate(text, 3), LineRange { start: 0, end: 5 });
        assert_eq!(locate(text, 6), LineRange { start: 6, end: 9 });
    }

    // --- line_index_at ---

    #[test]
    fn test_line_index_at_first_line() {
        let lines: Vec<&str> = "abc\ndef".split('\n').collect();
        assert_eq!(line_index_at(&lines, 1), (0, 0));
    }

    #[test]
    fn test_line_index_at_second_line() {
        let lines: Vec<&str> = "abc\ndef".split('\n').collect();
        assert_eq!(line_index_at(&lines, 4), (1, 4));
    }

    #[test]
    fn test_line_index_at_line_end_stays_on_line() {
        let lines: Vec<&str> = "abc\ndef".split('\n').collect();
        assert_eq!(line_index_at(&lines, 3), (0, 0));
    }

    #[test]
    fn test_line_index_at_trailing_empty_line() {
        let lines: Vec<&str> = "abc\n".split('\n').collect();
        assert_eq!(lines.len(), 2);
        assert_eq!(line_index_at(&lines, 4), (1, 4));
    }

    proptest! {
        #[test]
        fn prop_locate_brackets_offset(text in "[a-z\n]{0,40}", frac in 0.0f64..=1.0) {
            // Map the fraction onto a valid char boundary.
            let offset = text
                .char_indices()
                .map(|(i, _)| i)
                .chain(std::iter::once(text.len()))
                .min_by_key(|&i| {
                    let target = (frac * text.len() as f64) as usize;
                    i.abs_diff(target)
                })
                .unwrap_or(0);

            let range = locate(&text, offset);
            prop_assert!(range.start <= offset);
            prop_assert!(offset <= range.end);
        }

        #[test]
        fn prop_locate_never_spans_a_separator(text in "[a-z\n]{0,40}") {
            for offset in 0..=text.len() {
                let range = locate(&text, offset);
                prop_assert!(!text[range.start..range.end].contains('\n'));
            }
        }
    }
}
