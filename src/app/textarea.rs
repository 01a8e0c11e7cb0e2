//! Plain-typing glue for the demo textarea.
//!
//! Basic insertion, deletion and cursor movement over a text surface — the
//! default behavior a native input surface would provide by itself. The
//! shortcut dispatcher runs first; these handle whatever passes through.

use crate::editor::locate;
use crate::surface::{Selection, TextSurface};

/// Insert a character at the cursor, replacing any active selection.
pub fn insert_char<S: TextSurface>(surface: &mut S, ch: char) {
    let sel = surface.selection();
    let mut text = surface.text().to_string();
    let mut buf = [0u8; 4];
    text.replace_range(sel.start..sel.end, ch.encode_utf8(&mut buf));
    surface.set_text(text);
    surface.set_selection(Selection::cursor(sel.start + ch.len_utf8()));
    surface.content_changed();
}

/// Insert a line separator at the cursor (Enter).
pub fn insert_newline<S: TextSurface>(surface: &mut S) {
    insert_char(surface, '\n');
}

/// Delete the selection, or the character before the cursor (Backspace).
pub fn backspace<S: TextSurface>(surface: &mut S) {
    let sel = surface.selection();
    if !sel.is_cursor() {
        delete_range(surface, sel);
        return;
    }
    if sel.start == 0 {
        return;
    }
    let prev = previous_boundary(surface.text(), sel.start);
    delete_range(surface, Selection::range(prev, sel.start));
}

/// Delete the selection, or the character at the cursor (Delete).
pub fn delete_forward<S: TextSurface>(surface: &mut S) {
    let sel = surface.selection();
    if !sel.is_cursor() {
        delete_range(surface, sel);
        return;
    }
    let Some(next) = next_boundary(surface.text(), sel.start) else {
        return;
    };
    delete_range(surface, Selection::range(sel.start, next));
}

/// Move the cursor one character left, collapsing any selection first.
pub fn move_left<S: TextSurface>(surface: &mut S) {
    let sel = surface.selection();
    let offset = if sel.is_cursor() {
        previous_boundary(surface.text(), sel.start)
    } else {
        sel.start
    };
    surface.set_selection(Selection::cursor(offset));
}

/// Move the cursor one character right, collapsing any selection first.
pub fn move_right<S: TextSurface>(surface: &mut S) {
    let sel = surface.selection();
    let offset = if sel.is_cursor() {
        next_boundary(surface.text(), sel.end).unwrap_or(sel.end)
    } else {
        sel.end
    };
    surface.set_selection(Selection::cursor(offset));
}

/// Move the cursor to the previous line, keeping the column clamped.
pub fn move_up<S: TextSurface>(surface: &mut S) {
    let offset = surface.selection().start;
    let line = locate(surface.text(), offset);
    if line.start == 0 {
        return;
    }
    let above = locate(surface.text(), line.start - 1);
    let column = char_column(surface.text(), line.start, offset);
    let target = offset_at_column(surface.text(), above.start, above.end, column);
    surface.set_selection(Selection::cursor(target));
}

/// Move the cursor to the next line, keeping the column clamped.
pub fn move_down<S: TextSurface>(surface: &mut S) {
    let offset = surface.selection().start;
    let line = locate(surface.text(), offset);
    if line.end >= surface.text().len() {
        return;
    }
    let below = locate(surface.text(), line.end + 1);
    let column = char_column(surface.text(), line.start, offset);
    let target = offset_at_column(surface.text(), below.start, below.end, column);
    surface.set_selection(Selection::cursor(target));
}

/// Move the cursor to the start of its line (Home).
pub fn move_home<S: TextSurface>(surface: &mut S) {
    let line = locate(surface.text(), surface.selection().start);
    surface.set_selection(Selection::cursor(line.start));
}

/// Move the cursor to the end of its line (End).
pub fn move_end<S: TextSurface>(surface: &mut S) {
    let line = locate(surface.text(), surface.selection().start);
    surface.set_selection(Selection::cursor(line.end));
}

fn delete_range<S: TextSurface>(surface: &mut S, sel: Selection) {
    let mut text = surface.text().to_string();
    text.replace_range(sel.start..sel.end, "");
    surface.set_text(text);
    surface.set_selection(Selection::cursor(sel.start));
    surface.content_changed();
}

fn previous_boundary(text: &str, offset: usize) -> usize {
    text[..offset]
        .chars()
        .next_back()
        .map_or(0, |c| offset - c.len_utf8())
}

fn next_boundary(text: &str, offset: usize) -> Option<usize> {
    text[offset..].chars().next().map(|c| offset + c.len_utf8())
}

/// Column of `offset` within its line, in characters.
fn char_column(text: &str, line_start: usize, offset: usize) -> usize {
    text[line_start..offset].chars().count()
}

/// Byte offset of `column` characters into the line `start..end`, clamped to
/// the line end.
fn offset_at_column(text: &str, start: usize, end: usize, column: usize) -> usize {
    text[start..end]
        .char_indices()
        .nth(column)
        .map_or(end, |(i, _)| start + i)
}
