//! Shortcut dispatch.
//!
//! Maps a key chord plus the current selection to an explicit decision:
//! intercept with a line command (the host suppresses its default handling)
//! or pass the event through. The chord table is evaluated in a fixed
//! priority order; first match wins.

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::editor::LineCommand;
use crate::surface::Selection;

/// Dispatch decision for one key event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyDecision {
    /// The chord matched; apply the command instead of the default handling.
    Intercept(LineCommand),
    /// Not a shortcut (or a copy/cut chord with a real selection); the
    /// host's default handling applies.
    PassThrough,
}

/// The chord table, composed into the host's event loop at startup.
///
/// Chords, in priority order:
/// 1. Ctrl/Cmd+Shift+K — delete line
/// 2. Alt+Up / Alt+Down — move line up / down
/// 3. Ctrl/Cmd+C with an empty selection — copy line
/// 4. Ctrl/Cmd+X with an empty selection — cut line
///
/// Ctrl+C / Ctrl+X with text actually selected pass through so the host's
/// own copy and cut of the real selection still work. "Cmd" is the SUPER
/// modifier.
#[derive(Debug, Clone, Copy, Default)]
pub struct ShortcutDispatcher;

impl ShortcutDispatcher {
    /// Decide what to do with one key event.
    ///
    /// Only key-press events are considered; repeat and release events
    /// always pass through.
    pub fn on_key(self, key: &KeyEvent, selection: Selection) -> KeyDecision {
        if key.kind != KeyEventKind::Press {
            return KeyDecision::PassThrough;
        }

        let primary = key
            .modifiers
            .intersects(KeyModifiers::CONTROL | KeyModifiers::SUPER);
        let shift = key.modifiers.contains(KeyModifiers::SHIFT);
        let alt = key.modifiers.contains(KeyModifiers::ALT);

        match key.code {
            KeyCode::Char('k' | 'K') if primary && shift => {
                KeyDecision::Intercept(LineCommand::DeleteLine)
            }
            KeyCode::Up if alt => KeyDecision::Intercept(LineCommand::MoveLineUp),
            KeyCode::Down if alt => KeyDecision::Intercept(LineCommand::MoveLineDown),
            KeyCode::Char('c') if primary && selection.is_cursor() => {
                KeyDecision::Intercept(LineCommand::CopyLine)
            }
            KeyCode::Char('x') if primary && selection.is_cursor() => {
                KeyDecision::Intercept(LineCommand::CutLine)
            }
            _ => KeyDecision::PassThrough,
        }
    }
}
