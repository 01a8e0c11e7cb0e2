//! Line-editing operations over a host surface.
//!
//! The pure core lives in [`locator`] and [`ops`]; [`LineEditor`] composes
//! it with the clipboard collaborator and the surface's content-changed
//! notification. Cut is copy-then-delete with the deletion conditioned on a
//! confirmed clipboard write.

pub mod locator;
pub mod ops;

pub use locator::{LineRange, locate};
pub use ops::{MoveDirection, delete_line, line_text, move_line};

use thiserror::Error;
use tracing::warn;

use crate::clipboard::{Clipboard, ClipboardError};
use crate::surface::{Selection, TextSurface};

/// One line-editing operation, as selected by the shortcut dispatcher.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineCommand {
    /// Remove the current line and its trailing separator.
    DeleteLine,
    /// Place the current line on the clipboard.
    CopyLine,
    /// Copy the current line, then remove it.
    CutLine,
    /// Swap the current line with the one above.
    MoveLineUp,
    /// Swap the current line with the one below.
    MoveLineDown,
}

/// Failure while applying a [`LineCommand`].
#[derive(Debug, Error)]
pub enum EditError {
    /// The clipboard write of a copy or cut failed; the surface is
    /// untouched.
    #[error("clipboard write failed")]
    Clipboard(#[source] ClipboardError),
}

/// What applying a command did to the surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditOutcome {
    /// Buffer and selection were updated and the surface notified.
    Mutated,
    /// The line was copied; the surface is untouched.
    Copied,
    /// The line was already at a buffer edge; nothing changed.
    NoOp,
}

/// Applies [`LineCommand`]s to a host surface.
///
/// Owns the clipboard collaborator; buffer and selection stay with the
/// surface.
#[derive(Debug)]
pub struct LineEditor<C> {
    clipboard: C,
}

impl<C: Clipboard> LineEditor<C> {
    pub const fn new(clipboard: C) -> Self {
        Self { clipboard }
    }

    /// The clipboard collaborator.
    pub const fn clipboard(&self) -> &C {
        &self.clipboard
    }

    /// Apply one command to `surface`.
    ///
    /// Mutating commands notify the surface exactly once; copy and edge
    /// no-ops do not notify.
    ///
    /// # Errors
    ///
    /// Returns [`EditError::Clipboard`] when a copy or cut cannot reach the
    /// clipboard. The surface is unchanged in that case: cut only deletes
    /// after the clipboard write has returned success.
    pub fn apply<S: TextSurface>(
        &mut self,
        surface: &mut S,
        command: LineCommand,
    ) -> Result<EditOutcome, EditError> {
        match command {
            LineCommand::DeleteLine => {
                let (text, selection) = ops::delete_line(surface.text(), surface.selection());
                Ok(Self::commit(surface, text, selection))
            }
            LineCommand::CopyLine => {
                self.copy_current_line(surface)?;
                Ok(EditOutcome::Copied)
            }
            LineCommand::CutLine => {
                self.copy_current_line(surface)?;
                let (text, selection) = ops::delete_line(surface.text(), surface.selection());
                Ok(Self::commit(surface, text, selection))
            }
            LineCommand::MoveLineUp => Ok(Self::shift(surface, MoveDirection::Up)),
            LineCommand::MoveLineDown => Ok(Self::shift(surface, MoveDirection::Down)),
        }
    }

    fn copy_current_line<S: TextSurface>(&mut self, surface: &S) -> Result<(), EditError> {
        let line = ops::line_text(surface.text(), surface.selection());
        self.clipboard.write(line).map_err(|err| {
            warn!("clipboard write failed: {err}");
            EditError::Clipboard(err)
        })
    }

    fn shift<S: TextSurface>(surface: &mut S, direction: MoveDirection) -> EditOutcome {
        match ops::move_line(surface.text(), surface.selection(), direction) {
            Some((text, selection)) => Self::commit(surface, text, selection),
            None => EditOutcome::NoOp,
        }
    }

    fn commit<S: TextSurface>(surface: &mut S, text: String, selection: Selection) -> EditOutcome {
        surface.set_text(text);
        surface.set_selection(selection);
        surface.content_changed();
        EditOutcome::Mutated
    }
}
