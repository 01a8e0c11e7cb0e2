//! Clipboard collaborator.
//!
//! The host supplies a clipboard-write primitive that reports success or
//! failure. Copy and cut only touch the buffer once the write has been
//! confirmed, so implementations must not report success before the text
//! has actually been handed off.

use std::io::{Write, stdout};

use base64::Engine;
use thiserror::Error;

/// Failure to reach the clipboard.
#[derive(Debug, Error)]
pub enum ClipboardError {
    /// The underlying write primitive failed.
    #[error("clipboard write failed: {0}")]
    Write(#[from] std::io::Error),
}

/// A clipboard-write primitive.
pub trait Clipboard {
    /// Place `text` on the clipboard.
    ///
    /// # Errors
    ///
    /// Returns an error if the clipboard is unavailable or the write fails;
    /// callers treat the clipboard as untouched in that case.
    fn write(&mut self, text: &str) -> Result<(), ClipboardError>;
}

/// Platform clipboard: pbcopy on macOS with an OSC 52 fallback, the OSC 52
/// escape sequence elsewhere.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClipboard;

impl Clipboard for SystemClipboard {
    fn write(&mut self, text: &str) -> Result<(), ClipboardError> {
        copy_to_clipboard(text).map_err(ClipboardError::from)
    }
}

fn copy_to_clipboard(text: &str) -> std::io::Result<()> {
    #[cfg(target_os = "macos")]
    {
        if copy_to_pbcopy(text).is_ok() {
            return Ok(());
        }
    }
    copy_to_clipboard_osc52(text)
}

#[cfg(target_os = "macos")]
fn copy_to_pbcopy(text: &str) -> std::io::Result<()> {
    use std::process::{Command, Stdio};

    let mut child = Command::new("pbcopy").stdin(Stdio::piped()).spawn()?;
    if let Some(mut stdin) = child.stdin.take() {
        stdin.write_all(text.as_bytes())?;
    }
    let status = child.wait()?;
    if status.success() {
        Ok(())
    } else {
        Err(std::io::Error::other("pbcopy failed"))
    }
}

fn copy_to_clipboard_osc52(text: &str) -> std::io::Result<()> {
    let osc = osc52_sequence(text);
    let mut out = stdout();
    out.write_all(osc.as_bytes())?;
    out.flush()
}

fn osc52_sequence(text: &str) -> String {
    let encoded = base64::engine::general_purpose::STANDARD.encode(text.as_bytes());
    format!("\x1b]52;c;{encoded}\x07")
}
