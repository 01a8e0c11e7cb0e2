//! Demo host application.
//!
//! A minimal terminal textarea standing in for the host surface the line
//! shortcuts are designed against: it owns a [`PlainTextSurface`], composes
//! the shortcut dispatcher and the line editor at startup, and provides the
//! plain typing a native input surface would handle by itself.
//!
//! [`PlainTextSurface`]: crate::surface::PlainTextSurface

mod event_loop;
mod textarea;

use std::path::PathBuf;

/// The application: owns the file binding and runs the event loop.
pub struct App {
    file_path: Option<PathBuf>,
}

impl App {
    /// Create an application editing `file_path`, or a scratch buffer when
    /// no path is given.
    pub const fn new(file_path: Option<PathBuf>) -> Self {
        Self { file_path }
    }
}
