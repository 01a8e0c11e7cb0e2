// Transitive dependency version mismatches we can't control
#![allow(clippy::multiple_crate_versions)]

//! # Linekeys
//!
//! Line-editing keyboard shortcuts for a single plain-text surface, plus an
//! offline-capable asset cache worker for the hosting page shell.
//!
//! The editing core operates on a flat text buffer and a byte-offset
//! selection supplied by a host surface:
//! - **locate** a line from any offset,
//! - **delete**, **copy**, **cut** and **move** that line,
//! - dispatched from key chords with an explicit intercept/pass-through
//!   decision so the host's default handling survives where it should.
//!
//! The cache worker is an independent component on its own control path: it
//! precaches a fixed shell manifest, keeps one named cache generation, and
//! answers GET fetches network-first with cache fallback.
//!
//! ## Modules
//!
//! - [`editor`]: line locator, pure line operations, and the editor shell
//! - [`input`]: key-chord dispatch
//! - [`surface`]: the host surface seam and its owned implementation
//! - [`clipboard`]: the clipboard seam and the system clipboard
//! - [`worker`]: the asset cache worker, its store and its network seam
//! - [`app`]: a demo terminal host wiring the pieces together

pub mod app;
pub mod clipboard;
pub mod editor;
pub mod input;
pub mod surface;
pub mod worker;

/// Re-export commonly used types
pub mod prelude {
    pub use crate::clipboard::{Clipboard, SystemClipboard};
    pub use crate::editor::{LineCommand, LineEditor, LineRange, locate};
    pub use crate::input::{KeyDecision, ShortcutDispatcher};
    pub use crate::surface::{PlainTextSurface, Selection, TextSurface};
    pub use crate::worker::{CacheWorker, WorkerConfig};
}
