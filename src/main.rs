//! Linekeys - line-editing shortcuts for a terminal textarea.
//!
//! # Usage
//!
//! ```bash
//! linekeys notes.txt
//! linekeys            # scratch buffer
//! ```

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;

use linekeys::app::App;

/// Line-editing keyboard shortcuts over a plain-text surface
#[derive(Parser, Debug)]
#[command(name = "linekeys", version, about, long_about = None)]
struct Cli {
    /// Text file to edit (scratch buffer when omitted)
    #[arg(value_name = "FILE")]
    file: Option<PathBuf>,
}

fn main() -> Result<()> {
    // Initialize logging; stderr so diagnostics don't tear the UI.
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::WARN.into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    App::new(cli.file).run().context("Application error")
}
