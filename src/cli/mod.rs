//! cli
//!
//! Command-line interface layer for sdn.
//!
//! # Responsibilities
//!
//! - Parse command-line arguments and global flags
//! - Delegate to command handlers
//! - Does NOT issue git commands directly
//!
//! # Architecture
//!
//! The CLI layer is thin. It parses arguments via clap and dispatches to the
//! [`crate::engine`] workflows, which run inside the step log's capture
//! boundary and yield the exit code.

pub mod args;
pub mod commands;

pub use args::Cli;

use crate::engine;
use anyhow::Result;

/// Run the CLI application.
///
/// This is the main entry point called from `main.rs`. Returns the process
/// exit code: 0 on success, 1 on a reported workflow failure.
pub fn run(cli: Cli) -> Result<u8> {
    let ctx = engine::Context {
        cwd: cli.workdir(),
        debug: cli.debug,
        quiet: cli.quiet,
        interactive: cli.interactive(),
    };

    commands::dispatch(cli.command, &ctx)
}
