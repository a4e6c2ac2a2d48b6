//! cli::commands
//!
//! Command dispatch and handlers.
//!
//! # Architecture
//!
//! Each command handler:
//! 1. Builds what its workflow needs (git executor, tracker, callbacks)
//! 2. Runs the workflow inside the step log's capture boundary
//! 3. Returns the process exit code
//!
//! Handlers do NOT issue git commands directly.
//!
//! # Async Commands
//!
//! `switch` looks the issue up over HTTP and is async; its handler runs it
//! on a tokio runtime with `block_on`.

mod branch;
mod changes;
mod config_cmd;

pub use branch::{close, reset, switch, sync};
pub use changes::{commit, stage, unstage};
pub use config_cmd::{config, ConfigUpdate};

use anyhow::Result;

use crate::cli::args::Command;
use crate::engine::{Context, StepLog};
use crate::ui::output::Verbosity;

/// Dispatch a command to its handler, returning the exit code.
pub fn dispatch(command: Command, ctx: &Context) -> Result<u8> {
    let mut log = StepLog::stdout(Verbosity::from_flags(ctx.quiet, ctx.debug));

    match command {
        Command::Sync => branch::sync(ctx, &mut log),
        Command::Reset { force } => branch::reset(ctx, &mut log, force),
        Command::Switch { issue } => branch::switch(ctx, &mut log, &issue),
        Command::Close { yes } => branch::close(ctx, &mut log, yes),
        Command::Stage { globs } => changes::stage(ctx, &mut log, &globs),
        Command::Unstage { globs } => changes::unstage(ctx, &mut log, &globs),
        Command::Commit { message } => changes::commit(ctx, &mut log, &message),
        Command::Config {
            base_url,
            prefix,
            username,
            password,
        } => config_cmd::config(
            ctx,
            &mut log,
            ConfigUpdate {
                base_url,
                prefix,
                username,
                password,
            },
        ),
    }
}
