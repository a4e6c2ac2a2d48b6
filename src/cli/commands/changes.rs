//! Working-tree commands: stage, unstage, commit.

use std::io::Write;

use anyhow::Result;
use chrono::Utc;

use crate::engine::workflow;
use crate::engine::{Context, StepLog};

/// Stage `globs`, or everything.
pub fn stage<W: Write>(ctx: &Context, log: &mut StepLog<W>, globs: &[String]) -> Result<u8> {
    log.capture(|log| {
        let git = ctx.git()?;
        workflow::stage(&git, log, globs)?;
        Ok(())
    })
}

/// Unstage `globs`, or everything.
pub fn unstage<W: Write>(ctx: &Context, log: &mut StepLog<W>, globs: &[String]) -> Result<u8> {
    log.capture(|log| {
        let git = ctx.git()?;
        workflow::unstage(&git, log, globs)?;
        Ok(())
    })
}

/// Commit staged changes with a `::` separated list of points.
pub fn commit<W: Write>(ctx: &Context, log: &mut StepLog<W>, message: &str) -> Result<u8> {
    log.capture(|log| {
        let git = ctx.git()?;
        workflow::commit(&git, log, message, Utc::now())?;
        Ok(())
    })
}
