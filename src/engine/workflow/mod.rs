//! engine::workflow
//!
//! One state machine per user-facing operation.
//!
//! # Shape
//!
//! Every workflow validates the repository with
//! [`get_state`](super::state::get_state) first, then issues its commands
//! in order, announcing each on the step log. Validation never mutates, so
//! a failure there needs no rollback.
//!
//! # Compensation
//!
//! The only compensable mid-sequence failure is a fast-forward merge after
//! switching from the current branch to the default one: the merge leaves
//! the tree untouched, so checking the original branch out again restores
//! the starting point. A rebase failure is never compensated; git is left
//! in conflict-resolution mode for the user.

mod close;
mod commit;
mod reset;
mod stage;
mod switch;
mod sync;

pub use close::{close, CloseOutcome, CONFIRM_PROMPT};
pub use commit::commit;
pub use reset::reset;
pub use stage::{stage, unstage};
pub use switch::switch;
pub use sync::sync;

use std::io::Write;

use shell_words::quote;
use tracing::warn;

use super::error::WorkflowError;
use super::step::StepLog;
use crate::git::{GitExec, REMOTE};

/// Step: check out `branch`.
fn switch_to<W: Write>(
    git: &dyn GitExec,
    log: &mut StepLog<W>,
    branch: &str,
) -> Result<(), WorkflowError> {
    log.step(format!("Switch to '{}'", branch));
    git.run(&format!("checkout {}", quote(branch)))?;
    Ok(())
}

/// Step: fast-forward `default_branch` to its remote counterpart.
///
/// `--ff-only` never enters conflict resolution, so a failure leaves the
/// tree as it was.
fn fast_forward<W: Write>(
    git: &dyn GitExec,
    log: &mut StepLog<W>,
    default_branch: &str,
) -> Result<(), WorkflowError> {
    log.step(format!(
        "Merge '{r}/{d}' into '{d}' (--ff-only)",
        r = REMOTE,
        d = default_branch
    ));
    git.run(&format!(
        "merge --ff-only {}",
        quote(&format!("{}/{}", REMOTE, default_branch))
    ))?;
    Ok(())
}

/// Step: rebase the checked-out branch onto `default_branch`.
fn rebase_onto<W: Write>(
    git: &dyn GitExec,
    log: &mut StepLog<W>,
    default_branch: &str,
    branch: &str,
) -> Result<(), WorkflowError> {
    log.step(format!("Rebase '{}' into '{}'", default_branch, branch));
    git.run(&format!("rebase {}", quote(default_branch)))?;
    Ok(())
}

/// Check `original` out again if `result` is an error.
///
/// The original error is returned either way; a failed checkout is only
/// logged.
fn restore_on_err<T>(
    git: &dyn GitExec,
    original: &str,
    result: Result<T, WorkflowError>,
) -> Result<T, WorkflowError> {
    if let Err(err) = &result {
        let undo = git.run_safe(&format!("checkout {}", quote(original)));
        if !undo.success {
            warn!(
                branch = original,
                error = %err,
                stderr = %undo.stderr,
                "could not switch back after failure"
            );
        }
    }
    result
}
