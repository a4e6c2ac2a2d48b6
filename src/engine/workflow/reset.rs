//! reset: return to an up-to-date default branch.

use std::io::Write;

use super::{fast_forward, restore_on_err, switch_to};
use crate::engine::error::WorkflowError;
use crate::engine::state::{get_state, requirements};
use crate::engine::step::StepLog;
use crate::git::GitExec;

/// Check out the default branch and fast-forward it.
///
/// Unpushed commits on the current branch are refused unless `force`. A
/// failed fast-forward switches back to the original branch.
pub fn reset<W: Write>(
    git: &dyn GitExec,
    log: &mut StepLog<W>,
    force: bool,
) -> Result<(), WorkflowError> {
    let reqs = if force {
        requirements::CLEAN_TREE
    } else {
        requirements::STRICT
    };
    let state = get_state(git, log, &reqs)?;

    if state.on_default() {
        return fast_forward(git, log, &state.default_branch);
    }

    switch_to(git, log, &state.default_branch)?;
    restore_on_err(
        git,
        &state.current_branch,
        fast_forward(git, log, &state.default_branch),
    )
}
