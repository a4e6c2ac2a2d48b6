//! sync: bring the current branch up to date with the default branch.

use std::io::Write;

use shell_words::quote;

use super::{fast_forward, rebase_onto, restore_on_err, switch_to};
use crate::engine::error::WorkflowError;
use crate::engine::state::{get_state, requirements};
use crate::engine::step::StepLog;
use crate::git::GitExec;

/// On default: fast-forward it. Elsewhere: fast-forward default, return to
/// the current branch, and rebase it onto default.
///
/// A failed fast-forward switches back to the current branch. A failed
/// rebase is left to the user.
pub fn sync<W: Write>(git: &dyn GitExec, log: &mut StepLog<W>) -> Result<(), WorkflowError> {
    let state = get_state(git, log, &requirements::CLEAN_TREE)?;
    let (default, current) = (&state.default_branch, &state.current_branch);

    if state.on_default() {
        return fast_forward(git, log, default);
    }

    switch_to(git, log, default)?;
    restore_on_err(git, current, fast_forward(git, log, default))?;

    log.step(format!("Switch back to '{}'", current));
    git.run(&format!("checkout {}", quote(current)))?;

    rebase_onto(git, log, default, current)
}
