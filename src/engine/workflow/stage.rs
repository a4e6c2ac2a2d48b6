//! stage / unstage: add or reset paths on an issue branch.

use std::io::Write;

use crate::engine::error::WorkflowError;
use crate::engine::state::{get_state, requirements};
use crate::engine::step::StepLog;
use crate::git::GitExec;

/// Stage `globs`, or everything when empty.
pub fn stage<W: Write>(
    git: &dyn GitExec,
    log: &mut StepLog<W>,
    globs: &[String],
) -> Result<(), WorkflowError> {
    apply(git, log, "add", "Add", globs)
}

/// Unstage `globs`, or everything when empty.
pub fn unstage<W: Write>(
    git: &dyn GitExec,
    log: &mut StepLog<W>,
    globs: &[String],
) -> Result<(), WorkflowError> {
    apply(git, log, "reset", "Reset", globs)
}

fn apply<W: Write>(
    git: &dyn GitExec,
    log: &mut StepLog<W>,
    command: &str,
    verb: &str,
    globs: &[String],
) -> Result<(), WorkflowError> {
    let state = get_state(git, log, &requirements::WORK_IN_PROGRESS)?;
    if state.on_default() {
        return Err(WorkflowError::StageOnDefault(state.default_branch));
    }

    let paths = if globs.is_empty() {
        log.step(format!("{} all changes", verb));
        ".".to_string()
    } else {
        log.step(format!("{} specified changes", verb));
        shell_words::join(globs)
    };

    git.run(&format!("{} {}", command, paths))?;
    Ok(())
}
