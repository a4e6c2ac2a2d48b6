//! commit: record staged changes with a structured message.

use std::io::Write;

use chrono::{DateTime, Utc};

use crate::core::message::{self, build_commit_message};
use crate::engine::error::WorkflowError;
use crate::engine::state::{get_state, requirements};
use crate::engine::step::StepLog;
use crate::git::GitExec;

/// Commit staged changes on the current issue branch.
///
/// `points` is a `::` separated list; the message is the branch name, a
/// blank line, the UTC timestamp `at`, and one `:: ` bullet per point.
/// Input without any point is rejected before git is touched.
pub fn commit<W: Write>(
    git: &dyn GitExec,
    log: &mut StepLog<W>,
    points: &str,
    at: DateTime<Utc>,
) -> Result<(), WorkflowError> {
    message::bullets(points)?;

    let state = get_state(git, log, &requirements::WORK_IN_PROGRESS)?;
    if state.on_default() {
        return Err(WorkflowError::CommitOnDefault(state.default_branch));
    }

    log.step("Generate commit message");
    let message = build_commit_message(&state.current_branch, points, at)?;

    log.step("Commit");
    git.run(&format!("commit -m \"{}\"", message))?;
    Ok(())
}
