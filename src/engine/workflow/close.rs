//! close: squash, push, and retire an issue branch.
//!
//! Once the soft reset has run there is no automatic recovery; everything
//! that can be checked is checked before it.

use std::io::Write;

use shell_words::quote;

use super::{fast_forward, switch_to};
use crate::core::message::{parse_and_validate, render};
use crate::engine::error::WorkflowError;
use crate::engine::state::{get_state, requirements};
use crate::engine::step::StepLog;
use crate::git::{GitExec, REMOTE};

/// Question put to the user before closing.
pub const CONFIRM_PROMPT: &str = "Are you sure you want to push and delete this branch?";

/// How a close ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CloseOutcome {
    /// The branch was squashed, pushed, and deleted.
    Closed,
    /// The user did not confirm; nothing ran.
    Declined,
}

/// Squash the unpushed commits of the current branch into one, push it,
/// fast-forward default, and delete the local branch.
///
/// `confirm` is asked [`CONFIRM_PROMPT`] before anything runs.
pub fn close<W, F>(
    git: &dyn GitExec,
    log: &mut StepLog<W>,
    confirm: F,
) -> Result<CloseOutcome, WorkflowError>
where
    W: Write,
    F: FnOnce(&str) -> bool,
{
    if !confirm(CONFIRM_PROMPT) {
        return Ok(CloseOutcome::Declined);
    }

    let state = get_state(git, log, &requirements::CLEAN_TREE)?;
    if state.on_default() {
        return Err(WorkflowError::CloseDefault(state.default_branch));
    }
    let (default, current) = (&state.default_branch, &state.current_branch);

    log.step("Get unpushed commit messages");
    let raw_log = git.run(&format!(
        "log --format=\"%B%x00\" {}..HEAD",
        quote(default)
    ))?;

    log.step("Parse and validate messages");
    let segments = parse_and_validate(&raw_log)?;
    let message = render(current, &segments);

    log.step("Get last pushed commit hash");
    let base = git.run(&format!("merge-base HEAD {}", quote(default)))?;

    log.step("Strip unpushed commits");
    git.run(&format!("reset --soft {}", quote(&base)))?;

    log.step("Add new squashed commit");
    git.run(&format!("commit -m \"{}\"", message))?;

    log.step("Push");
    git.run(&format!("push -u {} {}", REMOTE, quote(current)))?;

    switch_to(git, log, default)?;
    fast_forward(git, log, default)?;

    log.step(format!("Delete '{}'", current));
    git.run(&format!("branch -D {}", quote(current)))?;

    Ok(CloseOutcome::Closed)
}

#[cfg(test)]
mod tests {
    use super::super::test_support::{log, mutations};
    use super::*;
    use crate::engine::error::ErrorKind;
    use crate::git::mock::ScriptedGit;

    const BRANCH: &str = "SEDONA-9-Close-me";
    const LOG_CMD: &str = "log --format=\"%B%x00\" main..HEAD";

    fn two_commits() -> String {
        format!(
            "{b}\n\n2026-10-02 09:00:00 UTC\n:: second point here\n\0\n\
             {b}\n\n2026-10-01 09:00:00 UTC\n:: first point here\n:: and another one\n\0\n",
            b = BRANCH
        )
    }

    fn repo() -> ScriptedGit {
        let git = ScriptedGit::new("main", BRANCH);
        git.succeed(LOG_CMD, &two_commits());
        git.succeed("merge-base HEAD main", "abc123");
        git
    }

    #[test]
    fn squashes_pushes_and_deletes() {
        let git = repo();
        let mut log = log();
        assert_eq!(close(&git, &mut log, |_| true).unwrap(), CloseOutcome::Closed);

        let expected_message = format!(
            "{}\n\n2026-10-02 09:00:00 UTC\n:: second point here\n\n\
             2026-10-01 09:00:00 UTC\n:: first point here\n:: and another one",
            BRANCH
        );
        assert_eq!(
            mutations(&git.calls()),
            vec![
                LOG_CMD.to_string(),
                "merge-base HEAD main".to_string(),
                "reset --soft abc123".to_string(),
                format!("commit -m \"{}\"", expected_message),
                format!("push -u origin {}", BRANCH),
                "checkout main".to_string(),
                "merge --ff-only origin/main".to_string(),
                format!("branch -D {}", BRANCH),
            ]
        );
        assert_eq!(git.head(), "main");
        assert_eq!(
            log.open_step().unwrap().description,
            format!("Delete '{}'", BRANCH)
        );
    }

    #[test]
    fn declined_runs_nothing() {
        let git = repo();
        let mut log = log();
        let mut asked = None;
        let outcome = close(&git, &mut log, |q| {
            asked = Some(q.to_string());
            false
        })
        .unwrap();

        assert_eq!(outcome, CloseOutcome::Declined);
        assert_eq!(asked.as_deref(), Some(CONFIRM_PROMPT));
        assert!(git.calls().is_empty());
        assert!(log.descriptions().is_empty());
    }

    #[test]
    fn default_branch_rejected() {
        let git = ScriptedGit::new("main", "main");
        let err = close(&git, &mut log(), |_| true).unwrap_err();
        assert_eq!(err.to_string(), "Cannot close default branch 'main'");
        assert!(mutations(&git.calls()).is_empty());
    }

    #[test]
    fn invalid_history_stops_before_reset() {
        let git = ScriptedGit::new("main", BRANCH);
        git.succeed(LOG_CMD, &format!("{}\n\nwip\0", BRANCH));

        let err = close(&git, &mut log(), |_| true).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidInput);
        assert!(err.to_string().starts_with("Found invalid unpushed commit message:"));
        assert!(!git.was_called("reset --soft abc123"));
        assert_eq!(mutations(&git.calls()), vec![LOG_CMD]);
    }

    #[test]
    fn nothing_to_squash() {
        let git = ScriptedGit::new("main", BRANCH);
        let err = close(&git, &mut log(), |_| true).unwrap_err();
        assert_eq!(err.to_string(), "No unpushed commit messages found");
    }

    #[test]
    fn failed_push_is_surfaced_not_repaired() {
        let git = repo();
        git.fail(&format!("push -u origin {}", BRANCH), "rejected");
        let err = close(&git, &mut log(), |_| true).unwrap_err();

        assert_eq!(err.kind(), ErrorKind::Command);
        assert_eq!(git.head(), BRANCH);
        assert!(!git.was_called("checkout main"));
    }
}
