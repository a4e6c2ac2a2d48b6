//! switch: start (or resume) work on an issue branch.

use std::io::Write;

use shell_words::quote;

use super::{fast_forward, rebase_onto, restore_on_err, switch_to};
use crate::core::naming::{branch_name_for_issue, qualify_issue_key};
use crate::engine::error::WorkflowError;
use crate::engine::state::{get_state, remote_branch_exists, requirements};
use crate::engine::step::StepLog;
use crate::git::GitExec;
use crate::tracker::IssueTracker;

/// Switch to the branch for `issue`, creating it from an up-to-date default
/// branch if it does not exist locally.
///
/// The branch is named `<KEY>-<summary>` from the tracker's summary. A bare
/// issue number is qualified with `default_prefix`. An existing local branch
/// is rebased onto default.
///
/// A failed fast-forward switches back to the original branch. A failed
/// rebase is left to the user.
pub async fn switch<W: Write>(
    git: &dyn GitExec,
    log: &mut StepLog<W>,
    tracker: &dyn IssueTracker,
    issue: &str,
    default_prefix: &str,
) -> Result<(), WorkflowError> {
    let state = get_state(git, log, &requirements::CLEAN_TREE)?;

    log.step("Get new branch name from JIRA");
    let key = qualify_issue_key(issue, default_prefix)?;
    let summary = tracker.issue_summary(&key).await?;
    let new_branch = branch_name_for_issue(&key, &summary)?;
    let new_branch = new_branch.as_str();

    log.step("Verify new branch does not exist in remote");
    if remote_branch_exists(git, new_branch) {
        return Err(WorkflowError::NewBranchCollision(new_branch.to_string()));
    }

    switch_to(git, log, &state.default_branch)?;
    let exists = restore_on_err(
        git,
        &state.current_branch,
        update_and_probe(git, log, &state.default_branch, new_branch),
    )?;

    if exists {
        switch_to_existing(git, log, &state.default_branch, new_branch)
    } else {
        log.step(format!("Create new branch '{}'", new_branch));
        git.run(&format!("checkout -b {}", quote(new_branch)))?;
        Ok(())
    }
}

/// Fast-forward default, then report whether `branch` exists locally.
fn update_and_probe<W: Write>(
    git: &dyn GitExec,
    log: &mut StepLog<W>,
    default_branch: &str,
    branch: &str,
) -> Result<bool, WorkflowError> {
    fast_forward(git, log, default_branch)?;

    log.step("Check if target branch already exists locally");
    Ok(git
        .run_safe(&format!(
            "show-ref --verify --quiet {}",
            quote(&format!("refs/heads/{}", branch))
        ))
        .success)
}

fn switch_to_existing<W: Write>(
    git: &dyn GitExec,
    log: &mut StepLog<W>,
    default_branch: &str,
    branch: &str,
) -> Result<(), WorkflowError> {
    log.step(format!("Switch to existing '{}'", branch));
    git.run(&format!("checkout {}", quote(branch)))?;
    rebase_onto(git, log, default_branch, branch)
}

#[cfg(test)]
mod tests {
    use super::super::test_support::{log, mutations};
    use super::*;
    use crate::engine::error::ErrorKind;
    use crate::git::mock::ScriptedGit;
    use crate::tracker::MockTracker;

    const BRANCH: &str = "SEDONA-42-Fix-login-SSO-bug";

    fn tracker() -> MockTracker {
        MockTracker::new().with_issue("SEDONA-42", "Fix login (SSO) bug")
    }

    #[tokio::test]
    async fn creates_new_branch_from_default() {
        let git = ScriptedGit::new("main", "feature");
        let mut log = log();
        switch(&git, &mut log, &tracker(), "42", "SEDONA").await.unwrap();

        assert_eq!(
            mutations(&git.calls()),
            vec![
                "checkout main",
                "merge --ff-only origin/main",
                "checkout -b SEDONA-42-Fix-login-SSO-bug",
            ]
        );
        assert!(git.was_called(&format!("show-ref refs/remotes/origin/{}", BRANCH)));
        assert_eq!(git.head(), BRANCH);
        assert_eq!(
            log.descriptions()[1..],
            [
                "Get new branch name from JIRA",
                "Verify new branch does not exist in remote",
                "Switch to 'main'",
                "Merge 'origin/main' into 'main' (--ff-only)",
                "Check if target branch already exists locally",
                "Create new branch 'SEDONA-42-Fix-login-SSO-bug'",
            ]
        );
    }

    #[tokio::test]
    async fn qualified_key_is_looked_up_verbatim() {
        let git = ScriptedGit::new("main", "main");
        let tracker = tracker();
        switch(&git, &mut log(), &tracker, "SEDONA-42", "OPS").await.unwrap();
        assert_eq!(tracker.lookups(), vec!["SEDONA-42"]);
    }

    #[tokio::test]
    async fn existing_branch_is_rebased() {
        let git = ScriptedGit::new("main", "main");
        git.succeed(&format!("show-ref --verify --quiet refs/heads/{}", BRANCH), "");
        let mut log = log();
        switch(&git, &mut log, &tracker(), "42", "SEDONA").await.unwrap();

        assert_eq!(
            mutations(&git.calls()),
            vec![
                "checkout main",
                "merge --ff-only origin/main",
                "checkout SEDONA-42-Fix-login-SSO-bug",
                "rebase main",
            ]
        );
        assert_eq!(
            log.open_step().unwrap().description,
            "Rebase 'main' into 'SEDONA-42-Fix-login-SSO-bug'"
        );
    }

    #[tokio::test]
    async fn remote_collision_stops_before_mutation() {
        let git = ScriptedGit::new("main", "feature");
        git.succeed(&format!("show-ref refs/remotes/origin/{}", BRANCH), "abc");
        let err = switch(&git, &mut log(), &tracker(), "42", "SEDONA")
            .await
            .unwrap_err();

        assert_eq!(
            err.to_string(),
            format!(
                "New branch '{}' already exists in remote. Delete it from remote before proceeding.",
                BRANCH
            )
        );
        assert!(mutations(&git.calls()).is_empty());
    }

    #[tokio::test]
    async fn tracker_failure_is_external_service() {
        let git = ScriptedGit::new("main", "feature");
        let err = switch(&git, &mut log(), &tracker(), "7", "SEDONA")
            .await
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ExternalService);
        assert!(mutations(&git.calls()).is_empty());
    }

    #[tokio::test]
    async fn malformed_issue_is_invalid_input() {
        let git = ScriptedGit::new("main", "feature");
        let err = switch(&git, &mut log(), &tracker(), "4/2", "SEDONA")
            .await
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidInput);
    }

    #[tokio::test]
    async fn failed_fast_forward_returns_to_current() {
        let git = ScriptedGit::new("main", "feature");
        git.fail("merge --ff-only origin/main", "fatal: Not possible to fast-forward");

        assert!(switch(&git, &mut log(), &tracker(), "42", "SEDONA")
            .await
            .is_err());
        assert_eq!(git.head(), "feature");
        assert!(!git.was_called(&format!("checkout -b {}", BRANCH)));
    }

    #[tokio::test]
    async fn dirty_tree_rejected_before_lookup() {
        let git = ScriptedGit::new("main", "feature");
        git.succeed("status --porcelain", "?? new.txt");
        let tracker = tracker();
        let err = switch(&git, &mut log(), &tracker, "42", "SEDONA")
            .await
            .unwrap_err();
        assert!(matches!(err, WorkflowError::UncommittedChanges));
        assert!(tracker.lookups().is_empty());
    }
}
