//! engine::state
//!
//! Repository state validation.
//!
//! [`get_state`] runs a fixed sequence of git commands to learn the default
//! and current branch, fails fast on the first unmet pre-condition, and
//! always fetches as a side effect. Nothing here mutates the working tree,
//! so a validation failure never needs rollback.

use std::io::Write;
use std::sync::OnceLock;

use regex::Regex;
use shell_words::quote;

use super::error::WorkflowError;
use super::step::StepLog;
use crate::git::{GitExec, REMOTE};

/// Step description used for validation.
pub const VALIDATE_STEP: &str = "Fetch, prune, and validate GIT state";

/// What the repository looks like right now.
///
/// Derived fresh on every call; never cached.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepositoryState {
    /// Branch advertised as HEAD by the remote.
    pub default_branch: String,
    /// Checked-out branch.
    pub current_branch: String,
}

impl RepositoryState {
    /// Whether the default branch is checked out.
    pub fn on_default(&self) -> bool {
        self.default_branch == self.current_branch
    }
}

/// Pre-conditions a workflow relaxes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StateRequirements {
    /// Name for diagnostics.
    pub name: &'static str,
    /// Tolerate commits on the current branch that are not on its upstream.
    pub allow_unpushed_on_current: bool,
    /// Tolerate a dirty working tree or index.
    pub allow_uncommitted_changes: bool,
}

impl StateRequirements {
    pub const fn new(
        name: &'static str,
        allow_unpushed_on_current: bool,
        allow_uncommitted_changes: bool,
    ) -> Self {
        Self {
            name,
            allow_unpushed_on_current,
            allow_uncommitted_changes,
        }
    }
}

/// Standard requirement sets.
pub mod requirements {
    use super::StateRequirements;

    /// Clean tree, nothing unpushed anywhere. `reset` without `--force`.
    pub const STRICT: StateRequirements = StateRequirements::new("strict", false, false);

    /// Clean tree; unpushed work on the current branch is fine.
    /// `sync`, `switch`, `close`, and `reset --force`.
    pub const CLEAN_TREE: StateRequirements = StateRequirements::new("clean-tree", true, false);

    /// Work in progress allowed. `stage`, `unstage`, and `commit`.
    pub const WORK_IN_PROGRESS: StateRequirements =
        StateRequirements::new("work-in-progress", true, true);
}

fn head_branch_pattern() -> Option<&'static Regex> {
    static PATTERN: OnceLock<Option<Regex>> = OnceLock::new();
    PATTERN
        .get_or_init(|| Regex::new(r"HEAD branch: (\S+)").ok())
        .as_ref()
}

/// Validate the repository and return its state.
///
/// Opens the validation step on `log`. Checks, in order: current branch,
/// remote default branch, clean tree, fetch, remote collision for the
/// current branch, unpushed commits on default, unpushed commits on current.
pub fn get_state<W: Write>(
    git: &dyn GitExec,
    log: &mut StepLog<W>,
    reqs: &StateRequirements,
) -> Result<RepositoryState, WorkflowError> {
    log.step(VALIDATE_STEP);
    tracing::debug!(requirements = reqs.name, "validating repository state");

    let current_branch = git.run("rev-parse --abbrev-ref HEAD")?;
    if current_branch == "HEAD" {
        return Err(WorkflowError::DetachedHead);
    }

    let remote_show = git.run(&format!("remote show {}", REMOTE))?;
    let default_branch = head_branch_pattern()
        .and_then(|pattern| pattern.captures(&remote_show))
        .and_then(|c| c.get(1))
        .map(|m| m.as_str().to_string())
        .ok_or(WorkflowError::NoDefaultBranch)?;

    if !reqs.allow_uncommitted_changes && !git.run("status --porcelain")?.trim().is_empty() {
        return Err(WorkflowError::UncommittedChanges);
    }

    git.run("fetch --prune")?;

    let state = RepositoryState {
        default_branch,
        current_branch,
    };

    if !state.on_default() && remote_branch_exists(git, &state.current_branch) {
        return Err(WorkflowError::RemoteBranchCollision(state.current_branch));
    }

    if has_unpushed_commits(git, &state.default_branch, &state.default_branch)? {
        return Err(WorkflowError::UnpushedOnDefault(state.default_branch));
    }

    if !state.on_default()
        && !reqs.allow_unpushed_on_current
        && has_unpushed_commits(git, &state.current_branch, &state.default_branch)?
    {
        return Err(WorkflowError::UnpushedOnCurrent(state.current_branch));
    }

    Ok(state)
}

/// Whether `origin/<branch>` exists.
pub fn remote_branch_exists(git: &dyn GitExec, branch: &str) -> bool {
    git.run_safe(&format!(
        "show-ref {}",
        quote(&format!("refs/remotes/{}/{}", REMOTE, branch))
    ))
        .success
}

/// Whether `branch` has commits its upstream lacks. Without an upstream,
/// whether its tip differs from the remote default branch.
fn has_unpushed_commits(
    git: &dyn GitExec,
    branch: &str,
    default_branch: &str,
) -> Result<bool, WorkflowError> {
    let branch = quote(branch);
    let has_upstream = git
        .run_safe(&format!("rev-parse --abbrev-ref {}@{{u}}", branch))
        .success;

    if has_upstream {
        let unpushed = git.run(&format!("rev-list {b}@{{u}}..{b}", b = branch))?;
        Ok(!unpushed.trim().is_empty())
    } else {
        let local = git.run(&format!("rev-parse {}", branch))?;
        let remote = git.run(&format!(
            "rev-parse {}",
            quote(&format!("{}/{}", REMOTE, default_branch))
        ))?;
        Ok(local != remote)
    }
}
