//! engine::error
//!
//! Workflow error taxonomy.
//!
//! Every failure a workflow anticipates is a [`WorkflowError`]. The step
//! logger reports these as a single red line and exits 1; anything else is
//! treated as a bug and propagated.

use thiserror::Error;

use crate::core::config::ConfigError;
use crate::core::message::MessageError;
use crate::core::types::TypeError;
use crate::git::CommandFailure;
use crate::tracker::TrackerError;

/// Coarse classification of a [`WorkflowError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// A pre-condition on the repository was not met.
    Validation,
    /// A git command exited non-zero.
    Command,
    /// Malformed user input or recorded commit messages.
    InvalidInput,
    /// The issue tracker failed or answered nonsense.
    ExternalService,
    /// Configuration is missing or invalid.
    Configuration,
}

/// Descriptive workflow failures.
#[derive(Debug, Error)]
pub enum WorkflowError {
    #[error("Could not identify default branch")]
    NoDefaultBranch,

    #[error("HEAD is detached. Check out a branch before proceeding.")]
    DetachedHead,

    #[error("Uncommitted changes detected. Stash or commit before proceeding.")]
    UncommittedChanges,

    #[error("Current branch '{0}' already exists in remote. Delete it from remote before proceeding.")]
    RemoteBranchCollision(String),

    #[error("New branch '{0}' already exists in remote. Delete it from remote before proceeding.")]
    NewBranchCollision(String),

    #[error("Unpushed commits detected on default branch '{0}'. Commits should never be made on the default branch. Please remediate manually.")]
    UnpushedOnDefault(String),

    #[error("Unpushed commits detected on current branch '{0}'. Either close the branch or rerun this command with the --force option.")]
    UnpushedOnCurrent(String),

    #[error("Cannot stage/unstage on default branch '{0}'")]
    StageOnDefault(String),

    #[error("Cannot commit on default branch '{0}'")]
    CommitOnDefault(String),

    #[error("Cannot close default branch '{0}'")]
    CloseDefault(String),

    #[error(transparent)]
    Command(#[from] CommandFailure),

    #[error(transparent)]
    Message(#[from] MessageError),

    #[error(transparent)]
    Name(#[from] TypeError),

    #[error(transparent)]
    Tracker(#[from] TrackerError),

    #[error(transparent)]
    Config(#[from] ConfigError),
}

impl WorkflowError {
    /// The taxonomy bucket this error falls in.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::NoDefaultBranch
            | Self::DetachedHead
            | Self::UncommittedChanges
            | Self::RemoteBranchCollision(_)
            | Self::NewBranchCollision(_)
            | Self::UnpushedOnDefault(_)
            | Self::UnpushedOnCurrent(_)
            | Self::StageOnDefault(_)
            | Self::CommitOnDefault(_)
            | Self::CloseDefault(_) => ErrorKind::Validation,
            Self::Command(_) => ErrorKind::Command,
            Self::Message(_) | Self::Name(_) => ErrorKind::InvalidInput,
            Self::Tracker(_) => ErrorKind::ExternalService,
            Self::Config(_) => ErrorKind::Configuration,
        }
    }
}
