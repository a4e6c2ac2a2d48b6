//! engine
//!
//! Workflow orchestration: validate, then execute step by step.
//!
//! # Architecture
//!
//! ```text
//! get_state (validate, fetch) -> ordered git commands -> [compensate on failure]
//!                     \____________ StepLog ____________/
//! ```
//!
//! - [`state`] - Repository state validation
//! - [`step`] - Numbered progress steps and the failure-capture boundary
//! - [`error`] - Workflow error taxonomy
//! - [`workflow`] - One state machine per command
//!
//! # Invariants
//!
//! - Pre-conditions are checked before any mutation
//! - Commands run one at a time, in order, through [`GitExec`](crate::git::GitExec)
//! - A failed fast-forward after leaving the current branch switches back
//! - Rebase conflicts are handed to the user, never rolled back

pub mod error;
pub mod state;
pub mod step;
pub mod workflow;

pub use error::{ErrorKind, WorkflowError};
pub use state::{get_state, requirements, RepositoryState, StateRequirements};
pub use step::{Outcome, Step, StepLog};

use std::path::PathBuf;

use crate::git::Git;

/// Execution context for commands.
///
/// Contains global settings derived from CLI flags.
#[derive(Debug, Clone)]
pub struct Context {
    /// Working directory override.
    pub cwd: Option<PathBuf>,
    /// Debug logging enabled.
    pub debug: bool,
    /// Quiet mode (minimal output).
    pub quiet: bool,
    /// Interactive mode enabled.
    pub interactive: bool,
}

impl Default for Context {
    fn default() -> Self {
        Self {
            cwd: None,
            debug: false,
            quiet: false,
            interactive: true,
        }
    }
}

impl Context {
    /// Directory git runs in: the override, or the process directory.
    pub fn workdir(&self) -> std::io::Result<PathBuf> {
        match &self.cwd {
            Some(dir) => Ok(dir.clone()),
            None => std::env::current_dir(),
        }
    }

    /// A git executor rooted at [`Context::workdir`].
    pub fn git(&self) -> std::io::Result<Git> {
        Ok(Git::new(&self.workdir()?))
    }
}
