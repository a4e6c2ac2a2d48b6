//! git
//!
//! Single interface for all Git operations.
//!
//! # Architecture
//!
//! This module is the **ONLY doorway** to Git. Every repository read and
//! write is one invocation of the `git` binary issued through the
//! [`GitExec`] trait. No other module spawns processes.
//!
//! # Responsibilities
//!
//! - Spawn `git` with a fixed argument template and capture its output
//! - Normalize non-zero exits into [`CommandFailure`]
//! - Provide a scripted stand-in ([`mock::ScriptedGit`]) for tests
//!
//! # Invariants
//!
//! - `run_safe` never fails; a spawn error is reported as an unsuccessful result
//! - One command runs at a time; every call blocks until the process exits
//! - This layer performs no rollback; compensation belongs to the workflows
//!
//! # Example
//!
//! ```ignore
//! use sdn::git::{Git, GitExec};
//! use std::path::Path;
//!
//! let git = Git::new(Path::new("."));
//!
//! let branch = git.run("rev-parse --abbrev-ref HEAD")?;
//! let exists = git.run_safe("show-ref refs/remotes/origin/feature").success;
//! ```

mod interface;
pub mod mock;

pub use interface::{CommandFailure, CommandResult, Git, GitExec, REMOTE};
