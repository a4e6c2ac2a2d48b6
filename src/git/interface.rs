//! git::interface
//!
//! Process-backed git command executor.
//!
//! Every interaction with the repository is a single command line handed to
//! the `git` binary. Arguments are passed as one string and tokenized the
//! way a POSIX shell would (without expansion), so a quoted commit message
//! reaches git as a single argument.
//!
//! # Error Handling
//!
//! - [`GitExec::run_safe`] never fails. Spawn errors and unparseable argument
//!   strings come back as an unsuccessful [`CommandResult`].
//! - [`GitExec::run`] turns an unsuccessful result into a [`CommandFailure`]
//!   whose message carries the invoked arguments and any captured output.

use std::fmt;
use std::path::{Path, PathBuf};
use std::process::Command;

use thiserror::Error;
use tracing::debug;

/// The only remote this tool works against.
pub const REMOTE: &str = "origin";

/// Outcome of a single git invocation.
///
/// Produced once per executed command and consumed immediately by the
/// caller. Output is trimmed of surrounding whitespace.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CommandResult {
    /// Whether git exited with status 0.
    pub success: bool,
    /// Trimmed standard output.
    pub stdout: String,
    /// Trimmed standard error.
    pub stderr: String,
}

impl CommandResult {
    /// A successful result with the given stdout.
    pub fn ok(stdout: impl Into<String>) -> Self {
        Self {
            success: true,
            stdout: stdout.into(),
            stderr: String::new(),
        }
    }

    /// An unsuccessful result with the given stderr.
    pub fn failed(stderr: impl Into<String>) -> Self {
        Self {
            success: false,
            stdout: String::new(),
            stderr: stderr.into(),
        }
    }
}

/// A git command exited non-zero.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub struct CommandFailure {
    /// The argument string that was invoked.
    pub args: String,
    /// Captured stdout.
    pub stdout: String,
    /// Captured stderr.
    pub stderr: String,
}

impl CommandFailure {
    /// Build a failure from the arguments and the captured result.
    pub fn new(args: &str, result: CommandResult) -> Self {
        Self {
            args: args.to_string(),
            stdout: result.stdout,
            stderr: result.stderr,
        }
    }
}

impl fmt::Display for CommandFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Command: git {}", self.args)?;
        if !self.stdout.trim().is_empty() {
            write!(f, "\n{}", self.stdout)?;
        }
        if !self.stderr.trim().is_empty() {
            write!(f, "\n{}", self.stderr)?;
        }
        Ok(())
    }
}

/// Executes git commands.
///
/// Implemented by [`Git`] for real repositories and by
/// [`super::mock::ScriptedGit`] for tests.
pub trait GitExec {
    /// Run a git command, capturing its outcome. Never fails.
    fn run_safe(&self, args: &str) -> CommandResult;

    /// Run a git command, returning stdout or a [`CommandFailure`] for a
    /// non-zero exit.
    fn run(&self, args: &str) -> Result<String, CommandFailure> {
        let result = self.run_safe(args);
        if result.success {
            Ok(result.stdout)
        } else {
            Err(CommandFailure::new(args, result))
        }
    }
}

/// Git executor that spawns the `git` binary in a working directory.
#[derive(Debug, Clone)]
pub struct Git {
    workdir: PathBuf,
}

impl Git {
    /// Create an executor rooted at `workdir`.
    pub fn new(workdir: &Path) -> Self {
        Self {
            workdir: workdir.to_path_buf(),
        }
    }

    /// The directory commands run in.
    pub fn workdir(&self) -> &Path {
        &self.workdir
    }
}

impl GitExec for Git {
    fn run_safe(&self, args: &str) -> CommandResult {
        let argv = match shell_words::split(args) {
            Ok(argv) => argv,
            Err(e) => {
                return CommandResult::failed(format!("cannot parse arguments: {}", e));
            }
        };

        debug!(workdir = %self.workdir.display(), %args, "git");

        let output = match Command::new("git")
            .args(&argv)
            .current_dir(&self.workdir)
            .output()
        {
            Ok(output) => output,
            Err(e) => return CommandResult::failed(format!("failed to run git: {}", e)),
        };

        let result = CommandResult {
            success: output.status.success(),
            stdout: String::from_utf8_lossy(&output.stdout).trim().to_string(),
            stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
        };

        debug!(status = ?output.status.code(), success = result.success, "git exited");
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    mod command_failure {
        use super::*;

        #[test]
        fn message_includes_args_and_output() {
            let err = CommandFailure::new(
                "merge --ff-only origin/main",
                CommandResult {
                    success: false,
                    stdout: "Updating 1234..5678".into(),
                    stderr: "fatal: Not possible to fast-forward, aborting.".into(),
                },
            );
            let msg = err.to_string();
            assert!(msg.starts_with("Command: git merge --ff-only origin/main"));
            assert!(msg.contains("Updating 1234..5678"));
            assert!(msg.contains("Not possible to fast-forward"));
        }

        #[test]
        fn blank_output_is_omitted() {
            let err = CommandFailure::new("fetch --prune", CommandResult::failed("   "));
            assert_eq!(err.to_string(), "Command: git fetch --prune");
        }
    }

    mod process {
        use super::*;

        #[test]
        fn run_returns_trimmed_stdout() {
            let dir = TempDir::new().unwrap();
            let git = Git::new(dir.path());
            let out = git.run("--version").unwrap();
            assert!(out.starts_with("git version"));
            assert!(!out.ends_with('\n'));
        }

        #[test]
        fn run_fails_outside_repository() {
            let dir = TempDir::new().unwrap();
            let git = Git::new(dir.path());
            let err = git.run("rev-parse --abbrev-ref HEAD").unwrap_err();
            assert_eq!(err.args, "rev-parse --abbrev-ref HEAD");
            assert!(!err.stderr.is_empty());
        }

        #[test]
        fn run_safe_reports_unbalanced_quotes() {
            let dir = TempDir::new().unwrap();
            let git = Git::new(dir.path());
            let result = git.run_safe("commit -m \"unterminated");
            assert!(!result.success);
            assert!(result.stderr.contains("cannot parse arguments"));
        }

        #[test]
        fn quoted_argument_is_one_token() {
            let dir = TempDir::new().unwrap();
            let git = Git::new(dir.path());
            git.run("init -q").unwrap();
            git.run("config user.email \"test@example.com\"").unwrap();
            git.run("config user.name \"Test User\"").unwrap();
            git.run("commit --allow-empty -m \"two words\n\nsaid \\\"hi\\\"\"")
                .unwrap();
            let body = git.run("log -1 --format=%B").unwrap();
            assert_eq!(body, "two words\n\nsaid \"hi\"");
        }
    }
}
