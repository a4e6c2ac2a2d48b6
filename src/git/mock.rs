//! git::mock
//!
//! Scripted git executor for deterministic testing.
//!
//! # Design
//!
//! `ScriptedGit` answers commands from a table of scripted responses and
//! records every invocation in order. Without a script it behaves like a
//! clean, fully pushed repository whose remote advertises `default` as its
//! HEAD branch:
//!
//! - `rev-parse --abbrev-ref HEAD` answers the simulated checked-out branch
//! - `remote show origin` advertises the default branch
//! - `show-ref ...` fails (no such ref)
//! - every other command succeeds with empty output
//!
//! A successful `checkout <branch>` or `checkout -b <branch>` moves the
//! simulated HEAD, so tests can assert which branch a workflow left checked
//! out.
//!
//! # Example
//!
//! ```
//! use sdn::git::mock::ScriptedGit;
//! use sdn::git::{CommandResult, GitExec};
//!
//! let git = ScriptedGit::new("main", "feature");
//! git.respond("merge --ff-only origin/main", CommandResult::failed("diverged"));
//!
//! assert_eq!(git.run("rev-parse --abbrev-ref HEAD").unwrap(), "feature");
//! assert!(git.run("merge --ff-only origin/main").is_err());
//! assert_eq!(git.calls().len(), 2);
//! ```

use std::sync::{Arc, Mutex, MutexGuard};

use super::interface::{CommandResult, GitExec, REMOTE};

/// Scripted git executor.
///
/// Thread-safe via internal `Arc<Mutex<...>>` wrapping; clones share state.
#[derive(Debug, Clone)]
pub struct ScriptedGit {
    inner: Arc<Mutex<ScriptedGitInner>>,
}

#[derive(Debug)]
struct ScriptedGitInner {
    /// Branch the remote advertises as HEAD.
    default_branch: String,
    /// Simulated checked-out branch.
    head: String,
    /// Scripted responses; later entries win.
    responses: Vec<(String, CommandResult)>,
    /// Every invocation, in order.
    calls: Vec<String>,
}

impl ScriptedGit {
    /// A clean repository with `current` checked out and `default` as the
    /// remote's HEAD branch.
    pub fn new(default: &str, current: &str) -> Self {
        Self {
            inner: Arc::new(Mutex::new(ScriptedGitInner {
                default_branch: default.to_string(),
                head: current.to_string(),
                responses: Vec::new(),
                calls: Vec::new(),
            })),
        }
    }

    fn lock(&self) -> MutexGuard<'_, ScriptedGitInner> {
        // A panicking test thread must not hide the recorded calls.
        match self.inner.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        }
    }

    /// Script the result of an exact argument string.
    pub fn respond(&self, args: &str, result: CommandResult) -> &Self {
        self.lock().responses.push((args.to_string(), result));
        self
    }

    /// Script a failure with the given stderr.
    pub fn fail(&self, args: &str, stderr: &str) -> &Self {
        self.respond(args, CommandResult::failed(stderr))
    }

    /// Script a success with the given stdout.
    pub fn succeed(&self, args: &str, stdout: &str) -> &Self {
        self.respond(args, CommandResult::ok(stdout))
    }

    /// Every invocation so far, in order.
    pub fn calls(&self) -> Vec<String> {
        self.lock().calls.clone()
    }

    /// Whether `args` was invoked.
    pub fn was_called(&self, args: &str) -> bool {
        self.lock().calls.iter().any(|c| c == args)
    }

    /// Number of times `args` was invoked.
    pub fn count(&self, args: &str) -> usize {
        self.lock().calls.iter().filter(|c| *c == args).count()
    }

    /// The simulated checked-out branch.
    pub fn head(&self) -> String {
        self.lock().head.clone()
    }
}

impl GitExec for ScriptedGit {
    fn run_safe(&self, args: &str) -> CommandResult {
        let mut inner = self.lock();
        inner.calls.push(args.to_string());

        let scripted = inner
            .responses
            .iter()
            .rev()
            .find(|(pattern, _)| pattern == args)
            .map(|(_, result)| result.clone());

        let result = match scripted {
            Some(result) => result,
            None if args == "rev-parse --abbrev-ref HEAD" => CommandResult::ok(inner.head.clone()),
            None if args == format!("remote show {}", REMOTE) => CommandResult::ok(format!(
                "* remote {}\n  Fetch URL: ../origin.git\n  HEAD branch: {}",
                REMOTE, inner.default_branch
            )),
            None if args.starts_with("show-ref") => CommandResult::failed(""),
            None => CommandResult::ok(""),
        };

        if result.success {
            if let Some(target) = checkout_target(args) {
                inner.head = target;
            }
        }

        result
    }
}

/// The branch a `checkout [-b] <branch>` would leave checked out, read the
/// way [`super::Git`] tokenises arguments.
fn checkout_target(args: &str) -> Option<String> {
    let argv = shell_words::split(args).ok()?;
    match argv.as_slice() {
        [cmd, flag, target] if cmd == "checkout" && flag == "-b" => Some(target.clone()),
        [cmd, target] if cmd == "checkout" => Some(target.clone()),
        _ => None,
    }
}
