//! engine::step
//!
//! Numbered progress steps and the failure-capture boundary.
//!
//! # Output
//!
//! ```text
//! Step 0: Fetch, prune, and validate GIT state
//! Step 1: Switch to 'main'
//! Step 2: Merge 'origin/main' into 'main' (--ff-only) [FAILED]
//! Command: git merge --ff-only origin/main
//! fatal: Not possible to fast-forward, aborting.
//! ```
//!
//! A step line is written without its newline and flushed immediately, so
//! it stays visible while a command blocks. The next step (or the end of
//! the workflow) terminates it; a failure rewrites it with a `[FAILED]`
//! marker followed by the reason.
//!
//! # Invariants
//!
//! - At most one step is open
//! - Opening a step closes the previous one as successful
//! - Indices increase monotonically for the lifetime of the log

use std::io::{self, IsTerminal, Stdout, Write};

use crossterm::cursor::MoveToColumn;
use crossterm::queue;
use crossterm::style::{Color, Print, ResetColor, SetForegroundColor};
use crossterm::terminal::{Clear, ClearType};

use super::error::WorkflowError;
use crate::ui::output::Verbosity;

/// How a step ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Pending,
    Success,
    Failed,
}

/// One announced step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Step {
    pub index: usize,
    pub description: String,
    pub outcome: Outcome,
}

/// Step sequencer writing to `W`.
///
/// Workflows receive it by `&mut` reference; nothing about the current step
/// is process-global.
#[derive(Debug)]
pub struct StepLog<W: Write> {
    out: W,
    verbosity: Verbosity,
    styled: bool,
    next_index: usize,
    open: Option<Step>,
    closed: Vec<Step>,
}

impl StepLog<Stdout> {
    /// Log to stdout, styled when stdout is a terminal.
    pub fn stdout(verbosity: Verbosity) -> Self {
        let styled = io::stdout().is_terminal();
        Self::new(io::stdout(), verbosity, styled)
    }
}

impl<W: Write> StepLog<W> {
    pub fn new(out: W, verbosity: Verbosity, styled: bool) -> Self {
        Self {
            out,
            verbosity,
            styled,
            next_index: 0,
            open: None,
            closed: Vec::new(),
        }
    }

    /// Announce a new step, closing the open one as successful.
    pub fn step(&mut self, description: impl Into<String>) {
        self.close(Outcome::Success, None);

        let step = Step {
            index: self.next_index,
            description: description.into(),
            outcome: Outcome::Pending,
        };
        self.next_index += 1;

        if self.verbosity != Verbosity::Quiet {
            let line = step_line(&step);
            // Progress output is best-effort.
            let _ = if self.styled {
                queue!(
                    self.out,
                    SetForegroundColor(Color::Blue),
                    Print(line),
                    ResetColor
                )
            } else {
                write!(self.out, "{}", line)
            };
            let _ = self.out.flush();
        }

        self.open = Some(step);
    }

    /// Run `workflow` inside the capture boundary.
    ///
    /// Returns `Ok(0)` on success and `Ok(1)` on a [`WorkflowError`]. Any
    /// other error marks the open step failed and is returned.
    pub fn capture<F>(&mut self, workflow: F) -> anyhow::Result<u8>
    where
        F: FnOnce(&mut Self) -> anyhow::Result<()>,
    {
        let result = workflow(self);
        self.finish(result)
    }

    /// Close the log with the workflow's result. See [`StepLog::capture`].
    pub fn finish(&mut self, result: anyhow::Result<()>) -> anyhow::Result<u8> {
        match result {
            Ok(()) => {
                self.close(Outcome::Success, None);
                Ok(0)
            }
            Err(err) => match err.downcast_ref::<WorkflowError>() {
                Some(workflow_err) => {
                    let reason = workflow_err.to_string();
                    self.close(Outcome::Failed, Some(&reason));
                    Ok(1)
                }
                None => {
                    self.close(Outcome::Failed, None);
                    Err(err)
                }
            },
        }
    }

    /// The step currently open, if any.
    pub fn open_step(&self) -> Option<&Step> {
        self.open.as_ref()
    }

    /// Steps closed so far, in order.
    pub fn closed_steps(&self) -> &[Step] {
        &self.closed
    }

    /// Descriptions of every announced step, open one included.
    pub fn descriptions(&self) -> Vec<&str> {
        self.closed
            .iter()
            .chain(self.open.iter())
            .map(|s| s.description.as_str())
            .collect()
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn close(&mut self, outcome: Outcome, reason: Option<&str>) {
        let open = self.open.take();
        let quiet = self.verbosity == Verbosity::Quiet;

        let _ = match (&open, outcome) {
            (Some(_), Outcome::Success) if !quiet => writeln!(self.out),
            (_, Outcome::Failed) => self.write_failure(open.as_ref(), reason),
            _ => Ok(()),
        };
        let _ = self.out.flush();

        if let Some(mut step) = open {
            step.outcome = outcome;
            self.closed.push(step);
        }
    }

    fn write_failure(&mut self, step: Option<&Step>, reason: Option<&str>) -> io::Result<()> {
        let quiet = self.verbosity == Verbosity::Quiet;
        let mut text = String::new();
        if let Some(step) = step {
            if quiet || self.styled {
                text.push_str(&step_line(step));
            }
            text.push_str(" [FAILED]\n");
        }
        if let Some(reason) = reason {
            text.push_str(reason.trim_end());
            text.push('\n');
        }

        if self.styled {
            queue!(
                self.out,
                MoveToColumn(0),
                Clear(ClearType::CurrentLine),
                SetForegroundColor(Color::Red),
                Print(text),
                ResetColor
            )
        } else {
            write!(self.out, "{}", text)
        }
    }
}

fn step_line(step: &Step) -> String {
    format!("Step {}: {}", step.index, step.description)
}
