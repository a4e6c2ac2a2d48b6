//! Branch-level commands: sync, reset, switch, close.

use std::io::Write;

use anyhow::Result;
use tracing::{debug, warn};

use crate::core::config::{Config, ConfigError, JiraSettings};
use crate::engine::workflow::{self, CloseOutcome};
use crate::engine::{Context, StepLog, WorkflowError};
use crate::secrets;
use crate::tracker::JiraTracker;
use crate::ui::output::{self, Verbosity};
use crate::ui::prompts::{self, PromptError};

/// Update the current branch from default.
pub fn sync<W: Write>(ctx: &Context, log: &mut StepLog<W>) -> Result<u8> {
    log.capture(|log| {
        let git = ctx.git()?;
        workflow::sync(&git, log)?;
        Ok(())
    })
}

/// Return to an up-to-date default branch.
pub fn reset<W: Write>(ctx: &Context, log: &mut StepLog<W>, force: bool) -> Result<u8> {
    log.capture(|log| {
        let git = ctx.git()?;
        workflow::reset(&git, log, force)?;
        Ok(())
    })
}

/// Switch to the branch for a Jira issue.
///
/// Configuration and the password are resolved before git is touched.
pub fn switch<W: Write>(ctx: &Context, log: &mut StepLog<W>, issue: &str) -> Result<u8> {
    log.capture(|log| {
        let settings = jira_settings()?;
        let tracker = JiraTracker::new(&settings);
        let git = ctx.git()?;

        let rt = tokio::runtime::Runtime::new()?;
        rt.block_on(workflow::switch(
            &git,
            log,
            &tracker,
            issue,
            &settings.default_issue_prefix,
        ))?;
        Ok(())
    })
}

/// Squash, push, and delete the current branch.
///
/// Without `yes`, asks first; a non-interactive session declines.
pub fn close<W: Write>(ctx: &Context, log: &mut StepLog<W>, yes: bool) -> Result<u8> {
    let interactive = ctx.interactive;
    let verbosity = Verbosity::from_flags(ctx.quiet, ctx.debug);

    log.capture(|log| {
        let git = ctx.git()?;
        let outcome = workflow::close(&git, log, |question| yes || confirm(question, interactive))?;
        if outcome == CloseOutcome::Declined {
            output::print("Nothing changed.", verbosity);
        }
        Ok(())
    })
}

fn jira_settings() -> Result<JiraSettings, WorkflowError> {
    let config = Config::load()?;
    let store = secrets::create_store(config.secrets_provider()).map_err(ConfigError::from)?;
    Ok(config.jira_settings(store.as_ref())?)
}

fn confirm(question: &str, interactive: bool) -> bool {
    match prompts::confirm(question, interactive) {
        Ok(answer) => answer,
        Err(PromptError::NotInteractive) => {
            debug!("not interactive, treating confirmation as declined");
            false
        }
        Err(e) => {
            warn!(error = %e, "could not read confirmation");
            false
        }
    }
}
