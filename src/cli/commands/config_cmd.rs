//! config command - Create or update the configuration file
//!
//! # Modes
//!
//! - No flags: ask for every value. Existing valid values are shown and a
//!   blank answer keeps them; missing values are required.
//! - Any flag: update only what was given. `--password` asks for the
//!   password (masked).
//!
//! Answers are collected and validated before anything is written.

use std::io::Write;

use anyhow::Result;
use tracing::warn;

use crate::core::config::schema::is_valid_base_url;
use crate::core::config::{Config, ConfigError, FileConfig, JiraConfig, JIRA_PASSWORD_KEY};
use crate::core::naming::is_valid_prefix;
use crate::engine::{Context, StepLog, WorkflowError};
use crate::secrets::{self, SecretStore};
use crate::ui::prompts::{self, PromptError};

/// Values given on the command line.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConfigUpdate {
    pub base_url: Option<String>,
    pub prefix: Option<String>,
    pub username: Option<String>,
    /// Ask for the password.
    pub password: bool,
}

impl ConfigUpdate {
    /// Whether no flag was given.
    pub fn is_empty(&self) -> bool {
        self.base_url.is_none() && self.prefix.is_none() && self.username.is_none() && !self.password
    }

    /// Copy the given values into `file`.
    fn apply_to(&self, file: &mut FileConfig) {
        let jira = file.jira.get_or_insert_with(JiraConfig::default);
        if let Some(url) = &self.base_url {
            jira.base_url = Some(url.trim().to_string());
        }
        if let Some(prefix) = &self.prefix {
            jira.default_issue_prefix = Some(prefix.trim().to_string());
        }
        if let Some(username) = &self.username {
            jira.username = Some(username.trim().to_string());
        }
    }
}

/// Create or update the configuration file.
pub fn config<W: Write>(ctx: &Context, log: &mut StepLog<W>, update: ConfigUpdate) -> Result<u8> {
    log.capture(|log| {
        let existing = match Config::load_for_edit() {
            Ok(config) => config,
            Err(e) => {
                warn!(error = %e, "ignoring unreadable config file");
                Config::default()
            }
        };
        let store = secrets::create_store(existing.secrets_provider())
            .map_err(|e| WorkflowError::from(ConfigError::from(e)))?;

        let mut file = existing.file.clone();
        let password = if update.is_empty() {
            ask_all(&existing, store.as_ref(), &mut file, ctx.interactive)?
        } else {
            update.apply_to(&mut file);
            if update.password {
                Some(ask_password(&existing, true, ctx.interactive)?)
            } else {
                None
            }
        };
        file.validate().map_err(WorkflowError::from)?;

        log.step("Write config file");
        Config::write(&file).map_err(WorkflowError::from)?;

        if let Some(password) = password {
            log.step("Store JIRA password");
            store
                .set(JIRA_PASSWORD_KEY, &password)
                .map_err(|e| WorkflowError::from(ConfigError::from(e)))?;
        }
        Ok(())
    })
}

/// Interactive mode. Returns the new password, if one was entered.
fn ask_all(
    existing: &Config,
    store: &dyn SecretStore,
    file: &mut FileConfig,
    interactive: bool,
) -> Result<Option<String>> {
    let current = existing.jira();
    let jira = file.jira.get_or_insert_with(JiraConfig::default);

    jira.base_url = Some(ask_value(
        "JIRA base URL",
        current.base_url.filter(|u| is_valid_base_url(u)),
        is_valid_base_url,
        "Invalid URL provided",
        interactive,
    )?);

    let has_password = store
        .get(JIRA_PASSWORD_KEY)
        .map_err(|e| WorkflowError::from(ConfigError::from(e)))?
        .is_some_and(|p| !p.is_empty());
    let password = ask_password(existing, !has_password, interactive)?;

    jira.default_issue_prefix = Some(ask_value(
        "default JIRA issue ID prefix",
        current.default_issue_prefix.filter(|p| is_valid_prefix(p)),
        is_valid_prefix,
        "Invalid prefix provided",
        interactive,
    )?);

    Ok((!password.is_empty()).then_some(password))
}

/// Ask for one value. A blank answer keeps `existing`; without one the
/// value is required.
fn ask_value(
    label: &str,
    existing: Option<String>,
    valid: fn(&str) -> bool,
    invalid_message: &str,
    interactive: bool,
) -> Result<String> {
    let answer = match &existing {
        Some(value) => {
            eprintln!("Existing {}: {}", label, value);
            prompt(prompts::input("New (optional)", interactive))?
        }
        None => prompt(prompts::input(&format!("{} (required)", label), interactive))?,
    };

    resolve_answer(answer, existing, valid).ok_or_else(|| rejected(invalid_message))
}

fn resolve_answer(
    answer: String,
    existing: Option<String>,
    valid: fn(&str) -> bool,
) -> Option<String> {
    match (answer.is_empty(), existing) {
        (true, Some(value)) => Some(value),
        _ if valid(&answer) => Some(answer),
        _ => None,
    }
}

/// Ask for the password. When not `required`, blank means "keep".
fn ask_password(existing: &Config, required: bool, interactive: bool) -> Result<String> {
    let label = format!(
        "JIRA password for {} ({})",
        existing.jira_username(),
        if required { "required" } else { "optional" }
    );
    let password = prompt(prompts::password(&label, interactive))?;
    if required && password.is_empty() {
        return Err(rejected("Password is required"));
    }
    Ok(password)
}

/// Turn a non-interactive session into a descriptive failure.
fn prompt<T>(result: Result<T, PromptError>) -> Result<T> {
    match result {
        Ok(value) => Ok(value),
        Err(PromptError::NotInteractive) => Err(rejected(
            "Cannot prompt for configuration in a non-interactive session. \
             Pass --base-url, --prefix, or --username instead.",
        )),
        Err(e) => Err(e.into()),
    }
}

fn rejected(message: &str) -> anyhow::Error {
    WorkflowError::from(ConfigError::InvalidInput(message.to_string())).into()
}
