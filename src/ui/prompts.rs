//! ui::prompts
//!
//! Interactive prompts and confirmations.
//!
//! # Design
//!
//! Prompts are only shown in interactive mode. In non-interactive mode
//! they fail with [`PromptError::NotInteractive`] and the caller decides
//! what that means. Prompt text goes to stderr so stdout stays the step log.

use std::io::{self, BufRead, Write};

use crossterm::style::Stylize;
use thiserror::Error;

/// Errors from prompts.
#[derive(Debug, Error)]
pub enum PromptError {
    #[error("not in interactive mode")]
    NotInteractive,

    #[error("input closed")]
    Eof,

    #[error("IO error: {0}")]
    Io(#[from] io::Error),
}

/// Ask a yes/no question. Only an exact `Y` confirms.
pub fn confirm(message: &str, interactive: bool) -> Result<bool, PromptError> {
    if !interactive {
        return Err(PromptError::NotInteractive);
    }
    ask(&format!("{} [Y/N]: ", message).yellow().to_string())?;
    Ok(is_yes(&read_line(&mut io::stdin().lock())?))
}

/// Ask for a line of text. The answer is trimmed.
pub fn input(message: &str, interactive: bool) -> Result<String, PromptError> {
    if !interactive {
        return Err(PromptError::NotInteractive);
    }
    ask(&format!("{}: ", message))?;
    Ok(read_line(&mut io::stdin().lock())?.trim().to_string())
}

/// Ask for masked input (passwords). Nothing is echoed.
pub fn password(message: &str, interactive: bool) -> Result<String, PromptError> {
    if !interactive {
        return Err(PromptError::NotInteractive);
    }
    Ok(rpassword::prompt_password(format!("{}: ", message))?)
}

fn ask(prompt: &str) -> io::Result<()> {
    let mut err = io::stderr();
    write!(err, "{}", prompt)?;
    err.flush()
}

fn read_line(reader: &mut impl BufRead) -> Result<String, PromptError> {
    let mut line = String::new();
    if reader.read_line(&mut line)? == 0 {
        return Err(PromptError::Eof);
    }
    Ok(line.trim_end_matches(['\r', '\n']).to_string())
}

fn is_yes(answer: &str) -> bool {
    answer == "Y"
}
