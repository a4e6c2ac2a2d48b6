//! cli::args
//!
//! Command-line argument definitions using clap derive.
//!
//! # Global Flags
//!
//! These flags are available on all commands:
//! - `--help` / `-h`: Show help
//! - `--version`: Show version
//! - `--lib` / `-l`: Operate on the `Library` subdirectory
//! - `--cwd <path>`: Run as if in that directory
//! - `--debug`: Enable debug logging
//! - `--no-interactive`: Never prompt
//! - `--quiet` / `-q`: Failures only

use std::io::IsTerminal;
use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Directory `--lib` switches to, relative to the working directory.
pub const LIBRARY_DIR: &str = "Library";

/// sdn - a disciplined branch workflow on top of git and Jira
#[derive(Parser, Debug)]
#[command(name = "sdn")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Operate on the Library subdirectory
    #[arg(short, long, global = true)]
    pub lib: bool,

    /// Run as if sdn was started in this directory
    #[arg(long, global = true)]
    pub cwd: Option<PathBuf>,

    /// Enable debug logging
    #[arg(long, global = true)]
    pub debug: bool,

    /// Print failures only; implies --no-interactive
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Never prompt; confirmations count as declined
    #[arg(long, global = true)]
    pub no_interactive: bool,

    #[command(subcommand)]
    pub command: Command,
}

impl Cli {
    /// Parse command-line arguments.
    pub fn parse_args() -> Self {
        Parser::parse()
    }

    /// Interactive unless `--no-interactive` or `--quiet`, and stdin is a TTY.
    pub fn interactive(&self) -> bool {
        !(self.no_interactive || self.quiet) && std::io::stdin().is_terminal()
    }

    /// Working directory override after applying `--cwd` and `--lib`.
    pub fn workdir(&self) -> Option<PathBuf> {
        match (&self.cwd, self.lib) {
            (Some(cwd), true) => Some(cwd.join(LIBRARY_DIR)),
            (Some(cwd), false) => Some(cwd.clone()),
            (None, true) => Some(PathBuf::from(LIBRARY_DIR)),
            (None, false) => None,
        }
    }
}

/// Available commands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Checkout default, pull, checkout current, and rebase default into current
    Sync,

    /// Checkout default and pull
    #[command(
        long_about = "Checkout default and pull.\n\n\
            Refuses to leave a branch with unpushed commits unless --force is given."
    )]
    Reset {
        /// Leave unpushed commits on the current branch
        #[arg(short, long)]
        force: bool,
    },

    /// Checkout default, pull, and checkout the branch for a Jira issue
    #[command(
        after_help = "\
EXAMPLES:
    # Branch for SEDONA-123 (default prefix applied)
    sdn switch 123

    # Branch for an issue in another project
    sdn switch OPS-7"
    )]
    Switch {
        /// Jira issue ID. Without a dash, the configured default prefix is
        /// applied. The branch name is derived from the issue summary.
        #[arg(value_name = "JIRA-ID")]
        issue: String,
    },

    /// Stage changes (all changes if no globs are given)
    Stage {
        /// Git pathspecs/globs
        globs: Vec<String>,
    },

    /// Unstage changes (all changes if no globs are given)
    Unstage {
        /// Git pathspecs/globs
        globs: Vec<String>,
    },

    /// Commit staged changes
    #[command(
        after_help = "\
EXAMPLES:
    sdn commit \"fix login redirect:: add regression test\""
    )]
    Commit {
        /// Double-colon (::) separated list of points. Branch name and date
        /// are prepended.
        message: String,
    },

    /// Collapse unpushed commits, push, checkout default, pull, and delete
    /// the current branch
    Close {
        /// Do not ask for confirmation
        #[arg(short, long)]
        yes: bool,
    },

    /// Update the configuration file
    #[command(
        long_about = "Update the configuration file.\n\n\
            Without flags, asks for each value interactively; a blank answer keeps \
            the current value. With flags, updates only the given values."
    )]
    Config {
        /// Jira base URL, e.g. https://jira.example.com
        #[arg(long)]
        base_url: Option<String>,

        /// Default issue prefix, e.g. SEDONA
        #[arg(long)]
        prefix: Option<String>,

        /// Jira username (defaults to the OS user)
        #[arg(long)]
        username: Option<String>,

        /// Prompt for the Jira password
        #[arg(long)]
        password: bool,
    },
}
