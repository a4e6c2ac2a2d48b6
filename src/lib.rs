//! sdn - a disciplined branch workflow on top of git and Jira
//!
//! sdn drives git through a fixed set of workflows (sync, reset, switch,
//! stage, unstage, commit, close) that never commit to the default branch,
//! never silently lose work, and leave the repository in a known state when
//! a step fails.
//!
//! # Architecture
//!
//! The codebase follows a layered architecture:
//!
//! - [`cli`] - Command-line interface layer (parses args, delegates to engine)
//! - [`engine`] - State validation, step logging, and workflow state machines
//! - [`core`] - Domain types, naming rules, commit message format, config
//! - [`git`] - Single interface for all git commands
//! - [`tracker`] - Issue tracker lookups (Jira)
//! - [`secrets`] - Secret storage abstraction
//! - [`ui`] - User interaction utilities
//!
//! # Correctness Invariants
//!
//! 1. Repository pre-conditions are validated before any mutation
//! 2. Commits are never made on the default branch
//! 3. A failed fast-forward after leaving a branch returns to it
//! 4. Commands run strictly one at a time, in order

pub mod cli;
pub mod core;
pub mod engine;
pub mod git;
pub mod secrets;
pub mod tracker;
pub mod ui;
