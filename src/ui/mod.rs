//! ui
//!
//! User interaction utilities.
//!
//! # Modules
//!
//! - [`prompts`] - Interactive prompts and confirmations
//! - [`output`] - Verbosity and message output
//!
//! # Design
//!
//! Workflows never touch the terminal directly. Progress goes through the
//! step log; questions are asked here and handed to the engine as plain
//! values or callbacks.

pub mod output;
pub mod prompts;
