//! core
//!
//! Core domain types and rules for sdn.
//!
//! # Modules
//!
//! - [`types`] - Strong types: BranchName, IssueKey
//! - [`naming`] - Issue key qualification and branch naming
//! - [`message`] - Commit message format: build, parse, validate, squash
//! - [`config`] - Configuration schema and loading
//!
//! # Design Principles
//!
//! - Strong typing prevents invalid states at compile time
//! - Malformed input is rejected, never repaired
//! - Nothing here runs git or touches the network

pub mod config;
pub mod message;
pub mod naming;
pub mod types;
