//! tracker
//!
//! Issue tracker lookups used by `switch` to name new branches.
//!
//! # Implementations
//!
//! - [`JiraTracker`] - Jira REST API over HTTP Basic auth
//! - [`MockTracker`] - In-memory table for tests

pub mod jira;
pub mod mock;
mod traits;

pub use jira::JiraTracker;
pub use mock::MockTracker;
pub use traits::{IssueTracker, TrackerError};
