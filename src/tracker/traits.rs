//! tracker::traits
//!
//! Issue tracker trait definition.
//!
//! # Design
//!
//! The `IssueTracker` trait is async because lookups involve network I/O.
//! The only question the workflows ask a tracker is "what is this issue
//! called?", which `switch` turns into a branch name.

use async_trait::async_trait;
use thiserror::Error;

use crate::core::types::IssueKey;

/// Errors from issue tracker lookups.
///
/// Messages never include the password.
#[derive(Debug, Clone, Error)]
pub enum TrackerError {
    /// The tracker answered with a non-success status.
    #[error(
        "Got non-success status code {status} while looking up JIRA issue {key}\nURL: {url}\nUsername: {username}"
    )]
    Status {
        /// Status code and reason, e.g. `404 Not Found`
        status: String,
        key: String,
        url: String,
        username: String,
    },

    /// The response body has no string `fields.summary`.
    #[error("Failed to parse successful response body while looking up JIRA issue {key}.\nURL: {url}")]
    Parse { key: String, url: String },

    /// Network or connection error.
    #[error("network error while looking up JIRA issue {key}: {message}")]
    Network { key: String, message: String },
}

/// Read access to an issue tracker.
#[async_trait]
pub trait IssueTracker: Send + Sync {
    /// The issue's one-line summary.
    async fn issue_summary(&self, key: &IssueKey) -> Result<String, TrackerError>;
}
