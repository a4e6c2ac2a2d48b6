//! tracker::mock
//!
//! In-memory tracker for tests.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use super::traits::{IssueTracker, TrackerError};
use crate::core::types::IssueKey;

/// Tracker answering from a fixed table of issues.
///
/// Unknown keys fail with a 404 status error. Every lookup is recorded.
#[derive(Debug, Clone, Default)]
pub struct MockTracker {
    issues: HashMap<String, String>,
    lookups: Arc<Mutex<Vec<String>>>,
}

impl MockTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an issue.
    pub fn with_issue(mut self, key: &str, summary: &str) -> Self {
        self.issues.insert(key.to_string(), summary.to_string());
        self
    }

    /// Keys looked up so far, in order.
    pub fn lookups(&self) -> Vec<String> {
        self.lookups.lock().map(|l| l.clone()).unwrap_or_default()
    }
}

#[async_trait]
impl IssueTracker for MockTracker {
    async fn issue_summary(&self, key: &IssueKey) -> Result<String, TrackerError> {
        if let Ok(mut lookups) = self.lookups.lock() {
            lookups.push(key.to_string());
        }
        self.issues
            .get(key.as_str())
            .cloned()
            .ok_or_else(|| TrackerError::Status {
                status: "404 Not Found".into(),
                key: key.to_string(),
                url: format!("mock://issue/{}", key),
                username: "mock".into(),
            })
    }
}
