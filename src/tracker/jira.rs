//! tracker::jira
//!
//! Jira REST implementation of [`IssueTracker`].
//!
//! # Request
//!
//! `GET {base_url}/rest/api/latest/issue/{key}?fields=summary` with HTTP
//! Basic auth. The summary is read from `fields.summary` in the JSON body.

use async_trait::async_trait;
use reqwest::{Client, Response};
use serde::Deserialize;
use tracing::debug;

use super::traits::{IssueTracker, TrackerError};
use crate::core::config::JiraSettings;
use crate::core::types::IssueKey;

/// User-Agent header value for API requests.
const USER_AGENT_VALUE: &str = concat!("sdn/", env!("CARGO_PKG_VERSION"));

/// Jira tracker.
pub struct JiraTracker {
    client: Client,
    base_url: String,
    username: String,
    password: String,
}

// Custom Debug to avoid exposing the password
impl std::fmt::Debug for JiraTracker {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JiraTracker")
            .field("base_url", &self.base_url)
            .field("username", &self.username)
            .finish_non_exhaustive()
    }
}

#[derive(Debug, Deserialize)]
struct IssueBody {
    fields: Option<IssueFields>,
}

#[derive(Debug, Deserialize)]
struct IssueFields {
    summary: Option<String>,
}

impl JiraTracker {
    /// Create a tracker from resolved settings.
    pub fn new(settings: &JiraSettings) -> Self {
        let client = Client::builder()
            .user_agent(USER_AGENT_VALUE)
            .build()
            .unwrap_or_default();
        Self {
            client,
            base_url: settings.base_url.trim_end_matches('/').to_string(),
            username: settings.username.clone(),
            password: settings.password.clone(),
        }
    }

    fn issue_url(&self, key: &IssueKey) -> String {
        format!(
            "{}/rest/api/latest/issue/{}?fields=summary",
            self.base_url, key
        )
    }

    async fn read_summary(
        &self,
        key: &IssueKey,
        url: &str,
        response: Response,
    ) -> Result<String, TrackerError> {
        let status = response.status();
        if !status.is_success() {
            return Err(TrackerError::Status {
                status: status.to_string(),
                key: key.to_string(),
                url: url.to_string(),
                username: self.username.clone(),
            });
        }

        let parse_error = || TrackerError::Parse {
            key: key.to_string(),
            url: url.to_string(),
        };

        let body: IssueBody = response.json().await.map_err(|_| parse_error())?;
        body.fields
            .and_then(|f| f.summary)
            .ok_or_else(parse_error)
    }
}

#[async_trait]
impl IssueTracker for JiraTracker {
    async fn issue_summary(&self, key: &IssueKey) -> Result<String, TrackerError> {
        let url = self.issue_url(key);
        debug!(%url, "looking up issue");

        let response = self
            .client
            .get(&url)
            .basic_auth(&self.username, Some(&self.password))
            .send()
            .await
            .map_err(|e| TrackerError::Network {
                key: key.to_string(),
                message: e.without_url().to_string(),
            })?;

        self.read_summary(key, &url, response).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn settings(base_url: &str) -> JiraSettings {
        JiraSettings {
            base_url: base_url.into(),
            default_issue_prefix: "SEDONA".into(),
            username: "jdoe".into(),
            password: "hunter2".into(),
        }
    }

    #[test]
    fn url_built_from_base_and_key() {
        let tracker = JiraTracker::new(&settings("https://jira.example.com/"));
        let key = IssueKey::new("SEDONA-12").unwrap();
        assert_eq!(
            tracker.issue_url(&key),
            "https://jira.example.com/rest/api/latest/issue/SEDONA-12?fields=summary"
        );
    }

    #[test]
    fn debug_hides_password() {
        let tracker = JiraTracker::new(&settings("https://jira.example.com"));
        let debug = format!("{:?}", tracker);
        assert!(debug.contains("jdoe"));
        assert!(!debug.contains("hunter2"));
    }

    #[test]
    fn body_shape() {
        let body: IssueBody =
            serde_json::from_str(r#"{"key":"X-1","fields":{"summary":"Fix it"}}"#).unwrap();
        assert_eq!(body.fields.unwrap().summary.as_deref(), Some("Fix it"));

        let body: IssueBody = serde_json::from_str(r#"{"fields":{}}"#).unwrap();
        assert!(body.fields.unwrap().summary.is_none());
    }
}
