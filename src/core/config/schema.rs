//! core::config::schema
//!
//! Configuration schema types.
//!
//! # Location
//!
//! In order of precedence:
//! 1. `$SDN_CONFIG` if set
//! 2. `$XDG_CONFIG_HOME/sdn/config.toml`
//! 3. `~/.sdn/config.toml` (canonical write location)
//!
//! # Validation
//!
//! Values are validated after parsing. The tracker password is not part of
//! the file; it lives in the secret store.

use serde::{Deserialize, Serialize};

use super::ConfigError;
use crate::core::naming::is_valid_prefix;
use crate::secrets;

/// User configuration.
///
/// # Example
///
/// ```toml
/// [jira]
/// base_url = "https://jira.example.com"
/// default_issue_prefix = "SEDONA"
/// username = "jdoe"
///
/// [secrets]
/// provider = "file"
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct FileConfig {
    /// Issue tracker settings
    pub jira: Option<JiraConfig>,

    /// Secret storage settings
    pub secrets: Option<SecretsConfig>,
}

impl FileConfig {
    /// Validate the configuration values that are present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidValue` if any value is invalid.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if let Some(jira) = &self.jira {
            jira.validate()?;
        }
        if let Some(secrets) = &self.secrets {
            secrets.validate()?;
        }
        Ok(())
    }
}

/// Issue tracker settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct JiraConfig {
    /// Base URL of the Jira instance
    pub base_url: Option<String>,

    /// Prefix applied to bare issue numbers
    pub default_issue_prefix: Option<String>,

    /// Username for basic auth (defaults to the OS user)
    pub username: Option<String>,
}

impl JiraConfig {
    /// Validate the configuration values that are present.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if let Some(url) = &self.base_url {
            if !is_valid_base_url(url) {
                return Err(ConfigError::InvalidValue(format!(
                    "invalid jira.base_url '{}', must be an absolute http or https URL",
                    url
                )));
            }
        }

        if let Some(prefix) = &self.default_issue_prefix {
            if !is_valid_prefix(prefix) {
                return Err(ConfigError::InvalidValue(format!(
                    "invalid jira.default_issue_prefix '{}'",
                    prefix
                )));
            }
        }

        if let Some(username) = &self.username {
            if username.trim().is_empty() || username.contains(':') {
                return Err(ConfigError::InvalidValue(
                    "jira.username must be non-empty and cannot contain ':'".into(),
                ));
            }
        }

        Ok(())
    }
}

/// Secret storage settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct SecretsConfig {
    /// Provider: "file" or "keychain"
    pub provider: Option<String>,
}

impl SecretsConfig {
    /// Validate the configuration values.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if let Some(provider) = &self.provider {
            if !secrets::VALID_PROVIDERS.contains(&provider.as_str()) {
                return Err(ConfigError::InvalidValue(format!(
                    "invalid secrets provider '{}', must be one of: {}",
                    provider,
                    secrets::VALID_PROVIDERS.join(", ")
                )));
            }
        }
        Ok(())
    }
}

/// Whether `url` is an absolute http(s) URL.
pub fn is_valid_base_url(url: &str) -> bool {
    match reqwest::Url::parse(url) {
        Ok(parsed) => matches!(parsed.scheme(), "http" | "https") && parsed.has_host(),
        Err(_) => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_full_config() {
        let config: FileConfig = toml::from_str(
            r#"
            [jira]
            base_url = "https://jira.example.com"
            default_issue_prefix = "SEDONA"
            username = "jdoe"

            [secrets]
            provider = "file"
            "#,
        )
        .unwrap();

        let jira = config.jira.as_ref().unwrap();
        assert_eq!(jira.base_url.as_deref(), Some("https://jira.example.com"));
        assert_eq!(jira.default_issue_prefix.as_deref(), Some("SEDONA"));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn unknown_fields_rejected() {
        let result: Result<FileConfig, _> = toml::from_str(
            r#"
            [jira]
            password = "plaintext"
            "#,
        );
        assert!(result.is_err());
    }

    #[test]
    fn base_url_must_be_http() {
        for url in ["ftp://jira.example.com", "jira.example.com", "/relative", ""] {
            let jira = JiraConfig {
                base_url: Some(url.into()),
                ..Default::default()
            };
            assert!(jira.validate().is_err(), "{:?} should be rejected", url);
        }
        assert!(is_valid_base_url("http://localhost:8080/jira"));
    }

    #[test]
    fn prefix_validated() {
        let jira = JiraConfig {
            default_issue_prefix: Some("9BAD".into()),
            ..Default::default()
        };
        assert!(matches!(jira.validate(), Err(ConfigError::InvalidValue(_))));
    }

    #[test]
    fn username_with_colon_rejected() {
        let jira = JiraConfig {
            username: Some("a:b".into()),
            ..Default::default()
        };
        assert!(jira.validate().is_err());
    }

    #[test]
    fn unknown_provider_rejected() {
        let config = FileConfig {
            secrets: Some(SecretsConfig {
                provider: Some("vault".into()),
            }),
            ..Default::default()
        };
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("vault"));
    }
}
