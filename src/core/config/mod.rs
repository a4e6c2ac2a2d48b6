//! core::config
//!
//! Configuration schema and loading.
//!
//! # Overview
//!
//! `sdn` has a single user-level configuration file holding the issue
//! tracker settings. The tracker password is never written to it; it is
//! kept in the secret store under [`JIRA_PASSWORD_KEY`].
//!
//! # Locations
//!
//! Searched in order:
//! 1. `$SDN_CONFIG` if set
//! 2. `$XDG_CONFIG_HOME/sdn/config.toml`
//! 3. `~/.sdn/config.toml` (canonical write location)
//!
//! The configuration is loaded explicitly by the commands that need it and
//! passed down by reference; nothing is cached process-wide.
//!
//! # Example
//!
//! ```no_run
//! use sdn::core::config::Config;
//! use sdn::secrets;
//!
//! let config = Config::load().unwrap();
//! let store = secrets::create_store(config.secrets_provider()).unwrap();
//! let jira = config.jira_settings(store.as_ref()).unwrap();
//! println!("Jira at {}", jira.base_url);
//! ```

pub mod schema;

pub use schema::{FileConfig, JiraConfig, SecretsConfig};

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::secrets::{SecretError, SecretStore, DEFAULT_PROVIDER};

/// Secret store key for the tracker password.
pub const JIRA_PASSWORD_KEY: &str = "jira.password";

/// Environment variable overriding the config file location.
pub const CONFIG_ENV: &str = "SDN_CONFIG";

const RESOLVE_HINT: &str = "Use \"sdn config\" to resolve.";

/// Errors from configuration operations.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Config file not found. {}", RESOLVE_HINT)]
    NotFound,

    #[error("failed to read config file '{path}': {source}")]
    ReadError {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse config file '{path}': {message}\n{}", RESOLVE_HINT)]
    ParseError { path: PathBuf, message: String },

    #[error("failed to write config file '{path}': {source}")]
    WriteError {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Config file contains {0}. {}", RESOLVE_HINT)]
    InvalidValue(String),

    #[error("Config file is missing {0}. {}", RESOLVE_HINT)]
    Missing(&'static str),

    #[error("{0}")]
    InvalidInput(String),

    #[error("secret store error: {0}")]
    Secret(#[from] SecretError),

    #[error("home directory not found")]
    NoHomeDir,
}

/// Loaded and validated configuration.
#[derive(Debug, Clone, Default)]
pub struct Config {
    /// File contents
    pub file: FileConfig,
    /// Path the file was loaded from
    path: Option<PathBuf>,
}

/// Everything the Jira tracker needs, fully resolved.
#[derive(Clone)]
pub struct JiraSettings {
    /// Base URL of the Jira instance
    pub base_url: String,
    /// Prefix applied to bare issue numbers
    pub default_issue_prefix: String,
    /// Basic-auth username
    pub username: String,
    /// Basic-auth password
    pub password: String,
}

// Custom Debug to avoid exposing the password
impl std::fmt::Debug for JiraSettings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JiraSettings")
            .field("base_url", &self.base_url)
            .field("default_issue_prefix", &self.default_issue_prefix)
            .field("username", &self.username)
            .finish_non_exhaustive()
    }
}

impl Config {
    /// Load and validate the configuration file.
    ///
    /// # Errors
    ///
    /// Fails if no configuration file exists, or if it cannot be read,
    /// parsed, or validated.
    pub fn load() -> Result<Self, ConfigError> {
        let path = Self::locate().ok_or(ConfigError::NotFound)?;
        let file = Self::read(&path)?;
        file.validate()?;
        Ok(Self {
            file,
            path: Some(path),
        })
    }

    /// Load whatever configuration exists, for editing.
    ///
    /// A missing file yields defaults. Read and parse errors still fail;
    /// validation is left to the caller.
    pub fn load_for_edit() -> Result<Self, ConfigError> {
        match Self::locate() {
            Some(path) => Ok(Self {
                file: Self::read(&path)?,
                path: Some(path),
            }),
            None => Ok(Self::default()),
        }
    }

    /// Load from an explicit path.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Err(ConfigError::NotFound);
        }
        let file = Self::read(path)?;
        file.validate()?;
        Ok(Self {
            file,
            path: Some(path.to_path_buf()),
        })
    }

    /// Find the configuration file, if any.
    fn locate() -> Option<PathBuf> {
        if let Ok(path) = std::env::var(CONFIG_ENV) {
            let path = PathBuf::from(path);
            if path.exists() {
                return Some(path);
            }
        }

        if let Ok(xdg_home) = std::env::var("XDG_CONFIG_HOME") {
            let path = PathBuf::from(xdg_home).join("sdn/config.toml");
            if path.exists() {
                return Some(path);
            }
        }

        let path = dirs::home_dir()?.join(".sdn/config.toml");
        path.exists().then_some(path)
    }

    fn read(path: &Path) -> Result<FileConfig, ConfigError> {
        let contents = fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
            path: path.to_path_buf(),
            source: e,
        })?;

        toml::from_str(&contents).map_err(|e| ConfigError::ParseError {
            path: path.to_path_buf(),
            message: e.to_string(),
        })
    }

    /// Where the configuration is written.
    ///
    /// `$SDN_CONFIG` when set, otherwise `~/.sdn/config.toml`.
    pub fn write_path() -> Result<PathBuf, ConfigError> {
        if let Ok(path) = std::env::var(CONFIG_ENV) {
            return Ok(PathBuf::from(path));
        }
        let home = dirs::home_dir().ok_or(ConfigError::NoHomeDir)?;
        Ok(home.join(".sdn/config.toml"))
    }

    /// Validate and write the configuration atomically.
    pub fn write(file: &FileConfig) -> Result<PathBuf, ConfigError> {
        file.validate()?;
        let path = Self::write_path()?;
        Self::write_atomic(&path, file)?;
        Ok(path)
    }

    /// Write a config file atomically (temp file, then rename).
    pub fn write_atomic(path: &Path, file: &FileConfig) -> Result<(), ConfigError> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| ConfigError::WriteError {
                path: path.to_path_buf(),
                source: e,
            })?;
        }

        let contents =
            toml::to_string_pretty(file).map_err(|e| ConfigError::InvalidValue(e.to_string()))?;

        let temp_path = path.with_extension("toml.tmp");
        let write_err = |e| ConfigError::WriteError {
            path: temp_path.clone(),
            source: e,
        };

        let mut handle = fs::File::create(&temp_path).map_err(write_err)?;
        handle.write_all(contents.as_bytes()).map_err(write_err)?;
        handle.sync_all().map_err(write_err)?;

        fs::rename(&temp_path, path).map_err(|e| ConfigError::WriteError {
            path: path.to_path_buf(),
            source: e,
        })?;

        Ok(())
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    /// The Jira section, or defaults.
    pub fn jira(&self) -> JiraConfig {
        self.file.jira.clone().unwrap_or_default()
    }

    /// The secrets provider. Defaults to "file".
    pub fn secrets_provider(&self) -> &str {
        self.file
            .secrets
            .as_ref()
            .and_then(|s| s.provider.as_deref())
            .unwrap_or(DEFAULT_PROVIDER)
    }

    /// The Jira username. Defaults to the OS user.
    pub fn jira_username(&self) -> String {
        self.file
            .jira
            .as_ref()
            .and_then(|j| j.username.clone())
            .unwrap_or_else(whoami::username)
    }

    /// Resolve everything the tracker needs, reading the password from `store`.
    ///
    /// # Errors
    ///
    /// `ConfigError::Missing` names the first absent value.
    pub fn jira_settings(&self, store: &dyn SecretStore) -> Result<JiraSettings, ConfigError> {
        let jira = self.jira();
        let base_url = jira.base_url.ok_or(ConfigError::Missing("jira.base_url"))?;
        let default_issue_prefix = jira
            .default_issue_prefix
            .ok_or(ConfigError::Missing("jira.default_issue_prefix"))?;
        let password = store
            .get(JIRA_PASSWORD_KEY)?
            .filter(|p| !p.is_empty())
            .ok_or(ConfigError::Missing("the Jira password"))?;

        Ok(JiraSettings {
            base_url,
            default_issue_prefix,
            username: self.jira_username(),
            password,
        })
    }

    /// Path the configuration was loaded from.
    pub fn loaded_from(&self) -> Option<&Path> {
        self.path.as_deref()
    }
}
