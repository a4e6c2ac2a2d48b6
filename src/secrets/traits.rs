//! secrets::traits
//!
//! Secret storage trait definition.
//!
//! Keys are namespaced (e.g. `jira.password`). Implementations never log,
//! print, or include secret values in error messages.

use thiserror::Error;

/// Errors from secret storage operations.
///
/// Messages never include secret values.
#[derive(Debug, Error)]
pub enum SecretError {
    /// Failed to read from secret storage.
    #[error("failed to read secret: {0}")]
    ReadError(String),

    /// Failed to write to secret storage.
    #[error("failed to write secret: {0}")]
    WriteError(String),

    /// Provider not available or not configured.
    #[error("secret provider not available: {0}")]
    ProviderNotAvailable(String),
}

/// Key-value storage for credentials.
pub trait SecretStore: Send + Sync {
    /// Get a secret by key. `Ok(None)` if it is not stored.
    fn get(&self, key: &str) -> Result<Option<String>, SecretError>;

    /// Store a secret, overwriting any existing value.
    fn set(&self, key: &str, value: &str) -> Result<(), SecretError>;

    /// Remove a secret. Removing an absent key succeeds.
    fn delete(&self, key: &str) -> Result<(), SecretError>;

    /// Check if a secret exists.
    fn exists(&self, key: &str) -> Result<bool, SecretError> {
        Ok(self.get(key)?.is_some())
    }
}
