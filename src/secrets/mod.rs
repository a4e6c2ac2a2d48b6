//! secrets
//!
//! Credential storage for the issue-tracker password.
//!
//! # Providers
//!
//! - [`FileSecretStore`]: `~/.sdn/secrets.toml`, 0600 permissions (default)
//! - `KeychainSecretStore`: OS keychain (requires the `keychain` feature)
//!
//! Use [`create_store`] to pick one from configuration.

mod file_store;
#[cfg(feature = "keychain")]
mod keychain_store;
mod traits;

pub use file_store::FileSecretStore;
#[cfg(feature = "keychain")]
pub use keychain_store::KeychainSecretStore;
pub use traits::{SecretError, SecretStore};

/// The default secret store provider name.
pub const DEFAULT_PROVIDER: &str = "file";

/// Provider names accepted in configuration.
pub const VALID_PROVIDERS: [&str; 2] = ["file", "keychain"];

/// Create a secret store based on the provider name.
///
/// # Errors
///
/// Unknown provider names, and `keychain` without the `keychain` feature.
pub fn create_store(provider: &str) -> Result<Box<dyn SecretStore>, SecretError> {
    match provider {
        "file" => Ok(Box::new(FileSecretStore::new()?)),
        #[cfg(feature = "keychain")]
        "keychain" => Ok(Box::new(KeychainSecretStore::new()?)),
        #[cfg(not(feature = "keychain"))]
        "keychain" => Err(SecretError::ProviderNotAvailable(
            "keychain support not enabled (compile with --features keychain)".into(),
        )),
        other => Err(SecretError::ProviderNotAvailable(format!(
            "unknown secret provider: '{}' (valid: {})",
            other,
            VALID_PROVIDERS.join(", ")
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_provider_rejected() {
        match create_store("vault") {
            Err(SecretError::ProviderNotAvailable(msg)) => assert!(msg.contains("vault")),
            Err(e) => panic!("unexpected error type: {:?}", e),
            Ok(_) => panic!("expected error"),
        }
    }

    #[cfg(not(feature = "keychain"))]
    #[test]
    fn keychain_requires_feature() {
        let err = create_store("keychain").err().expect("expected error");
        assert!(err.to_string().contains("not enabled"));
    }
}
