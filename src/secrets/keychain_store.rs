//! secrets::keychain_store
//!
//! Secret storage in the OS keychain (macOS Keychain, Windows Credential
//! Manager, Linux Secret Service) via the `keyring` crate.
//!
//! Only compiled with the `keychain` feature.

use keyring::Entry;

use super::traits::{SecretError, SecretStore};

/// Keychain service name for all entries.
const SERVICE: &str = "sdn";

/// Keychain-backed secret storage.
#[derive(Debug)]
pub struct KeychainSecretStore {
    service: String,
}

impl KeychainSecretStore {
    /// Store using the `sdn` service name.
    pub fn new() -> Result<Self, SecretError> {
        Ok(Self::with_service(SERVICE))
    }

    /// Store using a custom service name.
    pub fn with_service(service: impl Into<String>) -> Self {
        Self {
            service: service.into(),
        }
    }

    fn entry(&self, key: &str) -> Result<Entry, SecretError> {
        Entry::new(&self.service, key)
            .map_err(|e| SecretError::ReadError(format!("cannot create keyring entry: {}", e)))
    }
}

impl SecretStore for KeychainSecretStore {
    fn get(&self, key: &str) -> Result<Option<String>, SecretError> {
        match self.entry(key)?.get_password() {
            Ok(password) => Ok(Some(password)),
            Err(keyring::Error::NoEntry) => Ok(None),
            Err(e) => Err(SecretError::ReadError(format!(
                "cannot read from keychain: {}",
                e
            ))),
        }
    }

    fn set(&self, key: &str, value: &str) -> Result<(), SecretError> {
        self.entry(key)?
            .set_password(value)
            .map_err(|e| SecretError::WriteError(format!("cannot write to keychain: {}", e)))
    }

    fn delete(&self, key: &str) -> Result<(), SecretError> {
        match self.entry(key)?.delete_credential() {
            Ok(()) | Err(keyring::Error::NoEntry) => Ok(()),
            Err(e) => Err(SecretError::WriteError(format!(
                "cannot delete from keychain: {}",
                e
            ))),
        }
    }
}
