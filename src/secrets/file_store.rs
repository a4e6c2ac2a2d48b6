//! secrets::file_store
//!
//! File-based secret storage.
//!
//! # Security
//!
//! - Secrets are stored in `~/.sdn/secrets.toml`
//! - File permissions are set to 0600 on Unix (owner read/write only)
//! - All writes are atomic (write to temp file, then rename)

use std::collections::BTreeMap;
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

#[cfg(unix)]
use std::os::unix::fs::PermissionsExt;

use super::traits::{SecretError, SecretStore};

/// Secrets kept in a TOML table on disk.
#[derive(Debug)]
pub struct FileSecretStore {
    path: PathBuf,
}

impl FileSecretStore {
    /// Store at the default location, `~/.sdn/secrets.toml`.
    pub fn new() -> Result<Self, SecretError> {
        let home = dirs::home_dir()
            .ok_or_else(|| SecretError::ReadError("cannot determine home directory".into()))?;
        Ok(Self {
            path: home.join(".sdn").join("secrets.toml"),
        })
    }

    /// Store at a custom path.
    pub fn with_path(path: PathBuf) -> Self {
        Self { path }
    }

    /// Path to the secrets file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_secrets(&self) -> Result<BTreeMap<String, String>, SecretError> {
        if !self.path.exists() {
            return Ok(BTreeMap::new());
        }

        let content = fs::read_to_string(&self.path)
            .map_err(|e| SecretError::ReadError(format!("cannot read secrets file: {}", e)))?;

        // The toml error would echo the offending line, which may hold a secret.
        toml::from_str(&content)
            .map_err(|_| SecretError::ReadError("cannot parse secrets file".into()))
    }

    fn write_secrets(&self, secrets: &BTreeMap<String, String>) -> Result<(), SecretError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)
                .map_err(|e| SecretError::WriteError(format!("cannot create directory: {}", e)))?;
        }

        let content = toml::to_string_pretty(secrets)
            .map_err(|_| SecretError::WriteError("cannot serialize secrets".into()))?;

        let temp_path = self.path.with_extension("tmp");
        {
            let mut file = OpenOptions::new()
                .write(true)
                .create(true)
                .truncate(true)
                .open(&temp_path)
                .map_err(|e| SecretError::WriteError(format!("cannot create temp file: {}", e)))?;

            // Restrict before any content is written.
            #[cfg(unix)]
            file.set_permissions(fs::Permissions::from_mode(0o600))
                .map_err(|e| SecretError::WriteError(format!("cannot set permissions: {}", e)))?;

            file.write_all(content.as_bytes())
                .map_err(|e| SecretError::WriteError(format!("cannot write secrets: {}", e)))?;
            file.sync_all()
                .map_err(|e| SecretError::WriteError(format!("cannot sync to disk: {}", e)))?;
        }

        fs::rename(&temp_path, &self.path)
            .map_err(|e| SecretError::WriteError(format!("cannot rename temp file: {}", e)))
    }
}

impl SecretStore for FileSecretStore {
    fn get(&self, key: &str) -> Result<Option<String>, SecretError> {
        Ok(self.read_secrets()?.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), SecretError> {
        let mut secrets = self.read_secrets()?;
        secrets.insert(key.to_string(), value.to_string());
        self.write_secrets(&secrets)
    }

    fn delete(&self, key: &str) -> Result<(), SecretError> {
        let mut secrets = self.read_secrets()?;
        if secrets.remove(key).is_none() {
            return Ok(());
        }
        self.write_secrets(&secrets)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn create_test_store() -> (TempDir, FileSecretStore) {
        let temp = TempDir::new().expect("create temp dir");
        let store = FileSecretStore::with_path(temp.path().join("sdn").join("secrets.toml"));
        (temp, store)
    }

    #[test]
    fn get_missing_returns_none() {
        let (_temp, store) = create_test_store();
        assert!(store.get("jira.password").expect("get").is_none());
        assert!(!store.exists("jira.password").expect("exists"));
    }

    #[test]
    fn set_get_overwrite() {
        let (_temp, store) = create_test_store();
        store.set("jira.password", "first").expect("set");
        store.set("jira.password", "second").expect("set again");
        assert_eq!(
            store.get("jira.password").expect("get"),
            Some("second".to_string())
        );
    }

    #[test]
    fn delete_is_idempotent() {
        let (_temp, store) = create_test_store();
        store.set("jira.password", "pw").expect("set");
        store.delete("jira.password").expect("delete");
        store.delete("jira.password").expect("delete again");
        assert!(store.get("jira.password").expect("get").is_none());
    }

    #[test]
    fn survives_new_instance() {
        let (_temp, store) = create_test_store();
        store.set("jira.password", "p@ss \"word\"\n").expect("set");

        let reopened = FileSecretStore::with_path(store.path().to_path_buf());
        assert_eq!(
            reopened.get("jira.password").expect("get"),
            Some("p@ss \"word\"\n".to_string())
        );
    }

    #[cfg(unix)]
    #[test]
    fn permissions_0600_on_unix() {
        let (_temp, store) = create_test_store();
        store.set("jira.password", "pw").expect("set");
        let mode = fs::metadata(store.path()).expect("metadata").permissions().mode() & 0o777;
        assert_eq!(mode, 0o600);
    }

    #[test]
    fn parse_error_does_not_echo_contents() {
        let (_temp, store) = create_test_store();
        fs::create_dir_all(store.path().parent().unwrap()).unwrap();
        fs::write(store.path(), "jira.password = \"hunter2").unwrap();

        let err = store.get("jira.password").unwrap_err().to_string();
        assert!(err.contains("cannot parse"));
        assert!(!err.contains("hunter2"));
    }
}
