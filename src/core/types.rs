//! core::types
//!
//! Strong types for core domain concepts.
//!
//! # Types
//!
//! - [`BranchName`] - Validated Git branch name
//! - [`IssueKey`] - Validated issue-tracker key such as `SEDONA-123`
//!
//! # Validation
//!
//! These types enforce validity at construction time. Invalid values
//! cannot be represented, so a derived branch name that git would reject
//! is caught before any command runs.
//!
//! # Examples
//!
//! ```
//! use sdn::core::types::{BranchName, IssueKey};
//!
//! let branch = BranchName::new("SEDONA-123-Fix-login").unwrap();
//! let key = IssueKey::new("SEDONA-123").unwrap();
//!
//! assert!(BranchName::new("invalid..name").is_err());
//! assert!(IssueKey::new("has space-1").is_err());
//! ```

use thiserror::Error;

/// Errors from type validation.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TypeError {
    #[error("invalid branch name: {0}")]
    InvalidBranchName(String),

    #[error("invalid issue key: {0}")]
    InvalidIssueKey(String),
}

/// A validated Git branch name.
///
/// Branch names must conform to Git's refname rules (see `git check-ref-format`):
/// - Cannot be empty
/// - Cannot start with `.` or `-`
/// - Cannot end with `.lock` or `/`
/// - Cannot contain `..`, `@{`, `//`, or ASCII control characters
/// - Cannot contain spaces, `~`, `^`, `:`, `\`, `?`, `*`, `[`
/// - Cannot be exactly `@`
///
/// # Example
///
/// ```
/// use sdn::core::types::BranchName;
///
/// let name = BranchName::new("feature/my-branch").unwrap();
/// assert_eq!(name.as_str(), "feature/my-branch");
///
/// assert!(BranchName::new("").is_err());
/// assert!(BranchName::new(".hidden").is_err());
/// assert!(BranchName::new("branch.lock").is_err());
/// assert!(BranchName::new("has space").is_err());
/// assert!(BranchName::new("@").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct BranchName(String);

impl BranchName {
    /// Create a new validated branch name.
    ///
    /// # Errors
    ///
    /// Returns `TypeError::InvalidBranchName` if the name violates Git's refname rules.
    pub fn new(name: impl Into<String>) -> Result<Self, TypeError> {
        let name = name.into();
        Self::validate(&name)?;
        Ok(Self(name))
    }

    fn validate(name: &str) -> Result<(), TypeError> {
        let reject = |why: &str| Err(TypeError::InvalidBranchName(format!("'{}' {}", name, why)));

        if name.is_empty() {
            return reject("is empty");
        }
        if name == "@" {
            return reject("is reserved");
        }
        if name.starts_with('.') || name.starts_with('-') {
            return reject("cannot start with '.' or '-'");
        }
        if name.ends_with(".lock") || name.ends_with('/') {
            return reject("cannot end with '.lock' or '/'");
        }
        for forbidden in ["..", "@{", "//"] {
            if name.contains(forbidden) {
                return reject(&format!("cannot contain '{}'", forbidden));
            }
        }

        const INVALID_CHARS: [char; 8] = [' ', '~', '^', ':', '\\', '?', '*', '['];
        if let Some(c) = name.chars().find(|c| INVALID_CHARS.contains(c)) {
            return reject(&format!("cannot contain '{}'", c));
        }
        if name.chars().any(|c| c.is_ascii_control()) {
            return reject("cannot contain control characters");
        }

        for component in name.split('/').filter(|c| !c.is_empty()) {
            if component.starts_with('.') || component.ends_with(".lock") {
                return reject("has a path component starting with '.' or ending with '.lock'");
            }
        }

        Ok(())
    }

    /// Get the branch name as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for BranchName {
    type Error = TypeError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::new(s)
    }
}

impl From<BranchName> for String {
    fn from(name: BranchName) -> Self {
        name.0
    }
}

impl AsRef<str> for BranchName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for BranchName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A validated issue key, e.g. `SEDONA-123`.
///
/// Keys consist of ASCII letters, digits and hyphens, contain at least one
/// hyphen, and neither start nor end with one. They are embedded verbatim
/// in tracker URLs and branch names.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct IssueKey(String);

impl IssueKey {
    /// Create a new validated issue key.
    pub fn new(key: impl Into<String>) -> Result<Self, TypeError> {
        let key = key.into();
        let well_formed = key.contains('-')
            && !key.starts_with('-')
            && !key.ends_with('-')
            && key.chars().all(|c| c.is_ascii_alphanumeric() || c == '-');

        if well_formed {
            Ok(Self(key))
        } else {
            Err(TypeError::InvalidIssueKey(key))
        }
    }

    /// Get the key as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for IssueKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    mod branch_name {
        use super::*;

        #[test]
        fn accepts_issue_branches() {
            for name in ["SEDONA-123-Fix-login", "main", "feature/x", "user@feature"] {
                assert!(BranchName::new(name).is_ok(), "{} should be valid", name);
            }
        }

        #[test]
        fn rejects_refname_violations() {
            for name in [
                "", "@", ".x", "-x", "x.lock", "x/", "a..b", "a@{b", "a//b", "a b", "a~b",
                "a^b", "a:b", "a\\b", "a?b", "a*b", "a[b", "a/.b", "a.lock/b", "a\tb",
            ] {
                assert!(BranchName::new(name).is_err(), "{:?} should be invalid", name);
            }
        }

        #[test]
        fn error_names_the_offender() {
            let err = BranchName::new("a..b").unwrap_err();
            assert!(err.to_string().contains("'a..b'"));
            assert!(err.to_string().contains(".."));
        }

        #[test]
        fn string_conversions_validate() {
            let name = BranchName::try_from("main".to_string()).unwrap();
            assert_eq!(String::from(name), "main");
            assert!(BranchName::try_from("a..b".to_string()).is_err());
        }
    }

    mod issue_key {
        use super::*;

        #[test]
        fn accepts_prefixed_keys() {
            assert_eq!(IssueKey::new("SEDONA-123").unwrap().as_str(), "SEDONA-123");
            assert!(IssueKey::new("MY-PROJ-9").is_ok());
        }

        #[test]
        fn rejects_malformed_keys() {
            for key in ["123", "-123", "SEDONA-", "SED ONA-1", "SEDONA-1/..", ""] {
                assert!(IssueKey::new(key).is_err(), "{:?} should be invalid", key);
            }
        }
    }
}
