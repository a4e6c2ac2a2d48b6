//! core::naming
//!
//! Branch naming rules.
//!
//! # Features
//!
//! - Qualify a bare issue number with the configured default prefix
//! - Derive a branch name from an issue key and its summary
//! - Validate issue-key prefixes

use std::sync::OnceLock;

use regex::Regex;

use super::types::{BranchName, IssueKey, TypeError};

fn issue_prefix() -> Option<&'static Regex> {
    static PATTERN: OnceLock<Option<Regex>> = OnceLock::new();
    PATTERN
        .get_or_init(|| Regex::new("^[a-zA-Z]+(-?[a-zA-Z0-9]+)*$").ok())
        .as_ref()
}

/// Whether `prefix` is a valid issue-key prefix such as `SEDONA`.
pub fn is_valid_prefix(prefix: &str) -> bool {
    issue_prefix().is_some_and(|pattern| pattern.is_match(prefix))
}

/// Turn user input into an issue key.
///
/// Input without a hyphen is treated as a bare issue number and prefixed
/// with `default_prefix`.
///
/// # Example
///
/// ```
/// use sdn::core::naming::qualify_issue_key;
///
/// assert_eq!(qualify_issue_key("123", "SEDONA").unwrap().as_str(), "SEDONA-123");
/// assert_eq!(qualify_issue_key("OPS-7", "SEDONA").unwrap().as_str(), "OPS-7");
/// ```
pub fn qualify_issue_key(input: &str, default_prefix: &str) -> Result<IssueKey, TypeError> {
    let input = input.trim();
    if input.contains('-') {
        IssueKey::new(input)
    } else {
        IssueKey::new(format!("{}-{}", default_prefix, input))
    }
}

/// Derive a branch name from an issue key and its summary.
///
/// Spaces become hyphens and anything outside `[A-Za-z0-9-]` is dropped.
///
/// # Example
///
/// ```
/// use sdn::core::naming::branch_name_for_issue;
/// use sdn::core::types::IssueKey;
///
/// let key = IssueKey::new("SEDONA-42").unwrap();
/// let name = branch_name_for_issue(&key, "Fix login (SSO) bug").unwrap();
/// assert_eq!(name.as_str(), "SEDONA-42-Fix-login-SSO-bug");
/// ```
pub fn branch_name_for_issue(key: &IssueKey, summary: &str) -> Result<BranchName, TypeError> {
    let suffix: String = summary
        .chars()
        .map(|c| if c == ' ' { '-' } else { c })
        .filter(|c| c.is_ascii_alphanumeric() || *c == '-')
        .collect();
    BranchName::new(format!("{}-{}", key, suffix))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bare_number_gets_prefix() {
        assert_eq!(
            qualify_issue_key("123", "SEDONA").unwrap().as_str(),
            "SEDONA-123"
        );
        assert_eq!(
            qualify_issue_key(" 77 ", "OPS").unwrap().as_str(),
            "OPS-77"
        );
    }

    #[test]
    fn qualified_key_kept() {
        assert_eq!(
            qualify_issue_key("CORE-9", "SEDONA").unwrap().as_str(),
            "CORE-9"
        );
    }

    #[test]
    fn garbage_key_rejected() {
        assert!(qualify_issue_key("12/../x", "SEDONA").is_err());
        assert!(qualify_issue_key("", "SEDONA").is_err());
    }

    #[test]
    fn summary_is_sanitized() {
        let key = IssueKey::new("SEDONA-5").unwrap();
        let name = branch_name_for_issue(&key, "Can't save: \"draft\" v2.0 / ünïcode").unwrap();
        assert_eq!(name.as_str(), "SEDONA-5-Cant-save-draft-v20--ncode");
    }

    #[test]
    fn only_spaces_become_hyphens() {
        let key = IssueKey::new("SEDONA-6").unwrap();
        let name = branch_name_for_issue(&key, "tabs\tand  double spaces").unwrap();
        assert_eq!(name.as_str(), "SEDONA-6-tabsand--double-spaces");
    }

    #[test]
    fn empty_summary_still_valid_name() {
        let key = IssueKey::new("SEDONA-5").unwrap();
        assert_eq!(branch_name_for_issue(&key, "").unwrap().as_str(), "SEDONA-5-");
    }

    #[test]
    fn prefix_validation() {
        assert!(is_valid_prefix("SEDONA"));
        assert!(is_valid_prefix("MY-PROJ2"));
        assert!(!is_valid_prefix(""));
        assert!(!is_valid_prefix("9LIVES"));
        assert!(!is_valid_prefix("TRAILING-"));
        assert!(!is_valid_prefix("has space"));
    }
}
