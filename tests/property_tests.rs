//! Property-based tests for naming and commit messages.
//!
//! These tests use proptest to verify invariants hold across
//! randomly generated inputs.

use chrono::{TimeZone, Utc};
use proptest::prelude::*;

use sdn::core::message::{build_commit_message, parse_and_validate, MIN_BULLET_LEN};
use sdn::core::naming::{branch_name_for_issue, is_valid_prefix, qualify_issue_key};
use sdn::core::types::{BranchName, IssueKey};

/// Strategy for issue keys such as `SEDONA-123`.
fn issue_key() -> impl Strategy<Value = IssueKey> {
    ("[A-Z]{1,8}", 1u32..100_000)
        .prop_map(|(prefix, n)| IssueKey::new(format!("{}-{}", prefix, n)).unwrap())
}

/// Strategy for points long enough to pass close-time validation.
fn point() -> impl Strategy<Value = String> {
    "[a-zA-Z][a-zA-Z0-9 \"'.,]{5,40}[a-zA-Z0-9.]"
}

proptest! {
    #[test]
    fn branch_name_from_any_summary_is_valid_or_rejected(key in issue_key(), summary in ".*") {
        // Any summary yields either a valid branch name or a typed error
        if let Ok(name) = branch_name_for_issue(&key, &summary) {
            prop_assert!(BranchName::new(name.as_str()).is_ok());
            let key_prefix = format!("{}-", key);
            prop_assert!(name.as_str().starts_with(&key_prefix));
            prop_assert!(name
                .as_str()
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-'));
        }
    }

    #[test]
    fn bare_numbers_get_the_prefix(prefix in "[A-Z]{1,8}", n in 0u32..1_000_000) {
        let key = qualify_issue_key(&n.to_string(), &prefix).unwrap();
        prop_assert_eq!(key.as_str(), format!("{}-{}", prefix, n));
    }

    #[test]
    fn qualified_keys_are_kept(key in issue_key(), prefix in "[A-Z]{1,8}") {
        prop_assert_eq!(qualify_issue_key(key.as_str(), &prefix).unwrap(), key);
    }

    #[test]
    fn letter_prefixes_are_valid(prefix in "[A-Za-z][A-Za-z0-9]{0,10}") {
        prop_assert!(is_valid_prefix(&prefix));
    }

    #[test]
    fn built_messages_pass_close_validation(
        points in prop::collection::vec(point(), 1..6),
        secs in 0i64..2_000_000_000,
    ) {
        let at = Utc.timestamp_opt(secs, 0).unwrap();
        let input = points.join(":: ");
        let message = build_commit_message("SEDONA-1-x", &input, at).unwrap();

        // What git records is the unescaped message
        let recorded = message.replace("\\\"", "\"").replace("\\\\", "\\");
        let segments = parse_and_validate(&format!("{}\0", recorded)).unwrap();

        prop_assert_eq!(segments.len(), 1);
        let lines = segments[0].lines();
        prop_assert_eq!(lines.len(), points.len() + 1);
        for (line, point) in lines[1..].iter().zip(&points) {
            prop_assert!(line.chars().count() >= MIN_BULLET_LEN);
            prop_assert_eq!(line, &format!(":: {}", point.trim()));
        }
    }

    #[test]
    fn escaped_messages_survive_tokenizing(
        points in prop::collection::vec(point(), 1..4),
        backslashes in "[a-z\\\\]{0,5}",
    ) {
        let at = Utc.with_ymd_and_hms(2026, 10, 19, 8, 15, 0).unwrap();
        let input = format!("{} {}", points.join(":: "), backslashes);
        let message = build_commit_message("SEDONA-1-x", &input, at).unwrap();

        let args = shell_words::split(&format!("commit -m \"{}\"", message)).unwrap();
        prop_assert_eq!(args.len(), 3);
        prop_assert!(args[2].contains(points[0].trim()));
        prop_assert!(!args[2].contains("\\\""));
    }
}
