//! core::message
//!
//! Commit message format used on issue branches.
//!
//! # Format
//!
//! Every commit made through `sdn commit` has the shape:
//!
//! ```text
//! SEDONA-123-Fix-login          <- title (branch name)
//!                               <- blank
//! 2026-10-19 08:15:00 UTC       <- timestamp
//! :: fix bug                    <- one bullet per point
//! :: add test
//! ```
//!
//! When a branch is closed, the unpushed commits are parsed back into
//! [`MessageSegment`]s (title and blank dropped), validated, and rendered
//! into one squashed message titled with the branch name.
//!
//! # Invariants
//!
//! - A segment's first line is non-empty and is not a bullet
//! - Every later line starts with [`BULLET`] and is at least
//!   [`MIN_BULLET_LEN`] characters long
//! - Messages violating the format are rejected, never repaired

use chrono::{DateTime, Utc};
use thiserror::Error;

/// Prefix of every bullet line.
pub const BULLET: &str = ":: ";

/// Separator between points in user input.
pub const POINT_SEPARATOR: &str = "::";

/// Shortest acceptable bullet line, marker included. Rejects "wip"-style points.
pub const MIN_BULLET_LEN: usize = 10;

/// Minimum lines in a recorded message: title, blank, timestamp, one bullet.
const MIN_MESSAGE_LINES: usize = 4;

/// Separator between messages in `git log --format=%B%x00` output.
const MESSAGE_SENTINEL: char = '\0';

/// Errors from parsing or building commit messages.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MessageError {
    /// A recorded message does not follow the branch commit format.
    #[error("Found invalid unpushed commit message:\n{raw}")]
    InvalidCommitMessage {
        /// The offending message, as recorded.
        raw: String,
    },

    /// There is nothing to squash.
    #[error("No unpushed commit messages found")]
    NoUnpushedCommits,

    /// The user's commit message has no points.
    #[error("Commit message must contain at least one '::' separated point")]
    EmptyMessage,
}

/// One recorded commit message, minus its title and blank line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MessageSegment {
    lines: Vec<String>,
}

impl MessageSegment {
    /// The validated lines: timestamp first, bullets after.
    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    fn parse(raw: &str) -> Result<Self, MessageError> {
        let invalid = || MessageError::InvalidCommitMessage {
            raw: raw.to_string(),
        };

        let all_lines: Vec<&str> = raw.trim().lines().collect();
        if all_lines.len() < MIN_MESSAGE_LINES {
            return Err(invalid());
        }

        let lines: Vec<String> = all_lines
            .into_iter()
            .skip(2)
            .filter(|l| !l.trim().is_empty())
            .map(|l| l.trim_end().to_string())
            .collect();

        let Some((first, bullets)) = lines.split_first() else {
            return Err(invalid());
        };

        if first.starts_with(POINT_SEPARATOR) {
            return Err(invalid());
        }

        if bullets
            .iter()
            .any(|l| !l.starts_with(BULLET) || l.chars().count() < MIN_BULLET_LEN)
        {
            return Err(invalid());
        }

        Ok(Self { lines })
    }
}

/// Parse the NUL-separated output of
/// `git log --format="%B%x00" <default>..HEAD` into validated segments.
///
/// Blank entries are ignored. Fails on the first invalid message, or when
/// no message is found at all.
pub fn parse_and_validate(raw_log: &str) -> Result<Vec<MessageSegment>, MessageError> {
    let segments = raw_log
        .split(MESSAGE_SENTINEL)
        .filter(|m| !m.trim().is_empty())
        .map(MessageSegment::parse)
        .collect::<Result<Vec<_>, _>>()?;

    if segments.is_empty() {
        return Err(MessageError::NoUnpushedCommits);
    }

    Ok(segments)
}

/// Render the squashed message: the branch name and every segment,
/// separated by blank lines, escaped for embedding in a double-quoted
/// command argument.
pub fn render(branch_name: &str, segments: &[MessageSegment]) -> String {
    let body = std::iter::once(branch_name.to_string())
        .chain(segments.iter().map(|s| s.lines.join("\n")))
        .collect::<Vec<_>>()
        .join("\n\n");
    escape_quoted(&body)
}

/// Build the message for a new commit on `branch_name`.
///
/// `points` is split on `::`; each non-blank point is trimmed and becomes a
/// bullet. The result is escaped like [`render`].
///
/// # Example
///
/// ```
/// use chrono::{TimeZone, Utc};
/// use sdn::core::message::build_commit_message;
///
/// let at = Utc.with_ymd_and_hms(2026, 10, 19, 8, 15, 0).unwrap();
/// let msg = build_commit_message("SEDONA-1-x", "fix bug:: add test", at).unwrap();
/// assert_eq!(msg, "SEDONA-1-x\n\n2026-10-19 08:15:00 UTC\n:: fix bug\n:: add test");
/// ```
pub fn build_commit_message(
    branch_name: &str,
    points: &str,
    at: DateTime<Utc>,
) -> Result<String, MessageError> {
    let bullets = bullets(points)?;
    let message = format!(
        "{}\n\n{}\n{}",
        branch_name,
        at.format("%Y-%m-%d %H:%M:%S UTC"),
        bullets.join("\n")
    );
    Ok(escape_quoted(&message))
}

/// Split user input on `::` into bullet lines.
///
/// Fails with [`MessageError::EmptyMessage`] when no point is left.
pub fn bullets(points: &str) -> Result<Vec<String>, MessageError> {
    let bullets: Vec<String> = points
        .split(POINT_SEPARATOR)
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .map(|p| format!("{}{}", BULLET, p))
        .collect();

    if bullets.is_empty() {
        return Err(MessageError::EmptyMessage);
    }
    Ok(bullets)
}

/// Escape `\` and `"` so the text survives inside a double-quoted argument.
fn escape_quoted(text: &str) -> String {
    text.replace('\\', "\\\\").replace('"', "\\\"")
}
