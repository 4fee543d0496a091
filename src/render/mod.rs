//! Digest rendering
//!
//! Turns fetched activity into the pseudo-markdown report printed to stdout.
//! GitHub activity renders as issue/PR blocks with humanized timestamps;
//! Matrix activity renders as a fenced log block, one line per message in
//! sorted order, with short-hash cross references for replies and threads.

use crate::providers::{Activity, IssueRecord, RepoActivity};
use crate::timeline::{FormattedMessage, RelationKind};
use chrono::{DateTime, Utc};
use std::fmt::Write;

/// Header introducing the whole digest
pub fn digest_header(client_names: &[&str], now: DateTime<Utc>) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "# Initialized {} clients", client_names.len());
    let _ = writeln!(out, "Time: {}", now.to_rfc3339());
    let _ = writeln!(out, "Clients:");
    for name in client_names {
        let _ = writeln!(out, "- {}", name);
    }
    out.push('\n');
    out
}

/// Render one client's activity under its heading
pub fn render_client(
    display_name: &str,
    activity: &Activity,
    body_limit: i64,
    now: DateTime<Utc>,
) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "# {}\n", display_name);

    match activity {
        Activity::Repo(repo) => out.push_str(&render_repo(repo, body_limit, now)),
        Activity::Room(messages) => out.push_str(&render_room(messages)),
    }

    out
}

/// Note rendered in place of a client whose fetch failed
pub fn render_client_failure(display_name: &str, error: &str) -> String {
    format!("# {}\n\n> Fetch failed: {}\n\n", display_name, error)
}

fn render_repo(repo: &RepoActivity, body_limit: i64, now: DateTime<Utc>) -> String {
    let mut out = String::new();
    for issue in &repo.issues {
        out.push_str(&render_issue_block("ISSUE", issue, body_limit, now));
    }
    for pull in &repo.pulls {
        out.push_str(&render_issue_block("PR", pull, body_limit, now));
    }
    out
}

fn render_issue_block(kind: &str, record: &IssueRecord, body_limit: i64, now: DateTime<Utc>) -> String {
    let body = match record.body.as_deref() {
        Some(body) if !body.is_empty() => truncate_body(body, body_limit),
        _ => "\n```\nNo body\n```".to_string(),
    };
    let author = record.author.as_deref().unwrap_or("unknown");

    let mut out = String::new();
    let _ = writeln!(out, "## {}: {} - {}\n", kind, record.number, record.title);
    let _ = writeln!(out, "- Author:\t`{}`", author);
    let _ = writeln!(out, "- URL:\t{}", record.url);
    let _ = writeln!(out, "- Created:\t`{}`", days_ago_from_iso(&record.created_at, now));
    let _ = writeln!(out, "- Updated:\t`{}`", days_ago_from_iso(&record.updated_at, now));
    let _ = writeln!(out, "{}", body);
    out.push_str("\n---\n\n");
    out
}

fn render_room(messages: &[FormattedMessage]) -> String {
    let mut out = String::new();
    out.push_str("```log\n");
    for message in messages {
        out.push_str(&render_message_line(message));
        out.push('\n');
    }
    out.push_str("```\n");
    out
}

/// One log line: `[HH:MM:SS] (hash) <nickname>` plus the relation annotation
fn render_message_line(message: &FormattedMessage) -> String {
    let prefix = format!(
        "[{}] ({}) <{}>",
        format_clock(message.timestamp),
        message.event_hash,
        message.nickname
    );

    match (message.relation, message.related_hash.as_deref()) {
        (RelationKind::Threaded, Some(hash)) => {
            format!("{} (Th: {}) {}", prefix, hash, message.body)
        }
        (RelationKind::Reply, Some(hash)) => {
            format!("{} (Re: {}): {}", prefix, hash, message.body)
        }
        _ => format!("{}: {}", prefix, message.body),
    }
}

/// Truncate a body to the configured character budget.
///
/// A zero or negative budget disables truncation. Truncation counts
/// characters, not bytes, so multi-byte text never splits mid-codepoint.
fn truncate_body(body: &str, body_limit: i64) -> String {
    if body_limit > 0 {
        body.chars().take(body_limit as usize).collect()
    } else {
        body.to_string()
    }
}

/// Wall-clock time (UTC) for a message timestamp in epoch milliseconds
fn format_clock(timestamp_ms: i64) -> String {
    DateTime::from_timestamp_millis(timestamp_ms)
        .map(|dt| dt.format("%H:%M:%S").to_string())
        .unwrap_or_else(|| "??:??:??".to_string())
}

/// Humanize an ISO 8601 timestamp as `{n} days ago: YYYY-MM-DD`.
///
/// An unparseable timestamp is passed through unchanged rather than failing
/// the report.
fn days_ago_from_iso(iso: &str, now: DateTime<Utc>) -> String {
    match DateTime::parse_from_rfc3339(iso) {
        Ok(past) => {
            let past = past.with_timezone(&Utc);
            let days = (now - past).num_days();
            format!("{} days ago: {}", days, past.format("%Y-%m-%d"))
        }
        Err(_) => iso.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn message(relation: RelationKind, related_hash: Option<&str>) -> FormattedMessage {
        FormattedMessage {
            nickname: "@a:x".to_string(),
            display_name: Some("Alice".to_string()),
            sender: "@a:x".to_string(),
            body: "hello".to_string(),
            timestamp: 3_600_000, // 01:00:00 UTC
            relation,
            related_event_id: related_hash.map(|h| format!("${}", h)),
            event_hash: "aaaa1111".to_string(),
            related_hash: related_hash.map(String::from),
        }
    }

    fn fixed_now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 8, 30, 12, 0, 0).unwrap()
    }

    #[test]
    fn test_plain_message_line() {
        let line = render_message_line(&message(RelationKind::Plain, None));
        assert_eq!(line, "[01:00:00] (aaaa1111) <@a:x>: hello");
    }

    #[test]
    fn test_reply_message_line() {
        let line = render_message_line(&message(RelationKind::Reply, Some("bbbb2222")));
        assert_eq!(line, "[01:00:00] (aaaa1111) <@a:x> (Re: bbbb2222): hello");
    }

    #[test]
    fn test_threaded_message_line() {
        let line = render_message_line(&message(RelationKind::Threaded, Some("cccc3333")));
        assert_eq!(line, "[01:00:00] (aaaa1111) <@a:x> (Th: cccc3333) hello");
    }

    #[test]
    fn test_room_renders_each_message_once_in_order() {
        let messages = vec![
            message(RelationKind::Plain, None),
            message(RelationKind::Reply, Some("bbbb2222")),
        ];
        let block = render_room(&messages);

        assert!(block.starts_with("```log\n"));
        assert!(block.ends_with("```\n"));
        assert_eq!(block.matches("<@a:x>").count(), 2);
        let plain_pos = block.find("hello").unwrap();
        let reply_pos = block.find("(Re:").unwrap();
        assert!(plain_pos < reply_pos);
    }

    #[test]
    fn test_days_ago_from_iso() {
        let rendered = days_ago_from_iso("2026-08-20T12:00:00Z", fixed_now());
        assert_eq!(rendered, "10 days ago: 2026-08-20");
    }

    #[test]
    fn test_days_ago_unparseable_passthrough() {
        assert_eq!(days_ago_from_iso("yesterday", fixed_now()), "yesterday");
    }

    #[test]
    fn test_truncate_body() {
        assert_eq!(truncate_body("abcdef", 3), "abc");
        assert_eq!(truncate_body("abcdef", 0), "abcdef");
        assert_eq!(truncate_body("abcdef", -1), "abcdef");
        // Character-based, not byte-based
        assert_eq!(truncate_body("héllo", 2), "hé");
    }

    #[test]
    fn test_issue_block() {
        let record = IssueRecord {
            number: 42,
            title: "Fix the frobnicator".to_string(),
            body: Some("It is broken in several ways".to_string()),
            url: "https://github.com/o/r/issues/42".to_string(),
            author: Some("alice".to_string()),
            created_at: "2026-08-28T12:00:00Z".to_string(),
            updated_at: "2026-08-29T12:00:00Z".to_string(),
        };

        let block = render_issue_block("ISSUE", &record, 10, fixed_now());
        assert!(block.contains("## ISSUE: 42 - Fix the frobnicator"));
        assert!(block.contains("- Author:\t`alice`"));
        assert!(block.contains("2 days ago: 2026-08-28"));
        // Truncated to the budget
        assert!(block.contains("It is brok\n"));
        assert!(!block.contains("It is broken"));
    }

    #[test]
    fn test_issue_block_no_body() {
        let record = IssueRecord {
            number: 1,
            title: "t".to_string(),
            body: None,
            url: "u".to_string(),
            author: None,
            created_at: "2026-08-28T12:00:00Z".to_string(),
            updated_at: "2026-08-28T12:00:00Z".to_string(),
        };

        let block = render_issue_block("PR", &record, 100, fixed_now());
        assert!(block.contains("No body"));
        assert!(block.contains("`unknown`"));
    }

    #[test]
    fn test_digest_header() {
        let header = digest_header(&["work", "chat"], fixed_now());
        assert!(header.contains("# Initialized 2 clients"));
        assert!(header.contains("- work"));
        assert!(header.contains("- chat"));
    }
}
