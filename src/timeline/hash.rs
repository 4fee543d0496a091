//! Short hashes for Matrix event identifiers
//!
//! Full event ids (`$opaque:server` or older `!room:server$opaque` forms) are
//! too long for a readable log line. The digest cross-references events by the
//! first 8 characters of the opaque part after the last `$`.

use super::UNKNOWN;

/// Derive a stable short hash from a full event identifier.
///
/// Takes the substring after the last `$` and truncates it to 8 characters.
/// An empty identifier yields the [`UNKNOWN`] sentinel rather than an error;
/// an identifier with no `$` at all is truncated as-is.
pub fn short_hash(event_id: &str) -> String {
    if event_id.is_empty() {
        return UNKNOWN.to_string();
    }
    let suffix = event_id.rsplit('$').next().unwrap_or(event_id);
    suffix.chars().take(8).collect()
}

/// Short hash for an optional identifier, mapping absence to [`UNKNOWN`].
pub fn short_hash_opt(event_id: Option<&str>) -> String {
    match event_id {
        Some(id) => short_hash(id),
        None => UNKNOWN.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_short_hash_room_prefixed() {
        assert_eq!(short_hash("!room:server$abcdefgh12345"), "abcdefgh");
    }

    #[test]
    fn test_short_hash_plain_event_id() {
        assert_eq!(short_hash("$xT9fQ2mL0pZr:matrix.org"), "xT9fQ2mL");
    }

    #[test]
    fn test_short_hash_takes_last_dollar() {
        // Prefixes may themselves contain `$`
        assert_eq!(short_hash("a$b$ccccccccc"), "cccccccc");
    }

    #[test]
    fn test_short_hash_empty_is_unknown() {
        assert_eq!(short_hash(""), UNKNOWN);
        assert_eq!(short_hash_opt(None), UNKNOWN);
    }

    #[test]
    fn test_short_hash_no_dollar() {
        assert_eq!(short_hash("abcdef"), "abcdef");
        assert_eq!(short_hash("abcdefghij"), "abcdefgh");
    }

    #[test]
    fn test_short_hash_shorter_than_eight() {
        assert_eq!(short_hash("$abc"), "abc");
    }
}
