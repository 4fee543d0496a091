//! Display-name resolution from membership events
//!
//! Matrix message events carry only the sender's stable id; the human-facing
//! display name lives in `m.room.member` state events that happen to appear
//! in the same fetch window. This resolver mines those for a sender -> name
//! mapping. Later membership events overwrite earlier ones (batch order, not
//! chronological order).

use super::event::RawEvent;
use std::collections::HashMap;

/// Sender id to display name mapping for one batch.
#[derive(Debug, Default)]
pub struct DisplayNames {
    names: HashMap<String, String>,
}

impl DisplayNames {
    /// Build the mapping from the membership sub-sequence of a batch.
    ///
    /// Events missing a sender or carrying an empty display name are ignored.
    pub fn from_member_events(members: &[RawEvent]) -> Self {
        let mut names = HashMap::new();

        for event in members {
            let Some(sender) = event.sender.as_deref().filter(|s| !s.is_empty()) else {
                continue;
            };
            match event.content.displayname.as_deref() {
                Some(name) if !name.is_empty() => {
                    names.insert(sender.to_string(), name.to_string());
                }
                _ => {}
            }
        }

        Self { names }
    }

    /// Look up the display name for a sender.
    ///
    /// Absence is an expected outcome (the sender's membership event fell
    /// outside the fetch window), not an error.
    pub fn resolve(&self, sender: &str) -> Option<&str> {
        self.names.get(sender).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}
