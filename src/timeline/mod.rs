//! Matrix conversation reconstruction
//!
//! Turns one flat, unordered chunk of raw room events into a threaded,
//! chronologically ordered, human-attributable message log:
//!
//! 1. **event**: parse the chunk into typed records, splitting membership
//!    events from message events (everything else is dropped)
//! 2. **names**: resolve sender display names from the membership events
//! 3. **relation**: classify each message as plain, reply, or threaded
//! 4. **hash**: shorten event ids for compact cross-referencing
//! 5. assemble: merge into [`FormattedMessage`] records, stably sorted by
//!    origin server timestamp
//!
//! Each stage consumes the whole output of the previous one; the pipeline is
//! synchronous and operates on a single in-memory batch.

pub mod event;
pub mod hash;
pub mod names;
pub mod relation;

pub use event::{EventContent, InReplyTo, NormalizedBatch, RawEvent, RelatesTo};
pub use hash::{short_hash, short_hash_opt};
pub use names::DisplayNames;
pub use relation::{Relation, RelationKind};

use serde_json::Value;

/// Sentinel for an unknown sender or unresolvable event hash.
///
/// Centralized here so formatting never invents ad hoc placeholder strings.
pub const UNKNOWN: &str = "unknown";

/// One fully resolved message, ready for rendering.
///
/// Constructed fresh per fetch from the current batch and immutable after
/// construction. `related_event_id` and `related_hash` are populated iff the
/// relation is not plain.
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct FormattedMessage {
    /// Sender identifier, kept distinct from the resolved display name
    pub nickname: String,
    /// Human-friendly name from membership events; absent when the sender's
    /// membership event fell outside the fetch window
    pub display_name: Option<String>,
    pub sender: String,
    pub body: String,
    /// Epoch milliseconds from `origin_server_ts`
    pub timestamp: i64,
    pub relation: RelationKind,
    pub related_event_id: Option<String>,
    /// Short form of this message's event id
    pub event_hash: String,
    /// Short form of the related event id, when a relation exists
    pub related_hash: Option<String>,
}

impl FormattedMessage {
    fn from_event(event: &RawEvent, names: &DisplayNames) -> Self {
        let sender = event.sender.clone().unwrap_or_else(|| UNKNOWN.to_string());
        let display_name = names.resolve(&sender).map(String::from);
        let body = event.content.body.clone().unwrap_or_default();
        let timestamp = event.origin_server_ts.unwrap_or(0);
        let event_hash = short_hash_opt(event.event_id.as_deref());

        let relation = Relation::resolve(event.content.relates_to.as_ref());
        let related_event_id = relation.related_event_id().map(String::from);
        let related_hash = related_event_id.as_deref().map(short_hash);

        Self {
            nickname: sender.clone(),
            display_name,
            sender,
            body,
            timestamp,
            relation: RelationKind::from(&relation),
            related_event_id,
            event_hash,
            related_hash,
        }
    }
}

/// Run the full pipeline over one raw chunk.
///
/// The returned sequence is sorted non-decreasingly by timestamp; ties keep
/// their batch-relative order (the sort is stable), which is the only global
/// ordering guarantee made here.
pub fn assemble(chunk: &[Value]) -> Vec<FormattedMessage> {
    let batch = event::normalize(chunk);
    let names = DisplayNames::from_member_events(&batch.members);

    let mut messages: Vec<FormattedMessage> = batch
        .messages
        .iter()
        .map(|event| FormattedMessage::from_event(event, &names))
        .collect();

    messages.sort_by_key(|m| m.timestamp);
    messages
}
