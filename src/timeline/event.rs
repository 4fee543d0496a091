//! Event normalization
//!
//! The Matrix `/messages` endpoint returns a flat chunk of loosely structured
//! timeline events. This module is the only place that touches untyped JSON:
//! each event is parsed fallibly into a typed [`RawEvent`] here, and only
//! typed records flow downstream.
//!
//! Normalization splits the chunk into membership events (mined for display
//! names) and message events (the digest payload), preserving batch order.
//! Every other event type (reactions, state changes, encryption events) is
//! dropped on the floor. A malformed event is logged and skipped; it never
//! aborts the batch.

use serde::Deserialize;
use serde_json::Value;
use tracing::warn;

/// Matrix event type tag for room membership changes
const EVENT_TYPE_MEMBER: &str = "m.room.member";
/// Matrix event type tag for room messages
const EVENT_TYPE_MESSAGE: &str = "m.room.message";

/// A single timeline event, as deserialized from the wire.
///
/// Every field besides the type tag is optional; absence is resolved to
/// sentinels or skips downstream, never an error.
#[derive(Debug, Clone, Deserialize)]
pub struct RawEvent {
    /// Event type tag (e.g. "m.room.message")
    #[serde(rename = "type")]
    pub kind: String,

    /// Fully-qualified sender id (e.g. "@alice:example.org")
    #[serde(default)]
    pub sender: Option<String>,

    /// Event content; shape varies per event type
    #[serde(default)]
    pub content: EventContent,

    /// Origin server timestamp, epoch milliseconds
    #[serde(default)]
    pub origin_server_ts: Option<i64>,

    /// Full event identifier
    #[serde(default)]
    pub event_id: Option<String>,
}

/// Typed view of the event content fields this pipeline reads.
///
/// Unknown content keys are ignored by serde; membership events carry
/// `displayname`, message events carry `body` and optionally `m.relates_to`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct EventContent {
    #[serde(default)]
    pub body: Option<String>,

    #[serde(default)]
    pub displayname: Option<String>,

    #[serde(rename = "m.relates_to", default)]
    pub relates_to: Option<RelatesTo>,
}

/// The `m.relates_to` aggregation on a message event.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RelatesTo {
    /// Relation type; `"m.thread"` marks a threaded reply
    #[serde(default)]
    pub rel_type: Option<String>,

    /// Target event id (the thread root for threaded replies)
    #[serde(default)]
    pub event_id: Option<String>,

    /// Rich-reply marker; presence alone classifies the message as a reply
    #[serde(rename = "m.in_reply_to", default)]
    pub in_reply_to: Option<InReplyTo>,
}

/// The `m.in_reply_to` block inside a relation.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct InReplyTo {
    #[serde(default)]
    pub event_id: Option<String>,
}

/// A raw batch split into the two event streams the pipeline consumes.
///
/// Both sub-sequences preserve the relative order of the original chunk.
#[derive(Debug, Default)]
pub struct NormalizedBatch {
    pub members: Vec<RawEvent>,
    pub messages: Vec<RawEvent>,
}

/// Normalize one raw chunk of timeline events.
///
/// Events that fail to parse are skipped with a warning; the rest of the
/// batch is unaffected.
pub fn normalize(chunk: &[Value]) -> NormalizedBatch {
    let mut batch = NormalizedBatch::default();

    for raw in chunk {
        let event: RawEvent = match serde_json::from_value(raw.clone()) {
            Ok(event) => event,
            Err(e) => {
                warn!(error = %e, "Skipping malformed timeline event");
                continue;
            }
        };

        match event.kind.as_str() {
            EVENT_TYPE_MEMBER => batch.members.push(event),
            EVENT_TYPE_MESSAGE => batch.messages.push(event),
            _ => {}
        }
    }

    batch
}
