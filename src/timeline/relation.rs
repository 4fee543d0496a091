//! Thread and reply classification
//!
//! A message event is plain, a rich reply, or part of a thread, depending on
//! its `m.relates_to` content. Thread markers win over reply markers: a
//! threaded message often carries a stale `m.in_reply_to` fallback alongside
//! the canonical thread relation, and the thread root is the context worth
//! surfacing.

use super::event::RelatesTo;

/// Matrix relation type tag for threads
const REL_TYPE_THREAD: &str = "m.thread";

/// Classification of a message's relation to an earlier event.
///
/// The related event id lives inside the variant, so "a related id exists iff
/// the message is not plain" holds by construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Relation {
    /// No usable relation metadata
    Plain,
    /// Rich reply to an earlier event
    Reply { event_id: String },
    /// Message inside a thread rooted at an earlier event
    Threaded { event_id: String },
}

impl Relation {
    /// Resolve a relation from the (optional) `m.relates_to` content.
    ///
    /// Precedence: thread, then reply, then plain. A marker whose event id is
    /// missing is treated as unusable and falls through to the next branch.
    pub fn resolve(relates_to: Option<&RelatesTo>) -> Self {
        let Some(relates) = relates_to else {
            return Relation::Plain;
        };

        let is_thread = relates.rel_type.as_deref() == Some(REL_TYPE_THREAD);
        if is_thread {
            if let Some(id) = relates.event_id.as_deref() {
                return Relation::Threaded {
                    event_id: id.to_string(),
                };
            }
        }

        if let Some(reply) = relates.in_reply_to.as_ref() {
            if let Some(id) = reply.event_id.as_deref() {
                return Relation::Reply {
                    event_id: id.to_string(),
                };
            }
        }

        Relation::Plain
    }

    /// The id of the event this message relates to, if any.
    pub fn related_event_id(&self) -> Option<&str> {
        match self {
            Relation::Plain => None,
            Relation::Reply { event_id } | Relation::Threaded { event_id } => Some(event_id),
        }
    }

    pub fn is_plain(&self) -> bool {
        matches!(self, Relation::Plain)
    }
}

/// Flat tag for a resolved relation, carried on formatted messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RelationKind {
    Plain,
    Reply,
    Threaded,
}

impl From<&Relation> for RelationKind {
    fn from(relation: &Relation) -> Self {
        match relation {
            Relation::Plain => RelationKind::Plain,
            Relation::Reply { .. } => RelationKind::Reply,
            Relation::Threaded { .. } => RelationKind::Threaded,
        }
    }
}
