//! Change Feed event types.
//!
//! Events cross the feed as loosely-typed `{event, payload}` JSON messages and
//! are decoded into the closed [`FeedEvent`] variant type at the feed boundary,
//! before any of them reach the reconciler.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::types::bookmark::Bookmark;
use crate::types::errors::FeedError;

/// Wire event name for a bookmark creation.
pub const EVENT_ADDED: &str = "bookmark-added";
/// Wire event name for a bookmark deletion.
pub const EVENT_DELETED: &str = "bookmark-deleted";
/// Wire event name for a bookmark update.
pub const EVENT_UPDATED: &str = "bookmark-updated";

/// Raw feed message as transported on a channel.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WireMessage {
    pub event: String,
    pub payload: Value,
}

/// Deletion payload: the removed row's identity plus its owner, so the
/// owner filter applies uniformly to every event kind.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct DeletedPayload {
    id: String,
    owner_id: String,
}

/// A decoded, validated change-feed event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FeedEvent {
    /// A bookmark was created in another (or this) session.
    Added(Bookmark),
    /// A bookmark was deleted.
    Deleted { id: String, owner_id: String },
    /// A bookmark's fields changed in place.
    Updated(Bookmark),
}

impl FeedEvent {
    /// Owner scope of the event, used for client-side filtering.
    pub fn owner_id(&self) -> &str {
        match self {
            FeedEvent::Added(b) | FeedEvent::Updated(b) => &b.owner_id,
            FeedEvent::Deleted { owner_id, .. } => owner_id,
        }
    }

    /// Identifier of the bookmark the event concerns.
    pub fn bookmark_id(&self) -> &str {
        match self {
            FeedEvent::Added(b) | FeedEvent::Updated(b) => &b.id,
            FeedEvent::Deleted { id, .. } => id,
        }
    }

    /// Encodes the event into its wire form.
    pub fn to_wire(&self) -> Result<WireMessage, FeedError> {
        let (event, payload) = match self {
            FeedEvent::Added(b) => (EVENT_ADDED, serde_json::to_value(b)),
            FeedEvent::Updated(b) => (EVENT_UPDATED, serde_json::to_value(b)),
            FeedEvent::Deleted { id, owner_id } => (
                EVENT_DELETED,
                serde_json::to_value(DeletedPayload {
                    id: id.clone(),
                    owner_id: owner_id.clone(),
                }),
            ),
        };
        let payload = payload
            .map_err(|e| FeedError::Decode(format!("Failed to encode payload: {}", e)))?;
        Ok(WireMessage {
            event: event.to_string(),
            payload,
        })
    }

    /// Decodes and validates a wire message.
    ///
    /// Unknown event names and malformed payloads are rejected here so the
    /// reconciler only ever sees well-formed events.
    pub fn from_wire(msg: &WireMessage) -> Result<FeedEvent, FeedError> {
        match msg.event.as_str() {
            EVENT_ADDED => {
                let bookmark: Bookmark = serde_json::from_value(msg.payload.clone())
                    .map_err(|e| FeedError::Decode(format!("Bad '{}' payload: {}", EVENT_ADDED, e)))?;
                Ok(FeedEvent::Added(bookmark))
            }
            EVENT_UPDATED => {
                let bookmark: Bookmark = serde_json::from_value(msg.payload.clone())
                    .map_err(|e| FeedError::Decode(format!("Bad '{}' payload: {}", EVENT_UPDATED, e)))?;
                Ok(FeedEvent::Updated(bookmark))
            }
            EVENT_DELETED => {
                let payload: DeletedPayload = serde_json::from_value(msg.payload.clone())
                    .map_err(|e| FeedError::Decode(format!("Bad '{}' payload: {}", EVENT_DELETED, e)))?;
                Ok(FeedEvent::Deleted {
                    id: payload.id,
                    owner_id: payload.owner_id,
                })
            }
            other => Err(FeedError::Decode(format!("Unknown event: {}", other))),
        }
    }
}
