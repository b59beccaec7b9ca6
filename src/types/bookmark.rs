use serde::{Deserialize, Serialize};

/// A saved bookmark as held in the session list.
///
/// `created_at` is unix milliseconds; the list invariant is descending
/// `created_at` order, newest first. Provisional entries (not yet confirmed by
/// the store) carry a locally generated `temp-` id until confirmation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bookmark {
    pub id: String,
    pub title: String,
    pub url: String,
    pub owner_id: String,
    pub created_at: i64,
}

impl Bookmark {
    /// True while this entry is a locally synthesized stand-in awaiting
    /// confirmation from the remote store.
    pub fn is_provisional(&self) -> bool {
        self.id.starts_with("temp-")
    }
}

/// Payload for a remote create request. The store assigns `id` and
/// `created_at` on insert.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewBookmark {
    pub title: String,
    pub url: String,
    pub owner_id: String,
}

/// Pre-submission form content, returned to the caller when a create fails so
/// the user can retry without retyping.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormInput {
    pub title: String,
    pub url: String,
}
