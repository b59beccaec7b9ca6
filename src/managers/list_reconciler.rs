//! List Reconciler — the in-memory bookmark list for one mounted session view.
//!
//! Merges local optimistic edits with confirmed remote state and with
//! asynchronously delivered feed events, de-duplicating overlapping updates.
//! Every merge is idempotent so at-least-once event delivery and arbitrary
//! completion order of remote calls cannot corrupt the list.

use std::collections::HashMap;
use std::time::{SystemTime, UNIX_EPOCH};

use crate::types::bookmark::{Bookmark, FormInput};
use crate::types::errors::ReconcileError;
use crate::types::event::FeedEvent;

/// Trait defining the reconciliation operations for one session's list.
pub trait ListReconcilerTrait {
    /// Seed state from a server snapshot. Direct replace, no merge.
    fn initialize(&mut self, snapshot: Vec<Bookmark>);
    /// Prepend a provisional entry and return its temporary identifier.
    fn add_optimistic(&mut self, title: &str, url: &str) -> Result<String, ReconcileError>;
    /// Replace the provisional entry with the authoritative record.
    /// Returns false (and discards the record) if the entry is already gone.
    fn confirm_add(&mut self, provisional_id: &str, confirmed: Bookmark) -> bool;
    /// Remove a provisional entry after a failed create; returns the original
    /// form input so the caller can restore it.
    fn fail_add(&mut self, provisional_id: &str) -> Option<FormInput>;
    /// Remove an entry immediately; returns it for reversion on remote failure.
    fn delete_optimistic(&mut self, id: &str) -> Option<Bookmark>;
    /// Reinsert an entry removed by `delete_optimistic`, preserving the
    /// creation-descending order. No-op if the id is already present.
    fn revert_delete(&mut self, entry: Bookmark);
    /// Merge an inbound feed event. Returns true if the list changed.
    fn apply_event(&mut self, event: FeedEvent) -> bool;
    /// Case-insensitive substring filter over title and URL. Pure.
    fn search(&self, query: &str) -> Vec<Bookmark>;
    fn bookmarks(&self) -> &[Bookmark];
    fn len(&self) -> usize;
    fn is_empty(&self) -> bool;
}

/// In-memory list reconciler, newest entry first.
pub struct ListReconciler {
    owner_id: String,
    entries: Vec<Bookmark>,
    /// Form input per in-flight provisional id, kept for rollback.
    pending: HashMap<String, FormInput>,
    /// Disambiguates provisional ids created within the same millisecond.
    provisional_seq: u64,
}

impl ListReconciler {
    pub fn new(owner_id: &str) -> Self {
        Self {
            owner_id: owner_id.to_string(),
            entries: Vec::new(),
            pending: HashMap::new(),
            provisional_seq: 0,
        }
    }

    pub fn owner_id(&self) -> &str {
        &self.owner_id
    }

    fn now_millis() -> i64 {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default()
            .as_millis() as i64
    }

    fn find_index(&self, id: &str) -> Option<usize> {
        self.entries.iter().position(|b| b.id == id)
    }

    /// Temporary identifier from the local clock plus a sequence number.
    /// Server ids never carry the `temp-` prefix, so collisions are impossible.
    fn next_provisional_id(&mut self) -> String {
        let id = format!("temp-{}-{}", Self::now_millis(), self.provisional_seq);
        self.provisional_seq += 1;
        id
    }
}

impl ListReconcilerTrait for ListReconciler {
    fn initialize(&mut self, snapshot: Vec<Bookmark>) {
        self.entries = snapshot;
        self.pending.clear();
    }

    fn add_optimistic(&mut self, title: &str, url: &str) -> Result<String, ReconcileError> {
        if title.trim().is_empty() {
            return Err(ReconcileError::EmptyTitle);
        }
        if url.trim().is_empty() {
            return Err(ReconcileError::EmptyUrl);
        }

        let id = self.next_provisional_id();
        self.entries.insert(
            0,
            Bookmark {
                id: id.clone(),
                title: title.to_string(),
                url: url.to_string(),
                owner_id: self.owner_id.clone(),
                created_at: Self::now_millis(),
            },
        );
        self.pending.insert(
            id.clone(),
            FormInput {
                title: title.to_string(),
                url: url.to_string(),
            },
        );
        Ok(id)
    }

    fn confirm_add(&mut self, provisional_id: &str, confirmed: Bookmark) -> bool {
        self.pending.remove(provisional_id);
        match self.find_index(provisional_id) {
            Some(idx) => {
                self.entries[idx] = confirmed;
                true
            }
            // A concurrent delete raced the confirmation; the authoritative
            // record is discarded, not re-inserted.
            None => false,
        }
    }

    fn fail_add(&mut self, provisional_id: &str) -> Option<FormInput> {
        if let Some(idx) = self.find_index(provisional_id) {
            self.entries.remove(idx);
        }
        self.pending.remove(provisional_id)
    }

    fn delete_optimistic(&mut self, id: &str) -> Option<Bookmark> {
        let idx = self.find_index(id)?;
        Some(self.entries.remove(idx))
    }

    fn revert_delete(&mut self, entry: Bookmark) {
        if self.find_index(&entry.id).is_some() {
            return;
        }
        let pos = self
            .entries
            .iter()
            .position(|b| b.created_at <= entry.created_at)
            .unwrap_or(self.entries.len());
        self.entries.insert(pos, entry);
    }

    fn apply_event(&mut self, event: FeedEvent) -> bool {
        // Events outside the active owner scope never mutate the list.
        if event.owner_id() != self.owner_id {
            return false;
        }
        match event {
            FeedEvent::Added(bookmark) => {
                if self.find_index(&bookmark.id).is_some() {
                    return false; // Already present: authored here or duplicate delivery
                }
                self.entries.insert(0, bookmark);
                true
            }
            FeedEvent::Deleted { id, .. } => match self.find_index(&id) {
                Some(idx) => {
                    self.entries.remove(idx);
                    true
                }
                None => false,
            },
            FeedEvent::Updated(bookmark) => match self.find_index(&bookmark.id) {
                Some(idx) => {
                    self.entries[idx] = bookmark;
                    true
                }
                None => false,
            },
        }
    }

    fn search(&self, query: &str) -> Vec<Bookmark> {
        let needle = query.to_lowercase();
        self.entries
            .iter()
            .filter(|b| {
                b.title.to_lowercase().contains(&needle) || b.url.to_lowercase().contains(&needle)
            })
            .cloned()
            .collect()
    }

    fn bookmarks(&self) -> &[Bookmark] {
        &self.entries
    }

    fn len(&self) -> usize {
        self.entries.len()
    }

    fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
