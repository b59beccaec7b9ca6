//! View Session — one mounted dashboard view.
//!
//! Owns the list reconciler for the lifetime of the view, drives the
//! optimistic create/delete flows against the remote store, and consumes the
//! feed subscription as a single inbound stream of decoded events. The
//! subscription is acquired on mount and released unconditionally when the
//! session is unmounted or dropped.
//!
//! All work is cooperative on the caller's event loop; remote calls are async
//! and may complete in any order relative to inbound feed events.

use std::sync::Arc;

use crate::managers::list_reconciler::{ListReconciler, ListReconcilerTrait};
use crate::services::change_feed::{owner_channel, ChangeFeedTrait, FeedSubscription};
use crate::services::store_client::RemoteStoreTrait;
use crate::types::bookmark::{Bookmark, FormInput, NewBookmark};
use crate::types::errors::{FeedError, SessionError};
use crate::types::event::FeedEvent;
use crate::types::session::AuthSession;

/// A mounted session view over one owner's bookmark list.
pub struct ViewSession<S, F>
where
    S: RemoteStoreTrait,
    F: ChangeFeedTrait,
{
    owner_id: String,
    channel: String,
    reconciler: ListReconciler,
    store: S,
    feed: Arc<F>,
    subscription: Option<FeedSubscription>,
}

impl<S, F> ViewSession<S, F>
where
    S: RemoteStoreTrait,
    F: ChangeFeedTrait,
{
    /// Mounts the view: fetches the initial snapshot, subscribes to the
    /// owner's channel, and seeds the reconciler.
    pub async fn mount(store: S, feed: Arc<F>, session: &AuthSession) -> Result<Self, SessionError> {
        let snapshot = store
            .list(&session.user_id)
            .await
            .map_err(|e| SessionError::StoreUnavailable(e.to_string()))?;

        let channel = owner_channel(&session.user_id);
        let subscription = feed
            .subscribe(&channel)
            .map_err(|e| SessionError::FeedUnavailable(e.to_string()))?;

        let mut reconciler = ListReconciler::new(&session.user_id);
        reconciler.initialize(snapshot);

        Ok(Self {
            owner_id: session.user_id.clone(),
            channel,
            reconciler,
            store,
            feed,
            subscription: Some(subscription),
        })
    }

    /// Adds a bookmark optimistically, then confirms it against the store.
    ///
    /// On remote success the provisional entry is replaced with the
    /// authoritative record and the change is announced on the feed. On remote
    /// failure the provisional entry is removed and the error carries the
    /// original form input for restoration.
    pub async fn add_bookmark(&mut self, title: &str, url: &str) -> Result<Bookmark, SessionError> {
        let provisional_id = self
            .reconciler
            .add_optimistic(title, url)
            .map_err(|e| SessionError::InvalidInput(e.to_string()))?;

        let record = NewBookmark {
            title: title.to_string(),
            url: url.to_string(),
            owner_id: self.owner_id.clone(),
        };

        match self.store.create(&record).await {
            Ok(confirmed) => {
                let applied = self
                    .reconciler
                    .confirm_add(&provisional_id, confirmed.clone());
                // Not announced if a concurrent delete already removed the
                // entry; the delete's own announcement wins.
                if applied {
                    let _ = self
                        .feed
                        .publish(&self.channel, &FeedEvent::Added(confirmed.clone()));
                }
                Ok(confirmed)
            }
            Err(e) => {
                let restored =
                    self.reconciler
                        .fail_add(&provisional_id)
                        .unwrap_or_else(|| FormInput {
                            title: title.to_string(),
                            url: url.to_string(),
                        });
                Err(SessionError::CreateFailed {
                    message: e.to_string(),
                    restored,
                })
            }
        }
    }

    /// Deletes a bookmark optimistically, then confirms against the store.
    ///
    /// The caller is responsible for having obtained user confirmation; this
    /// trusts the call as confirmed intent. On remote failure the removal is
    /// reverted so the list stays consistent with the store.
    pub async fn delete_bookmark(&mut self, id: &str) -> Result<(), SessionError> {
        let removed = self
            .reconciler
            .delete_optimistic(id)
            .ok_or_else(|| SessionError::UnknownBookmark(id.to_string()))?;

        match self.store.delete(id).await {
            Ok(()) => {
                let _ = self.feed.publish(
                    &self.channel,
                    &FeedEvent::Deleted {
                        id: id.to_string(),
                        owner_id: self.owner_id.clone(),
                    },
                );
                Ok(())
            }
            Err(e) => {
                self.reconciler.revert_delete(removed);
                Err(SessionError::DeleteFailed(e.to_string()))
            }
        }
    }

    /// Drains every queued feed event into the reconciler.
    ///
    /// Self-announced events come back on the channel too; the idempotent
    /// merge makes them no-ops. Returns the number of events that changed
    /// the list.
    pub fn pump_feed(&mut self) -> Result<usize, FeedError> {
        let subscription = match self.subscription.as_mut() {
            Some(s) => s,
            None => return Ok(0),
        };
        let mut applied = 0;
        while let Some(event) = subscription.try_next()? {
            if self.reconciler.apply_event(event) {
                applied += 1;
            }
        }
        Ok(applied)
    }

    /// Awaits the next feed event and merges it. Returns the decoded event.
    pub async fn next_feed_event(&mut self) -> Result<FeedEvent, FeedError> {
        let subscription = self
            .subscription
            .as_mut()
            .ok_or_else(|| FeedError::ChannelClosed(self.channel.clone()))?;
        let event = subscription.next().await?;
        self.reconciler.apply_event(event.clone());
        Ok(event)
    }

    /// Case-insensitive display filter over the current list.
    pub fn search(&self, query: &str) -> Vec<Bookmark> {
        self.reconciler.search(query)
    }

    pub fn bookmarks(&self) -> &[Bookmark] {
        self.reconciler.bookmarks()
    }

    pub fn owner_id(&self) -> &str {
        &self.owner_id
    }

    pub fn channel(&self) -> &str {
        &self.channel
    }

    pub fn is_mounted(&self) -> bool {
        self.subscription.is_some()
    }

    /// Unmounts the view, releasing the feed subscription. Dropping the
    /// session has the same effect.
    pub fn unmount(mut self) {
        self.subscription.take();
    }
}
