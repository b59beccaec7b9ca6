//! Change Feed client for Smartmark.
//!
//! Owner-scoped broadcast channels: every session for an owner subscribes to
//! `user-{owner_id}-bookmarks` and announces its own confirmed changes there.
//! Messages cross the channel in wire form and are decoded into [`FeedEvent`]
//! at the subscription boundary; the reconciler never sees raw payloads.
//!
//! A subscription is held for the lifetime of one mounted view and released
//! when the handle is dropped.

use std::collections::HashMap;
use std::sync::Mutex;

use tokio::sync::broadcast;
use tokio::sync::broadcast::error::{RecvError, TryRecvError};
use uuid::Uuid;

use crate::types::errors::FeedError;
use crate::types::event::{FeedEvent, WireMessage};

/// Channel name for one owner's bookmark events.
pub fn owner_channel(owner_id: &str) -> String {
    format!("user-{}-bookmarks", owner_id)
}

/// Trait defining the change-feed client contract.
pub trait ChangeFeedTrait {
    /// Subscribe to a channel. The returned handle receives every event
    /// published after this call; dropping it unsubscribes.
    fn subscribe(&self, channel: &str) -> Result<FeedSubscription, FeedError>;
    /// Publish an event to a channel. Returns the number of subscribers that
    /// received it; publishing to an idle channel is not an error.
    fn publish(&self, channel: &str, event: &FeedEvent) -> Result<usize, FeedError>;
}

/// In-process broadcast feed broker.
///
/// Stands in for the managed backend's pub/sub service behind the same
/// contract, which is all the reconciliation core depends on.
pub struct BroadcastFeed {
    channels: Mutex<HashMap<String, broadcast::Sender<WireMessage>>>,
    capacity: usize,
}

impl BroadcastFeed {
    pub fn new(capacity: usize) -> Self {
        Self {
            channels: Mutex::new(HashMap::new()),
            capacity: capacity.max(1),
        }
    }

    fn sender(&self, channel: &str) -> Result<broadcast::Sender<WireMessage>, FeedError> {
        let mut channels = self
            .channels
            .lock()
            .map_err(|_| FeedError::ChannelClosed(channel.to_string()))?;
        let sender = channels
            .entry(channel.to_string())
            .or_insert_with(|| broadcast::channel(self.capacity).0);
        Ok(sender.clone())
    }
}

impl ChangeFeedTrait for BroadcastFeed {
    fn subscribe(&self, channel: &str) -> Result<FeedSubscription, FeedError> {
        let sender = self.sender(channel)?;
        Ok(FeedSubscription {
            id: Uuid::new_v4().to_string(),
            channel: channel.to_string(),
            receiver: sender.subscribe(),
        })
    }

    fn publish(&self, channel: &str, event: &FeedEvent) -> Result<usize, FeedError> {
        let message = event.to_wire()?;
        let sender = self.sender(channel)?;
        // A send error only means no live subscribers on the channel.
        Ok(sender.send(message).unwrap_or(0))
    }
}

/// A live subscription to one channel. Dropping it releases the subscription.
pub struct FeedSubscription {
    id: String,
    channel: String,
    receiver: broadcast::Receiver<WireMessage>,
}

impl FeedSubscription {
    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn channel(&self) -> &str {
        &self.channel
    }

    /// Non-blocking poll for the next decoded event.
    ///
    /// Returns `Ok(None)` when no event is queued. Decode failures and forced
    /// closure surface as errors; neither is retried here.
    pub fn try_next(&mut self) -> Result<Option<FeedEvent>, FeedError> {
        match self.receiver.try_recv() {
            Ok(message) => FeedEvent::from_wire(&message).map(Some),
            Err(TryRecvError::Empty) => Ok(None),
            Err(TryRecvError::Closed) => Err(FeedError::ChannelClosed(self.channel.clone())),
            Err(TryRecvError::Lagged(missed)) => Err(FeedError::Lagged(missed)),
        }
    }

    /// Await the next decoded event.
    pub async fn next(&mut self) -> Result<FeedEvent, FeedError> {
        match self.receiver.recv().await {
            Ok(message) => FeedEvent::from_wire(&message),
            Err(RecvError::Closed) => Err(FeedError::ChannelClosed(self.channel.clone())),
            Err(RecvError::Lagged(missed)) => Err(FeedError::Lagged(missed)),
        }
    }

    /// Explicitly release the subscription. Equivalent to dropping the handle.
    pub fn unsubscribe(self) {}
}
