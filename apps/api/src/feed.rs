//! In-process change feed for job postings.
//!
//! Writers publish a [`FeedEvent`] after each committed change; live
//! subscribers (the student SSE stream) react by re-querying a fresh snapshot.
//! Events carry no row data, so a lagging subscriber only needs one resync.

use serde::Serialize;
use tokio::sync::broadcast;
use uuid::Uuid;

const DEFAULT_CAPACITY: usize = 64;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum FeedEvent {
    PostSubmitted { post_id: Uuid },
    PostUpdated { post_id: Uuid },
    PostApproved { post_id: Uuid },
    PostRejected { post_id: Uuid },
}

/// Cloneable handle to the shared broadcast channel.
#[derive(Clone)]
pub struct PostFeed {
    sender: broadcast::Sender<FeedEvent>,
}

impl PostFeed {
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self { sender }
    }

    /// Publishes to all current subscribers. Dropped silently when nobody listens.
    pub fn publish(&self, event: FeedEvent) {
        let receivers = self.sender.send(event).unwrap_or(0);
        tracing::debug!(receivers, "post feed event published");
    }

    pub fn subscribe(&self) -> broadcast::Receiver<FeedEvent> {
        self.sender.subscribe()
    }
}

impl Default for PostFeed {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY)
    }
}
