use crate::message::ItemEvent;
use dashmap::DashMap;
use log::*;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc::{self, error::TrySendError};

/// Default number of serialized events buffered per subscriber before the
/// subscriber is treated as stuck and evicted.
pub const DEFAULT_QUEUE_CAPACITY: usize = 100;

/// Unique identifier for a subscriber's registration (server-generated)
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SubscriberId(String);

impl SubscriberId {
    fn new() -> Self {
        Self(uuid::Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

type Registry = DashMap<SubscriberId, mpsc::Sender<String>>;

/// Process-wide fan-out of item events to live subscribers.
///
/// The registry is the only shared mutable state: subscribe, unsubscribe and
/// publish may all be called concurrently from any number of tasks. Delivery
/// is best effort; a subscriber whose queue is full loses its registration
/// rather than stalling publishers.
pub struct Broadcaster {
    registry: Arc<Registry>,
    queue_capacity: usize,
}

impl Broadcaster {
    pub fn new() -> Self {
        Self::with_queue_capacity(DEFAULT_QUEUE_CAPACITY)
    }

    pub fn with_queue_capacity(queue_capacity: usize) -> Self {
        Self {
            registry: Arc::new(DashMap::new()),
            queue_capacity,
        }
    }

    /// Register a new subscriber and return its queue handle.
    pub fn subscribe(&self) -> Subscription {
        let id = SubscriberId::new();
        let (sender, receiver) = mpsc::channel(self.queue_capacity);

        self.registry.insert(id.clone(), sender);
        info!("Registered SSE subscriber {}", id.as_str());

        Subscription {
            id,
            receiver,
            registry: Arc::clone(&self.registry),
        }
    }

    /// Remove a subscriber's registration. Safe to call repeatedly or for
    /// an id that was never registered.
    pub fn unsubscribe(&self, id: &SubscriberId) {
        if self.registry.remove(id).is_some() {
            info!("Unregistered SSE subscriber {}", id.as_str());
        }
    }

    /// Serialize `event` once and deliver it to every registered queue
    /// without blocking. A full queue signals a dead or stuck subscriber,
    /// so that subscriber is unregistered on the spot. Failures are logged
    /// and swallowed; the mutation path never observes them.
    pub fn publish(&self, event: &ItemEvent) {
        let payload = match serde_json::to_string(event) {
            Ok(json) => json,
            Err(e) => {
                error!("Failed to serialize item event: {e}");
                return;
            }
        };

        // Deliver against a snapshot so concurrent subscribe/unsubscribe
        // cannot interfere with the iteration.
        let subscribers: Vec<(SubscriberId, mpsc::Sender<String>)> = self
            .registry
            .iter()
            .map(|entry| (entry.key().clone(), entry.value().clone()))
            .collect();

        for (id, sender) in subscribers {
            match sender.try_send(payload.clone()) {
                Ok(()) => {}
                Err(TrySendError::Full(_)) => {
                    warn!(
                        "Queue for subscriber {} is full, evicting stuck consumer",
                        id.as_str()
                    );
                    self.registry.remove(&id);
                }
                Err(TrySendError::Closed(_)) => {
                    debug!(
                        "Queue for subscriber {} is closed, pruning registration",
                        id.as_str()
                    );
                    self.registry.remove(&id);
                }
            }
        }
    }

    pub fn subscriber_count(&self) -> usize {
        self.registry.len()
    }
}

impl Default for Broadcaster {
    fn default() -> Self {
        Self::new()
    }
}

/// Outcome of waiting on a subscription queue.
#[derive(Debug)]
pub enum Next {
    /// A serialized event payload arrived.
    Event(String),
    /// No event arrived within the wait window.
    Timeout,
    /// The registration was removed (eviction); no further events will come.
    Closed,
}

/// A live subscriber's end of its queue. Exactly one stream session owns a
/// `Subscription` for its connection's lifetime; dropping it unregisters
/// the subscriber, which covers every termination path including
/// cancellation mid-await.
pub struct Subscription {
    id: SubscriberId,
    receiver: mpsc::Receiver<String>,
    registry: Arc<Registry>,
}

impl Subscription {
    pub fn id(&self) -> &SubscriberId {
        &self.id
    }

    /// Wait up to `wait` for the next buffered event.
    pub async fn next(&mut self, wait: Duration) -> Next {
        match tokio::time::timeout(wait, self.receiver.recv()).await {
            Ok(Some(payload)) => Next::Event(payload),
            Ok(None) => Next::Closed,
            Err(_) => Next::Timeout,
        }
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if self.registry.remove(&self.id).is_some() {
            debug!(
                "SSE subscriber {} dropped, cleaning up registration",
                self.id.as_str()
            );
        }
    }
}
