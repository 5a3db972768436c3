//! In-process event bus.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, mpsc};

use crate::bus::{EventBus, Listener, Subscription, SubscriptionId};

#[derive(Debug)]
pub enum InMemoryBusError {
    /// Publish failed due to internal lock poisoning.
    Poisoned,
}

/// In-memory pub/sub bus.
///
/// - No IO / no async
/// - Listeners run on the publishing thread, after the registry lock is released
pub struct InMemoryEventBus<M> {
    listeners: Mutex<Vec<(SubscriptionId, Listener<M>)>>,
    next_id: AtomicU64,
}

impl<M> InMemoryEventBus<M> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of currently registered listeners.
    pub fn listener_count(&self) -> usize {
        self.listeners.lock().map(|l| l.len()).unwrap_or(0)
    }

    fn next_subscription_id(&self) -> SubscriptionId {
        SubscriptionId::new(self.next_id.fetch_add(1, Ordering::Relaxed) + 1)
    }
}

impl<M> InMemoryEventBus<M>
where
    M: Clone + Send + 'static,
{
    /// Register a listener that forwards every message into a channel.
    ///
    /// Dropping the returned subscription does not unregister it; call
    /// `unsubscribe(subscription.id())` once the consumer is done.
    pub fn subscribe_channel(&self) -> Subscription<M> {
        let (tx, rx) = mpsc::channel();
        let id = self.subscribe(Arc::new(move |message: &M| {
            let _ = tx.send(message.clone());
        }));
        Subscription::new(id, rx)
    }
}

impl<M> Default for InMemoryEventBus<M> {
    fn default() -> Self {
        Self {
            listeners: Mutex::new(Vec::new()),
            next_id: AtomicU64::new(0),
        }
    }
}

impl<M> core::fmt::Debug for InMemoryEventBus<M> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("InMemoryEventBus")
            .field("listeners", &self.listener_count())
            .finish()
    }
}

impl<M> EventBus<M> for InMemoryEventBus<M>
where
    M: Send + 'static,
{
    type Error = InMemoryBusError;

    fn publish(&self, message: M) -> Result<(), Self::Error> {
        // Snapshot the registry so listeners can re-enter the bus.
        let listeners: Vec<Listener<M>> = {
            let guard = self.listeners.lock().map_err(|_| InMemoryBusError::Poisoned)?;
            guard.iter().map(|(_, l)| Arc::clone(l)).collect()
        };

        for listener in listeners {
            listener(&message);
        }

        Ok(())
    }

    fn subscribe(&self, listener: Listener<M>) -> SubscriptionId {
        let id = self.next_subscription_id();

        // If the lock is poisoned, we still hand out an id;
        // it just won't receive messages until the process restarts.
        if let Ok(mut listeners) = self.listeners.lock() {
            listeners.push((id, listener));
        } else {
            tracing::warn!(subscription = %id, "event bus registry poisoned; listener dropped");
        }

        id
    }

    fn unsubscribe(&self, id: SubscriptionId) -> bool {
        match self.listeners.lock() {
            Ok(mut listeners) => {
                let before = listeners.len();
                listeners.retain(|(sid, _)| *sid != id);
                listeners.len() != before
            }
            Err(_) => false,
        }
    }
}
