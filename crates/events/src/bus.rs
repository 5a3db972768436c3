//! Event publishing/subscription abstraction (mechanics only).
//!
//! This module provides the **observer pattern** used between the quote store
//! and everything that renders it. A publisher commits a change, then hands
//! one message per committed event to the bus, which calls every registered
//! listener.
//!
//! ## Delivery
//!
//! - **Synchronous**: `publish()` returns after every listener ran.
//! - **Ordered**: listeners run in subscription order; messages are delivered
//!   in publish order.
//! - **Re-entrant**: listeners are called without any bus lock held, so a
//!   listener may query the publisher, publish again, or unsubscribe itself.
//!
//! ## Lifecycle
//!
//! Consumers register on mount (`subscribe`) and unregister on unmount
//! (`unsubscribe`) with the returned [`SubscriptionId`].

use std::sync::Arc;
use std::sync::mpsc::Receiver;
use std::time::Duration;

/// Callback invoked with every published message.
pub type Listener<M> = Arc<dyn Fn(&M) + Send + Sync>;

/// Handle returned by [`EventBus::subscribe`], used to unregister.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SubscriptionId(u64);

impl SubscriptionId {
    pub fn new(raw: u64) -> Self {
        Self(raw)
    }

    pub fn raw(&self) -> u64 {
        self.0
    }
}

impl core::fmt::Display for SubscriptionId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        write!(f, "sub-{}", self.0)
    }
}

/// A channel-backed subscription for consumers that drain messages from
/// another thread instead of reacting inline.
#[derive(Debug)]
pub struct Subscription<M> {
    id: SubscriptionId,
    receiver: Receiver<M>,
}

impl<M> Subscription<M> {
    pub fn new(id: SubscriptionId, receiver: Receiver<M>) -> Self {
        Self { id, receiver }
    }

    pub fn id(&self) -> SubscriptionId {
        self.id
    }

    /// Block until the next message is available.
    pub fn recv(&self) -> Result<M, std::sync::mpsc::RecvError> {
        self.receiver.recv()
    }

    /// Try to receive a message without blocking.
    pub fn try_recv(&self) -> Result<M, std::sync::mpsc::TryRecvError> {
        self.receiver.try_recv()
    }

    /// Block for up to `timeout` waiting for a message.
    pub fn recv_timeout(&self, timeout: Duration) -> Result<M, std::sync::mpsc::RecvTimeoutError> {
        self.receiver.recv_timeout(timeout)
    }

    /// Drain everything currently queued without blocking.
    pub fn drain(&self) -> Vec<M> {
        self.receiver.try_iter().collect()
    }
}

/// Domain-agnostic event bus (pub/sub abstraction).
///
/// The trait requires `Send + Sync` so a publisher holding a bus can be shared
/// behind an `Arc` by every consumer that needs it.
pub trait EventBus<M>: Send + Sync {
    type Error: core::fmt::Debug + Send + Sync + 'static;

    fn publish(&self, message: M) -> Result<(), Self::Error>;

    fn subscribe(&self, listener: Listener<M>) -> SubscriptionId;

    /// Returns `false` when the id was not (or no longer) registered.
    fn unsubscribe(&self, id: SubscriptionId) -> bool;
}

impl<M, B> EventBus<M> for Arc<B>
where
    B: EventBus<M> + ?Sized,
{
    type Error = B::Error;

    fn publish(&self, message: M) -> Result<(), Self::Error> {
        (**self).publish(message)
    }

    fn subscribe(&self, listener: Listener<M>) -> SubscriptionId {
        (**self).subscribe(listener)
    }

    fn unsubscribe(&self, id: SubscriptionId) -> bool {
        (**self).unsubscribe(id)
    }
}
