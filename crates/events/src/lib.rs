//! Domain events and their in-process distribution.
//!
//! Aggregates decide events; publishers wrap them in [`EventEnvelope`]s and
//! fan them out over an [`EventBus`] to observers (view models and
//! loggers).

pub mod bus;
pub mod envelope;
pub mod event;
pub mod handler;
pub mod in_memory_bus;

pub use bus::{EventBus, Listener, Subscription, SubscriptionId};
pub use envelope::EventEnvelope;
pub use event::Event;
pub use handler::execute;
pub use in_memory_bus::{InMemoryBusError, InMemoryEventBus};
