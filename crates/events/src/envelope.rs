use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Envelope for a committed event, as delivered to bus subscribers.
///
/// - `sequence_number` is the aggregate version right after the event was
///   applied, so it increases by one per committed event.
/// - `payload` is the typed domain event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventEnvelope<E> {
    event_id: Uuid,
    sequence_number: u64,
    payload: E,
}

impl<E> EventEnvelope<E> {
    pub fn new(event_id: Uuid, sequence_number: u64, payload: E) -> Self {
        Self {
            event_id,
            sequence_number,
            payload,
        }
    }

    /// Wrap a payload with a fresh time-ordered (UUIDv7) event id.
    pub fn wrap(sequence_number: u64, payload: E) -> Self {
        Self::new(Uuid::now_v7(), sequence_number, payload)
    }

    pub fn event_id(&self) -> Uuid {
        self.event_id
    }

    pub fn sequence_number(&self) -> u64 {
        self.sequence_number
    }

    pub fn payload(&self) -> &E {
        &self.payload
    }

    pub fn into_payload(self) -> E {
        self.payload
    }
}
