//! The shared quote store: one instance per process, built at the root and
//! handed to every consumer behind an `Arc`.
//!
//! ## Mutation flow
//!
//! ```text
//! Intent (add / remove / set quantity / clear)
//!   ↓
//! 1. Handle + apply the command on the in-memory quote (pure, under the state lock)
//!   ↓
//! 2. Write the snapshot through to storage (only once hydrated)
//!   ↓
//! 3. Publish one envelope per committed event (state lock released)
//! ```
//!
//! Storage and bus failures are logged and swallowed. The in-memory quote is
//! always the source of truth for the running session.
//!
//! ## Hydration
//!
//! A new store is empty and not hydrated; nothing is persisted until
//! [`QuoteStore::hydrate`] has read the slot once. That ordering keeps a
//! fresh empty store from overwriting a saved quote before it was loaded.

use std::sync::{Arc, Mutex, MutexGuard};

use chrono::Utc;

use happyhome_catalog::Product;
use happyhome_core::{Aggregate, ProductId};
use happyhome_events::{Event, EventBus, EventEnvelope, Listener, SubscriptionId, execute};
use happyhome_quote::{Quote, QuoteCommand, QuoteEvent, QuoteItem, QuoteState};

use crate::persistence::{self, QUOTE_STORAGE_KEY};
use crate::storage::KeyValueStore;

/// Message delivered to quote store subscribers.
pub type QuoteEnvelope = EventEnvelope<QuoteEvent>;

/// What [`QuoteStore::hydrate`] found in storage.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HydrationOutcome {
    /// A snapshot was read; `items` lines were kept, `dropped` entries discarded.
    Restored { items: usize, dropped: usize },
    /// Nothing stored under the key.
    Absent,
    /// Storage could not be read or the slot could not be parsed.
    Failed,
}

#[derive(Debug, Default)]
struct State {
    quote: Quote,
    hydration: Option<HydrationOutcome>,
}

pub struct QuoteStore<S, B> {
    storage: S,
    bus: B,
    storage_key: String,
    state: Mutex<State>,
}

impl<S, B> QuoteStore<S, B>
where
    S: KeyValueStore,
    B: EventBus<QuoteEnvelope>,
{
    /// An empty, un-hydrated store writing to [`QUOTE_STORAGE_KEY`].
    pub fn new(storage: S, bus: B) -> Self {
        Self {
            storage,
            bus,
            storage_key: QUOTE_STORAGE_KEY.to_string(),
            state: Mutex::new(State::default()),
        }
    }

    pub fn with_storage_key(mut self, key: impl Into<String>) -> Self {
        self.storage_key = key.into();
        self
    }

    /// `new` followed by `hydrate`.
    pub fn open(storage: S, bus: B) -> Self {
        let store = Self::new(storage, bus);
        store.hydrate();
        store
    }

    pub fn storage_key(&self) -> &str {
        &self.storage_key
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    // --- queries ---

    /// Lines in insertion order (a copy; the store keeps ownership).
    pub fn items(&self) -> Vec<QuoteItem> {
        self.lock().quote.items().to_vec()
    }

    /// Sum of quantities over all lines.
    pub fn item_count(&self) -> u64 {
        self.lock().quote.item_count()
    }

    pub fn len(&self) -> usize {
        self.lock().quote.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().quote.is_empty()
    }

    pub fn is_in_quote(&self, product_id: &ProductId) -> bool {
        self.lock().quote.is_in_quote(product_id)
    }

    pub fn quantity_of(&self, product_id: &ProductId) -> Option<u32> {
        self.lock().quote.quantity_of(product_id)
    }

    pub fn state(&self) -> QuoteState {
        self.lock().quote.state()
    }

    pub fn version(&self) -> u64 {
        self.lock().quote.version()
    }

    /// Line count and version read under one lock, so they describe the same quote.
    pub fn rows_and_version(&self) -> (usize, u64) {
        let state = self.lock();
        (state.quote.len(), state.quote.version())
    }

    pub fn is_hydrated(&self) -> bool {
        self.lock().hydration.is_some()
    }

    // --- commands ---

    pub fn add_item(&self, product: Product) -> Vec<QuoteEvent> {
        self.dispatch(QuoteCommand::add_item(product, Utc::now()))
    }

    pub fn remove_item(&self, product_id: &ProductId) -> Vec<QuoteEvent> {
        self.dispatch(QuoteCommand::remove_item(product_id.clone(), Utc::now()))
    }

    pub fn set_quantity(&self, product_id: &ProductId, quantity: i64) -> Vec<QuoteEvent> {
        self.dispatch(QuoteCommand::set_quantity(product_id.clone(), quantity, Utc::now()))
    }

    pub fn clear(&self) -> Vec<QuoteEvent> {
        self.dispatch(QuoteCommand::clear(Utc::now()))
    }

    // --- observers ---

    /// Register a callback invoked after every committed change.
    pub fn subscribe<F>(&self, callback: F) -> SubscriptionId
    where
        F: Fn(&QuoteEnvelope) + Send + Sync + 'static,
    {
        let listener: Listener<QuoteEnvelope> = Arc::new(callback);
        self.bus.subscribe(listener)
    }

    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        self.bus.unsubscribe(id)
    }

    // --- lifecycle ---

    /// Read the persisted slot once and adopt it when it parses.
    ///
    /// Later calls return the first outcome without touching storage.
    pub fn hydrate(&self) -> HydrationOutcome {
        let (outcome, committed) = {
            let mut state = self.lock();
            if let Some(outcome) = state.hydration {
                return outcome;
            }

            let (outcome, committed) = self.load_snapshot(&mut state.quote);
            state.hydration = Some(outcome);

            // First write after hydration mirrors whatever the store now holds.
            self.persist(&state.quote);
            (outcome, Self::envelopes(&state.quote, committed))
        };

        match outcome {
            HydrationOutcome::Restored { items, dropped } => {
                tracing::info!(key = %self.storage_key, items, dropped, "quote hydrated from storage");
            }
            HydrationOutcome::Absent => {
                tracing::debug!(key = %self.storage_key, "no saved quote");
            }
            HydrationOutcome::Failed => {}
        }

        self.publish_all(committed);
        outcome
    }

    fn load_snapshot(&self, quote: &mut Quote) -> (HydrationOutcome, Vec<QuoteEvent>) {
        let raw = match self.storage.get(&self.storage_key) {
            Ok(Some(raw)) => raw,
            Ok(None) => return (HydrationOutcome::Absent, Vec::new()),
            Err(err) => {
                tracing::warn!(key = %self.storage_key, error = %err, "quote storage unreadable; starting empty");
                return (HydrationOutcome::Failed, Vec::new());
            }
        };

        let snapshot = match persistence::decode(&raw) {
            Ok(snapshot) => snapshot,
            Err(err) => {
                tracing::warn!(key = %self.storage_key, error = %err, "saved quote is corrupt; ignoring it");
                return (HydrationOutcome::Failed, Vec::new());
            }
        };

        let outcome = HydrationOutcome::Restored {
            items: snapshot.items.len(),
            dropped: snapshot.dropped,
        };
        let command = QuoteCommand::restore(snapshot.items, Utc::now());
        (outcome, Self::run(quote, &command))
    }

    fn dispatch(&self, command: QuoteCommand) -> Vec<QuoteEvent> {
        let envelopes = {
            let mut state = self.lock();

            // 1) decide + evolve
            let committed = Self::run(&mut state.quote, &command);
            if committed.is_empty() {
                return committed;
            }

            // 2) write-through, gated on hydration
            if state.hydration.is_some() {
                self.persist(&state.quote);
            } else {
                tracing::debug!(key = %self.storage_key, "store not hydrated; write skipped");
            }

            Self::envelopes(&state.quote, committed)
        };

        // 3) notify outside the lock so listeners can read the store
        let committed: Vec<QuoteEvent> = envelopes.iter().map(|e| e.payload().clone()).collect();
        self.publish_all(envelopes);
        committed
    }

    fn run(quote: &mut Quote, command: &QuoteCommand) -> Vec<QuoteEvent> {
        match execute(quote, command) {
            Ok(events) => events,
            Err(never) => match never {},
        }
    }

    /// Sequence numbers are the quote version right after each event.
    fn envelopes(quote: &Quote, committed: Vec<QuoteEvent>) -> Vec<QuoteEnvelope> {
        let first = quote.version() + 1 - committed.len() as u64;
        committed
            .into_iter()
            .enumerate()
            .map(|(offset, event)| EventEnvelope::wrap(first + offset as u64, event))
            .collect()
    }

    fn persist(&self, quote: &Quote) {
        let raw = match persistence::encode(quote.items()) {
            Ok(raw) => raw,
            Err(err) => {
                tracing::warn!(key = %self.storage_key, error = %err, "failed to encode quote");
                return;
            }
        };

        if let Err(err) = self.storage.set(&self.storage_key, &raw) {
            tracing::warn!(key = %self.storage_key, error = %err, "failed to persist quote");
        }
    }

    fn publish_all(&self, envelopes: Vec<QuoteEnvelope>) {
        for envelope in envelopes {
            let event_type = envelope.payload().event_type();
            let sequence = envelope.sequence_number();
            if let Err(err) = self.bus.publish(envelope) {
                tracing::warn!(event_type, sequence, error = ?err, "failed to notify quote subscribers");
            }
        }
    }

    fn lock(&self) -> MutexGuard<'_, State> {
        // A panicking listener never holds this lock; recover the data either way.
        self.state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl<S, B> core::fmt::Debug for QuoteStore<S, B> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("QuoteStore")
            .field("storage_key", &self.storage_key)
            .finish_non_exhaustive()
    }
}
