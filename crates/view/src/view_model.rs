use std::sync::{Arc, Mutex, MutexGuard, Weak};

use happyhome_catalog::Product;
use happyhome_core::ProductId;
use happyhome_events::{EventBus, SubscriptionId};
use happyhome_infra::{KeyValueStore, QuoteEnvelope, QuoteStore};
use happyhome_quote::{QuoteEvent, QuoteSubmitter, SubmissionReceipt, SubmitError};

use crate::drawer::DrawerState;
use crate::view::{ProductCard, QuoteRow, QuoteView, Surface, count_label};
use crate::viewport::Viewport;

/// View model shared by the sidebar and the drawer.
///
/// Subscribes to the store on construction and unsubscribes on drop, so a
/// dropped view model never receives another notification.
pub struct QuoteViewModel<S, B>
where
    S: KeyValueStore + 'static,
    B: EventBus<QuoteEnvelope> + 'static,
{
    store: Arc<QuoteStore<S, B>>,
    drawer: Arc<Mutex<DrawerState>>,
    subscription: SubscriptionId,
}

impl<S, B> QuoteViewModel<S, B>
where
    S: KeyValueStore + 'static,
    B: EventBus<QuoteEnvelope> + 'static,
{
    pub fn new(store: Arc<QuoteStore<S, B>>, viewport: Viewport) -> Self {
        let (rows, version) = store.rows_and_version();
        let drawer = Arc::new(Mutex::new(DrawerState::new(viewport, rows, version)));

        // Envelopes from concurrent writers can arrive in any order, so the
        // listener re-reads the store under the drawer lock instead of
        // counting deltas. The store never publishes while holding its own
        // lock, so this cannot deadlock.
        let source: Weak<QuoteStore<S, B>> = Arc::downgrade(&store);
        let sink = Arc::clone(&drawer);
        let subscription = store.subscribe(move |_: &QuoteEnvelope| {
            let Some(store) = source.upgrade() else {
                return;
            };
            let mut drawer = lock(&sink);
            let (rows, version) = store.rows_and_version();
            drawer.sync(rows, version);
        });

        // Catch anything committed between the first read and the subscription.
        {
            let mut drawer = lock(&drawer);
            let (rows, version) = store.rows_and_version();
            drawer.sync(rows, version);
        }

        tracing::debug!(subscription = %subscription, ?viewport, "quote view model mounted");

        Self {
            store,
            drawer,
            subscription,
        }
    }

    pub fn with_width(store: Arc<QuoteStore<S, B>>, width_px: u32) -> Self {
        Self::new(store, Viewport::from_width(width_px))
    }

    pub fn store(&self) -> &Arc<QuoteStore<S, B>> {
        &self.store
    }

    // --- read ---

    pub fn view(&self) -> QuoteView {
        let items = self.store.items();
        let item_count: u64 = items.iter().map(|i| u64::from(i.quantity)).sum();

        let (viewport, expanded) = {
            let drawer = lock(&self.drawer);
            (drawer.viewport(), drawer.is_expanded())
        };
        let surface = if viewport.is_narrow() {
            Surface::Drawer {
                expanded: expanded && !items.is_empty(),
            }
        } else {
            Surface::Sidebar
        };

        QuoteView {
            viewport,
            surface,
            rows: items.iter().map(QuoteRow::from).collect(),
            item_count,
            count_label: count_label(item_count),
            is_empty: items.is_empty(),
        }
    }

    pub fn product_card(&self, product: &Product) -> ProductCard {
        let in_quote = self.store.is_in_quote(product.id_typed());
        ProductCard {
            product_id: product.id_typed().clone(),
            name: product.name().to_string(),
            in_quote,
            action_label: if in_quote {
                ProductCard::ADDED_LABEL
            } else {
                ProductCard::ADD_LABEL
            },
        }
    }

    pub fn drawer_state(&self) -> DrawerState {
        lock(&self.drawer).clone()
    }

    pub fn is_drawer_expanded(&self) -> bool {
        lock(&self.drawer).is_expanded()
    }

    // --- intents ---

    pub fn add(&self, product: Product) -> Vec<QuoteEvent> {
        self.store.add_item(product)
    }

    pub fn increment(&self, product_id: &ProductId) -> Vec<QuoteEvent> {
        match self.store.quantity_of(product_id) {
            Some(quantity) => self
                .store
                .set_quantity(product_id, i64::from(quantity) + 1),
            None => Vec::new(),
        }
    }

    /// Step down by one; the last unit removes the line.
    pub fn decrement(&self, product_id: &ProductId) -> Vec<QuoteEvent> {
        match self.store.quantity_of(product_id) {
            Some(quantity) if quantity > 1 => self
                .store
                .set_quantity(product_id, i64::from(quantity) - 1),
            Some(_) => self.store.remove_item(product_id),
            None => Vec::new(),
        }
    }

    pub fn remove(&self, product_id: &ProductId) -> Vec<QuoteEvent> {
        self.store.remove_item(product_id)
    }

    pub fn clear(&self) -> Vec<QuoteEvent> {
        self.store.clear()
    }

    pub fn toggle_drawer(&self) {
        lock(&self.drawer).toggle();
    }

    pub fn collapse_drawer(&self) {
        lock(&self.drawer).collapse();
    }

    pub fn set_viewport_width(&self, width_px: u32) -> Viewport {
        let viewport = Viewport::from_width(width_px);
        lock(&self.drawer).set_viewport(viewport);
        viewport
    }

    /// "Get Quote": hand the current lines to the injected submitter.
    pub fn get_quote(&self, submitter: &dyn QuoteSubmitter) -> Result<SubmissionReceipt, SubmitError> {
        let items = self.store.items();
        if items.is_empty() {
            return Err(SubmitError::EmptyQuote);
        }
        submitter.submit(&items)
    }
}

impl<S, B> Drop for QuoteViewModel<S, B>
where
    S: KeyValueStore + 'static,
    B: EventBus<QuoteEnvelope> + 'static,
{
    fn drop(&mut self) {
        if !self.store.unsubscribe(self.subscription) {
            tracing::debug!(subscription = %self.subscription, "view model subscription already gone");
        }
    }
}

impl<S, B> core::fmt::Debug for QuoteViewModel<S, B>
where
    S: KeyValueStore + 'static,
    B: EventBus<QuoteEnvelope> + 'static,
{
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("QuoteViewModel")
            .field("subscription", &self.subscription)
            .field("drawer", &*lock(&self.drawer))
            .finish()
    }
}

fn lock(drawer: &Mutex<DrawerState>) -> MutexGuard<'_, DrawerState> {
    drawer.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}
