use core::convert::Infallible;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use happyhome_catalog::Product;
use happyhome_core::{Aggregate, Entity, ProductId};
use happyhome_events::Event;

/// Quote line: a product snapshot and how many of it the visitor wants.
///
/// The product is copied at add time; later catalog edits do not reach lines
/// already in a quote. A stored quantity is always at least 1.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuoteItem {
    pub product: Product,
    pub quantity: u32,
}

impl QuoteItem {
    pub fn new(product: Product, quantity: u32) -> Self {
        Self { product, quantity }
    }

    pub fn product_id(&self) -> &ProductId {
        self.product.id()
    }
}

impl Entity for QuoteItem {
    type Id = ProductId;

    fn id(&self) -> &Self::Id {
        self.product.id()
    }
}

/// Macro-state of a quote, computed from its row count.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QuoteState {
    Empty,
    Populated,
}

/// Aggregate root: Quote.
///
/// Lines keep insertion order and are unique by product id.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Quote {
    items: Vec<QuoteItem>,
    version: u64,
}

impl Quote {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn items(&self) -> &[QuoteItem] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Sum of all line quantities (not the row count).
    pub fn item_count(&self) -> u64 {
        self.items.iter().map(|i| u64::from(i.quantity)).sum()
    }

    pub fn is_in_quote(&self, product_id: &ProductId) -> bool {
        self.position(product_id).is_some()
    }

    pub fn quantity_of(&self, product_id: &ProductId) -> Option<u32> {
        self.position(product_id).map(|idx| self.items[idx].quantity)
    }

    pub fn state(&self) -> QuoteState {
        if self.items.is_empty() {
            QuoteState::Empty
        } else {
            QuoteState::Populated
        }
    }

    fn position(&self, product_id: &ProductId) -> Option<usize> {
        self.items.iter().position(|i| i.product_id() == product_id)
    }
}

/// Command: AddItem.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AddItem {
    pub product: Product,
    pub occurred_at: DateTime<Utc>,
}

/// Command: RemoveItem.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RemoveItem {
    pub product_id: ProductId,
    pub occurred_at: DateTime<Utc>,
}

/// Command: SetQuantity.
///
/// `quantity` is signed on purpose: zero or below means "remove".
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SetQuantity {
    pub product_id: ProductId,
    pub quantity: i64,
    pub occurred_at: DateTime<Utc>,
}

/// Command: ClearQuote.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClearQuote {
    pub occurred_at: DateTime<Utc>,
}

/// Command: RestoreQuote (hydration from a persisted snapshot).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RestoreQuote {
    pub items: Vec<QuoteItem>,
    pub occurred_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum QuoteCommand {
    AddItem(AddItem),
    RemoveItem(RemoveItem),
    SetQuantity(SetQuantity),
    ClearQuote(ClearQuote),
    RestoreQuote(RestoreQuote),
}

impl QuoteCommand {
    pub fn add_item(product: Product, occurred_at: DateTime<Utc>) -> Self {
        Self::AddItem(AddItem { product, occurred_at })
    }

    pub fn remove_item(product_id: ProductId, occurred_at: DateTime<Utc>) -> Self {
        Self::RemoveItem(RemoveItem { product_id, occurred_at })
    }

    pub fn set_quantity(product_id: ProductId, quantity: i64, occurred_at: DateTime<Utc>) -> Self {
        Self::SetQuantity(SetQuantity {
            product_id,
            quantity,
            occurred_at,
        })
    }

    pub fn clear(occurred_at: DateTime<Utc>) -> Self {
        Self::ClearQuote(ClearQuote { occurred_at })
    }

    pub fn restore(items: Vec<QuoteItem>, occurred_at: DateTime<Utc>) -> Self {
        Self::RestoreQuote(RestoreQuote { items, occurred_at })
    }
}

/// Event: ItemAdded (new line with quantity 1).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemAdded {
    pub product: Product,
    pub occurred_at: DateTime<Utc>,
}

/// Event: QuantityChanged (existing line, new absolute quantity).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuantityChanged {
    pub product_id: ProductId,
    pub quantity: u32,
    pub occurred_at: DateTime<Utc>,
}

/// Event: ItemRemoved.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemRemoved {
    pub product_id: ProductId,
    pub occurred_at: DateTime<Utc>,
}

/// Event: QuoteCleared.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuoteCleared {
    pub occurred_at: DateTime<Utc>,
}

/// Event: QuoteRestored (contents replaced by a normalized snapshot).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuoteRestored {
    pub items: Vec<QuoteItem>,
    pub occurred_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum QuoteEvent {
    ItemAdded(ItemAdded),
    QuantityChanged(QuantityChanged),
    ItemRemoved(ItemRemoved),
    QuoteCleared(QuoteCleared),
    QuoteRestored(QuoteRestored),
}

impl Event for QuoteEvent {
    fn event_type(&self) -> &'static str {
        match self {
            QuoteEvent::ItemAdded(_) => "quote.item.added",
            QuoteEvent::QuantityChanged(_) => "quote.item.quantity_changed",
            QuoteEvent::ItemRemoved(_) => "quote.item.removed",
            QuoteEvent::QuoteCleared(_) => "quote.cleared",
            QuoteEvent::QuoteRestored(_) => "quote.restored",
        }
    }

    fn version(&self) -> u32 {
        1
    }

    fn occurred_at(&self) -> DateTime<Utc> {
        match self {
            QuoteEvent::ItemAdded(e) => e.occurred_at,
            QuoteEvent::QuantityChanged(e) => e.occurred_at,
            QuoteEvent::ItemRemoved(e) => e.occurred_at,
            QuoteEvent::QuoteCleared(e) => e.occurred_at,
            QuoteEvent::QuoteRestored(e) => e.occurred_at,
        }
    }
}

impl Aggregate for Quote {
    type Command = QuoteCommand;
    type Event = QuoteEvent;
    type Error = Infallible;

    fn version(&self) -> u64 {
        self.version
    }

    fn apply(&mut self, event: &Self::Event) {
        match event {
            QuoteEvent::ItemAdded(e) => {
                self.items.push(QuoteItem::new(e.product.clone(), 1));
            }
            QuoteEvent::QuantityChanged(e) => {
                if let Some(idx) = self.position(&e.product_id) {
                    self.items[idx].quantity = e.quantity;
                }
            }
            QuoteEvent::ItemRemoved(e) => {
                self.items.retain(|i| i.product_id() != &e.product_id);
            }
            QuoteEvent::QuoteCleared(_) => {
                self.items.clear();
            }
            QuoteEvent::QuoteRestored(e) => {
                self.items = e.items.clone();
            }
        }

        // Deterministic version tracking: +1 per applied event.
        self.version += 1;
    }

    fn handle(&self, command: &Self::Command) -> Result<Vec<Self::Event>, Self::Error> {
        Ok(match command {
            QuoteCommand::AddItem(cmd) => self.handle_add_item(cmd),
            QuoteCommand::RemoveItem(cmd) => self.handle_remove_item(cmd),
            QuoteCommand::SetQuantity(cmd) => self.handle_set_quantity(cmd),
            QuoteCommand::ClearQuote(cmd) => self.handle_clear(cmd),
            QuoteCommand::RestoreQuote(cmd) => self.handle_restore(cmd),
        })
    }
}

impl Quote {
    fn handle_add_item(&self, cmd: &AddItem) -> Vec<QuoteEvent> {
        match self.position(cmd.product.id()) {
            // Existing line keeps its original product snapshot.
            Some(idx) => {
                let current = self.items[idx].quantity;
                let next = current.saturating_add(1);
                if next == current {
                    return Vec::new();
                }
                vec![QuoteEvent::QuantityChanged(QuantityChanged {
                    product_id: cmd.product.id().clone(),
                    quantity: next,
                    occurred_at: cmd.occurred_at,
                })]
            }
            None => vec![QuoteEvent::ItemAdded(ItemAdded {
                product: cmd.product.clone(),
                occurred_at: cmd.occurred_at,
            })],
        }
    }

    fn handle_remove_item(&self, cmd: &RemoveItem) -> Vec<QuoteEvent> {
        if !self.is_in_quote(&cmd.product_id) {
            return Vec::new();
        }
        vec![QuoteEvent::ItemRemoved(ItemRemoved {
            product_id: cmd.product_id.clone(),
            occurred_at: cmd.occurred_at,
        })]
    }

    fn handle_set_quantity(&self, cmd: &SetQuantity) -> Vec<QuoteEvent> {
        if cmd.quantity <= 0 {
            return self.handle_remove_item(&RemoveItem {
                product_id: cmd.product_id.clone(),
                occurred_at: cmd.occurred_at,
            });
        }

        // Setting a quantity never creates a line.
        let Some(current) = self.quantity_of(&cmd.product_id) else {
            return Vec::new();
        };

        let quantity = u32::try_from(cmd.quantity).unwrap_or(u32::MAX);
        if quantity == current {
            return Vec::new();
        }

        vec![QuoteEvent::QuantityChanged(QuantityChanged {
            product_id: cmd.product_id.clone(),
            quantity,
            occurred_at: cmd.occurred_at,
        })]
    }

    fn handle_clear(&self, cmd: &ClearQuote) -> Vec<QuoteEvent> {
        if self.items.is_empty() {
            return Vec::new();
        }
        vec![QuoteEvent::QuoteCleared(QuoteCleared {
            occurred_at: cmd.occurred_at,
        })]
    }

    fn handle_restore(&self, cmd: &RestoreQuote) -> Vec<QuoteEvent> {
        let mut items: Vec<QuoteItem> = Vec::with_capacity(cmd.items.len());
        for item in &cmd.items {
            if item.quantity == 0 || item.product_id().is_blank() {
                continue;
            }
            if items.iter().any(|kept| kept.same_identity(item)) {
                continue;
            }
            items.push(item.clone());
        }

        if items == self.items {
            return Vec::new();
        }

        vec![QuoteEvent::QuoteRestored(QuoteRestored {
            items,
            occurred_at: cmd.occurred_at,
        })]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use happyhome_events::execute;

    fn test_time() -> DateTime<Utc> {
        Utc::now()
    }

    fn product(id: &str) -> Product {
        Product::new(id, format!("Product {id}")).with_price_range("$10-20")
    }

    fn pid(id: &str) -> ProductId {
        ProductId::new(id)
    }

    fn run(quote: &mut Quote, command: QuoteCommand) -> Vec<QuoteEvent> {
        execute(quote, &command).unwrap()
    }

    fn add(quote: &mut Quote, id: &str) -> Vec<QuoteEvent> {
        run(quote, QuoteCommand::add_item(product(id), test_time()))
    }

    fn set(quote: &mut Quote, id: &str, quantity: i64) -> Vec<QuoteEvent> {
        run(quote, QuoteCommand::set_quantity(pid(id), quantity, test_time()))
    }

    fn remove(quote: &mut Quote, id: &str) -> Vec<QuoteEvent> {
        run(quote, QuoteCommand::remove_item(pid(id), test_time()))
    }

    #[test]
    fn add_item_emits_item_added_for_new_product() {
        let quote = Quote::empty();
        let events = quote
            .handle(&QuoteCommand::add_item(product("mob-001"), test_time()))
            .unwrap();
        assert_eq!(events.len(), 1);

        match &events[0] {
            QuoteEvent::ItemAdded(e) => assert_eq!(e.product.id(), &pid("mob-001")),
            _ => panic!("Expected ItemAdded event"),
        }
    }

    #[test]
    fn adding_twice_accumulates_on_one_line() {
        let mut quote = Quote::empty();
        add(&mut quote, "X");
        let events = add(&mut quote, "X");

        assert!(matches!(&events[0], QuoteEvent::QuantityChanged(e) if e.quantity == 2));
        assert_eq!(quote.len(), 1);
        assert_eq!(quote.quantity_of(&pid("X")), Some(2));
        assert_eq!(quote.item_count(), 2);
    }

    #[test]
    fn re_adding_keeps_the_original_snapshot() {
        let mut quote = Quote::empty();
        add(&mut quote, "X");

        let renamed = Product::new("X", "Renamed").with_price_range("$99");
        run(&mut quote, QuoteCommand::add_item(renamed, test_time()));

        assert_eq!(quote.items()[0].product.name(), "Product X");
        assert_eq!(quote.items()[0].quantity, 2);
    }

    #[test]
    fn lines_keep_insertion_order() {
        let mut quote = Quote::empty();
        for id in ["c", "a", "b", "a"] {
            add(&mut quote, id);
        }
        let ids: Vec<_> = quote.items().iter().map(|i| i.product_id().as_str()).collect();
        assert_eq!(ids, vec!["c", "a", "b"]);
    }

    #[test]
    fn item_count_sums_quantities() {
        let mut quote = Quote::empty();
        assert_eq!(quote.item_count(), 0);

        add(&mut quote, "A");
        add(&mut quote, "B");
        set(&mut quote, "A", 3);

        assert_eq!(quote.item_count(), 4);
        assert_eq!(quote.len(), 2);
    }

    #[test]
    fn zero_or_negative_quantity_removes_the_line() {
        for quantity in [0, -1, i64::MIN] {
            let mut quote = Quote::empty();
            add(&mut quote, "A");
            add(&mut quote, "B");

            let events = set(&mut quote, "A", quantity);
            assert!(matches!(&events[0], QuoteEvent::ItemRemoved(e) if e.product_id == pid("A")));
            assert!(!quote.is_in_quote(&pid("A")));
            assert!(quote.is_in_quote(&pid("B")));
        }
    }

    #[test]
    fn set_quantity_matches_remove_item() {
        let mut via_set = Quote::empty();
        let mut via_remove = Quote::empty();
        for quote in [&mut via_set, &mut via_remove] {
            add(quote, "A");
            add(quote, "B");
        }
        set(&mut via_set, "A", 0);
        remove(&mut via_remove, "A");

        assert_eq!(via_set.items(), via_remove.items());
    }

    #[test]
    fn unknown_ids_are_no_ops() {
        let mut quote = Quote::empty();
        add(&mut quote, "A");
        let before = quote.clone();

        assert!(remove(&mut quote, "missing").is_empty());
        assert!(set(&mut quote, "missing", 5).is_empty());
        assert!(set(&mut quote, "missing", 0).is_empty());

        assert_eq!(quote, before);
    }

    #[test]
    fn set_quantity_never_creates_a_line() {
        let mut quote = Quote::empty();
        set(&mut quote, "A", 3);
        assert!(quote.is_empty());
        assert_eq!(quote.version(), 0);
    }

    #[test]
    fn setting_the_same_quantity_emits_nothing() {
        let mut quote = Quote::empty();
        add(&mut quote, "A");
        assert!(set(&mut quote, "A", 1).is_empty());
    }

    #[test]
    fn huge_quantities_saturate() {
        let mut quote = Quote::empty();
        add(&mut quote, "A");
        set(&mut quote, "A", i64::MAX);
        assert_eq!(quote.quantity_of(&pid("A")), Some(u32::MAX));

        // Accumulating past the ceiling is a no-op.
        assert!(add(&mut quote, "A").is_empty());
        assert_eq!(quote.item_count(), u64::from(u32::MAX));
    }

    #[test]
    fn clear_empties_and_is_idempotent() {
        let mut quote = Quote::empty();
        add(&mut quote, "A");
        add(&mut quote, "B");

        let events = run(&mut quote, QuoteCommand::clear(test_time()));
        assert_eq!(events.len(), 1);
        assert!(quote.is_empty());

        let events = run(&mut quote, QuoteCommand::clear(test_time()));
        assert!(events.is_empty());
        assert!(quote.is_empty());
        assert_eq!(quote.item_count(), 0);
    }

    #[test]
    fn membership_follows_add_and_remove() {
        let mut quote = Quote::empty();
        add(&mut quote, "P");
        assert!(quote.is_in_quote(&pid("P")));
        remove(&mut quote, "P");
        assert!(!quote.is_in_quote(&pid("P")));
    }

    #[test]
    fn macro_state_transitions() {
        let mut quote = Quote::empty();
        assert_eq!(quote.state(), QuoteState::Empty);

        add(&mut quote, "A");
        assert_eq!(quote.state(), QuoteState::Populated);

        set(&mut quote, "A", 0);
        assert_eq!(quote.state(), QuoteState::Empty);

        add(&mut quote, "A");
        add(&mut quote, "B");
        run(&mut quote, QuoteCommand::clear(test_time()));
        assert_eq!(quote.state(), QuoteState::Empty);
    }

    #[test]
    fn end_to_end_scenario() {
        let mut quote = Quote::empty();

        add(&mut quote, "X");
        assert_eq!(quote.item_count(), 1);
        assert!(quote.is_in_quote(&pid("X")));

        add(&mut quote, "X");
        assert_eq!(quote.item_count(), 2);
        assert_eq!(quote.len(), 1);
        assert_eq!(quote.items()[0].quantity, 2);

        set(&mut quote, "X", 5);
        assert_eq!(quote.item_count(), 5);

        remove(&mut quote, "X");
        assert_eq!(quote.item_count(), 0);
        assert!(!quote.is_in_quote(&pid("X")));
    }

    #[test]
    fn restore_normalizes_the_snapshot() {
        let mut quote = Quote::empty();
        let items = vec![
            QuoteItem::new(product("A"), 2),
            QuoteItem::new(product("B"), 0),
            QuoteItem::new(product("A"), 7),
            QuoteItem::new(product(""), 1),
            QuoteItem::new(product("C"), 1),
        ];

        run(&mut quote, QuoteCommand::restore(items, test_time()));

        let lines: Vec<_> = quote
            .items()
            .iter()
            .map(|i| (i.product_id().as_str(), i.quantity))
            .collect();
        assert_eq!(lines, vec![("A", 2), ("C", 1)]);
    }

    #[test]
    fn lines_share_identity_by_product_id() {
        let older = QuoteItem::new(product("A"), 1);
        let newer = QuoteItem::new(Product::new("A", "Renamed").with_price_range("$99"), 4);
        assert!(older.same_identity(&newer));
        assert!(!older.same_identity(&QuoteItem::new(product("B"), 1)));
    }

    #[test]
    fn restoring_identical_contents_is_a_no_op() {
        let mut quote = Quote::empty();
        assert!(run(&mut quote, QuoteCommand::restore(Vec::new(), test_time())).is_empty());

        add(&mut quote, "A");
        let same = quote.items().to_vec();
        assert!(run(&mut quote, QuoteCommand::restore(same, test_time())).is_empty());
    }

    #[test]
    fn version_increments_on_apply() {
        let mut quote = Quote::empty();
        assert_eq!(quote.version(), 0);
        add(&mut quote, "A");
        assert_eq!(quote.version(), 1);
        add(&mut quote, "A");
        assert_eq!(quote.version(), 2);
        remove(&mut quote, "missing");
        assert_eq!(quote.version(), 2);
    }

    #[test]
    fn handle_does_not_mutate_state() {
        let mut quote = Quote::empty();
        add(&mut quote, "A");
        let before = quote.clone();

        let cmd = QuoteCommand::add_item(product("B"), test_time());
        let events1 = quote.handle(&cmd).unwrap();
        let events2 = quote.handle(&cmd).unwrap();

        assert_eq!(quote, before);
        assert_eq!(events1, events2);
    }

    #[test]
    fn event_types_are_stable() {
        let e = QuoteEvent::QuoteCleared(QuoteCleared {
            occurred_at: test_time(),
        });
        assert_eq!(e.event_type(), "quote.cleared");
        assert_eq!(Event::version(&e), 1);
    }

    #[test]
    fn quote_item_serializes_as_product_and_quantity() {
        let item = QuoteItem::new(product("mob-001"), 3);
        let value = serde_json::to_value(&item).unwrap();
        assert_eq!(value["quantity"], 3);
        assert_eq!(value["product"]["id"], "mob-001");
        assert_eq!(value["product"]["priceRange"], "$10-20");
    }

    mod proptest_tests {
        use super::*;
        use proptest::prelude::*;

        #[derive(Debug, Clone)]
        enum Op {
            Add(u8),
            Remove(u8),
            Set(u8, i64),
            Clear,
        }

        fn op() -> impl Strategy<Value = Op> {
            prop_oneof![
                4 => (0u8..6).prop_map(Op::Add),
                2 => (0u8..6).prop_map(Op::Remove),
                3 => ((0u8..6), -3i64..10).prop_map(|(p, q)| Op::Set(p, q)),
                1 => Just(Op::Clear),
            ]
        }

        fn to_command(op: &Op) -> QuoteCommand {
            let now = Utc::now();
            match op {
                Op::Add(p) => QuoteCommand::add_item(product(&format!("p{p}")), now),
                Op::Remove(p) => QuoteCommand::remove_item(pid(&format!("p{p}")), now),
                Op::Set(p, q) => QuoteCommand::set_quantity(pid(&format!("p{p}")), *q, now),
                Op::Clear => QuoteCommand::clear(now),
            }
        }

        proptest! {
            #![proptest_config(ProptestConfig {
                cases: 500,
                ..ProptestConfig::default()
            })]

            /// Property: lines stay unique by product id and quantities stay positive.
            #[test]
            fn lines_stay_unique_and_positive(ops in prop::collection::vec(op(), 0..60)) {
                let mut quote = Quote::empty();
                for op in &ops {
                    execute(&mut quote, &to_command(op)).unwrap();
                }

                let mut ids: Vec<_> = quote.items().iter().map(|i| i.product_id().clone()).collect();
                let len = ids.len();
                ids.sort();
                ids.dedup();
                prop_assert_eq!(ids.len(), len);
                prop_assert!(quote.items().iter().all(|i| i.quantity >= 1));
            }

            /// Property: item_count always equals the sum of line quantities.
            #[test]
            fn item_count_tracks_a_reference_model(ops in prop::collection::vec(op(), 0..60)) {
                let mut quote = Quote::empty();
                let mut model: Vec<(u8, u64)> = Vec::new();

                for op in &ops {
                    execute(&mut quote, &to_command(op)).unwrap();
                    match op {
                        Op::Add(p) => match model.iter_mut().find(|(id, _)| id == p) {
                            Some((_, q)) => *q += 1,
                            None => model.push((*p, 1)),
                        },
                        Op::Remove(p) => model.retain(|(id, _)| id != p),
                        Op::Set(p, q) if *q <= 0 => model.retain(|(id, _)| id != p),
                        Op::Set(p, q) => {
                            if let Some((_, current)) = model.iter_mut().find(|(id, _)| id == p) {
                                *current = *q as u64;
                            }
                        }
                        Op::Clear => model.clear(),
                    }
                }

                let expected: u64 = model.iter().map(|(_, q)| q).sum();
                prop_assert_eq!(quote.item_count(), expected);
                prop_assert_eq!(quote.len(), model.len());
            }

            /// Property: apply is deterministic (same events = same state).
            #[test]
            fn replaying_events_rebuilds_the_same_quote(ops in prop::collection::vec(op(), 0..40)) {
                let mut quote = Quote::empty();
                let mut log = Vec::new();
                for op in &ops {
                    log.extend(execute(&mut quote, &to_command(op)).unwrap());
                }

                let mut replayed = Quote::empty();
                for event in &log {
                    replayed.apply(event);
                }
                prop_assert_eq!(replayed, quote);
            }
        }
    }
}
