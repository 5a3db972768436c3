//! Quote builder domain module.
//!
//! The quote is a small mini-cart of medical supplies: one line per product,
//! each with a positive quantity. This crate holds the state machine, the
//! quote request form rules and the hand-off port, as deterministic domain
//! logic (no IO, no storage, no UI).

pub mod quote;
pub mod request;
pub mod submit;

pub use quote::{
    AddItem, ClearQuote, ItemAdded, ItemRemoved, QuantityChanged, Quote, QuoteCleared,
    QuoteCommand, QuoteEvent, QuoteItem, QuoteRestored, QuoteState, RemoveItem, RestoreQuote,
    SetQuantity,
};
pub use request::{
    ContactMethod, DEFAULT_QUOTE_RECIPIENT, FieldError, QuoteRequest, RequestErrors, mailto_link,
};
pub use submit::{QuoteSubmitter, SubmissionReceipt, SubmitError};
