//! "Get Quote" hand-off port.
//!
//! The storefront does not talk to a backend; pressing "Get Quote" hands the
//! current lines to whatever submitter the application root injected.

use thiserror::Error;

use crate::quote::QuoteItem;
use crate::request::RequestErrors;

/// What a submitter reports back after accepting a quote.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmissionReceipt {
    /// Number of distinct products handed off.
    pub line_count: usize,
    /// Sum of quantities handed off.
    pub item_count: u64,
    /// Follow-up link for the visitor (e.g. a `mailto:`), when the submitter produces one.
    pub link: Option<String>,
}

impl SubmissionReceipt {
    pub fn for_items(items: &[QuoteItem]) -> Self {
        Self {
            line_count: items.len(),
            item_count: items.iter().map(|i| u64::from(i.quantity)).sum(),
            link: None,
        }
    }

    pub fn with_link(mut self, link: impl Into<String>) -> Self {
        self.link = Some(link.into());
        self
    }
}

#[derive(Debug, Error)]
pub enum SubmitError {
    #[error("the quote is empty")]
    EmptyQuote,
    #[error(transparent)]
    InvalidRequest(#[from] RequestErrors),
    #[error("submission rejected: {0}")]
    Rejected(String),
}

/// Receives the quote when the visitor asks for pricing.
pub trait QuoteSubmitter {
    fn submit(&self, items: &[QuoteItem]) -> Result<SubmissionReceipt, SubmitError>;
}

impl<F> QuoteSubmitter for F
where
    F: Fn(&[QuoteItem]) -> Result<SubmissionReceipt, SubmitError>,
{
    fn submit(&self, items: &[QuoteItem]) -> Result<SubmissionReceipt, SubmitError> {
        self(items)
    }
}
