//! `QuoteSubmitter` adapters injected at the application root.

use happyhome_quote::{
    QuoteItem, QuoteRequest, QuoteSubmitter, SubmissionReceipt, SubmitError, mailto_link,
};

/// Records the hand-off in the log and accepts it.
#[derive(Debug, Default, Clone, Copy)]
pub struct LoggingSubmitter;

impl QuoteSubmitter for LoggingSubmitter {
    fn submit(&self, items: &[QuoteItem]) -> Result<SubmissionReceipt, SubmitError> {
        let receipt = SubmissionReceipt::for_items(items);
        let ids: Vec<&str> = items.iter().map(|i| i.product_id().as_str()).collect();
        tracing::info!(
            lines = receipt.line_count,
            items = receipt.item_count,
            products = ?ids,
            "quote handed off"
        );
        Ok(receipt)
    }
}

/// Validates the contact form and composes the `mailto:` link for the quote.
#[derive(Debug, Clone)]
pub struct MailtoSubmitter {
    request: QuoteRequest,
    recipient: String,
}

impl MailtoSubmitter {
    pub fn new(request: QuoteRequest, recipient: impl Into<String>) -> Self {
        Self {
            request,
            recipient: recipient.into(),
        }
    }
}

impl QuoteSubmitter for MailtoSubmitter {
    fn submit(&self, items: &[QuoteItem]) -> Result<SubmissionReceipt, SubmitError> {
        if items.is_empty() {
            return Err(SubmitError::EmptyQuote);
        }
        self.request.validate()?;

        let link = mailto_link(&self.request, items, &self.recipient);
        let receipt = SubmissionReceipt::for_items(items).with_link(link);
        tracing::info!(
            lines = receipt.line_count,
            items = receipt.item_count,
            contact_method = self.request.contact_method.as_str(),
            "quote request composed"
        );
        Ok(receipt)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use happyhome_catalog::Product;
    use happyhome_quote::ContactMethod;

    fn request() -> QuoteRequest {
        QuoteRequest {
            name: "Grace".to_string(),
            email: "grace@example.com".to_string(),
            phone: "5551234567".to_string(),
            contact_method: ContactMethod::Phone,
            notes: Some("Ground floor".to_string()),
        }
    }

    fn items() -> Vec<QuoteItem> {
        vec![QuoteItem::new(Product::new("bed-001", "Hospital Bed"), 1)]
    }

    #[test]
    fn logging_submitter_accepts_anything() {
        let receipt = LoggingSubmitter.submit(&items()).unwrap();
        assert_eq!(receipt.line_count, 1);
        assert!(receipt.link.is_none());
    }

    #[test]
    fn mailto_submitter_returns_link() {
        let submitter = MailtoSubmitter::new(request(), "quotes@example.com");
        let receipt = submitter.submit(&items()).unwrap();
        let link = receipt.link.unwrap();
        assert!(link.starts_with("mailto:quotes@example.com?subject="));
        assert!(link.contains("Ground%20floor"));
    }

    #[test]
    fn mailto_submitter_rejects_empty_quote_and_bad_form() {
        let submitter = MailtoSubmitter::new(request(), "quotes@example.com");
        assert!(matches!(submitter.submit(&[]), Err(SubmitError::EmptyQuote)));

        let bad = QuoteRequest {
            phone: "123".to_string(),
            ..request()
        };
        let err = MailtoSubmitter::new(bad, "quotes@example.com")
            .submit(&items())
            .unwrap_err();
        match err {
            SubmitError::InvalidRequest(errors) => assert!(errors.for_field("phone").is_some()),
            other => panic!("unexpected error: {other:?}"),
        }
    }
}
