//! Quote request form: contact details validation and the `mailto:` hand-off.

use core::str::FromStr;

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::quote::QuoteItem;

/// Mailbox that receives quote requests unless configured otherwise.
pub const DEFAULT_QUOTE_RECIPIENT: &str = "info@happyhomecare.com";

const MAILTO_SUBJECT: &str = "Medical Equipment Quote Request";
const MIN_PHONE_LEN: usize = 10;

static EMAIL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)^[A-Z0-9_'+\-.]*[A-Z0-9_+\-]@([A-Z0-9][A-Z0-9\-]*\.)+[A-Z]{2,}$")
        .expect("valid email regex")
});

/// How the visitor prefers to be contacted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContactMethod {
    Phone,
    Email,
    #[default]
    Either,
}

impl ContactMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            ContactMethod::Phone => "phone",
            ContactMethod::Email => "email",
            ContactMethod::Either => "either",
        }
    }

    fn label(&self) -> &'static str {
        match self {
            ContactMethod::Phone => "Phone",
            ContactMethod::Email => "Email",
            ContactMethod::Either => "Either",
        }
    }
}

impl FromStr for ContactMethod {
    type Err = FieldError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "phone" => Ok(ContactMethod::Phone),
            "email" => Ok(ContactMethod::Email),
            "either" => Ok(ContactMethod::Either),
            _ => Err(FieldError::new(
                "contactMethod",
                "Please select a preferred contact method",
            )),
        }
    }
}

/// One failed form field.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize)]
#[error("{field}: {message}")]
pub struct FieldError {
    pub field: &'static str,
    pub message: &'static str,
}

impl FieldError {
    pub fn new(field: &'static str, message: &'static str) -> Self {
        Self { field, message }
    }
}

/// Every field error found in one validation pass, in form order.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize)]
#[error("quote request is invalid ({} field error(s))", .errors.len())]
pub struct RequestErrors {
    pub errors: Vec<FieldError>,
}

impl RequestErrors {
    pub fn for_field(&self, field: &str) -> Option<&FieldError> {
        self.errors.iter().find(|e| e.field == field)
    }
}

/// Contact details submitted with a quote.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuoteRequest {
    pub name: String,
    pub email: String,
    pub phone: String,
    #[serde(default)]
    pub contact_method: ContactMethod,
    #[serde(default)]
    pub notes: Option<String>,
}

impl QuoteRequest {
    pub fn validate(&self) -> Result<(), RequestErrors> {
        let mut errors = Vec::new();

        if self.name.is_empty() {
            errors.push(FieldError::new("name", "Name is required"));
        }

        if self.email.is_empty() {
            errors.push(FieldError::new("email", "Email is required"));
        } else if !is_valid_email(&self.email) {
            errors.push(FieldError::new("email", "Invalid email address"));
        }

        if self.phone.chars().count() < MIN_PHONE_LEN {
            errors.push(FieldError::new("phone", "Phone number is required"));
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(RequestErrors { errors })
        }
    }

    /// Notes as shown in the email body; blank notes read "None".
    fn notes_or_none(&self) -> &str {
        match self.notes.as_deref() {
            Some(notes) if !notes.is_empty() => notes,
            _ => "None",
        }
    }
}

fn is_valid_email(email: &str) -> bool {
    // The regex crate has no lookahead, so the leading-dot and ".." rules live here.
    !email.starts_with('.') && !email.contains("..") && EMAIL_RE.is_match(email)
}

/// Build the `mailto:` link that opens the visitor's mail client with the
/// quote pre-filled. Subject and body are percent-encoded.
pub fn mailto_link(request: &QuoteRequest, items: &[QuoteItem], recipient: &str) -> String {
    let items_list = items
        .iter()
        .enumerate()
        .map(|(idx, item)| {
            format!(
                "{}. {} ({}) - Quantity: {}",
                idx + 1,
                item.product.name(),
                item.product.price_range(),
                item.quantity
            )
        })
        .collect::<Vec<_>>()
        .join("\n");

    let body = format!(
        "Quote Request Details\n\
         =====================\n\
         \n\
         Contact Information:\n\
         --------------------\n\
         Name: {name}\n\
         Email: {email}\n\
         Phone: {phone}\n\
         Preferred Contact Method: {method}\n\
         \n\
         Requested Items:\n\
         ----------------\n\
         {items_list}\n\
         \n\
         Additional Notes:\n\
         -----------------\n\
         {notes}\n\
         \n\
         Please provide pricing and availability for the above items.\n\
         \n\
         Thank you!",
        name = request.name,
        email = request.email,
        phone = request.phone,
        method = request.contact_method.label(),
        notes = request.notes_or_none(),
    );

    format!(
        "mailto:{recipient}?subject={}&body={}",
        urlencoding::encode(MAILTO_SUBJECT),
        urlencoding::encode(body.trim()),
    )
}
