//! Snapshot codec for the persisted quote slot.
//!
//! The slot holds a JSON array of `{ "product": {...}, "quantity": n }`
//! entries, products in camelCase. There is no version tag: decoding is
//! best-effort and drops individual entries that no longer fit instead of
//! discarding the whole quote.

use std::collections::HashSet;

use thiserror::Error;

use happyhome_quote::QuoteItem;

/// Storage key of the single quote slot.
pub const QUOTE_STORAGE_KEY: &str = "medicalSuppliesQuote";

#[derive(Debug, Error)]
pub enum SnapshotError {
    #[error("snapshot is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("snapshot is not a JSON array")]
    NotAnArray,
}

/// Result of decoding a slot: the usable lines plus how many entries were discarded.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct DecodedSnapshot {
    pub items: Vec<QuoteItem>,
    pub dropped: usize,
}

pub fn encode(items: &[QuoteItem]) -> Result<String, SnapshotError> {
    Ok(serde_json::to_string(items)?)
}

pub fn decode(raw: &str) -> Result<DecodedSnapshot, SnapshotError> {
    let value: serde_json::Value = serde_json::from_str(raw)?;
    let serde_json::Value::Array(entries) = value else {
        return Err(SnapshotError::NotAnArray);
    };

    let mut seen = HashSet::new();
    let mut snapshot = DecodedSnapshot::default();

    for (index, entry) in entries.into_iter().enumerate() {
        let item = match serde_json::from_value::<QuoteItem>(entry) {
            Ok(item) => item,
            Err(err) => {
                tracing::debug!(index, error = %err, "dropping unreadable quote entry");
                snapshot.dropped += 1;
                continue;
            }
        };

        if item.product_id().is_blank() || item.quantity < 1 {
            tracing::debug!(index, id = %item.product_id(), quantity = item.quantity, "dropping invalid quote entry");
            snapshot.dropped += 1;
            continue;
        }

        if !seen.insert(item.product_id().clone()) {
            tracing::debug!(index, id = %item.product_id(), "dropping duplicate quote entry");
            snapshot.dropped += 1;
            continue;
        }

        snapshot.items.push(item);
    }

    Ok(snapshot)
}
