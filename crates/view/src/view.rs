//! Plain render data handed to the quote surfaces.

use serde::Serialize;

use happyhome_core::ProductId;
use happyhome_quote::QuoteItem;

use crate::viewport::Viewport;

/// Which surface renders the quote.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum Surface {
    Sidebar,
    Drawer { expanded: bool },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QuoteRow {
    pub product_id: ProductId,
    pub name: String,
    pub price_range: String,
    pub quantity: u32,
}

impl From<&QuoteItem> for QuoteRow {
    fn from(item: &QuoteItem) -> Self {
        Self {
            product_id: item.product_id().clone(),
            name: item.product.name().to_string(),
            price_range: item.product.price_range().to_string(),
            quantity: item.quantity,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QuoteView {
    pub viewport: Viewport,
    pub surface: Surface,
    pub rows: Vec<QuoteRow>,
    pub item_count: u64,
    pub count_label: String,
    pub is_empty: bool,
}

/// Product grid card state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductCard {
    pub product_id: ProductId,
    pub name: String,
    pub in_quote: bool,
    pub action_label: &'static str,
}

impl ProductCard {
    pub const ADD_LABEL: &'static str = "Add to Quote";
    pub const ADDED_LABEL: &'static str = "Added to Quote";
}

/// "1 item" / "N items", counted over quantities.
pub fn count_label(item_count: u64) -> String {
    if item_count == 1 {
        "1 item".to_string()
    } else {
        format!("{item_count} items")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn count_label_pluralizes() {
        assert_eq!(count_label(0), "0 items");
        assert_eq!(count_label(1), "1 item");
        assert_eq!(count_label(7), "7 items");
    }

    #[test]
    fn surface_serializes_with_a_kind_tag() {
        let drawer = serde_json::to_value(Surface::Drawer { expanded: true }).unwrap();
        assert_eq!(drawer["kind"], "drawer");
        assert_eq!(drawer["expanded"], true);
        assert_eq!(serde_json::to_value(Surface::Sidebar).unwrap()["kind"], "sidebar");
    }
}
