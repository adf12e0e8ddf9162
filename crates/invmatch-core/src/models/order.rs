//! Order summary produced by reconciliation.
//!
//! Field order and names are the JSON contract consumed downstream.

use serde::{Deserialize, Serialize};

/// Placeholder for a customer name or order date that was not found.
pub const UNKNOWN: &str = "Unknown";

/// Status attached to a summary when the caller supplies none.
pub const DEFAULT_STATUS: &str = "處理中";

/// Best catalog match for one input line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchResult {
    /// Catalog product name.
    pub matched_name: String,

    /// Token-sort similarity (0-100).
    pub score: u8,
}

/// A matched, quantified invoice line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InvoiceItem {
    pub product_id: String,
    pub matched_name: String,
    /// The item line as it appeared in the document.
    pub original_input: String,
    pub quantity: u64,
    pub unit_price: u64,
    /// `quantity * unit_price`.
    pub subtotal: u64,
    pub match_score: u8,
}

/// Final order record for one document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderSummary {
    pub customer_name: String,
    pub order_date: String,
    pub items: Vec<InvoiceItem>,
    /// Sum of item subtotals.
    pub total_amount: u64,
    pub tax: i64,
    pub status: String,
}

impl OrderSummary {
    /// Create an empty summary with unknown header fields.
    pub fn new() -> Self {
        Self {
            customer_name: UNKNOWN.to_string(),
            order_date: UNKNOWN.to_string(),
            items: Vec::new(),
            total_amount: 0,
            tax: 0,
            status: DEFAULT_STATUS.to_string(),
        }
    }

    /// Recompute the total from the items.
    pub fn items_total(&self) -> u64 {
        self.items
            .iter()
            .fold(0u64, |acc, item| acc.saturating_add(item.subtotal))
    }

    /// Serialize to the pretty-printed JSON written for consumers.
    pub fn to_json_pretty(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

impl Default for OrderSummary {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn item(name: &str, quantity: u64, unit_price: u64) -> InvoiceItem {
        InvoiceItem {
            product_id: format!("ID-{}", name),
            matched_name: name.to_string(),
            original_input: format!("{} {} {}", name, quantity, unit_price),
            quantity,
            unit_price,
            subtotal: quantity * unit_price,
            match_score: 90,
        }
    }

    #[test]
    fn test_json_field_order() {
        let summary = OrderSummary::new();
        let json = serde_json::to_string(&summary).unwrap();
        assert_eq!(
            json,
            r#"{"customer_name":"Unknown","order_date":"Unknown","items":[],"total_amount":0,"tax":0,"status":"處理中"}"#
        );
    }

    #[test]
    fn test_item_field_order() {
        let json = serde_json::to_string(&item("紅茶", 5, 12)).unwrap();
        assert_eq!(
            json,
            r#"{"product_id":"ID-紅茶","matched_name":"紅茶","original_input":"紅茶 5 12","quantity":5,"unit_price":12,"subtotal":60,"match_score":90}"#
        );
    }

    #[test]
    fn test_json_round_trip() {
        let mut summary = OrderSummary::new();
        summary.customer_name = "大同商行".to_string();
        summary.items = vec![item("紅茶", 5, 12), item("綠茶", 3, 0), item("奶茶", 1, 0)];
        summary.total_amount = summary.items_total();

        let json = summary.to_json_pretty().unwrap();
        let parsed: OrderSummary = serde_json::from_str(&json).unwrap();

        assert_eq!(parsed.items, summary.items);
        assert_eq!(parsed.total_amount, 60);
        assert_eq!(parsed, summary);
    }
}
