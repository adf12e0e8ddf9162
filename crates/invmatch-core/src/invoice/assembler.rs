//! Builds the order summary from matched item lines.

use tracing::{debug, warn};

use crate::models::catalog::CatalogIndex;
use crate::models::order::{DEFAULT_STATUS, InvoiceItem, OrderSummary};

use super::matcher::LineMatch;
use super::rules::interpret_line;

/// Summary plus the warnings raised while building it.
#[derive(Debug, Clone)]
pub struct Assembly {
    pub summary: OrderSummary,
    pub warnings: Vec<String>,
}

/// Turns matched lines into invoice items and totals them.
pub struct SummaryAssembler<'i, 'c> {
    index: &'i CatalogIndex<'c>,
    tax: i64,
    status: String,
}

impl<'i, 'c> SummaryAssembler<'i, 'c> {
    pub fn new(index: &'i CatalogIndex<'c>) -> Self {
        Self {
            index,
            tax: 0,
            status: DEFAULT_STATUS.to_string(),
        }
    }

    pub fn with_tax(mut self, tax: i64) -> Self {
        self.tax = tax;
        self
    }

    pub fn with_status(mut self, status: impl Into<String>) -> Self {
        self.status = status.into();
        self
    }

    /// Assemble the summary in match order.
    ///
    /// A match whose name is missing from the catalog is dropped with a
    /// warning; it means the matcher ran against a different catalog.
    pub fn assemble(
        &self,
        customer_name: &str,
        order_date: &str,
        matches: &[LineMatch<'_>],
    ) -> Assembly {
        let mut items = Vec::with_capacity(matches.len());
        let mut warnings = Vec::new();
        let mut total_amount = 0u64;

        for m in matches {
            let Some(product) = self.index.lookup(&m.result.matched_name) else {
                warn!("No catalog product named {:?}, dropping line", m.result.matched_name);
                warnings.push(format!(
                    "No match found in catalog for '{}'",
                    m.result.matched_name
                ));
                continue;
            };

            let quantity = interpret_line(m.line);
            let subtotal = quantity.subtotal();
            total_amount = total_amount.saturating_add(subtotal);

            items.push(InvoiceItem {
                product_id: product.product_id.clone(),
                matched_name: m.result.matched_name.clone(),
                original_input: m.line.to_string(),
                quantity: quantity.quantity,
                unit_price: quantity.unit_price,
                subtotal,
                match_score: m.result.score,
            });
        }

        debug!("Assembled {} items, total {}", items.len(), total_amount);

        Assembly {
            summary: OrderSummary {
                customer_name: customer_name.to_string(),
                order_date: order_date.to_string(),
                items,
                total_amount,
                tax: self.tax,
                status: self.status.clone(),
            },
            warnings,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::catalog::{Catalog, Product};
    use crate::models::order::MatchResult;
    use pretty_assertions::assert_eq;

    fn line_match<'l>(line: &'l str, name: &str, score: u8) -> LineMatch<'l> {
        LineMatch {
            line,
            result: MatchResult {
                matched_name: name.to_string(),
                score,
            },
        }
    }

    #[test]
    fn test_total_is_sum_of_subtotals() {
        let catalog = Catalog::new(vec![
            Product::new("A1", "紅茶"),
            Product::new("A2", "綠茶"),
            Product::new("A3", "奶茶"),
        ]);
        let index = CatalogIndex::new(&catalog);
        let matches = [
            line_match("紅茶 5 12", "紅茶", 80),
            line_match("綠茶 2x3", "綠茶", 80),
            line_match("奶茶", "奶茶", 100),
        ];

        let assembly = SummaryAssembler::new(&index)
            .with_tax(7)
            .with_status("done")
            .assemble("大同商行", "2024-03-15", &matches);
        let summary = assembly.summary;

        let subtotals: Vec<u64> = summary.items.iter().map(|i| i.subtotal).collect();
        assert_eq!(subtotals, vec![60, 0, 0]);
        assert_eq!(summary.total_amount, 60);
        assert_eq!(summary.total_amount, summary.items_total());
        assert_eq!(summary.tax, 7);
        assert_eq!(summary.status, "done");
        assert_eq!(summary.customer_name, "大同商行");
        assert_eq!(summary.items[1].quantity, 6);
        assert_eq!(summary.items[0].product_id, "A1");
        assert!(assembly.warnings.is_empty());
    }

    #[test]
    fn test_unknown_name_dropped_with_warning() {
        let catalog = Catalog::new(vec![Product::new("A1", "紅茶")]);
        let index = CatalogIndex::new(&catalog);
        let matches = [line_match("咖啡 2 50", "咖啡", 90), line_match("紅茶 1 20", "紅茶", 80)];

        let assembly = SummaryAssembler::new(&index).assemble("Unknown", "Unknown", &matches);

        assert_eq!(assembly.summary.items.len(), 1);
        assert_eq!(assembly.summary.items[0].matched_name, "紅茶");
        assert_eq!(assembly.summary.total_amount, 20);
        assert_eq!(assembly.warnings, vec!["No match found in catalog for '咖啡'"]);
    }

    #[test]
    fn test_duplicate_names_resolve_to_first_product() {
        let catalog = Catalog::new(vec![Product::new("A1", "紅茶"), Product::new("B7", "紅茶")]);
        let index = CatalogIndex::new(&catalog);

        let assembly =
            SummaryAssembler::new(&index).assemble("x", "y", &[line_match("紅茶 3", "紅茶", 80)]);
        assert_eq!(assembly.summary.items[0].product_id, "A1");
        assert_eq!(assembly.summary.status, "處理中");
    }
}
