//! End-to-end reconciliation of a document against a catalog.

use std::time::Instant;

use serde::Serialize;
use tracing::{info, warn};

use crate::document::{DocumentKind, DocumentLoader};
use crate::error::Result;
use crate::models::catalog::CatalogIndex;
use crate::models::config::{MatchingConfig, SummaryConfig};
use crate::models::order::{DEFAULT_STATUS, OrderSummary};

use super::assembler::SummaryAssembler;
use super::matcher::CatalogMatcher;
use super::segmenter::{SegmentMode, segment};

/// Result of reconciling one document.
#[derive(Debug, Clone, Serialize)]
pub struct ReconcileReport {
    /// The order record.
    pub summary: OrderSummary,
    /// Segmentation mode that was applied.
    pub mode: SegmentMode,
    /// Number of lines treated as item lines.
    pub item_line_count: usize,
    /// Item lines without an acceptable catalog match.
    pub unmatched_lines: Vec<String>,
    /// Non-fatal problems met along the way.
    pub warnings: Vec<String>,
    /// Processing time in milliseconds.
    pub processing_time_ms: u64,
}

/// Runs segmentation, matching and assembly with one set of options.
#[derive(Debug, Clone)]
pub struct InvoiceReconciler {
    min_score: Option<u8>,
    tax: i64,
    status: String,
    mode: Option<SegmentMode>,
}

impl InvoiceReconciler {
    /// Create a reconciler with no score threshold and no fixed mode.
    ///
    /// Without a fixed mode, documents are segmented by their kind's natural
    /// mode and bare lines with [`SegmentMode::Auto`].
    pub fn new() -> Self {
        Self {
            min_score: None,
            tax: 0,
            status: DEFAULT_STATUS.to_string(),
            mode: None,
        }
    }

    pub fn from_config(matching: &MatchingConfig, summary: &SummaryConfig) -> Self {
        Self {
            min_score: matching.min_score,
            tax: summary.tax,
            status: summary.status.clone(),
            mode: matching.mode,
        }
    }

    pub fn with_min_score(mut self, min_score: Option<u8>) -> Self {
        self.min_score = min_score;
        self
    }

    pub fn with_tax(mut self, tax: i64) -> Self {
        self.tax = tax;
        self
    }

    pub fn with_status(mut self, status: impl Into<String>) -> Self {
        self.status = status.into();
        self
    }

    pub fn with_mode(mut self, mode: SegmentMode) -> Self {
        self.mode = Some(mode);
        self
    }

    /// Reconcile already extracted lines.
    pub fn reconcile_lines<S: AsRef<str>>(
        &self,
        index: &CatalogIndex<'_>,
        lines: &[S],
    ) -> ReconcileReport {
        self.reconcile_with_mode(index, lines, self.mode.unwrap_or_default())
    }

    fn reconcile_with_mode<S: AsRef<str>>(
        &self,
        index: &CatalogIndex<'_>,
        lines: &[S],
        mode: SegmentMode,
    ) -> ReconcileReport {
        let start = Instant::now();
        let mut warnings = Vec::new();

        let segmentation = segment(lines, mode);
        if segmentation.item_lines.is_empty() {
            warnings.push("No item lines found".to_string());
        }
        if index.is_empty() {
            warn!("Catalog is empty, no line can match");
            warnings.push("Catalog is empty".to_string());
        }

        let matches = CatalogMatcher::new(index)
            .with_min_score(self.min_score)
            .match_lines(&segmentation.item_lines);

        let assembly = SummaryAssembler::new(index)
            .with_tax(self.tax)
            .with_status(self.status.clone())
            .assemble(
                &segmentation.customer_name,
                &segmentation.order_date,
                &matches.matched,
            );
        warnings.extend(assembly.warnings);

        info!(
            "Reconciled {} item lines into {} items (total {})",
            segmentation.item_lines.len(),
            assembly.summary.items.len(),
            assembly.summary.total_amount
        );

        ReconcileReport {
            summary: assembly.summary,
            mode: segmentation.mode,
            item_line_count: segmentation.item_lines.len(),
            unmatched_lines: matches.unmatched.iter().map(|l| l.to_string()).collect(),
            warnings,
            processing_time_ms: start.elapsed().as_millis() as u64,
        }
    }

    /// Load a document and reconcile its lines. Loading failures are fatal.
    pub fn reconcile_document(
        &self,
        index: &CatalogIndex<'_>,
        loader: &DocumentLoader,
        data: &[u8],
        kind: DocumentKind,
    ) -> Result<ReconcileReport> {
        let start = Instant::now();
        let lines = loader.load(data, kind)?;
        let mode = self.mode.unwrap_or_else(|| kind.natural_mode());

        let mut report = self.reconcile_with_mode(index, &lines, mode);
        report.processing_time_ms = start.elapsed().as_millis() as u64;
        Ok(report)
    }
}

impl Default for InvoiceReconciler {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::InvmatchError;
    use crate::models::catalog::{Catalog, Product};
    use pretty_assertions::assert_eq;

    fn goods() -> Catalog {
        Catalog::new(vec![
            Product::new("A001", "蘋果汁330ml"),
            Product::new("A002", "蘋果汁600ml"),
            Product::new("B001", "紅茶"),
            Product::new("B002", "綠茶"),
        ])
    }

    #[test]
    fn test_structured_document() {
        let catalog = goods();
        let index = CatalogIndex::new(&catalog);
        let lines = [
            "訂貨單",
            "訂單日期:2024-03-15",
            "客戶代號: C001 (大同商行)",
            "品名 數量 單價",
            "紅茶 5 12",
            "綠茶3",
            "咖啡豆",
            "總金額 60",
        ];

        // "紅茶 5 12" is scored as the single token "紅茶512": 2 * 2 / (5 + 2)
        let report = InvoiceReconciler::new()
            .with_min_score(Some(57))
            .reconcile_lines(&index, &lines);
        let summary = &report.summary;

        assert_eq!(report.mode, SegmentMode::Structured);
        assert_eq!(summary.order_date, "2024-03-15");
        assert_eq!(summary.customer_name, "大同商行");
        assert_eq!(report.item_line_count, 3);
        assert_eq!(report.unmatched_lines, vec!["咖啡豆"]);
        assert_eq!(summary.items[0].match_score, 57);

        let stricter = InvoiceReconciler::new()
            .with_min_score(Some(60))
            .reconcile_lines(&index, &lines);
        assert_eq!(stricter.unmatched_lines, vec!["紅茶 5 12", "咖啡豆"]);
        assert_eq!(stricter.summary.total_amount, 0);

        let items: Vec<(&str, u64, u64, u64)> = summary
            .items
            .iter()
            .map(|i| (i.product_id.as_str(), i.quantity, i.unit_price, i.subtotal))
            .collect();
        assert_eq!(items, vec![("B001", 5, 12, 60), ("B002", 3, 0, 0)]);
        assert_eq!(summary.total_amount, 60);
        assert_eq!(summary.status, "處理中");
    }

    #[test]
    fn test_free_text_document() {
        let catalog = goods();
        let index = CatalogIndex::new(&catalog);
        let lines = ["客戶代號: C001 (大同商行)", "紅茶 2x10"];

        let report = InvoiceReconciler::new()
            .with_min_score(Some(50))
            .with_tax(5)
            .reconcile_lines(&index, &lines);

        assert_eq!(report.mode, SegmentMode::FreeText);
        assert_eq!(report.summary.customer_name, "Unknown");
        assert_eq!(report.summary.tax, 5);
        assert_eq!(report.summary.items.len(), 1);
        assert_eq!(report.summary.items[0].matched_name, "紅茶");
        assert_eq!(report.summary.items[0].quantity, 20);
        assert_eq!(report.unmatched_lines, vec!["客戶代號: C001 (大同商行)"]);
    }

    #[test]
    fn test_zero_items_vs_zero_lines() {
        let catalog = goods();
        let index = CatalogIndex::new(&catalog);
        let reconciler = InvoiceReconciler::new().with_min_score(Some(99));

        let no_lines = reconciler.reconcile_lines(&index, &["標題", "總金額"]);
        assert_eq!(no_lines.item_line_count, 0);
        assert!(no_lines.warnings.contains(&"No item lines found".to_string()));

        let no_match = reconciler.reconcile_lines(&index, &["品名 數量", "咖啡"]);
        assert_eq!(no_match.item_line_count, 1);
        assert!(no_match.summary.items.is_empty());
        assert_eq!(no_match.summary.total_amount, 0);
    }

    #[test]
    fn test_from_config() {
        let matching = MatchingConfig {
            min_score: Some(101),
            mode: Some(SegmentMode::FreeText),
        };
        let summary = SummaryConfig {
            tax: 3,
            status: "完成".to_string(),
        };
        let catalog = goods();
        let index = CatalogIndex::new(&catalog);

        let report = InvoiceReconciler::from_config(&matching, &summary)
            .reconcile_lines(&index, &["紅茶"]);

        assert_eq!(report.summary.status, "完成");
        assert_eq!(report.summary.tax, 3);
        assert!(report.summary.items.is_empty());
    }

    #[test]
    fn test_reconcile_text_document() {
        let catalog = goods();
        let index = CatalogIndex::new(&catalog);
        let data = "品名\t數量\n蘋果汁330ml\t5\n總金額\t0\n";

        let report = InvoiceReconciler::new()
            .with_min_score(Some(80))
            .reconcile_document(&index, &DocumentLoader::new(), data.as_bytes(), DocumentKind::Text)
            .unwrap();

        // "品名\t數量" and friends all contain whitespace
        assert_eq!(report.mode, SegmentMode::FreeText);
        let names: Vec<&str> = report
            .summary
            .items
            .iter()
            .map(|i| i.matched_name.as_str())
            .collect();
        assert!(names.contains(&"蘋果汁330ml"));
    }

    #[test]
    fn test_reconcile_document_propagates_load_errors() {
        let catalog = goods();
        let index = CatalogIndex::new(&catalog);

        let result = InvoiceReconciler::new().reconcile_document(
            &index,
            &DocumentLoader::new(),
            &[0xff, 0xfe],
            DocumentKind::Text,
        );
        assert!(matches!(result, Err(InvmatchError::Extraction(_))));
    }

    #[test]
    fn test_document_kind_decides_default_mode() {
        let catalog = goods();
        let index = CatalogIndex::new(&catalog);
        let data = "訂貨單\n紅茶 3 20\n".as_bytes();
        let reconciler = InvoiceReconciler::new().with_min_score(Some(50));

        let report = reconciler
            .reconcile_document(&index, &DocumentLoader::new(), data, DocumentKind::Text)
            .unwrap();
        assert_eq!(report.mode, SegmentMode::FreeText);
        assert_eq!(report.summary.items.len(), 1);
        assert_eq!(report.summary.items[0].matched_name, "紅茶");
        assert_eq!(report.summary.total_amount, 60);
        assert_eq!(report.unmatched_lines, vec!["訂貨單"]);

        let auto = reconciler
            .clone()
            .with_mode(SegmentMode::Auto)
            .reconcile_document(&index, &DocumentLoader::new(), data, DocumentKind::Text)
            .unwrap();
        assert_eq!(auto.mode, SegmentMode::Structured);
        assert!(auto.summary.items.is_empty());
    }
}
