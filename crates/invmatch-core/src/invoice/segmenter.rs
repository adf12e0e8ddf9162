//! Splits document lines into header fields and item lines.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::models::order::UNKNOWN;

use super::rules::{
    CustomerExtractor, FieldExtractor, HEADER_NAME_MARKER, HEADER_QUANTITY_MARKER,
    OrderDateExtractor, TOTAL_MARKER,
};

/// How a document's lines are interpreted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SegmentMode {
    /// Pick `FreeText` or `Structured` with [`looks_unstructured`].
    #[default]
    Auto,
    /// Tabular invoice: header fields plus an item section.
    Structured,
    /// Continuous text: every line is an item line.
    FreeText,
}

/// Header fields and item lines of one document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Segmentation {
    pub order_date: String,
    pub customer_name: String,
    pub item_lines: Vec<String>,
    /// Mode actually applied, never `Auto`.
    pub mode: SegmentMode,
}

/// Heuristic: a document where every line contains whitespace reads like
/// prose or OCR output rather than a table. Not a guarantee; an empty
/// document counts as unstructured.
pub fn looks_unstructured<S: AsRef<str>>(lines: &[S]) -> bool {
    lines
        .iter()
        .all(|line| line.as_ref().chars().any(char::is_whitespace))
}

/// Segment lines according to `mode`.
pub fn segment<S: AsRef<str>>(lines: &[S], mode: SegmentMode) -> Segmentation {
    let mode = match mode {
        SegmentMode::Auto if looks_unstructured(lines) => SegmentMode::FreeText,
        SegmentMode::Auto => SegmentMode::Structured,
        other => other,
    };
    debug!("Segmenting {} lines as {:?}", lines.len(), mode);

    match mode {
        SegmentMode::FreeText => Segmentation {
            order_date: UNKNOWN.to_string(),
            customer_name: UNKNOWN.to_string(),
            item_lines: lines.iter().map(|l| l.as_ref().to_string()).collect(),
            mode,
        },
        _ => segment_structured(lines),
    }
}

/// Single forward pass over a tabular document.
///
/// The first date and the first customer line win. Item lines are the
/// trimmed, non-blank lines between a header row containing both `品名` and
/// `數量` and a row containing `總金額`; both boundary rows are excluded.
pub fn segment_structured<S: AsRef<str>>(lines: &[S]) -> Segmentation {
    let dates = OrderDateExtractor::new();
    let customers = CustomerExtractor::new();

    let mut order_date = None;
    let mut customer_name = None;
    let mut item_lines = Vec::new();
    let mut in_items = false;

    for line in lines {
        let line = line.as_ref();

        if order_date.is_none() {
            order_date = dates.extract(line);
        }
        if customer_name.is_none() {
            customer_name = customers.extract(line);
        }

        if line.contains(HEADER_NAME_MARKER) && line.contains(HEADER_QUANTITY_MARKER) {
            in_items = true;
            continue;
        }
        if line.contains(TOTAL_MARKER) {
            in_items = false;
            continue;
        }

        let trimmed = line.trim();
        if in_items && !trimmed.is_empty() {
            item_lines.push(trimmed.to_string());
        }
    }

    Segmentation {
        order_date: order_date.unwrap_or_else(|| UNKNOWN.to_string()),
        customer_name: customer_name.unwrap_or_else(|| UNKNOWN.to_string()),
        item_lines,
        mode: SegmentMode::Structured,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const INVOICE: &[&str] = &[
        "訂貨單",
        "日期:2024-03-15",
        "客戶代號: C001 (大同商行)",
        "品名\t數量\t單價",
        "蘋果汁330ml\t5\t25",
        "   ",
        "紅茶\t3",
        "總金額\t140",
        "備註:2024-04-01",
        "客戶代號: C999 (別家)",
    ];

    #[test]
    fn test_structured_invoice() {
        let seg = segment(INVOICE, SegmentMode::Auto);

        assert_eq!(seg.mode, SegmentMode::Structured);
        assert_eq!(seg.order_date, "2024-03-15");
        assert_eq!(seg.customer_name, "大同商行");
        assert_eq!(seg.item_lines, vec!["蘋果汁330ml\t5\t25", "紅茶\t3"]);
    }

    #[test]
    fn test_first_date_wins() {
        let seg = segment_structured(&["2024-03-15", "2025-01-01"]);
        assert_eq!(seg.order_date, "2024-03-15");
    }

    #[test]
    fn test_defaults_unknown() {
        let seg = segment_structured(&["hello", "world"]);
        assert_eq!(seg.order_date, "Unknown");
        assert_eq!(seg.customer_name, "Unknown");
        assert!(seg.item_lines.is_empty());
    }

    #[test]
    fn test_header_fields_inside_item_section() {
        let seg = segment_structured(&["品名 數量", "紅茶 3 2024/05/06"]);
        assert_eq!(seg.order_date, "2024/05/06");
        assert_eq!(seg.item_lines, vec!["紅茶 3 2024/05/06"]);
    }

    #[test]
    fn test_reopened_item_section() {
        let seg = segment_structured(&["品名 數量", "A", "總金額", "B", "品名 數量", "C"]);
        assert_eq!(seg.item_lines, vec!["A", "C"]);
    }

    #[test]
    fn test_looks_unstructured() {
        assert!(looks_unstructured(&["紅茶 3", "綠茶 2"]));
        assert!(!looks_unstructured(&["紅茶 3", "綠茶2"]));
        assert!(looks_unstructured::<&str>(&[]));
    }

    #[test]
    fn test_free_text_uses_all_lines() {
        let lines = ["客戶代號: C001 (大同商行)", " 紅茶 3 ", "2024-03-15 綠茶 2"];
        let seg = segment(&lines, SegmentMode::Auto);

        assert_eq!(seg.mode, SegmentMode::FreeText);
        assert_eq!(seg.order_date, "Unknown");
        assert_eq!(seg.customer_name, "Unknown");
        assert_eq!(seg.item_lines, lines.to_vec());
    }

    #[test]
    fn test_forced_modes() {
        let lines = ["紅茶 3", "綠茶 2"];
        assert_eq!(segment(&lines, SegmentMode::Structured).item_lines.len(), 0);
        assert_eq!(segment(&["紅茶3"], SegmentMode::FreeText).item_lines, vec!["紅茶3"]);
    }
}
