//! Order date extraction.

use super::FieldExtractor;
use super::patterns::ORDER_DATE;

/// Finds `YYYY-MM-DD` / `YYYY/MM/DD` dates and returns the matched text.
pub struct OrderDateExtractor;

impl OrderDateExtractor {
    pub fn new() -> Self {
        Self
    }
}

impl Default for OrderDateExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl FieldExtractor for OrderDateExtractor {
    type Output = String;

    fn extract(&self, text: &str) -> Option<String> {
        ORDER_DATE.find(text).map(|m| normalize_date(m.as_str()))
    }
}

// ORDER_DATE only matches ASCII separators, so this replacement never fires.
// It is kept so that widening the pattern to 年/月/日 dates yields ISO-style
// output without further changes.
fn normalize_date(date: &str) -> String {
    date.replace('年', "-").replace('月', "-").replace('日', "")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_date_dash_and_slash() {
        let extractor = OrderDateExtractor::new();

        assert_eq!(extractor.extract("訂單日期 2024-03-15"), Some("2024-03-15".to_string()));
        assert_eq!(extractor.extract("2024/03/15 出貨"), Some("2024/03/15".to_string()));
    }

    #[test]
    fn test_no_date() {
        let extractor = OrderDateExtractor::new();

        assert_eq!(extractor.extract("2024-3-15"), None);
        assert_eq!(extractor.extract("2024年03月15日"), None);
    }

    #[test]
    fn test_normalize_date() {
        assert_eq!(normalize_date("2024年03月15日"), "2024-03-15");
        assert_eq!(normalize_date("2024-03-15"), "2024-03-15");
    }
}
