//! Customer name extraction from `客戶代號` lines.

use super::FieldExtractor;
use super::patterns::CUSTOMER_CODE;

/// Extracts the parenthesised customer name after a customer code.
/// The code itself is ignored.
pub struct CustomerExtractor;

impl CustomerExtractor {
    pub fn new() -> Self {
        Self
    }
}

impl Default for CustomerExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl FieldExtractor for CustomerExtractor {
    type Output = String;

    fn extract(&self, text: &str) -> Option<String> {
        CUSTOMER_CODE.captures(text).map(|caps| caps[1].to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_customer() {
        let extractor = CustomerExtractor::new();

        assert_eq!(
            extractor.extract("客戶代號: C001 (大同商行)"),
            Some("大同商行".to_string())
        );
        assert_eq!(
            extractor.extract("客戶代號C002(永和超市)"),
            Some("永和超市".to_string())
        );
    }

    #[test]
    fn test_requires_code_and_name() {
        let extractor = CustomerExtractor::new();

        assert_eq!(extractor.extract("客戶代號: C001"), None);
        assert_eq!(extractor.extract("客戶: C001 (大同商行)"), None);
    }
}
