//! Regex patterns and marker tokens for order documents.

use lazy_static::lazy_static;
use regex::Regex;

/// Item table header marker: product name column.
pub const HEADER_NAME_MARKER: &str = "品名";

/// Item table header marker: quantity column.
pub const HEADER_QUANTITY_MARKER: &str = "數量";

/// Marker of the totals row closing the item table.
pub const TOTAL_MARKER: &str = "總金額";

lazy_static! {
    // Order date: YYYY-MM-DD or YYYY/MM/DD anywhere in the line
    pub static ref ORDER_DATE: Regex = Regex::new(
        r"\d{4}[-/]\d{2}[-/]\d{2}"
    ).unwrap();

    // Customer: "客戶代號: <code> (<name>)", colon optional
    pub static ref CUSTOMER_CODE: Regex = Regex::new(
        r"客戶代號:?\s*\S+\s*\(([^)]+)\)"
    ).unwrap();

    // Quantity written as a product, e.g. "2x10", "3×12", "４*６"
    pub static ref MULTIPLIED_QUANTITY: Regex = Regex::new(
        r"(\d+)[×xX*](\d+)"
    ).unwrap();

    // Run of decimal digits in any script
    pub static ref INTEGER: Regex = Regex::new(
        r"\d+"
    ).unwrap();

    pub static ref DECIMAL_DIGIT: Regex = Regex::new(
        r"^\d$"
    ).unwrap();

    // Anything that is not a letter, digit or underscore
    pub static ref NON_WORD: Regex = Regex::new(
        r"\W"
    ).unwrap();
}
