//! Quantity and unit price inference from an item line's integers.

use serde::{Deserialize, Serialize};

use super::patterns::{DECIMAL_DIGIT, INTEGER, MULTIPLIED_QUANTITY};

/// Quantity and unit price read from one item line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineQuantity {
    pub quantity: u64,
    pub unit_price: u64,
}

impl LineQuantity {
    pub fn subtotal(&self) -> u64 {
        self.quantity.saturating_mul(self.unit_price)
    }
}

impl Default for LineQuantity {
    fn default() -> Self {
        Self {
            quantity: 1,
            unit_price: 0,
        }
    }
}

/// Interpret the raw item line. The first matching rule wins:
///
/// 1. `<a><×|x|X|*><b>` means quantity `a * b`, no unit price.
/// 2. Exactly two integers are quantity and unit price.
/// 3. Exactly one integer is the quantity.
/// 4. Otherwise quantity 1, no unit price.
///
/// Digits of any script count, so `紅茶 ５ １２` reads as 5 and 12. Integers
/// too large for `u64` saturate.
pub fn interpret_line(line: &str) -> LineQuantity {
    if let Some(caps) = MULTIPLIED_QUANTITY.captures(line) {
        return LineQuantity {
            quantity: parse_int(&caps[1]).saturating_mul(parse_int(&caps[2])),
            unit_price: 0,
        };
    }

    let numbers: Vec<u64> = INTEGER.find_iter(line).map(|m| parse_int(m.as_str())).collect();
    match numbers.as_slice() {
        [quantity, unit_price] => LineQuantity {
            quantity: *quantity,
            unit_price: *unit_price,
        },
        [quantity] => LineQuantity {
            quantity: *quantity,
            unit_price: 0,
        },
        _ => LineQuantity::default(),
    }
}

fn parse_int(digits: &str) -> u64 {
    digits.chars().fold(0u64, |acc, c| {
        acc.saturating_mul(10).saturating_add(digit_value(c))
    })
}

// Decimal digits are encoded in contiguous runs of ten, zero first, so a
// digit's value is its offset from the start of its run modulo ten.
fn digit_value(c: char) -> u64 {
    if let Some(d) = c.to_digit(10) {
        return u64::from(d);
    }

    let mut offset = 0u64;
    let mut code = c as u32;
    while let Some(prev) = code.checked_sub(1).and_then(char::from_u32) {
        if !is_decimal_digit(prev) {
            break;
        }
        offset += 1;
        code -= 1;
    }
    offset % 10
}

fn is_decimal_digit(c: char) -> bool {
    let mut buf = [0u8; 4];
    DECIMAL_DIGIT.is_match(c.encode_utf8(&mut buf))
}
