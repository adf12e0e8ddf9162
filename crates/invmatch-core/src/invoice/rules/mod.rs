//! Rule-based field extractors for order documents.

pub mod customer;
pub mod dates;
pub mod patterns;
pub mod quantity;

pub use customer::CustomerExtractor;
pub use dates::OrderDateExtractor;
pub use patterns::*;
pub use quantity::{LineQuantity, interpret_line};

/// Trait for field extractors.
pub trait FieldExtractor {
    /// The type of value this extractor produces.
    type Output;

    /// Extract the field from text.
    fn extract(&self, text: &str) -> Option<Self::Output>;
}
