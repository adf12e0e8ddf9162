//! Data models for invmatch.

pub mod catalog;
pub mod config;
pub mod order;

pub use catalog::{Catalog, CatalogIndex, Product};
pub use config::InvmatchConfig;
pub use order::{InvoiceItem, MatchResult, OrderSummary};
