//! Core library for invoice line extraction and catalog reconciliation.
//!
//! This crate provides:
//! - Document loading (CSV, PDF, images through OCR, plain text)
//! - Segmentation of order documents into header fields and item lines
//! - Token-sort fuzzy matching of item lines against a product catalog
//! - Quantity and unit price inference and order summary assembly

pub mod document;
pub mod error;
pub mod invoice;
pub mod models;
pub mod ocr;
pub mod pdf;

pub use document::{DocumentKind, DocumentLoader};
pub use error::{InvmatchError, Result};
pub use invoice::{InvoiceReconciler, ReconcileReport, SegmentMode};
pub use models::{
    Catalog, CatalogIndex, InvmatchConfig, InvoiceItem, MatchResult, OrderSummary, Product,
};
pub use ocr::{OcrBackend, OcrResult, TextBox};
pub use pdf::{PdfContent, PdfProcessor};
