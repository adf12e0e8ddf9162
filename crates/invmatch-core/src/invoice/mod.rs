//! Order document segmentation, catalog matching and summary assembly.

mod assembler;
pub mod fuzz;
mod matcher;
mod reconciler;
pub mod rules;
mod segmenter;

pub use assembler::{Assembly, SummaryAssembler};
pub use matcher::{CatalogMatcher, LineMatch, LineMatches};
pub use reconciler::{InvoiceReconciler, ReconcileReport};
pub use segmenter::{SegmentMode, Segmentation, looks_unstructured, segment, segment_structured};
