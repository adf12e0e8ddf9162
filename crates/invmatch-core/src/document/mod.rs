//! Document loading: raw bytes of a known kind to ordered text lines.

mod text;

pub use text::{csv_first_column, split_lines, text_lines};

use std::fmt;
use std::path::Path;

use tracing::{debug, info};

use crate::error::{InvmatchError, Result};
use crate::invoice::SegmentMode;
use crate::models::config::{InvmatchConfig, OcrConfig};
use crate::ocr::{OcrBackend, backend_from_config};
use crate::pdf::PdfExtractor;

/// Supported document kinds, decided once at the boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DocumentKind {
    Csv,
    Pdf,
    Image,
    Text,
}

impl DocumentKind {
    /// Map a file extension (with or without the dot, any case).
    pub fn from_extension(ext: &str) -> Result<Self> {
        let ext = ext.trim_start_matches('.').to_lowercase();
        match ext.as_str() {
            "csv" => Ok(Self::Csv),
            "pdf" => Ok(Self::Pdf),
            "jpg" | "jpeg" | "png" => Ok(Self::Image),
            "txt" => Ok(Self::Text),
            _ => Err(InvmatchError::UnsupportedFormat(ext)),
        }
    }

    /// Infer the kind from a path's extension.
    pub fn from_path(path: &Path) -> Result<Self> {
        let ext = path.extension().and_then(|e| e.to_str()).unwrap_or("");
        Self::from_extension(ext)
    }

    /// Segmentation mode the document kind usually calls for: free text for
    /// plain text and OCR output, tabular for CSV and PDF.
    pub fn natural_mode(self) -> SegmentMode {
        match self {
            Self::Text | Self::Image => SegmentMode::FreeText,
            Self::Csv | Self::Pdf => SegmentMode::Structured,
        }
    }
}

impl fmt::Display for DocumentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Csv => "csv",
            Self::Pdf => "pdf",
            Self::Image => "image",
            Self::Text => "text",
        };
        f.write_str(name)
    }
}

/// Converts documents into ordered text lines.
///
/// CSV, PDF and plain-text lines are never empty. Image lines are the raw
/// OCR lines and may be blank.
pub struct DocumentLoader {
    ocr_config: OcrConfig,
    ocr: Option<Box<dyn OcrBackend>>,
    whole_document_fallback: bool,
}

impl DocumentLoader {
    /// Create a loader with default OCR and PDF settings.
    pub fn new() -> Self {
        Self {
            ocr_config: OcrConfig::default(),
            ocr: None,
            whole_document_fallback: true,
        }
    }

    pub fn from_config(config: &InvmatchConfig) -> Self {
        Self {
            ocr_config: config.ocr.clone(),
            ocr: None,
            whole_document_fallback: config.pdf.whole_document_fallback,
        }
    }

    /// Use a specific OCR backend instead of the configured one.
    pub fn with_ocr_backend(mut self, backend: Box<dyn OcrBackend>) -> Self {
        self.ocr = Some(backend);
        self
    }

    /// Load the document's lines.
    pub fn load(&self, data: &[u8], kind: DocumentKind) -> Result<Vec<String>> {
        info!("Loading {} document ({} bytes)", kind, data.len());

        let lines = match kind {
            DocumentKind::Csv => csv_first_column(data)?,
            DocumentKind::Text => text_lines(data)?,
            DocumentKind::Pdf => PdfExtractor::new()
                .with_whole_document_fallback(self.whole_document_fallback)
                .extract_lines(data)?,
            DocumentKind::Image => self.image_lines(data)?,
        };

        debug!("Loaded {} lines from {} document", lines.len(), kind);
        Ok(lines)
    }

    /// Read a file and load it with the kind inferred from its extension.
    pub fn load_path(&self, path: &Path) -> Result<Vec<String>> {
        let kind = DocumentKind::from_path(path)?;
        let data = std::fs::read(path)?;
        self.load(&data, kind)
    }

    fn image_lines(&self, data: &[u8]) -> Result<Vec<String>> {
        let image = image::load_from_memory(data)?;

        let result = match &self.ocr {
            Some(backend) => backend.recognize(&image)?,
            None => backend_from_config(&self.ocr_config)?.recognize(&image)?,
        };

        Ok(split_lines(&result.text)
            .into_iter()
            .map(str::to_string)
            .collect())
    }
}

impl Default for DocumentLoader {
    fn default() -> Self {
        Self::new()
    }
}
