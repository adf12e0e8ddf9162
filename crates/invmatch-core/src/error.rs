//! Error types for the invmatch-core library.

use thiserror::Error;

/// Main error type for the invmatch library.
#[derive(Error, Debug)]
pub enum InvmatchError {
    /// The document kind is not one of csv, pdf, image or text.
    #[error("unsupported file format: {0}")]
    UnsupportedFormat(String),

    /// PDF processing error.
    #[error("PDF error: {0}")]
    Pdf(#[from] PdfError),

    /// OCR processing error.
    #[error("OCR error: {0}")]
    Ocr(#[from] OcrError),

    /// Line extraction error for CSV and plain-text documents.
    #[error("extraction error: {0}")]
    Extraction(#[from] ExtractionError),

    /// Product catalog could not be loaded.
    #[error("catalog error: {0}")]
    Catalog(#[from] CatalogError),

    /// Image decoding error.
    #[error("image error: {0}")]
    Image(#[from] image::ImageError),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),
}

/// Errors related to PDF processing.
#[derive(Error, Debug)]
pub enum PdfError {
    /// Failed to open/parse the PDF file.
    #[error("failed to parse PDF: {0}")]
    Parse(String),

    /// Failed to extract text from PDF.
    #[error("failed to extract text: {0}")]
    TextExtraction(String),

    /// The PDF is encrypted and cannot be processed.
    #[error("PDF is encrypted")]
    Encrypted,

    /// The PDF is empty or has no pages.
    #[error("PDF has no pages")]
    NoPages,
}

/// Errors related to OCR processing.
#[derive(Error, Debug)]
pub enum OcrError {
    /// Failed to load OCR models.
    #[error("failed to load model: {0}")]
    ModelLoad(String),

    /// The OCR engine could not be started or exited abnormally.
    #[error("OCR engine failed: {0}")]
    Engine(String),

    /// Text recognition failed.
    #[error("text recognition failed: {0}")]
    Recognition(String),

    /// Invalid image format or dimensions.
    #[error("invalid image: {0}")]
    InvalidImage(String),
}

/// Errors raised while turning CSV or text documents into lines.
#[derive(Error, Debug)]
pub enum ExtractionError {
    /// Malformed CSV input.
    #[error("failed to read CSV row: {0}")]
    Csv(#[from] csv::Error),

    /// The document is not valid UTF-8.
    #[error("document is not valid UTF-8: {0}")]
    Encoding(#[from] std::string::FromUtf8Error),
}

/// Errors related to loading the product catalog.
#[derive(Error, Debug)]
pub enum CatalogError {
    /// Malformed catalog CSV.
    #[error("failed to read catalog CSV: {0}")]
    Csv(#[from] csv::Error),

    /// A required column is absent from the header row.
    #[error("catalog is missing column {0:?}")]
    MissingColumn(String),

    /// The catalog file could not be opened.
    #[error("failed to open catalog: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for the invmatch library.
pub type Result<T> = std::result::Result<T, InvmatchError>;
