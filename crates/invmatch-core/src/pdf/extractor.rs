//! PDF text extraction using lopdf and pdf-extract.

use lopdf::Document;
use tracing::{debug, trace, warn};

use super::{PdfProcessor, Result};
use crate::document::split_lines;
use crate::error::PdfError;

/// PDF text extractor using lopdf for per-page text and pdf-extract for the
/// whole-document fallback.
pub struct PdfExtractor {
    document: Option<Document>,
    raw_data: Vec<u8>,
    whole_document_fallback: bool,
}

/// Extracted text of a PDF, page by page.
#[derive(Debug, Clone, Default)]
pub struct PdfContent {
    /// Pages that yielded text, in page order.
    pub pages: Vec<PdfPage>,
}

/// Text from a single PDF page.
#[derive(Debug, Clone)]
pub struct PdfPage {
    /// Page number (1-indexed).
    pub number: u32,
    /// Extracted text from this page.
    pub text: String,
}

impl PdfContent {
    /// Trimmed, non-empty lines of every page in order.
    pub fn lines(&self) -> Vec<String> {
        self.pages
            .iter()
            .flat_map(|page| split_lines(&page.text))
            .map(|line| line.trim().to_string())
            .filter(|line| !line.is_empty())
            .collect()
    }
}

impl PdfExtractor {
    /// Create a new PDF extractor.
    pub fn new() -> Self {
        Self {
            document: None,
            raw_data: Vec::new(),
            whole_document_fallback: true,
        }
    }

    /// Enable or disable the whole-document fallback used when no single
    /// page yields text.
    pub fn with_whole_document_fallback(mut self, enabled: bool) -> Self {
        self.whole_document_fallback = enabled;
        self
    }

    /// Extract text from every page. Pages without text are skipped.
    pub fn extract_all(&self) -> Result<PdfContent> {
        let page_count = self.page_count();
        if self.document.is_none() {
            return Err(PdfError::Parse("No document loaded".to_string()));
        }

        let whole_document = self
            .whole_document_fallback
            .then_some(|| self.extract_text());
        let pages = collect_pages(page_count, |n| self.extract_page_text(n), whole_document);

        debug!("PDF extraction: {} of {} pages with text", pages.len(), page_count);
        Ok(PdfContent { pages })
    }

    /// Load a PDF and return its trimmed, non-empty lines.
    pub fn extract_lines(&mut self, data: &[u8]) -> Result<Vec<String>> {
        self.load(data)?;
        Ok(self.extract_all()?.lines())
    }
}

/// Pages `1..=page_count` that yield text. When none does and a
/// whole-document extractor is given, its text becomes page 1.
fn collect_pages<F, W>(page_count: u32, mut page_text: F, whole_document: Option<W>) -> Vec<PdfPage>
where
    F: FnMut(u32) -> Result<String>,
    W: FnOnce() -> Result<String>,
{
    let mut pages = Vec::with_capacity(page_count as usize);
    for number in 1..=page_count {
        match page_text(number) {
            Ok(text) if !text.trim().is_empty() => {
                trace!("Page {} yielded {} chars", number, text.len());
                pages.push(PdfPage { number, text });
            }
            Ok(_) => debug!("Page {} has no extractable text, skipping", number),
            Err(e) => warn!("Skipping page {}: {}", number, e),
        }
    }

    if !pages.is_empty() {
        return pages;
    }
    if let Some(extract) = whole_document {
        debug!("No page yielded text, trying whole-document extraction");
        match extract() {
            Ok(text) if !text.trim().is_empty() => pages.push(PdfPage { number: 1, text }),
            Ok(_) => debug!("Whole-document extraction yielded no text"),
            Err(e) => warn!("Whole-document extraction failed: {}", e),
        }
    }
    pages
}

impl Default for PdfExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl PdfProcessor for PdfExtractor {
    fn load(&mut self, data: &[u8]) -> Result<()> {
        let mut doc = Document::load_mem(data).map_err(|e| PdfError::Parse(e.to_string()))?;

        // Handle PDFs with empty password encryption
        if doc.is_encrypted() {
            if doc.decrypt("").is_err() {
                return Err(PdfError::Encrypted);
            }
            debug!("Decrypted PDF with empty password");

            // pdf-extract needs the decrypted bytes
            let mut decrypted_data = Vec::new();
            doc.save_to(&mut decrypted_data)
                .map_err(|e| PdfError::Parse(format!("Failed to save decrypted PDF: {}", e)))?;
            self.raw_data = decrypted_data;
        } else {
            self.raw_data = data.to_vec();
        }

        let page_count = doc.get_pages().len();
        if page_count == 0 {
            return Err(PdfError::NoPages);
        }

        debug!("Loaded PDF with {} pages", page_count);
        self.document = Some(doc);
        Ok(())
    }

    fn page_count(&self) -> u32 {
        self.document
            .as_ref()
            .map(|doc| doc.get_pages().len() as u32)
            .unwrap_or(0)
    }

    fn extract_text(&self) -> Result<String> {
        pdf_extract::extract_text_from_mem(&self.raw_data)
            .map_err(|e| PdfError::TextExtraction(e.to_string()))
    }

    fn extract_page_text(&self, page: u32) -> Result<String> {
        let doc = self
            .document
            .as_ref()
            .ok_or(PdfError::Parse("No document loaded".to_string()))?;

        doc.extract_text(&[page])
            .map_err(|e| PdfError::TextExtraction(format!("page {}: {}", page, e)))
    }
}
