//! Configuration structures for the reconciliation pipeline.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::error::InvmatchError;
use crate::invoice::SegmentMode;

/// Main configuration for the invmatch pipeline.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct InvmatchConfig {
    /// Catalog matching configuration.
    pub matching: MatchingConfig,

    /// Order summary pass-through values.
    pub summary: SummaryConfig,

    /// Goods CSV column names.
    pub catalog: CatalogConfig,

    /// OCR configuration for image documents.
    pub ocr: OcrConfig,

    /// PDF processing configuration.
    pub pdf: PdfConfig,
}

/// Catalog matching configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct MatchingConfig {
    /// Minimum token-sort score (0-100) a line needs to be kept.
    /// `None` disables the threshold.
    pub min_score: Option<u8>,

    /// How lines are split into header and item sections. Unset means the
    /// document kind decides (free text for text and images).
    pub mode: Option<SegmentMode>,
}

/// Values copied verbatim into every order summary.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SummaryConfig {
    /// Tax amount.
    pub tax: i64,

    /// Order status label.
    pub status: String,
}

impl Default for SummaryConfig {
    fn default() -> Self {
        Self {
            tax: 0,
            status: crate::models::order::DEFAULT_STATUS.to_string(),
        }
    }
}

/// Column names of the goods CSV.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CatalogConfig {
    /// Product code column.
    pub id_column: String,

    /// Product display name column.
    pub name_column: String,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            id_column: "品號".to_string(),
            name_column: "品名".to_string(),
        }
    }
}

/// Which OCR engine reads image documents.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OcrBackendKind {
    /// External `tesseract` binary.
    #[default]
    Tesseract,
    /// Pure Rust ONNX engine (requires the `onnx` feature).
    Onnx,
}

/// OCR engine configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OcrConfig {
    /// Engine used for image documents.
    pub backend: OcrBackendKind,

    /// Recognition languages, in tesseract `-l` syntax.
    pub language: String,

    /// Path or name of the tesseract executable.
    pub tesseract_cmd: String,

    /// Tesseract page segmentation mode (`--psm`), engine default when unset.
    pub psm: Option<u8>,

    /// Directory with `det.onnx`, the recognition model and its dictionary.
    pub model_dir: PathBuf,

    /// Recognition model file name inside `model_dir`.
    pub recognition_model: String,

    /// Dictionary file name inside `model_dir`.
    pub dictionary: String,

    /// Keep `[UNK]` markers emitted by the ONNX recognizer.
    pub keep_unk: bool,
}

impl Default for OcrConfig {
    fn default() -> Self {
        Self {
            backend: OcrBackendKind::Tesseract,
            language: "chi_tra+eng".to_string(),
            tesseract_cmd: "tesseract".to_string(),
            psm: None,
            model_dir: PathBuf::from("models"),
            recognition_model: "chinese_cht_rec.onnx".to_string(),
            dictionary: "chinese_cht_dict.txt".to_string(),
            keep_unk: false,
        }
    }
}

/// PDF processing configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PdfConfig {
    /// Fall back to whole-document extraction when no page yields text.
    pub whole_document_fallback: bool,
}

impl Default for PdfConfig {
    fn default() -> Self {
        Self {
            whole_document_fallback: true,
        }
    }
}

impl InvmatchConfig {
    /// Load configuration from a JSON file.
    pub fn from_file(path: &std::path::Path) -> Result<Self, std::io::Error> {
        let content = std::fs::read_to_string(path)?;
        serde_json::from_str(&content).map_err(|e| {
            std::io::Error::new(std::io::ErrorKind::InvalidData, e.to_string())
        })
    }

    /// Save configuration to a JSON file.
    pub fn save(&self, path: &std::path::Path) -> Result<(), std::io::Error> {
        let content = serde_json::to_string_pretty(self).map_err(|e| {
            std::io::Error::new(std::io::ErrorKind::InvalidData, e.to_string())
        })?;
        std::fs::write(path, content)
    }

    /// Reject values the pipeline cannot use.
    pub fn validate(&self) -> Result<(), InvmatchError> {
        if let Some(min_score) = self.matching.min_score.filter(|score| *score > 100) {
            return Err(InvmatchError::Config(format!(
                "matching.min_score must be at most 100, got {}",
                min_score
            )));
        }
        if self.catalog.id_column.is_empty() || self.catalog.name_column.is_empty() {
            return Err(InvmatchError::Config(
                "catalog column names must not be empty".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = InvmatchConfig::default();
        assert_eq!(config.matching.min_score, None);
        assert_eq!(config.matching.mode, None);
        assert_eq!(config.summary.status, "處理中");
        assert_eq!(config.catalog.name_column, "品名");
        assert_eq!(config.ocr.language, "chi_tra+eng");
    }

    #[test]
    fn test_partial_json_fills_defaults() {
        let config: InvmatchConfig =
            serde_json::from_str(r#"{"matching": {"min_score": 80}}"#).unwrap();
        assert_eq!(config.matching.min_score, Some(80));
        assert_eq!(config.summary.tax, 0);
        assert_eq!(config.ocr.backend, OcrBackendKind::Tesseract);
        assert_eq!(config.matching.mode, None);

        let config: InvmatchConfig =
            serde_json::from_str(r#"{"matching": {"mode": "free_text"}}"#).unwrap();
        assert_eq!(config.matching.mode, Some(SegmentMode::FreeText));
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");

        let mut config = InvmatchConfig::default();
        config.summary.status = "done".to_string();
        config.matching.mode = Some(SegmentMode::FreeText);
        config.save(&path).unwrap();

        let loaded = InvmatchConfig::from_file(&path).unwrap();
        assert_eq!(loaded.summary.status, "done");
        assert_eq!(loaded.matching.mode, Some(SegmentMode::FreeText));
    }

    #[test]
    fn test_validate() {
        assert!(InvmatchConfig::default().validate().is_ok());

        let mut config = InvmatchConfig::default();
        config.matching.min_score = Some(101);
        assert!(matches!(config.validate(), Err(InvmatchError::Config(_))));

        let mut config = InvmatchConfig::default();
        config.catalog.name_column.clear();
        assert!(config.validate().is_err());
    }
}
