//! OCR backends for image documents.

#[cfg(feature = "onnx")]
mod pure_engine;
mod tesseract;

#[cfg(feature = "onnx")]
pub use pure_engine::PureOcrEngine;
pub use tesseract::TesseractCli;

use image::DynamicImage;
use serde::{Deserialize, Serialize};

use crate::error::OcrError;
use crate::models::config::{OcrBackendKind, OcrConfig};

/// A recognized text region with its coordinates and content.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TextBox {
    /// Bounding box coordinates (x1, y1, x2, y2, x3, y3, x4, y4) for quadrilateral.
    pub bbox: [f32; 8],

    /// Recognized text content.
    pub text: String,

    /// Recognition confidence score (0.0 - 1.0).
    pub confidence: f32,
}

impl TextBox {
    /// Get the axis-aligned bounding rectangle.
    pub fn rect(&self) -> (f32, f32, f32, f32) {
        let xs = [self.bbox[0], self.bbox[2], self.bbox[4], self.bbox[6]];
        let ys = [self.bbox[1], self.bbox[3], self.bbox[5], self.bbox[7]];

        let min_x = xs.iter().cloned().fold(f32::INFINITY, f32::min);
        let max_x = xs.iter().cloned().fold(f32::NEG_INFINITY, f32::max);
        let min_y = ys.iter().cloned().fold(f32::INFINITY, f32::min);
        let max_y = ys.iter().cloned().fold(f32::NEG_INFINITY, f32::max);

        (min_x, min_y, max_x, max_y)
    }
}

/// Result of OCR processing on an image.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OcrResult {
    /// Recognized regions, empty when the engine only reports plain text.
    pub boxes: Vec<TextBox>,

    /// Full recognized text.
    pub text: String,

    /// Processing time in milliseconds.
    pub processing_time_ms: u64,

    /// Image dimensions (width, height).
    pub image_size: (u32, u32),
}

impl OcrResult {
    /// Sort boxes by reading order (top-to-bottom, left-to-right) and
    /// rebuild the text with one box per line.
    pub fn sort_by_reading_order(&mut self) {
        self.boxes.sort_by(|a, b| {
            let (ax, ay, _, _) = a.rect();
            let (bx, by, _, _) = b.rect();

            // Group by approximate vertical position (within 20 pixels)
            let row_a = (ay / 20.0) as i32;
            let row_b = (by / 20.0) as i32;

            if row_a != row_b {
                row_a.cmp(&row_b)
            } else {
                ax.partial_cmp(&bx).unwrap_or(std::cmp::Ordering::Equal)
            }
        });

        self.text = self
            .boxes
            .iter()
            .map(|b| b.text.as_str())
            .collect::<Vec<_>>()
            .join("\n");
    }
}

/// An engine turning an image into text.
pub trait OcrBackend {
    /// Short engine name for logs.
    fn name(&self) -> &str;

    /// Recognize all text in the image.
    fn recognize(&self, image: &DynamicImage) -> Result<OcrResult, OcrError>;
}

/// Build the backend selected in the configuration.
pub fn backend_from_config(config: &OcrConfig) -> Result<Box<dyn OcrBackend>, OcrError> {
    match config.backend {
        OcrBackendKind::Tesseract => Ok(Box::new(TesseractCli::from_config(config))),
        #[cfg(feature = "onnx")]
        OcrBackendKind::Onnx => Ok(Box::new(PureOcrEngine::from_config(config)?)),
        #[cfg(not(feature = "onnx"))]
        OcrBackendKind::Onnx => Err(OcrError::ModelLoad(
            "ONNX backend requires the `onnx` feature".to_string(),
        )),
    }
}
