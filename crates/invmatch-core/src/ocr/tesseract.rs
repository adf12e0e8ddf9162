//! OCR through an external `tesseract` executable.

use std::process::Command;
use std::time::Instant;

use image::{DynamicImage, GenericImageView, ImageFormat};
use tracing::{debug, info};

use crate::error::OcrError;
use crate::models::config::OcrConfig;

use super::{OcrBackend, OcrResult};

/// Runs `tesseract <image> stdout -l <language>` on a temporary PNG.
pub struct TesseractCli {
    command: String,
    language: String,
    psm: Option<u8>,
}

impl TesseractCli {
    /// Create a backend using `tesseract` from `PATH` and the given languages.
    pub fn new(language: impl Into<String>) -> Self {
        Self {
            command: "tesseract".to_string(),
            language: language.into(),
            psm: None,
        }
    }

    pub fn from_config(config: &OcrConfig) -> Self {
        Self {
            command: config.tesseract_cmd.clone(),
            language: config.language.clone(),
            psm: config.psm,
        }
    }

    /// Use a specific executable.
    pub fn with_command(mut self, command: impl Into<String>) -> Self {
        self.command = command.into();
        self
    }

    /// Set the page segmentation mode.
    pub fn with_psm(mut self, psm: u8) -> Self {
        self.psm = Some(psm);
        self
    }

    pub fn language(&self) -> &str {
        &self.language
    }

    fn build_command(&self, input: &std::path::Path) -> Command {
        let mut cmd = Command::new(&self.command);
        cmd.arg(input).arg("stdout").arg("-l").arg(&self.language);
        if let Some(psm) = self.psm {
            cmd.arg("--psm").arg(psm.to_string());
        }
        cmd
    }
}

impl OcrBackend for TesseractCli {
    fn name(&self) -> &str {
        "tesseract"
    }

    fn recognize(&self, image: &DynamicImage) -> Result<OcrResult, OcrError> {
        let start = Instant::now();
        let (width, height) = image.dimensions();
        if width == 0 || height == 0 {
            return Err(OcrError::InvalidImage(format!("{}x{}", width, height)));
        }

        let temp_dir = tempfile::tempdir()
            .map_err(|e| OcrError::Engine(format!("failed to create temp dir: {}", e)))?;
        let input_path = temp_dir.path().join("page.png");
        image
            .save_with_format(&input_path, ImageFormat::Png)
            .map_err(|e| OcrError::InvalidImage(e.to_string()))?;

        debug!(
            "Running {} -l {} on {}x{} image",
            self.command, self.language, width, height
        );

        let output = self
            .build_command(&input_path)
            .output()
            .map_err(|e| OcrError::Engine(format!("failed to run {}: {}", self.command, e)))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(OcrError::Recognition(format!(
                "{} exited with {}: {}",
                self.command,
                output.status,
                stderr.trim()
            )));
        }

        let text = String::from_utf8_lossy(&output.stdout).into_owned();
        let processing_time_ms = start.elapsed().as_millis() as u64;

        info!(
            "OCR complete: {} chars in {}ms",
            text.chars().count(),
            processing_time_ms
        );

        Ok(OcrResult {
            boxes: Vec::new(),
            text,
            processing_time_ms,
            image_size: (width, height),
        })
    }
}
