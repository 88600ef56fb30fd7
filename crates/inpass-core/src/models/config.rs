//! Configuration structures for the passport OCR pipeline.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Main configuration for the inpass pipeline.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct InpassConfig {
    /// OCR configuration.
    pub ocr: OcrConfig,

    /// Model file locations.
    pub models: ModelConfig,

    /// PDF processing configuration.
    pub pdf: PdfConfig,

    /// Field extraction tunables.
    pub extraction: ExtractionConfig,

    /// Upload acceptance rules.
    pub upload: UploadConfig,
}

/// OCR engine configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OcrConfig {
    /// Keep `[UNK]` tokens emitted by the recognizer instead of blanking them.
    pub keep_unk: bool,

    /// Convert uploaded images to grayscale before recognition.
    pub grayscale_images: bool,

    /// Height in pixels of a reading-order row band.
    pub row_height: f32,
}

impl Default for OcrConfig {
    fn default() -> Self {
        Self {
            keep_unk: false,
            grayscale_images: true,
            row_height: 20.0,
        }
    }
}

/// Model file paths.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ModelConfig {
    /// Directory containing model files.
    pub model_dir: PathBuf,

    /// Text detection model file name.
    pub detection_model: String,

    /// Text recognition model file name.
    pub recognition_model: String,

    /// Character dictionary file name.
    pub dictionary: String,
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            model_dir: PathBuf::from("models"),
            detection_model: "det.onnx".to_string(),
            recognition_model: "latin_rec.onnx".to_string(),
            dictionary: "latin_dict.txt".to_string(),
        }
    }
}

/// PDF processing configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PdfConfig {
    /// Maximum pages to process (0 = unlimited).
    pub max_pages: usize,

    /// Use embedded text lines when a PDF has no decodable page images.
    pub embedded_text_fallback: bool,
}

impl Default for PdfConfig {
    fn default() -> Self {
        Self {
            max_pages: 0,
            embedded_text_fallback: true,
        }
    }
}

/// Field extraction tunables.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractionConfig {
    /// Lines after a date label searched for a date.
    pub date_window: usize,

    /// Lines after an address label inspected for address parts.
    pub address_line_limit: usize,
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        Self {
            date_window: 2,
            address_line_limit: 4,
        }
    }
}

/// Upload acceptance rules.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct UploadConfig {
    /// Accepted MIME types.
    pub allowed_content_types: Vec<String>,

    /// Maximum upload size in bytes (0 = unlimited).
    pub max_upload_bytes: u64,
}

impl Default for UploadConfig {
    fn default() -> Self {
        Self {
            allowed_content_types: vec![
                "image/jpeg".to_string(),
                "image/jpg".to_string(),
                "image/png".to_string(),
                "application/pdf".to_string(),
            ],
            max_upload_bytes: 0,
        }
    }
}

impl InpassConfig {
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
}
