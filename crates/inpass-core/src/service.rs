//! Upload boundary: validates an uploaded passport scan, runs OCR on it and
//! wraps the extracted record in a response envelope.
//!
//! The layer is transport-agnostic. A caller (CLI, web handler, queue worker)
//! builds an [`Upload`], calls [`ExtractionService::extract`], and maps a
//! [`ServiceError`] onto its own status reporting with
//! [`ServiceError::status_code`] and [`ServiceError::detail`].

use std::path::Path;

use chrono::Local;
use image::DynamicImage;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::error::{InpassError, ServiceError};
use crate::models::config::InpassConfig;
use crate::models::passport::PassportRecord;
use crate::ocr::{OcrEngine, OcrResult};
use crate::passport::PassportParser;
use crate::pdf::{PdfExtractor, PdfProcessor};

const PDF_CONTENT_TYPE: &str = "application/pdf";

/// An uploaded file.
#[derive(Debug, Clone)]
pub struct Upload {
    /// Original filename as sent by the client.
    pub filename: String,
    /// Declared MIME type.
    pub content_type: String,
    /// File contents.
    pub data: Vec<u8>,
}

impl Upload {
    pub fn new(filename: impl Into<String>, content_type: impl Into<String>, data: Vec<u8>) -> Self {
        Self {
            filename: filename.into(),
            content_type: content_type.into(),
            data,
        }
    }

    /// Read a file from disk, guessing the content type from its extension.
    pub fn from_path(path: &Path) -> std::io::Result<Self> {
        let data = std::fs::read(path)?;
        let filename = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();

        Ok(Self::new(filename, content_type_for_path(path), data))
    }

    fn is_pdf(&self) -> bool {
        self.content_type.eq_ignore_ascii_case(PDF_CONTENT_TYPE)
    }
}

/// MIME type for a file extension; unknown extensions map to
/// `application/octet-stream`.
pub fn content_type_for_path(path: &Path) -> &'static str {
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_lowercase();

    match extension.as_str() {
        "jpg" | "jpeg" => "image/jpeg",
        "png" => "image/png",
        "pdf" => PDF_CONTENT_TYPE,
        "webp" => "image/webp",
        "tif" | "tiff" => "image/tiff",
        "bmp" => "image/bmp",
        _ => "application/octet-stream",
    }
}

/// Successful extraction envelope.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExtractResponse {
    pub success: bool,
    pub filename: String,
    pub data: PassportRecord,
    /// Local time the response was built, ISO 8601 without offset.
    pub timestamp: String,
}

/// Failure envelope.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub detail: String,
}

impl From<&ServiceError> for ErrorResponse {
    fn from(err: &ServiceError) -> Self {
        Self {
            detail: err.detail(),
        }
    }
}

/// Liveness and warm-up status.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusResponse {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    pub status: String,
}

impl StatusResponse {
    fn new(status: &str) -> Self {
        Self {
            message: None,
            status: status.to_string(),
        }
    }
}

/// Passport extraction service owning its OCR engine.
pub struct ExtractionService<E: OcrEngine> {
    engine: E,
    parser: PassportParser,
    config: InpassConfig,
}

impl<E: OcrEngine> ExtractionService<E> {
    /// Create a service around an already loaded engine.
    pub fn new(engine: E, config: InpassConfig) -> Self {
        Self {
            engine,
            parser: PassportParser::from_config(&config.extraction),
            config,
        }
    }

    /// The engine this service runs.
    pub fn engine(&self) -> &E {
        &self.engine
    }

    /// Service banner.
    pub fn status(&self) -> StatusResponse {
        StatusResponse {
            message: Some("Indian Passport OCR API".to_string()),
            status: "running".to_string(),
        }
    }

    /// Health check.
    pub fn health(&self) -> StatusResponse {
        StatusResponse::new("healthy")
    }

    /// Load the engine's models with a throwaway recognition.
    pub fn warm_up(&self) -> Result<StatusResponse, ServiceError> {
        self.engine
            .warm_up()
            .map_err(|e| ServiceError::WarmUp(e.to_string()))?;
        info!("{} warm-up complete", self.engine.name());
        Ok(StatusResponse::new("warmed"))
    }

    /// Validate the upload, recognize it and extract passport fields.
    pub fn extract(&self, upload: &Upload) -> Result<ExtractResponse, ServiceError> {
        self.check_upload(upload)?;

        info!(
            "Extracting passport from {} ({}, {} bytes)",
            upload.filename,
            upload.content_type,
            upload.data.len()
        );

        let lines = self.recognize(upload).map_err(|e| {
            warn!("Extraction failed for {}: {}", upload.filename, e);
            ServiceError::from(e)
        })?;
        debug!("Recognized {} text lines", lines.len());

        let data = self.parser.extract_record(&lines);

        Ok(ExtractResponse {
            success: true,
            filename: upload.filename.clone(),
            data,
            timestamp: Local::now().format("%Y-%m-%dT%H:%M:%S%.6f").to_string(),
        })
    }

    fn check_upload(&self, upload: &Upload) -> Result<(), ServiceError> {
        if upload.filename.is_empty() {
            return Err(ServiceError::NoFile);
        }

        let allowed = self
            .config
            .upload
            .allowed_content_types
            .iter()
            .any(|t| t.eq_ignore_ascii_case(&upload.content_type));
        if !allowed {
            return Err(ServiceError::InvalidFileType(upload.content_type.clone()));
        }

        let max = self.config.upload.max_upload_bytes;
        let size = upload.data.len() as u64;
        if max > 0 && size > max {
            return Err(ServiceError::FileTooLarge { size, max });
        }

        Ok(())
    }

    /// Recognized text lines of an upload, pages in order.
    pub fn recognize(&self, upload: &Upload) -> Result<Vec<String>, InpassError> {
        if upload.is_pdf() {
            self.recognize_pdf(&upload.data)
        } else {
            self.recognize_image(&upload.data).map(|r| r.lines())
        }
    }

    fn recognize_image(&self, data: &[u8]) -> Result<OcrResult, InpassError> {
        if !self.config.ocr.grayscale_images {
            return Ok(self.engine.recognize_bytes(data)?);
        }
        let image = image::load_from_memory(data)?;
        Ok(self.engine.recognize(&DynamicImage::ImageLuma8(image.to_luma8()))?)
    }

    fn recognize_pdf(&self, data: &[u8]) -> Result<Vec<String>, InpassError> {
        let mut extractor = PdfExtractor::new();
        extractor.load(data)?;

        let images = extractor.page_images(self.config.pdf.max_pages)?;
        debug!(
            "PDF has {} pages, {} page images",
            extractor.page_count(),
            images.len()
        );

        if images.is_empty() {
            let pdf_type = extractor.analyze();
            if !self.config.pdf.embedded_text_fallback || !pdf_type.has_text() {
                warn!("PDF has no decodable page images ({:?})", pdf_type);
                return Ok(Vec::new());
            }
            warn!("PDF has no decodable page images, using embedded text");
            let text = extractor.extract_text()?;
            return Ok(text
                .lines()
                .map(str::trim)
                .filter(|l| !l.is_empty())
                .map(String::from)
                .collect());
        }

        let mut combined = OcrResult::default();
        for image in &images {
            combined.merge(self.engine.recognize(image)?);
        }
        Ok(combined.lines())
    }
}
