//! Error types for the inpass-core library.

use thiserror::Error;

/// Main error type for the inpass library.
#[derive(Error, Debug)]
pub enum InpassError {
    /// PDF processing error.
    #[error("PDF error: {0}")]
    Pdf(#[from] PdfError),

    /// OCR processing error.
    #[error("OCR error: {0}")]
    Ocr(#[from] OcrError),

    /// Image decoding error.
    #[error("image error: {0}")]
    Image(#[from] image::ImageError),
}

/// Errors related to PDF processing.
#[derive(Error, Debug)]
pub enum PdfError {
    /// Failed to open/parse the PDF file.
    #[error("failed to parse PDF: {0}")]
    Parse(String),

    /// Failed to extract embedded text.
    #[error("failed to extract text: {0}")]
    TextExtraction(String),

    /// The PDF is encrypted with a non-empty password.
    #[error("PDF is encrypted")]
    Encrypted,

    /// The PDF has no pages.
    #[error("PDF has no pages")]
    NoPages,

    /// Invalid page number requested.
    #[error("invalid page number: {0}")]
    InvalidPage(u32),
}

/// Errors raised by an OCR engine.
#[derive(Error, Debug)]
pub enum OcrError {
    /// Failed to load OCR models.
    #[error("failed to load model: {0}")]
    ModelLoad(String),

    /// Text recognition failed.
    #[error("text recognition failed: {0}")]
    Recognition(String),

    /// Input bytes could not be decoded into an image.
    #[error("invalid image: {0}")]
    InvalidImage(String),
}

/// Errors reported by the upload boundary layer.
///
/// Only the request-shape checks get their own variant. Everything that goes
/// wrong after the upload is accepted collapses into [`ServiceError::Processing`].
#[derive(Error, Debug)]
pub enum ServiceError {
    /// The upload carries no filename.
    #[error("No file")]
    NoFile,

    /// The declared content type is not accepted.
    #[error("Invalid file type")]
    InvalidFileType(String),

    /// The upload exceeds the configured size limit.
    #[error("File too large: {size} bytes (max {max})")]
    FileTooLarge { size: u64, max: u64 },

    /// Decoding, PDF or OCR failure.
    #[error("Error: {0}")]
    Processing(String),

    /// The engine failed its warm-up run.
    #[error("Warm-up error: {0}")]
    WarmUp(String),
}

impl ServiceError {
    /// HTTP-style status code for this error.
    pub fn status_code(&self) -> u16 {
        match self {
            ServiceError::NoFile
            | ServiceError::InvalidFileType(_)
            | ServiceError::FileTooLarge { .. } => 400,
            ServiceError::Processing(_) | ServiceError::WarmUp(_) => 500,
        }
    }

    /// Message reported to the caller.
    pub fn detail(&self) -> String {
        self.to_string()
    }
}

impl From<InpassError> for ServiceError {
    fn from(err: InpassError) -> Self {
        ServiceError::Processing(err.to_string())
    }
}

impl From<OcrError> for ServiceError {
    fn from(err: OcrError) -> Self {
        ServiceError::Processing(err.to_string())
    }
}

impl From<PdfError> for ServiceError {
    fn from(err: PdfError) -> Self {
        ServiceError::Processing(err.to_string())
    }
}

impl From<image::ImageError> for ServiceError {
    fn from(err: image::ImageError) -> Self {
        ServiceError::Processing(err.to_string())
    }
}

/// Result type for the inpass library.
pub type Result<T> = std::result::Result<T, InpassError>;
