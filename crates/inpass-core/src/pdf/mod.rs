//! Scanned passport PDFs.
//!
//! A passport PDF is normally one image per page. Pages are turned into
//! images here and handed to the OCR engine in page order; PDFs that carry
//! a text layer instead can fall back to it.

mod extractor;

pub use extractor::PdfExtractor;

use image::DynamicImage;

use crate::error::PdfError;

/// What a loaded PDF carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PdfType {
    /// Text layer, no images.
    Text,
    /// Images only (a scan).
    Image,
    /// Text layer and images.
    Hybrid,
    /// Neither.
    Empty,
}

impl PdfType {
    /// Whether embedded text can be read from the document.
    pub fn has_text(&self) -> bool {
        matches!(self, PdfType::Text | PdfType::Hybrid)
    }
}

pub type Result<T> = std::result::Result<T, PdfError>;

/// PDF backends used by the upload pipeline.
pub trait PdfProcessor {
    /// Parse PDF bytes, decrypting empty-password documents.
    fn load(&mut self, data: &[u8]) -> Result<()>;

    /// Pages in the loaded document, 0 before `load`.
    fn page_count(&self) -> u32;

    fn analyze(&self) -> PdfType;

    /// Text layer of the whole document.
    fn extract_text(&self) -> Result<String>;

    /// Images drawn on one page (1-indexed).
    fn extract_images(&self, page: u32) -> Result<Vec<DynamicImage>>;

    /// Images of the first `max_pages` pages in page order (0 = all pages).
    fn page_images(&self, max_pages: usize) -> Result<Vec<DynamicImage>>;
}
