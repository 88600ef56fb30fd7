//! Passport field extraction module.

mod parser;
pub mod rules;

pub use parser::{ExtractionResult, PassportParser};

use crate::models::passport::PassportRecord;
use crate::ocr::OcrResult;

/// Trait for passport field extractors.
///
/// Extraction is total: a field that cannot be found is left unset.
pub trait PassportExtractor {
    /// Extract passport data from an OCR result.
    fn extract(&self, ocr_result: &OcrResult) -> PassportRecord;

    /// Extract passport data from recognized text lines.
    fn extract_lines(&self, lines: &[String]) -> PassportRecord;
}

/// Extract a passport record from OCR lines with the default parser.
pub fn extract<S: AsRef<str>>(lines: &[S]) -> PassportRecord {
    PassportParser::new().extract_record(lines)
}
