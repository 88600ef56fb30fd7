//! Passport number and file number extraction.

use super::patterns::{FILE_NUMBER, PASSPORT_NUMBER};
use super::{ExtractionMatch, FieldExtractor};

/// Passport number extractor (`K1234567`).
///
/// Matches anywhere in the text, so a longer alphanumeric run such as a file
/// number can also yield a passport number candidate.
pub struct PassportNumberExtractor;

impl PassportNumberExtractor {
    pub fn new() -> Self {
        Self
    }
}

impl Default for PassportNumberExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl FieldExtractor for PassportNumberExtractor {
    type Output = ExtractionMatch<String>;

    fn extract(&self, text: &str) -> Option<Self::Output> {
        PASSPORT_NUMBER.find(text).map(ExtractionMatch::from_regex)
    }

    fn extract_all(&self, text: &str) -> Vec<Self::Output> {
        PASSPORT_NUMBER
            .find_iter(text)
            .map(ExtractionMatch::from_regex)
            .collect()
    }
}

/// File number extractor (`BP1067123456789`). Case-sensitive.
pub struct FileNumberExtractor;

impl FileNumberExtractor {
    pub fn new() -> Self {
        Self
    }
}

impl Default for FileNumberExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl FieldExtractor for FileNumberExtractor {
    type Output = ExtractionMatch<String>;

    fn extract(&self, text: &str) -> Option<Self::Output> {
        FILE_NUMBER.find(text).map(ExtractionMatch::from_regex)
    }

    fn extract_all(&self, text: &str) -> Vec<Self::Output> {
        FILE_NUMBER
            .find_iter(text)
            .map(ExtractionMatch::from_regex)
            .collect()
    }
}

/// Extract the first passport number from text.
pub fn extract_passport_number(text: &str) -> Option<String> {
    PassportNumberExtractor::new().extract(text).map(|m| m.value)
}

/// Extract the first file number from text.
pub fn extract_file_number(text: &str) -> Option<String> {
    FileNumberExtractor::new().extract(text).map(|m| m.value)
}
