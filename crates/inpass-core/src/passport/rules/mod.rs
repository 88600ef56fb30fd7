//! Rule-based field extractors for Indian passports.

pub mod dates;
pub mod labels;
pub mod numbers;
pub mod patterns;

pub use dates::{extract_dates, find_date_in_window, DateExtractor};
pub use labels::Label;
pub use numbers::{extract_file_number, extract_passport_number, FileNumberExtractor, PassportNumberExtractor};
pub use patterns::*;

/// Trait for field extractors.
pub trait FieldExtractor {
    /// The type of value this extractor produces.
    type Output;

    /// Extract the field from text.
    fn extract(&self, text: &str) -> Option<Self::Output>;

    /// Extract all occurrences of the field.
    fn extract_all(&self, text: &str) -> Vec<Self::Output>;
}

/// A matched value and where it was found.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractionMatch<T> {
    /// Extracted value.
    pub value: T,
    /// Byte span in the source text.
    pub position: Option<(usize, usize)>,
}

impl<T> ExtractionMatch<T> {
    pub fn new(value: T) -> Self {
        Self {
            value,
            position: None,
        }
    }

    pub fn with_position(mut self, start: usize, end: usize) -> Self {
        self.position = Some((start, end));
        self
    }
}

impl ExtractionMatch<String> {
    pub(crate) fn from_regex(m: regex::Match<'_>) -> Self {
        Self::new(m.as_str().to_string()).with_position(m.start(), m.end())
    }
}
