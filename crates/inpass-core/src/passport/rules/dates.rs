//! `DD/MM/YYYY` date extraction.
//!
//! Dates are kept as the matched text. Passports are read as-is, so no
//! calendar validation is done (`99/99/9999` is a date here).

use super::patterns::DATE;
use super::{ExtractionMatch, FieldExtractor};

/// Date field extractor.
pub struct DateExtractor;

impl DateExtractor {
    pub fn new() -> Self {
        Self
    }
}

impl Default for DateExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl FieldExtractor for DateExtractor {
    type Output = ExtractionMatch<String>;

    fn extract(&self, text: &str) -> Option<Self::Output> {
        DATE.find(text).map(ExtractionMatch::from_regex)
    }

    fn extract_all(&self, text: &str) -> Vec<Self::Output> {
        DATE.find_iter(text).map(ExtractionMatch::from_regex).collect()
    }
}

/// All dates in `text`, in order of appearance.
pub fn extract_dates(text: &str) -> Vec<String> {
    DateExtractor::new()
        .extract_all(text)
        .into_iter()
        .map(|m| m.value)
        .collect()
}

/// First date on `lines[start]` or on one of the `window` lines after it.
pub fn find_date_in_window<S: AsRef<str>>(lines: &[S], start: usize, window: usize) -> Option<String> {
    let extractor = DateExtractor::new();
    lines
        .iter()
        .skip(start)
        .take(window + 1)
        .find_map(|line| extractor.extract(line.as_ref()))
        .map(|m| m.value)
}
