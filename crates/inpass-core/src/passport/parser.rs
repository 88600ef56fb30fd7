//! Label-anchored passport parser.

use std::time::Instant;

use tracing::{debug, info, trace};

use crate::models::config::ExtractionConfig;
use crate::models::passport::{PassportField, PassportRecord};
use crate::ocr::OcrResult;

use super::rules::{
    dates::{extract_dates, find_date_in_window},
    numbers::{extract_file_number, extract_passport_number},
    patterns::{DOCUMENT_NUMBER_PREFIX, PASSPORT_NUMBER_PREFIX},
    Label,
};
use super::PassportExtractor;

/// Result of passport extraction.
#[derive(Debug, Clone)]
pub struct ExtractionResult {
    /// Extracted passport record.
    pub record: PassportRecord,
    /// Extraction warnings (one per missing required field).
    pub warnings: Vec<String>,
    /// Processing time in milliseconds.
    pub processing_time_ms: u64,
}

/// Passport parser working over OCR lines in reading order.
///
/// The whole text is scanned once for dates and a passport number, then each
/// line is checked for a label whose value sits on the same or following
/// lines. Date fields left empty are backfilled from the dates found in the
/// first scan, in order: birth, issue, expiry.
#[derive(Debug, Clone)]
pub struct PassportParser {
    /// Lines after a date label searched for the date.
    date_window: usize,
    /// Lines after an address label inspected for address parts.
    address_line_limit: usize,
}

impl PassportParser {
    /// Create a new parser with default settings.
    pub fn new() -> Self {
        Self::from_config(&ExtractionConfig::default())
    }

    /// Create a parser from extraction configuration.
    pub fn from_config(config: &ExtractionConfig) -> Self {
        Self {
            date_window: config.date_window,
            address_line_limit: config.address_line_limit,
        }
    }

    /// Set how many lines after a date label are searched.
    pub fn with_date_window(mut self, lines: usize) -> Self {
        self.date_window = lines;
        self
    }

    /// Set how many lines after an address label are inspected.
    pub fn with_address_line_limit(mut self, lines: usize) -> Self {
        self.address_line_limit = lines;
        self
    }

    /// Extract a record from OCR lines. Never fails.
    pub fn extract_record<S: AsRef<str>>(&self, lines: &[S]) -> PassportRecord {
        let raw_text: Vec<String> = lines.iter().map(|l| l.as_ref().to_string()).collect();
        let mut record = PassportRecord::new(raw_text.clone());

        let full_text = raw_text.join(" ").to_uppercase();
        let candidate_dates = extract_dates(&full_text);
        debug!("Found dates: {:?}", candidate_dates);

        record.passport_number = extract_passport_number(&full_text);

        for (i, line) in raw_text.iter().enumerate() {
            let upper = line.to_uppercase();
            let upper = upper.trim();

            if let Some(label) = Label::classify(upper) {
                trace!("Line {} labelled {:?}", i, label);
                self.apply_label(&mut record, label, &raw_text, i, upper);
            }

            if record.file_number.is_none() {
                record.file_number = extract_file_number(line);
            }
        }

        let date_fields = [
            PassportField::DateOfBirth,
            PassportField::DateOfIssue,
            PassportField::DateOfExpiry,
        ];
        for (field, date) in date_fields.into_iter().zip(candidate_dates) {
            let slot = record.slot_mut(field);
            if slot.is_none() {
                debug!("Backfilled {} with {}", field, date);
                *slot = Some(date);
            }
        }

        record
    }

    fn apply_label(
        &self,
        record: &mut PassportRecord,
        label: Label,
        lines: &[String],
        i: usize,
        upper: &str,
    ) {
        let next_line = lines.get(i + 1).map(|l| l.trim()).unwrap_or("");

        match label {
            Label::Surname => record.surname = Some(next_line.to_string()),
            Label::GivenName => record.given_names = Some(next_line.to_string()),
            Label::DateOfBirth => {
                if let Some(date) = find_date_in_window(lines, i, self.date_window) {
                    record.date_of_birth = Some(date);
                }
            }
            Label::DateOfIssue => {
                if let Some(date) = find_date_in_window(lines, i, self.date_window) {
                    record.date_of_issue = Some(date);
                }
            }
            Label::DateOfExpiry => {
                if let Some(date) = find_date_in_window(lines, i, self.date_window) {
                    record.date_of_expiry = Some(date);
                }
            }
            Label::PlaceOfBirth => record.place_of_birth = Some(next_line.to_string()),
            Label::PlaceOfIssue => record.place_of_issue = Some(next_line.to_string()),
            Label::Nationality => {
                if upper.contains("INDIAN") {
                    record.nationality = Some("INDIAN".to_string());
                }
            }
            Label::Sex => {
                // Any M on the line wins over F, including letters from other words.
                if upper.contains('M') {
                    record.sex = Some("M".to_string());
                } else if upper.contains('F') {
                    record.sex = Some("F".to_string());
                }
            }
            Label::FatherName => {
                if !next_line.is_empty() && !DOCUMENT_NUMBER_PREFIX.is_match(next_line) {
                    record.father_name = Some(next_line.to_string());
                }
            }
            Label::MotherName => record.mother_name = Some(next_line.to_string()),
            Label::Spouse => record.spouse_name = Some(next_line.to_string()),
            Label::Address => {
                let parts: Vec<&str> = lines
                    .iter()
                    .skip(i + 1)
                    .take(self.address_line_limit)
                    .filter(|l| {
                        !l.trim().is_empty() && !PASSPORT_NUMBER_PREFIX.is_match(l.as_str())
                    })
                    .map(|l| l.trim())
                    .collect();
                record.address = Some(parts.join(" "));
            }
        }
    }

    /// Parse OCR lines into a record with warnings and timing.
    pub fn parse<S: AsRef<str>>(&self, lines: &[S]) -> ExtractionResult {
        let start = Instant::now();

        info!("Parsing passport from {} text lines", lines.len());

        let record = self.extract_record(lines);

        let warnings: Vec<String> = record
            .missing_required_fields()
            .into_iter()
            .map(|f| format!("Could not extract {}", f.label().to_lowercase()))
            .collect();

        let found = record.fields().filter(|(_, v)| v.is_some()).count();
        debug!(
            "Extracted {}/{} passport fields, {} warnings",
            found,
            PassportField::ALL.len(),
            warnings.len()
        );

        ExtractionResult {
            record,
            warnings,
            processing_time_ms: start.elapsed().as_millis() as u64,
        }
    }
}

impl Default for PassportParser {
    fn default() -> Self {
        Self::new()
    }
}

impl PassportExtractor for PassportParser {
    fn extract(&self, ocr_result: &OcrResult) -> PassportRecord {
        self.extract_record(&ocr_result.lines())
    }

    fn extract_lines(&self, lines: &[String]) -> PassportRecord {
        self.extract_record(lines)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn extract(lines: &[&str]) -> PassportRecord {
        PassportParser::new().extract_record(lines)
    }

    #[test]
    fn test_parse_full_passport() {
        let lines = [
            "REPUBLIC OF INDIA",
            "Type P Country Code IND Passport No. K1234567",
            "Surname",
            "SHARMA",
            "Given Name(s)",
            "PRIYA",
            "Nationality INDIAN",
            "Sex F",
            "Date of Birth",
            "12/05/1992",
            "Place of Birth",
            "JAIPUR, RAJASTHAN",
            "Place of Issue",
            "JAIPUR",
            "Date of Issue",
            "20/06/2018",
            "Date of Expiry",
            "19/06/2028",
        ];

        let record = extract(&lines);

        assert_eq!(record.passport_number.as_deref(), Some("K1234567"));
        assert_eq!(record.surname.as_deref(), Some("SHARMA"));
        assert_eq!(record.given_names.as_deref(), Some("PRIYA"));
        assert_eq!(record.nationality.as_deref(), Some("INDIAN"));
        assert_eq!(record.sex.as_deref(), Some("F"));
        assert_eq!(record.date_of_birth.as_deref(), Some("12/05/1992"));
        assert_eq!(record.place_of_birth.as_deref(), Some("JAIPUR, RAJASTHAN"));
        assert_eq!(record.place_of_issue.as_deref(), Some("JAIPUR"));
        assert_eq!(record.date_of_issue.as_deref(), Some("20/06/2018"));
        assert_eq!(record.date_of_expiry.as_deref(), Some("19/06/2028"));
        assert_eq!(record.raw_text.len(), lines.len());
    }

    #[test]
    fn test_parse_back_page() {
        let lines = [
            "Name of Father / Legal Guardian",
            "RAMESH SHARMA",
            "Name of Mother",
            "SUNITA SHARMA",
            "Name of Spouse",
            "",
            "Address",
            "  H NO 12, MG ROAD ",
            "K1234567",
            "",
            "JAIPUR PIN:302001, RAJASTHAN",
            "INDIA",
            "File No.",
            "JP1067123456789",
        ];

        let record = extract(&lines);

        assert_eq!(record.father_name.as_deref(), Some("RAMESH SHARMA"));
        assert_eq!(record.mother_name.as_deref(), Some("SUNITA SHARMA"));
        assert_eq!(record.spouse_name.as_deref(), Some(""));
        assert_eq!(
            record.address.as_deref(),
            Some("H NO 12, MG ROAD JAIPUR PIN:302001, RAJASTHAN")
        );
        assert_eq!(record.file_number.as_deref(), Some("JP1067123456789"));
        assert_eq!(record.passport_number.as_deref(), Some("K1234567"));
    }

    #[test]
    fn test_sex_prefers_m() {
        assert_eq!(extract(&["SEX M"]).sex.as_deref(), Some("M"));
        assert_eq!(extract(&["Sex / F"]).sex.as_deref(), Some("F"));
        // Incidental M in another word still wins.
        assert_eq!(extract(&["SEX FEMALE"]).sex.as_deref(), Some("M"));
        assert_eq!(extract(&["SEX"]).sex, None);
    }

    #[test]
    fn test_nationality_needs_indian() {
        assert_eq!(extract(&["NATIONALITY", "INDIAN"]).nationality, None);
        assert_eq!(
            extract(&["Nationality Indian"]).nationality.as_deref(),
            Some("INDIAN")
        );
    }

    #[test]
    fn test_mother_has_no_digit_guard() {
        let record = extract(&["MOTHER NAME", "B1234567"]);
        assert_eq!(record.mother_name.as_deref(), Some("B1234567"));
    }

    #[test]
    fn test_label_at_end_yields_empty_string() {
        let record = extract(&["SURNAME"]);
        assert_eq!(record.surname.as_deref(), Some(""));

        let record = extract(&["ADDRESS"]);
        assert_eq!(record.address.as_deref(), Some(""));

        // The father guard keeps an empty candidate out.
        let record = extract(&["FATHER NAME"]);
        assert_eq!(record.father_name, None);
    }

    #[test]
    fn test_address_stops_after_limit() {
        let lines = ["ADDRESS", "L1", "L2", "L3", "L4", "L5"];
        assert_eq!(extract(&lines).address.as_deref(), Some("L1 L2 L3 L4"));

        let parser = PassportParser::new().with_address_line_limit(2);
        assert_eq!(parser.extract_record(&lines).address.as_deref(), Some("L1 L2"));
    }

    #[test]
    fn test_date_label_without_date_leaves_backfill() {
        let lines = ["DATE OF BIRTH", "", "", "01/01/1990"];
        let record = extract(&lines);
        // Out of the window, but still a candidate for backfill.
        assert_eq!(record.date_of_birth.as_deref(), Some("01/01/1990"));

        let parser = PassportParser::new().with_date_window(3);
        assert_eq!(
            parser.extract_record(&lines).date_of_birth.as_deref(),
            Some("01/01/1990")
        );
    }

    #[test]
    fn test_backfill_only_fills_gaps() {
        let lines = ["01/01/1990", "DATE OF ISSUE", "05/05/2015", "03/03/2025"];
        let record = extract(&lines);

        assert_eq!(record.date_of_issue.as_deref(), Some("05/05/2015"));
        assert_eq!(record.date_of_birth.as_deref(), Some("01/01/1990"));
        assert_eq!(record.date_of_expiry.as_deref(), Some("03/03/2025"));
    }

    #[test]
    fn test_backfill_with_few_candidates() {
        let record = extract(&["01/01/1990"]);
        assert_eq!(record.date_of_birth.as_deref(), Some("01/01/1990"));
        assert_eq!(record.date_of_issue, None);
        assert_eq!(record.date_of_expiry, None);
    }

    #[test]
    fn test_file_number_first_match_wins() {
        let record = extract(&["AB1234567890123", "CD9999999999999"]);
        assert_eq!(record.file_number.as_deref(), Some("AB1234567890123"));
    }

    #[test]
    fn test_later_label_overwrites() {
        let record = extract(&["SURNAME", "FIRST", "SURNAME", "SECOND"]);
        assert_eq!(record.surname.as_deref(), Some("SECOND"));
    }

    #[test]
    fn test_parse_reports_missing_required_fields() {
        let result = PassportParser::new().parse(&["SURNAME", "KUMAR"]);

        assert_eq!(result.record.surname.as_deref(), Some("KUMAR"));
        assert_eq!(
            result.warnings,
            vec![
                "Could not extract passport number",
                "Could not extract given names",
                "Could not extract date of birth",
                "Could not extract nationality",
                "Could not extract sex",
            ]
        );
    }
}
