//! Passport record produced by the field extractor.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Fields extracted from an Indian passport.
///
/// Every field is always serialized, `null` when nothing was found.
/// `raw_text` holds the recognized lines exactly as they were given.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PassportRecord {
    pub passport_number: Option<String>,
    pub surname: Option<String>,
    pub given_names: Option<String>,
    pub date_of_birth: Option<String>,
    pub date_of_issue: Option<String>,
    pub date_of_expiry: Option<String>,
    pub place_of_birth: Option<String>,
    pub place_of_issue: Option<String>,
    pub nationality: Option<String>,
    pub sex: Option<String>,
    pub father_name: Option<String>,
    pub mother_name: Option<String>,
    pub spouse_name: Option<String>,
    pub address: Option<String>,
    pub file_number: Option<String>,
    pub raw_text: Vec<String>,
}

/// Value keys of a [`PassportRecord`], in serialization order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PassportField {
    PassportNumber,
    Surname,
    GivenNames,
    DateOfBirth,
    DateOfIssue,
    DateOfExpiry,
    PlaceOfBirth,
    PlaceOfIssue,
    Nationality,
    Sex,
    FatherName,
    MotherName,
    SpouseName,
    Address,
    FileNumber,
}

impl PassportField {
    /// All value fields in key order.
    pub const ALL: [PassportField; 15] = [
        PassportField::PassportNumber,
        PassportField::Surname,
        PassportField::GivenNames,
        PassportField::DateOfBirth,
        PassportField::DateOfIssue,
        PassportField::DateOfExpiry,
        PassportField::PlaceOfBirth,
        PassportField::PlaceOfIssue,
        PassportField::Nationality,
        PassportField::Sex,
        PassportField::FatherName,
        PassportField::MotherName,
        PassportField::SpouseName,
        PassportField::Address,
        PassportField::FileNumber,
    ];

    /// Fields a visa application cannot go ahead without.
    /// Family fields are optional.
    pub const REQUIRED: [PassportField; 6] = [
        PassportField::PassportNumber,
        PassportField::Surname,
        PassportField::GivenNames,
        PassportField::DateOfBirth,
        PassportField::Nationality,
        PassportField::Sex,
    ];

    /// Serialized key name.
    pub fn key(&self) -> &'static str {
        match self {
            PassportField::PassportNumber => "passport_number",
            PassportField::Surname => "surname",
            PassportField::GivenNames => "given_names",
            PassportField::DateOfBirth => "date_of_birth",
            PassportField::DateOfIssue => "date_of_issue",
            PassportField::DateOfExpiry => "date_of_expiry",
            PassportField::PlaceOfBirth => "place_of_birth",
            PassportField::PlaceOfIssue => "place_of_issue",
            PassportField::Nationality => "nationality",
            PassportField::Sex => "sex",
            PassportField::FatherName => "father_name",
            PassportField::MotherName => "mother_name",
            PassportField::SpouseName => "spouse_name",
            PassportField::Address => "address",
            PassportField::FileNumber => "file_number",
        }
    }

    /// Human readable label.
    pub fn label(&self) -> &'static str {
        match self {
            PassportField::PassportNumber => "Passport number",
            PassportField::Surname => "Surname",
            PassportField::GivenNames => "Given names",
            PassportField::DateOfBirth => "Date of birth",
            PassportField::DateOfIssue => "Date of issue",
            PassportField::DateOfExpiry => "Date of expiry",
            PassportField::PlaceOfBirth => "Place of birth",
            PassportField::PlaceOfIssue => "Place of issue",
            PassportField::Nationality => "Nationality",
            PassportField::Sex => "Sex",
            PassportField::FatherName => "Father's name",
            PassportField::MotherName => "Mother's name",
            PassportField::SpouseName => "Spouse's name",
            PassportField::Address => "Address",
            PassportField::FileNumber => "File number",
        }
    }
}

impl fmt::Display for PassportField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl PassportRecord {
    /// Create a record with every field unset.
    pub fn new(raw_text: Vec<String>) -> Self {
        Self {
            raw_text,
            ..Default::default()
        }
    }

    /// Value of a single field.
    pub fn get(&self, field: PassportField) -> Option<&str> {
        self.slot(field).as_deref()
    }

    pub(crate) fn slot_mut(&mut self, field: PassportField) -> &mut Option<String> {
        match field {
            PassportField::PassportNumber => &mut self.passport_number,
            PassportField::Surname => &mut self.surname,
            PassportField::GivenNames => &mut self.given_names,
            PassportField::DateOfBirth => &mut self.date_of_birth,
            PassportField::DateOfIssue => &mut self.date_of_issue,
            PassportField::DateOfExpiry => &mut self.date_of_expiry,
            PassportField::PlaceOfBirth => &mut self.place_of_birth,
            PassportField::PlaceOfIssue => &mut self.place_of_issue,
            PassportField::Nationality => &mut self.nationality,
            PassportField::Sex => &mut self.sex,
            PassportField::FatherName => &mut self.father_name,
            PassportField::MotherName => &mut self.mother_name,
            PassportField::SpouseName => &mut self.spouse_name,
            PassportField::Address => &mut self.address,
            PassportField::FileNumber => &mut self.file_number,
        }
    }

    fn slot(&self, field: PassportField) -> &Option<String> {
        match field {
            PassportField::PassportNumber => &self.passport_number,
            PassportField::Surname => &self.surname,
            PassportField::GivenNames => &self.given_names,
            PassportField::DateOfBirth => &self.date_of_birth,
            PassportField::DateOfIssue => &self.date_of_issue,
            PassportField::DateOfExpiry => &self.date_of_expiry,
            PassportField::PlaceOfBirth => &self.place_of_birth,
            PassportField::PlaceOfIssue => &self.place_of_issue,
            PassportField::Nationality => &self.nationality,
            PassportField::Sex => &self.sex,
            PassportField::FatherName => &self.father_name,
            PassportField::MotherName => &self.mother_name,
            PassportField::SpouseName => &self.spouse_name,
            PassportField::Address => &self.address,
            PassportField::FileNumber => &self.file_number,
        }
    }

    /// Iterate over `(field, value)` pairs in key order.
    pub fn fields(&self) -> impl Iterator<Item = (PassportField, Option<&str>)> + '_ {
        PassportField::ALL.iter().map(move |&f| (f, self.get(f)))
    }

    /// True if any field holds non-blank text.
    pub fn has_data(&self) -> bool {
        self.fields().any(|(_, v)| is_filled(v))
    }

    /// Required fields that are unset or blank.
    pub fn missing_required_fields(&self) -> Vec<PassportField> {
        PassportField::REQUIRED
            .iter()
            .copied()
            .filter(|&f| !is_filled(self.get(f)))
            .collect()
    }

    /// Validate the record and return a list of issues.
    pub fn validate(&self) -> Vec<String> {
        self.missing_required_fields()
            .into_iter()
            .map(|f| format!("Missing {}", f.label().to_lowercase()))
            .collect()
    }
}

fn is_filled(value: Option<&str>) -> bool {
    value.is_some_and(|v| !v.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_serializes_every_key() {
        let record = PassportRecord::new(vec!["P<IND".to_string()]);
        let json = serde_json::to_value(&record).unwrap();
        let obj = json.as_object().unwrap();

        assert_eq!(obj.len(), 16);
        for field in PassportField::ALL {
            assert!(obj[field.key()].is_null(), "{} should be null", field);
        }
        assert_eq!(obj["raw_text"], serde_json::json!(["P<IND"]));
    }

    #[test]
    fn test_key_order_matches_serialization() {
        let json = serde_json::to_string(&PassportRecord::default()).unwrap();
        let positions: Vec<usize> = PassportField::ALL
            .iter()
            .map(|f| json.find(&format!("\"{}\"", f.key())).unwrap())
            .collect();

        assert!(positions.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn test_missing_required_fields() {
        let mut record = PassportRecord::default();
        record.passport_number = Some("K1234567".into());
        record.surname = Some("   ".into());
        record.sex = Some("F".into());

        assert_eq!(
            record.missing_required_fields(),
            vec![
                PassportField::Surname,
                PassportField::GivenNames,
                PassportField::DateOfBirth,
                PassportField::Nationality,
            ]
        );
        assert_eq!(record.validate()[0], "Missing surname");
    }

    #[test]
    fn test_has_data() {
        let mut record = PassportRecord::new(vec!["noise".into()]);
        assert!(!record.has_data());

        record.mother_name = Some(String::new());
        assert!(!record.has_data());

        record.mother_name = Some("SITA".into());
        assert!(record.has_data());
    }
}
