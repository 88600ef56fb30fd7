//! Field labels printed on the passport.
//!
//! A line is matched against the labels in declaration order and takes the
//! first one that fits, so each line anchors at most one field.

/// A label keyword found on an OCR line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Label {
    Surname,
    GivenName,
    DateOfBirth,
    DateOfIssue,
    DateOfExpiry,
    PlaceOfBirth,
    PlaceOfIssue,
    Nationality,
    Sex,
    FatherName,
    MotherName,
    Spouse,
    Address,
}

impl Label {
    /// Classify an upper-cased line.
    pub fn classify(line: &str) -> Option<Label> {
        let label = if line.contains("SURNAME") {
            Label::Surname
        } else if line.contains("GIVEN NAME") {
            Label::GivenName
        } else if line.contains("DATE OF BIRTH") {
            Label::DateOfBirth
        } else if line.contains("DATE OF ISSUE") {
            Label::DateOfIssue
        } else if line.contains("DATE OF EXPIRY") {
            Label::DateOfExpiry
        } else if line.contains("PLACE OF BIRTH") {
            Label::PlaceOfBirth
        } else if line.contains("PLACE OF ISSUE") {
            Label::PlaceOfIssue
        } else if line.contains("NATIONALITY") {
            Label::Nationality
        } else if line.contains("SEX") {
            Label::Sex
        } else if line.contains("FATHER") && line.contains("NAME") {
            Label::FatherName
        } else if line.contains("MOTHER") && line.contains("NAME") {
            Label::MotherName
        } else if line.contains("SPOUSE") {
            Label::Spouse
        } else if line.contains("ADDRESS") {
            Label::Address
        } else {
            return None;
        };
        Some(label)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify() {
        assert_eq!(Label::classify("SURNAME"), Some(Label::Surname));
        assert_eq!(Label::classify("GIVEN NAME(S)"), Some(Label::GivenName));
        assert_eq!(Label::classify("DATE OF EXPIRY"), Some(Label::DateOfExpiry));
        assert_eq!(Label::classify("NAME OF FATHER / LEGAL GUARDIAN"), Some(Label::FatherName));
        assert_eq!(Label::classify("NAME OF MOTHER"), Some(Label::MotherName));
        assert_eq!(Label::classify("NAME OF SPOUSE"), Some(Label::Spouse));
        assert_eq!(Label::classify("REPUBLIC OF INDIA"), None);
    }

    #[test]
    fn test_first_label_wins() {
        // Surname outranks everything after it.
        assert_eq!(Label::classify("SURNAME / GIVEN NAME"), Some(Label::Surname));
        assert_eq!(Label::classify("NATIONALITY SEX"), Some(Label::Nationality));
        assert_eq!(Label::classify("SEX DATE OF BIRTH"), Some(Label::DateOfBirth));
    }

    #[test]
    fn test_father_needs_name() {
        assert_eq!(Label::classify("FATHER"), None);
        assert_eq!(Label::classify("MOTHER"), None);
    }
}
