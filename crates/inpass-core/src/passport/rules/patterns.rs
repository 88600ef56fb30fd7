//! Common regex patterns for Indian passport extraction.

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    // DD/MM/YYYY, no calendar check
    pub static ref DATE: Regex = Regex::new(
        r"\d{2}/\d{2}/\d{4}"
    ).unwrap();

    // Passport number: one letter + 7 digits (e.g. K1234567)
    pub static ref PASSPORT_NUMBER: Regex = Regex::new(
        r"[A-Z]\d{7}"
    ).unwrap();

    // Passport number at the very start of a line
    pub static ref PASSPORT_NUMBER_PREFIX: Regex = Regex::new(
        r"^[A-Z]\d{7}"
    ).unwrap();

    // File number: two letters + 13 digits (e.g. BP1067123456789)
    pub static ref FILE_NUMBER: Regex = Regex::new(
        r"[A-Z]{2}\d{13}"
    ).unwrap();

    // Optional letter followed by digits at line start
    pub static ref DOCUMENT_NUMBER_PREFIX: Regex = Regex::new(
        r"^[A-Z]?\d+"
    ).unwrap();
}
