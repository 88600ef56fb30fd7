//! Behaviour of the public extraction API on realistic OCR output.

use inpass_core::{extract, PassportField, PassportParser, PassportRecord};
use pretty_assertions::assert_eq;

fn lines(text: &str) -> Vec<&str> {
    text.lines().collect()
}

#[test]
fn output_always_has_every_key_and_echoes_input() {
    let inputs = [
        vec![],
        vec!["", "   "],
        vec!["REPUBLIC OF INDIA", "P", "IND", "A1234567"],
        vec!["ADDRESS"],
    ];

    for input in inputs {
        let record = extract(&input);
        let json = serde_json::to_value(&record).unwrap();
        let obj = json.as_object().unwrap();

        assert_eq!(obj.len(), PassportField::ALL.len() + 1);
        assert_eq!(record.raw_text, input);
    }
}

#[test]
fn empty_input_yields_only_nulls() {
    let input: Vec<String> = Vec::new();
    assert_eq!(extract(&input), PassportRecord::default());
}

#[test]
fn names_follow_their_labels() {
    let record = extract(&["SURNAME", "KUMAR", "GIVEN NAME", "RAJESH"]);

    assert_eq!(record.surname.as_deref(), Some("KUMAR"));
    assert_eq!(record.given_names.as_deref(), Some("RAJESH"));
}

#[test]
fn date_is_found_two_lines_below_label() {
    let record = extract(&["DATE OF BIRTH", "", "01/02/1990"]);
    assert_eq!(record.date_of_birth.as_deref(), Some("01/02/1990"));
}

#[test]
fn unlabelled_dates_fill_birth_issue_expiry_in_order() {
    let record = extract(&["01/01/1990", "02/02/2015", "03/03/2025"]);

    assert_eq!(record.date_of_birth.as_deref(), Some("01/01/1990"));
    assert_eq!(record.date_of_issue.as_deref(), Some("02/02/2015"));
    assert_eq!(record.date_of_expiry.as_deref(), Some("03/03/2025"));
}

#[test]
fn first_passport_number_wins() {
    let record = extract(&["A1234567", "B7654321"]);
    assert_eq!(record.passport_number.as_deref(), Some("A1234567"));
}

#[test]
fn father_name_rejects_document_numbers() {
    let record = extract(&["FATHER NAME", "B1234567"]);
    assert_eq!(record.father_name, None);

    let record = extract(&["FATHER NAME", "SURESH KUMAR"]);
    assert_eq!(record.father_name.as_deref(), Some("SURESH KUMAR"));
}

#[test]
fn extraction_is_idempotent() {
    let input = lines(
        "REPUBLIC OF INDIA\n\
         Type/ Country Code/ Passport No.\n\
         P IND J8369854\n\
         Surname\n\
         RAMADUGULA\n\
         Given Name(s)\n\
         SITA MAHA LAKSHMI\n\
         Nationality INDIAN\n\
         Sex F\n\
         Date of Birth\n\
         23/09/1959\n\
         Place of Birth\n\
         GUNDUGOLANU\n\
         Place of Issue\n\
         HYDERABAD\n\
         Date of Issue\n\
         11/10/2011\n\
         Date of Expiry\n\
         10/10/2021",
    );

    let first = extract(&input);
    let second = extract(&input);
    assert_eq!(first, second);

    assert_eq!(first.passport_number.as_deref(), Some("J8369854"));
    assert_eq!(first.surname.as_deref(), Some("RAMADUGULA"));
    assert_eq!(first.given_names.as_deref(), Some("SITA MAHA LAKSHMI"));
    assert_eq!(first.nationality.as_deref(), Some("INDIAN"));
    assert_eq!(first.sex.as_deref(), Some("F"));
    assert_eq!(first.date_of_birth.as_deref(), Some("23/09/1959"));
    assert_eq!(first.place_of_birth.as_deref(), Some("GUNDUGOLANU"));
    assert_eq!(first.place_of_issue.as_deref(), Some("HYDERABAD"));
    assert_eq!(first.date_of_issue.as_deref(), Some("11/10/2011"));
    assert_eq!(first.date_of_expiry.as_deref(), Some("10/10/2021"));
    assert!(first.missing_required_fields().is_empty());
}

#[test]
fn back_page_family_and_address() {
    let input = lines(
        "Name of Father / Legal Guardian\n\
         RAMADUGULA SATYANARAYANA\n\
         Name of Mother\n\
         RAMADUGULA LAKSHMI\n\
         Name of Spouse\n\
         RAMADUGULA VENKATA RAO\n\
         Address\n\
         12-2-823/A/45, SANTOSH NAGAR\n\
         MEHDIPATNAM, HYDERABAD\n\
         PIN:500028, ANDHRA PRADESH, INDIA\n\
         Old Passport No. with Date and Place of Issue\n\
         File No.\n\
         HY1067353526211",
    );

    let record = extract(&input);

    assert_eq!(record.father_name.as_deref(), Some("RAMADUGULA SATYANARAYANA"));
    assert_eq!(record.mother_name.as_deref(), Some("RAMADUGULA LAKSHMI"));
    assert_eq!(record.spouse_name.as_deref(), Some("RAMADUGULA VENKATA RAO"));
    assert_eq!(
        record.address.as_deref(),
        Some(
            "12-2-823/A/45, SANTOSH NAGAR MEHDIPATNAM, HYDERABAD \
             PIN:500028, ANDHRA PRADESH, INDIA Old Passport No. with Date and Place of Issue"
        )
    );
    assert_eq!(record.file_number.as_deref(), Some("HY1067353526211"));
    // The old-passport line mentions "Place of Issue" and claims the next line.
    assert_eq!(record.place_of_issue.as_deref(), Some("File No."));
}

#[test]
fn parser_tunables_change_windows() {
    let input = ["DATE OF ISSUE", "", "", "11/10/2011"];

    let default = PassportParser::new().extract_record(&input);
    // Outside the label's window, so backfill puts it in the first date slot.
    assert_eq!(default.date_of_issue, None);
    assert_eq!(default.date_of_birth.as_deref(), Some("11/10/2011"));

    // Backfill still hands the first candidate to the empty birth slot.
    let wide = PassportParser::new()
        .with_date_window(3)
        .extract_record(&input);
    assert_eq!(wide.date_of_issue.as_deref(), Some("11/10/2011"));
    assert_eq!(wide.date_of_birth.as_deref(), Some("11/10/2011"));
}
