//! Integration tests for TSV reading and row parsing.

use obs_ingest::{IngestError, parse_row, read_rows};

const HEADER: &str = "code\tsystem\tpanel_description\ttext_description\tvalue\tunits\tucum\tLowRefRange\tHighRefRange\tRR Display\tdateobserved";

fn write_tsv(lines: &[&str]) -> tempfile::NamedTempFile {
    let file = tempfile::Builder::new()
        .suffix(".tsv")
        .tempfile()
        .expect("create temp file");
    std::fs::write(file.path(), lines.join("\n")).expect("write temp file");
    file
}

#[test]
fn reads_rows_in_order() {
    let file = write_tsv(&[
        HEADER,
        "2085-9\thttp://loinc.org\tLipids\tHDL Cholesterol\t1.2\tmmol/L\tmmol/L\t1.0\t2.0\t1.0 - 2.0\t12/6/2024",
        "718-7\thttp://loinc.org\t\tHaemoglobin\t140\tg/L\tg/L\t130\t180\t\t1/6/2024",
    ]);

    let rows = read_rows(file.path()).expect("read rows");
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0].record_number, 1);
    assert_eq!(rows[0].code.as_deref(), Some("2085-9"));
    assert_eq!(rows[1].record_number, 2);
    assert_eq!(rows[1].text_description.as_deref(), Some("Haemoglobin"));
}

#[test]
fn short_rows_are_tolerated() {
    // Trailing optional columns absent entirely.
    let file = write_tsv(&[
        HEADER,
        "2085-9\thttp://loinc.org\t\tHDL Cholesterol",
    ]);

    let rows = read_rows(file.path()).expect("read rows");
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].value, None);
    assert_eq!(rows[0].date_observed, None);

    let parsed = parse_row(&rows[0]).expect("sparse row parses");
    assert_eq!(parsed.record.value, None);
    assert!(!parsed.record.has_reference_range());
}

#[test]
fn missing_required_column_is_fatal() {
    let file = write_tsv(&[
        "system\ttext_description\tvalue",
        "http://loinc.org\tHDL Cholesterol\t1.2",
    ]);

    let error = read_rows(file.path()).unwrap_err();
    assert!(matches!(
        error,
        IngestError::MissingColumn { ref column, .. } if column == "code"
    ));
}

#[test]
fn empty_file_is_fatal() {
    let file = write_tsv(&[]);

    let error = read_rows(file.path()).unwrap_err();
    assert!(matches!(error, IngestError::EmptyFile { .. }));
}

#[test]
fn undecodable_row_is_fatal() {
    let file = write_tsv(&[HEADER]);
    let mut bytes = std::fs::read(file.path()).expect("read back");
    bytes.extend_from_slice(b"\n2085-9\thttp://loinc.org\t\t\xFF\xFE bad bytes");
    std::fs::write(file.path(), bytes).expect("append row");

    let error = read_rows(file.path()).unwrap_err();
    assert!(matches!(error, IngestError::Csv { .. }));
}

#[test]
fn missing_file_is_fatal() {
    let error = read_rows(std::path::Path::new("/nonexistent/lab.tsv")).unwrap_err();
    assert!(matches!(error, IngestError::FileNotFound { .. }));
}

#[test]
fn column_order_does_not_matter() {
    let file = write_tsv(&[
        "text_description\tcode\tsystem\tucum\tvalue",
        "HDL Cholesterol\t2085-9\thttp://loinc.org\tmmol/L\t1.2",
    ]);

    let rows = read_rows(file.path()).expect("read rows");
    let parsed = parse_row(&rows[0]).expect("parse reordered row");
    assert_eq!(parsed.record.code, "2085-9");
    assert_eq!(parsed.record.value, Some(1.2));
    assert_eq!(parsed.record.ucum.as_deref(), Some("mmol/L"));
}

mod properties {
    use obs_ingest::parse_decimal;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn formatted_decimals_round_trip(value in -1.0e9f64..1.0e9f64) {
            let text = format!("{value}");
            let parsed = parse_decimal(&text);
            prop_assert_eq!(parsed, Some(value));
        }

        #[test]
        fn parser_never_panics(text in "\\PC*") {
            let _ = parse_decimal(&text);
        }
    }
}
