//! File-based intake tests.

use std::io::Write;

use qbank_ingest::{IngestError, IngestOptions, SourceData, load_source};
use qbank_model::CellValue;
use tempfile::NamedTempFile;

fn temp_file(suffix: &str, content: &[u8]) -> NamedTempFile {
    let mut file = tempfile::Builder::new().suffix(suffix).tempfile().unwrap();
    file.write_all(content).unwrap();
    file
}

#[test]
fn csv_source_keeps_headers() {
    let file = temp_file(
        ".csv",
        "\u{feff}Question_EN,Question_TE,Option_A,Option_B,Option_C,Option_D,Correct_Answer\n\
         Capital?,రాజధాని?,Delhi,Mumbai,Chennai,Kolkata,A\n\
         \n"
            .as_bytes(),
    );
    let data = load_source(file.path(), &IngestOptions::default()).unwrap();
    let SourceData::Tabular(input) = data else {
        panic!("expected tabular data");
    };
    assert_eq!(input.headers[0], "Question_EN");
    assert_eq!(input.row_count(), 1);
    let record = input.rows[0].as_record().unwrap();
    assert_eq!(record.get("Question_TE"), Some(&CellValue::from("రాజధాని?")));
}

#[test]
fn json_source_is_extracted() {
    let file = temp_file(
        ".json",
        br#"[{"question": "Q", "option_a": "1", "option_b": "2", "option_c": "3", "option_d": "4", "correct_option": "A"}, 5]"#,
    );
    let data = load_source(file.path(), &IngestOptions::default()).unwrap();
    let SourceData::Extracted(rows) = data else {
        panic!("expected extracted rows");
    };
    assert_eq!(rows.len(), 2);
    assert!(rows[1].as_record().is_none());
}

#[test]
fn text_source_is_scanned() {
    let file = temp_file(
        ".txt",
        b"1. Largest planet?\nA. Mars\nB. Jupiter\nC. Venus\nD. Earth\nAnswer: B\n",
    );
    let data = load_source(file.path(), &IngestOptions::default()).unwrap();
    assert_eq!(data.row_count(), 1);
}

#[test]
fn oversized_source_is_rejected() {
    let file = temp_file(".csv", b"question\nx\n");
    let options = IngestOptions {
        max_file_size: 4,
        sheet: None,
    };
    assert!(matches!(
        load_source(file.path(), &options),
        Err(IngestError::FileTooLarge { .. })
    ));
}

#[test]
fn utf16_csv_is_rejected() {
    let file = temp_file(".csv", &[0xFE, 0xFF, 0x00, b'q']);
    assert!(matches!(
        load_source(file.path(), &IngestOptions::default()),
        Err(IngestError::UnsupportedEncoding { .. })
    ));
}
