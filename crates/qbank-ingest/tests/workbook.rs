//! Sheet selection against real `.xlsx` files.

use std::io::Write;
use std::path::Path;

use qbank_ingest::{IngestError, read_workbook};
use qbank_model::CellValue;
use tempfile::TempDir;
use zip::write::SimpleFileOptions;

const CONTENT_TYPES: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types">
<Default Extension="rels" ContentType="application/vnd.openxmlformats-package.relationships+xml"/>
<Default Extension="xml" ContentType="application/xml"/>
<Override PartName="/xl/workbook.xml" ContentType="application/vnd.openxmlformats-officedocument.spreadsheetml.sheet.main+xml"/>
<Override PartName="/xl/worksheets/sheet1.xml" ContentType="application/vnd.openxmlformats-officedocument.spreadsheetml.worksheet+xml"/>
<Override PartName="/xl/worksheets/sheet2.xml" ContentType="application/vnd.openxmlformats-officedocument.spreadsheetml.worksheet+xml"/>
<Override PartName="/xl/worksheets/sheet3.xml" ContentType="application/vnd.openxmlformats-officedocument.spreadsheetml.worksheet+xml"/>
</Types>"#;

const ROOT_RELS: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">
<Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/officeDocument" Target="xl/workbook.xml"/>
</Relationships>"#;

const WORKBOOK: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<workbook xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main" xmlns:r="http://schemas.openxmlformats.org/officeDocument/2006/relationships">
<sheets>
<sheet name="Maths" sheetId="1" r:id="rId1"/>
<sheet name="Physics" sheetId="2" r:id="rId2"/>
<sheet name="Blank" sheetId="3" r:id="rId3"/>
</sheets>
</workbook>"#;

const WORKBOOK_RELS: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships">
<Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/worksheet" Target="worksheets/sheet1.xml"/>
<Relationship Id="rId2" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/worksheet" Target="worksheets/sheet2.xml"/>
<Relationship Id="rId3" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/worksheet" Target="worksheets/sheet3.xml"/>
</Relationships>"#;

const HEADERS: [&str; 6] = [
    "Question", "Option_A", "Option_B", "Option_C", "Option_D", "Answer",
];

fn text_cell(reference: &str, text: &str) -> String {
    format!(r#"<c r="{reference}" t="inlineStr"><is><t>{text}</t></is></c>"#)
}

/// Header row plus one question row whose answer is a numeric cell.
fn question_sheet(question: &str, options: [&str; 4], answer: u8) -> String {
    let columns = ["A", "B", "C", "D", "E", "F"];
    let header_cells: String = columns
        .iter()
        .zip(HEADERS)
        .map(|(column, header)| text_cell(&format!("{column}1"), header))
        .collect();
    let mut body = text_cell("A2", question);
    for (column, option) in columns[1..5].iter().zip(options) {
        body.push_str(&text_cell(&format!("{column}2"), option));
    }
    body.push_str(&format!(r#"<c r="F2"><v>{answer}</v></c>"#));
    worksheet(&format!(r#"<row r="1">{header_cells}</row><row r="2">{body}</row>"#))
}

fn worksheet(rows: &str) -> String {
    format!(
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<worksheet xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main"><sheetData>{rows}</sheetData></worksheet>"#
    )
}

fn write_bank(dir: &Path) -> std::path::PathBuf {
    let mut buffer = Vec::new();
    {
        let mut zip = zip::ZipWriter::new(std::io::Cursor::new(&mut buffer));
        let options =
            SimpleFileOptions::default().compression_method(zip::CompressionMethod::Stored);
        let parts = [
            ("[Content_Types].xml", CONTENT_TYPES.to_string()),
            ("_rels/.rels", ROOT_RELS.to_string()),
            ("xl/workbook.xml", WORKBOOK.to_string()),
            ("xl/_rels/workbook.xml.rels", WORKBOOK_RELS.to_string()),
            (
                "xl/worksheets/sheet1.xml",
                question_sheet("What is 7 x 6?", ["36", "42", "48", "54"], 2),
            ),
            (
                "xl/worksheets/sheet2.xml",
                question_sheet("Unit of force?", ["Joule", "Watt", "Newton", "Pascal"], 3),
            ),
            ("xl/worksheets/sheet3.xml", worksheet("")),
        ];
        for (name, contents) in parts {
            zip.start_file(name, options).unwrap();
            zip.write_all(contents.as_bytes()).unwrap();
        }
        zip.finish().unwrap();
    }
    let path = dir.join("bank.xlsx");
    std::fs::write(&path, buffer).unwrap();
    path
}

fn bank() -> (TempDir, std::path::PathBuf) {
    let dir = tempfile::tempdir().unwrap();
    let path = write_bank(dir.path());
    (dir, path)
}

#[test]
fn first_sheet_is_read_by_default() {
    let (_dir, path) = bank();

    let input = read_workbook(&path, None).unwrap();

    assert_eq!(input.headers, HEADERS.map(String::from).to_vec());
    assert_eq!(input.row_count(), 1);
    let record = input.rows[0].as_record().unwrap();
    assert_eq!(record.get("Question"), Some(&CellValue::from("What is 7 x 6?")));
    assert_eq!(
        record.get("Answer").and_then(CellValue::to_text),
        Some("2".to_string())
    );
}

#[test]
fn named_sheet_is_selected() {
    let (_dir, path) = bank();

    let input = read_workbook(&path, Some("Physics")).unwrap();

    let record = input.rows[0].as_record().unwrap();
    assert_eq!(record.get("Question"), Some(&CellValue::from("Unit of force?")));
    assert_eq!(record.get("Option_C"), Some(&CellValue::from("Newton")));
}

#[test]
fn unknown_sheet_lists_available_names() {
    let (_dir, path) = bank();

    let err = read_workbook(&path, Some("Chemistry")).unwrap_err();

    let IngestError::SheetNotFound {
        sheet, available, ..
    } = &err
    else {
        panic!("expected SheetNotFound, got {err:?}");
    };
    assert_eq!(sheet, "Chemistry");
    assert_eq!(*available, vec!["Maths", "Physics", "Blank"]);
}

#[test]
fn sheet_without_header_row_is_empty() {
    let (_dir, path) = bank();

    let err = read_workbook(&path, Some("Blank")).unwrap_err();

    assert!(matches!(err, IngestError::EmptySheet { ref sheet, .. } if sheet == "Blank"));
}
