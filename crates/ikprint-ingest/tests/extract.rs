//! End-to-end extraction from generated `.docx` packages.

use std::io::{Cursor, Write};
use std::path::Path;

use ikprint_ingest::{
    CodeExtractor, DocumentError, DocumentSource, ExtractionOptions, IngestError, find_documents,
};
use ikprint_model::Code;
use tempfile::TempDir;
use zip::ZipWriter;
use zip::write::SimpleFileOptions;

const WORDML: &str = "http://schemas.openxmlformats.org/wordprocessingml/2006/main";

fn cell(text: &str) -> String {
    format!("<w:tc><w:tcPr/><w:p><w:r><w:t xml:space=\"preserve\">{text}</w:t></w:r></w:p></w:tc>")
}

/// Admission table with 20 rows; rows 12..17 carry diagnoses in column 2.
fn admission_xml(diagnoses: &[&str]) -> String {
    let mut rows = String::new();
    for idx in 0..20 {
        let third = if (12..17).contains(&idx) {
            diagnoses.get(idx - 12).copied().unwrap_or("")
        } else {
            "Z00.0 should not be read"
        };
        rows.push_str(&format!(
            "<w:tr>{}{}{}</w:tr>",
            cell(&format!("Row {idx}")),
            cell("label"),
            cell(third)
        ));
    }
    format!(
        "<?xml version=\"1.0\" encoding=\"UTF-8\" standalone=\"yes\"?>\
         <w:document xmlns:w=\"{WORDML}\"><w:body><w:tbl><w:tblPr/>{rows}</w:tbl>\
         <w:p/><w:sectPr/></w:body></w:document>"
    )
}

fn package(parts: &[(&str, &str)]) -> Vec<u8> {
    let mut zip = ZipWriter::new(Cursor::new(Vec::new()));
    for (name, content) in parts {
        zip.start_file(*name, SimpleFileOptions::default()).unwrap();
        zip.write_all(content.as_bytes()).unwrap();
    }
    zip.finish().unwrap().into_inner()
}

fn write_docx(dir: &Path, name: &str, diagnoses: &[&str]) {
    let xml = admission_xml(diagnoses);
    let bytes = package(&[
        ("[Content_Types].xml", "<Types/>"),
        ("word/document.xml", &xml),
    ]);
    std::fs::write(dir.join(name), bytes).unwrap();
}

fn values(codes: &[Code]) -> Vec<&str> {
    codes.iter().map(Code::as_str).collect()
}

#[test]
fn extracts_codes_from_diagnosis_rows() {
    let dir = TempDir::new().unwrap();
    write_docx(
        dir.path(),
        "2024-03-01 Doe, Jane.docx",
        &[
            "Lumbago M54.5",
            "Type 2 diabetes E11.9, hypertension I10",
            "",
            "Depression F32.1 (also I10)",
        ],
    );

    let extractor = CodeExtractor::new(&ExtractionOptions::default()).unwrap();
    let codes = extractor
        .extract_file(&dir.path().join("2024-03-01 Doe, Jane.docx"))
        .unwrap();

    assert_eq!(
        values(&codes),
        vec!["M54.5", "E11.9", "I10", "F32.1", "I10"]
    );
}

#[test]
fn finds_then_extracts_by_patient_name() {
    let dir = TempDir::new().unwrap();
    write_docx(dir.path(), "2024-03-01 Doe, Jane.docx", &["R51"]);
    write_docx(dir.path(), "2024-03-02 Roe, Richard.docx", &["J45.909"]);

    let source = DocumentSource {
        directory: dir.path().to_path_buf(),
        ..DocumentSource::default()
    };
    let found = find_documents(&source, "roe").unwrap();
    assert_eq!(found.len(), 1);

    let extractor = CodeExtractor::new(&ExtractionOptions::default()).unwrap();
    let codes = extractor.extract_file(&found[0]).unwrap();
    assert_eq!(values(&codes), vec!["J45.909"]);
}

#[test]
fn custom_row_range_and_column() {
    let bytes = package(&[("word/document.xml", &admission_xml(&[]))]);
    let options = ExtractionOptions {
        first_row: 0,
        end_row: 2,
        cell_column: 2,
        ..ExtractionOptions::default()
    };
    let extractor = CodeExtractor::new(&options).unwrap();
    let codes = extractor.extract(Cursor::new(bytes)).unwrap();
    assert_eq!(values(&codes), vec!["Z00.0", "Z00.0"]);
}

#[test]
fn package_without_document_part() {
    let bytes = package(&[("word/styles.xml", "<w:styles/>")]);
    let extractor = CodeExtractor::new(&ExtractionOptions::default()).unwrap();
    let err = extractor.extract(Cursor::new(bytes)).unwrap_err();
    assert!(matches!(err, DocumentError::MissingPart { ref part } if part == "word/document.xml"));
}

#[test]
fn plain_file_is_not_a_package() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("broken.docx");
    std::fs::write(&path, b"not a zip file").unwrap();

    let extractor = CodeExtractor::new(&ExtractionOptions::default()).unwrap();
    let err = extractor.extract_file(&path).unwrap_err();
    assert!(matches!(
        err,
        IngestError::Document {
            source: DocumentError::Package(_),
            ..
        }
    ));
}

#[test]
fn missing_file_is_a_read_error() {
    let dir = TempDir::new().unwrap();
    let extractor = CodeExtractor::new(&ExtractionOptions::default()).unwrap();
    let err = extractor
        .extract_file(&dir.path().join("absent.docx"))
        .unwrap_err();
    assert!(matches!(err, IngestError::FileRead { .. }));
}
