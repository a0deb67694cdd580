//! Integration tests for the interactive workflow.

use std::io::{Cursor, Write};
use std::path::Path;

use ikprint_cli::config::Settings;
use ikprint_cli::prompt::{EDIT_PROMPT, run_refinement, select_document};
use ikprint_cli::workflow::{DocumentTarget, run_workflow};
use ikprint_core::{RefinementSession, render};
use ikprint_model::{Code, CodeList, Layout};
use ikprint_output::{FileSink, TerminalSink};
use tempfile::TempDir;
use zip::ZipWriter;
use zip::write::SimpleFileOptions;

const WORDML: &str = "http://schemas.openxmlformats.org/wordprocessingml/2006/main";

fn codes(values: &[&str]) -> CodeList {
    values.iter().map(|v| Code::new(*v).unwrap()).collect()
}

fn values(list: &CodeList) -> Vec<&str> {
    list.iter().map(Code::as_str).collect()
}

fn write_docx(dir: &Path, name: &str, diagnoses: &[&str]) {
    let mut rows = String::new();
    for idx in 0..17usize {
        let text = idx
            .checked_sub(12)
            .and_then(|offset| diagnoses.get(offset))
            .copied()
            .unwrap_or("");
        rows.push_str(&format!(
            "<w:tr><w:tc><w:p/></w:tc><w:tc><w:p/></w:tc>\
             <w:tc><w:p><w:r><w:t>{text}</w:t></w:r></w:p></w:tc></w:tr>"
        ));
    }
    let xml = format!(
        "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\
         <w:document xmlns:w=\"{WORDML}\"><w:body><w:tbl>{rows}</w:tbl></w:body></w:document>"
    );

    let mut zip = ZipWriter::new(Cursor::new(Vec::new()));
    zip.start_file("word/document.xml", SimpleFileOptions::default())
        .unwrap();
    zip.write_all(xml.as_bytes()).unwrap();
    let bytes = zip.finish().unwrap().into_inner();
    std::fs::write(dir.join(name), bytes).unwrap();
}

fn settings_for(dir: &Path) -> Settings {
    let mut settings = Settings::default();
    settings.documents.directory = dir.to_path_buf();
    settings
}

#[test]
fn test_refinement_adds_then_removes() {
    let session = RefinementSession::start(codes(&["A1", "B2"]), Layout::default()).unwrap();
    let mut input = Cursor::new("+ C3 - A1\n\n");
    let mut output = Vec::new();
    let mut preview = TerminalSink::new(Vec::new());

    let outcome = run_refinement(session, &mut input, &mut output, &mut preview).unwrap();

    assert_eq!(values(&outcome.codes), ["B2", "C3"]);
    assert_eq!(
        outcome.rendering,
        render(codes(&["B2", "C3"]).as_slice(), &Layout::default())
    );
    let prompts = String::from_utf8(output).unwrap();
    assert_eq!(prompts.matches(EDIT_PROMPT).count(), 2);
}

#[test]
fn test_refinement_previews_every_rendering() {
    let session = RefinementSession::start(codes(&["A1"]), Layout::default()).unwrap();
    let mut input = Cursor::new("B2\n\n");
    let mut preview = TerminalSink::new(Vec::new()).compact();

    run_refinement(session, &mut input, &mut Vec::new(), &mut preview).unwrap();

    let shown = String::from_utf8(preview.into_inner()).unwrap();
    assert!(shown.starts_with("A1"));
    assert!(shown.contains("B2"));
}

#[test]
fn test_empty_line_keeps_list() {
    let session = RefinementSession::start(codes(&["A1", "B2"]), Layout::default()).unwrap();
    let mut input = Cursor::new("\n+ C3\n");
    let outcome = run_refinement(
        session,
        &mut input,
        &mut Vec::new(),
        &mut TerminalSink::new(Vec::new()),
    )
    .unwrap();
    assert_eq!(values(&outcome.codes), ["A1", "B2"]);
}

#[test]
fn test_end_of_input_finishes_session() {
    let session = RefinementSession::start(codes(&["A1"]), Layout::default()).unwrap();
    let mut input = Cursor::new("- A1");
    let outcome = run_refinement(
        session,
        &mut input,
        &mut Vec::new(),
        &mut TerminalSink::new(Vec::new()),
    )
    .unwrap();
    assert!(outcome.codes.is_empty());
}

#[test]
fn test_selection_reprompts_until_valid() {
    let matches = vec!["b.docx".into(), "a.docx".into()];
    let mut input = Cursor::new("x\n5\n2\n");
    let mut output = Vec::new();

    let chosen = select_document(matches, &mut input, &mut output).unwrap();

    assert_eq!(chosen, Path::new("a.docx"));
    let text = String::from_utf8(output).unwrap();
    assert!(text.contains("!! You must select a number"));
    assert!(text.contains("!! Your selection must be within 1 and 2"));
    assert_eq!(text.matches("Select correct file (1-2): ").count(), 3);
    assert!(text.contains("[ 1]: "));
}

#[test]
fn test_selection_aborts_at_end_of_input() {
    let matches = vec!["b.docx".into(), "a.docx".into()];
    let result = select_document(matches, &mut Cursor::new(""), &mut Vec::new());
    assert!(result.is_err());
}

#[test]
fn test_workflow_prints_refined_codes() {
    let dir = TempDir::new().unwrap();
    write_docx(
        dir.path(),
        "2024-05-02 Doe, Jane.docx",
        &["Hypertension I10", "Diabetes E11.9, again I10"],
    );
    write_docx(dir.path(), "2024-05-02 Roe, Rick.docx", &["J45.0"]);
    let page = dir.path().join("page.txt");
    let settings = settings_for(dir.path());

    let mut input = Cursor::new("doe\n+ Z99 - E11.9\n\n");
    let mut output = Vec::new();
    let mut preview = TerminalSink::new(Vec::new()).compact();
    let mut sink = FileSink::new(&page);

    let summary = run_workflow(
        &settings,
        DocumentTarget::Prompt,
        &mut input,
        &mut output,
        &mut preview,
        &mut sink,
    )
    .unwrap();

    assert_eq!(summary.extracted, 3);
    assert_eq!(values(&summary.codes), ["I10", "Z99"]);
    let printed = std::fs::read_to_string(&page).unwrap();
    assert_eq!(printed, summary.rendering);
    assert!(printed.starts_with(&"\n".repeat(34)));
    assert!(String::from_utf8(output).unwrap().starts_with("Name: "));
}

#[test]
fn test_workflow_reports_missing_document() {
    let dir = TempDir::new().unwrap();
    write_docx(dir.path(), "Roe, Rick.docx", &["J45.0"]);
    let settings = settings_for(dir.path());
    let page = dir.path().join("page.txt");

    let result = run_workflow(
        &settings,
        DocumentTarget::Name("Doe".to_string()),
        &mut Cursor::new(""),
        &mut Vec::new(),
        &mut TerminalSink::new(Vec::new()),
        &mut FileSink::new(&page),
    );

    let message = format!("{:#}", result.unwrap_err());
    assert!(message.contains("could not find any files matching <doe>"));
    assert!(!page.exists());
}

#[test]
fn test_workflow_rejects_overfull_document() {
    let dir = TempDir::new().unwrap();
    let row = (1..=6).map(|n| format!("A{n}")).collect::<Vec<_>>().join(" ");
    write_docx(dir.path(), "Doe.docx", &[&row, "B1 B2 B3 B4 B5 B6"]);
    let mut settings = settings_for(dir.path());
    settings.layout.row_length = std::num::NonZeroUsize::new(2).unwrap();

    let result = run_workflow(
        &settings,
        DocumentTarget::File(dir.path().join("Doe.docx")),
        &mut Cursor::new(""),
        &mut Vec::new(),
        &mut TerminalSink::new(Vec::new()),
        &mut TerminalSink::new(Vec::new()),
    );

    let message = result.unwrap_err().to_string();
    assert_eq!(
        message,
        "too many diagnoses to fit on paper: 12 (current max: 8)"
    );
}
