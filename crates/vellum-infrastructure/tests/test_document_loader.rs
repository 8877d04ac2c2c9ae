use std::fs;
use tempfile::TempDir;
use vellum_core::VellumError;
use vellum_core::document::PDF_MIME_TYPE;
use vellum_infrastructure::load_document;

#[test]
fn test_load_pdf_document() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("Resume.PDF");
    fs::write(&path, b"%PDF-1.7\n...").unwrap();

    let document = load_document(&path).expect("PDF should load");

    assert_eq!(document.name(), "Resume.PDF");
    assert_eq!(document.mime_type(), PDF_MIME_TYPE);
    assert_eq!(document.bytes(), b"%PDF-1.7\n...");
}

#[test]
fn test_non_pdf_is_rejected() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("resume.docx");
    fs::write(&path, b"PK\x03\x04").unwrap();

    let err = load_document(&path).unwrap_err();
    match err {
        VellumError::UnsupportedDocument { name, .. } => assert_eq!(name, "resume.docx"),
        other => panic!("expected UnsupportedDocument, got {other:?}"),
    }
}

#[test]
fn test_empty_pdf_is_rejected() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("empty.pdf");
    fs::write(&path, b"").unwrap();

    assert!(matches!(
        load_document(&path),
        Err(VellumError::UnsupportedDocument { .. })
    ));
}

#[test]
fn test_missing_file_is_io_error() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("missing.pdf");

    assert!(matches!(load_document(&path), Err(VellumError::Io { .. })));
}
