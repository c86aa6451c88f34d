use halong::domain::{ContentType, Document};

#[test]
fn given_docx_filename_when_resolving_content_type_then_returns_docx() {
    assert_eq!(ContentType::from_filename("report.docx"), Some(ContentType::Docx));
    assert_eq!(ContentType::from_filename("Report.DocX"), Some(ContentType::Docx));
}

#[test]
fn given_bare_extension_as_filename_when_resolving_content_type_then_returns_docx() {
    assert_eq!(ContentType::from_filename(".docx"), Some(ContentType::Docx));
    assert_eq!(ContentType::from_filename(".DOCX"), Some(ContentType::Docx));
}

#[test]
fn given_other_extensions_when_resolving_content_type_then_returns_none() {
    assert_eq!(ContentType::from_filename("notes.txt"), None);
    assert_eq!(ContentType::from_filename("legacy.doc"), None);
    assert_eq!(ContentType::from_filename("docx"), None);
    assert_eq!(ContentType::from_filename(""), None);
}

#[test]
fn given_docx_content_type_when_describing_then_returns_office_mime() {
    assert_eq!(
        ContentType::Docx.as_mime(),
        "application/vnd.openxmlformats-officedocument.wordprocessingml.document"
    );
}

#[test]
fn given_document_when_created_then_keeps_metadata() {
    let doc = Document::new("a.docx".to_string(), ContentType::Docx, 42);

    assert_eq!(doc.filename, "a.docx");
    assert_eq!(doc.content_type, ContentType::Docx);
    assert_eq!(doc.size_bytes, 42);
}
