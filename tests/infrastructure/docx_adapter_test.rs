use std::io::{Cursor, Write};

use halong::application::ports::{DocumentExtractor, ExtractionError};
use halong::domain::{ContentType, Document};
use halong::infrastructure::text_processing::{DocxAdapter, paragraphs_from_document_xml};

const NS: &str = r#"xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main""#;

fn docx_with_body(body: &str) -> Vec<u8> {
    let xml = format!(r#"<?xml version="1.0" encoding="UTF-8"?><w:document {NS}><w:body>{body}</w:body></w:document>"#);
    let mut buffer = Cursor::new(Vec::new());
    {
        let mut zip = zip::ZipWriter::new(&mut buffer);
        let options = zip::write::FileOptions::default();
        zip.start_file("[Content_Types].xml", options).unwrap();
        zip.write_all(b"<Types/>").unwrap();
        zip.start_file("word/document.xml", options).unwrap();
        zip.write_all(xml.as_bytes()).unwrap();
        zip.finish().unwrap();
    }
    buffer.into_inner()
}

fn document(filename: &str, size: usize) -> Document {
    Document::new(filename.to_string(), ContentType::Docx, size as u64)
}

#[test]
fn given_paragraph_runs_when_parsing_xml_then_concatenates_runs_per_paragraph() {
    let xml = r#"<w:body><w:p><w:pPr><w:pStyle w:val="Title"/></w:pPr><w:r><w:t>Hello</w:t></w:r><w:r><w:t xml:space="preserve"> world</w:t></w:r></w:p><w:p><w:r><w:t>Second</w:t></w:r></w:p></w:body>"#;

    let paragraphs = paragraphs_from_document_xml(xml).unwrap();

    assert_eq!(paragraphs, vec!["Hello world", "Second"]);
}

#[test]
fn given_self_closing_paragraph_when_parsing_xml_then_yields_empty_line_without_swallowing_next() {
    let xml = r#"<w:p w:rsidR="00A1"/><w:p w:rsidR="00A2"><w:r><w:t>After</w:t></w:r></w:p>"#;

    let paragraphs = paragraphs_from_document_xml(xml).unwrap();

    assert_eq!(paragraphs, vec!["", "After"]);
}

#[test]
fn given_entities_and_tabs_when_parsing_xml_then_unescapes_and_keeps_controls() {
    let xml = r#"<w:p><w:r><w:t>R&amp;D &lt;2024&gt; &#x1EC7;</w:t><w:tab/><w:t>next</w:t><w:br/><w:t>line</w:t></w:r></w:p>"#;

    let paragraphs = paragraphs_from_document_xml(xml).unwrap();

    assert_eq!(paragraphs, vec!["R&D <2024> ệ\tnext\nline"]);
}

#[test]
fn given_text_box_in_alternate_content_when_parsing_xml_then_reads_it_once_and_keeps_outer_tail() {
    let xml = r#"<w:body><w:p><w:r><w:t>Before box</w:t></w:r><w:r><mc:AlternateContent><mc:Choice Requires="wps"><w:drawing><w:txbxContent><w:p><w:r><w:t>Boxed</w:t></w:r></w:p></w:txbxContent></w:drawing></mc:Choice><mc:Fallback><w:pict><w:txbxContent><w:p><w:r><w:t>Boxed</w:t></w:r></w:p></w:txbxContent></w:pict></mc:Fallback></mc:AlternateContent></w:r><w:r><w:t xml:space="preserve"> after box</w:t></w:r></w:p></w:body>"#;

    let paragraphs = paragraphs_from_document_xml(xml).unwrap();

    assert_eq!(paragraphs, vec!["Boxed", "Before box after box"]);
}

#[test]
fn given_unbalanced_markup_when_parsing_xml_then_fails_with_extraction_error() {
    let xml = "<w:body><w:p><w:r><w:t>open</w:r></w:p></w:body>";

    let result = paragraphs_from_document_xml(xml);

    assert!(matches!(result, Err(ExtractionError::ExtractionFailed(_))));
}

#[tokio::test]
async fn given_body_inflating_past_limit_when_extracting_then_rejects_without_parsing() {
    let filler = "a".repeat(64 * 1024);
    let data = docx_with_body(&format!("<w:p><w:r><w:t>{filler}</w:t></w:r></w:p>"));
    let adapter = DocxAdapter::with_max_body_xml_bytes(16 * 1024);

    let result = adapter
        .extract_text(&data, &document("bomb.docx", data.len()))
        .await;

    assert!(data.len() < 16 * 1024);
    assert!(
        matches!(result, Err(ExtractionError::ExtractionFailed(message)) if message.contains("limit"))
    );
}

#[tokio::test]
async fn given_valid_docx_when_extracting_then_returns_paragraph_text() {
    let data = docx_with_body(
        "<w:p><w:r><w:t>Việt Nam là một quốc gia.</w:t></w:r></w:p><w:p/><w:p><w:r><w:t>Second   paragraph</w:t></w:r></w:p>",
    );
    let adapter = DocxAdapter::new();

    let text = adapter
        .extract_text(&data, &document("vn.docx", data.len()))
        .await
        .unwrap();

    assert_eq!(text, "Việt Nam là một quốc gia.\n\nSecond paragraph");
}

#[tokio::test]
async fn given_docx_without_text_when_extracting_then_fails_with_no_text_found() {
    let data = docx_with_body("<w:p/><w:p><w:r><w:t>   </w:t></w:r></w:p>");
    let adapter = DocxAdapter::new();

    let result = adapter
        .extract_text(&data, &document("empty.docx", data.len()))
        .await;

    assert!(matches!(result, Err(ExtractionError::NoTextFound(name)) if name == "empty.docx"));
}

#[tokio::test]
async fn given_bytes_that_are_not_a_zip_when_extracting_then_fails_with_extraction_error() {
    let data = b"definitely not a zip archive".to_vec();
    let adapter = DocxAdapter::new();

    let result = adapter
        .extract_text(&data, &document("broken.docx", data.len()))
        .await;

    assert!(matches!(result, Err(ExtractionError::ExtractionFailed(_))));
}

#[tokio::test]
async fn given_zip_without_document_part_when_extracting_then_fails_with_extraction_error() {
    let mut buffer = Cursor::new(Vec::new());
    {
        let mut zip = zip::ZipWriter::new(&mut buffer);
        zip.start_file("readme.txt", zip::write::FileOptions::default())
            .unwrap();
        zip.write_all(b"hi").unwrap();
        zip.finish().unwrap();
    }
    let data = buffer.into_inner();
    let adapter = DocxAdapter::new();

    let result = adapter
        .extract_text(&data, &document("odd.docx", data.len()))
        .await;

    assert!(matches!(result, Err(ExtractionError::ExtractionFailed(_))));
}
