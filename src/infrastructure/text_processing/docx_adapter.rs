use std::io::{Cursor, Read};
use std::time::Duration;

use async_trait::async_trait;
use quick_xml::events::{BytesStart, Event};
use quick_xml::reader::Reader;

use crate::application::ports::{DocumentExtractor, ExtractionError};
use crate::domain::{ContentType, Document};

use super::text_sanitizer::sanitize_extracted_text;

const EXTRACTION_TIMEOUT: Duration = Duration::from_secs(30);
const BODY_PART: &str = "word/document.xml";
pub const DEFAULT_MAX_BODY_XML_BYTES: u64 = 32 * 1024 * 1024;

/// Reads the body paragraphs of an Office Open XML word-processing document.
pub struct DocxAdapter {
    max_body_xml_bytes: u64,
}

impl Default for DocxAdapter {
    fn default() -> Self {
        Self::new()
    }
}

impl DocxAdapter {
    pub fn new() -> Self {
        Self::with_max_body_xml_bytes(DEFAULT_MAX_BODY_XML_BYTES)
    }

    /// Caps the inflated size of `word/document.xml`; larger parts are rejected unread.
    pub fn with_max_body_xml_bytes(max_body_xml_bytes: u64) -> Self {
        Self { max_body_xml_bytes }
    }

    fn read_body_xml(data: &[u8], limit: u64) -> Result<String, ExtractionError> {
        let mut archive = zip::ZipArchive::new(Cursor::new(data)).map_err(|e| {
            ExtractionError::ExtractionFailed(format!("not a docx container: {e}"))
        })?;

        let part = archive.by_name(BODY_PART).map_err(|e| {
            ExtractionError::ExtractionFailed(format!("missing {BODY_PART}: {e}"))
        })?;

        if part.size() > limit {
            return Err(oversized(part.size(), limit));
        }

        // Declared sizes come from the upload itself; bound the read as well.
        let mut bytes = Vec::new();
        part.take(limit + 1).read_to_end(&mut bytes).map_err(|e| {
            ExtractionError::ExtractionFailed(format!("failed to read {BODY_PART}: {e}"))
        })?;
        if bytes.len() as u64 > limit {
            return Err(oversized(bytes.len() as u64, limit));
        }

        String::from_utf8(bytes).map_err(|e| {
            ExtractionError::ExtractionFailed(format!("{BODY_PART} is not UTF-8: {e}"))
        })
    }
}

fn oversized(size: u64, limit: u64) -> ExtractionError {
    tracing::warn!(size, limit, "Rejected oversized docx body");
    ExtractionError::ExtractionFailed(format!(
        "{BODY_PART} inflates to {size} bytes, limit is {limit}"
    ))
}

fn is_element(element: &[u8], local: &[u8]) -> bool {
    element.strip_prefix(b"w:").is_some_and(|name| name == local)
}

/// One line per `<w:p>`, in the order paragraphs close.
///
/// Paragraphs nested inside text boxes come out as their own lines and the
/// enclosing paragraph keeps its remaining runs. `mc:Fallback` copies of
/// alternate content are skipped so text boxes are not read twice.
pub fn paragraphs_from_document_xml(xml: &str) -> Result<Vec<String>, ExtractionError> {
    let mut reader = Reader::from_str(xml);
    let mut paragraphs = Vec::new();
    let mut open: Vec<String> = Vec::new();
    let mut in_text = false;
    let mut skipped_depth = 0usize;

    loop {
        let event = reader.read_event().map_err(|e| {
            ExtractionError::ExtractionFailed(format!(
                "malformed {BODY_PART} at byte {}: {e}",
                reader.buffer_position()
            ))
        })?;

        if skipped_depth > 0 {
            match event {
                Event::Start(_) => skipped_depth += 1,
                Event::End(_) => skipped_depth -= 1,
                Event::Eof => break,
                _ => {}
            }
            continue;
        }

        match event {
            Event::Start(element) => match element.name().as_ref() {
                b"mc:Fallback" => skipped_depth = 1,
                name if is_element(name, b"pPr") => skipped_depth = 1,
                name if is_element(name, b"p") => open.push(String::new()),
                name if is_element(name, b"t") => in_text = true,
                _ => {}
            },
            Event::Empty(element) => push_control(&element, &mut open, &mut paragraphs),
            Event::Text(text) if in_text => {
                let unescaped = text.unescape().map_err(|e| {
                    ExtractionError::ExtractionFailed(format!("bad entity in {BODY_PART}: {e}"))
                })?;
                if let Some(current) = open.last_mut() {
                    current.push_str(&unescaped);
                }
            }
            Event::End(element) => match element.name().as_ref() {
                name if is_element(name, b"t") => in_text = false,
                name if is_element(name, b"p") => {
                    if let Some(finished) = open.pop() {
                        paragraphs.push(finished);
                    }
                }
                _ => {}
            },
            Event::Eof => break,
            _ => {}
        }
    }

    Ok(paragraphs)
}

fn push_control(element: &BytesStart<'_>, open: &mut [String], paragraphs: &mut Vec<String>) {
    let name = element.name();
    let name = name.as_ref();
    if is_element(name, b"p") {
        paragraphs.push(String::new());
        return;
    }

    let control = if is_element(name, b"tab") {
        '\t'
    } else if is_element(name, b"br") || is_element(name, b"cr") {
        '\n'
    } else {
        return;
    };
    if let Some(current) = open.last_mut() {
        current.push(control);
    }
}

#[async_trait]
impl DocumentExtractor for DocxAdapter {
    #[tracing::instrument(
        skip(self, data),
        fields(filename = %document.filename, size_bytes = document.size_bytes)
    )]
    async fn extract_text(
        &self,
        data: &[u8],
        document: &Document,
    ) -> Result<String, ExtractionError> {
        if document.content_type != ContentType::Docx {
            return Err(ExtractionError::UnsupportedContentType(
                document.content_type.as_mime().to_string(),
            ));
        }

        let data_owned = data.to_vec();
        let limit = self.max_body_xml_bytes;

        let paragraphs = tokio::time::timeout(
            EXTRACTION_TIMEOUT,
            tokio::task::spawn_blocking(move || {
                Self::read_body_xml(&data_owned, limit)
                    .and_then(|xml| paragraphs_from_document_xml(&xml))
            }),
        )
        .await
        .map_err(|_| ExtractionError::ExtractionFailed("docx extraction timed out".to_string()))?
        .map_err(|e| ExtractionError::ExtractionFailed(format!("task join error: {e}")))??;

        let text = sanitize_extracted_text(&paragraphs.join("\n"));

        tracing::info!(
            paragraphs = paragraphs.len(),
            chars = text.len(),
            "Docx text extraction complete"
        );

        if text.is_empty() {
            return Err(ExtractionError::NoTextFound(document.filename.clone()));
        }

        Ok(text)
    }
}
