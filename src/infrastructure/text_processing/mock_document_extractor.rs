use crate::application::ports::{DocumentExtractor, ExtractionError};
use crate::domain::Document;

/// Treats the uploaded bytes as UTF-8 text.
pub struct MockDocumentExtractor;

#[async_trait::async_trait]
impl DocumentExtractor for MockDocumentExtractor {
    async fn extract_text(&self, data: &[u8], doc: &Document) -> Result<String, ExtractionError> {
        let text = String::from_utf8(data.to_vec())
            .map_err(|e| ExtractionError::ExtractionFailed(e.to_string()))?;
        if text.trim().is_empty() {
            return Err(ExtractionError::NoTextFound(doc.filename.clone()));
        }
        Ok(text)
    }
}
