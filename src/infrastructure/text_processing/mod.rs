mod docx_adapter;
mod mock_document_extractor;
mod text_sanitizer;

pub use docx_adapter::{DEFAULT_MAX_BODY_XML_BYTES, DocxAdapter, paragraphs_from_document_xml};
pub use mock_document_extractor::MockDocumentExtractor;
pub use text_sanitizer::sanitize_extracted_text;
