/// A file part received with an analysis request.
#[derive(Debug, Clone, PartialEq)]
pub struct UploadedDocument {
    pub filename: String,
    pub data: Vec<u8>,
}

impl UploadedDocument {
    pub fn new(filename: impl Into<String>, data: Vec<u8>) -> Self {
        Self {
            filename: filename.into(),
            data,
        }
    }

    /// A browser submitting an empty file input sends a part with no name and no bytes.
    pub fn is_empty(&self) -> bool {
        self.filename.trim().is_empty() && self.data.is_empty()
    }
}

/// Raw inputs of an analysis request, before any validation.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct InferenceRequest {
    pub raw_text: Option<String>,
    pub uploaded_document: Option<UploadedDocument>,
}

impl InferenceRequest {
    pub fn from_text(text: impl Into<String>) -> Self {
        Self {
            raw_text: Some(text.into()),
            uploaded_document: None,
        }
    }

    pub fn from_document(document: UploadedDocument) -> Self {
        Self {
            raw_text: None,
            uploaded_document: Some(document),
        }
    }

    /// Text with whitespace-only values treated as absent.
    pub fn text(&self) -> Option<&str> {
        self.raw_text
            .as_deref()
            .filter(|text| !text.trim().is_empty())
    }

    pub fn document(&self) -> Option<&UploadedDocument> {
        self.uploaded_document.as_ref().filter(|doc| !doc.is_empty())
    }
}

/// Text resolved from a request; never empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizedInput {
    text: String,
}

impl NormalizedInput {
    pub fn new(text: impl Into<String>) -> Option<Self> {
        let text = text.into();
        if text.trim().is_empty() {
            return None;
        }
        Some(Self { text })
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn char_count(&self) -> usize {
        self.text.chars().count()
    }
}
