use crate::application::ports::{DetectionError, LanguageDetector};
use crate::domain::LanguageTag;

/// Returns a preset result regardless of the text.
pub struct MockLanguageDetector {
    tag: Option<LanguageTag>,
}

impl MockLanguageDetector {
    pub fn fixed(tag: LanguageTag) -> Self {
        Self { tag: Some(tag) }
    }

    pub fn failing() -> Self {
        Self { tag: None }
    }
}

impl LanguageDetector for MockLanguageDetector {
    fn detect(&self, _text: &str) -> Result<LanguageTag, DetectionError> {
        self.tag.clone().ok_or(DetectionError::Undetermined)
    }
}
