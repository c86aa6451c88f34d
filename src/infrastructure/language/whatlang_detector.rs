use whatlang::Lang;

use crate::application::ports::{DetectionError, LanguageDetector};
use crate::domain::{Language, LanguageTag};

/// Trigram-based detection; returns the most probable language, reliable or not.
#[derive(Default)]
pub struct WhatlangDetector;

impl WhatlangDetector {
    pub fn new() -> Self {
        Self
    }
}

impl LanguageDetector for WhatlangDetector {
    fn detect(&self, text: &str) -> Result<LanguageTag, DetectionError> {
        let info = whatlang::detect(text).ok_or(DetectionError::Undetermined)?;

        tracing::debug!(
            lang = info.lang().code(),
            confidence = info.confidence(),
            reliable = info.is_reliable(),
            "Language detected"
        );

        Ok(match info.lang() {
            Lang::Eng => LanguageTag::Supported(Language::English),
            Lang::Vie => LanguageTag::Supported(Language::Vietnamese),
            other => LanguageTag::Unsupported(other.code().to_string()),
        })
    }
}
