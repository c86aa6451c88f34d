use crate::domain::LanguageTag;

/// Classifies text into a language. Detection is cheap and runs inline.
pub trait LanguageDetector: Send + Sync {
    fn detect(&self, text: &str) -> Result<LanguageTag, DetectionError>;
}

#[derive(Debug, thiserror::Error)]
pub enum DetectionError {
    #[error("language could not be determined")]
    Undetermined,
    #[error("detector failed: {0}")]
    Failed(String),
}
