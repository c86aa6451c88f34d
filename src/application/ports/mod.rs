mod document_extractor;
mod inference_error;
mod keyword_extractor;
mod language_detector;
mod text_generator;
mod zero_shot_classifier;

pub use document_extractor::{DocumentExtractor, ExtractionError};
pub use inference_error::InferenceError;
pub use keyword_extractor::{KeywordExtractor, ScoredKeyword};
pub use language_detector::{DetectionError, LanguageDetector};
pub use text_generator::{GenerationParams, GenerationRequest, TextGenerator};
pub use zero_shot_classifier::{
    ClassificationRequest, LabelScore, ZeroShotClassifier, format_hypothesis,
};
