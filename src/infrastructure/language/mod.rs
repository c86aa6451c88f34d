mod mock_language_detector;
mod whatlang_detector;

pub use mock_language_detector::MockLanguageDetector;
pub use whatlang_detector::WhatlangDetector;
