use halong::application::ports::{DetectionError, LanguageDetector};
use halong::domain::{Language, LanguageTag};
use halong::infrastructure::language::{MockLanguageDetector, WhatlangDetector};

#[test]
fn given_english_sentence_when_detecting_then_returns_english() {
    let detector = WhatlangDetector::new();

    let tag = detector
        .detect("Hello world, this is a simple English sentence for testing.")
        .unwrap();

    assert_eq!(tag, LanguageTag::Supported(Language::English));
}

#[test]
fn given_vietnamese_sentence_when_detecting_then_returns_vietnamese() {
    let detector = WhatlangDetector::new();

    let tag = detector
        .detect("Hôm nay trời đẹp, chúng tôi đi dạo trong công viên gần nhà và uống cà phê.")
        .unwrap();

    assert_eq!(tag, LanguageTag::Supported(Language::Vietnamese));
}

#[test]
fn given_french_sentence_when_detecting_then_returns_unsupported_code() {
    let detector = WhatlangDetector::new();

    let tag = detector
        .detect("Bonjour tout le monde, je suis très content de vous voir aujourd'hui.")
        .unwrap();

    assert_eq!(tag, LanguageTag::Unsupported("fra".to_string()));
    assert_eq!(tag.supported(), None);
}

#[test]
fn given_text_without_letters_when_detecting_then_fails_undetermined() {
    let detector = WhatlangDetector::new();

    let result = detector.detect("12345 !!! 67890");

    assert!(matches!(result, Err(DetectionError::Undetermined)));
}

#[test]
fn given_failing_mock_when_detecting_then_returns_error() {
    let detector = MockLanguageDetector::failing();

    assert!(detector.detect("anything").is_err());
}
