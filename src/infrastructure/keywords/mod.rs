mod yake_extractor;

pub use yake_extractor::YakeKeywordExtractor;
