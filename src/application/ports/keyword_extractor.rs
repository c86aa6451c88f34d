use crate::domain::Language;

#[derive(Debug, Clone, PartialEq)]
pub struct ScoredKeyword {
    pub keyword: String,
    /// Extractor-specific relevance score; only the returned order is meaningful.
    pub score: f64,
}

/// Unsupervised single-word keyword extraction.
pub trait KeywordExtractor: Send + Sync {
    /// Returns at most `top` candidates, most relevant first.
    fn extract(&self, text: &str, language: Language, top: usize) -> Vec<ScoredKeyword>;
}
