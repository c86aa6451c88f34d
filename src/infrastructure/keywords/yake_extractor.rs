use std::collections::HashSet;

use unicode_normalization::UnicodeNormalization;
use yake_rust::{Config, StopWords, get_n_best};

use crate::application::ports::{KeywordExtractor, ScoredKeyword};
use crate::domain::Language;

/// Corpus-free YAKE keyword extraction over single-word candidates.
///
/// Lower scores mean more relevant; results come back most relevant first.
/// English drops the bundled English stopwords during scoring. Vietnamese
/// has no bundled list and relies on the caller's post-filter.
pub struct YakeKeywordExtractor {
    config: Config,
    english: StopWords,
    vietnamese: StopWords,
}

impl Default for YakeKeywordExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl YakeKeywordExtractor {
    pub fn new() -> Self {
        let english = StopWords::predefined("en").unwrap_or_else(|| {
            tracing::warn!("No bundled English stopwords, scoring without them");
            StopWords::custom(HashSet::new())
        });

        Self {
            config: Config {
                ngrams: 1,
                ..Config::default()
            },
            english,
            vietnamese: StopWords::custom(HashSet::new()),
        }
    }

    fn stopwords(&self, language: Language) -> &StopWords {
        match language {
            Language::English => &self.english,
            Language::Vietnamese => &self.vietnamese,
        }
    }
}

impl KeywordExtractor for YakeKeywordExtractor {
    fn extract(&self, text: &str, language: Language, top: usize) -> Vec<ScoredKeyword> {
        if top == 0 {
            return Vec::new();
        }

        let composed: String = text.nfc().collect();
        get_n_best(top, &composed, self.stopwords(language), &self.config)
            .into_iter()
            .map(|item| ScoredKeyword {
                keyword: item.raw,
                score: item.score,
            })
            .collect()
    }
}
