use std::sync::Arc;
use std::time::Duration;

use crate::application::ports::{InferenceError, ScoredKeyword};
use crate::domain::{KeywordResult, Language, StopwordSet, case_fold};

use super::bounded_inference::run_bounded;
use super::model_registry::ModelRegistry;

pub const DEFAULT_MAX_KEYWORDS: usize = 10;

/// Candidates requested per returned keyword, leaving room for post-filtering.
const CANDIDATE_OVERSHOOT: usize = 2;

pub struct KeywordStrategy {
    registry: Arc<ModelRegistry>,
    timeout: Duration,
}

impl KeywordStrategy {
    pub fn new(registry: Arc<ModelRegistry>, timeout: Duration) -> Self {
        Self { registry, timeout }
    }

    #[tracing::instrument(skip(self, text), fields(language = %language, chars = text.len()))]
    pub async fn extract_keywords(
        &self,
        text: &str,
        language: Language,
        max_keywords: usize,
    ) -> Result<KeywordResult, InferenceError> {
        let binding = self.registry.keywords(language)?;
        let extractor = Arc::clone(&binding.extractor);
        let owned_text = text.to_string();
        let requested = max_keywords * CANDIDATE_OVERSHOOT;

        let candidates = run_bounded(self.timeout, async move {
            tokio::task::spawn_blocking(move || {
                extractor.extract(&owned_text, language, requested)
            })
            .await
            .map_err(|e| InferenceError::InferenceFailed(format!("task join error: {e}")))
        })
        .await?;

        let keywords = select_keywords(
            candidates,
            binding.post_filter.as_deref(),
            max_keywords,
        );

        tracing::debug!(keywords = keywords.len(), "Keywords extracted");

        Ok(KeywordResult { keywords })
    }
}

/// Applies the optional stopword filter and truncates, keeping the extractor's order.
pub fn select_keywords(
    candidates: Vec<ScoredKeyword>,
    post_filter: Option<&StopwordSet>,
    max_keywords: usize,
) -> Vec<String> {
    match post_filter {
        Some(stopwords) => candidates
            .into_iter()
            .map(|candidate| case_fold(&candidate.keyword))
            .filter(|keyword| !stopwords.contains(keyword))
            .take(max_keywords)
            .collect(),
        None => candidates
            .into_iter()
            .take(max_keywords)
            .map(|candidate| candidate.keyword)
            .collect(),
    }
}
