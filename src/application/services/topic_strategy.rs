use std::cmp::Ordering;
use std::sync::Arc;
use std::time::Duration;

use crate::application::ports::{ClassificationRequest, InferenceError, LabelScore};
use crate::domain::{Language, TopicResult, TopicScore};

use super::bounded_inference::run_bounded;
use super::model_registry::ModelRegistry;

pub const DEFAULT_TOP_K: usize = 3;

pub struct TopicStrategy {
    registry: Arc<ModelRegistry>,
    timeout: Duration,
    top_k: usize,
}

impl TopicStrategy {
    pub fn new(registry: Arc<ModelRegistry>, timeout: Duration, top_k: usize) -> Self {
        Self {
            registry,
            timeout,
            top_k,
        }
    }

    #[tracing::instrument(skip(self, text), fields(language = %language, chars = text.len()))]
    pub async fn classify_topic(
        &self,
        text: &str,
        language: Language,
    ) -> Result<TopicResult, InferenceError> {
        let binding = self.registry.topic(language)?;

        let request = ClassificationRequest {
            text,
            labels: binding.labels.labels(),
            hypothesis_template: &binding.hypothesis_template,
            multi_label: binding.multi_label,
        };

        let scores = run_bounded(self.timeout, binding.classifier.classify(&request)).await?;
        let topics = top_topics(scores, self.top_k);

        tracing::debug!(
            top_label = topics.first().map(|t| t.label.as_str()).unwrap_or(""),
            "Topics classified"
        );

        Ok(TopicResult { topics })
    }
}

/// Sorts by descending score, keeps `top_k`, rounds scores to three decimals.
pub fn top_topics(mut scores: Vec<LabelScore>, top_k: usize) -> Vec<TopicScore> {
    scores.sort_by(|a, b| b.score.partial_cmp(&a.score).unwrap_or(Ordering::Equal));
    scores
        .into_iter()
        .take(top_k)
        .map(|s| TopicScore {
            label: s.label,
            score: round_score(s.score),
        })
        .collect()
}

pub fn round_score(score: f32) -> f32 {
    (score.clamp(0.0, 1.0) * 1000.0).round() / 1000.0
}
