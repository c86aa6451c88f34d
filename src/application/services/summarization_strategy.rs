use std::sync::Arc;
use std::time::Duration;

use crate::application::ports::{GenerationRequest, InferenceError};
use crate::domain::{Language, SummaryResult};

use super::bounded_inference::run_bounded;
use super::model_registry::ModelRegistry;

pub struct SummarizationStrategy {
    registry: Arc<ModelRegistry>,
    timeout: Duration,
}

impl SummarizationStrategy {
    pub fn new(registry: Arc<ModelRegistry>, timeout: Duration) -> Self {
        Self { registry, timeout }
    }

    #[tracing::instrument(skip(self, text), fields(language = %language, chars = text.len()))]
    pub async fn summarize(
        &self,
        text: &str,
        language: Language,
    ) -> Result<SummaryResult, InferenceError> {
        let binding = self.registry.summarizer(language)?;

        let request = GenerationRequest {
            prompt: format!("{}{}", binding.input_prefix, text),
            params: binding.params.clone(),
        };

        let summary = run_bounded(self.timeout, binding.generator.generate(&request)).await?;

        tracing::debug!(summary_chars = summary.len(), "Summary generated");

        Ok(SummaryResult {
            text: summary.trim().to_string(),
        })
    }
}
