use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use crate::application::ports::{
    GenerationParams, InferenceError, KeywordExtractor, TextGenerator, ZeroShotClassifier,
};
use crate::application::services::{
    KeywordBinding, ModelRegistry, RegistryError, SummarizerBinding, TopicBinding,
};
use crate::domain::{CandidateLabelSet, Language, StopwordSet};
use crate::infrastructure::keywords::YakeKeywordExtractor;
use crate::presentation::config::{
    GenerationSettings, ModelProvider, ModelSettings, SummarizerModelSettings, TopicSettings,
};

use super::candle_nli_classifier::CandleNliClassifier;
use super::candle_t5_generator::CandleT5Generator;
use super::mock_text_generator::MockTextGenerator;
use super::mock_zero_shot_classifier::MockZeroShotClassifier;
use super::model_loader::ModelSource;

pub struct ModelRegistryFactory;

#[derive(Debug, thiserror::Error)]
pub enum ModelRegistryFactoryError {
    #[error("model initialization failed: {0}")]
    InitializationFailed(#[from] InferenceError),
    #[error("model registry incomplete: {0}")]
    Registry(#[from] RegistryError),
}

impl ModelRegistryFactory {
    /// Loads every (task, language) resource up front. Any failure aborts.
    pub fn create(
        provider: ModelProvider,
        settings: &ModelSettings,
        labels: CandidateLabelSet,
        vietnamese_stopwords: StopwordSet,
        mock_delay: Duration,
    ) -> Result<ModelRegistry, ModelRegistryFactoryError> {
        let (generators, classifier) = match provider {
            ModelProvider::Local => Self::load_local(settings)?,
            ModelProvider::Mock => {
                tracing::info!("Using mock inference resources");
                let generator: Arc<dyn TextGenerator> =
                    Arc::new(MockTextGenerator::with_delay(mock_delay));
                let classifier: Arc<dyn ZeroShotClassifier> =
                    Arc::new(MockZeroShotClassifier::with_delay(mock_delay));
                (
                    [Arc::clone(&generator), generator],
                    classifier,
                )
            }
        };
        let [en_generator, vi_generator] = generators;

        let params = generation_params(&settings.generation);
        let extractor: Arc<dyn KeywordExtractor> = Arc::new(YakeKeywordExtractor::new());
        let labels = Arc::new(labels);
        let vietnamese_stopwords = Arc::new(vietnamese_stopwords);

        let topic = |template: &str| TopicBinding {
            classifier: Arc::clone(&classifier),
            labels: Arc::clone(&labels),
            hypothesis_template: template.to_string(),
            multi_label: settings.topic.multi_label,
        };

        let registry = ModelRegistry::builder()
            .summarizer(
                Language::English,
                SummarizerBinding {
                    generator: en_generator,
                    input_prefix: settings.summarization.en.input_prefix.clone(),
                    params: params.clone(),
                },
            )
            .summarizer(
                Language::Vietnamese,
                SummarizerBinding {
                    generator: vi_generator,
                    input_prefix: settings.summarization.vi.input_prefix.clone(),
                    params,
                },
            )
            .keywords(
                Language::English,
                KeywordBinding {
                    extractor: Arc::clone(&extractor),
                    post_filter: None,
                },
            )
            .keywords(
                Language::Vietnamese,
                KeywordBinding {
                    extractor,
                    post_filter: Some(vietnamese_stopwords),
                },
            )
            .topic(Language::English, topic(&settings.topic.en_template))
            .topic(Language::Vietnamese, topic(&settings.topic.vi_template))
            .build()?;

        tracing::info!(resources = registry.len(), "Model registry ready");

        Ok(registry)
    }

    #[allow(clippy::type_complexity)]
    fn load_local(
        settings: &ModelSettings,
    ) -> Result<([Arc<dyn TextGenerator>; 2], Arc<dyn ZeroShotClassifier>), InferenceError> {
        let mut loaded: HashMap<ModelSource, Arc<dyn TextGenerator>> = HashMap::new();
        let mut summarizer =
            |model: &SummarizerModelSettings| -> Result<Arc<dyn TextGenerator>, InferenceError> {
                let source = summarizer_source(model);
                if let Some(existing) = loaded.get(&source) {
                    tracing::info!(model = %source.model_id, "Reusing loaded summarization model");
                    return Ok(Arc::clone(existing));
                }
                let generator: Arc<dyn TextGenerator> =
                    Arc::new(CandleT5Generator::new(&source)?);
                loaded.insert(source, Arc::clone(&generator));
                Ok(generator)
            };

        let en = summarizer(&settings.summarization.en)?;
        let vi = summarizer(&settings.summarization.vi)?;

        let classifier = CandleNliClassifier::new(
            &topic_source(&settings.topic),
            settings.topic.max_input_tokens,
        )?;

        Ok(([en, vi], Arc::new(classifier)))
    }
}

pub fn summarizer_source(settings: &SummarizerModelSettings) -> ModelSource {
    ModelSource {
        model_id: settings.model_id.clone(),
        revision: settings.revision.clone(),
        tokenizer_repo: settings.tokenizer_repo.clone(),
        tokenizer_file: settings.tokenizer_file.clone(),
    }
}

pub fn topic_source(settings: &TopicSettings) -> ModelSource {
    ModelSource {
        model_id: settings.model_id.clone(),
        revision: settings.revision.clone(),
        tokenizer_repo: settings.tokenizer_repo.clone(),
        tokenizer_file: settings.tokenizer_file.clone(),
    }
}

pub fn generation_params(settings: &GenerationSettings) -> GenerationParams {
    GenerationParams {
        max_input_tokens: settings.max_input_tokens,
        num_beams: settings.num_beams,
        min_length: settings.min_length,
        max_length: settings.max_length,
        length_penalty: settings.length_penalty,
        no_repeat_ngram_size: settings.no_repeat_ngram_size,
    }
}
