use std::sync::Arc;
use std::time::Duration;

use crate::application::ports::{
    DocumentExtractor, ExtractionError, InferenceError, LanguageDetector,
};
use crate::domain::{
    AnalysisResponse, ContentType, Document, InferenceRequest, InferenceResult, Language,
    NormalizedInput, Task, UploadedDocument,
};
use crate::infrastructure::observability::sanitize_for_log;

use super::keyword_strategy::{DEFAULT_MAX_KEYWORDS, KeywordStrategy};
use super::model_registry::ModelRegistry;
use super::summarization_strategy::SummarizationStrategy;
use super::topic_strategy::{DEFAULT_TOP_K, TopicStrategy};

#[derive(Debug, Clone)]
pub struct PipelineOptions {
    pub inference_timeout: Duration,
    pub max_keywords: usize,
    pub topic_top_k: usize,
}

impl Default for PipelineOptions {
    fn default() -> Self {
        Self {
            inference_timeout: Duration::from_secs(120),
            max_keywords: DEFAULT_MAX_KEYWORDS,
            topic_top_k: DEFAULT_TOP_K,
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    #[error("missing 'text' or document input")]
    MissingInput,
    #[error("unsupported file type: {0}")]
    UnsupportedFileType(String),
    #[error("document extraction: {0}")]
    Extraction(#[from] ExtractionError),
    #[error("unsupported language: {}", detected.as_deref().unwrap_or("unknown"))]
    UnsupportedLanguage { detected: Option<String> },
    #[error("inference: {0}")]
    Inference(#[from] InferenceError),
}

/// Validates a request, resolves its text and language, and dispatches it to a task strategy.
///
/// Every validation gate runs before any model is touched.
pub struct RequestPipeline<E, D>
where
    E: DocumentExtractor,
    D: LanguageDetector,
{
    extractor: Arc<E>,
    detector: Arc<D>,
    summarization: SummarizationStrategy,
    keywords: KeywordStrategy,
    topic: TopicStrategy,
    max_keywords: usize,
}

impl<E, D> RequestPipeline<E, D>
where
    E: DocumentExtractor,
    D: LanguageDetector,
{
    pub fn new(
        extractor: Arc<E>,
        detector: Arc<D>,
        registry: Arc<ModelRegistry>,
        options: PipelineOptions,
    ) -> Self {
        Self {
            extractor,
            detector,
            summarization: SummarizationStrategy::new(
                Arc::clone(&registry),
                options.inference_timeout,
            ),
            keywords: KeywordStrategy::new(Arc::clone(&registry), options.inference_timeout),
            topic: TopicStrategy::new(registry, options.inference_timeout, options.topic_top_k),
            max_keywords: options.max_keywords,
        }
    }

    pub async fn handle(
        &self,
        task: Task,
        request: InferenceRequest,
    ) -> Result<AnalysisResponse, PipelineError> {
        let input = self.normalize(request).await?;
        let language = self.detect_language(&input)?;

        tracing::debug!(
            task = %task,
            language = %language,
            chars = input.char_count(),
            preview = %sanitize_for_log(input.text()),
            "Dispatching analysis request"
        );

        let text = input.text();
        let result = match task {
            Task::Summarize => InferenceResult::Summary(
                self.summarization.summarize(text, language).await?,
            ),
            Task::Keywords => InferenceResult::Keywords(
                self.keywords
                    .extract_keywords(text, language, self.max_keywords)
                    .await?,
            ),
            Task::Topic => InferenceResult::Topics(self.topic.classify_topic(text, language).await?),
        };

        Ok(AnalysisResponse { language, result })
    }

    /// Resolves the request to non-empty text; an uploaded document wins over raw text.
    async fn normalize(&self, request: InferenceRequest) -> Result<NormalizedInput, PipelineError> {
        if let Some(upload) = request.document() {
            return self.extract_document(upload).await;
        }

        request
            .text()
            .and_then(NormalizedInput::new)
            .ok_or(PipelineError::MissingInput)
    }

    async fn extract_document(
        &self,
        upload: &UploadedDocument,
    ) -> Result<NormalizedInput, PipelineError> {
        let content_type = ContentType::from_filename(&upload.filename).ok_or_else(|| {
            tracing::warn!(filename = %upload.filename, "Rejected upload with unsupported extension");
            PipelineError::UnsupportedFileType(upload.filename.clone())
        })?;

        let document = Document::new(
            upload.filename.clone(),
            content_type,
            upload.data.len() as u64,
        );
        let text = self.extractor.extract_text(&upload.data, &document).await?;

        NormalizedInput::new(text)
            .ok_or_else(|| ExtractionError::NoTextFound(upload.filename.clone()).into())
    }

    fn detect_language(&self, input: &NormalizedInput) -> Result<Language, PipelineError> {
        match self.detector.detect(input.text()) {
            Ok(tag) => tag.supported().ok_or_else(|| {
                tracing::warn!(detected = %tag.code(), "Rejected unsupported language");
                PipelineError::UnsupportedLanguage {
                    detected: Some(tag.code().to_string()),
                }
            }),
            Err(e) => {
                tracing::warn!(error = %e, "Language detection failed");
                Err(PipelineError::UnsupportedLanguage { detected: None })
            }
        }
    }
}
