use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use halong::application::ports::{
    ClassificationRequest, GenerationParams, GenerationRequest, InferenceError, KeywordExtractor,
    LabelScore, ScoredKeyword, TextGenerator, ZeroShotClassifier,
};
use halong::application::services::{
    KeywordBinding, ModelRegistry, SummarizerBinding, TopicBinding,
};
use halong::domain::{CandidateLabelSet, Language, StopwordSet};

pub const EN_TEMPLATE: &str = "This text is about {}.";
pub const VI_TEMPLATE: &str = "Đoạn văn này nói về {}.";

pub fn test_labels() -> CandidateLabelSet {
    CandidateLabelSet::new(
        ["Technology", "Science", "Health", "Sports", "Politics"]
            .iter()
            .map(|l| l.to_string())
            .collect(),
    )
}

pub fn vietnamese_stopwords() -> StopwordSet {
    StopwordSet::new(["và", "của", "là", "những", "được"])
}

enum Reply {
    Text(String),
    Fail,
    Sleep(Duration),
}

pub struct RecordingGenerator {
    reply: Reply,
    calls: AtomicUsize,
    prompts: Mutex<Vec<String>>,
}

impl RecordingGenerator {
    pub fn replying(text: &str) -> Self {
        Self::with(Reply::Text(text.to_string()))
    }

    pub fn failing() -> Self {
        Self::with(Reply::Fail)
    }

    pub fn sleeping(delay: Duration) -> Self {
        Self::with(Reply::Sleep(delay))
    }

    fn with(reply: Reply) -> Self {
        Self {
            reply,
            calls: AtomicUsize::new(0),
            prompts: Mutex::new(Vec::new()),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn prompts(&self) -> Vec<String> {
        self.prompts.lock().unwrap().clone()
    }
}

#[async_trait::async_trait]
impl TextGenerator for RecordingGenerator {
    async fn generate(&self, request: &GenerationRequest) -> Result<String, InferenceError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.prompts.lock().unwrap().push(request.prompt.clone());
        match &self.reply {
            Reply::Text(text) => Ok(text.clone()),
            Reply::Fail => Err(InferenceError::InferenceFailed("out of memory".to_string())),
            Reply::Sleep(delay) => {
                tokio::time::sleep(*delay).await;
                Ok("late".to_string())
            }
        }
    }
}

/// Returns the configured keywords in order, most relevant first.
pub struct FixedKeywordExtractor {
    keywords: Vec<String>,
    calls: AtomicUsize,
    requested: AtomicUsize,
}

impl FixedKeywordExtractor {
    pub fn new(keywords: &[&str]) -> Self {
        Self {
            keywords: keywords.iter().map(|k| k.to_string()).collect(),
            calls: AtomicUsize::new(0),
            requested: AtomicUsize::new(0),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn last_requested(&self) -> usize {
        self.requested.load(Ordering::SeqCst)
    }
}

impl KeywordExtractor for FixedKeywordExtractor {
    fn extract(&self, _text: &str, _language: Language, top: usize) -> Vec<ScoredKeyword> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.requested.store(top, Ordering::SeqCst);
        self.keywords
            .iter()
            .take(top)
            .enumerate()
            .map(|(i, k)| ScoredKeyword {
                keyword: k.clone(),
                score: 0.01 * (i + 1) as f64,
            })
            .collect()
    }
}

/// Assigns scores to labels by position and records the templates it saw.
pub struct ScriptedClassifier {
    scores: Vec<f32>,
    calls: AtomicUsize,
    templates: Mutex<Vec<String>>,
}

impl ScriptedClassifier {
    pub fn new(scores: &[f32]) -> Self {
        Self {
            scores: scores.to_vec(),
            calls: AtomicUsize::new(0),
            templates: Mutex::new(Vec::new()),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn templates(&self) -> Vec<String> {
        self.templates.lock().unwrap().clone()
    }
}

#[async_trait::async_trait]
impl ZeroShotClassifier for ScriptedClassifier {
    async fn classify(
        &self,
        request: &ClassificationRequest<'_>,
    ) -> Result<Vec<LabelScore>, InferenceError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.templates
            .lock()
            .unwrap()
            .push(request.hypothesis_template.to_string());
        Ok(request
            .labels
            .iter()
            .zip(self.scores.iter().chain(std::iter::repeat(&0.0)))
            .map(|(label, score)| LabelScore {
                label: label.clone(),
                score: *score,
            })
            .collect())
    }
}

pub struct Resources {
    pub generator: Arc<RecordingGenerator>,
    pub extractor: Arc<FixedKeywordExtractor>,
    pub classifier: Arc<ScriptedClassifier>,
}

impl Resources {
    pub fn new(
        generator: RecordingGenerator,
        extractor: FixedKeywordExtractor,
        classifier: ScriptedClassifier,
    ) -> Self {
        Self {
            generator: Arc::new(generator),
            extractor: Arc::new(extractor),
            classifier: Arc::new(classifier),
        }
    }

    pub fn default_set() -> Self {
        Self::new(
            RecordingGenerator::replying("A short summary."),
            FixedKeywordExtractor::new(&["rust", "tokio", "axum"]),
            ScriptedClassifier::new(&[0.91, 0.42, 0.77, 0.05, 0.3]),
        )
    }

    pub fn invocations(&self) -> usize {
        self.generator.calls() + self.extractor.calls() + self.classifier.calls()
    }

    pub fn registry(&self) -> ModelRegistry {
        let generator: Arc<dyn TextGenerator> = self.generator.clone();
        let extractor: Arc<dyn KeywordExtractor> = self.extractor.clone();
        let classifier: Arc<dyn ZeroShotClassifier> = self.classifier.clone();
        let labels = Arc::new(test_labels());

        let summarizer = |prefix: &str| SummarizerBinding {
            generator: Arc::clone(&generator),
            input_prefix: prefix.to_string(),
            params: GenerationParams::default(),
        };
        let topic = |template: &str| TopicBinding {
            classifier: Arc::clone(&classifier),
            labels: Arc::clone(&labels),
            hypothesis_template: template.to_string(),
            multi_label: true,
        };

        ModelRegistry::builder()
            .summarizer(Language::English, summarizer(""))
            .summarizer(Language::Vietnamese, summarizer("summarize: "))
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
                    extractor: Arc::clone(&extractor),
                    post_filter: Some(Arc::new(vietnamese_stopwords())),
                },
            )
            .topic(Language::English, topic(EN_TEMPLATE))
            .topic(Language::Vietnamese, topic(VI_TEMPLATE))
            .build()
            .unwrap()
    }
}
