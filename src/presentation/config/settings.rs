use std::path::PathBuf;

use config::{Config, ConfigError, File};
use serde::Deserialize;

use super::Environment;

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub server: ServerSettings,
    pub models: ModelSettings,
    pub resources: ResourceSettings,
    pub documents: DocumentSettings,
    pub inference: InferenceSettings,
    pub logging: LoggingSettings,
}

impl Settings {
    /// `appsettings.<environment>` (optional) overlaid by `APP__SECTION__KEY` variables.
    pub fn load(environment: Environment) -> Result<Self, ConfigError> {
        Config::builder()
            .add_source(
                File::with_name(&format!("appsettings.{}", environment.as_str())).required(false),
            )
            .add_source(
                config::Environment::with_prefix("APP")
                    .prefix_separator("__")
                    .separator("__"),
            )
            .build()?
            .try_deserialize()
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
    pub max_upload_bytes: usize,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8000,
            max_upload_bytes: 20 * 1024 * 1024,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ModelProvider {
    #[default]
    Local,
    Mock,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ModelSettings {
    pub provider: ModelProvider,
    pub summarization: SummarizationSettings,
    pub generation: GenerationSettings,
    pub topic: TopicSettings,
    pub keywords: KeywordSettings,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SummarizationSettings {
    pub en: SummarizerModelSettings,
    pub vi: SummarizerModelSettings,
}

impl Default for SummarizationSettings {
    fn default() -> Self {
        Self {
            en: SummarizerModelSettings {
                model_id: "google-t5/t5-base".to_string(),
                input_prefix: "summarize: ".to_string(),
                ..SummarizerModelSettings::default()
            },
            // mT5 repos publish only spiece.model.
            vi: SummarizerModelSettings {
                model_id: "csebuetnlp/mT5_multilingual_XLSum".to_string(),
                input_prefix: "summarize: ".to_string(),
                tokenizer_repo: Some("lmz/mt5-tokenizers".to_string()),
                tokenizer_file: Some("mt5-base.tokenizer.json".to_string()),
                ..SummarizerModelSettings::default()
            },
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct SummarizerModelSettings {
    pub model_id: String,
    pub revision: Option<String>,
    pub input_prefix: String,
    /// Hub repo holding `tokenizer_file` when the model repo has no `tokenizer.json`.
    pub tokenizer_repo: Option<String>,
    pub tokenizer_file: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct GenerationSettings {
    pub max_input_tokens: usize,
    pub num_beams: usize,
    pub min_length: usize,
    pub max_length: usize,
    pub length_penalty: f32,
    pub no_repeat_ngram_size: usize,
}

impl Default for GenerationSettings {
    fn default() -> Self {
        Self {
            max_input_tokens: 1024,
            num_beams: 4,
            min_length: 40,
            max_length: 150,
            length_penalty: 2.0,
            no_repeat_ngram_size: 3,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct TopicSettings {
    pub model_id: String,
    pub revision: Option<String>,
    pub tokenizer_repo: Option<String>,
    pub tokenizer_file: Option<String>,
    pub en_template: String,
    pub vi_template: String,
    pub top_k: usize,
    pub multi_label: bool,
    pub max_input_tokens: usize,
}

impl Default for TopicSettings {
    fn default() -> Self {
        Self {
            model_id: "joeddav/xlm-roberta-large-xnli".to_string(),
            revision: None,
            tokenizer_repo: Some("FacebookAI/xlm-roberta-large".to_string()),
            tokenizer_file: None,
            en_template: "This text is about {}.".to_string(),
            vi_template: "Đoạn văn này nói về {}.".to_string(),
            top_k: 3,
            multi_label: true,
            max_input_tokens: 512,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct KeywordSettings {
    pub max_keywords: usize,
}

impl Default for KeywordSettings {
    fn default() -> Self {
        Self { max_keywords: 10 }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ResourceSettings {
    pub labels_path: PathBuf,
    pub vietnamese_stopwords_path: PathBuf,
}

impl Default for ResourceSettings {
    fn default() -> Self {
        Self {
            labels_path: PathBuf::from("resources/labels.txt"),
            vietnamese_stopwords_path: PathBuf::from("resources/vietnamese-stopwords.txt"),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct DocumentSettings {
    /// Upper bound on the inflated `word/document.xml` of an upload.
    pub max_body_xml_bytes: u64,
}

impl Default for DocumentSettings {
    fn default() -> Self {
        Self {
            max_body_xml_bytes: 32 * 1024 * 1024,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct InferenceSettings {
    pub timeout_secs: u64,
}

impl Default for InferenceSettings {
    fn default() -> Self {
        Self { timeout_secs: 120 }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct LoggingSettings {
    pub level: Option<String>,
    pub json: bool,
}
