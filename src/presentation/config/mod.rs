mod environment;
mod scaffold_config;
mod settings;

pub use environment::{ENVIRONMENT_VAR, Environment};
pub use scaffold_config::ScaffoldConfig;
pub use settings::{
    DocumentSettings, GenerationSettings, InferenceSettings, KeywordSettings, LoggingSettings, ModelProvider,
    ModelSettings, ResourceSettings, ServerSettings, Settings, SummarizationSettings,
    SummarizerModelSettings, TopicSettings,
};
