mod bounded_inference;
mod keyword_strategy;
mod model_registry;
mod request_pipeline;
mod summarization_strategy;
mod topic_strategy;

pub use bounded_inference::run_bounded;
pub use keyword_strategy::{DEFAULT_MAX_KEYWORDS, KeywordStrategy, select_keywords};
pub use model_registry::{
    KeywordBinding, ModelRegistry, ModelRegistryBuilder, ModelResource, RegistryError,
    SummarizerBinding, TopicBinding,
};
pub use request_pipeline::{PipelineError, PipelineOptions, RequestPipeline};
pub use summarization_strategy::SummarizationStrategy;
pub use topic_strategy::{DEFAULT_TOP_K, TopicStrategy, round_score, top_topics};
