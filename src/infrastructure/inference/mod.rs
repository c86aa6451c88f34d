mod beam_search;
mod candle_nli_classifier;
mod candle_t5_generator;
mod mock_text_generator;
mod mock_zero_shot_classifier;
mod model_loader;
mod model_registry_factory;
mod zero_shot;

pub use beam_search::{BeamSearchConfig, banned_tokens, beam_search};
pub use candle_nli_classifier::CandleNliClassifier;
pub use candle_t5_generator::{CandleT5Generator, truncate_input_ids};
pub use mock_text_generator::MockTextGenerator;
pub use mock_zero_shot_classifier::MockZeroShotClassifier;
pub use model_loader::{
    DEFAULT_TOKENIZER_FILE, ModelFiles, ModelSource, ModelWeights, TokenizerLocation,
    fetch_model_files, parse_shard_names,
};
pub use model_registry_factory::{
    ModelRegistryFactory, ModelRegistryFactoryError, generation_params, summarizer_source,
    topic_source,
};
pub use zero_shot::{NliLabelIndices, multi_label_scores, single_label_scores};
