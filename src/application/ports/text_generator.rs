use async_trait::async_trait;

use super::InferenceError;

/// Fixed decoding parameters for a sequence-to-sequence resource.
#[derive(Debug, Clone, PartialEq)]
pub struct GenerationParams {
    /// Inputs longer than this many tokens are truncated silently.
    pub max_input_tokens: usize,
    pub num_beams: usize,
    pub min_length: usize,
    pub max_length: usize,
    pub length_penalty: f32,
    /// 0 disables n-gram blocking.
    pub no_repeat_ngram_size: usize,
}

impl Default for GenerationParams {
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

#[derive(Debug, Clone, PartialEq)]
pub struct GenerationRequest {
    pub prompt: String,
    pub params: GenerationParams,
}

#[async_trait]
pub trait TextGenerator: Send + Sync {
    /// Generates text for the prompt and decodes it with special tokens removed.
    async fn generate(&self, request: &GenerationRequest) -> Result<String, InferenceError>;
}
