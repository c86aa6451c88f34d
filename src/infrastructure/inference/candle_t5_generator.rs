use std::sync::Arc;

use async_trait::async_trait;
use candle_core::{D, DType, Device, Tensor};
use candle_transformers::models::t5::{Config, T5ForConditionalGeneration};
use tokenizers::Tokenizer;
use tokio::sync::Mutex;

use crate::application::ports::{
    GenerationParams, GenerationRequest, InferenceError, TextGenerator,
};

use super::beam_search::{BeamSearchConfig, beam_search};
use super::model_loader::{ModelSource, fetch_model_files, read_config_json, select_device};

/// T5-family encoder-decoder (T5, mT5) summarizer running on candle.
pub struct CandleT5Generator {
    model: Arc<Mutex<T5ForConditionalGeneration>>,
    tokenizer: Arc<Tokenizer>,
    device: Arc<Device>,
    eos_token_id: u32,
    decoder_start_token_id: u32,
}

impl CandleT5Generator {
    pub fn new(source: &ModelSource) -> Result<Self, InferenceError> {
        let device = select_device();

        tracing::info!(
            model = %source.model_id,
            device = ?device,
            "Initializing Candle T5 summarization model"
        );

        let files = fetch_model_files(source)?;

        let mut config: Config = serde_json::from_str(&read_config_json(&files.config)?)
            .map_err(|e| InferenceError::ModelLoadFailed(format!("parse config: {e}")))?;
        // Every beam step re-runs the decoder over the full prefix of each beam.
        config.use_cache = false;

        let tokenizer = Tokenizer::from_file(&files.tokenizer)
            .map_err(|e| InferenceError::ModelLoadFailed(format!("tokenizer: {e}")))?;

        // T5 activations overflow in half precision.
        let vb = files.weights.var_builder(DType::F32, &device)?;
        let model = T5ForConditionalGeneration::load(vb, &config)
            .map_err(|e| InferenceError::ModelLoadFailed(format!("model: {e}")))?;

        let eos_token_id = config.eos_token_id as u32;
        let decoder_start_token_id =
            config.decoder_start_token_id.unwrap_or(config.pad_token_id) as u32;

        tracing::info!(
            model = %source.model_id,
            "Candle T5 summarization model loaded successfully"
        );

        Ok(Self {
            model: Arc::new(Mutex::new(model)),
            tokenizer: Arc::new(tokenizer),
            device: Arc::new(device),
            eos_token_id,
            decoder_start_token_id,
        })
    }
}

#[async_trait]
impl TextGenerator for CandleT5Generator {
    #[tracing::instrument(skip(self, request), fields(prompt_chars = request.prompt.len()))]
    async fn generate(&self, request: &GenerationRequest) -> Result<String, InferenceError> {
        let model = Arc::clone(&self.model);
        let tokenizer = Arc::clone(&self.tokenizer);
        let device = Arc::clone(&self.device);
        let prompt = request.prompt.clone();
        let params = request.params.clone();
        let eos = self.eos_token_id;
        let start = self.decoder_start_token_id;

        tokio::task::spawn_blocking(move || {
            run_generation(&model, &tokenizer, &device, &prompt, &params, eos, start)
        })
        .await
        .map_err(|e| InferenceError::InferenceFailed(format!("task join error: {e}")))?
    }
}

fn run_generation(
    model: &Mutex<T5ForConditionalGeneration>,
    tokenizer: &Tokenizer,
    device: &Device,
    prompt: &str,
    params: &GenerationParams,
    eos_token_id: u32,
    decoder_start_token_id: u32,
) -> Result<String, InferenceError> {
    let encoding = tokenizer
        .encode(prompt, true)
        .map_err(|e| InferenceError::InferenceFailed(format!("tokenization: {e}")))?;
    let input_ids = truncate_input_ids(encoding.get_ids(), params.max_input_tokens, eos_token_id);

    tracing::debug!(input_tokens = input_ids.len(), "Prompt tokenized");

    let input = Tensor::new(input_ids.as_slice(), device)
        .and_then(|t| t.unsqueeze(0))
        .map_err(|e| InferenceError::InferenceFailed(format!("input tensor: {e}")))?;

    let mut model = model.blocking_lock();

    let encoder_output = model
        .encode(&input)
        .map_err(|e| InferenceError::InferenceFailed(format!("encoder: {e}")))?;

    let config = BeamSearchConfig::from_params(params, eos_token_id, decoder_start_token_id);
    let generated = beam_search(&config, |beams: &[Vec<u32>]| {
        let width = beams.len();
        let seq_len = beams[0].len();
        let flat: Vec<u32> = beams.iter().flatten().copied().collect();

        let decoder_ids = Tensor::from_vec(flat, (width, seq_len), device)?;
        let encoder_states = encoder_output.repeat((width, 1, 1))?;
        let logits = model
            .decode(&decoder_ids, &encoder_states)?
            .to_dtype(DType::F32)?;
        candle_nn::ops::log_softmax(&logits, D::Minus1)?.to_vec2::<f32>()
    })
    .map_err(|e| InferenceError::InferenceFailed(format!("beam search: {e}")))?;

    model.clear_kv_cache();
    drop(model);

    tracing::debug!(output_tokens = generated.len(), "Beam search finished");

    tokenizer
        .decode(&generated, true)
        .map_err(|e| InferenceError::InferenceFailed(format!("detokenization: {e}")))
}

/// Cuts an encoded prompt to `max_tokens`, keeping the closing EOS.
pub fn truncate_input_ids(ids: &[u32], max_tokens: usize, eos_token_id: u32) -> Vec<u32> {
    if max_tokens == 0 || ids.len() <= max_tokens {
        return ids.to_vec();
    }

    let mut truncated = ids[..max_tokens].to_vec();
    if ids.last() == Some(&eos_token_id) {
        if let Some(last) = truncated.last_mut() {
            *last = eos_token_id;
        }
    }
    truncated
}
