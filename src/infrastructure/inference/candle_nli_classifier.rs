use std::sync::Arc;

use async_trait::async_trait;
use candle_core::{DType, Device, Tensor};
use candle_transformers::models::xlm_roberta::{Config, XLMRobertaForSequenceClassification};
use tokenizers::{Tokenizer, TruncationParams, TruncationStrategy};
use tokio::sync::Mutex;

use crate::application::ports::{
    ClassificationRequest, InferenceError, LabelScore, ZeroShotClassifier, format_hypothesis,
};

use super::model_loader::{
    ModelSource, fetch_model_files, read_config_json, select_device, select_dtype,
};
use super::zero_shot::{NliLabelIndices, multi_label_scores, single_label_scores};

/// Zero-shot classification through an XLM-RoBERTa NLI sequence classifier.
///
/// Each candidate label becomes a hypothesis paired with the input text; the
/// premise is truncated first when the pair exceeds the token budget.
pub struct CandleNliClassifier {
    model: Arc<Mutex<XLMRobertaForSequenceClassification>>,
    tokenizer: Arc<Tokenizer>,
    device: Arc<Device>,
    indices: NliLabelIndices,
    pad_token_id: u32,
}

impl CandleNliClassifier {
    pub fn new(source: &ModelSource, max_input_tokens: usize) -> Result<Self, InferenceError> {
        let device = select_device();

        tracing::info!(
            model = %source.model_id,
            device = ?device,
            "Initializing Candle NLI topic classifier"
        );

        let files = fetch_model_files(source)?;
        let config_json = read_config_json(&files.config)?;

        let config: Config = serde_json::from_str(&config_json)
            .map_err(|e| InferenceError::ModelLoadFailed(format!("parse config: {e}")))?;
        let indices = NliLabelIndices::from_config_json(&config_json)?;

        let mut tokenizer = Tokenizer::from_file(&files.tokenizer)
            .map_err(|e| InferenceError::ModelLoadFailed(format!("tokenizer: {e}")))?;
        tokenizer
            .with_truncation(Some(TruncationParams {
                max_length: max_input_tokens,
                strategy: TruncationStrategy::OnlyFirst,
                ..Default::default()
            }))
            .map_err(|e| InferenceError::ModelLoadFailed(format!("truncation config: {e}")))?;
        let pad_token_id = tokenizer.token_to_id("<pad>").unwrap_or(1);

        let vb = files.weights.var_builder(select_dtype(&device), &device)?;
        let model = XLMRobertaForSequenceClassification::new(indices.num_labels, &config, vb)
            .map_err(|e| InferenceError::ModelLoadFailed(format!("model: {e}")))?;

        tracing::info!(
            model = %source.model_id,
            entailment = indices.entailment,
            contradiction = indices.contradiction,
            "Candle NLI topic classifier loaded successfully"
        );

        Ok(Self {
            model: Arc::new(Mutex::new(model)),
            tokenizer: Arc::new(tokenizer),
            device: Arc::new(device),
            indices,
            pad_token_id,
        })
    }
}

#[async_trait]
impl ZeroShotClassifier for CandleNliClassifier {
    #[tracing::instrument(skip(self, request), fields(labels = request.labels.len()))]
    async fn classify(
        &self,
        request: &ClassificationRequest<'_>,
    ) -> Result<Vec<LabelScore>, InferenceError> {
        if request.labels.is_empty() {
            return Ok(Vec::new());
        }

        let model = Arc::clone(&self.model);
        let tokenizer = Arc::clone(&self.tokenizer);
        let device = Arc::clone(&self.device);
        let pad_token_id = self.pad_token_id;
        let premise = request.text.to_string();
        let hypotheses: Vec<String> = request
            .labels
            .iter()
            .map(|label| format_hypothesis(request.hypothesis_template, label))
            .collect();

        let logits = tokio::task::spawn_blocking(move || {
            score_pairs(&model, &tokenizer, &device, pad_token_id, &premise, &hypotheses)
        })
        .await
        .map_err(|e| InferenceError::InferenceFailed(format!("task join error: {e}")))??;

        let scores = if request.multi_label {
            multi_label_scores(&logits, self.indices)
        } else {
            single_label_scores(&logits, self.indices)
        };

        Ok(request
            .labels
            .iter()
            .zip(scores)
            .map(|(label, score)| LabelScore {
                label: label.clone(),
                score,
            })
            .collect())
    }
}

fn score_pairs(
    model: &Mutex<XLMRobertaForSequenceClassification>,
    tokenizer: &Tokenizer,
    device: &Device,
    pad_token_id: u32,
    premise: &str,
    hypotheses: &[String],
) -> Result<Vec<Vec<f32>>, InferenceError> {
    let pairs: Vec<(&str, &str)> = hypotheses.iter().map(|h| (premise, h.as_str())).collect();
    let encodings = tokenizer
        .encode_batch(pairs, true)
        .map_err(|e| InferenceError::InferenceFailed(format!("tokenization: {e}")))?;

    let max_len = encodings
        .iter()
        .map(|e| e.get_ids().len())
        .max()
        .unwrap_or(0);
    let batch_size = encodings.len();

    let mut all_input_ids = Vec::with_capacity(batch_size * max_len);
    let mut all_attention_mask = Vec::with_capacity(batch_size * max_len);

    for encoding in &encodings {
        let ids = encoding.get_ids();
        let pad_len = max_len - ids.len();

        all_input_ids.extend_from_slice(ids);
        all_input_ids.extend(std::iter::repeat_n(pad_token_id, pad_len));

        all_attention_mask.extend_from_slice(encoding.get_attention_mask());
        all_attention_mask.extend(std::iter::repeat_n(0u32, pad_len));
    }

    let input_ids = Tensor::from_vec(all_input_ids, (batch_size, max_len), device)
        .map_err(|e| InferenceError::InferenceFailed(e.to_string()))?;
    let attention_mask = Tensor::from_vec(all_attention_mask, (batch_size, max_len), device)
        .map_err(|e| InferenceError::InferenceFailed(e.to_string()))?;
    let token_type_ids = input_ids
        .zeros_like()
        .map_err(|e| InferenceError::InferenceFailed(e.to_string()))?;

    let model = model.blocking_lock();
    model
        .forward(&input_ids, &attention_mask, &token_type_ids)
        .and_then(|t| t.to_dtype(DType::F32))
        .and_then(|t| t.to_vec2::<f32>())
        .map_err(|e| InferenceError::InferenceFailed(format!("classifier: {e}")))
}
