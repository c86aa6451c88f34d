use crate::application::ports::InferenceError;

/// Positions of the entailment and contradiction logits in an NLI head.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NliLabelIndices {
    pub entailment: usize,
    pub contradiction: usize,
    pub num_labels: usize,
}

impl NliLabelIndices {
    /// Reads `id2label` (falling back to `label2id`) from a model's `config.json`.
    pub fn from_config_json(config_json: &str) -> Result<Self, InferenceError> {
        let config: serde_json::Value = serde_json::from_str(config_json)
            .map_err(|e| InferenceError::ModelLoadFailed(format!("parse config: {e}")))?;

        let mut labels: Vec<(usize, String)> = Vec::new();
        if let Some(id2label) = config.get("id2label").and_then(|v| v.as_object()) {
            for (id, label) in id2label {
                if let (Ok(id), Some(label)) = (id.parse::<usize>(), label.as_str()) {
                    labels.push((id, label.to_lowercase()));
                }
            }
        } else if let Some(label2id) = config.get("label2id").and_then(|v| v.as_object()) {
            for (label, id) in label2id {
                if let Some(id) = id.as_u64() {
                    labels.push((id as usize, label.to_lowercase()));
                }
            }
        }

        let find = |prefix: &str| {
            labels
                .iter()
                .find(|(_, label)| label.starts_with(prefix))
                .map(|(id, _)| *id)
        };

        let entailment = find("entail").ok_or_else(|| {
            InferenceError::ModelLoadFailed("config has no entailment label".to_string())
        })?;
        let contradiction = find("contra").ok_or_else(|| {
            InferenceError::ModelLoadFailed("config has no contradiction label".to_string())
        })?;

        Ok(Self {
            entailment,
            contradiction,
            num_labels: labels.len(),
        })
    }
}

/// Scores each candidate on its own: softmax over its contradiction and
/// entailment logits, keeping the entailment probability.
pub fn multi_label_scores(logits: &[Vec<f32>], indices: NliLabelIndices) -> Vec<f32> {
    logits
        .iter()
        .map(|row| {
            let pair = [row[indices.contradiction], row[indices.entailment]];
            softmax(&pair)[1]
        })
        .collect()
}

/// Softmax of the entailment logits across all candidates.
pub fn single_label_scores(logits: &[Vec<f32>], indices: NliLabelIndices) -> Vec<f32> {
    let entailment: Vec<f32> = logits.iter().map(|row| row[indices.entailment]).collect();
    softmax(&entailment)
}

fn softmax(values: &[f32]) -> Vec<f32> {
    let max = values.iter().copied().fold(f32::NEG_INFINITY, f32::max);
    let exps: Vec<f32> = values.iter().map(|v| (v - max).exp()).collect();
    let sum: f32 = exps.iter().sum();
    exps.into_iter().map(|e| e / sum).collect()
}
