use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use candle_core::{DType, Device};
use candle_nn::VarBuilder;
use hf_hub::api::sync::{Api, ApiRepo};
use hf_hub::{Repo, RepoType};

use crate::application::ports::InferenceError;

/// Local paths of a model snapshot pulled from the Hugging Face hub cache.
#[derive(Debug, Clone)]
pub struct ModelFiles {
    pub config: PathBuf,
    pub tokenizer: PathBuf,
    pub weights: ModelWeights,
}

#[derive(Debug, Clone)]
pub enum ModelWeights {
    Safetensors(Vec<PathBuf>),
    Pickle(PathBuf),
}

impl ModelWeights {
    pub fn var_builder(
        &self,
        dtype: DType,
        device: &Device,
    ) -> Result<VarBuilder<'static>, InferenceError> {
        match self {
            // SAFETY: safetensors files are memory-mapped read-only from a locally cached HF repo.
            Self::Safetensors(paths) => unsafe {
                VarBuilder::from_mmaped_safetensors(paths, dtype, device)
                    .map_err(|e| InferenceError::ModelLoadFailed(format!("weights: {e}")))
            },
            Self::Pickle(path) => VarBuilder::from_pth(path, dtype, device)
                .map_err(|e| InferenceError::ModelLoadFailed(format!("weights: {e}"))),
        }
    }
}

pub const DEFAULT_TOKENIZER_FILE: &str = "tokenizer.json";

/// Hub coordinates of one model and of the tokenizer it runs with.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ModelSource {
    pub model_id: String,
    pub revision: Option<String>,
    /// Separate repo for `tokenizer.json`, for models that only publish a sentencepiece file.
    pub tokenizer_repo: Option<String>,
    pub tokenizer_file: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenizerLocation<'a> {
    pub repo: &'a str,
    pub revision: Option<&'a str>,
    pub file: &'a str,
}

impl ModelSource {
    pub fn new(model_id: impl Into<String>) -> Self {
        Self {
            model_id: model_id.into(),
            revision: None,
            tokenizer_repo: None,
            tokenizer_file: None,
        }
    }

    /// The model's own revision applies only when the tokenizer comes from the model repo.
    pub fn tokenizer_location(&self) -> TokenizerLocation<'_> {
        let file = self
            .tokenizer_file
            .as_deref()
            .unwrap_or(DEFAULT_TOKENIZER_FILE);
        match self.tokenizer_repo.as_deref() {
            Some(repo) if repo != self.model_id => TokenizerLocation {
                repo,
                revision: None,
                file,
            },
            _ => TokenizerLocation {
                repo: &self.model_id,
                revision: self.revision.as_deref(),
                file,
            },
        }
    }
}

fn hub_repo(api: &Api, repo_id: &str, revision: Option<&str>) -> ApiRepo {
    api.repo(match revision {
        Some(rev) => Repo::with_revision(repo_id.to_string(), RepoType::Model, rev.to_string()),
        None => Repo::new(repo_id.to_string(), RepoType::Model),
    })
}

pub fn fetch_model_files(source: &ModelSource) -> Result<ModelFiles, InferenceError> {
    let api = Api::new()
        .map_err(|e| InferenceError::ModelLoadFailed(format!("hf-hub init failed: {e}")))?;
    let repo = hub_repo(&api, &source.model_id, source.revision.as_deref());

    let config = repo
        .get("config.json")
        .map_err(|e| InferenceError::ModelLoadFailed(format!("config.json: {e}")))?;

    let location = source.tokenizer_location();
    if location.repo != source.model_id {
        tracing::info!(repo = location.repo, file = location.file, "Using external tokenizer");
    }
    let tokenizer = hub_repo(&api, location.repo, location.revision)
        .get(location.file)
        .map_err(|e| {
            InferenceError::ModelLoadFailed(format!("{}/{}: {e}", location.repo, location.file))
        })?;
    let weights = load_weights(&repo)?;

    Ok(ModelFiles {
        config,
        tokenizer,
        weights,
    })
}

fn load_weights(repo: &ApiRepo) -> Result<ModelWeights, InferenceError> {
    if let Ok(path) = repo.get("model.safetensors") {
        tracing::info!("Loading single-shard model.safetensors");
        return Ok(ModelWeights::Safetensors(vec![path]));
    }

    if let Ok(index_path) = repo.get("model.safetensors.index.json") {
        let index_str = std::fs::read_to_string(&index_path)
            .map_err(|e| InferenceError::ModelLoadFailed(format!("read index.json: {e}")))?;
        let shard_names = parse_shard_names(&index_str)?;

        tracing::info!(shard_count = shard_names.len(), "Downloading weight shards");

        let mut paths = Vec::with_capacity(shard_names.len());
        for name in &shard_names {
            let path = repo
                .get(name)
                .map_err(|e| InferenceError::ModelLoadFailed(format!("shard {name}: {e}")))?;
            paths.push(path);
        }
        return Ok(ModelWeights::Safetensors(paths));
    }

    tracing::info!("No safetensors published, falling back to pytorch_model.bin");

    repo.get("pytorch_model.bin")
        .map(ModelWeights::Pickle)
        .map_err(|e| InferenceError::ModelLoadFailed(format!("pytorch_model.bin: {e}")))
}

/// Unique shard filenames listed in a `model.safetensors.index.json`, sorted.
pub fn parse_shard_names(index_json: &str) -> Result<Vec<String>, InferenceError> {
    let index: serde_json::Value = serde_json::from_str(index_json)
        .map_err(|e| InferenceError::ModelLoadFailed(format!("parse index.json: {e}")))?;

    let weight_map = index
        .get("weight_map")
        .and_then(|v| v.as_object())
        .ok_or_else(|| {
            InferenceError::ModelLoadFailed("index.json missing weight_map object".to_string())
        })?;

    let names: BTreeSet<String> = weight_map
        .values()
        .filter_map(|v| v.as_str())
        .map(str::to_owned)
        .collect();

    if names.is_empty() {
        return Err(InferenceError::ModelLoadFailed(
            "index.json weight_map contains no shard filenames".to_string(),
        ));
    }

    Ok(names.into_iter().collect())
}

pub fn read_config_json(path: &Path) -> Result<String, InferenceError> {
    std::fs::read_to_string(path)
        .map_err(|e| InferenceError::ModelLoadFailed(format!("read config: {e}")))
}

pub fn select_device() -> Device {
    Device::new_metal(0).unwrap_or(Device::Cpu)
}

pub fn select_dtype(device: &Device) -> DType {
    if device.is_cpu() {
        DType::F32
    } else {
        DType::F16
    }
}
