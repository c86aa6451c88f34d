use std::time::Duration;

use crate::domain::{Language, Task};

#[derive(Debug, thiserror::Error)]
pub enum InferenceError {
    #[error("model loading failed: {0}")]
    ModelLoadFailed(String),
    #[error("inference failed: {0}")]
    InferenceFailed(String),
    #[error("inference timed out after {0:?}")]
    Timeout(Duration),
    #[error("no {task} resource registered for language {language}")]
    ResourceUnavailable { task: Task, language: Language },
}
