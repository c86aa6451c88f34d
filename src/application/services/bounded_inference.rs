use std::future::Future;
use std::time::Duration;

use crate::application::ports::InferenceError;

/// Runs one inference call, failing with [`InferenceError::Timeout`] past `limit`.
pub async fn run_bounded<T, F>(limit: Duration, call: F) -> Result<T, InferenceError>
where
    F: Future<Output = Result<T, InferenceError>>,
{
    tokio::time::timeout(limit, call)
        .await
        .map_err(|_| InferenceError::Timeout(limit))?
}
