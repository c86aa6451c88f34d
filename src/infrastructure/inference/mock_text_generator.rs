use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;

use crate::application::ports::{GenerationRequest, InferenceError, TextGenerator};

/// Echoes the leading words of the prompt, capped at the request's `max_length`.
pub struct MockTextGenerator {
    delay: Duration,
    calls: AtomicUsize,
}

impl Default for MockTextGenerator {
    fn default() -> Self {
        Self::new()
    }
}

impl MockTextGenerator {
    pub fn new() -> Self {
        Self::with_delay(Duration::ZERO)
    }

    pub fn with_delay(delay: Duration) -> Self {
        Self {
            delay,
            calls: AtomicUsize::new(0),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl TextGenerator for MockTextGenerator {
    async fn generate(&self, request: &GenerationRequest) -> Result<String, InferenceError> {
        self.calls.fetch_add(1, Ordering::SeqCst);

        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }

        Ok(request
            .prompt
            .split_whitespace()
            .take(request.params.max_length)
            .collect::<Vec<_>>()
            .join(" "))
    }
}
