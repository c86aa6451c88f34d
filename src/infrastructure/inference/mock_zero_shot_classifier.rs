use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;

use crate::application::ports::{
    ClassificationRequest, InferenceError, LabelScore, ZeroShotClassifier,
};

const MENTIONED_SCORE: f32 = 0.95;
const UNMENTIONED_SCORE: f32 = 0.05;

/// Scores a label high when the text mentions it, low otherwise.
pub struct MockZeroShotClassifier {
    delay: Duration,
    calls: AtomicUsize,
}

impl Default for MockZeroShotClassifier {
    fn default() -> Self {
        Self::new()
    }
}

impl MockZeroShotClassifier {
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
impl ZeroShotClassifier for MockZeroShotClassifier {
    async fn classify(
        &self,
        request: &ClassificationRequest<'_>,
    ) -> Result<Vec<LabelScore>, InferenceError> {
        self.calls.fetch_add(1, Ordering::SeqCst);

        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }

        let text = request.text.to_lowercase();
        let mut scores: Vec<LabelScore> = request
            .labels
            .iter()
            .map(|label| LabelScore {
                label: label.clone(),
                score: if text.contains(&label.to_lowercase()) {
                    MENTIONED_SCORE
                } else {
                    UNMENTIONED_SCORE
                },
            })
            .collect();

        if !request.multi_label {
            let total: f32 = scores.iter().map(|s| s.score).sum();
            if total > 0.0 {
                scores.iter_mut().for_each(|s| s.score /= total);
            }
        }

        Ok(scores)
    }
}
