use async_trait::async_trait;

use super::InferenceError;

#[derive(Debug, Clone, PartialEq)]
pub struct LabelScore {
    pub label: String,
    pub score: f32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ClassificationRequest<'a> {
    pub text: &'a str,
    pub labels: &'a [String],
    /// Sentence pattern with a single `{}` slot for the candidate label.
    pub hypothesis_template: &'a str,
    /// Score each label independently instead of normalizing across labels.
    pub multi_label: bool,
}

#[async_trait]
pub trait ZeroShotClassifier: Send + Sync {
    /// Returns one score in `[0, 1]` per candidate label, in candidate order.
    async fn classify(
        &self,
        request: &ClassificationRequest<'_>,
    ) -> Result<Vec<LabelScore>, InferenceError>;
}

pub fn format_hypothesis(template: &str, label: &str) -> String {
    if template.contains("{}") {
        template.replacen("{}", label, 1)
    } else {
        format!("{template} {label}")
    }
}
