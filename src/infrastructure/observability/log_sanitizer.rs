use std::sync::LazyLock;

use regex::Regex;

const MAX_VISIBLE_CHARS: usize = 100;

static WHITESPACE_RUN: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s+").unwrap());
static CREDENTIAL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?i)(bearer\s+|\b(?:api_key|password|secret|token)=)[^\s&"']+"#).unwrap()
});
static EMAIL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[\w.+-]+@[\w-]+\.[\w.-]+").unwrap());

/// One-line preview of user text for log fields.
///
/// Credentials and email addresses are masked before the preview is cut to
/// `MAX_VISIBLE_CHARS` characters.
pub fn sanitize_for_log(text: &str) -> String {
    let trimmed = text.trim();

    if trimmed.is_empty() {
        return String::from("[EMPTY]");
    }

    let flattened = WHITESPACE_RUN.replace_all(trimmed, " ");
    let masked = CREDENTIAL.replace_all(&flattened, "${1}[REDACTED]");
    let masked = EMAIL.replace_all(&masked, "[EMAIL]");

    let total_chars = masked.chars().count();
    if total_chars > MAX_VISIBLE_CHARS {
        let visible: String = masked.chars().take(MAX_VISIBLE_CHARS).collect();
        format!("{visible}... ({total_chars} chars total)")
    } else {
        masked.into_owned()
    }
}
