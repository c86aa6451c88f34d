use regex::Regex;
use std::sync::LazyLock;
use unicode_normalization::UnicodeNormalization;

static INVISIBLE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[\u{200B}\u{200C}\u{200D}\u{2060}\u{FEFF}\u{00AD}]").unwrap());

/// Normalizes extracted document text: NFC composition (so Vietnamese
/// diacritics compare equal however the source encoded them), invisible
/// characters removed, lines trimmed, runs of blank lines collapsed to one.
pub fn sanitize_extracted_text(raw: &str) -> String {
    let composed: String = raw.nfc().collect();
    let visible = INVISIBLE.replace_all(&composed, "");

    let mut result = String::with_capacity(visible.len());
    let mut prev_was_blank = false;
    let mut first_content = true;

    for line in visible.lines() {
        let trimmed = line.trim();

        if trimmed.is_empty() {
            prev_was_blank = true;
            continue;
        }

        if !first_content {
            result.push_str(if prev_was_blank { "\n\n" } else { "\n" });
        }
        collapse_internal_whitespace(trimmed, &mut result);
        prev_was_blank = false;
        first_content = false;
    }

    result
}

fn collapse_internal_whitespace(line: &str, out: &mut String) {
    let mut prev_was_space = false;

    for ch in line.chars() {
        if ch.is_whitespace() {
            if !prev_was_space {
                out.push(' ');
                prev_was_space = true;
            }
        } else {
            out.push(ch);
            prev_was_space = false;
        }
    }
}
