use std::collections::HashSet;

use unicode_normalization::UnicodeNormalization;

/// Ordered topic labels offered to the zero-shot classifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CandidateLabelSet {
    labels: Vec<String>,
}

impl CandidateLabelSet {
    /// One label per line; surrounding whitespace trimmed, blank lines skipped.
    pub fn from_lines(contents: &str) -> Self {
        Self::new(contents.lines().map(str::to_string).collect())
    }

    pub fn new(labels: Vec<String>) -> Self {
        Self {
            labels: labels
                .into_iter()
                .map(|label| label.trim().to_string())
                .filter(|label| !label.is_empty())
                .collect(),
        }
    }

    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }
}

/// Case-folded words dropped from keyword results in one language.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StopwordSet {
    words: HashSet<String>,
}

impl StopwordSet {
    pub fn from_lines(contents: &str) -> Self {
        Self::new(contents.lines())
    }

    pub fn new<I, S>(words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            words: words
                .into_iter()
                .map(|word| case_fold(word.as_ref().trim()))
                .filter(|word| !word.is_empty())
                .collect(),
        }
    }

    pub fn contains(&self, word: &str) -> bool {
        self.words.contains(&case_fold(word))
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}

/// Lowercased, NFC-composed form used for every stopword comparison.
pub fn case_fold(word: &str) -> String {
    word.nfc().collect::<String>().to_lowercase()
}
