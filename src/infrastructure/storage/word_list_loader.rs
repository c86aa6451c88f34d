use std::io;
use std::path::{Path, PathBuf};

use unicode_normalization::UnicodeNormalization;

use crate::domain::{CandidateLabelSet, StopwordSet};

#[derive(Debug, thiserror::Error)]
pub enum WordListError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("{0} contains no entries")]
    Empty(PathBuf),
}

/// Loads the newline-delimited candidate topic labels. An empty file is an error.
pub fn load_candidate_labels(path: &Path) -> Result<CandidateLabelSet, WordListError> {
    let labels = CandidateLabelSet::from_lines(&read_utf8(path)?);
    if labels.is_empty() {
        return Err(WordListError::Empty(path.to_path_buf()));
    }

    tracing::info!(path = %path.display(), labels = labels.len(), "Candidate labels loaded");
    Ok(labels)
}

/// Loads a newline-delimited stopword list.
pub fn load_stopwords(path: &Path) -> Result<StopwordSet, WordListError> {
    let stopwords = StopwordSet::from_lines(&read_utf8(path)?);
    if stopwords.is_empty() {
        return Err(WordListError::Empty(path.to_path_buf()));
    }

    tracing::info!(path = %path.display(), words = stopwords.len(), "Stopword list loaded");
    Ok(stopwords)
}

fn read_utf8(path: &Path) -> Result<String, WordListError> {
    let raw = std::fs::read_to_string(path).map_err(|source| WordListError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let without_bom = raw.strip_prefix('\u{FEFF}').unwrap_or(&raw);
    Ok(without_bom.nfc().collect())
}
