use std::fmt;

/// A language the analysis models are deployed for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Language {
    English,
    Vietnamese,
}

impl Language {
    pub const ALL: [Language; 2] = [Language::English, Language::Vietnamese];

    pub fn code(&self) -> &'static str {
        match self {
            Language::English => "en",
            Language::Vietnamese => "vi",
        }
    }

    pub fn from_code(code: &str) -> Option<Self> {
        match code.trim().to_lowercase().as_str() {
            "en" | "eng" => Some(Self::English),
            "vi" | "vie" => Some(Self::Vietnamese),
            _ => None,
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// Outcome of language detection on a piece of text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LanguageTag {
    Supported(Language),
    /// Detected, but no models are deployed for it. Holds the detector's code.
    Unsupported(String),
}

impl LanguageTag {
    pub fn from_code(code: &str) -> Self {
        match Language::from_code(code) {
            Some(language) => Self::Supported(language),
            None => Self::Unsupported(code.to_string()),
        }
    }

    pub fn supported(&self) -> Option<Language> {
        match self {
            Self::Supported(language) => Some(*language),
            Self::Unsupported(_) => None,
        }
    }

    pub fn code(&self) -> &str {
        match self {
            Self::Supported(language) => language.code(),
            Self::Unsupported(code) => code,
        }
    }
}
