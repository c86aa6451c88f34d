use super::language::Language;
use super::task::Task;

#[derive(Debug, Clone, PartialEq)]
pub struct SummaryResult {
    pub text: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct KeywordResult {
    pub keywords: Vec<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TopicScore {
    pub label: String,
    pub score: f32,
}

/// Highest-scoring topics first.
#[derive(Debug, Clone, PartialEq)]
pub struct TopicResult {
    pub topics: Vec<TopicScore>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum InferenceResult {
    Summary(SummaryResult),
    Keywords(KeywordResult),
    Topics(TopicResult),
}

impl InferenceResult {
    pub fn task(&self) -> Task {
        match self {
            Self::Summary(_) => Task::Summarize,
            Self::Keywords(_) => Task::Keywords,
            Self::Topics(_) => Task::Topic,
        }
    }
}

/// Task output together with the language it was produced for.
#[derive(Debug, Clone, PartialEq)]
pub struct AnalysisResponse {
    pub language: Language,
    pub result: InferenceResult,
}
