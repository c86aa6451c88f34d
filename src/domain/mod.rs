mod analysis;
mod document;
mod input;
mod language;
mod task;
mod word_list;

pub use analysis::{
    AnalysisResponse, InferenceResult, KeywordResult, SummaryResult, TopicResult, TopicScore,
};
pub use document::{ContentType, Document};
pub use input::{InferenceRequest, NormalizedInput, UploadedDocument};
pub use language::{Language, LanguageTag};
pub use task::Task;
pub use word_list::{CandidateLabelSet, StopwordSet, case_fold};
