pub mod inference;
pub mod keywords;
pub mod language;
pub mod observability;
pub mod storage;
pub mod text_processing;
