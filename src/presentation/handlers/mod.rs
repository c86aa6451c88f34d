mod analysis;
mod error;
mod status;

pub use analysis::{
    FILE_FIELD, KeywordsResponse, SummaryResponse, TEXT_FIELD, TopicEntry, TopicResponse,
    keywords_handler, summary_handler, topic_handler,
};
pub use error::{
    ApiError, ErrorResponse, EXTRACTION_FAILED_MESSAGE, INFERENCE_FAILED_MESSAGE,
    MISSING_INPUT_MESSAGE, UNSUPPORTED_FILE_TYPE_MESSAGE, UNSUPPORTED_LANGUAGE_MESSAGE,
};
pub use status::{HealthResponse, RootResponse, SERVICE_MESSAGE, health_handler, root_handler};
