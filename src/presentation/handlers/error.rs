use axum::Json;
use axum::extract::multipart::MultipartError;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;

use crate::application::services::PipelineError;

pub const MISSING_INPUT_MESSAGE: &str = "Missing 'text' or '.docx' file.";
pub const UNSUPPORTED_FILE_TYPE_MESSAGE: &str = "Only .docx files allowed.";
pub const UNSUPPORTED_LANGUAGE_MESSAGE: &str = "Only English and Vietnamese supported.";
pub const EXTRACTION_FAILED_MESSAGE: &str = "Could not read the uploaded document.";
pub const INFERENCE_FAILED_MESSAGE: &str = "Inference failed.";

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

#[derive(Debug)]
pub enum ApiError {
    Pipeline(PipelineError),
    Multipart(MultipartError),
}

impl From<PipelineError> for ApiError {
    fn from(e: PipelineError) -> Self {
        Self::Pipeline(e)
    }
}

impl From<MultipartError> for ApiError {
    fn from(e: MultipartError) -> Self {
        Self::Multipart(e)
    }
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            Self::Pipeline(PipelineError::MissingInput)
            | Self::Pipeline(PipelineError::UnsupportedFileType(_))
            | Self::Pipeline(PipelineError::UnsupportedLanguage { .. }) => StatusCode::BAD_REQUEST,
            Self::Pipeline(PipelineError::Extraction(_)) => StatusCode::UNPROCESSABLE_ENTITY,
            Self::Pipeline(PipelineError::Inference(_)) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::Multipart(e) => e.status(),
        }
    }

    /// Client-facing message; internal details stay in the logs.
    pub fn message(&self) -> String {
        match self {
            Self::Pipeline(PipelineError::MissingInput) => MISSING_INPUT_MESSAGE.to_string(),
            Self::Pipeline(PipelineError::UnsupportedFileType(_)) => {
                UNSUPPORTED_FILE_TYPE_MESSAGE.to_string()
            }
            Self::Pipeline(PipelineError::UnsupportedLanguage { .. }) => {
                UNSUPPORTED_LANGUAGE_MESSAGE.to_string()
            }
            Self::Pipeline(PipelineError::Extraction(_)) => EXTRACTION_FAILED_MESSAGE.to_string(),
            Self::Pipeline(PipelineError::Inference(_)) => INFERENCE_FAILED_MESSAGE.to_string(),
            Self::Multipart(e) => e.body_text(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();

        match &self {
            Self::Pipeline(PipelineError::Inference(e)) => {
                tracing::error!(error = %e, "Inference failed");
            }
            Self::Pipeline(PipelineError::Extraction(e)) => {
                tracing::warn!(error = %e, "Document extraction failed");
            }
            Self::Pipeline(e) => tracing::warn!(error = %e, "Request rejected"),
            Self::Multipart(e) => tracing::warn!(error = %e, "Failed to read multipart"),
        }

        (
            status,
            Json(ErrorResponse {
                error: self.message(),
            }),
        )
            .into_response()
    }
}
