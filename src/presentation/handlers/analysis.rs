use axum::Json;
use axum::extract::multipart::MultipartRejection;
use axum::extract::{Multipart, State};
use axum::response::{IntoResponse, Response};
use serde::Serialize;

use crate::application::ports::{DocumentExtractor, LanguageDetector};
use crate::domain::{AnalysisResponse, InferenceRequest, InferenceResult, Task, UploadedDocument};
use crate::presentation::state::AppState;

use super::error::ApiError;

pub const TEXT_FIELD: &str = "text";
pub const FILE_FIELD: &str = "file";

#[derive(Debug, Serialize)]
pub struct SummaryResponse {
    pub language: String,
    pub summary: String,
}

#[derive(Debug, Serialize)]
pub struct KeywordsResponse {
    pub language: String,
    pub keywords: Vec<String>,
}

#[derive(Debug, Serialize)]
pub struct TopicEntry {
    pub label: String,
    pub score: f32,
}

#[derive(Debug, Serialize)]
pub struct TopicResponse {
    pub language: String,
    pub topics: Vec<TopicEntry>,
}

#[tracing::instrument(skip(state, multipart))]
pub async fn summary_handler<E, D>(
    State(state): State<AppState<E, D>>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Response, ApiError>
where
    E: DocumentExtractor + 'static,
    D: LanguageDetector + 'static,
{
    analyze(&state, Task::Summarize, multipart).await
}

#[tracing::instrument(skip(state, multipart))]
pub async fn keywords_handler<E, D>(
    State(state): State<AppState<E, D>>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Response, ApiError>
where
    E: DocumentExtractor + 'static,
    D: LanguageDetector + 'static,
{
    analyze(&state, Task::Keywords, multipart).await
}

#[tracing::instrument(skip(state, multipart))]
pub async fn topic_handler<E, D>(
    State(state): State<AppState<E, D>>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Response, ApiError>
where
    E: DocumentExtractor + 'static,
    D: LanguageDetector + 'static,
{
    analyze(&state, Task::Topic, multipart).await
}

async fn analyze<E, D>(
    state: &AppState<E, D>,
    task: Task,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Response, ApiError>
where
    E: DocumentExtractor + 'static,
    D: LanguageDetector + 'static,
{
    let request = match multipart {
        Ok(multipart) => read_form(multipart).await?,
        Err(rejection) => {
            tracing::debug!(reason = %rejection, "Request body is not multipart");
            InferenceRequest::default()
        }
    };

    let response = state.pipeline.handle(task, request).await?;

    tracing::info!(task = %task, language = %response.language, "Analysis request completed");

    Ok(into_json(response))
}

/// Collects the `text` and `file` parts; unknown parts are skipped.
async fn read_form(mut multipart: Multipart) -> Result<InferenceRequest, ApiError> {
    let mut request = InferenceRequest::default();

    while let Some(field) = multipart.next_field().await? {
        let name = field.name().map(str::to_owned);
        match name.as_deref() {
            Some(TEXT_FIELD) => {
                request.raw_text = Some(field.text().await?);
            }
            Some(FILE_FIELD) => {
                let filename = field.file_name().unwrap_or_default().to_string();
                let data = field.bytes().await?;
                tracing::debug!(filename = %filename, bytes = data.len(), "File part received");
                request.uploaded_document = Some(UploadedDocument::new(filename, data.to_vec()));
            }
            other => {
                tracing::debug!(field = ?other, "Ignoring unknown multipart field");
            }
        }
    }

    Ok(request)
}

fn into_json(response: AnalysisResponse) -> Response {
    let language = response.language.code().to_string();

    match response.result {
        InferenceResult::Summary(summary) => Json(SummaryResponse {
            language,
            summary: summary.text,
        })
        .into_response(),
        InferenceResult::Keywords(keywords) => Json(KeywordsResponse {
            language,
            keywords: keywords.keywords,
        })
        .into_response(),
        InferenceResult::Topics(topics) => Json(TopicResponse {
            language,
            topics: topics
                .topics
                .into_iter()
                .map(|t| TopicEntry {
                    label: t.label,
                    score: t.score,
                })
                .collect(),
        })
        .into_response(),
    }
}
