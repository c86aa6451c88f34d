use axum::Json;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use serde::Serialize;

pub const SERVICE_MESSAGE: &str = "Text Analysis API - Summarize | Keywords | Topic Classification";

#[derive(Serialize)]
pub struct RootResponse {
    pub message: String,
}

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: String,
}

pub async fn root_handler() -> impl IntoResponse {
    Json(RootResponse {
        message: SERVICE_MESSAGE.to_string(),
    })
}

pub async fn health_handler() -> impl IntoResponse {
    (
        StatusCode::OK,
        Json(HealthResponse {
            status: "healthy".to_string(),
        }),
    )
}
