use axum::Router;
use axum::extract::DefaultBodyLimit;
use axum::middleware;
use axum::routing::{get, post};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::Level;

use crate::application::ports::{DocumentExtractor, LanguageDetector};
use crate::infrastructure::observability::request_id_middleware;
use crate::presentation::handlers::{
    health_handler, keywords_handler, root_handler, summary_handler, topic_handler,
};
use crate::presentation::state::AppState;

pub fn create_router<E, D>(state: AppState<E, D>) -> Router
where
    E: DocumentExtractor + 'static,
    D: LanguageDetector + 'static,
{
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let trace_layer = TraceLayer::new_for_http()
        .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
        .on_response(DefaultOnResponse::new().level(Level::INFO));

    let body_limit = DefaultBodyLimit::max(state.settings.server.max_upload_bytes);

    Router::new()
        .route("/", get(root_handler))
        .route("/health", get(health_handler))
        .route("/summary", post(summary_handler::<E, D>))
        .route("/keywords", post(keywords_handler::<E, D>))
        .route("/topic", post(topic_handler::<E, D>))
        .layer(body_limit)
        .layer(middleware::from_fn(request_id_middleware))
        .layer(trace_layer)
        .layer(cors)
        .with_state(state)
}
