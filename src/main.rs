use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use tokio::net::TcpListener;

use halong::application::services::{PipelineOptions, RequestPipeline};
use halong::infrastructure::inference::ModelRegistryFactory;
use halong::infrastructure::language::WhatlangDetector;
use halong::infrastructure::observability::{TracingConfig, init_tracing};
use halong::infrastructure::storage::{load_candidate_labels, load_stopwords};
use halong::infrastructure::text_processing::DocxAdapter;
use halong::presentation::{
    AppState, Environment, ModelProvider, ScaffoldConfig, Settings, create_router,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let environment = Environment::from_env().map_err(anyhow::Error::msg)?;
    let settings = Settings::load(environment).context("failed to load settings")?;

    let json_logs = settings.logging.json
        || environment.is_production()
        || std::env::var("LOG_FORMAT")
            .map(|v| v.eq_ignore_ascii_case("json"))
            .unwrap_or(false);
    init_tracing(
        TracingConfig::new(
            environment.as_str(),
            json_logs,
            settings.logging.level.as_deref(),
        ),
        settings.server.port,
    );

    let scaffold_config = ScaffoldConfig::default();
    let provider = if scaffold_config.enabled {
        tracing::warn!("SCAFFOLD_MODE enabled, serving mock inference resources");
        ModelProvider::Mock
    } else {
        settings.models.provider
    };

    let labels = load_candidate_labels(&settings.resources.labels_path)
        .context("failed to load candidate labels")?;
    let vietnamese_stopwords = load_stopwords(&settings.resources.vietnamese_stopwords_path)
        .context("failed to load Vietnamese stopwords")?;

    let registry = ModelRegistryFactory::create(
        provider,
        &settings.models,
        labels,
        vietnamese_stopwords,
        Duration::from_millis(scaffold_config.mock_response_delay_ms),
    )
    .context("failed to initialize model registry")?;

    let pipeline = Arc::new(RequestPipeline::new(
        Arc::new(DocxAdapter::with_max_body_xml_bytes(
            settings.documents.max_body_xml_bytes,
        )),
        Arc::new(WhatlangDetector::new()),
        Arc::new(registry),
        PipelineOptions {
            inference_timeout: Duration::from_secs(settings.inference.timeout_secs),
            max_keywords: settings.models.keywords.max_keywords,
            topic_top_k: settings.models.topic.top_k,
        },
    ));

    let addr: SocketAddr = format!("{}:{}", settings.server.host, settings.server.port)
        .parse()
        .context("invalid server address")?;

    let router = create_router(AppState { pipeline, settings });

    tracing::info!("Listening on {}", addr);

    let listener = TcpListener::bind(addr).await?;
    axum::serve(listener, router).await?;

    Ok(())
}
