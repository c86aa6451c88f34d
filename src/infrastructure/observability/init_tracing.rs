use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, fmt};

use super::TracingConfig;

const FALLBACK_FILTER: &str = "info";

/// Installs the global subscriber. `RUST_LOG` wins over the configured filter.
pub fn init_tracing(config: TracingConfig, port: u16) {
    let (env_filter, filter_source) = match EnvFilter::try_from_default_env() {
        Ok(filter) => (filter, "RUST_LOG"),
        Err(_) => match EnvFilter::try_new(&config.default_filter) {
            Ok(filter) => (filter, "settings"),
            Err(_) => (EnvFilter::new(FALLBACK_FILTER), "fallback"),
        },
    };

    let json_layer = config.json_format.then(|| {
        fmt::layer()
            .json()
            .with_current_span(true)
            .with_target(true)
            .with_file(true)
            .with_line_number(true)
    });
    let text_layer = (!config.json_format).then(|| {
        fmt::layer()
            .with_target(true)
            .with_file(true)
            .with_line_number(true)
    });

    tracing_subscriber::registry()
        .with(env_filter)
        .with(json_layer)
        .with(text_layer)
        .init();

    if filter_source == "fallback" {
        tracing::warn!(
            filter = %config.default_filter,
            "Invalid log filter, using {FALLBACK_FILTER}"
        );
    }

    tracing::info!(
        port = port,
        environment = %config.environment,
        json_format = config.json_format,
        filter_source,
        "Text analysis service logging ready"
    );
}
