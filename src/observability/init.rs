//! Tracing initialization and subscriber setup.

use super::tracer;
use crate::Config;
use opentelemetry::trace::TracerProvider as _;
use opentelemetry_sdk::resource::Resource;
use tracing_opentelemetry::OpenTelemetryLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// File name of the span log inside the data directory.
pub const TRACE_FILE_NAME: &str = "hireflow-traces.jsonl";

const SERVICE_NAME: &str = "hireflow";

/// Installs the global tracing subscriber.
///
/// Spans pass an [`EnvFilter`] built from `config.trace_level` (default
/// `"info"`) and are exported through OpenTelemetry as JSON lines into
/// [`TRACE_FILE_NAME`] under the data directory.
///
/// Tracing is optional: if the data directory cannot be created, or a global
/// subscriber is already installed, the call does nothing. Only the first
/// successful call takes effect.
///
/// # Example
///
/// ```rust,no_run
/// use hireflow::observability::init_tracing;
/// use hireflow::Config;
///
/// let config = Config {
///     trace_level: Some("debug".to_string()),
///     ..Default::default()
/// };
/// init_tracing(&config);
/// tracing::debug!("tracing is now active");
/// ```
pub fn init_tracing(config: &Config) {
    let level = config
        .trace_level
        .clone()
        .unwrap_or_else(|| "info".to_string());

    let data_dir = crate::infrastructure::get_data_dir(config.data_dir.as_deref());
    if let Err(e) = std::fs::create_dir_all(&data_dir) {
        eprintln!("hireflow: tracing disabled, cannot create {}: {e}", data_dir.display());
        return;
    }

    let resource = Resource::new(vec![opentelemetry::KeyValue::new(
        "service.name",
        SERVICE_NAME,
    )]);

    let provider = tracer::create_tracer_provider(data_dir.join(TRACE_FILE_NAME), resource);
    let otel_layer = OpenTelemetryLayer::new(provider.tracer(SERVICE_NAME));

    let subscriber = tracing_subscriber::registry()
        .with(EnvFilter::new(level))
        .with(otel_layer);

    let _ = subscriber.try_init();
}
