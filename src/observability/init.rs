//! Tracing subscriber setup.

use super::exporter::{file_tracer_provider, SCOPE};
use crate::Config;
use opentelemetry::trace::TracerProvider as _;
use opentelemetry::KeyValue;
use opentelemetry_sdk::resource::Resource;
use tracing_opentelemetry::OpenTelemetryLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Trace file name inside the data directory.
pub const TRACE_FILE: &str = "companyplus-otlp.json";

/// Installs the global subscriber: an `EnvFilter` built from
/// `config.trace_level` (default `"info"`) feeding an OpenTelemetry layer
/// that writes OTLP JSON to `<data dir>/companyplus-otlp.json`.
///
/// Best-effort and idempotent. Without a data directory nothing is installed,
/// and only the first successful call takes effect.
///
/// # Example
///
/// ```rust
/// use companyplus::observability::init_tracing;
/// use companyplus::Config;
///
/// let config = Config {
///     trace_level: Some("debug".to_string()),
///     ..Default::default()
/// };
/// init_tracing(&config);
/// tracing::debug!("tracing is now active");
/// ```
pub fn init_tracing(config: &Config) {
    let level = config.trace_level.as_deref().unwrap_or("info");
    let filter = EnvFilter::try_new(level).unwrap_or_else(|_| EnvFilter::new("info"));

    let Ok(data_dir) = crate::infrastructure::data_dir() else {
        return;
    };

    let resource = Resource::new(vec![
        KeyValue::new("service.name", "COMPANY+"),
        KeyValue::new("service.version", env!("CARGO_PKG_VERSION")),
    ]);
    let provider = file_tracer_provider(data_dir.join(TRACE_FILE), resource);
    let otel_layer = OpenTelemetryLayer::new(provider.tracer(SCOPE));

    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(otel_layer)
        .try_init();
}
