//! Tracing initialization and subscriber setup.
//!
//! Wires `tracing` macros through an OpenTelemetry layer into the file
//! exporter in [`super::tracer`].

use super::tracer;
use crate::Config;
use opentelemetry::trace::TracerProvider as _;
use opentelemetry::KeyValue;
use opentelemetry_sdk::resource::Resource;
use tracing_opentelemetry::OpenTelemetryLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// File name of the OTLP trace output inside the data directory.
pub const TRACE_FILE: &str = "veneer-otlp.json";

/// Initializes the tracing subscriber with file-based OTLP export.
///
/// # Trace Level Resolution
///
/// 1. `RUST_LOG` if set and valid
/// 2. `config.trace_level` if set
/// 3. Default: `"info"`
///
/// # File Location
///
/// Traces are written to [`TRACE_FILE`] under
/// [`crate::infrastructure::paths::data_dir`], e.g.
/// `~/.local/share/veneer/veneer-otlp.json`.
///
/// # Initialization Behavior
///
/// - Creates the data directory if it doesn't exist
/// - Does nothing if no data directory can be determined or created
/// - Idempotent: only the first call installs a subscriber
///
/// # Example
///
/// ```rust
/// use veneer::observability::init_tracing;
/// use veneer::Config;
///
/// let config = Config {
///     trace_level: Some("debug".to_string()),
///     ..Default::default()
/// };
///
/// init_tracing(&config);
/// init_tracing(&config);
///
/// tracing::debug!("tracing is now active");
/// ```
pub fn init_tracing(config: &Config) {
    let Some(data_dir) = crate::infrastructure::paths::data_dir() else {
        return;
    };
    if std::fs::create_dir_all(&data_dir).is_err() {
        return;
    }

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(config.trace_level.as_deref().unwrap_or("info"))
    });

    let resource = Resource::new(vec![
        KeyValue::new("service.name", "veneer"),
        KeyValue::new("service.version", env!("CARGO_PKG_VERSION")),
    ]);

    let provider = tracer::create_tracer_provider(data_dir.join(TRACE_FILE), resource);
    let otel_layer = OpenTelemetryLayer::new(provider.tracer(tracer::SCOPE));

    let subscriber = tracing_subscriber::registry().with(filter).with(otel_layer);

    let _ = subscriber.try_init();
}
