//! Logging and OpenTelemetry bootstrap shared by both binaries.
//!
//! Installs a JSON `tracing` subscriber whose log output is filtered by
//! `RUST_LOG`, plus a `tracing-opentelemetry` layer that is always present so
//! spans carry trace context for propagation. Spans are exported over
//! OTLP/HTTP only when a collector endpoint is configured. No process-global
//! tracer provider or propagator is registered; the propagator is built here
//! and handed to the components that need it.

use std::sync::Arc;

use opentelemetry::KeyValue;
use opentelemetry::propagation::{TextMapCompositePropagator, TextMapPropagator};
use opentelemetry::trace::TracerProvider as _;
use opentelemetry_otlp::WithExportConfig;
use opentelemetry_sdk::Resource;
use opentelemetry_sdk::propagation::{BaggagePropagator, TraceContextPropagator};
use opentelemetry_sdk::trace::SdkTracerProvider;
use tracing::Subscriber;
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer, fmt};

/// Shared trace-context propagator handle.
pub type SharedPropagator = Arc<dyn TextMapPropagator + Send + Sync>;

/// Failures while installing telemetry.
#[derive(Debug, thiserror::Error)]
pub enum TelemetryError {
    /// The service name was blank.
    #[error("service name must not be empty")]
    EmptyServiceName,
    /// The OTLP exporter could not be built.
    #[error("failed to build OTLP span exporter: {0}")]
    Exporter(#[from] opentelemetry_otlp::ExporterBuildError),
    /// A global subscriber was already installed.
    #[error("failed to install tracing subscriber: {0}")]
    Subscriber(#[from] tracing_subscriber::util::TryInitError),
}

/// Telemetry options read from service settings.
#[derive(Debug, Clone)]
pub struct TelemetryConfig {
    /// `service.name` resource attribute on exported spans.
    pub service_name: String,
    /// OTLP/HTTP traces endpoint, e.g. `http://otel-collector:4318/v1/traces`.
    pub collector_endpoint: Option<String>,
}

/// Shuts the tracer provider down on drop, flushing buffered spans.
#[derive(Debug, Default)]
pub struct TelemetryGuard {
    provider: Option<SdkTracerProvider>,
    exporting: bool,
}

impl TelemetryGuard {
    /// Whether spans are being exported.
    pub fn is_exporting(&self) -> bool {
        self.exporting
    }
}

impl Drop for TelemetryGuard {
    fn drop(&mut self) {
        if let Some(provider) = self.provider.take() {
            if let Err(error) = provider.shutdown() {
                tracing::warn!(%error, "tracer provider shutdown failed");
            }
        }
    }
}

/// Build the W3C trace-context plus baggage propagator.
///
/// # Examples
/// ```
/// use cep_weather::telemetry::build_propagator;
/// use opentelemetry::propagation::TextMapPropagator;
///
/// let propagator = build_propagator();
/// let fields: Vec<_> = propagator.fields().collect();
/// assert!(fields.contains(&"traceparent"));
/// assert!(fields.contains(&"baggage"));
/// ```
pub fn build_propagator() -> SharedPropagator {
    Arc::new(TextMapCompositePropagator::new(vec![
        Box::new(TraceContextPropagator::new()),
        Box::new(BaggagePropagator::new()),
    ]))
}

/// Install the global `tracing` subscriber.
///
/// Call before starting the async runtime: the OTLP exporter uses a blocking
/// HTTP client.
///
/// # Errors
///
/// Returns [`TelemetryError`] when the exporter cannot be built or a
/// subscriber is already installed.
pub fn init(config: &TelemetryConfig) -> Result<TelemetryGuard, TelemetryError> {
    let provider = tracer_provider(config)?;
    subscriber(config, &provider).try_init()?;

    Ok(TelemetryGuard {
        provider: Some(provider),
        exporting: config.collector_endpoint.is_some(),
    })
}

/// Build the tracer provider backing the OpenTelemetry layer.
///
/// The provider always exists so spans get real trace and span ids; a batch
/// OTLP exporter is attached only when `collector_endpoint` is set.
///
/// # Errors
///
/// Returns [`TelemetryError::EmptyServiceName`] for a blank service name and
/// [`TelemetryError::Exporter`] when the exporter cannot be built.
pub fn tracer_provider(config: &TelemetryConfig) -> Result<SdkTracerProvider, TelemetryError> {
    if config.service_name.trim().is_empty() {
        return Err(TelemetryError::EmptyServiceName);
    }

    let resource = Resource::builder_empty()
        .with_attributes([KeyValue::new("service.name", config.service_name.clone())])
        .build();
    let mut builder = SdkTracerProvider::builder().with_resource(resource);
    if let Some(endpoint) = config.collector_endpoint.as_deref() {
        let exporter = opentelemetry_otlp::SpanExporter::builder()
            .with_http()
            .with_endpoint(endpoint)
            .build()?;
        builder = builder.with_batch_exporter(exporter);
    }
    Ok(builder.build())
}

/// Compose the JSON log layer and the OpenTelemetry layer.
///
/// `RUST_LOG` filters log output only. The OpenTelemetry layer sees every
/// span at `INFO` and above, so trace context survives a quiet log level.
pub fn subscriber(
    config: &TelemetryConfig,
    provider: &SdkTracerProvider,
) -> impl Subscriber + Send + Sync + 'static {
    let otel_layer = tracing_opentelemetry::layer()
        .with_tracer(provider.tracer(config.service_name.clone()))
        .with_filter(LevelFilter::INFO);

    tracing_subscriber::registry()
        .with(fmt::layer().json().with_filter(EnvFilter::from_default_env()))
        .with(otel_layer)
}
