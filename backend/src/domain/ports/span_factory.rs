//! Span creation port.
//!
//! Services and adapters receive a [`SpanFactory`] at construction time rather
//! than reaching for a process-wide tracer. Production wiring uses
//! [`TracingSpanFactory`]; tests use [`NoopSpanFactory`] or a recording double.
//!
//! Every span carries the same fixed set of attribute slots so adapters can
//! record whatever applies to them with [`tracing::Span::record`]. Recording
//! on a disabled span is a no-op and never affects control flow.

use tracing::{Span, field, info_span};

/// Attribute slot names declared on every span.
pub mod attr {
    /// Postal code being resolved.
    pub const CEP: &str = "cep";
    /// Resolved city name.
    pub const CITY: &str = "city";
    /// Outbound request URL (never including credentials).
    pub const URL: &str = "url";
    /// Temperature in Celsius.
    pub const TEMP_C: &str = "temp_c";
    /// Temperature in Fahrenheit.
    pub const TEMP_F: &str = "temp_f";
    /// Temperature in Kelvin.
    pub const TEMP_K: &str = "temp_k";
    /// HTTP status code of a downstream response.
    pub const STATUS_CODE: &str = "http.status_code";
    /// Error classification when the operation failed.
    pub const ERROR_KIND: &str = "error.kind";
}

/// Port for opening named trace spans.
#[cfg_attr(test, mockall::automock)]
pub trait SpanFactory: Send + Sync {
    /// Open a span named `name` as a child of the current span.
    fn span(&self, name: &'static str) -> Span;
}

/// Factory backed by the `tracing` dispatcher in scope.
///
/// The span name is exported to OpenTelemetry through the `otel.name` field.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingSpanFactory;

impl SpanFactory for TracingSpanFactory {
    fn span(&self, name: &'static str) -> Span {
        info_span!(
            "cep_weather.operation",
            otel.name = name,
            cep = field::Empty,
            city = field::Empty,
            url = field::Empty,
            temp_c = field::Empty,
            temp_f = field::Empty,
            temp_k = field::Empty,
            http.status_code = field::Empty,
            error.kind = field::Empty,
        )
    }
}

/// Factory that hands out disabled spans.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopSpanFactory;

impl SpanFactory for NoopSpanFactory {
    fn span(&self, _name: &'static str) -> Span {
        Span::none()
    }
}
