//! Domain-level error types.
//!
//! These errors are transport agnostic. The inbound HTTP adapter is the only
//! place that turns an [`ErrorKind`] into a status code and a public message.

use std::fmt;

/// Closed failure taxonomy shared by every port and service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// The postal code is not exactly 8 ASCII digits.
    InvalidInput,
    /// The postal code has no known city.
    NotFound,
    /// A provider could not be reached (DNS, refused connection, timeout).
    UpstreamUnavailable,
    /// A provider answered with a non-success status.
    UpstreamError,
    /// Required configuration, such as a provider credential, is missing.
    ConfigurationError,
    /// Anything else, including malformed provider payloads.
    InternalFailure,
}

impl ErrorKind {
    /// Stable snake-case label used in logs and span attributes.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::InvalidInput => "invalid_input",
            Self::NotFound => "not_found",
            Self::UpstreamUnavailable => "upstream_unavailable",
            Self::UpstreamError => "upstream_error",
            Self::ConfigurationError => "configuration_error",
            Self::InternalFailure => "internal_failure",
        }
    }

    /// Whether the kind is reported to callers as itself rather than folded
    /// into the generic failure category.
    pub const fn is_caller_visible(self) -> bool {
        matches!(self, Self::InvalidInput | Self::NotFound)
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Sequential stages of the resolution pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PipelineStage {
    /// Check the raw input is a well-formed postal code.
    Validate,
    /// Look up the city for the postal code.
    ResolveCity,
    /// Look up the current temperature for the city.
    ResolveTemperature,
    /// Build the response payload.
    Assemble,
}

impl PipelineStage {
    /// Span name used when the stage executes.
    pub const fn span_name(self) -> &'static str {
        match self {
            Self::Validate => "validate_cep",
            Self::ResolveCity => "resolve_city",
            Self::ResolveTemperature => "resolve_temperature",
            Self::Assemble => "assemble_result",
        }
    }
}

impl fmt::Display for PipelineStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.span_name())
    }
}

/// Classified failure of one pipeline run.
///
/// ## Invariants
/// - `kind` is always one of the [`ErrorKind`] variants; raw provider text only
///   ever lives in `detail`, which is for logs.
///
/// # Examples
/// ```
/// use cep_weather::domain::{ErrorKind, PipelineStage, ResolutionError};
///
/// let err = ResolutionError::new(ErrorKind::NotFound, PipelineStage::ResolveCity, "no city");
/// assert_eq!(err.kind(), ErrorKind::NotFound);
/// assert_eq!(err.stage(), PipelineStage::ResolveCity);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{stage} failed ({kind}): {detail}")]
pub struct ResolutionError {
    kind: ErrorKind,
    stage: PipelineStage,
    detail: String,
}

impl ResolutionError {
    /// Create a new classified error.
    pub fn new(kind: ErrorKind, stage: PipelineStage, detail: impl Into<String>) -> Self {
        Self {
            kind,
            stage,
            detail: detail.into(),
        }
    }

    /// Convenience constructor for malformed postal codes.
    pub fn invalid_input(detail: impl Into<String>) -> Self {
        Self::new(ErrorKind::InvalidInput, PipelineStage::Validate, detail)
    }

    /// Failure classification.
    pub const fn kind(&self) -> ErrorKind {
        self.kind
    }

    /// Stage that produced the failure.
    pub const fn stage(&self) -> PipelineStage {
        self.stage
    }

    /// Diagnostic text for logs. Never returned to callers.
    pub fn detail(&self) -> &str {
        self.detail.as_str()
    }
}

/// Failures of the forwarding gateway.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GatewayError {
    /// The postal code failed local validation; the resolver was not called.
    #[error("invalid postal code: {detail}")]
    InvalidInput {
        /// Validation failure description.
        detail: String,
    },
    /// The resolver could not be reached.
    #[error("resolver unavailable: {detail}")]
    DownstreamUnavailable {
        /// Transport failure description.
        detail: String,
    },
}

impl GatewayError {
    /// Failure classification.
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::InvalidInput { .. } => ErrorKind::InvalidInput,
            Self::DownstreamUnavailable { .. } => ErrorKind::UpstreamUnavailable,
        }
    }
}
