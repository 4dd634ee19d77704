//! HTTP adapter mapping for domain errors.
//!
//! Purpose: keep the domain error types HTTP-agnostic while turning every
//! failure into a `{"error": "<message>"}` body with a fixed status code.
//! Provider detail never reaches the response body; it is logged instead.

use actix_web::{HttpResponse, ResponseError, http::StatusCode};
use serde::{Deserialize, Serialize};
use tracing::{debug, error};

use crate::domain::{ErrorKind, GatewayError, PipelineStage, ResolutionError};
use crate::middleware::trace::TraceId;

/// Convenient result alias for HTTP handlers.
pub type ApiResult<T> = Result<T, ApiError>;

/// Error response payload.
///
/// Example JSON: `{"error": "invalid zipcode"}`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, utoipa::ToSchema)]
pub struct ErrorBody {
    /// Public, stable error message.
    #[schema(example = "invalid zipcode")]
    pub error: String,
}

/// Public failure categories. The display text is the response message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum ApiError {
    /// Postal code is not eight ASCII digits.
    #[error("invalid zipcode")]
    InvalidZipcode,
    /// Postal code has no known city.
    #[error("can not find zipcode")]
    ZipcodeNotFound,
    /// Temperature lookup failed for any reason.
    #[error("failed to get weather data")]
    WeatherUnavailable,
    /// Any other server-side failure.
    #[error("internal server error")]
    Internal,
    /// Request body is not JSON or lacks a `cep` field.
    #[error("invalid request format")]
    InvalidRequestFormat,
    /// The gateway could not reach the resolver.
    #[error("error calling service B")]
    ResolverUnreachable,
}

impl From<&ResolutionError> for ApiError {
    fn from(err: &ResolutionError) -> Self {
        match (err.kind(), err.stage()) {
            (ErrorKind::InvalidInput, _) => Self::InvalidZipcode,
            (ErrorKind::NotFound, _) => Self::ZipcodeNotFound,
            (_, PipelineStage::ResolveTemperature) => Self::WeatherUnavailable,
            _ => Self::Internal,
        }
    }
}

impl From<ResolutionError> for ApiError {
    fn from(err: ResolutionError) -> Self {
        Self::from(&err)
    }
}

impl From<GatewayError> for ApiError {
    fn from(err: GatewayError) -> Self {
        match err {
            GatewayError::InvalidInput { .. } => Self::InvalidZipcode,
            GatewayError::DownstreamUnavailable { .. } => Self::ResolverUnreachable,
        }
    }
}

impl ApiError {
    /// Response payload for this error.
    pub fn body(self) -> ErrorBody {
        ErrorBody {
            error: self.to_string(),
        }
    }
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            Self::InvalidZipcode => StatusCode::UNPROCESSABLE_ENTITY,
            Self::ZipcodeNotFound => StatusCode::NOT_FOUND,
            Self::InvalidRequestFormat => StatusCode::BAD_REQUEST,
            Self::WeatherUnavailable | Self::Internal | Self::ResolverUnreachable => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    fn error_response(&self) -> HttpResponse {
        let status = self.status_code();
        let trace_id = TraceId::current().map(|id| id.to_string());
        if status.is_server_error() {
            error!(status = status.as_u16(), trace_id = trace_id.as_deref(), message = %self, "request failed");
        } else {
            debug!(status = status.as_u16(), trace_id = trace_id.as_deref(), message = %self, "request rejected");
        }
        HttpResponse::build(status).json(self.body())
    }
}
