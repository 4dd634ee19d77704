//! Driven port used by the gateway to reach the resolver service.

use async_trait::async_trait;

use super::define_port_error;
use crate::domain::PostalCode;

/// Resolver response relayed back to the gateway caller untouched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RelayedResponse {
    /// HTTP status code returned by the resolver.
    pub status: u16,
    /// `Content-Type` header returned by the resolver, if any.
    pub content_type: Option<String>,
    /// Raw response body.
    pub body: Vec<u8>,
}

define_port_error! {
    /// Errors surfaced while forwarding to the resolver.
    pub enum ForwardingError {
        /// Resolver could not be reached or the response could not be read.
        Unavailable { message: String } [UpstreamUnavailable] =>
            "resolver unavailable: {message}",
    }
}

/// Port for forwarding a validated postal code to the resolver.
///
/// Implementations propagate the current trace context on the outbound
/// request. Any HTTP status is a successful forward; only transport failures
/// are errors.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait WeatherForwarder: Send + Sync {
    /// Send `code` to the resolver and capture its reply.
    async fn forward(&self, code: &PostalCode) -> Result<RelayedResponse, ForwardingError>;
}
