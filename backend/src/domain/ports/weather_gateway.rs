//! Driving port for the forwarding gateway use case.

use async_trait::async_trait;

use super::RelayedResponse;
use crate::domain::GatewayError;

/// Domain use-case port for relaying a postal code to the resolver.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait WeatherGateway: Send + Sync {
    /// Validate `raw_code` locally, then forward it and return the reply.
    async fn relay(&self, raw_code: &str) -> Result<RelayedResponse, GatewayError>;
}
