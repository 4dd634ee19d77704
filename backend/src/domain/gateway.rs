//! Forwarding gateway service.
//!
//! Validates the postal code locally and hands valid codes to the
//! [`WeatherForwarder`]. Whatever the resolver answers is relayed unchanged.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{Instrument, warn};

use crate::domain::ports::{RelayedResponse, SpanFactory, WeatherForwarder, WeatherGateway, attr};
use crate::domain::{GatewayError, PostalCode};

/// Span wrapping the call to the resolver.
pub const FORWARD_SPAN: &str = "call_resolver";

/// Gateway service implementing the [`WeatherGateway`] driving port.
#[derive(Clone)]
pub struct GatewayService<F> {
    forwarder: Arc<F>,
    spans: Arc<dyn SpanFactory>,
}

impl<F> GatewayService<F> {
    /// Create a new gateway over `forwarder`.
    pub fn new(forwarder: Arc<F>, spans: Arc<dyn SpanFactory>) -> Self {
        Self { forwarder, spans }
    }
}

#[async_trait]
impl<F> WeatherGateway for GatewayService<F>
where
    F: WeatherForwarder,
{
    async fn relay(&self, raw_code: &str) -> Result<RelayedResponse, GatewayError> {
        let code = PostalCode::parse(raw_code).map_err(|err| GatewayError::InvalidInput {
            detail: err.to_string(),
        })?;

        let span = self.spans.span(FORWARD_SPAN);
        span.record(attr::CEP, code.as_str());
        match self.forwarder.forward(&code).instrument(span.clone()).await {
            Ok(reply) => {
                span.record(attr::STATUS_CODE, reply.status);
                Ok(reply)
            }
            Err(err) => {
                span.record(attr::ERROR_KIND, err.kind().as_str());
                warn!(error = %err, "forwarding to resolver failed");
                Err(GatewayError::DownstreamUnavailable {
                    detail: err.to_string(),
                })
            }
        }
    }
}
