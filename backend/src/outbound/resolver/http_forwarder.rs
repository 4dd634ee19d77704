//! Reqwest-backed forwarder posting postal codes to the resolver service.
//!
//! The active trace context is injected into the outbound headers so the
//! resolver's spans join the gateway's trace. Any HTTP status is relayed as a
//! successful forward; only transport failures are errors.

use std::time::Duration;

use async_trait::async_trait;
use opentelemetry::propagation::Injector;
use reqwest::header::{CONTENT_TYPE, HeaderMap, HeaderName, HeaderValue};
use reqwest::{Client, Url};
use serde::Serialize;
use tracing::{Span, debug};
use tracing_opentelemetry::OpenTelemetrySpanExt;

use crate::domain::PostalCode;
use crate::domain::ports::{ForwardingError, RelayedResponse, WeatherForwarder};
use crate::telemetry::SharedPropagator;

#[derive(Debug, Serialize)]
struct ForwardRequestDto<'a> {
    cep: &'a str,
}

struct OutboundHeaders<'a>(&'a mut HeaderMap);

impl Injector for OutboundHeaders<'_> {
    fn set(&mut self, key: &str, value: String) {
        if let (Ok(name), Ok(value)) = (
            HeaderName::from_bytes(key.as_bytes()),
            HeaderValue::from_str(&value),
        ) {
            self.0.insert(name, value);
        }
    }
}

/// Forwarder performing `POST {resolver_url}` with `{"cep": "..."}`.
pub struct ResolverHttpForwarder {
    client: Client,
    endpoint: Url,
    propagator: SharedPropagator,
}

impl ResolverHttpForwarder {
    /// Build a forwarder using a reqwest client with an explicit request timeout.
    ///
    /// # Errors
    ///
    /// Returns an error when the reqwest client cannot be constructed.
    pub fn new(
        endpoint: Url,
        timeout: Duration,
        propagator: SharedPropagator,
    ) -> Result<Self, reqwest::Error> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            endpoint,
            propagator,
        })
    }

    fn trace_headers(&self) -> HeaderMap {
        let mut headers = HeaderMap::new();
        let cx = Span::current().context();
        self.propagator
            .inject_context(&cx, &mut OutboundHeaders(&mut headers));
        headers
    }
}

#[async_trait]
impl WeatherForwarder for ResolverHttpForwarder {
    async fn forward(&self, code: &PostalCode) -> Result<RelayedResponse, ForwardingError> {
        let headers = self.trace_headers();
        debug!(
            cep = %code,
            url = %self.endpoint,
            propagated = headers.len(),
            "forwarding to resolver"
        );

        let response = self
            .client
            .post(self.endpoint.clone())
            .headers(headers)
            .json(&ForwardRequestDto {
                cep: code.as_str(),
            })
            .send()
            .await
            .map_err(map_transport_error)?;

        let status = response.status().as_u16();
        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .map(str::to_owned);
        let body = response.bytes().await.map_err(map_transport_error)?;

        Ok(RelayedResponse {
            status,
            content_type,
            body: body.to_vec(),
        })
    }
}

fn map_transport_error(error: reqwest::Error) -> ForwardingError {
    if error.is_timeout() {
        ForwardingError::unavailable(format!("timed out: {error}"))
    } else {
        ForwardingError::unavailable(error.to_string())
    }
}
