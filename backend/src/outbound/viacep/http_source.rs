//! Reqwest-backed ViaCEP postal lookup adapter.
//!
//! This adapter owns transport details only: URL construction, timeout and
//! HTTP error mapping, and JSON decoding into a [`CityName`].

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Url};
use tracing::{Instrument, debug};

use super::dto::ViaCepAddressDto;
use crate::domain::ports::{PostalLookup, PostalLookupError, SpanFactory, attr};
use crate::domain::{CityName, PostalCode};

/// Span opened around each ViaCEP request.
const LOOKUP_SPAN: &str = "viacep.lookup_city";

/// Postal lookup adapter that performs `GET {base}/ws/{cep}/json/` requests.
pub struct ViaCepHttpSource {
    client: Client,
    base_url: Url,
    spans: Arc<dyn SpanFactory>,
}

impl ViaCepHttpSource {
    /// Build an adapter using a reqwest client with an explicit request timeout.
    ///
    /// # Errors
    ///
    /// Returns an error when the reqwest client cannot be constructed.
    pub fn new(
        base_url: Url,
        timeout: Duration,
        spans: Arc<dyn SpanFactory>,
    ) -> Result<Self, reqwest::Error> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            base_url,
            spans,
        })
    }

    fn lookup_url(&self, code: &PostalCode) -> Result<Url, PostalLookupError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|()| {
                PostalLookupError::unavailable(format!(
                    "postal base URL {} cannot carry a path",
                    self.base_url
                ))
            })?
            .pop_if_empty()
            .extend(["ws", code.as_str(), "json", ""]);
        Ok(url)
    }

    async fn fetch_city(&self, url: Url) -> Result<CityName, PostalLookupError> {
        let response = self
            .client
            .get(url)
            .header(reqwest::header::ACCEPT, "application/json")
            .send()
            .await
            .map_err(map_transport_error)?;

        let status = response.status();
        if !status.is_success() {
            return Err(PostalLookupError::not_found(format!(
                "status {}",
                status.as_u16()
            )));
        }

        let body = response.bytes().await.map_err(map_transport_error)?;
        parse_city(body.as_ref())
    }
}

#[async_trait]
impl PostalLookup for ViaCepHttpSource {
    async fn lookup_city(&self, code: &PostalCode) -> Result<CityName, PostalLookupError> {
        let span = self.spans.span(LOOKUP_SPAN);
        span.record(attr::CEP, code.as_str());
        let url = self.lookup_url(code)?;
        span.record(attr::URL, url.as_str());
        debug!(cep = %code, url = %url, "looking up postal code");

        match self.fetch_city(url).instrument(span.clone()).await {
            Ok(city) => {
                span.record(attr::CITY, city.as_str());
                Ok(city)
            }
            Err(err) => {
                span.record(attr::ERROR_KIND, err.kind().as_str());
                Err(err)
            }
        }
    }
}

fn parse_city(body: &[u8]) -> Result<CityName, PostalLookupError> {
    let decoded: ViaCepAddressDto = serde_json::from_slice(body).map_err(|error| {
        PostalLookupError::decode(format!("invalid ViaCEP JSON payload: {error}"))
    })?;
    let city = decoded
        .into_city()
        .ok_or_else(|| PostalLookupError::not_found("no locality for postal code"))?;
    CityName::new(city).map_err(|err| PostalLookupError::not_found(err.to_string()))
}

fn map_transport_error(error: reqwest::Error) -> PostalLookupError {
    if error.is_timeout() {
        PostalLookupError::unavailable(format!("timed out: {error}"))
    } else {
        PostalLookupError::unavailable(error.to_string())
    }
}
