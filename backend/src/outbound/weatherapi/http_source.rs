//! Reqwest-backed WeatherAPI temperature adapter.
//!
//! Transport details only: query construction, credential handling, timeout
//! and HTTP error mapping, and decoding `current.temp_c`. The credential is
//! appended to the request URL last and never appears in spans, logs or
//! error messages.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode, Url};
use tracing::{Instrument, debug};

use super::dto::{CurrentWeatherDto, ErrorEnvelopeDto};
use crate::domain::ports::{SpanFactory, WeatherLookup, WeatherLookupError, attr};
use crate::domain::{CityName, TemperatureReading, convert};

/// Span opened around each WeatherAPI request.
const LOOKUP_SPAN: &str = "weatherapi.lookup_temperature";

/// Weather lookup adapter that performs `GET {base}/v1/current.json` requests.
pub struct WeatherApiHttpSource {
    client: Client,
    base_url: Url,
    api_key: Option<String>,
    spans: Arc<dyn SpanFactory>,
}

impl WeatherApiHttpSource {
    /// Build an adapter using a reqwest client with an explicit request timeout.
    ///
    /// A missing or blank `api_key` is accepted here; every lookup then fails
    /// with [`WeatherLookupError::MissingCredential`] without touching the
    /// network.
    ///
    /// # Errors
    ///
    /// Returns an error when the reqwest client cannot be constructed.
    pub fn new(
        base_url: Url,
        api_key: Option<String>,
        timeout: Duration,
        spans: Arc<dyn SpanFactory>,
    ) -> Result<Self, reqwest::Error> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            base_url,
            api_key: api_key.filter(|key| !key.trim().is_empty()),
            spans,
        })
    }

    fn endpoint(&self) -> Result<Url, WeatherLookupError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|()| {
                WeatherLookupError::unavailable(format!(
                    "weather base URL {} cannot carry a path",
                    self.base_url
                ))
            })?
            .pop_if_empty()
            .extend(["v1", "current.json"]);
        Ok(url)
    }

    async fn fetch_celsius(&self, url: Url) -> Result<f64, WeatherLookupError> {
        let response = self
            .client
            .get(url)
            .header(reqwest::header::ACCEPT, "application/json")
            .send()
            .await
            .map_err(map_transport_error)?;

        let status = response.status();
        let body = response.bytes().await.map_err(map_transport_error)?;
        if !status.is_success() {
            return Err(map_status_error(status, body.as_ref()));
        }
        parse_celsius(body.as_ref())
    }
}

#[async_trait]
impl WeatherLookup for WeatherApiHttpSource {
    async fn lookup_temperature(
        &self,
        city: &CityName,
    ) -> Result<TemperatureReading, WeatherLookupError> {
        let span = self.spans.span(LOOKUP_SPAN);
        span.record(attr::CITY, city.as_str());

        let Some(api_key) = self.api_key.as_deref() else {
            let err = WeatherLookupError::missing_credential();
            span.record(attr::ERROR_KIND, err.kind().as_str());
            return Err(err);
        };

        let endpoint = self.endpoint()?;
        span.record(attr::URL, endpoint.as_str());
        debug!(city = %city, url = %endpoint, "fetching current weather");

        let mut url = endpoint;
        url.query_pairs_mut()
            .append_pair("key", api_key)
            .append_pair("q", city.as_str());

        match self.fetch_celsius(url).instrument(span.clone()).await {
            Ok(celsius) => {
                let reading = convert(celsius);
                span.record(attr::TEMP_C, reading.celsius());
                span.record(attr::TEMP_F, reading.fahrenheit());
                span.record(attr::TEMP_K, reading.kelvin());
                Ok(reading)
            }
            Err(err) => {
                span.record(attr::ERROR_KIND, err.kind().as_str());
                Err(err)
            }
        }
    }
}

fn parse_celsius(body: &[u8]) -> Result<f64, WeatherLookupError> {
    let decoded: CurrentWeatherDto = serde_json::from_slice(body).map_err(|error| {
        WeatherLookupError::decode(format!("invalid WeatherAPI JSON payload: {error}"))
    })?;
    decoded
        .celsius()
        .ok_or_else(|| WeatherLookupError::decode("response is missing current.temp_c"))
}

fn map_transport_error(error: reqwest::Error) -> WeatherLookupError {
    // The request URL carries the credential; drop it before formatting.
    let error = error.without_url();
    if error.is_timeout() {
        WeatherLookupError::unavailable(format!("timed out: {error}"))
    } else {
        WeatherLookupError::unavailable(error.to_string())
    }
}

fn map_status_error(status: StatusCode, body: &[u8]) -> WeatherLookupError {
    let message = serde_json::from_slice::<ErrorEnvelopeDto>(body)
        .unwrap_or_default()
        .into_message()
        .unwrap_or_else(|| {
            status
                .canonical_reason()
                .unwrap_or("unexpected status")
                .to_owned()
        });
    WeatherLookupError::upstream(status.as_u16(), message)
}
