//! Driven port for reading the current temperature of a city.

use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;

use super::define_port_error;
use crate::domain::{CityName, TemperatureReading};

define_port_error! {
    /// Errors surfaced while calling the weather provider.
    pub enum WeatherLookupError {
        /// No provider credential is configured; no request was sent.
        MissingCredential [ConfigurationError] =>
            "weather provider credential is not configured",
        /// Provider could not be reached.
        Unavailable { message: String } [UpstreamUnavailable] =>
            "weather provider unavailable: {message}",
        /// Provider answered with a non-success status.
        Upstream { status: u16, message: String } [UpstreamError] =>
            "weather provider returned status {status}: {message}",
        /// Provider answered successfully with an unreadable payload.
        Decode { message: String } [InternalFailure] =>
            "weather provider response decode failed: {message}",
    }
}

/// Port for reading the current temperature of a city.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait WeatherLookup: Send + Sync {
    /// Fetch the current temperature for `city`, already converted into all
    /// three scales.
    async fn lookup_temperature(
        &self,
        city: &CityName,
    ) -> Result<TemperatureReading, WeatherLookupError>;
}

/// Fixture implementation answering every lookup with one scripted outcome.
#[derive(Debug)]
pub struct FixtureWeatherLookup {
    outcome: Result<TemperatureReading, WeatherLookupError>,
    calls: AtomicUsize,
}

impl FixtureWeatherLookup {
    /// Fixture answering with `reading`.
    pub fn reading(reading: TemperatureReading) -> Self {
        Self::with_outcome(Ok(reading))
    }

    /// Fixture failing every lookup with `error`.
    pub fn failing(error: WeatherLookupError) -> Self {
        Self::with_outcome(Err(error))
    }

    fn with_outcome(outcome: Result<TemperatureReading, WeatherLookupError>) -> Self {
        Self {
            outcome,
            calls: AtomicUsize::new(0),
        }
    }

    /// Number of lookups served so far.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl WeatherLookup for FixtureWeatherLookup {
    async fn lookup_temperature(
        &self,
        _city: &CityName,
    ) -> Result<TemperatureReading, WeatherLookupError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.outcome.clone()
    }
}
