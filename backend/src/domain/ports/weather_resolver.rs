//! Driving port for the CEP to temperature resolution use case.
//!
//! Inbound adapters hand over the raw path or body value; validation is part
//! of the use case so every entry point classifies bad input the same way.

use async_trait::async_trait;

use crate::domain::{CityName, ResolutionError, TemperatureReading};

/// Successful outcome of one resolution run.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolutionResult {
    /// City the postal code belongs to.
    pub city: CityName,
    /// Current temperature for that city.
    pub temperature: TemperatureReading,
}

/// Domain use-case port for resolving a postal code into a temperature.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait WeatherResolver: Send + Sync {
    /// Validate `raw_code`, look up its city, then the city's temperature.
    async fn resolve(&self, raw_code: &str) -> Result<ResolutionResult, ResolutionError>;
}
