//! DTOs for decoding WeatherAPI `current.json` responses.

use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub(super) struct CurrentWeatherDto {
    #[serde(default)]
    pub(super) current: Option<CurrentConditionsDto>,
}

#[derive(Debug, Deserialize)]
pub(super) struct CurrentConditionsDto {
    #[serde(default)]
    pub(super) temp_c: Option<f64>,
}

/// Error envelope sent alongside non-success statuses.
#[derive(Debug, Default, Deserialize)]
pub(super) struct ErrorEnvelopeDto {
    #[serde(default)]
    pub(super) error: Option<ErrorBodyDto>,
}

#[derive(Debug, Default, Deserialize)]
pub(super) struct ErrorBodyDto {
    #[serde(default)]
    pub(super) message: Option<String>,
}

impl CurrentWeatherDto {
    pub(super) fn celsius(&self) -> Option<f64> {
        self.current.as_ref().and_then(|current| current.temp_c)
    }
}

impl ErrorEnvelopeDto {
    pub(super) fn into_message(self) -> Option<String> {
        self.error
            .and_then(|error| error.message)
            .filter(|message| !message.trim().is_empty())
    }
}
