//! WeatherAPI outbound adapter.
//!
//! This module provides a thin HTTP implementation of the `WeatherLookup`
//! port against the `current.json` endpoint.

mod dto;
mod http_source;

pub use http_source::WeatherApiHttpSource;
