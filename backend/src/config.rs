//! Service settings loaded via OrthoConfig.
//!
//! Each binary reads one settings struct from environment variables (and the
//! matching CLI flags). Optional string settings fall back to the defaults
//! below through accessor methods; URLs are parsed once at startup so that a
//! typo fails fast with the offending setting named in the error.

use std::net::{Ipv4Addr, SocketAddr};
use std::time::Duration;

use ortho_config::OrthoConfig;
use serde::Deserialize;
use url::Url;

use crate::telemetry::TelemetryConfig;

const DEFAULT_POSTAL_BASE_URL: &str = "https://viacep.com.br";
const DEFAULT_WEATHER_BASE_URL: &str = "https://api.weatherapi.com";
const DEFAULT_RESOLVER_URL: &str = "http://service-b:8081/weather";
const DEFAULT_RESOLVER_SERVICE_NAME: &str = "cep-weather-resolver";
const DEFAULT_GATEWAY_SERVICE_NAME: &str = "cep-weather-gateway";

/// A configured value could not be turned into a usable setting.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// The value is not a URL at all.
    #[error("{setting} is not a valid URL ({value}): {source}")]
    InvalidUrl {
        setting: &'static str,
        value: String,
        #[source]
        source: url::ParseError,
    },
    /// The URL parsed but cannot be used for HTTP requests.
    #[error("{setting} must be an http or https URL, got {value}")]
    UnsupportedScheme { setting: &'static str, value: String },
    /// A zero timeout would fail every outbound call.
    #[error("{setting} must be greater than zero")]
    ZeroTimeout { setting: &'static str },
}

fn parse_http_url(setting: &'static str, value: &str) -> Result<Url, ConfigError> {
    let url = Url::parse(value).map_err(|source| ConfigError::InvalidUrl {
        setting,
        value: value.to_owned(),
        source,
    })?;
    match url.scheme() {
        "http" | "https" => Ok(url),
        _ => Err(ConfigError::UnsupportedScheme {
            setting,
            value: value.to_owned(),
        }),
    }
}

fn timeout_from_secs(setting: &'static str, secs: u64) -> Result<Duration, ConfigError> {
    if secs == 0 {
        return Err(ConfigError::ZeroTimeout { setting });
    }
    Ok(Duration::from_secs(secs))
}

fn listen_on(port: u16) -> SocketAddr {
    SocketAddr::from((Ipv4Addr::UNSPECIFIED, port))
}

/// Settings for the resolver service (`RESOLVER_*`).
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "RESOLVER")]
pub struct ResolverSettings {
    /// TCP port to listen on.
    #[ortho_config(default = 8081)]
    pub port: u16,
    /// WeatherAPI credential. Requests fail with a configuration error while
    /// it is unset.
    pub weather_api_key: Option<String>,
    /// Base URL of the postal code provider.
    pub postal_base_url: Option<String>,
    /// Base URL of the weather provider.
    pub weather_base_url: Option<String>,
    /// Per-request timeout for provider calls, in seconds.
    #[ortho_config(default = 10)]
    pub timeout_secs: u64,
    /// OTLP/HTTP traces endpoint; spans are only logged when unset.
    pub collector_endpoint: Option<String>,
    /// `service.name` reported on exported spans.
    pub service_name: Option<String>,
}

impl ResolverSettings {
    /// Address the HTTP listener binds to.
    pub fn bind_addr(&self) -> SocketAddr {
        listen_on(self.port)
    }

    /// Parsed postal provider base URL.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when the configured value is not an HTTP URL.
    pub fn postal_base_url(&self) -> Result<Url, ConfigError> {
        parse_http_url(
            "postal_base_url",
            self.postal_base_url
                .as_deref()
                .unwrap_or(DEFAULT_POSTAL_BASE_URL),
        )
    }

    /// Parsed weather provider base URL.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when the configured value is not an HTTP URL.
    pub fn weather_base_url(&self) -> Result<Url, ConfigError> {
        parse_http_url(
            "weather_base_url",
            self.weather_base_url
                .as_deref()
                .unwrap_or(DEFAULT_WEATHER_BASE_URL),
        )
    }

    /// Outbound request timeout.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::ZeroTimeout`] for a zero value.
    pub fn timeout(&self) -> Result<Duration, ConfigError> {
        timeout_from_secs("timeout_secs", self.timeout_secs)
    }

    pub fn telemetry_config(&self) -> TelemetryConfig {
        TelemetryConfig {
            service_name: self
                .service_name
                .clone()
                .unwrap_or_else(|| DEFAULT_RESOLVER_SERVICE_NAME.to_owned()),
            collector_endpoint: self.collector_endpoint.clone(),
        }
    }
}

/// Settings for the gateway service (`GATEWAY_*`).
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "GATEWAY")]
pub struct GatewaySettings {
    /// TCP port to listen on.
    #[ortho_config(default = 8080)]
    pub port: u16,
    /// Full URL of the resolver's `POST /weather` endpoint.
    pub resolver_url: Option<String>,
    /// Timeout for the downstream call, in seconds.
    #[ortho_config(default = 10)]
    pub timeout_secs: u64,
    /// OTLP/HTTP traces endpoint; spans are only logged when unset.
    pub collector_endpoint: Option<String>,
    /// `service.name` reported on exported spans.
    pub service_name: Option<String>,
}

impl GatewaySettings {
    /// Address the HTTP listener binds to.
    pub fn bind_addr(&self) -> SocketAddr {
        listen_on(self.port)
    }

    /// Parsed resolver endpoint.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when the configured value is not an HTTP URL.
    pub fn resolver_url(&self) -> Result<Url, ConfigError> {
        parse_http_url(
            "resolver_url",
            self.resolver_url.as_deref().unwrap_or(DEFAULT_RESOLVER_URL),
        )
    }

    /// Downstream request timeout.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::ZeroTimeout`] for a zero value.
    pub fn timeout(&self) -> Result<Duration, ConfigError> {
        timeout_from_secs("timeout_secs", self.timeout_secs)
    }

    pub fn telemetry_config(&self) -> TelemetryConfig {
        TelemetryConfig {
            service_name: self
                .service_name
                .clone()
                .unwrap_or_else(|| DEFAULT_GATEWAY_SERVICE_NAME.to_owned()),
            collector_endpoint: self.collector_endpoint.clone(),
        }
    }
}
