//! OpenAPI documentation configuration.
//!
//! This module defines one OpenAPI document per service:
//!
//! - [`ResolverApiDoc`]: the CEP to temperature endpoints and health probes.
//! - [`GatewayApiDoc`]: the forwarding endpoints and health probes.
//!
//! The documents are served by Swagger UI in debug builds and exported via
//! `cargo run --bin openapi-dump` for external tooling.

use utoipa::OpenApi;

use crate::inbound::http::error::ErrorBody;
use crate::inbound::http::weather::{CepRequest, WeatherResponse};

/// OpenAPI document for the resolver service.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "CEP weather resolver API",
        description = "Resolves a Brazilian postal code into its city's current temperature in Celsius, Fahrenheit and Kelvin."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    paths(
        crate::inbound::http::weather::get_weather,
        crate::inbound::http::weather::post_weather,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(CepRequest, WeatherResponse, ErrorBody)),
    tags(
        (name = "weather", description = "Temperature resolution by postal code"),
        (name = "health", description = "Endpoints for health checks")
    )
)]
pub struct ResolverApiDoc;

/// OpenAPI document for the gateway service.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "CEP weather gateway API",
        description = "Validates a postal code and relays the resolver's reply unchanged."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    paths(
        crate::inbound::http::gateway::relay_weather,
        crate::inbound::http::gateway::relay_weather_by_path,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(CepRequest, WeatherResponse, ErrorBody)),
    tags(
        (name = "gateway", description = "Forwarding to the resolver service"),
        (name = "health", description = "Endpoints for health checks")
    )
)]
pub struct GatewayApiDoc;
