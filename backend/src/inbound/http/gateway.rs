//! Gateway API handlers.
//!
//! Accept a postal code, validate it locally, and relay the resolver's reply
//! byte-for-byte.
//!
//! ```text
//! POST /weather {"cep":"01310930"}
//! GET /weather/01310930
//! ```

use actix_web::http::StatusCode;
use actix_web::http::header::CONTENT_TYPE;
use actix_web::{HttpResponse, get, post, web};

use crate::domain::ports::RelayedResponse;
use crate::inbound::http::ApiResult;
use crate::inbound::http::error::ErrorBody;
use crate::inbound::http::state::GatewayState;
use crate::inbound::http::weather::{CepRequest, WeatherResponse, parse_cep_request};

fn into_http_response(reply: RelayedResponse) -> HttpResponse {
    let status = StatusCode::from_u16(reply.status).unwrap_or(StatusCode::BAD_GATEWAY);
    let mut builder = HttpResponse::build(status);
    if let Some(content_type) = reply.content_type {
        builder.insert_header((CONTENT_TYPE, content_type));
    }
    builder.body(reply.body)
}

async fn relay(state: &GatewayState, raw_code: &str) -> ApiResult<HttpResponse> {
    let reply = state.gateway.relay(raw_code).await?;
    Ok(into_http_response(reply))
}

/// Forward a postal code in the body to the resolver.
#[utoipa::path(
    post,
    path = "/weather",
    request_body = CepRequest,
    responses(
        (status = 200, description = "Resolver reply relayed", body = WeatherResponse),
        (status = 400, description = "Body is not a CEP request", body = ErrorBody),
        (status = 404, description = "Resolver reply relayed: postal code not found", body = ErrorBody),
        (status = 422, description = "Postal code is malformed", body = ErrorBody),
        (status = 500, description = "Resolver unreachable or failed", body = ErrorBody)
    ),
    tags = ["gateway"],
    operation_id = "relayWeather"
)]
#[post("/weather")]
pub async fn relay_weather(
    state: web::Data<GatewayState>,
    body: web::Bytes,
) -> ApiResult<HttpResponse> {
    let request = parse_cep_request(&body)?;
    relay(&state, &request.cep).await
}

/// Forward a postal code in the path to the resolver.
#[utoipa::path(
    get,
    path = "/weather/{cep}",
    params(("cep" = String, Path, description = "Eight-digit postal code", example = "01310930")),
    responses(
        (status = 200, description = "Resolver reply relayed", body = WeatherResponse),
        (status = 404, description = "Resolver reply relayed: postal code not found", body = ErrorBody),
        (status = 422, description = "Postal code is malformed", body = ErrorBody),
        (status = 500, description = "Resolver unreachable or failed", body = ErrorBody)
    ),
    tags = ["gateway"],
    operation_id = "relayWeatherByPath"
)]
#[get("/weather/{cep}")]
pub async fn relay_weather_by_path(
    state: web::Data<GatewayState>,
    cep: web::Path<String>,
) -> ApiResult<HttpResponse> {
    relay(&state, &cep).await
}
