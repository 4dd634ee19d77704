//! Resolver API handlers.
//!
//! ```text
//! GET /weather/01310930
//! POST /weather {"cep":"01310930"}
//! ```

use actix_web::{get, post, web};
use serde::{Deserialize, Serialize};

use crate::domain::ports::ResolutionResult;
use crate::inbound::http::ApiResult;
use crate::inbound::http::error::{ApiError, ErrorBody};
use crate::inbound::http::state::ResolverState;

/// Request body for `POST /weather`.
///
/// Example JSON: `{"cep":"01310930"}`
#[derive(Debug, Deserialize, Serialize, utoipa::ToSchema)]
pub struct CepRequest {
    /// Postal code, eight ASCII digits without separators.
    #[schema(example = "01310930")]
    pub cep: String,
}

/// Successful resolution payload.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize, utoipa::ToSchema)]
pub struct WeatherResponse {
    /// City the postal code belongs to.
    #[schema(example = "São Paulo")]
    pub city: String,
    /// Degrees Celsius, two decimal places.
    #[serde(rename = "temp_C")]
    #[schema(example = 25.0)]
    pub temp_c: f64,
    /// Degrees Fahrenheit, two decimal places.
    #[serde(rename = "temp_F")]
    #[schema(example = 77.0)]
    pub temp_f: f64,
    /// Kelvin, two decimal places.
    #[serde(rename = "temp_K")]
    #[schema(example = 298.15)]
    pub temp_k: f64,
}

impl From<ResolutionResult> for WeatherResponse {
    fn from(result: ResolutionResult) -> Self {
        Self {
            temp_c: result.temperature.celsius(),
            temp_f: result.temperature.fahrenheit(),
            temp_k: result.temperature.kelvin(),
            city: result.city.into_inner(),
        }
    }
}

/// Decode a `{"cep": "..."}` body.
///
/// Anything that is not a JSON object with a string `cep` field is a format
/// error; the value itself is validated by the use case.
pub(crate) fn parse_cep_request(body: &[u8]) -> Result<CepRequest, ApiError> {
    serde_json::from_slice(body).map_err(|_| ApiError::InvalidRequestFormat)
}

async fn resolve(state: &ResolverState, raw_code: &str) -> ApiResult<web::Json<WeatherResponse>> {
    let result = state.resolver.resolve(raw_code).await?;
    Ok(web::Json(WeatherResponse::from(result)))
}

/// Resolve the current temperature for a postal code in the path.
#[utoipa::path(
    get,
    path = "/weather/{cep}",
    params(("cep" = String, Path, description = "Eight-digit postal code", example = "01310930")),
    responses(
        (status = 200, description = "Temperature resolved", body = WeatherResponse),
        (status = 404, description = "Postal code not found", body = ErrorBody),
        (status = 422, description = "Postal code is malformed", body = ErrorBody),
        (status = 500, description = "Provider or configuration failure", body = ErrorBody)
    ),
    tags = ["weather"],
    operation_id = "getWeather"
)]
#[get("/weather/{cep}")]
pub async fn get_weather(
    state: web::Data<ResolverState>,
    cep: web::Path<String>,
) -> ApiResult<web::Json<WeatherResponse>> {
    resolve(&state, &cep).await
}

/// Resolve the current temperature for a postal code in the body.
#[utoipa::path(
    post,
    path = "/weather",
    request_body = CepRequest,
    responses(
        (status = 200, description = "Temperature resolved", body = WeatherResponse),
        (status = 400, description = "Body is not a CEP request", body = ErrorBody),
        (status = 404, description = "Postal code not found", body = ErrorBody),
        (status = 422, description = "Postal code is malformed", body = ErrorBody),
        (status = 500, description = "Provider or configuration failure", body = ErrorBody)
    ),
    tags = ["weather"],
    operation_id = "postWeather"
)]
#[post("/weather")]
pub async fn post_weather(
    state: web::Data<ResolverState>,
    body: web::Bytes,
) -> ApiResult<web::Json<WeatherResponse>> {
    let request = parse_cep_request(&body)?;
    resolve(&state, &request.cep).await
}
