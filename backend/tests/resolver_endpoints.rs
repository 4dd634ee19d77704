//! End-to-end tests for the resolver service against stubbed providers.
//!
//! Both providers are `wiremock` servers; the app under test is the same one
//! the binary serves, built from settings that point at the stubs.

mod support;

use actix_web::http::StatusCode;
use actix_web::{test as actix_test, web};
use cep_weather::config::ResolverSettings;
use cep_weather::inbound::http::health::HealthState;
use cep_weather::inbound::http::weather::WeatherResponse;
use cep_weather::server::{build_resolver_state, resolver_app};
use cep_weather::telemetry::build_propagator;
use insta::{allow_duplicates, assert_json_snapshot};
use rstest::rstest;
use serde_json::json;
use support::snapshot_of;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

const API_KEY: &str = "test-key";
const KNOWN_CODE: &str = "01310930";

struct Providers {
    postal: MockServer,
    weather: MockServer,
}

impl Providers {
    async fn start() -> Self {
        Self {
            postal: MockServer::start().await,
            weather: MockServer::start().await,
        }
    }

    fn settings(&self, api_key: Option<&str>) -> ResolverSettings {
        ResolverSettings {
            port: 0,
            weather_api_key: api_key.map(str::to_owned),
            postal_base_url: Some(self.postal.uri()),
            weather_base_url: Some(self.weather.uri()),
            timeout_secs: 2,
            collector_endpoint: None,
            service_name: None,
        }
    }

    async fn city_for(&self, code: &str, body: serde_json::Value) {
        Mock::given(method("GET"))
            .and(path(format!("/ws/{code}/json/")))
            .respond_with(ResponseTemplate::new(200).set_body_json(body))
            .mount(&self.postal)
            .await;
    }

    async fn weather_replies(&self, template: ResponseTemplate) {
        Mock::given(method("GET"))
            .and(path("/v1/current.json"))
            .respond_with(template)
            .mount(&self.weather)
            .await;
    }

    async fn requests_seen(&self) -> (usize, usize) {
        let postal = self
            .postal
            .received_requests()
            .await
            .map_or(0, |requests| requests.len());
        let weather = self
            .weather
            .received_requests()
            .await
            .map_or(0, |requests| requests.len());
        (postal, weather)
    }
}

macro_rules! resolver_service {
    ($providers:expr, $api_key:expr) => {{
        let state = build_resolver_state(&$providers.settings($api_key)).expect("state builds");
        let health = web::Data::new(HealthState::new());
        actix_test::init_service(resolver_app(
            health,
            web::Data::new(state),
            build_propagator(),
        ))
        .await
    }};
}

#[actix_web::test]
async fn resolves_known_code_by_path_and_body() {
    let providers = Providers::start().await;
    providers
        .city_for(KNOWN_CODE, json!({"cep": "01310-930", "localidade": "São Paulo"}))
        .await;
    Mock::given(method("GET"))
        .and(path("/v1/current.json"))
        .and(query_param("key", API_KEY))
        .and(query_param("q", "São Paulo"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"current": {"temp_c": 25.0}})),
        )
        .expect(2)
        .mount(&providers.weather)
        .await;
    let app = resolver_service!(providers, Some(API_KEY));

    let by_path: WeatherResponse = actix_test::call_and_read_body_json(
        &app,
        actix_test::TestRequest::get()
            .uri(&format!("/weather/{KNOWN_CODE}"))
            .to_request(),
    )
    .await;
    let by_body: WeatherResponse = actix_test::call_and_read_body_json(
        &app,
        actix_test::TestRequest::post()
            .uri("/weather")
            .set_json(json!({"cep": KNOWN_CODE}))
            .to_request(),
    )
    .await;

    let expected = WeatherResponse {
        city: "São Paulo".to_owned(),
        temp_c: 25.0,
        temp_f: 77.0,
        temp_k: 298.15,
    };
    assert_eq!(by_path, expected);
    assert_eq!(by_body, expected);
}

#[rstest]
#[case::too_short("0131093")]
#[case::too_long("013109300")]
#[case::letters("0131093A")]
#[case::hyphenated("01310-93")]
#[actix_web::test]
async fn malformed_codes_are_unprocessable_without_provider_calls(#[case] code: &str) {
    let providers = Providers::start().await;
    let app = resolver_service!(providers, Some(API_KEY));

    let res = actix_test::call_service(
        &app,
        actix_test::TestRequest::post()
            .uri("/weather")
            .set_json(json!({"cep": code}))
            .to_request(),
    )
    .await;

    let snapshot = snapshot_of(res).await;
    allow_duplicates! {
        assert_json_snapshot!(snapshot, { ".trace_id" => "[trace_id]" }, @r#"
        {
          "body": {
            "error": "invalid zipcode"
          },
          "status": 422,
          "trace_id": "[trace_id]"
        }
        "#);
    }
    assert_eq!(providers.requests_seen().await, (0, 0));
}

#[rstest]
#[case::flag(json!({"erro": true}))]
#[case::string_flag(json!({"erro": "true"}))]
#[case::blank_city(json!({"localidade": ""}))]
#[actix_web::test]
async fn unknown_codes_are_not_found(#[case] reply: serde_json::Value) {
    let providers = Providers::start().await;
    providers.city_for("99999999", reply).await;
    let app = resolver_service!(providers, Some(API_KEY));

    let res = actix_test::call_service(
        &app,
        actix_test::TestRequest::get().uri("/weather/99999999").to_request(),
    )
    .await;

    let snapshot = snapshot_of(res).await;
    allow_duplicates! {
        assert_json_snapshot!(snapshot, { ".trace_id" => "[trace_id]" }, @r#"
        {
          "body": {
            "error": "can not find zipcode"
          },
          "status": 404,
          "trace_id": "[trace_id]"
        }
        "#);
    }
    assert_eq!(providers.requests_seen().await, (1, 0));
}

#[actix_web::test]
async fn weather_rejection_is_reported_without_provider_text() {
    let providers = Providers::start().await;
    providers
        .city_for(KNOWN_CODE, json!({"localidade": "São Paulo"}))
        .await;
    providers
        .weather_replies(ResponseTemplate::new(400).set_body_json(json!({
            "error": {"code": 1006, "message": "No matching location found."}
        })))
        .await;
    let app = resolver_service!(providers, Some(API_KEY));

    let res = actix_test::call_service(
        &app,
        actix_test::TestRequest::get()
            .uri(&format!("/weather/{KNOWN_CODE}"))
            .to_request(),
    )
    .await;

    assert_json_snapshot!(snapshot_of(res).await, { ".trace_id" => "[trace_id]" }, @r#"
    {
      "body": {
        "error": "failed to get weather data"
      },
      "status": 500,
      "trace_id": "[trace_id]"
    }
    "#);
}

#[actix_web::test]
async fn missing_credential_never_calls_the_weather_provider() {
    let providers = Providers::start().await;
    providers
        .city_for(KNOWN_CODE, json!({"localidade": "São Paulo"}))
        .await;
    let app = resolver_service!(providers, None);

    let res = actix_test::call_service(
        &app,
        actix_test::TestRequest::get()
            .uri(&format!("/weather/{KNOWN_CODE}"))
            .to_request(),
    )
    .await;

    assert_eq!(res.status(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(providers.requests_seen().await, (1, 0));
}

#[actix_web::test]
async fn garbled_postal_payload_is_an_internal_error() {
    let providers = Providers::start().await;
    Mock::given(method("GET"))
        .and(path(format!("/ws/{KNOWN_CODE}/json/")))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>maintenance</html>"))
        .mount(&providers.postal)
        .await;
    let app = resolver_service!(providers, Some(API_KEY));

    let res = actix_test::call_service(
        &app,
        actix_test::TestRequest::get()
            .uri(&format!("/weather/{KNOWN_CODE}"))
            .to_request(),
    )
    .await;

    assert_json_snapshot!(snapshot_of(res).await, { ".trace_id" => "[trace_id]" }, @r#"
    {
      "body": {
        "error": "internal server error"
      },
      "status": 500,
      "trace_id": "[trace_id]"
    }
    "#);
}

#[actix_web::test]
async fn non_json_body_is_a_bad_request() {
    let providers = Providers::start().await;
    let app = resolver_service!(providers, Some(API_KEY));

    let res = actix_test::call_service(
        &app,
        actix_test::TestRequest::post()
            .uri("/weather")
            .insert_header(("content-type", "application/json"))
            .set_payload("cep=01310930")
            .to_request(),
    )
    .await;

    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    assert_eq!(providers.requests_seen().await, (0, 0));
}
