//! Behaviour tests for the postal code to temperature pipeline.
//!
//! The scenarios drive `WeatherResolutionService` against in-memory provider
//! fixtures so every outcome is deterministic and no network is touched.
use std::sync::{Arc, Mutex};

use cep_weather::domain::ports::{
    FixturePostalLookup, FixtureWeatherLookup, NoopSpanFactory, PostalLookupError,
    ResolutionResult, WeatherLookupError, WeatherResolver,
};
use cep_weather::domain::{CityName, ResolutionError, WeatherResolutionService, convert};
use rstest::fixture;
use rstest_bdd_macros::{given, scenario, then, when};
use tokio::runtime::{Builder, Runtime};

struct ResolutionWorld {
    runtime: Runtime,
    postal: Option<Arc<FixturePostalLookup>>,
    weather: Option<Arc<FixtureWeatherLookup>>,
    outcome: Option<Result<ResolutionResult, ResolutionError>>,
}

impl std::fmt::Debug for ResolutionWorld {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ResolutionWorld")
            .field("outcome", &self.outcome)
            .finish_non_exhaustive()
    }
}

impl ResolutionWorld {
    fn postal(&self) -> Arc<FixturePostalLookup> {
        self.postal.clone().expect("postal provider configured")
    }

    fn weather(&self) -> Arc<FixtureWeatherLookup> {
        self.weather.clone().expect("weather provider configured")
    }

    fn error(&self) -> &ResolutionError {
        match self.outcome.as_ref().expect("resolution ran") {
            Ok(result) => panic!("expected failure, got {result:?}"),
            Err(err) => err,
        }
    }

    fn result(&self) -> &ResolutionResult {
        match self.outcome.as_ref().expect("resolution ran") {
            Ok(result) => result,
            Err(err) => panic!("expected success, got {err}"),
        }
    }
}

#[fixture]
fn world() -> Mutex<ResolutionWorld> {
    let runtime = Builder::new_current_thread()
        .enable_all()
        .build()
        .expect("create runtime");
    Mutex::new(ResolutionWorld {
        runtime,
        postal: None,
        weather: None,
        outcome: None,
    })
}

#[given("the postal provider places every code in {city}")]
fn postal_provider_places_codes_in(world: &Mutex<ResolutionWorld>, city: String) {
    let city = CityName::new(city).expect("valid city");
    world.lock().expect("world lock").postal = Some(Arc::new(FixturePostalLookup::city(city)));
}

#[given("the postal provider knows no codes")]
fn postal_provider_knows_no_codes(world: &Mutex<ResolutionWorld>) {
    world.lock().expect("world lock").postal = Some(Arc::new(FixturePostalLookup::failing(
        PostalLookupError::not_found("erro flag set"),
    )));
}

#[given("the weather provider reports {celsius} degrees Celsius")]
fn weather_provider_reports(world: &Mutex<ResolutionWorld>, celsius: f64) {
    world.lock().expect("world lock").weather =
        Some(Arc::new(FixtureWeatherLookup::reading(convert(celsius))));
}

#[given("the weather provider has no credential")]
fn weather_provider_has_no_credential(world: &Mutex<ResolutionWorld>) {
    world.lock().expect("world lock").weather = Some(Arc::new(FixtureWeatherLookup::failing(
        WeatherLookupError::missing_credential(),
    )));
}

#[when("the postal code {code} is resolved")]
fn the_postal_code_is_resolved(world: &Mutex<ResolutionWorld>, code: String) {
    let mut world = world.lock().expect("world lock");
    let service =
        WeatherResolutionService::new(world.postal(), world.weather(), Arc::new(NoopSpanFactory));
    let outcome = world.runtime.block_on(service.resolve(&code));
    world.outcome = Some(outcome);
}

#[then("the resolved city is {city}")]
fn the_resolved_city_is(world: &Mutex<ResolutionWorld>, city: String) {
    let world = world.lock().expect("world lock");
    assert_eq!(world.result().city.as_str(), city);
}

#[then("the temperatures are {celsius} C, {fahrenheit} F and {kelvin} K")]
fn the_temperatures_are(
    world: &Mutex<ResolutionWorld>,
    celsius: f64,
    fahrenheit: f64,
    kelvin: f64,
) {
    let world = world.lock().expect("world lock");
    let reading = world.result().temperature;
    assert_eq!(reading.celsius(), celsius);
    assert_eq!(reading.fahrenheit(), fahrenheit);
    assert_eq!(reading.kelvin(), kelvin);
}

#[then("resolution fails with {kind} at {stage}")]
fn resolution_fails_with(world: &Mutex<ResolutionWorld>, kind: String, stage: String) {
    let world = world.lock().expect("world lock");
    let err = world.error();
    assert_eq!(err.kind().as_str(), kind);
    assert_eq!(err.stage().span_name(), stage);
}

#[then("no provider was called")]
fn no_provider_was_called(world: &Mutex<ResolutionWorld>) {
    let world = world.lock().expect("world lock");
    assert_eq!(world.postal().calls(), 0);
    assert_eq!(world.weather().calls(), 0);
}

#[then("the weather provider was called {count} times")]
fn the_weather_provider_was_called(world: &Mutex<ResolutionWorld>, count: usize) {
    let world = world.lock().expect("world lock");
    assert_eq!(world.weather().calls(), count);
}

#[scenario(
    path = "tests/features/weather_resolution.feature",
    name = "A known postal code yields the city and three temperature scales"
)]
fn known_postal_code_resolves(world: Mutex<ResolutionWorld>) {
    drop(world);
}

#[scenario(
    path = "tests/features/weather_resolution.feature",
    name = "A malformed postal code is rejected before any provider call"
)]
fn malformed_postal_code_is_rejected(world: Mutex<ResolutionWorld>) {
    drop(world);
}

#[scenario(
    path = "tests/features/weather_resolution.feature",
    name = "An unknown postal code stops before the weather lookup"
)]
fn unknown_postal_code_is_not_found(world: Mutex<ResolutionWorld>) {
    drop(world);
}

#[scenario(
    path = "tests/features/weather_resolution.feature",
    name = "A missing weather credential fails temperature resolution"
)]
fn missing_credential_fails_temperature_stage(world: Mutex<ResolutionWorld>) {
    drop(world);
}

#[scenario(
    path = "tests/features/weather_resolution.feature",
    name = "Readings are rounded to two decimal places"
)]
fn readings_are_rounded(world: Mutex<ResolutionWorld>) {
    drop(world);
}
