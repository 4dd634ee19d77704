//! Resolver entry-point: loads settings, installs telemetry and serves
//! `/weather`, the health probes and (in debug builds) Swagger UI.

use actix_web::rt::{self, System};
use actix_web::web;
use color_eyre::eyre::{Context, Result, eyre};
use ortho_config::OrthoConfig;
use tracing::{info, warn};

use cep_weather::config::ResolverSettings;
use cep_weather::inbound::http::health::HealthState;
use cep_weather::server::create_resolver_server;
use cep_weather::telemetry::{self, build_propagator};

fn main() -> Result<()> {
    color_eyre::install()?;
    let settings =
        ResolverSettings::load().map_err(|err| eyre!("failed to load resolver settings: {err}"))?;
    // The OTLP exporter uses a blocking client, so install it before the
    // runtime starts.
    let _telemetry = telemetry::init(&settings.telemetry_config())
        .wrap_err("failed to initialise telemetry")?;
    if settings.weather_api_key.is_none() {
        warn!("RESOLVER_WEATHER_API_KEY is unset; temperature lookups will fail");
    }

    System::new().block_on(serve(settings))
}

async fn serve(settings: ResolverSettings) -> Result<()> {
    let health_state = web::Data::new(HealthState::new());
    let server = create_resolver_server(health_state.clone(), &settings, build_propagator())
        .wrap_err("failed to start resolver")?;
    info!(addr = %settings.bind_addr(), "resolver listening");

    rt::spawn(async move {
        if rt::signal::ctrl_c().await.is_ok() {
            health_state.mark_draining();
        }
    });

    server.await.wrap_err("resolver server failed")
}
