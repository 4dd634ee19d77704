//! Gateway entry-point: validates postal codes and relays them to the
//! resolver, propagating the caller's trace context.

use actix_web::rt::{self, System};
use actix_web::web;
use color_eyre::eyre::{Context, Result, eyre};
use ortho_config::OrthoConfig;
use tracing::info;

use cep_weather::config::GatewaySettings;
use cep_weather::inbound::http::health::HealthState;
use cep_weather::server::create_gateway_server;
use cep_weather::telemetry::{self, build_propagator};

fn main() -> Result<()> {
    color_eyre::install()?;
    let settings =
        GatewaySettings::load().map_err(|err| eyre!("failed to load gateway settings: {err}"))?;
    let _telemetry = telemetry::init(&settings.telemetry_config())
        .wrap_err("failed to initialise telemetry")?;

    System::new().block_on(serve(settings))
}

async fn serve(settings: GatewaySettings) -> Result<()> {
    let health_state = web::Data::new(HealthState::new());
    let server = create_gateway_server(health_state.clone(), &settings, build_propagator())
        .wrap_err("failed to start gateway")?;
    info!(
        addr = %settings.bind_addr(),
        resolver = settings.resolver_url.as_deref().unwrap_or("default"),
        "gateway listening"
    );

    rt::spawn(async move {
        if rt::signal::ctrl_c().await.is_ok() {
            health_state.mark_draining();
        }
    });

    server.await.wrap_err("gateway server failed")
}
