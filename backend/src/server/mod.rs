//! Server construction and middleware wiring for both services.
//!
//! This is the composition root: it parses settings, builds the outbound
//! adapters, wraps them in the domain services and mounts the HTTP handlers
//! behind the trace middleware.

use std::sync::Arc;

use actix_web::dev::{Server, ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{App, HttpServer, web};
#[cfg(debug_assertions)]
use utoipa::OpenApi;
#[cfg(debug_assertions)]
use utoipa_swagger_ui::SwaggerUi;

use crate::Trace;
use crate::config::{ConfigError, GatewaySettings, ResolverSettings};
#[cfg(debug_assertions)]
use crate::doc::{GatewayApiDoc, ResolverApiDoc};
use crate::domain::ports::{SpanFactory, TracingSpanFactory};
use crate::domain::{GatewayService, WeatherResolutionService};
use crate::inbound::http::gateway::{relay_weather, relay_weather_by_path};
use crate::inbound::http::health::{HealthState, live, ready};
use crate::inbound::http::state::{GatewayState, ResolverState};
use crate::inbound::http::weather::{get_weather, post_weather};
use crate::outbound::resolver::ResolverHttpForwarder;
use crate::outbound::viacep::ViaCepHttpSource;
use crate::outbound::weatherapi::WeatherApiHttpSource;
use crate::telemetry::SharedPropagator;

/// Failures while assembling a server from its settings.
#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    /// A setting could not be parsed.
    #[error(transparent)]
    Config(#[from] ConfigError),
    /// An outbound HTTP client could not be built.
    #[error("failed to build HTTP client: {0}")]
    Client(#[from] reqwest::Error),
    /// The listener could not be bound.
    #[error("failed to bind listener: {0}")]
    Bind(#[from] std::io::Error),
}

/// Build the resolver's handler state from settings.
///
/// # Errors
///
/// Returns [`ServerError`] when a URL or timeout setting is invalid or an
/// HTTP client cannot be constructed.
pub fn build_resolver_state(settings: &ResolverSettings) -> Result<ResolverState, ServerError> {
    let timeout = settings.timeout()?;
    let spans: Arc<dyn SpanFactory> = Arc::new(TracingSpanFactory);
    let postal = ViaCepHttpSource::new(settings.postal_base_url()?, timeout, spans.clone())?;
    let weather = WeatherApiHttpSource::new(
        settings.weather_base_url()?,
        settings.weather_api_key.clone(),
        timeout,
        spans.clone(),
    )?;
    let service = WeatherResolutionService::new(Arc::new(postal), Arc::new(weather), spans);
    Ok(ResolverState::new(Arc::new(service)))
}

/// Build the gateway's handler state from settings.
///
/// # Errors
///
/// Returns [`ServerError`] when the resolver URL or timeout is invalid or the
/// HTTP client cannot be constructed.
pub fn build_gateway_state(
    settings: &GatewaySettings,
    propagator: SharedPropagator,
) -> Result<GatewayState, ServerError> {
    let forwarder =
        ResolverHttpForwarder::new(settings.resolver_url()?, settings.timeout()?, propagator)?;
    let service = GatewayService::new(Arc::new(forwarder), Arc::new(TracingSpanFactory));
    Ok(GatewayState::new(Arc::new(service)))
}

/// Assemble the resolver application.
pub fn resolver_app(
    health_state: web::Data<HealthState>,
    state: web::Data<ResolverState>,
    propagator: SharedPropagator,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    let app = App::new()
        .app_data(health_state)
        .app_data(state)
        .wrap(Trace::new(propagator))
        .service(get_weather)
        .service(post_weather)
        .service(ready)
        .service(live);

    #[cfg(debug_assertions)]
    let app = app.service(
        SwaggerUi::new("/docs").url("/api-docs/openapi.json", ResolverApiDoc::openapi()),
    );

    app
}

/// Assemble the gateway application.
pub fn gateway_app(
    health_state: web::Data<HealthState>,
    state: web::Data<GatewayState>,
    propagator: SharedPropagator,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    let app = App::new()
        .app_data(health_state)
        .app_data(state)
        .wrap(Trace::new(propagator))
        .service(relay_weather)
        .service(relay_weather_by_path)
        .service(ready)
        .service(live);

    #[cfg(debug_assertions)]
    let app = app.service(
        SwaggerUi::new("/docs").url("/api-docs/openapi.json", GatewayApiDoc::openapi()),
    );

    app
}

/// Construct the resolver HTTP server.
///
/// The health state is marked ready once the listener is bound.
///
/// # Errors
///
/// Returns [`ServerError`] when settings are invalid or binding fails.
pub fn create_resolver_server(
    health_state: web::Data<HealthState>,
    settings: &ResolverSettings,
    propagator: SharedPropagator,
) -> Result<Server, ServerError> {
    let state = web::Data::new(build_resolver_state(settings)?);
    let server_health_state = health_state.clone();
    let server = HttpServer::new(move || {
        resolver_app(
            server_health_state.clone(),
            state.clone(),
            propagator.clone(),
        )
    })
    .bind(settings.bind_addr())?
    .run();

    health_state.mark_ready();
    Ok(server)
}

/// Construct the gateway HTTP server.
///
/// # Errors
///
/// Returns [`ServerError`] when settings are invalid or binding fails.
pub fn create_gateway_server(
    health_state: web::Data<HealthState>,
    settings: &GatewaySettings,
    propagator: SharedPropagator,
) -> Result<Server, ServerError> {
    let state = web::Data::new(build_gateway_state(settings, propagator.clone())?);
    let server_health_state = health_state.clone();
    let server = HttpServer::new(move || {
        gateway_app(
            server_health_state.clone(),
            state.clone(),
            propagator.clone(),
        )
    })
    .bind(settings.bind_addr())?
    .run();

    health_state.mark_ready();
    Ok(server)
}
