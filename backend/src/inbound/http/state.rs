//! Shared HTTP adapter state.
//!
//! HTTP handlers accept this state via `actix_web::web::Data` so they only
//! depend on domain ports (use-cases) and remain testable without I/O.

use std::sync::Arc;

use crate::domain::ports::{WeatherGateway, WeatherResolver};

/// Dependency bundle for the resolver service handlers.
#[derive(Clone)]
pub struct ResolverState {
    pub resolver: Arc<dyn WeatherResolver>,
}

impl ResolverState {
    /// Construct state around the resolution use case.
    pub fn new(resolver: Arc<dyn WeatherResolver>) -> Self {
        Self { resolver }
    }
}

/// Dependency bundle for the gateway service handlers.
#[derive(Clone)]
pub struct GatewayState {
    pub gateway: Arc<dyn WeatherGateway>,
}

impl GatewayState {
    /// Construct state around the forwarding use case.
    pub fn new(gateway: Arc<dyn WeatherGateway>) -> Self {
        Self { gateway }
    }
}
