//! CEP weather services.
//!
//! Two HTTP services share this crate: the resolver, which turns a Brazilian
//! postal code into its city's current temperature, and the gateway, which
//! validates a postal code and relays the resolver's reply while propagating
//! trace context.

pub mod config;
pub mod doc;
pub mod domain;
pub mod inbound;
pub mod middleware;
pub mod outbound;
pub mod server;
pub mod telemetry;

pub use middleware::Trace;

/// Public OpenAPI surfaces used by Swagger UI and tooling.
pub use doc::{GatewayApiDoc, ResolverApiDoc};
