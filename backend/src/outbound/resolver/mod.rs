//! Resolver outbound adapter used by the gateway.
//!
//! This module provides the HTTP implementation of the `WeatherForwarder`
//! port, propagating trace context on every call.

mod http_forwarder;

pub use http_forwarder::ResolverHttpForwarder;
