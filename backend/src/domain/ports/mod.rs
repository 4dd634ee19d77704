//! Domain ports and supporting types for the hexagonal boundary.

mod macros;
pub(crate) use macros::define_port_error;

mod postal_lookup;
mod span_factory;
mod weather_forwarder;
mod weather_gateway;
mod weather_lookup;
mod weather_resolver;

#[cfg(test)]
pub use postal_lookup::MockPostalLookup;
pub use postal_lookup::{FixturePostalLookup, PostalLookup, PostalLookupError};
#[cfg(test)]
pub use span_factory::MockSpanFactory;
pub use span_factory::{NoopSpanFactory, SpanFactory, TracingSpanFactory, attr};
#[cfg(test)]
pub use weather_forwarder::MockWeatherForwarder;
pub use weather_forwarder::{ForwardingError, RelayedResponse, WeatherForwarder};
#[cfg(test)]
pub use weather_gateway::MockWeatherGateway;
pub use weather_gateway::WeatherGateway;
#[cfg(test)]
pub use weather_lookup::MockWeatherLookup;
pub use weather_lookup::{FixtureWeatherLookup, WeatherLookup, WeatherLookupError};
#[cfg(test)]
pub use weather_resolver::MockWeatherResolver;
pub use weather_resolver::{ResolutionResult, WeatherResolver};
