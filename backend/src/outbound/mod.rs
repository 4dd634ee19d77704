//! Outbound adapters implementing domain ports for external services.
//!
//! This module follows the hexagonal architecture pattern, providing concrete
//! implementations of domain port traits:
//!
//! - **viacep**: postal code to city lookups (`PostalLookup`)
//! - **weatherapi**: current temperature lookups (`WeatherLookup`)
//! - **resolver**: gateway forwarding to the resolver service
//!   (`WeatherForwarder`)
//!
//! Adapters are thin translators that convert between domain types and
//! provider-specific representations. They contain no business logic.

pub mod resolver;
pub mod viacep;
pub mod weatherapi;
