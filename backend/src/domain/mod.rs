//! Domain primitives, services and ports.
//!
//! Purpose: Define the postal code and temperature types, the failure
//! taxonomy, and the two use cases (resolution and forwarding) without
//! depending on any transport or provider crate.
//!
//! Public surface:
//! - PostalCode, CityName, TemperatureReading: validated value types.
//! - ErrorKind, PipelineStage, ResolutionError, GatewayError: failures.
//! - WeatherResolutionService, GatewayService: driving port implementations.

pub mod city;
pub mod error;
pub mod gateway;
pub mod ports;
pub mod postal_code;
pub mod temperature;
pub mod weather_resolution;

pub use self::city::{CityName, CityNameValidationError};
pub use self::error::{ErrorKind, GatewayError, PipelineStage, ResolutionError};
pub use self::gateway::GatewayService;
pub use self::postal_code::{POSTAL_CODE_LEN, PostalCode, PostalCodeValidationError};
pub use self::temperature::{TemperatureReading, convert};
pub use self::weather_resolution::WeatherResolutionService;
