//! HTTP inbound adapter exposing the resolver and gateway endpoints.

pub mod error;
pub mod gateway;
pub mod health;
pub mod state;
pub mod weather;

pub use error::ApiResult;
