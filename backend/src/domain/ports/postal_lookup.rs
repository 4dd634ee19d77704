//! Driven port for resolving a postal code into a city.

use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;

use super::define_port_error;
use crate::domain::{CityName, PostalCode};

define_port_error! {
    /// Errors surfaced while calling the postal provider.
    pub enum PostalLookupError {
        /// Provider reported no city for the code, or answered with a
        /// non-success status.
        NotFound { message: String } [NotFound] =>
            "postal code not found: {message}",
        /// Provider could not be reached.
        Unavailable { message: String } [UpstreamUnavailable] =>
            "postal provider unavailable: {message}",
        /// Provider answered with a payload that is not the expected shape.
        Decode { message: String } [InternalFailure] =>
            "postal provider response decode failed: {message}",
    }
}

/// Port for looking up the city of a postal code.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PostalLookup: Send + Sync {
    /// Resolve `code` into a city name.
    ///
    /// The [`PostalCode`] type guarantees the code is well formed, so
    /// implementations never see invalid input.
    ///
    /// # Examples
    ///
    /// ```rust,ignore
    /// use cep_weather::domain::{CityName, PostalCode};
    /// use cep_weather::domain::ports::{FixturePostalLookup, PostalLookup};
    ///
    /// let code = PostalCode::parse("01310930")?;
    /// let lookup = FixturePostalLookup::city(CityName::new("São Paulo")?);
    /// let city = lookup.lookup_city(&code).await?;
    /// assert_eq!(city.as_str(), "São Paulo");
    /// ```
    async fn lookup_city(&self, code: &PostalCode) -> Result<CityName, PostalLookupError>;
}

/// Fixture implementation answering every lookup with one scripted outcome.
///
/// Counts invocations so callers can assert that validation failures never
/// reach the provider.
#[derive(Debug)]
pub struct FixturePostalLookup {
    outcome: Result<CityName, PostalLookupError>,
    calls: AtomicUsize,
}

impl FixturePostalLookup {
    /// Fixture resolving every code to `city`.
    pub fn city(city: CityName) -> Self {
        Self::with_outcome(Ok(city))
    }

    /// Fixture failing every lookup with `error`.
    pub fn failing(error: PostalLookupError) -> Self {
        Self::with_outcome(Err(error))
    }

    fn with_outcome(outcome: Result<CityName, PostalLookupError>) -> Self {
        Self {
            outcome,
            calls: AtomicUsize::new(0),
        }
    }

    /// Number of lookups served so far.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl PostalLookup for FixturePostalLookup {
    async fn lookup_city(&self, _code: &PostalCode) -> Result<CityName, PostalLookupError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.outcome.clone()
    }
}
