//! City name returned by the postal lookup.

use std::fmt;

/// Validation errors for [`CityName`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum CityNameValidationError {
    /// Name is empty once trimmed of whitespace.
    #[error("city name must not be empty")]
    Empty,
}

/// Non-empty city name.
///
/// The name is kept as the provider spelled it, accents and spaces included;
/// encoding for outbound queries is the weather adapter's job.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CityName(String);

impl CityName {
    /// Validate and wrap a city name.
    ///
    /// # Examples
    /// ```
    /// use cep_weather::domain::CityName;
    ///
    /// let city = CityName::new("São Paulo").expect("non-empty");
    /// assert_eq!(city.as_str(), "São Paulo");
    /// assert!(CityName::new("   ").is_err());
    /// ```
    pub fn new(name: impl Into<String>) -> Result<Self, CityNameValidationError> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(CityNameValidationError::Empty);
        }
        Ok(Self(name))
    }

    /// Borrow the name.
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }

    /// Consume the wrapper.
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for CityName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
