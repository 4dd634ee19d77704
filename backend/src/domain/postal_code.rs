//! Brazilian postal code (CEP) primitive.

use std::fmt;
use std::str::FromStr;

/// Number of digits in a CEP.
pub const POSTAL_CODE_LEN: usize = 8;

/// Validation errors for [`PostalCode`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PostalCodeValidationError {
    /// Input does not have exactly eight bytes.
    #[error("postal code must have {POSTAL_CODE_LEN} digits, got {actual} characters")]
    WrongLength {
        /// Observed length in bytes.
        actual: usize,
    },
    /// Input contains something other than an ASCII digit.
    #[error("postal code must contain only ASCII digits")]
    NonDigit,
}

/// Eight-digit postal code without formatting characters.
///
/// ## Invariants
/// - Exactly [`POSTAL_CODE_LEN`] ASCII digits, no separators or prefixes.
///
/// # Examples
/// ```
/// use cep_weather::domain::PostalCode;
///
/// let code = PostalCode::parse("01310930").expect("valid CEP");
/// assert_eq!(code.as_str(), "01310930");
/// assert!(PostalCode::parse("01310-930").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PostalCode(String);

impl PostalCode {
    /// Validate raw input into a postal code.
    pub fn parse(raw: &str) -> Result<Self, PostalCodeValidationError> {
        if raw.len() != POSTAL_CODE_LEN {
            return Err(PostalCodeValidationError::WrongLength { actual: raw.len() });
        }
        if !raw.bytes().all(|byte| byte.is_ascii_digit()) {
            return Err(PostalCodeValidationError::NonDigit);
        }
        Ok(Self(raw.to_owned()))
    }

    /// Borrow the digits.
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl FromStr for PostalCode {
    type Err = PostalCodeValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for PostalCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for PostalCode {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}
