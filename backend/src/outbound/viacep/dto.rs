//! DTOs for decoding ViaCEP address lookups.

use serde::Deserialize;
use serde_json::Value;

/// Address payload returned by `GET /ws/{cep}/json/`.
///
/// Unknown codes come back as `{"erro": true}` (older deployments send the
/// flag as the string `"true"`) with a success status. `localidade` is kept
/// loosely typed: anything other than a non-blank string means no city.
#[derive(Debug, Deserialize)]
pub(super) struct ViaCepAddressDto {
    #[serde(default)]
    pub(super) localidade: Option<Value>,
    #[serde(default)]
    pub(super) erro: Option<ErroFlagDto>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub(super) enum ErroFlagDto {
    Flag(bool),
    Text(String),
}

impl ErroFlagDto {
    fn is_set(&self) -> bool {
        match self {
            Self::Flag(flag) => *flag,
            Self::Text(text) => text.trim().eq_ignore_ascii_case("true"),
        }
    }
}

impl ViaCepAddressDto {
    /// City name when the payload describes a known code.
    pub(super) fn into_city(self) -> Option<String> {
        if self.erro.as_ref().is_some_and(ErroFlagDto::is_set) {
            return None;
        }
        match self.localidade {
            Some(Value::String(city)) if !city.trim().is_empty() => Some(city),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use rstest::rstest;

    fn decode(body: &str) -> ViaCepAddressDto {
        serde_json::from_str(body).expect("payload should decode")
    }

    #[rstest]
    #[case::bool_flag(r#"{"erro":true}"#)]
    #[case::string_flag(r#"{"erro":"true"}"#)]
    #[case::flag_beside_city(r#"{"erro":true,"localidade":"São Paulo"}"#)]
    #[case::empty_city(r#"{"localidade":""}"#)]
    #[case::missing_city(r#"{"cep":"01310-930"}"#)]
    #[case::numeric_city(r#"{"localidade":42}"#)]
    #[case::null_city(r#"{"localidade":null}"#)]
    fn unknown_codes_have_no_city(#[case] body: &str) {
        assert_eq!(decode(body).into_city(), None);
    }

    #[rstest]
    #[case::plain(r#"{"cep":"01310-930","localidade":"São Paulo","uf":"SP"}"#)]
    #[case::false_flag(r#"{"localidade":"São Paulo","erro":false}"#)]
    fn known_codes_yield_city(#[case] body: &str) {
        assert_eq!(decode(body).into_city().as_deref(), Some("São Paulo"));
    }
}
