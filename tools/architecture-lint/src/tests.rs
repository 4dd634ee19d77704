//! Unit tests for the layering lint.

use std::path::Path;

use rstest::rstest;

use super::*;

fn violations_in(file: &str, contents: &str) -> Vec<Violation> {
    match lint_sources(&[LintSource::new(file, contents)]) {
        Ok(()) => Vec::new(),
        Err(LintError::Violations(violations)) => violations,
        Err(other) => panic!("unexpected lint failure: {other}"),
    }
}

fn messages_in(file: &str, contents: &str) -> Vec<String> {
    violations_in(file, contents)
        .into_iter()
        .map(|violation| violation.message)
        .collect()
}

#[rstest]
#[case::domain_uses_ports(
    "domain/weather_resolution.rs",
    "use crate::domain::ports::{PostalLookup, WeatherLookup}; use tracing::Instrument;"
)]
#[case::inbound_uses_trace_id("inbound/http/error.rs", "use crate::middleware::trace::TraceId;")]
#[case::outbound_uses_client(
    "outbound/viacep/http_source.rs",
    "use reqwest::Client; use super::dto::ViaCepAddressDto;"
)]
#[case::outbound_injects_context(
    "outbound/resolver/http_forwarder.rs",
    "use opentelemetry::propagation::Injector; use crate::telemetry::SharedPropagator;"
)]
#[case::middleware_uses_otel(
    "middleware/trace.rs",
    "use tracing_opentelemetry::OpenTelemetrySpanExt; use crate::telemetry::SharedPropagator;"
)]
#[case::composition_root_is_free("server/mod.rs", "use crate::outbound::viacep::ViaCepHttpSource;")]
fn accepts_allowed_dependencies(#[case] file: &str, #[case] contents: &str) {
    assert_eq!(messages_in(file, contents), Vec::<String>::new());
}

#[rstest]
#[case::domain_imports_adapter(
    "domain/gateway.rs",
    "use crate::outbound::resolver::ResolverHttpForwarder;",
    "domain must not depend on crate::outbound"
)]
#[case::domain_reads_config(
    "domain/weather_resolution.rs",
    "fn timeout(s: &cep_weather::config::ResolverSettings) {}",
    "domain must not depend on crate::config"
)]
#[case::domain_names_framework_inline(
    "domain/error.rs",
    "fn status() -> actix_web::http::StatusCode { todo!() }",
    "domain must not depend on `actix_web`"
)]
#[case::domain_imports_otel(
    "domain/ports/span_factory.rs",
    "use opentelemetry::trace::Tracer;",
    "domain must not depend on `opentelemetry`"
)]
#[case::domain_documents_schema(
    "domain/postal_code.rs",
    "impl utoipa::ToSchema for PostalCode {}",
    "domain must not depend on `utoipa`"
)]
#[case::inbound_imports_outbound(
    "inbound/http/gateway.rs",
    "use crate::outbound::resolver::ResolverHttpForwarder;",
    "inbound must not depend on crate::outbound"
)]
#[case::inbound_imports_client(
    "inbound/http/weather.rs",
    "use reqwest::Client;",
    "inbound must not depend on `reqwest`"
)]
#[case::outbound_climbs_to_inbound(
    "outbound/weatherapi/http_source.rs",
    "use super::super::super::inbound::http::ApiError;",
    "outbound must not depend on crate::inbound"
)]
#[case::outbound_imports_framework(
    "outbound/resolver/http_forwarder.rs",
    "use actix_web::HttpResponse;",
    "outbound must not depend on `actix_web`"
)]
#[case::middleware_imports_adapter(
    "middleware/trace.rs",
    "use crate::outbound::resolver::ResolverHttpForwarder;",
    "middleware must not depend on crate::outbound"
)]
fn reports_boundary_violations(
    #[case] file: &str,
    #[case] contents: &str,
    #[case] expected: &str,
) {
    assert_eq!(messages_in(file, contents), vec![expected.to_owned()]);
}

#[rstest]
#[case::sibling_module("outbound/viacep/http_source.rs", "use super::dto::ViaCepAddressDto;")]
#[case::module_root("domain/ports/mod.rs", "pub use self::postal_lookup::PostalLookup;")]
#[case::nested_inline(
    "domain/ports/mod.rs",
    "mod fixtures { use super::super::PostalCode; }"
)]
fn relative_paths_stay_inside_their_layer(#[case] file: &str, #[case] contents: &str) {
    assert_eq!(messages_in(file, contents), Vec::<String>::new());
}

#[rstest]
fn test_only_code_is_exempt() {
    let contents = r"
        pub struct Source;

        #[cfg(test)]
        mod tests {
            use wiremock::MockServer;
            use opentelemetry_sdk::trace::SdkTracerProvider;
        }

        impl Source {
            #[cfg(test)]
            fn client() -> reqwest::Client { reqwest::Client::new() }
        }
    ";
    assert_eq!(
        messages_in("inbound/http/weather.rs", contents),
        Vec::<String>::new()
    );
    assert_eq!(
        messages_in(
            "inbound/http/error/tests.rs",
            "use reqwest::Client; use wiremock::MockServer;"
        ),
        Vec::<String>::new()
    );
}

#[rstest]
fn reports_each_rule_once_at_its_first_line() {
    let contents = "use std::sync::Arc;\n\
                    use reqwest::Client;\n\
                    fn build() -> reqwest::Client { reqwest::Client::new() }\n";

    let violations = violations_in("inbound/http/gateway.rs", contents);

    assert_eq!(
        violations,
        vec![Violation {
            file: PathBuf::from("inbound/http/gateway.rs"),
            line: 2,
            message: "inbound must not depend on `reqwest`".to_owned(),
        }]
    );
    assert_eq!(
        violations[0].to_string(),
        "inbound/http/gateway.rs:2: inbound must not depend on `reqwest`"
    );
}

#[rstest]
fn unparsable_layer_files_are_reported() {
    let result = lint_sources(&[LintSource::new("domain/city.rs", "fn broken( {")]);
    assert!(matches!(result, Err(LintError::Parse { .. })));
}

#[rstest]
fn service_crate_respects_its_layers() {
    let backend = Path::new(env!("CARGO_MANIFEST_DIR")).join("../../backend");
    let result = lint_crate_sources(&backend);
    assert!(result.is_ok(), "{}", result.err().map(|err| err.to_string()).unwrap_or_default());
}
