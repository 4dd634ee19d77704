//! Tracing middleware joining each request to the caller's distributed trace.
//!
//! Incoming W3C `traceparent`/`tracestate` and `baggage` headers are
//! extracted with the injected propagator and become the parent of a
//! request span. The request's trace identifier is stored in task-local
//! storage for log correlation and echoed in a `trace-id` response header.
//!
//! Tokio task-local variables are not inherited across spawned tasks. Use
//! [`TraceId::scope`] when moving work onto other tasks.

use std::fmt;
use std::future::Future;
use std::str::FromStr;
use std::task::{Context, Poll};

use actix_web::Error;
use actix_web::dev::{Service, ServiceRequest, ServiceResponse, Transform};
use actix_web::http::header::{HeaderMap, HeaderName, HeaderValue};
use futures_util::future::{LocalBoxFuture, Ready, ready};
use opentelemetry::propagation::Extractor;
use opentelemetry::trace::TraceContextExt;
use tokio::task_local;
use tracing::{Instrument, Span, debug, error, field, info_span};
use tracing_opentelemetry::OpenTelemetrySpanExt;
use uuid::Uuid;

use crate::telemetry::SharedPropagator;

/// Response header carrying the request's trace identifier.
pub const TRACE_ID_HEADER: &str = "trace-id";

task_local! {
    static TRACE_ID: TraceId;
}

/// 128-bit trace identifier rendered as 32 lowercase hex digits.
///
/// Matches the OpenTelemetry trace id when the request joined an exported
/// trace; otherwise it is random.
///
/// # Examples
/// ```
/// use cep_weather::middleware::trace::TraceId;
///
/// let id: TraceId = "4bf92f3577b34da6a3ce929d0e0e4736".parse().expect("hex id");
/// assert_eq!(id.to_string(), "4bf92f3577b34da6a3ce929d0e0e4736");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TraceId(u128);

/// Error parsing a [`TraceId`] from text.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("trace id must be 32 hexadecimal digits")]
pub struct TraceIdParseError;

impl TraceId {
    #[rustfmt::skip]
    fn generate() -> Self { Self(Uuid::new_v4().as_u128()) }

    fn from_span(span: &Span) -> Option<Self> {
        let trace_id = span.context().span().span_context().trace_id();
        (trace_id != opentelemetry::trace::TraceId::INVALID)
            .then(|| Self(u128::from_be_bytes(trace_id.to_bytes())))
    }

    /// Returns the current trace identifier if one is in scope.
    #[rustfmt::skip]
    pub fn current() -> Option<Self> { TRACE_ID.try_with(|id| *id).ok() }

    /// Execute the provided future with the supplied trace identifier in scope.
    pub async fn scope<Fut>(trace_id: TraceId, fut: Fut) -> Fut::Output
    where
        Fut: Future,
    {
        TRACE_ID.scope(trace_id, fut).await
    }
}

impl fmt::Display for TraceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:032x}", self.0)
    }
}

impl FromStr for TraceId {
    type Err = TraceIdParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.len() != 32 || !s.bytes().all(|byte| byte.is_ascii_hexdigit()) {
            return Err(TraceIdParseError);
        }
        u128::from_str_radix(s, 16)
            .map(Self)
            .map_err(|_| TraceIdParseError)
    }
}

struct RequestHeaders<'a>(&'a HeaderMap);

impl Extractor for RequestHeaders<'_> {
    fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).and_then(|value| value.to_str().ok())
    }

    fn keys(&self) -> Vec<&str> {
        self.0.keys().map(HeaderName::as_str).collect()
    }
}

/// Tracing middleware opening a request span parented on the caller's trace
/// context and adding a `trace-id` header to every response.
///
/// # Examples
/// ```
/// use actix_web::App;
/// use cep_weather::Trace;
/// use cep_weather::telemetry::build_propagator;
///
/// let app = App::new().wrap(Trace::new(build_propagator()));
/// ```
#[derive(Clone)]
pub struct Trace {
    propagator: SharedPropagator,
}

impl Trace {
    /// Build the middleware around `propagator`.
    pub fn new(propagator: SharedPropagator) -> Self {
        Self { propagator }
    }
}

impl<S, B> Transform<S, ServiceRequest> for Trace
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type InitError = ();
    type Transform = TraceMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(TraceMiddleware {
            service,
            propagator: self.propagator.clone(),
        }))
    }
}

/// Service wrapper produced by [`Trace`].
pub struct TraceMiddleware<S> {
    service: S,
    propagator: SharedPropagator,
}

impl<S, B> Service<ServiceRequest> for TraceMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    fn poll_ready(&self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.service.poll_ready(cx)
    }

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let parent = self.propagator.extract(&RequestHeaders(req.headers()));
        let name = format!("{} {}", req.method(), req.path());
        let span = info_span!(
            "http.request",
            otel.name = %name,
            otel.kind = "server",
            http.method = %req.method(),
            http.target = %req.path(),
            http.status_code = field::Empty,
            trace_id = field::Empty,
        );
        if let Err(error) = span.set_parent(parent) {
            debug!(%error, "request span not parented on caller context");
        }

        let trace_id = TraceId::from_span(&span).unwrap_or_else(TraceId::generate);
        span.record("trace_id", field::display(trace_id));

        let fut = span.in_scope(|| self.service.call(req));
        let response_span = span.clone();
        Box::pin(TraceId::scope(
            trace_id,
            async move {
                let mut res = fut.await?;
                response_span.record("http.status_code", res.status().as_u16());
                match HeaderValue::from_str(&trace_id.to_string()) {
                    Ok(value) => {
                        res.response_mut()
                            .headers_mut()
                            .insert(HeaderName::from_static(TRACE_ID_HEADER), value);
                    }
                    Err(error) => {
                        error!(
                            %error,
                            trace_id = %trace_id,
                            "failed to encode trace identifier header"
                        );
                    }
                }
                Ok(res)
            }
            .instrument(span),
        ))
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use super::*;
    use crate::telemetry::build_propagator;
    use actix_web::{App, HttpResponse, test as actix_test, web};
    use opentelemetry::trace::TracerProvider as _;
    use opentelemetry_sdk::trace::SdkTracerProvider;
    use rstest::rstest;
    use tracing_subscriber::layer::SubscriberExt;

    const INCOMING_TRACE: &str = "4bf92f3577b34da6a3ce929d0e0e4736";

    fn header_trace_id<B>(res: &ServiceResponse<B>) -> String {
        res.headers()
            .get(TRACE_ID_HEADER)
            .expect("trace id header")
            .to_str()
            .expect("header is ascii")
            .to_owned()
    }

    #[test]
    fn generated_ids_render_as_32_hex_digits() {
        let rendered = TraceId::generate().to_string();
        assert_eq!(rendered.len(), 32);
        assert!(rendered.bytes().all(|byte| byte.is_ascii_hexdigit()));
    }

    #[rstest]
    #[case::short("4bf92f35")]
    #[case::non_hex("zzf92f3577b34da6a3ce929d0e0e4736")]
    #[case::signed("+bf92f3577b34da6a3ce929d0e0e4736")]
    fn rejects_malformed_ids(#[case] raw: &str) {
        assert_eq!(raw.parse::<TraceId>(), Err(TraceIdParseError));
    }

    #[tokio::test]
    async fn trace_id_current_reflects_scope() {
        let expected = TraceId::generate();
        let observed = TraceId::scope(expected, async move { TraceId::current() }).await;
        assert_eq!(observed, Some(expected));
        assert!(TraceId::current().is_none());
    }

    #[actix_web::test]
    async fn adds_trace_id_header_and_exposes_it_to_handlers() {
        let app = actix_test::init_service(
            App::new().wrap(Trace::new(build_propagator())).route(
                "/",
                web::get().to(|| async {
                    let id = TraceId::current().expect("trace id in scope");
                    HttpResponse::Ok().body(id.to_string())
                }),
            ),
        )
        .await;

        let res =
            actix_test::call_service(&app, actix_test::TestRequest::get().uri("/").to_request())
                .await;
        let trace_id = header_trace_id(&res);
        let body = actix_test::read_body(res).await;

        assert_eq!(trace_id.len(), 32);
        assert_eq!(std::str::from_utf8(&body).expect("utf8 body"), trace_id);
    }

    #[actix_web::test]
    async fn joins_incoming_trace_when_spans_are_exported() {
        let provider = SdkTracerProvider::builder().build();
        let subscriber = tracing_subscriber::registry()
            .with(tracing_opentelemetry::layer().with_tracer(provider.tracer("trace-test")));
        let _default = tracing::subscriber::set_default(subscriber);

        let app = actix_test::init_service(
            App::new()
                .wrap(Trace::new(build_propagator()))
                .route("/", web::get().to(|| async { HttpResponse::Ok().finish() })),
        )
        .await;
        let req = actix_test::TestRequest::get()
            .uri("/")
            .insert_header((
                "traceparent",
                format!("00-{INCOMING_TRACE}-00f067aa0ba902b7-01"),
            ))
            .to_request();

        let res = actix_test::call_service(&app, req).await;

        assert_eq!(header_trace_id(&res), INCOMING_TRACE);
    }
}
