//! Shared helpers for the endpoint integration suites.

use actix_web::body::MessageBody;
use actix_web::dev::ServiceResponse;
use actix_web::test as actix_test;
use serde_json::{Value, json};

/// Response header carrying the request's trace identifier.
pub const TRACE_ID_HEADER: &str = "trace-id";

/// Read the trace identifier the middleware attached to `res`.
pub fn trace_id<B>(res: &ServiceResponse<B>) -> Option<String> {
    res.headers()
        .get(TRACE_ID_HEADER)
        .and_then(|value| value.to_str().ok())
        .map(str::to_owned)
}

/// Collapse a response into `{status, body, trace_id}` for snapshotting.
///
/// The trace identifier is random per request, so snapshots redact it with
/// `{".trace_id" => "[trace_id]"}`.
pub async fn snapshot_of<B>(res: ServiceResponse<B>) -> Value
where
    B: MessageBody,
{
    let status = res.status().as_u16();
    let trace = trace_id(&res);
    let bytes = actix_test::read_body(res).await;
    let body: Value = serde_json::from_slice(&bytes).unwrap_or_else(|_| {
        Value::String(String::from_utf8_lossy(&bytes).into_owned())
    });
    json!({
        "status": status,
        "body": body,
        "trace_id": trace,
    })
}
