use axum::http::StatusCode;

/// Handler for `GET /healthz`. Liveness check.
///
/// Readiness depends on each service's backing stores, so `/readyz` lives in
/// the service crates.
pub async fn healthz() -> StatusCode {
    StatusCode::OK
}
