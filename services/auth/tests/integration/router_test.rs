use std::sync::Arc;

use axum::http::{HeaderName, HeaderValue, StatusCode};
use axum_test::TestServer;
use chrono::{Duration, Utc};
use sea_orm::{DatabaseBackend, DatabaseConnection, DbErr, MockDatabase, MockExecResult};
use serde_json::{Value, json};
use uuid::Uuid;

use rentwise_auth::router::build_router;
use rentwise_auth::state::AppState;
use rentwise_auth_schema::{email_otps, profiles};

use crate::helpers::{TEST_CODE, test_user_id};

fn server(db: DatabaseConnection) -> TestServer {
    let state = AppState {
        db: Arc::new(db),
        otp_ttl: Duration::minutes(5),
    };
    TestServer::new(build_router(state)).unwrap()
}

fn empty_db() -> DatabaseConnection {
    MockDatabase::new(DatabaseBackend::Postgres).into_connection()
}

fn exec(rows_affected: u64) -> MockExecResult {
    MockExecResult {
        last_insert_id: 0,
        rows_affected,
    }
}

fn otp_row() -> email_otps::Model {
    let now = Utc::now();
    email_otps::Model {
        id: Uuid::new_v4(),
        user_id: test_user_id().0,
        code: TEST_CODE.to_owned(),
        expires_at: now + Duration::minutes(5),
        created_at: now,
    }
}

#[tokio::test]
async fn should_answer_liveness_probe() {
    let server = server(empty_db());
    server.get("/healthz").await.assert_status_ok();
}

#[tokio::test]
async fn should_answer_readiness_probe_when_db_reachable() {
    let server = server(empty_db());
    server.get("/readyz").await.assert_status_ok();
}

#[tokio::test]
async fn should_attach_request_id_to_responses() {
    let server = server(empty_db());
    let response = server.get("/healthz").await;
    let id = response.header("x-request-id");
    assert!(Uuid::parse_str(id.to_str().unwrap()).is_ok());
}

#[tokio::test]
async fn should_keep_caller_supplied_request_id() {
    let server = server(empty_db());
    let response = server
        .get("/healthz")
        .add_header(
            HeaderName::from_static("x-request-id"),
            HeaderValue::from_static("login-screen-42"),
        )
        .await;
    assert_eq!(response.header("x-request-id"), "login-screen-42");
}

// ── POST /auth/otp/verify ────────────────────────────────────────────────────

#[tokio::test]
async fn should_verify_and_return_destination() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([vec![otp_row()]])
        .append_exec_results([exec(1)])
        .append_query_results([vec![profiles::Model {
            id: test_user_id().0,
            kind_of_user: Some("Landlord".to_owned()),
        }]])
        .into_connection();
    let server = server(db);

    let response = server
        .post("/auth/otp/verify")
        .json(&json!({ "user_id": test_user_id(), "code": TEST_CODE }))
        .await;

    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["user_id"], test_user_id().to_string());
    assert_eq!(body["kind"], "landlord");
    assert_eq!(body["destination"], "landlord_home");
    assert_eq!(body["route"], "/(tabs)/landlord/upload");
}

#[tokio::test]
async fn should_return_400_for_malformed_code() {
    let server = server(empty_db());

    let response = server
        .post("/auth/otp/verify")
        .json(&json!({ "user_id": test_user_id(), "code": "12ab" }))
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
    let body: Value = response.json();
    assert_eq!(body["kind"], "INVALID_FORMAT");
}

#[tokio::test]
async fn should_return_401_for_unknown_code() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([Vec::<email_otps::Model>::new()])
        .into_connection();
    let server = server(db);

    let response = server
        .post("/auth/otp/verify")
        .json(&json!({ "user_id": test_user_id(), "code": "000000" }))
        .await;

    response.assert_status(StatusCode::UNAUTHORIZED);
    let body: Value = response.json();
    assert_eq!(body["kind"], "INVALID_OR_EXPIRED_CODE");
    assert_eq!(body["message"], "invalid or expired code");
}

#[tokio::test]
async fn should_return_401_when_consume_affects_no_rows() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([vec![otp_row()]])
        .append_exec_results([exec(0)])
        .into_connection();
    let server = server(db);

    let response = server
        .post("/auth/otp/verify")
        .json(&json!({ "user_id": test_user_id(), "code": TEST_CODE }))
        .await;

    response.assert_status(StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn should_return_404_when_profile_missing() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([vec![otp_row()]])
        .append_exec_results([exec(1)])
        .append_query_results([Vec::<profiles::Model>::new()])
        .into_connection();
    let server = server(db);

    let response = server
        .post("/auth/otp/verify")
        .json(&json!({ "user_id": test_user_id(), "code": TEST_CODE }))
        .await;

    response.assert_status(StatusCode::NOT_FOUND);
    let body: Value = response.json();
    assert_eq!(body["kind"], "PROFILE_NOT_FOUND");
}

#[tokio::test]
async fn should_return_503_when_store_fails() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_errors([DbErr::Custom("connection reset".to_owned())])
        .into_connection();
    let server = server(db);

    let response = server
        .post("/auth/otp/verify")
        .json(&json!({ "user_id": test_user_id(), "code": TEST_CODE }))
        .await;

    response.assert_status(StatusCode::SERVICE_UNAVAILABLE);
    let body: Value = response.json();
    assert_eq!(body["kind"], "TRANSIENT_STORE_ERROR");
}

#[tokio::test]
async fn should_reject_malformed_user_id() {
    let server = server(empty_db());

    let response = server
        .post("/auth/otp/verify")
        .json(&json!({ "user_id": "", "code": TEST_CODE }))
        .await;

    response.assert_status(StatusCode::UNPROCESSABLE_ENTITY);
}

// ── POST /auth/otp ───────────────────────────────────────────────────────────

fn tenant_profile() -> profiles::Model {
    profiles::Model {
        id: test_user_id().0,
        kind_of_user: Some("tenant".to_owned()),
    }
}

#[tokio::test]
async fn should_issue_otp_without_returning_code() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([vec![tenant_profile()]])
        .append_exec_results([exec(0), exec(1), exec(1)])
        .into_connection();
    let server = server(db);

    let response = server
        .post("/auth/otp")
        .json(&json!({ "user_id": test_user_id(), "email": "tenant@example.com" }))
        .await;

    response.assert_status(StatusCode::CREATED);
    let body: Value = response.json();
    assert!(Uuid::parse_str(body["otp_id"].as_str().unwrap()).is_ok());
    let expires_at = body["expires_at"].as_str().unwrap();
    assert!(expires_at.ends_with('Z'), "{expires_at}");
    assert!(body.get("code").is_none(), "code must only travel by email");
}

#[tokio::test]
async fn should_return_400_for_invalid_email() {
    let server = server(empty_db());

    let response = server
        .post("/auth/otp")
        .json(&json!({ "user_id": test_user_id(), "email": "nope" }))
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
    let body: Value = response.json();
    assert_eq!(body["kind"], "INVALID_EMAIL");
}

#[tokio::test]
async fn should_return_404_when_issuing_for_unknown_profile() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([Vec::<profiles::Model>::new()])
        .into_connection();
    let server = server(db);

    let response = server
        .post("/auth/otp")
        .json(&json!({ "user_id": test_user_id(), "email": "tenant@example.com" }))
        .await;

    response.assert_status(StatusCode::NOT_FOUND);
    let body: Value = response.json();
    assert_eq!(body["kind"], "PROFILE_NOT_FOUND");
}
