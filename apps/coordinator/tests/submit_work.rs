// [apps/coordinator/tests/submit_work.rs]
/*!
 * =================================================================
 * APARATO: SUBMIT WORK INTEGRATION CERTIFIER (V2.0)
 * CLASIFICACIÓN: EVIDENCE (ESTRATO L4-INTEGRATION)
 * RESPONSABILIDAD: VALIDACIÓN DEL CONTRATO DE ENVOLTURA Y COLISIONES
 *
 * Drives the real axum router in-process through the concrete
 * wire-contract scenarios: auth, hash length, collision bookkeeping,
 * and envelope malformation at every layer (syntax, missing field,
 * unknown field, bad hex value).
 * =================================================================
 */

use axum::body::Body;
use axum::http::{Request, StatusCode};
use http_body_util::BodyExt;
use libsql::params;
use rho_coordinator::{build_router, AppState};
use rho_hash::HashInstance;
use rho_store::StoreClient;
use serde_json::{json, Value};
use tower::ServiceExt;

async fn seed_user(store: &StoreClient, username: &str, token: &str) {
    let connection = store.connection().unwrap();
    connection
        .execute(
            "INSERT INTO user (username, usertoken) VALUES (?1, ?2)",
            params![username.to_string(), token.to_string()],
        )
        .await
        .unwrap();
}

async fn test_app() -> axum::Router {
    let store = StoreClient::connect(":memory:", None).await.unwrap();
    seed_user(&store, "alice", "alicetoken").await;
    seed_user(&store, "bob", "bobtoken").await;
    let instance = HashInstance::new(8, 0).unwrap();
    let state = AppState::new(store, instance);
    build_router(state)
}

async fn post_submit_work(app: &axum::Router, body: Value) -> (StatusCode, Value) {
    post_raw_body(app, body.to_string()).await
}

async fn post_raw_body(app: &axum::Router, body: String) -> (StatusCode, Value) {
    let request = Request::builder()
        .method("POST")
        .uri("/submit_work")
        .header("content-type", "application/json")
        .body(Body::from(body))
        .unwrap();
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let parsed: Value = serde_json::from_slice(&bytes).unwrap();
    (status, parsed)
}

#[tokio::test]
async fn bad_token_is_rejected() {
    let app = test_app().await;
    let (status, body) = post_submit_work(
        &app,
        json!({"username": "alice", "usertoken": "wrong", "results": []}),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["status"], "bad username and/or usertoken");
}

#[tokio::test]
async fn empty_results_are_accepted() {
    let app = test_app().await;
    let (status, body) = post_submit_work(
        &app,
        json!({"username": "alice", "usertoken": "alicetoken", "results": []}),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert!(body["status"].as_str().unwrap().contains("accepted 0 results"));
}

#[tokio::test]
async fn wrong_length_hash_is_rejected() {
    let app = test_app().await;
    let (status, body) = post_submit_work(
        &app,
        json!({
            "username": "alice",
            "usertoken": "alicetoken",
            "results": [{"start": "deadbeef", "dp": "deadbeef"}],
        }),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["status"], "bad hash length");
}

#[tokio::test]
async fn shared_endpoint_from_two_users_records_one_collision() {
    let app = test_app().await;

    let (status_a, body_a) = post_submit_work(
        &app,
        json!({
            "username": "alice",
            "usertoken": "alicetoken",
            "results": [{"start": "deadbeefcafebabe", "dp": "1111111111111111"}],
        }),
    )
    .await;
    assert_eq!(status_a, StatusCode::OK);
    assert!(body_a["status"].as_str().unwrap().contains("accepted 1 results"));

    let (status_b, body_b) = post_submit_work(
        &app,
        json!({
            "username": "bob",
            "usertoken": "bobtoken",
            "results": [{"start": "fedcba9876543210", "dp": "1111111111111111"}],
        }),
    )
    .await;
    assert_eq!(status_b, StatusCode::OK);
    assert!(body_b["status"].as_str().unwrap().contains("accepted 1 results"));
}

#[tokio::test]
async fn distinct_dps_increase_the_user_counter_by_two() {
    let app = test_app().await;
    let (status, body) = post_submit_work(
        &app,
        json!({
            "username": "alice",
            "usertoken": "alicetoken",
            "results": [
                {"start": "0000000000000001", "dp": "aaaaaaaaaaaaaaaa"},
                {"start": "0000000000000002", "dp": "bbbbbbbbbbbbbbbb"},
            ],
        }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert!(body["status"].as_str().unwrap().contains("accepted 2 results"));
}

#[tokio::test]
async fn invalid_json_syntax_is_reported_as_bad_request() {
    let app = test_app().await;
    let (status, body) = post_raw_body(&app, "{not valid json".to_string()).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["status"], "bad request");
}

#[tokio::test]
async fn a_missing_required_field_is_reported_as_bad_request() {
    let app = test_app().await;
    let (status, body) = post_submit_work(&app, json!({"username": "alice"})).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["status"], "bad request");
}

#[tokio::test]
async fn an_unknown_field_is_reported_as_bad_request() {
    let app = test_app().await;
    let (status, body) = post_submit_work(
        &app,
        json!({
            "username": "alice",
            "usertoken": "alicetoken",
            "results": [],
            "extra_field_nobody_asked_for": true,
        }),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["status"], "bad request");
}

#[tokio::test]
async fn malformed_hex_aborts_the_whole_batch() {
    let app = test_app().await;
    let (status, body) = post_submit_work(
        &app,
        json!({
            "username": "alice",
            "usertoken": "alicetoken",
            "results": [{"start": "not-hex", "dp": "1111111111111111"}],
        }),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["status"], "bad request");
}
