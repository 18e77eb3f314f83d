//! Admin endpoint integration tests.

mod common;

use axum::http::header::AUTHORIZATION;
use common::{TestHarness, ADMIN_KEY, ADMIN_KEY_HEADER};
use serde_json::json;

async fn balance(harness: &TestHarness) -> i64 {
    let body: serde_json::Value = harness
        .server
        .get("/v1/credits/balance")
        .add_header(AUTHORIZATION, harness.user_auth_header())
        .await
        .json();
    body["balance"].as_i64().unwrap()
}

#[tokio::test]
async fn set_add_and_deduct() {
    let harness = TestHarness::new().await;
    let user_id = harness.test_user_id.to_string();

    harness.fund(40).await;
    assert_eq!(balance(&harness).await, 40);

    let response = harness
        .server
        .post("/v1/admin/credits/add")
        .add_header(ADMIN_KEY_HEADER, ADMIN_KEY)
        .json(&json!({ "user_id": user_id, "amount": 60 }))
        .await;
    response.assert_status_ok();
    let body: serde_json::Value = response.json();
    assert_eq!(body["balance"], 100);
    assert_eq!(body["user_id"], user_id);

    let response = harness
        .server
        .post("/v1/admin/credits/deduct")
        .add_header(ADMIN_KEY_HEADER, ADMIN_KEY)
        .json(&json!({ "user_id": user_id, "amount": 30 }))
        .await;
    response.assert_status_ok();
    assert_eq!(response.json::<serde_json::Value>()["balance"], 70);
    assert_eq!(balance(&harness).await, 70);
}

#[tokio::test]
async fn deduct_clamps_at_zero() {
    let harness = TestHarness::new().await;
    harness.fund(50).await;

    let response = harness
        .server
        .post("/v1/admin/credits/deduct")
        .add_header(ADMIN_KEY_HEADER, ADMIN_KEY)
        .json(&json!({ "user_id": harness.test_user_id.to_string(), "amount": 80 }))
        .await;

    response.assert_status_ok();
    assert_eq!(response.json::<serde_json::Value>()["balance"], 0);
    assert_eq!(balance(&harness).await, 0);
}

#[tokio::test]
async fn reset_daily_chats() {
    let harness = TestHarness::new().await;

    for _ in 0..3 {
        harness
            .server
            .post("/v1/chats/messages")
            .add_header(AUTHORIZATION, harness.user_auth_header())
            .await
            .assert_status_ok();
    }

    harness
        .server
        .post("/v1/admin/chats/reset")
        .add_header(ADMIN_KEY_HEADER, ADMIN_KEY)
        .json(&json!({ "user_id": harness.test_user_id.to_string() }))
        .await
        .assert_status_ok();

    let quota: serde_json::Value = harness
        .server
        .get("/v1/chats/quota")
        .add_header(AUTHORIZATION, harness.user_auth_header())
        .await
        .json();
    assert_eq!(quota["daily_count"], 0);
}

#[tokio::test]
async fn admin_routes_require_admin_key() {
    let harness = TestHarness::new().await;
    let body = json!({ "user_id": harness.test_user_id.to_string(), "balance": 1000 });

    harness
        .server
        .post("/v1/admin/credits/set")
        .json(&body)
        .await
        .assert_status_unauthorized();

    harness
        .server
        .post("/v1/admin/credits/set")
        .add_header(ADMIN_KEY_HEADER, "wrong-key")
        .json(&body)
        .await
        .assert_status_unauthorized();

    // A user token is not an admin credential.
    harness
        .server
        .post("/v1/admin/credits/set")
        .add_header(AUTHORIZATION, harness.user_auth_header())
        .json(&body)
        .await
        .assert_status_unauthorized();

    assert_eq!(balance(&harness).await, 0);
}

#[tokio::test]
async fn admin_routes_disabled_without_configured_key() {
    let harness = TestHarness::with_config(|config| config.admin_api_key = None).await;

    harness
        .server
        .post("/v1/admin/credits/add")
        .add_header(ADMIN_KEY_HEADER, ADMIN_KEY)
        .json(&json!({ "user_id": harness.test_user_id.to_string(), "amount": 5 }))
        .await
        .assert_status_unauthorized();
}

#[tokio::test]
async fn invalid_user_id_is_rejected() {
    let harness = TestHarness::new().await;

    harness
        .server
        .post("/v1/admin/credits/add")
        .add_header(ADMIN_KEY_HEADER, ADMIN_KEY)
        .json(&json!({ "user_id": "has spaces", "amount": 5 }))
        .await
        .assert_status_bad_request();
}
