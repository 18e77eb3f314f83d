//! Credit balance, transactions, purchase and redeem integration tests.

mod common;

use axum::http::header::AUTHORIZATION;
use axum::http::StatusCode;
use common::TestHarness;
use serde_json::json;

// ============================================================================
// Balance
// ============================================================================

#[tokio::test]
async fn new_user_has_zero_balance() {
    let harness = TestHarness::new().await;

    let response = harness
        .server
        .get("/v1/credits/balance")
        .add_header(AUTHORIZATION, harness.user_auth_header())
        .await;

    response.assert_status_ok();
    let body: serde_json::Value = response.json();
    assert_eq!(body["balance"], 0);
    assert_eq!(body["free_chats_remaining"], 100);
}

#[tokio::test]
async fn get_balance_without_auth_fails() {
    let harness = TestHarness::new().await;

    let response = harness.server.get("/v1/credits/balance").await;

    response.assert_status_unauthorized();
    let body: serde_json::Value = response.json();
    assert_eq!(body["error"]["code"], "unauthorized");
}

#[tokio::test]
async fn balances_are_per_user() {
    let harness = TestHarness::new().await;
    harness.fund(500).await;

    let response = harness
        .server
        .get("/v1/credits/balance")
        .add_header(AUTHORIZATION, TestHarness::other_user_auth_header())
        .await;

    response.assert_status_ok();
    let body: serde_json::Value = response.json();
    assert_eq!(body["balance"], 0);
}

// ============================================================================
// Redeem
// ============================================================================

#[tokio::test]
async fn redeem_code_once() {
    let harness = TestHarness::new().await;
    harness.fund(100).await;

    let response = harness
        .server
        .post("/v1/credits/redeem")
        .add_header(AUTHORIZATION, harness.user_auth_header())
        .json(&json!({ "code": "A#7f$Lp@9X" }))
        .await;

    response.assert_status_ok();
    let body: serde_json::Value = response.json();
    assert_eq!(body["amount"], 100);
    assert_eq!(body["balance"], 200);

    let again = harness
        .server
        .post("/v1/credits/redeem")
        .add_header(AUTHORIZATION, harness.user_auth_header())
        .json(&json!({ "code": "A#7f$Lp@9X" }))
        .await;

    again.assert_status_bad_request();
    let body: serde_json::Value = again.json();
    assert_eq!(body["error"]["code"], "invalid_code");

    let balance: serde_json::Value = harness
        .server
        .get("/v1/credits/balance")
        .add_header(AUTHORIZATION, harness.user_auth_header())
        .await
        .json();
    assert_eq!(balance["balance"], 200);
}

#[tokio::test]
async fn redeem_unknown_code_fails() {
    let harness = TestHarness::new().await;

    let response = harness
        .server
        .post("/v1/credits/redeem")
        .add_header(AUTHORIZATION, harness.user_auth_header())
        .json(&json!({ "code": "NOT-A-CODE" }))
        .await;

    response.assert_status_bad_request();
    let body: serde_json::Value = response.json();
    assert_eq!(body["error"]["code"], "invalid_code");
}

// ============================================================================
// Purchase
// ============================================================================

#[tokio::test]
async fn purchase_adds_credits() {
    let harness = TestHarness::new().await;

    let response = harness
        .server
        .post("/v1/credits/purchase")
        .add_header(AUTHORIZATION, harness.user_auth_header())
        .json(&json!({ "amount": 250 }))
        .await;

    response.assert_status_ok();
    let body: serde_json::Value = response.json();
    assert_eq!(body["balance"], 250);
}

#[tokio::test]
async fn purchase_outside_range_fails() {
    let harness = TestHarness::new().await;

    for amount in [0, 9, 10_001] {
        let response = harness
            .server
            .post("/v1/credits/purchase")
            .add_header(AUTHORIZATION, harness.user_auth_header())
            .json(&json!({ "amount": amount }))
            .await;

        response.assert_status_bad_request();
    }
}

// ============================================================================
// Transactions
// ============================================================================

#[tokio::test]
async fn list_transactions_empty() {
    let harness = TestHarness::new().await;

    let response = harness
        .server
        .get("/v1/credits/transactions")
        .add_header(AUTHORIZATION, harness.user_auth_header())
        .await;

    response.assert_status_ok();
    let body: serde_json::Value = response.json();
    assert!(body["transactions"].as_array().unwrap().is_empty());
    assert_eq!(body["has_more"], false);
}

#[tokio::test]
async fn transactions_are_newest_first_and_paginated() {
    let harness = TestHarness::new().await;

    for amount in [10, 20, 30] {
        harness
            .server
            .post("/v1/credits/purchase")
            .add_header(AUTHORIZATION, harness.user_auth_header())
            .json(&json!({ "amount": amount }))
            .await
            .assert_status_ok();
    }
    harness
        .server
        .post("/v1/credits/redeem")
        .add_header(AUTHORIZATION, harness.user_auth_header())
        .json(&json!({ "code": "z%2&Kq!T8v" }))
        .await
        .assert_status_ok();

    let response = harness
        .server
        .get("/v1/credits/transactions?limit=2&offset=0")
        .add_header(AUTHORIZATION, harness.user_auth_header())
        .await;

    response.assert_status_ok();
    let body: serde_json::Value = response.json();
    let transactions = body["transactions"].as_array().unwrap();
    assert_eq!(transactions.len(), 2);
    assert_eq!(transactions[0]["type"], "Redeem");
    assert_eq!(transactions[0]["amount"], 200);
    assert_eq!(transactions[0]["code"], "z%2&Kq!T8v");
    assert_eq!(transactions[1]["type"], "Purchase");
    assert_eq!(transactions[1]["amount"], 30);
    assert_eq!(body["has_more"], true);

    let last_page: serde_json::Value = harness
        .server
        .get("/v1/credits/transactions?limit=2&offset=2")
        .add_header(AUTHORIZATION, harness.user_auth_header())
        .await
        .json();
    let transactions = last_page["transactions"].as_array().unwrap();
    assert_eq!(transactions.len(), 2);
    assert_eq!(transactions[1]["amount"], 10);
    assert_eq!(last_page["has_more"], false);
}

// ============================================================================
// Memory saves
// ============================================================================

#[tokio::test]
async fn memory_save_past_threshold_requires_credits() {
    let harness = TestHarness::new().await;

    let free = harness
        .server
        .post("/v1/memories/charge")
        .add_header(AUTHORIZATION, harness.user_auth_header())
        .json(&json!({ "existing_memories": 10 }))
        .await;
    free.assert_status_ok();
    assert_eq!(free.json::<serde_json::Value>()["charged"], false);

    let refused = harness
        .server
        .post("/v1/memories/charge")
        .add_header(AUTHORIZATION, harness.user_auth_header())
        .json(&json!({ "existing_memories": 500 }))
        .await;
    refused.assert_status(StatusCode::PAYMENT_REQUIRED);
    let body: serde_json::Value = refused.json();
    assert_eq!(body["error"]["code"], "insufficient_credits");
    assert_eq!(body["error"]["details"]["required"], 150);

    harness.fund(150).await;
    let charged = harness
        .server
        .post("/v1/memories/charge")
        .add_header(AUTHORIZATION, harness.user_auth_header())
        .json(&json!({ "existing_memories": 500 }))
        .await;
    charged.assert_status_ok();
    let body: serde_json::Value = charged.json();
    assert_eq!(body["charged"], true);
    assert_eq!(body["balance"], 0);
}
