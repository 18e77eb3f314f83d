//! Common test utilities for MemoVault integration tests.

#![allow(dead_code)] // Some utilities are used by different test files

use std::sync::Arc;

use axum::http::HeaderName;
use axum::Router;
use axum_test::TestServer;
use chrono::{TimeZone, Utc};
use jsonwebtoken::{encode, Algorithm, EncodingKey, Header};
use serde_json::json;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use memovault_core::UserId;
use memovault_ledger::ManualClock;
use memovault_service::{create_router, AppState, ServiceConfig, StorageBackend};
use memovault_store::MemoryStore;

/// RSA key matching the `test-key` entry of the fixture JWKS.
const SIGNING_KEY: &[u8] = include_bytes!("fixtures/test_signing_key.pem");
const JWKS: &str = include_str!("fixtures/test_jwks.json");
const SIGNING_KEY_ID: &str = "test-key";

pub const ISSUER: &str = "https://auth.test.memovault";
pub const AUDIENCE: &str = "memovault";
pub const ADMIN_KEY: &str = "test-admin-key";
pub const ADMIN_KEY_HEADER: HeaderName = HeaderName::from_static("x-admin-key");

/// Test harness containing everything needed for integration tests.
pub struct TestHarness {
    /// The test server for making HTTP requests.
    pub server: TestServer,
    /// Identity provider serving the JWKS (kept alive for test duration).
    pub identity_provider: MockServer,
    /// The ledger clock, frozen until advanced.
    pub clock: Arc<ManualClock>,
    /// A test user ID for authenticated requests.
    pub test_user_id: UserId,
}

impl TestHarness {
    /// Create a new test harness with a fresh in-memory ledger.
    pub async fn new() -> Self {
        Self::with_config(|_| {}).await
    }

    /// Create a harness after adjusting the default test configuration.
    pub async fn with_config(customize: impl FnOnce(&mut ServiceConfig)) -> Self {
        let identity_provider = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/.well-known/jwks.json"))
            .respond_with(ResponseTemplate::new(200).set_body_raw(JWKS, "application/json"))
            .mount(&identity_provider)
            .await;

        let mut config = ServiceConfig {
            listen_addr: "127.0.0.1:0".into(),
            storage_backend: StorageBackend::Memory,
            auth_issuer: ISSUER.into(),
            auth_audience: AUDIENCE.into(),
            auth_jwks_url: format!("{}/.well-known/jwks.json", identity_provider.uri()),
            admin_api_key: Some(ADMIN_KEY.into()),
            ..ServiceConfig::default()
        };
        customize(&mut config);

        let clock = Arc::new(ManualClock::new(
            Utc.with_ymd_and_hms(2026, 10, 19, 9, 0, 0).unwrap(),
        ));
        let state = AppState::with_clock(Arc::new(MemoryStore::new()), config, clock.clone());
        let router: Router = create_router(state);

        let server = TestServer::new(router).expect("Failed to create test server");

        Self {
            server,
            identity_provider,
            clock,
            test_user_id: UserId::generate(),
        }
    }

    /// Get the authorization header for the test user.
    pub fn user_auth_header(&self) -> String {
        format!("Bearer {}", mint_token(self.test_user_id.as_str(), ISSUER, AUDIENCE))
    }

    /// Get a different user's auth header (for testing isolation).
    pub fn other_user_auth_header() -> String {
        let other_user = UserId::generate();
        format!("Bearer {}", mint_token(other_user.as_str(), ISSUER, AUDIENCE))
    }

    /// Give the test user credits through the admin API.
    pub async fn fund(&self, balance: i64) {
        self.server
            .post("/v1/admin/credits/set")
            .add_header(ADMIN_KEY_HEADER, ADMIN_KEY)
            .json(&json!({
                "user_id": self.test_user_id.to_string(),
                "balance": balance
            }))
            .await
            .assert_status_ok();
    }
}

/// Sign a one-hour RS256 token with the fixture key.
pub fn mint_token(subject: &str, issuer: &str, audience: &str) -> String {
    let now = Utc::now().timestamp();
    let claims = json!({
        "sub": subject,
        "iss": issuer,
        "aud": audience,
        "iat": now,
        "exp": now + 3600,
    });

    let mut header = Header::new(Algorithm::RS256);
    header.kid = Some(SIGNING_KEY_ID.into());

    let key = EncodingKey::from_rsa_pem(SIGNING_KEY).expect("Invalid fixture signing key");
    encode(&header, &claims, &key).expect("Failed to sign token")
}
