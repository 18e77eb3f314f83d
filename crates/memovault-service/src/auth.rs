//! Authentication extractors.
//!
//! This module provides extractors for:
//! - `AuthUser` - End-user authentication via JWT bearer token
//! - `AdminAuth` - Admin authentication for privileged endpoints

use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};

use async_trait::async_trait;
use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use axum::http::HeaderMap;
use jsonwebtoken::{decode, decode_header, Algorithm, DecodingKey, Validation};
use serde::Deserialize;
use tokio::sync::RwLock;

use memovault_core::UserId;

use crate::error::ApiError;
use crate::state::AppState;

// ============================================================================
// Constants
// ============================================================================

/// How long to cache JWKS keys before refreshing.
const JWKS_CACHE_DURATION: Duration = Duration::from_secs(3600);

/// Timeout for JWKS fetch requests.
const JWKS_FETCH_TIMEOUT: Duration = Duration::from_secs(10);

/// An authenticated user extracted from a bearer token.
#[derive(Debug, Clone)]
pub struct AuthUser {
    /// The user ID (the token's `sub` claim).
    pub user_id: UserId,
}

#[async_trait]
impl FromRequestParts<Arc<AppState>> for AuthUser {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &Arc<AppState>,
    ) -> Result<Self, Self::Rejection> {
        let token = bearer_token(&parts.headers)?;

        // Test tokens are compiled in only for tests and the "test-auth" feature.
        #[cfg(any(test, feature = "test-auth"))]
        if let Some(user_id_str) = token.strip_prefix("test-token:") {
            let user_id = user_id_str
                .parse::<UserId>()
                .map_err(|_| ApiError::Unauthorized)?;

            return Ok(AuthUser { user_id });
        }

        let claims = validate_jwt(token, state).await?;

        let user_id = claims.sub.parse::<UserId>().map_err(|e| {
            tracing::debug!(error = %e, "JWT subject is not a valid user ID");
            ApiError::Unauthorized
        })?;

        Ok(AuthUser { user_id })
    }
}

/// Admin authentication via API key.
///
/// Requires the `X-Admin-Key` header to match the configured admin key.
#[derive(Debug, Clone)]
pub struct AdminAuth {
    /// Admin identifier (for audit logging).
    pub admin_id: String,
}

#[async_trait]
impl FromRequestParts<Arc<AppState>> for AdminAuth {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &Arc<AppState>,
    ) -> Result<Self, Self::Rejection> {
        let admin_key = parts
            .headers
            .get("x-admin-key")
            .and_then(|v| v.to_str().ok())
            .ok_or(ApiError::Unauthorized)?;

        let expected_key = state
            .config
            .admin_api_key
            .as_deref()
            .ok_or(ApiError::Unauthorized)?;

        if admin_key != expected_key {
            return Err(ApiError::Unauthorized);
        }

        let admin_id = parts
            .headers
            .get("x-admin-id")
            .and_then(|v| v.to_str().ok())
            .unwrap_or("admin")
            .to_string();

        tracing::info!(admin_id = %admin_id, "Admin authenticated");

        Ok(AdminAuth { admin_id })
    }
}

/// Extract the token from an `Authorization: Bearer <token>` header.
fn bearer_token(headers: &HeaderMap) -> Result<&str, ApiError> {
    headers
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .ok_or(ApiError::Unauthorized)
}

/// JWT claims the service reads.
#[derive(Debug, Clone, Deserialize)]
pub struct JwtClaims {
    /// Subject (user ID).
    pub sub: String,
    /// Issuer.
    pub iss: String,
    /// Expiration time.
    pub exp: i64,
}

// ============================================================================
// JWKS Client and JWT Validation
// ============================================================================

/// JWKS (JSON Web Key Set) response structure.
#[derive(Debug, Clone, Deserialize)]
pub struct Jwks {
    /// List of JWK keys.
    pub keys: Vec<Jwk>,
}

/// Single JSON Web Key.
#[derive(Debug, Clone, Deserialize)]
pub struct Jwk {
    /// Key type (e.g., "RSA").
    pub kty: String,
    /// Key ID.
    pub kid: Option<String>,
    /// RSA public key modulus (base64url encoded).
    pub n: Option<String>,
    /// RSA public key exponent (base64url encoded).
    pub e: Option<String>,
}

#[derive(Default)]
struct CachedKeys {
    by_kid: HashMap<String, DecodingKey>,
    /// First usable key, for tokens without `kid`.
    default_key: Option<DecodingKey>,
    fetched_at: Option<Instant>,
}

impl CachedKeys {
    fn is_fresh(&self) -> bool {
        self.fetched_at
            .is_some_and(|at| at.elapsed() < JWKS_CACHE_DURATION)
    }

    fn get(&self, kid: Option<&str>) -> Option<DecodingKey> {
        match kid {
            Some(kid) => self.by_kid.get(kid).cloned(),
            None => self.default_key.clone(),
        }
    }
}

/// Signing keys fetched from the identity provider, refreshed hourly or when a token
/// names an unknown key.
pub struct JwksCache {
    jwks_url: String,
    client: reqwest::Client,
    keys: RwLock<CachedKeys>,
}

impl JwksCache {
    /// Create an empty cache for `jwks_url`. Keys are fetched on first use.
    #[must_use]
    pub fn new(jwks_url: String) -> Self {
        let client = reqwest::Client::builder()
            .timeout(JWKS_FETCH_TIMEOUT)
            .build()
            .unwrap_or_else(|_| reqwest::Client::new());

        Self {
            jwks_url,
            client,
            keys: RwLock::new(CachedKeys::default()),
        }
    }

    async fn decoding_key(&self, kid: Option<&str>) -> Result<DecodingKey, ApiError> {
        {
            let keys = self.keys.read().await;
            if keys.is_fresh() {
                if let Some(key) = keys.get(kid) {
                    return Ok(key);
                }
            }
        }

        let jwks = self.fetch().await?;

        let mut keys = self.keys.write().await;
        *keys = CachedKeys {
            fetched_at: Some(Instant::now()),
            ..CachedKeys::default()
        };

        for jwk in &jwks.keys {
            if let Some(decoding_key) = jwk_to_decoding_key(jwk) {
                if let Some(ref key_kid) = jwk.kid {
                    keys.by_kid.insert(key_kid.clone(), decoding_key.clone());
                }
                if keys.default_key.is_none() {
                    keys.default_key = Some(decoding_key);
                }
            }
        }

        keys.get(kid).ok_or(ApiError::Unauthorized)
    }

    async fn fetch(&self) -> Result<Jwks, ApiError> {
        tracing::debug!(url = %self.jwks_url, "Fetching JWKS");

        let response = self.client.get(&self.jwks_url).send().await.map_err(|e| {
            tracing::error!(error = %e, url = %self.jwks_url, "Failed to fetch JWKS");
            ApiError::ExternalService("Failed to fetch authentication keys".into())
        })?;

        if !response.status().is_success() {
            tracing::error!(
                status = %response.status(),
                url = %self.jwks_url,
                "JWKS fetch returned non-success status"
            );
            return Err(ApiError::ExternalService(
                "Failed to fetch authentication keys".into(),
            ));
        }

        let jwks: Jwks = response.json().await.map_err(|e| {
            tracing::error!(error = %e, "Failed to parse JWKS response");
            ApiError::ExternalService("Failed to parse authentication keys".into())
        })?;

        tracing::info!(keys_count = %jwks.keys.len(), "JWKS fetched successfully");

        Ok(jwks)
    }
}

/// Validate a JWT against the identity provider's keys.
async fn validate_jwt(token: &str, state: &AppState) -> Result<JwtClaims, ApiError> {
    let header = decode_header(token).map_err(|e| {
        tracing::debug!(error = %e, "Failed to decode JWT header");
        ApiError::Unauthorized
    })?;

    let decoding_key = state.jwks.decoding_key(header.kid.as_deref()).await?;

    let mut validation = Validation::new(Algorithm::RS256);
    validation.set_audience(&[&state.config.auth_audience]);
    validation.set_issuer(&[&state.config.auth_issuer]);

    let token_data = decode::<JwtClaims>(token, &decoding_key, &validation).map_err(|e| {
        tracing::debug!(error = %e, "JWT validation failed");
        ApiError::Unauthorized
    })?;

    Ok(token_data.claims)
}

/// Convert a JWK to a `DecodingKey`.
fn jwk_to_decoding_key(jwk: &Jwk) -> Option<DecodingKey> {
    if jwk.kty != "RSA" {
        tracing::debug!(kty = %jwk.kty, "Skipping non-RSA JWK");
        return None;
    }

    let n = jwk.n.as_ref()?;
    let e = jwk.e.as_ref()?;

    DecodingKey::from_rsa_components(n, e).ok()
}
