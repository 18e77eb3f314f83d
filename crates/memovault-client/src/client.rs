//! MemoVault HTTP client implementation.

use reqwest::{Client, Method, RequestBuilder};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::time::Duration;

use crate::error::ClientError;
use crate::types::{
    ApiErrorResponse, BalanceResponse, BuyThemeResponse, ChargeMemoryRequest,
    ChatChargeResponse, CreditsResponse, MemoryChargeResponse, PurchaseRequest, QuotaResponse,
    RedeemRequest, SelectThemeResponse, ThemesResponse, TransactionsResponse,
};

/// MemoVault API client acting for one user.
#[derive(Debug, Clone)]
pub struct MemoVaultClient {
    client: Client,
    base_url: String,
    user_token: String,
}

impl MemoVaultClient {
    /// Create a new client.
    ///
    /// # Arguments
    ///
    /// * `base_url` - Base URL of the service (e.g., `"https://api.memovault.app"`)
    /// * `user_token` - The user's bearer token
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built.
    pub fn new(
        base_url: impl Into<String>,
        user_token: impl Into<String>,
    ) -> Result<Self, ClientError> {
        Self::with_options(base_url, user_token, ClientOptions::default())
    }

    /// Create a new client with custom options.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built.
    pub fn with_options(
        base_url: impl Into<String>,
        user_token: impl Into<String>,
        options: ClientOptions,
    ) -> Result<Self, ClientError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(options.timeout_seconds))
            .build()
            .map_err(|e| ClientError::Configuration(format!("failed to build HTTP client: {e}")))?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            user_token: user_token.into(),
        })
    }

    /// Get the current balance and free chats left today.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the server returns an error.
    pub async fn balance(&self) -> Result<BalanceResponse, ClientError> {
        self.send(self.request(Method::GET, "/v1/credits/balance"))
            .await
    }

    /// Get a page of the transaction log, newest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the server returns an error.
    pub async fn transactions(
        &self,
        limit: usize,
        offset: usize,
    ) -> Result<TransactionsResponse, ClientError> {
        let request = self
            .request(Method::GET, "/v1/credits/transactions")
            .query(&[("limit", limit), ("offset", offset)]);
        self.send(request).await
    }

    /// Buy credits.
    ///
    /// # Errors
    ///
    /// Returns an error if the amount is out of range, the request fails, or the
    /// server returns an error.
    pub async fn purchase_credits(&self, amount: i64) -> Result<CreditsResponse, ClientError> {
        self.post_json("/v1/credits/purchase", &PurchaseRequest { amount })
            .await
    }

    /// Redeem a code.
    ///
    /// # Errors
    ///
    /// Returns `ClientError::InvalidCode` if the code is unknown or already used.
    pub async fn redeem_code(&self, code: &str) -> Result<CreditsResponse, ClientError> {
        self.post_json("/v1/credits/redeem", &RedeemRequest { code })
            .await
    }

    /// Get today's chat quota.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the server returns an error.
    pub async fn chat_quota(&self) -> Result<QuotaResponse, ClientError> {
        self.send(self.request(Method::GET, "/v1/chats/quota")).await
    }

    /// Count a chat message, paying for it once the free quota is used up.
    ///
    /// # Errors
    ///
    /// Returns `ClientError::InsufficientCredits` if the message must be paid for and
    /// the balance does not cover it.
    pub async fn record_chat_message(&self) -> Result<ChatChargeResponse, ClientError> {
        self.send(self.request(Method::POST, "/v1/chats/messages"))
            .await
    }

    /// Pay for a memory save when the user already holds `existing_memories`.
    ///
    /// # Errors
    ///
    /// Returns `ClientError::InsufficientCredits` if the save must be paid for and the
    /// balance does not cover it.
    pub async fn charge_memory_save(
        &self,
        existing_memories: u32,
    ) -> Result<MemoryChargeResponse, ClientError> {
        self.post_json(
            "/v1/memories/charge",
            &ChargeMemoryRequest { existing_memories },
        )
        .await
    }

    /// List the theme catalog.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the server returns an error.
    pub async fn themes(&self) -> Result<ThemesResponse, ClientError> {
        self.send(self.request(Method::GET, "/v1/themes")).await
    }

    /// Buy a theme.
    ///
    /// # Errors
    ///
    /// Returns `ClientError::InsufficientCredits` if the balance is below the price.
    pub async fn buy_theme(&self, index: usize) -> Result<BuyThemeResponse, ClientError> {
        self.send(self.request(Method::POST, &format!("/v1/themes/{index}/buy")))
            .await
    }

    /// Make an owned theme active.
    ///
    /// # Errors
    ///
    /// Returns an error if the theme is unknown or not owned.
    pub async fn select_theme(&self, index: usize) -> Result<SelectThemeResponse, ClientError> {
        self.send(self.request(Method::POST, &format!("/v1/themes/{index}/select")))
            .await
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        self.client
            .request(method, format!("{}{path}", self.base_url))
            .bearer_auth(&self.user_token)
    }

    async fn post_json<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, ClientError> {
        self.send(self.request(Method::POST, path).json(body)).await
    }

    async fn send<T: DeserializeOwned>(&self, request: RequestBuilder) -> Result<T, ClientError> {
        let response = request.send().await?;
        handle_response(response).await
    }
}

/// Handle API response and convert errors.
async fn handle_response<T: DeserializeOwned>(response: reqwest::Response) -> Result<T, ClientError> {
    let status = response.status();

    if status.is_success() {
        return Ok(response.json().await?);
    }

    let error_body: Result<ApiErrorResponse, _> = response.json().await;

    match error_body {
        Ok(api_error) => {
            let details = api_error.error.details.as_ref();
            let detail = |key: &str| {
                details
                    .and_then(|d| d.get(key))
                    .and_then(serde_json::Value::as_i64)
                    .unwrap_or(0)
            };

            match api_error.error.code.as_str() {
                "insufficient_credits" => Err(ClientError::InsufficientCredits {
                    balance: detail("balance"),
                    required: detail("required"),
                }),
                "invalid_code" => Err(ClientError::InvalidCode),
                "unauthorized" => Err(ClientError::Unauthorized),
                code => {
                    tracing::debug!(status = %status, code, "API request failed");
                    Err(ClientError::Api {
                        code: code.to_string(),
                        message: api_error.error.message,
                        status: status.as_u16(),
                    })
                }
            }
        }
        Err(_) => Err(ClientError::Api {
            code: "unknown".to_string(),
            message: format!("HTTP {status}"),
            status: status.as_u16(),
        }),
    }
}

/// Client options for customization.
#[derive(Debug, Clone)]
pub struct ClientOptions {
    /// Request timeout in seconds (default: 30).
    pub timeout_seconds: u64,
}

impl Default for ClientOptions {
    fn default() -> Self {
        Self { timeout_seconds: 30 }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn client_trims_trailing_slash() {
        let client = MemoVaultClient::new("http://localhost:8080/", "token").unwrap();
        assert_eq!(client.base_url, "http://localhost:8080");
    }

    #[test]
    fn client_options() {
        let options = ClientOptions { timeout_seconds: 5 };
        let client = MemoVaultClient::with_options("http://localhost:8080", "token", options);
        assert!(client.is_ok());
    }
}
