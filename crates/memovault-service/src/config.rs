//! Service configuration.

use std::fmt;
use std::path::Path;
use std::str::FromStr;

use memovault_core::PricingConfig;
use serde::Deserialize;

/// Where the ledger keeps its data.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageBackend {
    /// Process memory; state is lost on restart.
    Memory,
    /// `RocksDB` under `data_dir`.
    RocksDb,
}

impl Default for StorageBackend {
    fn default() -> Self {
        if cfg!(feature = "rocksdb-backend") {
            Self::RocksDb
        } else {
            Self::Memory
        }
    }
}

impl FromStr for StorageBackend {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "memory" => Ok(Self::Memory),
            "rocksdb" => Ok(Self::RocksDb),
            other => Err(format!("unknown storage backend: {other}")),
        }
    }
}

impl fmt::Display for StorageBackend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Memory => f.write_str("memory"),
            Self::RocksDb => f.write_str("rocksdb"),
        }
    }
}

/// Service configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct ServiceConfig {
    /// Address to listen on (default: "0.0.0.0:8080").
    pub listen_addr: String,

    /// Storage backend (default: `rocksdb` when compiled in, else `memory`).
    pub storage_backend: StorageBackend,

    /// Path to `RocksDB` data directory (default: "/data/memovault").
    pub data_dir: String,

    /// Expected JWT issuer.
    pub auth_issuer: String,

    /// Expected JWT audience (default: "memovault").
    pub auth_audience: String,

    /// JWKS endpoint (default: `<issuer>/.well-known/jwks.json`).
    pub auth_jwks_url: String,

    /// Admin API key for `/v1/admin` routes.
    pub admin_api_key: Option<String>,

    /// CORS allowed origins.
    pub cors_origins: Vec<String>,

    /// Maximum request body size in bytes.
    pub max_body_bytes: usize,

    /// Request timeout in seconds.
    pub request_timeout_seconds: u64,

    /// Pricing configuration.
    pub pricing: PricingConfig,
}

/// Admin secrets file structure.
#[derive(Debug, Deserialize)]
struct AdminSecrets {
    api_key: String,
}

const DEFAULT_AUTH_ISSUER: &str = "https://auth.memovault.app";

impl ServiceConfig {
    /// Load configuration from environment variables and secrets files.
    #[must_use]
    pub fn from_env() -> Self {
        let auth_issuer =
            std::env::var("AUTH_ISSUER").unwrap_or_else(|_| DEFAULT_AUTH_ISSUER.into());
        let auth_jwks_url =
            std::env::var("AUTH_JWKS_URL").unwrap_or_else(|_| default_jwks_url(&auth_issuer));

        let storage_backend = match std::env::var("STORAGE_BACKEND") {
            Ok(value) => value.parse().unwrap_or_else(|e: String| {
                tracing::warn!(error = %e, "Ignoring STORAGE_BACKEND");
                StorageBackend::default()
            }),
            Err(_) => StorageBackend::default(),
        };

        let mut pricing = PricingConfig::default();
        if let Some(cost) = positive_cost("CHAT_MESSAGE_COST", env_parse("CHAT_MESSAGE_COST")) {
            pricing.chat_message_cost = cost;
        }

        Self {
            listen_addr: std::env::var("LISTEN_ADDR").unwrap_or_else(|_| "0.0.0.0:8080".into()),
            storage_backend,
            data_dir: std::env::var("DATA_DIR").unwrap_or_else(|_| "/data/memovault".into()),
            auth_issuer,
            auth_audience: std::env::var("AUTH_AUDIENCE").unwrap_or_else(|_| "memovault".into()),
            auth_jwks_url,
            admin_api_key: load_admin_key(),
            cors_origins: std::env::var("CORS_ORIGINS")
                .unwrap_or_else(|_| "*".into())
                .split(',')
                .map(|s| s.trim().to_string())
                .collect(),
            max_body_bytes: env_parse("MAX_BODY_BYTES").unwrap_or(64 * 1024),
            request_timeout_seconds: env_parse("REQUEST_TIMEOUT_SECONDS").unwrap_or(30),
            pricing,
        }
    }
}

fn default_jwks_url(issuer: &str) -> String {
    format!("{}/.well-known/jwks.json", issuer.trim_end_matches('/'))
}

fn env_parse<T: FromStr>(name: &str) -> Option<T> {
    std::env::var(name).ok().and_then(|s| s.parse().ok())
}

/// Keep a configured price only if it is positive.
fn positive_cost(name: &str, value: Option<i64>) -> Option<i64> {
    match value {
        Some(cost) if cost <= 0 => {
            tracing::warn!(name, cost, "Ignoring non-positive cost, using default");
            None
        }
        other => other,
    }
}

/// Load the admin key from a secrets file, falling back to `ADMIN_API_KEY`.
fn load_admin_key() -> Option<String> {
    let secret_paths = [
        ".secrets/admin.json",
        "memovault/.secrets/admin.json",
        "../.secrets/admin.json",
    ];

    for path in &secret_paths {
        if let Ok(secrets) = load_secrets_file::<AdminSecrets>(path) {
            tracing::info!(path = %path, "Loaded admin secrets from file");
            return Some(secrets.api_key);
        }
    }

    tracing::debug!("Admin secrets file not found, using environment variables");
    std::env::var("ADMIN_API_KEY").ok()
}

/// Load secrets from a JSON file.
fn load_secrets_file<T: serde::de::DeserializeOwned>(path: &str) -> Result<T, std::io::Error> {
    let path = Path::new(path);
    if !path.exists() {
        return Err(std::io::Error::new(
            std::io::ErrorKind::NotFound,
            "Secrets file not found",
        ));
    }
    let contents = std::fs::read_to_string(path)?;
    serde_json::from_str(&contents)
        .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            listen_addr: "0.0.0.0:8080".into(),
            storage_backend: StorageBackend::default(),
            data_dir: "/data/memovault".into(),
            auth_issuer: DEFAULT_AUTH_ISSUER.into(),
            auth_audience: "memovault".into(),
            auth_jwks_url: default_jwks_url(DEFAULT_AUTH_ISSUER),
            admin_api_key: None,
            cors_origins: vec!["*".into()],
            max_body_bytes: 64 * 1024,
            request_timeout_seconds: 30,
            pricing: PricingConfig::default(),
        }
    }
}
