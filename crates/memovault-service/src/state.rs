//! Application state.

use std::sync::Arc;

use memovault_ledger::{Clock, Ledger};
use memovault_store::KvStore;

use crate::auth::JwksCache;
use crate::config::ServiceConfig;

/// The storage backend, chosen at startup.
pub type SharedStore = Arc<dyn KvStore>;

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    /// The credits ledger.
    pub ledger: Arc<Ledger<SharedStore>>,

    /// Service configuration.
    pub config: ServiceConfig,

    /// Signing keys of the identity provider.
    pub jwks: Arc<JwksCache>,
}

impl AppState {
    /// Create a new application state over `store`.
    #[must_use]
    pub fn new(store: SharedStore, config: ServiceConfig) -> Self {
        let ledger = Ledger::new(store).with_pricing(config.pricing.clone());
        Self::from_ledger(ledger, config)
    }

    /// Create a new application state with a custom clock.
    #[must_use]
    pub fn with_clock(store: SharedStore, config: ServiceConfig, clock: Arc<dyn Clock>) -> Self {
        let ledger = Ledger::new(store)
            .with_pricing(config.pricing.clone())
            .with_clock(clock);
        Self::from_ledger(ledger, config)
    }

    fn from_ledger(ledger: Ledger<SharedStore>, config: ServiceConfig) -> Self {
        if config.admin_api_key.is_none() {
            tracing::warn!("Admin API key not configured - admin routes will reject all requests");
        }

        let jwks = Arc::new(JwksCache::new(config.auth_jwks_url.clone()));

        Self {
            ledger: Arc::new(ledger),
            config,
            jwks,
        }
    }
}
