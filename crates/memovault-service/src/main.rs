//! MemoVault Service - HTTP API for the credits ledger.

use std::sync::Arc;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use memovault_service::{create_router, AppState, ServiceConfig, SharedStore, StorageBackend};
use memovault_store::MemoryStore;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,memovault=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting MemoVault Service");

    let config = ServiceConfig::from_env();

    tracing::info!(
        listen_addr = %config.listen_addr,
        storage_backend = %config.storage_backend,
        data_dir = %config.data_dir,
        auth_issuer = %config.auth_issuer,
        admin_configured = %config.admin_api_key.is_some(),
        chat_message_cost = config.pricing.chat_message_cost,
        "Service configuration loaded"
    );

    let store = open_store(&config)?;
    let state = AppState::new(store, config.clone());

    let app = create_router(state);
    tracing::info!("Router configured with all API endpoints");

    tracing::info!(listen_addr = %config.listen_addr, "Starting HTTP server");
    let listener = tokio::net::TcpListener::bind(&config.listen_addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

fn open_store(config: &ServiceConfig) -> Result<SharedStore, Box<dyn std::error::Error>> {
    match config.storage_backend {
        StorageBackend::Memory => {
            tracing::warn!("Using in-memory store - ledger state is lost on restart");
            Ok(Arc::new(MemoryStore::new()))
        }
        #[cfg(feature = "rocksdb-backend")]
        StorageBackend::RocksDb => {
            tracing::info!(path = %config.data_dir, "Opening RocksDB store");
            Ok(Arc::new(memovault_store::RocksStore::open(&config.data_dir)?))
        }
        #[cfg(not(feature = "rocksdb-backend"))]
        StorageBackend::RocksDb => {
            Err("STORAGE_BACKEND=rocksdb requires the rocksdb-backend feature".into())
        }
    }
}
