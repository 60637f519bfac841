//! Application state - shared across all handlers.

use std::sync::Arc;

use gazette_core::Engine;
use gazette_core::ports::Stores;
use gazette_infra::database::DatabaseConfig;
use gazette_infra::memory::InMemoryStore;

#[cfg(feature = "postgres")]
use gazette_infra::database::{DatabaseConnections, postgres_stores};

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub engine: Engine,
}

impl AppState {
    /// Build the application state with the appropriate store backend.
    pub async fn new(db_config: Option<&DatabaseConfig>) -> Self {
        #[cfg(feature = "postgres")]
        let stores: Stores = {
            if let Some(config) = db_config {
                match DatabaseConnections::init(config).await {
                    Ok(connections) => postgres_stores(connections.main),
                    Err(e) => {
                        tracing::error!(
                            "Failed to connect to database: {}. Using in-memory fallback.",
                            e
                        );
                        Self::memory_stores()
                    }
                }
            } else {
                tracing::warn!("DATABASE_URL not set. Running without database (in-memory mode).");
                Self::memory_stores()
            }
        };

        #[cfg(not(feature = "postgres"))]
        let stores: Stores = {
            let _ = db_config;
            tracing::info!("Running without postgres feature - using in-memory store");
            Self::memory_stores()
        };

        tracing::info!("Application state initialized");

        Self {
            engine: Engine::new(stores),
        }
    }

    fn memory_stores() -> Stores {
        Arc::new(InMemoryStore::new()).stores()
    }
}
