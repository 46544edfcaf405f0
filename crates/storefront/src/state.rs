//! Application state shared across handlers.

use std::sync::Arc;
use std::time::Duration;

use moka::future::Cache;
use sqlx::PgPool;

use bakehuset_core::catalog::Product;

use crate::config::StorefrontConfig;
use crate::db::{ProductRepository, RepositoryError};
use crate::error::AppError;
use crate::services::RelayClient;

/// Application state shared across all handlers.
///
/// This struct is cheaply cloneable via `Arc` and provides access to
/// shared resources like database connections and configuration.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: StorefrontConfig,
    pool: PgPool,
    relay: RelayClient,
    /// Single-entry catalog cache; expires on TTL so admin edits from the
    /// other service show up without coordination.
    catalog: Cache<(), Arc<Vec<Product>>>,
}

impl AppState {
    /// Create a new application state.
    #[must_use]
    pub fn new(config: StorefrontConfig, pool: PgPool) -> Self {
        let relay = RelayClient::new(config.relay.clone());
        let catalog = Cache::builder()
            .max_capacity(1)
            .time_to_live(Duration::from_secs(config.catalog_cache_ttl_seconds))
            .build();

        Self {
            inner: Arc::new(AppStateInner {
                config,
                pool,
                relay,
                catalog,
            }),
        }
    }

    /// Get a reference to the storefront configuration.
    #[must_use]
    pub fn config(&self) -> &StorefrontConfig {
        &self.inner.config
    }

    /// Get a reference to the database connection pool.
    #[must_use]
    pub fn pool(&self) -> &PgPool {
        &self.inner.pool
    }

    /// Get a reference to the order relay client.
    #[must_use]
    pub fn relay(&self) -> &RelayClient {
        &self.inner.relay
    }

    /// The full catalog, served from cache when fresh.
    ///
    /// # Errors
    ///
    /// Returns `AppError` when the catalog has to be loaded and the load fails.
    pub async fn products(&self) -> Result<Arc<Vec<Product>>, AppError> {
        self.inner
            .catalog
            .try_get_with((), async {
                ProductRepository::new(&self.inner.pool)
                    .list()
                    .await
                    .map(Arc::new)
            })
            .await
            .map_err(|e: Arc<RepositoryError>| AppError::Internal(e.to_string()))
    }
}
