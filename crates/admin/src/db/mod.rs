//! Database operations for the admin service.
//!
//! # Tables
//!
//! - `product` - The catalog
//! - `news` - News posts
//! - `session` - Tower-sessions storage
//!
//! The admin service owns both content tables; the storefront only reads
//! them.
//!
//! # Migrations
//!
//! Migrations live in `crates/admin/migrations/` and run via:
//! ```bash
//! cargo run -p bakehuset-cli -- migrate admin
//! ```

use std::time::Duration;

use secrecy::ExposeSecret;
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;

pub mod news;
pub mod products;

pub use news::{NewsRecord, NewsRepository};
pub use products::{ProductInput, ProductRepository};

/// Create a `PostgreSQL` connection pool with sensible defaults.
///
/// # Errors
///
/// Returns `sqlx::Error` if the connection cannot be established.
pub async fn create_pool(database_url: &secrecy::SecretString) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(10)
        .min_connections(2)
        .acquire_timeout(Duration::from_secs(10))
        .connect(database_url.expose_secret())
        .await
}

/// Errors from repository operations.
#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    /// Database query failed.
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    /// The requested row does not exist.
    #[error("not found")]
    NotFound,

    /// A row holds data the domain types reject.
    #[error("data corruption: {0}")]
    DataCorruption(String),
}
