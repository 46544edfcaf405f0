//! Database migration commands.
//!
//! The storefront keeps no tables of its own besides the session store, so
//! `migrate storefront` only creates the tower-sessions table. The content
//! tables (product, news) belong to the admin binary and live in
//! `crates/admin/migrations/`.

use tower_sessions_sqlx_store::PostgresStore;

use super::{CommandError, connect};

/// Create the storefront session table.
pub async fn storefront() -> Result<(), CommandError> {
    tracing::info!("Connecting to storefront database...");
    let pool = connect("STOREFRONT_DATABASE_URL").await?;

    tracing::info!("Creating session table...");
    PostgresStore::new(pool).migrate().await?;

    tracing::info!("Storefront migrations complete!");
    Ok(())
}

/// Run admin database migrations.
pub async fn admin() -> Result<(), CommandError> {
    tracing::info!("Connecting to admin database...");
    let pool = connect("ADMIN_DATABASE_URL").await?;

    tracing::info!("Running admin migrations...");
    sqlx::migrate!("../admin/migrations").run(&pool).await?;

    tracing::info!("Admin migrations complete!");
    Ok(())
}
