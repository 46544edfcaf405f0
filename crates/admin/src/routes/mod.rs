//! Route handlers for the admin API.

use axum::Router;

use crate::state::AppState;

pub mod auth;
pub mod news;
pub mod products;

/// All admin routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .merge(auth::routes())
        .merge(products::routes())
        .merge(news::routes())
}
