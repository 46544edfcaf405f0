//! Route handlers for the storefront API.

use axum::Router;

use crate::state::AppState;

pub mod account;
pub mod auth;
pub mod cart;
pub mod checkout;
pub mod news;
pub mod products;

/// All storefront routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .merge(products::routes())
        .merge(news::routes())
        .merge(cart::routes())
        .merge(checkout::routes())
        .merge(auth::routes())
        .merge(account::routes())
}
