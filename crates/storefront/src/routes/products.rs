//! Catalog route handlers.

use axum::extract::{Query, State};
use axum::routing::get;
use axum::{Json, Router};
use serde::Deserialize;
use tracing::instrument;

use bakehuset_core::catalog::{self, ALL_CATEGORIES, Product};

use crate::error::Result;
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/api/products", get(list_products))
        .route("/api/categories", get(list_categories))
}

/// Query parameters for the product listing.
#[derive(Debug, Deserialize)]
pub struct ProductQuery {
    /// Category filter; the sentinel `"alle"` (also the default) returns
    /// everything.
    #[serde(default = "default_category")]
    pub kategori: String,
}

fn default_category() -> String {
    ALL_CATEGORIES.to_owned()
}

/// List products, optionally filtered by category.
///
/// GET /api/products?kategori=brød
#[instrument(skip(state))]
async fn list_products(
    State(state): State<AppState>,
    Query(query): Query<ProductQuery>,
) -> Result<Json<Vec<Product>>> {
    let products = state.products().await?;
    let filtered = catalog::filter_by_category(&products, &query.kategori)
        .into_iter()
        .cloned()
        .collect();
    Ok(Json(filtered))
}

/// List the known categories, `"alle"` first.
///
/// GET /api/categories
#[instrument(skip(state))]
async fn list_categories(State(state): State<AppState>) -> Result<Json<Vec<String>>> {
    let products = state.products().await?;
    Ok(Json(catalog::categories(&products)))
}
