//! Product CRUD route handlers.
//!
//! Every mutation answers with a user-facing notification message. Delete
//! confirmation ("Er du sikker?") is the client's job; the API deletes on
//! request.

use axum::extract::{Path, State};
use axum::routing::{delete, get, post, put};
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use tracing::instrument;

use bakehuset_core::catalog::{PricingRule, Product};
use bakehuset_core::{Price, ProductId};

use crate::db::{ProductInput, ProductRepository};
use crate::error::{AppError, Result};
use crate::middleware::auth::RequireAdminAuth;
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/api/products", get(list_products))
        .route("/api/products", post(create_product))
        .route("/api/products/{id}", put(update_product))
        .route("/api/products/{id}", delete(delete_product))
}

/// Bundle rule as sent by the client.
#[derive(Debug, Deserialize)]
pub struct BundleRequest {
    pub size: u32,
    pub price: i64,
}

/// Create/replace form for a product.
#[derive(Debug, Deserialize)]
pub struct ProductRequest {
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub price: i64,
    #[serde(default)]
    pub image: String,
    pub category: String,
    #[serde(default)]
    pub variants: Vec<String>,
    #[serde(default)]
    pub bundle: Option<BundleRequest>,
}

#[derive(Debug, Serialize)]
pub struct ProductResponse {
    pub success: bool,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub product: Option<Product>,
}

impl ProductRequest {
    /// Validate the form into repository input.
    fn into_input(self) -> Result<ProductInput> {
        if self.name.trim().is_empty() {
            return Err(AppError::BadRequest("Produktnavn er påkrevd".to_owned()));
        }
        if self.category.trim().is_empty() {
            return Err(AppError::BadRequest("Kategori er påkrevd".to_owned()));
        }
        if self.price <= 0 {
            return Err(AppError::BadRequest("Ugyldig pris".to_owned()));
        }

        let pricing = match self.bundle {
            None => PricingRule::Unit,
            Some(bundle) => {
                if bundle.size < 2 || bundle.price <= 0 {
                    return Err(AppError::BadRequest("Ugyldig pakkepris".to_owned()));
                }
                PricingRule::Bundle {
                    size: bundle.size,
                    price: Price::from_kroner(bundle.price),
                }
            }
        };

        Ok(ProductInput {
            name: self.name.trim().to_owned(),
            description: self.description.trim().to_owned(),
            price: Price::from_kroner(self.price),
            image: self.image.trim().to_owned(),
            category: self.category.trim().to_owned(),
            variants: self
                .variants
                .into_iter()
                .map(|v| v.trim().to_owned())
                .filter(|v| !v.is_empty())
                .collect(),
            pricing,
        })
    }
}

/// List all products.
///
/// GET /api/products
#[instrument(skip(state, _admin))]
async fn list_products(
    RequireAdminAuth(_admin): RequireAdminAuth,
    State(state): State<AppState>,
) -> Result<Json<Vec<Product>>> {
    let products = ProductRepository::new(state.pool()).list().await?;
    Ok(Json(products))
}

/// Add a product.
///
/// POST /api/products
#[instrument(skip(state, _admin, request))]
async fn create_product(
    RequireAdminAuth(_admin): RequireAdminAuth,
    State(state): State<AppState>,
    Json(request): Json<ProductRequest>,
) -> Result<Json<ProductResponse>> {
    let input = request.into_input()?;
    let product = ProductRepository::new(state.pool()).create(&input).await?;

    tracing::info!(product_id = %product.id, "Product created");
    Ok(Json(ProductResponse {
        success: true,
        message: "Produkt lagt til".to_owned(),
        product: Some(product),
    }))
}

/// Replace a product.
///
/// PUT /api/products/{id}
#[instrument(skip(state, _admin, request))]
async fn update_product(
    RequireAdminAuth(_admin): RequireAdminAuth,
    State(state): State<AppState>,
    Path(id): Path<ProductId>,
    Json(request): Json<ProductRequest>,
) -> Result<Json<ProductResponse>> {
    let input = request.into_input()?;
    let product = ProductRepository::new(state.pool())
        .update(id, &input)
        .await?;

    tracing::info!(product_id = %id, "Product updated");
    Ok(Json(ProductResponse {
        success: true,
        message: "Produkt oppdatert".to_owned(),
        product: Some(product),
    }))
}

/// Delete a product.
///
/// DELETE /api/products/{id}
#[instrument(skip(state, _admin))]
async fn delete_product(
    RequireAdminAuth(_admin): RequireAdminAuth,
    State(state): State<AppState>,
    Path(id): Path<ProductId>,
) -> Result<Json<ProductResponse>> {
    ProductRepository::new(state.pool()).delete(id).await?;

    tracing::info!(product_id = %id, "Product deleted");
    Ok(Json(ProductResponse {
        success: true,
        message: "Produkt slettet".to_owned(),
        product: None,
    }))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn request(price: i64, bundle: Option<BundleRequest>) -> ProductRequest {
        ProductRequest {
            name: "Focaccia 230g".to_owned(),
            description: "1 stk for 35 kr, 3 stk for 90 kr".to_owned(),
            price,
            image: String::new(),
            category: "brød".to_owned(),
            variants: vec!["  ".to_owned(), "Med sesamfrø".to_owned()],
            bundle,
        }
    }

    #[test]
    fn test_into_input_unit_pricing() {
        let input = request(35, None).into_input().unwrap();
        assert_eq!(input.price, Price::from_kroner(35));
        assert_eq!(input.pricing, PricingRule::Unit);
        // Blank variants are dropped
        assert_eq!(input.variants, vec!["Med sesamfrø".to_owned()]);
    }

    #[test]
    fn test_into_input_bundle_pricing() {
        let input = request(35, Some(BundleRequest { size: 3, price: 90 }))
            .into_input()
            .unwrap();
        assert_eq!(
            input.pricing,
            PricingRule::Bundle {
                size: 3,
                price: Price::from_kroner(90)
            }
        );
    }

    #[test]
    fn test_into_input_rejects_bad_values() {
        assert!(request(0, None).into_input().is_err());
        assert!(request(-5, None).into_input().is_err());
        assert!(
            request(35, Some(BundleRequest { size: 1, price: 90 }))
                .into_input()
                .is_err()
        );
        assert!(
            request(35, Some(BundleRequest { size: 3, price: 0 }))
                .into_input()
                .is_err()
        );

        let mut nameless = request(35, None);
        nameless.name = " ".to_owned();
        assert!(nameless.into_input().is_err());
    }
}
