//! Cart route handlers.
//!
//! The cart lives in the session; every mutation loads it, applies the
//! pure cart operation, writes it back, and answers with the priced view.

use axum::extract::State;
use axum::routing::{delete, get, post, put};
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use tower_sessions::Session;
use tracing::instrument;

use bakehuset_core::cart::{Cart, line_total};
use bakehuset_core::catalog::Product;
use bakehuset_core::{Price, ProductId};

use crate::error::{AppError, Result};
use crate::models::session_keys;
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/api/cart", get(view_cart))
        .route("/api/cart", delete(clear_cart))
        .route("/api/cart/items", post(add_item))
        .route("/api/cart/items", put(update_item))
}

/// One priced line in the cart view.
#[derive(Debug, Serialize)]
pub struct CartLineView {
    pub product_id: ProductId,
    pub name: String,
    pub variant: Option<String>,
    pub quantity: u32,
    pub unit_price: Price,
    pub line_total: Price,
}

/// The priced cart as sent to the client.
#[derive(Debug, Serialize)]
pub struct CartView {
    pub lines: Vec<CartLineView>,
    pub item_count: u32,
    pub total: Price,
}

/// Request to add one unit to the cart.
#[derive(Debug, Deserialize)]
pub struct AddItemRequest {
    pub product_id: ProductId,
    #[serde(default)]
    pub variant: Option<String>,
}

/// Request to set a line's quantity. Zero or negative removes the line.
#[derive(Debug, Deserialize)]
pub struct UpdateItemRequest {
    pub product_id: ProductId,
    pub quantity: i64,
    #[serde(default)]
    pub variant: Option<String>,
}

pub(crate) async fn load_cart(session: &Session) -> Result<Cart> {
    Ok(session
        .get::<Cart>(session_keys::CART)
        .await?
        .unwrap_or_default())
}

pub(crate) async fn save_cart(session: &Session, cart: &Cart) -> Result<()> {
    session.insert(session_keys::CART, cart).await?;
    Ok(())
}

fn build_view(cart: &Cart, products: &[Product]) -> CartView {
    let lines = cart
        .lines
        .iter()
        .filter_map(|line| {
            let product = products.iter().find(|p| p.id == line.product_id)?;
            Some(CartLineView {
                product_id: line.product_id,
                name: product.name.clone(),
                variant: line.variant.clone(),
                quantity: line.quantity,
                unit_price: product.price,
                line_total: line_total(product, line.quantity),
            })
        })
        .collect();

    CartView {
        lines,
        item_count: cart.item_count(),
        total: cart.total(products),
    }
}

/// View the cart.
///
/// GET /api/cart
#[instrument(skip(state, session))]
async fn view_cart(State(state): State<AppState>, session: Session) -> Result<Json<CartView>> {
    let cart = load_cart(&session).await?;
    let products = state.products().await?;
    Ok(Json(build_view(&cart, &products)))
}

/// Add one unit of a product (with its chosen variant) to the cart.
///
/// POST /api/cart/items
#[instrument(skip(state, session))]
async fn add_item(
    State(state): State<AppState>,
    session: Session,
    Json(request): Json<AddItemRequest>,
) -> Result<Json<CartView>> {
    let products = state.products().await?;
    let product = products
        .iter()
        .find(|p| p.id == request.product_id)
        .ok_or_else(|| AppError::NotFound(format!("produkt {}", request.product_id)))?;

    validate_variant(product, request.variant.as_deref())?;

    let mut cart = load_cart(&session).await?;
    cart.add(request.product_id, request.variant);
    save_cart(&session, &cart).await?;

    Ok(Json(build_view(&cart, &products)))
}

/// Set a line's quantity; zero or less removes the line.
///
/// PUT /api/cart/items
#[instrument(skip(state, session))]
async fn update_item(
    State(state): State<AppState>,
    session: Session,
    Json(request): Json<UpdateItemRequest>,
) -> Result<Json<CartView>> {
    let quantity = u32::try_from(request.quantity.max(0)).unwrap_or(0);

    let mut cart = load_cart(&session).await?;
    cart.update_quantity(request.product_id, quantity, request.variant.as_deref());
    save_cart(&session, &cart).await?;

    let products = state.products().await?;
    Ok(Json(build_view(&cart, &products)))
}

/// Empty the cart.
///
/// DELETE /api/cart
#[instrument(skip(state, session))]
async fn clear_cart(State(state): State<AppState>, session: Session) -> Result<Json<CartView>> {
    let mut cart = load_cart(&session).await?;
    cart.clear();
    save_cart(&session, &cart).await?;

    let products = state.products().await?;
    Ok(Json(build_view(&cart, &products)))
}

/// A product with variants needs one of them chosen; one without takes none.
fn validate_variant(product: &Product, variant: Option<&str>) -> Result<()> {
    match variant {
        Some(v) if product.variants.iter().any(|known| known == v) => Ok(()),
        Some(v) => Err(AppError::BadRequest(format!(
            "ukjent variant '{v}' for {}",
            product.name
        ))),
        None if product.variants.is_empty() => Ok(()),
        None => Err(AppError::BadRequest(format!(
            "velg en variant for {}",
            product.name
        ))),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use bakehuset_core::catalog::PricingRule;

    use super::*;

    fn product(variants: Vec<String>) -> Product {
        Product {
            id: ProductId::new(1),
            name: "Wienerbrødsnurrer".to_owned(),
            description: String::new(),
            price: Price::from_kroner(35),
            image: String::new(),
            category: "wienerbrød".to_owned(),
            variants,
            pricing: PricingRule::Unit,
        }
    }

    #[test]
    fn test_validate_variant_required_when_product_has_variants() {
        let p = product(vec!["Kanel".to_owned(), "Karamell".to_owned()]);
        assert!(validate_variant(&p, Some("Kanel")).is_ok());
        assert!(validate_variant(&p, None).is_err());
        assert!(validate_variant(&p, Some("Sjokolade")).is_err());
    }

    #[test]
    fn test_validate_variant_rejected_without_variants() {
        let p = product(Vec::new());
        assert!(validate_variant(&p, None).is_ok());
        assert!(validate_variant(&p, Some("Kanel")).is_err());
    }

    #[test]
    fn test_build_view_prices_bundle_lines() {
        let focaccia = Product {
            id: ProductId::new(4),
            name: "Focaccia 230g".to_owned(),
            description: String::new(),
            price: Price::from_kroner(35),
            image: String::new(),
            category: "brød".to_owned(),
            variants: Vec::new(),
            pricing: PricingRule::Bundle {
                size: 3,
                price: Price::from_kroner(90),
            },
        };
        let products = vec![focaccia];

        let mut cart = Cart::new();
        for _ in 0..4 {
            cart.add(ProductId::new(4), None);
        }

        let view = build_view(&cart, &products);
        assert_eq!(view.item_count, 4);
        assert_eq!(view.total, Price::from_kroner(125));
        assert_eq!(view.lines.first().unwrap().line_total, Price::from_kroner(125));
    }
}
