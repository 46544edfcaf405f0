//! Checkout route handlers.
//!
//! Two steps, mirroring the shop's checkout dialog: delivery information
//! (validated locally, then forwarded to the order relay) and a mock
//! payment step that clears the cart on success. Nothing is charged and no
//! order is persisted.

use axum::extract::State;
use axum::routing::post;
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use tower_sessions::Session;
use tracing::instrument;

use crate::error::{AppError, Result};
use crate::routes::cart::{load_cart, save_cart};
use crate::services::relay::OrderSubmission;
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/api/checkout", post(submit_information))
        .route("/api/checkout/payment", post(submit_payment))
}

/// Delivery information form.
#[derive(Debug, Deserialize)]
pub struct CheckoutInfoRequest {
    pub name: String,
    /// True when the customer wants the order delivered.
    #[serde(default)]
    pub delivery: bool,
    #[serde(default)]
    pub address: String,
    pub phone: String,
    #[serde(default)]
    pub message: String,
}

/// Mock payment step.
#[derive(Debug, Deserialize)]
#[serde(tag = "method", rename_all = "snake_case")]
pub enum PaymentRequest {
    Card {
        #[serde(default)]
        number: String,
        #[serde(default)]
        expiry: String,
        #[serde(default)]
        cvc: String,
    },
    Vipps,
}

#[derive(Debug, Serialize)]
pub struct CheckoutResponse {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

/// Submit delivery information and forward the order to the relay.
///
/// POST /api/checkout
#[instrument(skip(state, session, request), fields(name = %request.name))]
async fn submit_information(
    State(state): State<AppState>,
    session: Session,
    Json(request): Json<CheckoutInfoRequest>,
) -> Result<Json<CheckoutResponse>> {
    validate_information(&request)?;

    let cart = load_cart(&session).await?;
    if cart.is_empty() {
        return Err(AppError::BadRequest("Handlekurven er tom".to_owned()));
    }

    let products = state.products().await?;
    let total = cart.total(&products);

    let submission = OrderSubmission {
        name: request.name.trim().to_owned(),
        delivery: request.delivery,
        address: request.address.trim().to_owned(),
        phone: request.phone.trim().to_owned(),
        message: request.message.trim().to_owned(),
        total,
    };
    state.relay().submit_order(&submission).await?;

    tracing::info!(total = %total, "Order forwarded to relay");
    Ok(Json(CheckoutResponse {
        success: true,
        message: None,
    }))
}

/// Complete the mock payment and clear the cart.
///
/// POST /api/checkout/payment
#[instrument(skip(session, request))]
async fn submit_payment(
    session: Session,
    Json(request): Json<PaymentRequest>,
) -> Result<Json<CheckoutResponse>> {
    validate_payment(&request)?;

    let mut cart = load_cart(&session).await?;
    cart.clear();
    save_cart(&session, &cart).await?;

    Ok(Json(CheckoutResponse {
        success: true,
        message: Some("Betaling gjennomført! Takk for din bestilling.".to_owned()),
    }))
}

/// Validate the delivery information form.
fn validate_information(request: &CheckoutInfoRequest) -> Result<()> {
    if request.name.trim().is_empty() || request.phone.trim().is_empty() {
        return Err(AppError::BadRequest(
            "Vennligst fyll ut alle påkrevde felt".to_owned(),
        ));
    }

    if request.delivery && !is_valid_address(&request.address) {
        return Err(AppError::BadRequest(
            "Adressen må inneholde minst 5 bokstaver og 1 tall".to_owned(),
        ));
    }

    if !is_valid_phone(&request.phone) {
        return Err(AppError::BadRequest(
            "Telefonnummer må inneholde nøyaktig 8 siffer".to_owned(),
        ));
    }

    Ok(())
}

/// Validate the mock payment step: card needs all fields, Vipps needs none.
fn validate_payment(request: &PaymentRequest) -> Result<()> {
    match request {
        PaymentRequest::Card {
            number,
            expiry,
            cvc,
        } if number.trim().is_empty() || expiry.trim().is_empty() || cvc.trim().is_empty() => Err(
            AppError::BadRequest("Vennligst fyll ut all kortinformasjon".to_owned()),
        ),
        _ => Ok(()),
    }
}

/// Norwegian phone numbers have exactly 8 digits; separators are ignored.
fn is_valid_phone(phone: &str) -> bool {
    phone.chars().filter(char::is_ascii_digit).count() == 8
}

/// A delivery address needs at least 5 letters (æøå count) and 1 digit.
fn is_valid_address(address: &str) -> bool {
    let letters = address.chars().filter(|c| c.is_alphabetic()).count();
    let digits = address.chars().filter(char::is_ascii_digit).count();
    letters >= 5 && digits >= 1
}

#[cfg(test)]
mod tests {
    use super::*;

    fn info(name: &str, delivery: bool, address: &str, phone: &str) -> CheckoutInfoRequest {
        CheckoutInfoRequest {
            name: name.to_owned(),
            delivery,
            address: address.to_owned(),
            phone: phone.to_owned(),
            message: String::new(),
        }
    }

    #[test]
    fn test_phone_validation() {
        assert!(is_valid_phone("12345678"));
        assert!(is_valid_phone("123 45 678"));
        assert!(is_valid_phone("+12 34 56 78")); // separators stripped
        assert!(!is_valid_phone("1234567"));
        assert!(!is_valid_phone("123456789"));
        assert!(!is_valid_phone("abcdefgh"));
    }

    #[test]
    fn test_address_validation() {
        assert!(is_valid_address("Eksempelveien 1"));
        assert!(is_valid_address("Bø 1234 Åsgård")); // æøå count as letters
        assert!(!is_valid_address("Gate")); // too few letters, no digit
        assert!(!is_valid_address("Eksempelveien")); // no digit
        assert!(!is_valid_address("12345")); // no letters
    }

    #[test]
    fn test_information_requires_name_and_phone() {
        assert!(validate_information(&info("", false, "", "12345678")).is_err());
        assert!(validate_information(&info("Ola", false, "", "")).is_err());
        assert!(validate_information(&info("Ola", false, "", "12345678")).is_ok());
    }

    #[test]
    fn test_information_requires_address_only_for_delivery() {
        // Pickup: address is not checked
        assert!(validate_information(&info("Ola", false, "", "12345678")).is_ok());
        // Delivery: address rules apply
        assert!(validate_information(&info("Ola", true, "", "12345678")).is_err());
        assert!(validate_information(&info("Ola", true, "Eksempelveien 1", "12345678")).is_ok());
    }

    #[test]
    fn test_payment_card_requires_all_fields() {
        let incomplete = PaymentRequest::Card {
            number: "1234 5678 9012 3456".to_owned(),
            expiry: String::new(),
            cvc: "123".to_owned(),
        };
        assert!(validate_payment(&incomplete).is_err());

        let complete = PaymentRequest::Card {
            number: "1234 5678 9012 3456".to_owned(),
            expiry: "12/27".to_owned(),
            cvc: "123".to_owned(),
        };
        assert!(validate_payment(&complete).is_ok());
    }

    #[test]
    fn test_payment_vipps_requires_nothing() {
        assert!(validate_payment(&PaymentRequest::Vipps).is_ok());
    }
}
