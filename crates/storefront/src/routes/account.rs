//! Account area route handlers ("Min side").
//!
//! All routes require a logged-in customer via [`RequireCustomer`].

use axum::routing::{get, put};
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use tower_sessions::Session;
use tracing::instrument;

use crate::error::{AppError, Result};
use crate::middleware::auth::RequireCustomer;
use crate::models::customer::demo_orders;
use crate::models::{OrderSummary, session_keys};
use crate::services::auth;
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/api/account/profile", get(profile))
        .route("/api/account/profile", put(update_profile))
        .route("/api/account/password", put(change_password))
        .route("/api/account/orders", get(order_history))
}

/// Profile as shown to the customer; never includes the password.
#[derive(Debug, Serialize)]
pub struct ProfileResponse {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub address: String,
}

/// Profile update form.
#[derive(Debug, Deserialize)]
pub struct UpdateProfileRequest {
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub address: String,
}

/// Password change form.
#[derive(Debug, Deserialize)]
pub struct ChangePasswordRequest {
    pub old_password: String,
    pub new_password: String,
    pub confirm_password: String,
}

#[derive(Debug, Serialize)]
pub struct AccountResponse {
    pub success: bool,
    pub message: String,
}

/// The customer's profile.
///
/// GET /api/account/profile
#[instrument(skip(customer))]
async fn profile(RequireCustomer(customer): RequireCustomer) -> Json<ProfileResponse> {
    Json(ProfileResponse {
        name: customer.name,
        email: customer.email.to_string(),
        phone: customer.phone,
        address: customer.address,
    })
}

/// Update the profile.
///
/// PUT /api/account/profile
#[instrument(skip(session, customer, request))]
async fn update_profile(
    RequireCustomer(mut customer): RequireCustomer,
    session: Session,
    Json(request): Json<UpdateProfileRequest>,
) -> Result<Json<AccountResponse>> {
    auth::update_profile(
        &mut customer,
        &request.name,
        &request.email,
        &request.phone,
        &request.address,
    )?;
    session.insert(session_keys::CUSTOMER, &customer).await?;

    Ok(Json(AccountResponse {
        success: true,
        message: "Profil oppdatert!".to_owned(),
    }))
}

/// Change the account password.
///
/// PUT /api/account/password
#[instrument(skip(session, customer, request))]
async fn change_password(
    RequireCustomer(mut customer): RequireCustomer,
    session: Session,
    Json(request): Json<ChangePasswordRequest>,
) -> Result<Json<AccountResponse>> {
    if request.new_password != request.confirm_password {
        return Err(AppError::BadRequest("Passordene matcher ikke".to_owned()));
    }

    auth::change_password(&mut customer, &request.old_password, &request.new_password)?;
    session.insert(session_keys::CUSTOMER, &customer).await?;

    Ok(Json(AccountResponse {
        success: true,
        message: "Passord endret!".to_owned(),
    }))
}

/// The customer's past orders.
///
/// Checkout never persists orders, so every account sees the same demo
/// history.
///
/// GET /api/account/orders
#[instrument(skip(_customer))]
async fn order_history(RequireCustomer(_customer): RequireCustomer) -> Json<Vec<OrderSummary>> {
    Json(demo_orders())
}
