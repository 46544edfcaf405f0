//! Authentication extractors for the account area.

use axum::{
    Json,
    extract::FromRequestParts,
    http::{StatusCode, request::Parts},
    response::{IntoResponse, Response},
};
use tower_sessions::Session;

use crate::models::{AuthState, CustomerRecord, session_keys};

/// Extractor that requires a logged-in customer.
///
/// Rejects with 401 and a JSON body when the session is anonymous, admin,
/// or holds no customer record.
///
/// # Example
///
/// ```rust,ignore
/// async fn account_handler(
///     RequireCustomer(customer): RequireCustomer,
/// ) -> impl IntoResponse {
///     Json(customer.name)
/// }
/// ```
pub struct RequireCustomer(pub CustomerRecord);

/// Rejection for [`RequireCustomer`].
pub struct CustomerAuthRejection;

impl IntoResponse for CustomerAuthRejection {
    fn into_response(self) -> Response {
        (
            StatusCode::UNAUTHORIZED,
            Json(serde_json::json!({
                "success": false,
                "message": "Du må være innlogget",
            })),
        )
            .into_response()
    }
}

impl<S> FromRequestParts<S> for RequireCustomer
where
    S: Send + Sync,
{
    type Rejection = CustomerAuthRejection;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        // Get the session from extensions (set by SessionManagerLayer)
        let session = parts
            .extensions
            .get::<Session>()
            .ok_or(CustomerAuthRejection)?;

        let auth: AuthState = session
            .get(session_keys::AUTH_STATE)
            .await
            .ok()
            .flatten()
            .unwrap_or_default();
        if auth != AuthState::Customer {
            return Err(CustomerAuthRejection);
        }

        let customer: CustomerRecord = session
            .get(session_keys::CUSTOMER)
            .await
            .ok()
            .flatten()
            .ok_or(CustomerAuthRejection)?;

        Ok(Self(customer))
    }
}
