//! Admin login and logout.

use axum::extract::State;
use axum::routing::post;
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use tower_sessions::Session;
use tracing::instrument;

use crate::error::{AppError, Result};
use crate::middleware::auth::{clear_current_admin, set_current_admin};
use crate::models::CurrentAdmin;
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/api/auth/login", post(login))
        .route("/api/auth/logout", post(logout))
}

/// Login form.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct AuthResponse {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

/// Log in against the fixed credential pair.
///
/// POST /api/auth/login
#[instrument(skip(state, session, request), fields(username = %request.username))]
async fn login(
    State(state): State<AppState>,
    session: Session,
    Json(request): Json<LoginRequest>,
) -> Result<Json<AuthResponse>> {
    if !state
        .config()
        .credentials
        .verify(&request.username, &request.password)
    {
        tracing::warn!("Failed admin login attempt");
        return Err(AppError::Unauthorized);
    }

    let admin = CurrentAdmin::new(request.username);
    set_current_admin(&session, &admin).await?;

    tracing::info!("Admin logged in");
    Ok(Json(AuthResponse {
        success: true,
        message: None,
    }))
}

/// Log out.
///
/// POST /api/auth/logout
#[instrument(skip(session))]
async fn logout(session: Session) -> Result<Json<AuthResponse>> {
    clear_current_admin(&session).await?;

    Ok(Json(AuthResponse {
        success: true,
        message: None,
    }))
}
