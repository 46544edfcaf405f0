//! Auth gate route handlers.
//!
//! Thin session plumbing around the pure transitions in `services::auth`:
//! load the state and record, apply the transition, write back on success.

use axum::extract::State;
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use tower_sessions::Session;
use tracing::instrument;

use crate::error::Result;
use crate::models::{AuthState, CustomerRecord, session_keys};
use crate::services::auth;
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/api/auth/login", post(login))
        .route("/api/auth/logout", post(logout))
        .route("/api/auth/register", post(register))
        .route("/api/auth/session", get(current_session))
}

/// Login form. `admin` selects the admin path against the fixed pair;
/// otherwise `username` is the account email.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
    #[serde(default)]
    pub admin: bool,
}

/// Registration form.
#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    pub name: String,
    pub email: String,
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct AuthResponse {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

/// The session as seen by the frontend.
#[derive(Debug, Serialize)]
pub struct SessionResponse {
    pub auth_state: AuthState,
    pub logged_in: bool,
    pub admin: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

async fn stored_customer(session: &Session) -> Result<Option<CustomerRecord>> {
    Ok(session.get(session_keys::CUSTOMER).await?)
}

/// Log in as customer or admin.
///
/// POST /api/auth/login
///
/// A failed login answers 401 and leaves the session untouched.
#[instrument(skip(state, session, request), fields(admin = request.admin))]
async fn login(
    State(state): State<AppState>,
    session: Session,
    Json(request): Json<LoginRequest>,
) -> Result<Json<AuthResponse>> {
    let stored = stored_customer(&session).await?;

    let outcome = auth::login(
        &state.config().admin,
        stored.as_ref(),
        &request.username,
        &request.password,
        request.admin,
    )?;

    session
        .insert(session_keys::AUTH_STATE, outcome.auth_state())
        .await?;
    // A demo-account login has no stored record yet; materialize it so the
    // account area has something to show and edit.
    if outcome.auth_state() == AuthState::Customer && stored.is_none() {
        session
            .insert(session_keys::CUSTOMER, CustomerRecord::demo())
            .await?;
    }

    tracing::info!(state = ?outcome.auth_state(), "Login");
    Ok(Json(AuthResponse {
        success: true,
        message: None,
    }))
}

/// Log out, back to `Anonymous`. The cart survives.
///
/// POST /api/auth/logout
#[instrument(skip(session))]
async fn logout(session: Session) -> Result<Json<AuthResponse>> {
    let current: AuthState = session
        .get(session_keys::AUTH_STATE)
        .await?
        .unwrap_or_default();
    session
        .insert(session_keys::AUTH_STATE, auth::logout(current))
        .await?;

    Ok(Json(AuthResponse {
        success: true,
        message: None,
    }))
}

/// Register a new account. Replaces the session's stored record and does
/// not log in.
///
/// POST /api/auth/register
#[instrument(skip(session, request), fields(email = %request.email))]
async fn register(
    session: Session,
    Json(request): Json<RegisterRequest>,
) -> Result<Json<AuthResponse>> {
    let stored = stored_customer(&session).await?;

    let record = auth::register(
        stored.as_ref(),
        &request.name,
        &request.email,
        &request.password,
    )?;
    session.insert(session_keys::CUSTOMER, &record).await?;

    tracing::info!("Account registered");
    Ok(Json(AuthResponse {
        success: true,
        message: Some("Konto opprettet! Du kan nå logge inn.".to_owned()),
    }))
}

/// Who the current session is.
///
/// GET /api/auth/session
#[instrument(skip(session))]
async fn current_session(session: Session) -> Result<Json<SessionResponse>> {
    let auth_state: AuthState = session
        .get(session_keys::AUTH_STATE)
        .await?
        .unwrap_or_default();

    let name = if auth_state == AuthState::Customer {
        stored_customer(&session).await?.map(|c| c.name)
    } else {
        None
    };

    Ok(Json(SessionResponse {
        auth_state,
        logged_in: auth_state.is_logged_in(),
        admin: auth_state.is_admin(),
        name,
    }))
}
