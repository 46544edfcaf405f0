//! News feed route handlers.

use axum::extract::State;
use axum::routing::get;
use axum::{Json, Router};
use tracing::instrument;

use crate::db::NewsRepository;
use crate::error::Result;
use crate::models::NewsItem;
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new().route("/api/news", get(list_news))
}

/// List all news posts, newest first.
///
/// GET /api/news
#[instrument(skip(state))]
async fn list_news(State(state): State<AppState>) -> Result<Json<Vec<NewsItem>>> {
    let items = NewsRepository::new(state.pool()).list().await?;
    Ok(Json(items))
}
