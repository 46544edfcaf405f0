//! News CRUD route handlers.
//!
//! Create and update accept multipart forms so a post can carry an image
//! file. The image is uploaded to the remote function before anything is
//! written to the database; an upload failure aborts the save.

use axum::extract::{Multipart, Path, State};
use axum::routing::{delete, get, post, put};
use axum::{Json, Router};
use serde::Serialize;
use tracing::instrument;

use bakehuset_core::NewsId;

use crate::db::{NewsRecord, NewsRepository};
use crate::error::{AppError, Result};
use crate::middleware::auth::RequireAdminAuth;
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/api/news", get(list_news))
        .route("/api/news", post(create_news))
        .route("/api/news/{id}", put(update_news))
        .route("/api/news/{id}", delete(delete_news))
}

#[derive(Debug, Serialize)]
pub struct NewsResponse {
    pub success: bool,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub news: Option<NewsRecord>,
}

/// An image file pulled out of a multipart form.
struct ImageUpload {
    file_name: String,
    content_type: String,
    bytes: Vec<u8>,
}

/// The parsed multipart form for a news post.
struct NewsForm {
    title: String,
    content: String,
    image: Option<ImageUpload>,
}

impl NewsForm {
    /// Read a multipart request into a validated form.
    async fn from_multipart(mut multipart: Multipart) -> Result<Self> {
        let mut title = String::new();
        let mut content = String::new();
        let mut image = None;

        while let Some(field) = multipart
            .next_field()
            .await
            .map_err(|e| AppError::BadRequest(format!("Ugyldig skjema: {e}")))?
        {
            match field.name().unwrap_or_default() {
                "title" => {
                    title = field
                        .text()
                        .await
                        .map_err(|e| AppError::BadRequest(format!("Ugyldig skjema: {e}")))?;
                }
                "content" => {
                    content = field
                        .text()
                        .await
                        .map_err(|e| AppError::BadRequest(format!("Ugyldig skjema: {e}")))?;
                }
                "image" => {
                    let file_name = field.file_name().unwrap_or("bilde").to_owned();
                    let content_type = field
                        .content_type()
                        .unwrap_or("application/octet-stream")
                        .to_owned();
                    let bytes = field
                        .bytes()
                        .await
                        .map_err(|e| AppError::BadRequest(format!("Ugyldig skjema: {e}")))?;
                    // An empty file input still arrives as a field
                    if !bytes.is_empty() {
                        image = Some(ImageUpload {
                            file_name,
                            content_type,
                            bytes: bytes.to_vec(),
                        });
                    }
                }
                _ => {}
            }
        }

        if title.trim().is_empty() {
            return Err(AppError::BadRequest("Tittel er påkrevd".to_owned()));
        }
        if content.trim().is_empty() {
            return Err(AppError::BadRequest("Innhold er påkrevd".to_owned()));
        }

        Ok(Self {
            title: title.trim().to_owned(),
            content: content.trim().to_owned(),
            image,
        })
    }
}

/// List all news posts, newest first.
///
/// GET /api/news
#[instrument(skip(state, _admin))]
async fn list_news(
    RequireAdminAuth(_admin): RequireAdminAuth,
    State(state): State<AppState>,
) -> Result<Json<Vec<NewsRecord>>> {
    let news = NewsRepository::new(state.pool()).list().await?;
    Ok(Json(news))
}

/// Add a news post.
///
/// POST /api/news
#[instrument(skip(state, _admin, multipart))]
async fn create_news(
    RequireAdminAuth(_admin): RequireAdminAuth,
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<Json<NewsResponse>> {
    let form = NewsForm::from_multipart(multipart).await?;

    // Upload first so a failed upload never leaves a saved post
    let image_url = match form.image {
        Some(upload) => Some(
            state
                .images()
                .upload(upload.file_name, upload.content_type, upload.bytes)
                .await?,
        ),
        None => None,
    };

    let record = NewsRepository::new(state.pool())
        .create(&form.title, &form.content, image_url.as_deref())
        .await?;

    tracing::info!(news_id = %record.id, "News post created");
    Ok(Json(NewsResponse {
        success: true,
        message: "Nyhet lagt til".to_owned(),
        news: Some(record),
    }))
}

/// Replace a news post. A new image replaces the old one; without a new
/// file the existing image is kept.
///
/// PUT /api/news/{id}
#[instrument(skip(state, _admin, multipart))]
async fn update_news(
    RequireAdminAuth(_admin): RequireAdminAuth,
    State(state): State<AppState>,
    Path(id): Path<NewsId>,
    multipart: Multipart,
) -> Result<Json<NewsResponse>> {
    let form = NewsForm::from_multipart(multipart).await?;
    let repository = NewsRepository::new(state.pool());
    let existing = repository.get(id).await?;

    let (image_url, replaced_url) = match form.image {
        Some(upload) => {
            let url = state
                .images()
                .upload(upload.file_name, upload.content_type, upload.bytes)
                .await?;
            (Some(url), existing.image_url)
        }
        None => (existing.image_url, None),
    };

    let record = repository
        .update(id, &form.title, &form.content, image_url.as_deref())
        .await?;

    // The post is saved; losing the orphaned file is not worth failing over
    if let Some(old_url) = replaced_url {
        if let Err(error) = state.images().delete(&old_url).await {
            tracing::warn!(%error, url = %old_url, "Failed to delete replaced image");
        }
    }

    tracing::info!(news_id = %id, "News post updated");
    Ok(Json(NewsResponse {
        success: true,
        message: "Nyhet oppdatert".to_owned(),
        news: Some(record),
    }))
}

/// Delete a news post and its remote image.
///
/// DELETE /api/news/{id}
#[instrument(skip(state, _admin))]
async fn delete_news(
    RequireAdminAuth(_admin): RequireAdminAuth,
    State(state): State<AppState>,
    Path(id): Path<NewsId>,
) -> Result<Json<NewsResponse>> {
    let image_url = NewsRepository::new(state.pool()).delete(id).await?;

    if let Some(url) = image_url {
        if let Err(error) = state.images().delete(&url).await {
            tracing::warn!(%error, url = %url, "Failed to delete news image");
        }
    }

    tracing::info!(news_id = %id, "News post deleted");
    Ok(Json(NewsResponse {
        success: true,
        message: "Nyhet slettet".to_owned(),
        news: None,
    }))
}
