//! Read-only news repository.

use chrono::{DateTime, Utc};
use sqlx::PgPool;

use bakehuset_core::NewsId;

use super::RepositoryError;
use crate::models::NewsItem;

#[derive(Debug, sqlx::FromRow)]
struct NewsRow {
    id: NewsId,
    title: String,
    content: String,
    image_url: Option<String>,
    created_at: DateTime<Utc>,
}

impl From<NewsRow> for NewsItem {
    fn from(row: NewsRow) -> Self {
        Self {
            id: row.id,
            title: row.title,
            content: row.content,
            image_url: row.image_url,
            created_at: row.created_at,
        }
    }
}

/// Repository for news reads.
pub struct NewsRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> NewsRepository<'a> {
    /// Create a new news repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// All news posts, newest first.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list(&self) -> Result<Vec<NewsItem>, RepositoryError> {
        let rows = sqlx::query_as::<_, NewsRow>(
            r"
            SELECT id, title, content, image_url, created_at
            FROM news
            ORDER BY created_at DESC, id DESC
            ",
        )
        .fetch_all(self.pool)
        .await?;

        Ok(rows.into_iter().map(NewsItem::from).collect())
    }
}
