//! News repository: full CRUD.

use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::PgPool;

use bakehuset_core::NewsId;

use super::RepositoryError;

/// A news post.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct NewsRecord {
    pub id: NewsId,
    pub title: String,
    pub content: String,
    pub image_url: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Repository for news CRUD.
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
    pub async fn list(&self) -> Result<Vec<NewsRecord>, RepositoryError> {
        let rows = sqlx::query_as::<_, NewsRecord>(
            r"
            SELECT id, title, content, image_url, created_at
            FROM news
            ORDER BY created_at DESC, id DESC
            ",
        )
        .fetch_all(self.pool)
        .await?;

        Ok(rows)
    }

    /// A single news post by id.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if no such post exists.
    pub async fn get(&self, id: NewsId) -> Result<NewsRecord, RepositoryError> {
        sqlx::query_as::<_, NewsRecord>(
            r"
            SELECT id, title, content, image_url, created_at
            FROM news
            WHERE id = $1
            ",
        )
        .bind(id)
        .fetch_optional(self.pool)
        .await?
        .ok_or(RepositoryError::NotFound)
    }

    /// Insert a new post.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the insert fails.
    pub async fn create(
        &self,
        title: &str,
        content: &str,
        image_url: Option<&str>,
    ) -> Result<NewsRecord, RepositoryError> {
        let row = sqlx::query_as::<_, NewsRecord>(
            r"
            INSERT INTO news (title, content, image_url)
            VALUES ($1, $2, $3)
            RETURNING id, title, content, image_url, created_at
            ",
        )
        .bind(title)
        .bind(content)
        .bind(image_url)
        .fetch_one(self.pool)
        .await?;

        Ok(row)
    }

    /// Replace the post with the given id.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if no such post exists.
    pub async fn update(
        &self,
        id: NewsId,
        title: &str,
        content: &str,
        image_url: Option<&str>,
    ) -> Result<NewsRecord, RepositoryError> {
        sqlx::query_as::<_, NewsRecord>(
            r"
            UPDATE news
            SET title = $2, content = $3, image_url = $4
            WHERE id = $1
            RETURNING id, title, content, image_url, created_at
            ",
        )
        .bind(id)
        .bind(title)
        .bind(content)
        .bind(image_url)
        .fetch_optional(self.pool)
        .await?
        .ok_or(RepositoryError::NotFound)
    }

    /// Delete the post with the given id, returning its image URL (if any)
    /// so the caller can clean up the remote image.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if no such post exists.
    pub async fn delete(&self, id: NewsId) -> Result<Option<String>, RepositoryError> {
        let row: Option<(Option<String>,)> =
            sqlx::query_as("DELETE FROM news WHERE id = $1 RETURNING image_url")
                .bind(id)
                .fetch_optional(self.pool)
                .await?;

        row.map(|(image_url,)| image_url)
            .ok_or(RepositoryError::NotFound)
    }
}
