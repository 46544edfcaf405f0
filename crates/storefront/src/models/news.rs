//! News item model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use bakehuset_core::NewsId;

/// A news post shown on the home page, newest first.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewsItem {
    pub id: NewsId,
    pub title: String,
    pub content: String,
    pub image_url: Option<String>,
    pub created_at: DateTime<Utc>,
}
