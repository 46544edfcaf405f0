//! Session-scoped state for the admin panel.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Session key constants.
pub mod session_keys {
    /// The logged-in [`CurrentAdmin`](super::CurrentAdmin).
    pub const CURRENT_ADMIN: &str = "current_admin";
}

/// The logged-in admin, as stored in the session.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CurrentAdmin {
    pub username: String,
    pub logged_in_at: DateTime<Utc>,
}

impl CurrentAdmin {
    /// A freshly logged-in admin.
    #[must_use]
    pub fn new(username: String) -> Self {
        Self {
            username,
            logged_in_at: Utc::now(),
        }
    }
}
