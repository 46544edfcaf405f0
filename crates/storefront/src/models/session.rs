//! Session-scoped state.
//!
//! All per-visitor state lives in the server-side session: who the visitor
//! is, their stored account record, and the cart. Handlers load what they
//! need at the start of the request and write changes back before
//! responding. Nothing is kept in process memory or cookies beyond the
//! session id.

use serde::{Deserialize, Serialize};

/// Session key constants.
///
/// Keys are versioned by name; changing a stored type means changing its key.
pub mod session_keys {
    /// Current [`AuthState`](super::AuthState).
    pub const AUTH_STATE: &str = "auth_state";
    /// The session's [`CustomerRecord`](super::super::customer::CustomerRecord).
    pub const CUSTOMER: &str = "customer";
    /// The session's `Cart`.
    pub const CART: &str = "cart";
}

/// Who the current session is authenticated as.
///
/// Transitions are made only by the auth gate (`services::auth`): a
/// successful login moves to `Customer` or `Admin`, logout moves back to
/// `Anonymous`, and a failed login leaves the state untouched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AuthState {
    #[default]
    Anonymous,
    Customer,
    Admin,
}

impl AuthState {
    /// True for `Customer` and `Admin`.
    #[must_use]
    pub const fn is_logged_in(&self) -> bool {
        !matches!(self, Self::Anonymous)
    }

    /// True only for `Admin`.
    #[must_use]
    pub const fn is_admin(&self) -> bool {
        matches!(self, Self::Admin)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_anonymous() {
        assert_eq!(AuthState::default(), AuthState::Anonymous);
        assert!(!AuthState::default().is_logged_in());
    }

    #[test]
    fn test_admin_is_logged_in() {
        assert!(AuthState::Admin.is_logged_in());
        assert!(AuthState::Admin.is_admin());
        assert!(AuthState::Customer.is_logged_in());
        assert!(!AuthState::Customer.is_admin());
    }
}
