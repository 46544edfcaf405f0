//! The auth gate.
//!
//! Pure transitions over the session's [`AuthState`] and stored
//! [`CustomerRecord`]. The route layer loads both from the session, calls
//! into here, and writes the results back; nothing in this module touches
//! the session or the database, which keeps every transition unit-testable.
//!
//! Login takes an explicit admin flag: the admin path compares against the
//! configured fixed pair, the customer path against the session's record
//! (or the seeded demo account when none is stored). A failed login leaves
//! the state exactly as it was.

use thiserror::Error;

use bakehuset_core::{Email, EmailError};

use crate::config::AdminCredentials;
use crate::models::{AuthState, CustomerRecord};

/// Minimum password length for registration and password changes.
const MIN_PASSWORD_LENGTH: usize = 6;

/// Errors from auth gate operations.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum AuthError {
    /// Username/email or password did not match.
    #[error("invalid credentials")]
    InvalidCredentials,

    /// Registration email collides with the stored record.
    #[error("an account with this email already exists")]
    EmailTaken,

    /// The email failed structural validation.
    #[error("invalid email: {0}")]
    InvalidEmail(String),

    /// Password shorter than the minimum.
    #[error("password must be at least {MIN_PASSWORD_LENGTH} characters")]
    WeakPassword,

    /// Old password did not match on a password change.
    #[error("wrong old password")]
    WrongOldPassword,

    /// The operation requires a logged-in customer.
    #[error("not logged in")]
    NotLoggedIn,
}

/// A successful login transition.
#[derive(Debug, PartialEq, Eq)]
pub enum LoginOutcome {
    Admin,
    Customer,
}

impl LoginOutcome {
    /// The state the session moves to.
    #[must_use]
    pub const fn auth_state(&self) -> AuthState {
        match self {
            Self::Admin => AuthState::Admin,
            Self::Customer => AuthState::Customer,
        }
    }
}

/// Attempt a login.
///
/// `stored` is the session's customer record, if any; the demo account is
/// used as fallback for the customer path.
///
/// # Errors
///
/// Returns `AuthError::InvalidCredentials` when the pair matches nothing.
/// The caller must leave the session state unchanged in that case.
pub fn login(
    admin: &AdminCredentials,
    stored: Option<&CustomerRecord>,
    identifier: &str,
    password: &str,
    as_admin: bool,
) -> Result<LoginOutcome, AuthError> {
    if as_admin {
        if admin.verify(identifier, password) {
            return Ok(LoginOutcome::Admin);
        }
        return Err(AuthError::InvalidCredentials);
    }

    let demo = CustomerRecord::demo();
    let record = stored.unwrap_or(&demo);
    if record.email.matches(identifier) && record.password == password {
        return Ok(LoginOutcome::Customer);
    }
    Err(AuthError::InvalidCredentials)
}

/// Log out: every state collapses to `Anonymous`.
#[must_use]
pub const fn logout(_current: AuthState) -> AuthState {
    AuthState::Anonymous
}

/// Register a new customer account.
///
/// Replaces the stored record on success. Registration does NOT log the
/// customer in; they go through [`login`] afterwards.
///
/// # Errors
///
/// Fails when the email is structurally invalid, already taken by the
/// stored record (or the demo account), or the password is too short.
pub fn register(
    stored: Option<&CustomerRecord>,
    name: &str,
    email: &str,
    password: &str,
) -> Result<CustomerRecord, AuthError> {
    let email = Email::parse(email.trim()).map_err(|e: EmailError| {
        AuthError::InvalidEmail(e.to_string())
    })?;

    if password.len() < MIN_PASSWORD_LENGTH {
        return Err(AuthError::WeakPassword);
    }

    let taken = stored.map_or_else(
        || CustomerRecord::demo().email.matches(email.as_str()),
        |record| record.email.matches(email.as_str()),
    );
    if taken {
        return Err(AuthError::EmailTaken);
    }

    Ok(CustomerRecord {
        name: name.trim().to_owned(),
        email,
        phone: String::new(),
        address: String::new(),
        password: password.to_owned(),
    })
}

/// Update profile fields on the stored record.
///
/// # Errors
///
/// Fails when the new email is structurally invalid.
pub fn update_profile(
    record: &mut CustomerRecord,
    name: &str,
    email: &str,
    phone: &str,
    address: &str,
) -> Result<(), AuthError> {
    let email =
        Email::parse(email.trim()).map_err(|e| AuthError::InvalidEmail(e.to_string()))?;

    record.name = name.trim().to_owned();
    record.email = email;
    record.phone = phone.trim().to_owned();
    record.address = address.trim().to_owned();
    Ok(())
}

/// Change the account password.
///
/// # Errors
///
/// Fails when the old password does not match or the new one is too short.
pub fn change_password(
    record: &mut CustomerRecord,
    old_password: &str,
    new_password: &str,
) -> Result<(), AuthError> {
    if record.password != old_password {
        return Err(AuthError::WrongOldPassword);
    }
    if new_password.len() < MIN_PASSWORD_LENGTH {
        return Err(AuthError::WeakPassword);
    }
    record.password = new_password.to_owned();
    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use secrecy::SecretString;

    use super::*;

    fn admin_creds() -> AdminCredentials {
        AdminCredentials {
            username: "admin".to_owned(),
            password: SecretString::from("admin123"),
        }
    }

    #[test]
    fn test_admin_login_success() {
        let outcome = login(&admin_creds(), None, "admin", "admin123", true).unwrap();
        assert_eq!(outcome, LoginOutcome::Admin);
        assert_eq!(outcome.auth_state(), AuthState::Admin);
    }

    #[test]
    fn test_admin_login_wrong_password_fails() {
        let result = login(&admin_creds(), None, "admin", "wrong", true);
        assert_eq!(result, Err(AuthError::InvalidCredentials));
    }

    #[test]
    fn test_admin_path_does_not_accept_customer_credentials() {
        let result = login(&admin_creds(), None, "kunde@test.no", "kunde123", true);
        assert_eq!(result, Err(AuthError::InvalidCredentials));
    }

    #[test]
    fn test_customer_login_against_demo_account() {
        let outcome = login(&admin_creds(), None, "kunde@test.no", "kunde123", false).unwrap();
        assert_eq!(outcome.auth_state(), AuthState::Customer);
    }

    #[test]
    fn test_customer_login_email_case_insensitive() {
        let outcome = login(&admin_creds(), None, "Kunde@Test.NO", "kunde123", false).unwrap();
        assert_eq!(outcome, LoginOutcome::Customer);
    }

    #[test]
    fn test_customer_login_against_stored_record() {
        let stored = register(None, "Ola", "ola@eksempel.no", "hemmelig1").unwrap();
        let outcome = login(
            &admin_creds(),
            Some(&stored),
            "ola@eksempel.no",
            "hemmelig1",
            false,
        )
        .unwrap();
        assert_eq!(outcome, LoginOutcome::Customer);
    }

    #[test]
    fn test_customer_login_wrong_password_fails() {
        let result = login(&admin_creds(), None, "kunde@test.no", "feil", false);
        assert_eq!(result, Err(AuthError::InvalidCredentials));
    }

    #[test]
    fn test_logout_from_any_state() {
        assert_eq!(logout(AuthState::Admin), AuthState::Anonymous);
        assert_eq!(logout(AuthState::Customer), AuthState::Anonymous);
        assert_eq!(logout(AuthState::Anonymous), AuthState::Anonymous);
    }

    #[test]
    fn test_register_duplicate_email_fails() {
        let stored = register(None, "Ola", "ola@eksempel.no", "hemmelig1").unwrap();
        let result = register(Some(&stored), "Per", "ola@eksempel.no", "annet-passord");
        assert_eq!(result, Err(AuthError::EmailTaken));
        // Stored record untouched
        assert_eq!(stored.name, "Ola");
    }

    #[test]
    fn test_register_demo_email_fails() {
        let result = register(None, "Kari", "kunde@test.no", "passord1");
        assert_eq!(result, Err(AuthError::EmailTaken));
    }

    #[test]
    fn test_register_replaces_record_but_does_not_authenticate() {
        let first = register(None, "Ola", "ola@eksempel.no", "hemmelig1").unwrap();
        let second = register(Some(&first), "Per", "per@eksempel.no", "hemmelig2").unwrap();
        assert_eq!(second.name, "Per");
        // The old credentials no longer work
        let result = login(
            &admin_creds(),
            Some(&second),
            "ola@eksempel.no",
            "hemmelig1",
            false,
        );
        assert_eq!(result, Err(AuthError::InvalidCredentials));
    }

    #[test]
    fn test_register_rejects_short_password() {
        assert_eq!(
            register(None, "Ola", "ola@eksempel.no", "kort"),
            Err(AuthError::WeakPassword)
        );
    }

    #[test]
    fn test_register_rejects_invalid_email() {
        assert!(matches!(
            register(None, "Ola", "ikke-en-epost", "hemmelig1"),
            Err(AuthError::InvalidEmail(_))
        ));
    }

    #[test]
    fn test_change_password_requires_matching_old() {
        let mut record = CustomerRecord::demo();
        assert_eq!(
            change_password(&mut record, "feil", "nyttpassord"),
            Err(AuthError::WrongOldPassword)
        );
        assert_eq!(record.password, "kunde123");

        change_password(&mut record, "kunde123", "nyttpassord").unwrap();
        assert_eq!(record.password, "nyttpassord");
    }

    #[test]
    fn test_change_password_rejects_short_new() {
        let mut record = CustomerRecord::demo();
        assert_eq!(
            change_password(&mut record, "kunde123", "kort"),
            Err(AuthError::WeakPassword)
        );
        assert_eq!(record.password, "kunde123");
    }

    #[test]
    fn test_update_profile() {
        let mut record = CustomerRecord::demo();
        update_profile(
            &mut record,
            "Kari Hansen",
            "kari@eksempel.no",
            "987 65 432",
            "Nyveien 1, 0001 Oslo",
        )
        .unwrap();
        assert_eq!(record.name, "Kari Hansen");
        assert!(record.email.matches("kari@eksempel.no"));
        // Password untouched by profile updates
        assert_eq!(record.password, "kunde123");
    }
}
