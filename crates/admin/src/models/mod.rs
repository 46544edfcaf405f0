//! Data models for the admin service.

pub mod session;

pub use session::{CurrentAdmin, session_keys};
