//! Business logic services.

pub mod auth;
pub mod relay;

pub use relay::RelayClient;
