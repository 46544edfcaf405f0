//! Data models for the storefront.

pub mod customer;
pub mod news;
pub mod session;

pub use customer::{CustomerRecord, OrderLine, OrderSummary};
pub use news::NewsItem;
pub use session::{AuthState, session_keys};
