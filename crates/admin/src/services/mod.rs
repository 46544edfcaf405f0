//! Business logic services.

pub mod images;

pub use images::ImageClient;
