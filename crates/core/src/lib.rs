//! Bakehuset Core - Shared domain library.
//!
//! This crate provides common types used across all Bakehuset components:
//! - `storefront` - Public-facing bakery shop API
//! - `admin` - Internal administration API
//! - `cli` - Command-line tools for migrations and seeding
//!
//! # Architecture
//!
//! The core crate contains only types and pure domain logic - no I/O, no
//! database access, no HTTP clients. This keeps it lightweight and allows
//! it to be used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for type-safe IDs, prices, emails, and statuses
//! - [`catalog`] - Product records and category filtering
//! - [`cart`] - Cart aggregation and bundle pricing

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod cart;
pub mod catalog;
pub mod types;

pub use types::*;
