//! Jabuticaba Core - Shared types library.
//!
//! This crate provides common types used across all Jabuticaba components:
//! - `storefront` - Catalog, cart, checkout, and order-history engine
//! - `cli` - Command-line surface for storefront and admin operations
//!
//! # Architecture
//!
//! The core crate contains only types - no I/O, no HTTP clients, no
//! persistence. This keeps it lightweight and allows it to be used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for type-safe IDs, prices, emails, image
//!   paths, and statuses

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
