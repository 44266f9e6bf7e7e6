//! Jabuticaba Storefront library.
//!
//! The domain engine behind the storefront: a product catalog that
//! reconciles a remote source with local edits, a cart, checkout with order
//! derivation, order history, and accounts. All state flows through the
//! [`store::StateStore`] repository trait so the same logic runs against an
//! in-memory store in tests and a JSON file store in the CLI.
//!
//! Nothing in this crate surfaces a hard error for a missing or malformed
//! piece of persisted state, and a dead catalog source degrades to the last
//! cached list. Callers only see typed errors for genuine validation
//! failures (empty cart at checkout, duplicate account email, and the like).

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod accounts;
pub mod cart;
pub mod catalog;
pub mod checkout;
pub mod config;
pub mod models;
pub mod orders;
pub mod store;
