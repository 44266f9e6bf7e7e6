//! Pluggable string-keyed state store.
//!
//! Every piece of storefront state (catalog cache, overrides, tombstones,
//! cart, session, orders) lives behind the [`StateStore`] trait as a JSON
//! string under a well-known key. Components receive an
//! `Arc<dyn StateStore>` instead of reaching for ambient storage, so tests
//! run against [`MemoryStore`] and the CLI against [`JsonFileStore`].
//!
//! There is deliberately no cross-process coordination: concurrent writers
//! are last-write-wins, matching the single-user scope of the storefront.

mod file;
mod memory;

pub use file::JsonFileStore;
pub use memory::MemoryStore;

use serde::Serialize;
use serde::de::DeserializeOwned;

/// A string-keyed key/value repository.
///
/// Implementations never surface storage failures to callers; a failed read
/// behaves like an absent key and a failed write is logged and dropped.
pub trait StateStore: Send + Sync {
    /// Read the raw value for `key`, if present.
    fn get(&self, key: &str) -> Option<String>;

    /// Write the raw value for `key`.
    fn set(&self, key: &str, value: &str);

    /// Remove `key` if present.
    fn remove(&self, key: &str);
}

/// Well-known state keys.
pub mod keys {
    /// Merged product list cache.
    pub const PRODUCTS: &str = "products";
    /// Tombstone set of locally deleted product ids.
    pub const REMOVED_PRODUCTS: &str = "removed_products";
    /// Override map of local product edits, keyed by product id.
    pub const PRODUCT_OVERRIDES: &str = "product_overrides";
    /// Cart snapshot.
    pub const CART: &str = "cart";
    /// Cart running total, kept as a two-decimal string.
    pub const CART_TOTAL: &str = "cart_total";
    /// Signed-in customer session.
    pub const SESSION: &str = "session";
    /// Registered accounts.
    pub const USERS: &str = "users";
    /// Placed orders.
    pub const ORDERS: &str = "orders";
    /// Monotonic order-number sequence.
    pub const ORDER_SEQUENCE: &str = "order_sequence";
    /// Default freight applied at checkout.
    pub const DEFAULT_FREIGHT: &str = "default_freight";
}

/// Read and deserialize the JSON value under `key`.
///
/// Malformed persisted state is logged and treated as absent; callers never
/// see a parse failure.
pub fn get_json<T: DeserializeOwned>(store: &dyn StateStore, key: &str) -> Option<T> {
    let raw = store.get(key)?;
    match serde_json::from_str(&raw) {
        Ok(value) => Some(value),
        Err(err) => {
            tracing::warn!(key, %err, "discarding malformed persisted state");
            None
        }
    }
}

/// Serialize `value` as JSON under `key`.
pub fn set_json<T: Serialize + ?Sized>(store: &dyn StateStore, key: &str, value: &T) {
    match serde_json::to_string(value) {
        Ok(raw) => store.set(key, &raw),
        Err(err) => tracing::warn!(key, %err, "failed to serialize state, keeping previous value"),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_get_json_absent_key() {
        let store = MemoryStore::new();
        assert_eq!(get_json::<Vec<i64>>(&store, keys::PRODUCTS), None);
    }

    #[test]
    fn test_get_json_malformed_is_none() {
        let store = MemoryStore::new();
        store.set(keys::PRODUCTS, "not json {{{");
        assert_eq!(get_json::<Vec<i64>>(&store, keys::PRODUCTS), None);
    }

    #[test]
    fn test_json_roundtrip() {
        let store = MemoryStore::new();
        set_json(&store, keys::ORDER_SEQUENCE, &42_u64);
        assert_eq!(get_json::<u64>(&store, keys::ORDER_SEQUENCE), Some(42));
    }
}
