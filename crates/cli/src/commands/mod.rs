//! Command implementations.

pub mod account;
pub mod cart;
pub mod checkout;
pub mod orders;
pub mod product;

use std::sync::Arc;

use jabuticaba_storefront::catalog::{CatalogStore, HttpCatalogSource};
use jabuticaba_storefront::config::{ConfigError, StorefrontConfig};
use jabuticaba_storefront::store::{JsonFileStore, StateStore};

/// Shared command state: configuration plus the opened state store and
/// catalog. Built once per invocation.
pub struct Context {
    pub config: StorefrontConfig,
    pub store: Arc<dyn StateStore>,
    pub catalog: CatalogStore<HttpCatalogSource>,
}

impl Context {
    pub fn from_env() -> Result<Self, ConfigError> {
        let config = StorefrontConfig::from_env()?;
        tracing::debug!(data_file = %config.data_file.display(), "opening state store");

        let store: Arc<dyn StateStore> = Arc::new(JsonFileStore::open(&config.data_file));
        let source =
            HttpCatalogSource::new(config.products_url.clone(), config.static_db_url.clone());
        let catalog = CatalogStore::new(source, store.clone());

        Ok(Self {
            config,
            store,
            catalog,
        })
    }
}
