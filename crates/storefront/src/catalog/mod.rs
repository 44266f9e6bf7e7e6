//! Product catalog: remote fetch, local reconciliation, admin edits.

pub mod merge;
pub mod source;

pub use merge::{OverrideMap, TombstoneSet, merge_catalog, name_key, next_product_id};
pub use source::{CatalogSource, HttpCatalogSource, SourceError};

use std::sync::Arc;

use jabuticaba_core::{ImagePath, ProductId};

use crate::models::{Product, ProductDraft, ProductPatch};
use crate::store::{StateStore, get_json, keys, set_json};

/// The storefront's view of the product catalog.
///
/// Listing never fails: when the source is unreachable the last merged list
/// is served from the state store. Local creates, edits, and deletes are
/// persisted as state (new products, an override map, a tombstone set) and
/// survive every refresh of the remote list.
pub struct CatalogStore<S> {
    source: S,
    store: Arc<dyn StateStore>,
}

impl<S: CatalogSource> CatalogStore<S> {
    pub fn new(source: S, store: Arc<dyn StateStore>) -> Self {
        Self { source, store }
    }

    /// The last merged product list, without contacting the source.
    #[must_use]
    pub fn cached(&self) -> Vec<Product> {
        get_json(self.store.as_ref(), keys::PRODUCTS).unwrap_or_default()
    }

    fn overrides(&self) -> OverrideMap {
        get_json(self.store.as_ref(), keys::PRODUCT_OVERRIDES).unwrap_or_default()
    }

    fn removed(&self) -> TombstoneSet {
        get_json(self.store.as_ref(), keys::REMOVED_PRODUCTS).unwrap_or_default()
    }

    fn persist_cache(&self, products: &[Product]) {
        set_json(self.store.as_ref(), keys::PRODUCTS, products);
    }

    /// The current product list.
    ///
    /// Fetches the remote catalog, merges it with local state, and persists
    /// the result. A source failure degrades to the cached list with a
    /// warning; callers cannot observe the difference.
    pub async fn list(&self) -> Vec<Product> {
        match self.source.fetch().await {
            Ok(remote) => {
                let merged =
                    merge_catalog(&remote, &self.cached(), &self.overrides(), &self.removed());
                self.persist_cache(&merged);
                merged
            }
            Err(err) => {
                tracing::warn!(%err, "catalog source unavailable, serving cached list");
                self.cached()
            }
        }
    }

    /// Look up a single product in the current list.
    pub async fn get(&self, id: ProductId) -> Option<Product> {
        self.list().await.into_iter().find(|p| p.id == id)
    }

    /// Create a local product. The id is one past the maximum id ever seen,
    /// tombstoned ids included, so deleted ids are not reassigned.
    pub async fn create(&self, draft: ProductDraft) -> Product {
        let mut products = self.list().await;
        let product = Product {
            id: next_product_id(&products, &self.removed()),
            name: draft.name,
            price: draft.price,
            image: ImagePath::normalize(&draft.image),
        };
        tracing::info!(id = %product.id, name = %product.name, "creating local product");
        products.push(product.clone());
        self.persist_cache(&products);
        product
    }

    /// Edit a product. The patch is recorded as an override so it reapplies
    /// over future remote refreshes, then applied to the cached entry.
    ///
    /// Returns the updated product, or `None` when the id is not in the
    /// current list. The override is recorded either way; an id that later
    /// appears remotely picks up the pending edit.
    pub async fn edit(&self, id: ProductId, patch: ProductPatch) -> Option<Product> {
        if patch.is_empty() {
            return self.get(id).await;
        }

        let mut overrides = self.overrides();
        let entry = overrides.entry(id).or_default();
        entry.absorb(patch.clone());
        set_json(self.store.as_ref(), keys::PRODUCT_OVERRIDES, &overrides);

        let mut products = self.list().await;
        let found = products.iter_mut().find(|p| p.id == id).map(|product| {
            merge::apply_patch(product, &patch);
            product.clone()
        });
        if found.is_some() {
            self.persist_cache(&products);
        } else {
            tracing::warn!(%id, "edit recorded for product not in current list");
        }
        found
    }

    /// Delete a product. Remote products are tombstoned so the deletion
    /// holds across refreshes; deleting an absent id is a no-op.
    pub async fn delete(&self, id: ProductId) {
        let mut removed = self.removed();
        if removed.insert(id) {
            set_json(self.store.as_ref(), keys::REMOVED_PRODUCTS, &removed);
        }

        let mut products = self.cached();
        let before = products.len();
        products.retain(|p| p.id != id);
        if products.len() != before {
            tracing::info!(%id, "deleting product");
            self.persist_cache(&products);
        }
    }
}
