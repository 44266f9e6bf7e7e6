//! Local catalog management layered over a changing remote source.

#![allow(clippy::unwrap_used)]

use std::sync::Arc;

use jabuticaba_core::{Price, ProductId};
use jabuticaba_integration_tests::{ScriptedSource, product};
use jabuticaba_storefront::catalog::CatalogStore;
use jabuticaba_storefront::models::{ProductDraft, ProductPatch};
use jabuticaba_storefront::store::{JsonFileStore, MemoryStore, StateStore};
use rust_decimal::Decimal;

#[tokio::test]
async fn test_local_edits_survive_remote_refresh() {
    let store: Arc<dyn StateStore> = Arc::new(MemoryStore::new());
    let catalog = CatalogStore::new(
        ScriptedSource::serving(vec![product(1, "Racao", 1000), product(2, "Bolinha", 500)]),
        store,
    );
    catalog.list().await;

    catalog
        .edit(
            ProductId::new(1),
            ProductPatch {
                price: Some(Price::new(Decimal::new(1250, 2)).unwrap()),
                ..ProductPatch::default()
            },
        )
        .await
        .unwrap();
    catalog.delete(ProductId::new(2)).await;

    // Several refreshes later both the edit and the delete hold.
    for _ in 0..3 {
        let listed = catalog.list().await;
        assert_eq!(listed.len(), 1);
        let racao = listed.first().unwrap();
        assert_eq!(racao.price, Price::new(Decimal::new(1250, 2)).unwrap());
    }
}

#[tokio::test]
async fn test_created_products_append_after_remote() {
    let store: Arc<dyn StateStore> = Arc::new(MemoryStore::new());
    let catalog = CatalogStore::new(
        ScriptedSource::serving(vec![product(1, "Racao", 1000)]),
        store,
    );

    let created = catalog
        .create(ProductDraft {
            name: "Bone Jabuticaba".to_owned(),
            price: Price::new(Decimal::new(4990, 2)).unwrap(),
            image: "/assets/images/bone.PNG".to_owned(),
        })
        .await;
    assert_eq!(created.id, ProductId::new(2));
    assert_eq!(created.image.as_str(), "images/bone.png");

    let listed = catalog.list().await;
    let ids: Vec<i64> = listed.iter().map(|p| p.id.as_i64()).collect();
    assert_eq!(ids, vec![1, 2]);
}

#[tokio::test]
async fn test_remote_growth_does_not_collide_with_local_ids() {
    // Remote later serves an id the local store already assigned; the name
    // match folds the two records together instead of duplicating.
    let store: Arc<dyn StateStore> = Arc::new(MemoryStore::new());
    let catalog = CatalogStore::new(
        ScriptedSource::new(vec![
            Ok(vec![product(1, "Racao", 1000)]),
            Ok(vec![product(1, "Racao", 1000), product(2, "Bone Jabuticaba", 4990)]),
        ]),
        store,
    );

    catalog
        .create(ProductDraft {
            name: "Bone Jabuticaba".to_owned(),
            price: Price::new(Decimal::new(4990, 2)).unwrap(),
            image: String::new(),
        })
        .await;

    let listed = catalog.list().await;
    assert_eq!(listed.len(), 2);
    let ids: Vec<i64> = listed.iter().map(|p| p.id.as_i64()).collect();
    assert_eq!(ids, vec![1, 2]);
}

#[tokio::test]
async fn test_catalog_state_survives_store_reopen() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("state.json");

    {
        let store: Arc<dyn StateStore> = Arc::new(JsonFileStore::open(&path));
        let catalog = CatalogStore::new(
            ScriptedSource::serving(vec![product(1, "Racao", 1000)]),
            store,
        );
        catalog.list().await;
        catalog.delete(ProductId::new(1)).await;
    }

    // A fresh process with the same file keeps the tombstone.
    let store: Arc<dyn StateStore> = Arc::new(JsonFileStore::open(&path));
    let catalog = CatalogStore::new(
        ScriptedSource::serving(vec![product(1, "Racao", 1000)]),
        store,
    );
    assert!(catalog.list().await.is_empty());
}
