//! Catalog reconciliation.
//!
//! The merged product list layers three pieces of local state over the
//! remote catalog: an override map (local edits, reapplied on every merge),
//! a tombstone set (local deletes, remote records excluded even while the
//! remote still returns them), and local-only products (local creates,
//! appended after the remote-derived list).

use std::collections::{BTreeMap, BTreeSet, HashSet};

use jabuticaba_core::{ImagePath, ProductId};

use crate::models::{Product, ProductPatch};

/// Local edits keyed by product id.
pub type OverrideMap = BTreeMap<ProductId, ProductPatch>;

/// Locally deleted product ids.
pub type TombstoneSet = BTreeSet<ProductId>;

/// Case-insensitive, whitespace-trimmed name key used for fallback matching.
#[must_use]
pub fn name_key(name: &str) -> String {
    name.trim().to_lowercase()
}

/// Next id for a locally created product: one past the maximum id ever
/// seen, tombstoned ids included. A deleted id is never reassigned, so a
/// new product cannot land on a tombstone and be dropped by the merge.
#[must_use]
pub fn next_product_id(products: &[Product], removed: &TombstoneSet) -> ProductId {
    let max = products
        .iter()
        .map(|p| p.id.as_i64())
        .chain(removed.iter().map(ProductId::as_i64))
        .max()
        .unwrap_or(0);
    ProductId::new(max + 1)
}

/// Apply a patch to a product, field by field. Image values are normalized.
pub fn apply_patch(product: &mut Product, patch: &ProductPatch) {
    if let Some(name) = &patch.name {
        product.name.clone_from(name);
    }
    if let Some(price) = patch.price {
        product.price = price;
    }
    if let Some(image) = &patch.image {
        product.image = ImagePath::normalize(image);
    }
}

/// Reconcile the remote catalog with local state into a single list.
///
/// For each remote record (tombstoned ids excluded) the local cache is
/// searched for a candidate by exact id, then by [`name_key`] with first
/// cache-order match winning; a cache entry supplies base fields to at most
/// one remote record. Base fields come from the candidate when one exists
/// (the cache already reflects prior local edits), otherwise from the
/// remote record; the merged entry always carries the remote id. Overrides
/// for that id are then applied field by field, and the image path
/// normalized.
///
/// Cache entries not consumed as candidates, not present remotely, and not
/// tombstoned are local creations: they follow the remote-derived list,
/// sorted by ascending id.
///
/// The result contains each id at most once, never contains a tombstoned
/// id, and merging the output with the same remote list and local state is
/// a fixed point.
#[must_use]
pub fn merge_catalog(
    remote: &[Product],
    cache: &[Product],
    overrides: &OverrideMap,
    removed: &TombstoneSet,
) -> Vec<Product> {
    let remote_ids: HashSet<ProductId> = remote.iter().map(|p| p.id).collect();
    let mut consumed: HashSet<ProductId> = HashSet::new();
    let mut merged: Vec<Product> = Vec::with_capacity(remote.len());

    for record in remote {
        if removed.contains(&record.id) {
            continue;
        }

        let candidate = cache
            .iter()
            .find(|c| !consumed.contains(&c.id) && c.id == record.id)
            .or_else(|| {
                let key = name_key(&record.name);
                cache
                    .iter()
                    .find(|c| !consumed.contains(&c.id) && name_key(&c.name) == key)
            });

        let mut item = match candidate {
            Some(local) => {
                consumed.insert(local.id);
                let mut base = local.clone();
                base.id = record.id;
                base
            }
            None => record.clone(),
        };

        if let Some(patch) = overrides.get(&record.id) {
            apply_patch(&mut item, patch);
        }
        item.image = ImagePath::normalize(item.image.as_str());
        merged.push(item);
    }

    let mut local_only: Vec<Product> = cache
        .iter()
        .filter(|c| {
            !remote_ids.contains(&c.id) && !consumed.contains(&c.id) && !removed.contains(&c.id)
        })
        .cloned()
        .collect();
    local_only.sort_by_key(|p| p.id);

    for product in &mut local_only {
        if let Some(patch) = overrides.get(&product.id) {
            apply_patch(product, patch);
        }
        product.image = ImagePath::normalize(product.image.as_str());
    }

    merged.extend(local_only);
    merged
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use jabuticaba_core::Price;
    use rust_decimal::Decimal;

    fn product(id: i64, name: &str, cents: i64, image: &str) -> Product {
        Product {
            id: ProductId::new(id),
            name: name.to_owned(),
            price: Price::new(Decimal::new(cents, 2)).unwrap(),
            image: ImagePath::normalize(image),
        }
    }

    fn price(cents: i64) -> Price {
        Price::new(Decimal::new(cents, 2)).unwrap()
    }

    #[test]
    fn test_remote_passthrough_when_no_local_state() {
        let remote = vec![product(1, "Alfa", 100, "images/a.png")];
        let merged = merge_catalog(&remote, &[], &OverrideMap::new(), &TombstoneSet::new());
        assert_eq!(merged, remote);
    }

    #[test]
    fn test_tombstone_excludes_remote_record() {
        let remote = vec![
            product(1, "Alfa", 100, "images/a.png"),
            product(2, "Bravo", 200, "images/b.png"),
        ];
        let removed: TombstoneSet = [ProductId::new(1)].into_iter().collect();

        let merged = merge_catalog(&remote, &[], &OverrideMap::new(), &removed);
        assert_eq!(merged.len(), 1);
        assert_eq!(merged.first().map(|p| p.id), Some(ProductId::new(2)));
    }

    #[test]
    fn test_override_beats_remote_field_by_field() {
        let remote = vec![product(1, "Alfa", 100, "images/a.png")];
        let mut overrides = OverrideMap::new();
        overrides.insert(
            ProductId::new(1),
            ProductPatch {
                price: Some(price(1000)),
                ..ProductPatch::default()
            },
        );

        let merged = merge_catalog(&remote, &[], &overrides, &TombstoneSet::new());
        let item = merged.first().unwrap();
        assert_eq!(item.price, price(1000));
        // Fields not in the override keep the remote values.
        assert_eq!(item.name, "Alfa");
        assert_eq!(item.image.as_str(), "images/a.png");
    }

    #[test]
    fn test_local_candidate_matched_by_id_provides_base_fields() {
        let remote = vec![product(1, "Alfa", 100, "images/a.png")];
        // Cache reflects an earlier local edit of the same id.
        let cache = vec![product(1, "Alfa Editada", 150, "images/a.png")];

        let merged = merge_catalog(&remote, &cache, &OverrideMap::new(), &TombstoneSet::new());
        assert_eq!(merged.first().map(|p| p.name.as_str()), Some("Alfa Editada"));
    }

    #[test]
    fn test_name_match_fallback_case_and_whitespace_insensitive() {
        let remote = vec![product(3, "foo", 100, "images/f.png")];
        let cache = vec![product(12, " Foo ", 150, "images/local-f.png")];

        let merged = merge_catalog(&remote, &cache, &OverrideMap::new(), &TombstoneSet::new());
        assert_eq!(merged.len(), 1);
        let item = merged.first().unwrap();
        // Identity comes from the remote record, base fields from the match.
        assert_eq!(item.id, ProductId::new(3));
        assert_eq!(item.name, " Foo ");
        assert_eq!(item.price, price(150));
    }

    #[test]
    fn test_name_matched_candidate_not_duplicated_as_local_only() {
        let remote = vec![product(3, "foo", 100, "images/f.png")];
        let cache = vec![product(12, "Foo", 150, "images/f.png")];

        let merged = merge_catalog(&remote, &cache, &OverrideMap::new(), &TombstoneSet::new());
        assert_eq!(merged.len(), 1);
    }

    #[test]
    fn test_name_match_first_cache_entry_wins() {
        let remote = vec![product(3, "foo", 100, "images/f.png")];
        let cache = vec![
            product(12, "FOO", 150, "images/first.png"),
            product(13, "foo", 175, "images/second.png"),
        ];

        let merged = merge_catalog(&remote, &cache, &OverrideMap::new(), &TombstoneSet::new());
        assert_eq!(merged.first().map(|p| p.price), Some(price(150)));
        // The losing candidate survives as a local-only product.
        assert_eq!(merged.len(), 2);
        assert_eq!(merged.get(1).map(|p| p.id), Some(ProductId::new(13)));
    }

    #[test]
    fn test_consumed_candidate_not_reused_by_id_match() {
        // The name match for remote 5 consumes the cache entry; remote 2 must
        // then fall back to its own fields instead of the consumed entry's.
        let remote = vec![
            product(5, "Foo", 100, "images/f.png"),
            product(2, "Bar", 200, "images/b.png"),
        ];
        let cache = vec![product(2, "Foo", 150, "images/local.png")];

        let merged = merge_catalog(&remote, &cache, &OverrideMap::new(), &TombstoneSet::new());
        assert_eq!(merged.len(), 2);
        let foo = merged.first().unwrap();
        assert_eq!(foo.id, ProductId::new(5));
        assert_eq!(foo.price, price(150));
        let bar = merged.get(1).unwrap();
        assert_eq!(bar.id, ProductId::new(2));
        assert_eq!(bar.name, "Bar");
        assert_eq!(bar.price, price(200));
    }

    #[test]
    fn test_local_only_appended_sorted_by_id() {
        let remote = vec![product(1, "Alfa", 100, "images/a.png")];
        let cache = vec![
            product(30, "Trinta", 300, "images/30.png"),
            product(20, "Vinte", 200, "images/20.png"),
        ];

        let merged = merge_catalog(&remote, &cache, &OverrideMap::new(), &TombstoneSet::new());
        let ids: Vec<i64> = merged.iter().map(|p| p.id.as_i64()).collect();
        assert_eq!(ids, vec![1, 20, 30]);
    }

    #[test]
    fn test_tombstoned_local_only_is_dropped() {
        let cache = vec![product(20, "Vinte", 200, "images/20.png")];
        let removed: TombstoneSet = [ProductId::new(20)].into_iter().collect();

        let merged = merge_catalog(&[], &cache, &OverrideMap::new(), &removed);
        assert!(merged.is_empty());
    }

    #[test]
    fn test_merge_is_idempotent() {
        let remote = vec![
            product(1, "Alfa", 100, "/assets/images/a.PNG"),
            product(2, "Bravo", 200, "images/b.png"),
        ];
        let cache = vec![
            product(1, "Alfa Editada", 150, "images/a.png"),
            product(10, "Local", 500, "images/l.png"),
        ];
        let mut overrides = OverrideMap::new();
        overrides.insert(
            ProductId::new(2),
            ProductPatch {
                name: Some("Bravo Editado".to_owned()),
                ..ProductPatch::default()
            },
        );
        let removed: TombstoneSet = [ProductId::new(99)].into_iter().collect();

        let once = merge_catalog(&remote, &cache, &overrides, &removed);
        let twice = merge_catalog(&remote, &once, &overrides, &removed);
        assert_eq!(once, twice);
    }

    #[test]
    fn test_merged_images_are_normalized() {
        let remote = vec![product(1, "Alfa", 100, "images/a.png")];
        // Bypass the constructor normalization to simulate stale cached state.
        let mut cache = vec![product(1, "Alfa", 100, "images/a.png")];
        if let Some(entry) = cache.first_mut() {
            entry.image = serde_json::from_str("\"/assets/images/a.PNG\"").unwrap();
        }

        let merged = merge_catalog(&remote, &cache, &OverrideMap::new(), &TombstoneSet::new());
        assert_eq!(merged.first().map(|p| p.image.as_str()), Some("images/a.png"));
    }

    #[test]
    fn test_next_product_id() {
        assert_eq!(
            next_product_id(&[], &TombstoneSet::new()),
            ProductId::new(1)
        );
        let list = vec![
            product(3, "A", 100, "images/a.png"),
            product(7, "B", 200, "images/b.png"),
        ];
        assert_eq!(next_product_id(&list, &TombstoneSet::new()), ProductId::new(8));
    }

    #[test]
    fn test_next_product_id_skips_tombstoned_ids() {
        let list = vec![product(1, "A", 100, "images/a.png")];
        let removed: TombstoneSet = [ProductId::new(2)].into_iter().collect();
        assert_eq!(next_product_id(&list, &removed), ProductId::new(3));
    }

    #[test]
    fn test_name_key() {
        assert_eq!(name_key("  Foo Bar "), "foo bar");
        assert_eq!(name_key("FOO"), name_key("foo"));
    }
}
