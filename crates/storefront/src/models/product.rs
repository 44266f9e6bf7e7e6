//! Product catalog records.

use jabuticaba_core::{ImagePath, Price, ProductId};
use serde::{Deserialize, Serialize};

/// A catalog product.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    pub price: Price,
    pub image: ImagePath,
}

/// Input for creating a product; the store assigns the id.
#[derive(Debug, Clone)]
pub struct ProductDraft {
    pub name: String,
    pub price: Price,
    /// Raw image path; normalized on creation.
    pub image: String,
}

/// A partial product update.
///
/// Also the persisted override-map value: a patch recorded against a product
/// id is reapplied on every merge, so local edits survive a fresh remote
/// fetch. Absent fields leave the underlying value untouched.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProductPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price: Option<Price>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
}

impl ProductPatch {
    /// Whether the patch changes anything.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.name.is_none() && self.price.is_none() && self.image.is_none()
    }

    /// Layer `later` on top of this patch, field by field.
    pub fn absorb(&mut self, later: Self) {
        if later.name.is_some() {
            self.name = later.name;
        }
        if later.price.is_some() {
            self.price = later.price;
        }
        if later.image.is_some() {
            self.image = later.image;
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;

    fn price(cents: i64) -> Price {
        Price::new(Decimal::new(cents, 2)).unwrap()
    }

    #[test]
    fn test_patch_absorb_later_fields_win() {
        let mut patch = ProductPatch {
            name: Some("old".to_owned()),
            price: Some(price(100)),
            image: None,
        };
        patch.absorb(ProductPatch {
            name: Some("new".to_owned()),
            price: None,
            image: Some("images/a.png".to_owned()),
        });

        assert_eq!(patch.name.as_deref(), Some("new"));
        assert_eq!(patch.price, Some(price(100)));
        assert_eq!(patch.image.as_deref(), Some("images/a.png"));
    }

    #[test]
    fn test_patch_is_empty() {
        assert!(ProductPatch::default().is_empty());
        assert!(!ProductPatch {
            name: Some("x".to_owned()),
            ..ProductPatch::default()
        }
        .is_empty());
    }

    #[test]
    fn test_patch_serde_skips_absent_fields() {
        let patch = ProductPatch {
            price: Some(price(1050)),
            ..ProductPatch::default()
        };
        let json = serde_json::to_string(&patch).unwrap();
        assert_eq!(json, "{\"price\":\"10.50\"}");

        let back: ProductPatch = serde_json::from_str(&json).unwrap();
        assert_eq!(back, patch);
    }
}
