//! Integration tests for Jabuticaba.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p jabuticaba-integration-tests
//! ```
//!
//! # Test Categories
//!
//! - `storefront_flow` - Register, shop, check out, browse orders
//! - `catalog_admin` - Local catalog management over a remote source
//! - `offline` - Behavior when the catalog source is unreachable
//!
//! Tests run against an in-memory or temp-file state store and a scripted
//! catalog source; no network or external services are required.

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::sync::Mutex;

use jabuticaba_core::{ImagePath, Price, ProductId};
use jabuticaba_storefront::catalog::{CatalogSource, SourceError};
use jabuticaba_storefront::models::Product;
use rust_decimal::Decimal;

/// A catalog source serving scripted responses, one per fetch; the final
/// response repeats. `Err` entries reproduce an unreachable endpoint.
pub struct ScriptedSource {
    responses: Mutex<Vec<Result<Vec<Product>, ()>>>,
}

impl ScriptedSource {
    #[must_use]
    pub fn new(responses: Vec<Result<Vec<Product>, ()>>) -> Self {
        Self {
            responses: Mutex::new(responses),
        }
    }

    /// A source that always serves `products`.
    #[must_use]
    pub fn serving(products: Vec<Product>) -> Self {
        Self::new(vec![Ok(products)])
    }

    /// A source that always fails.
    #[must_use]
    pub fn unreachable() -> Self {
        Self::new(vec![Err(())])
    }
}

impl CatalogSource for ScriptedSource {
    async fn fetch(&self) -> Result<Vec<Product>, SourceError> {
        let next = {
            let Ok(mut responses) = self.responses.lock() else {
                return Err(parse_error());
            };
            if responses.len() > 1 {
                responses.remove(0)
            } else {
                responses.first().cloned().unwrap_or(Err(()))
            }
        };
        next.map_err(|()| parse_error())
    }
}

#[allow(clippy::unwrap_used)]
fn parse_error() -> SourceError {
    SourceError::Parse(serde_json::from_str::<Vec<Product>>("!").unwrap_err())
}

/// A catalog product with a price given in cents.
#[must_use]
#[allow(clippy::unwrap_used)]
pub fn product(id: i64, name: &str, cents: i64) -> Product {
    Product {
        id: ProductId::new(id),
        name: name.to_owned(),
        price: Price::new(Decimal::new(cents, 2)).unwrap(),
        image: ImagePath::normalize("images/p.png"),
    }
}
