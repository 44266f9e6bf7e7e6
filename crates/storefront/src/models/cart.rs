//! Cart snapshot shapes.

use jabuticaba_core::{ImagePath, Price, ProductId};
use serde::{Deserialize, Serialize};

/// One line of the persisted cart.
///
/// Name, price, and image are snapshots taken when the product was added;
/// any of them may be absent (older carts, products added by id alone) and
/// is then back-filled from the catalog at checkout time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartLine {
    pub product_id: ProductId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<ImagePath>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price: Option<Price>,
    #[serde(default = "default_quantity")]
    pub quantity: u32,
}

const fn default_quantity() -> u32 {
    1
}

impl CartLine {
    /// Line total: snapshot price (or zero) times quantity.
    #[must_use]
    pub fn line_total(&self) -> rust_decimal::Decimal {
        self.price.unwrap_or(Price::ZERO).amount() * rust_decimal::Decimal::from(self.quantity)
    }
}
