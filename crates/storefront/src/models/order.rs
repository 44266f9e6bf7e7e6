//! Order records.

use chrono::{DateTime, Utc};
use jabuticaba_core::{Email, ImagePath, OrderId, OrderStatus, Price, ProductId};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// One line of a placed order. Unlike a cart line every field is resolved.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderItem {
    pub product_id: ProductId,
    pub name: String,
    pub image: ImagePath,
    pub price: Price,
    pub quantity: u32,
}

/// A placed order. Immutable once created; checkout is the only writer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    pub id: OrderId,
    pub number: String,
    pub customer_name: String,
    pub customer_email: Email,
    pub created_at: DateTime<Utc>,
    pub status: OrderStatus,
    pub items: Vec<OrderItem>,
    pub subtotal: Decimal,
    pub freight: Decimal,
    pub total: Decimal,
}

impl Order {
    /// Total number of units across all items.
    #[must_use]
    pub fn item_count(&self) -> u32 {
        self.items.iter().map(|item| item.quantity).sum()
    }
}
