//! Shopping cart.

use std::sync::Arc;

use jabuticaba_core::ProductId;
use rust_decimal::Decimal;

use crate::models::{CartLine, Product};
use crate::store::{StateStore, get_json, keys, set_json};

/// The persisted cart.
///
/// Lines are product snapshots taken at add time, so later catalog edits do
/// not reprice an open cart. Every mutation rewrites the running total
/// alongside the lines.
pub struct CartStore {
    store: Arc<dyn StateStore>,
}

impl CartStore {
    pub fn new(store: Arc<dyn StateStore>) -> Self {
        Self { store }
    }

    /// Current cart contents, oldest line first.
    #[must_use]
    pub fn lines(&self) -> Vec<CartLine> {
        get_json(self.store.as_ref(), keys::CART).unwrap_or_default()
    }

    /// Sum of line totals.
    #[must_use]
    pub fn subtotal(&self) -> Decimal {
        Self::total_of(&self.lines())
    }

    fn total_of(lines: &[CartLine]) -> Decimal {
        lines.iter().map(CartLine::line_total).sum()
    }

    fn persist(&self, lines: &[CartLine]) {
        set_json(self.store.as_ref(), keys::CART, lines);
        self.store
            .set(keys::CART_TOTAL, &format!("{:.2}", Self::total_of(lines)));
    }

    /// Add one unit of `product`, incrementing an existing line or
    /// snapshotting a new one.
    pub fn add(&self, product: &Product) {
        let mut lines = self.lines();
        match lines.iter_mut().find(|l| l.product_id == product.id) {
            Some(line) => line.quantity += 1,
            None => lines.push(CartLine {
                product_id: product.id,
                name: Some(product.name.clone()),
                image: Some(product.image.clone()),
                price: Some(product.price),
                quantity: 1,
            }),
        }
        self.persist(&lines);
    }

    /// Adjust a line's quantity by `delta`; at or below zero the line is
    /// removed. Unknown ids are ignored.
    pub fn adjust(&self, id: ProductId, delta: i32) {
        let mut lines = self.lines();
        let Some(line) = lines.iter_mut().find(|l| l.product_id == id) else {
            return;
        };
        let quantity = i64::from(line.quantity) + i64::from(delta);
        if quantity <= 0 {
            lines.retain(|l| l.product_id != id);
        } else {
            line.quantity = u32::try_from(quantity).unwrap_or(u32::MAX);
        }
        self.persist(&lines);
    }

    /// Set a line's quantity outright; zero removes it. Unknown ids are
    /// ignored.
    pub fn set_quantity(&self, id: ProductId, quantity: u32) {
        let mut lines = self.lines();
        let Some(line) = lines.iter_mut().find(|l| l.product_id == id) else {
            return;
        };
        if quantity == 0 {
            lines.retain(|l| l.product_id != id);
        } else {
            line.quantity = quantity;
        }
        self.persist(&lines);
    }

    /// Remove a line entirely.
    pub fn remove(&self, id: ProductId) {
        let mut lines = self.lines();
        let before = lines.len();
        lines.retain(|l| l.product_id != id);
        if lines.len() != before {
            self.persist(&lines);
        }
    }

    /// Empty the cart and reset the total.
    pub fn clear(&self) {
        self.persist(&[]);
    }
}
