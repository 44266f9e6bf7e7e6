//! Order history and filtering.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use jabuticaba_core::{Email, OrderStatus};

use crate::models::Order;
use crate::store::{StateStore, get_json, keys, set_json};

/// Persisted list of placed orders, oldest first.
pub struct OrderHistory {
    store: Arc<dyn StateStore>,
}

impl OrderHistory {
    pub fn new(store: Arc<dyn StateStore>) -> Self {
        Self { store }
    }

    /// Every order ever placed.
    #[must_use]
    pub fn all(&self) -> Vec<Order> {
        get_json(self.store.as_ref(), keys::ORDERS).unwrap_or_default()
    }

    /// Orders attributed to `email`.
    #[must_use]
    pub fn for_customer(&self, email: &Email) -> Vec<Order> {
        self.all()
            .into_iter()
            .filter(|order| &order.customer_email == email)
            .collect()
    }

    /// Append an order. A malformed persisted list is discarded and the
    /// history restarted with this order.
    pub fn append(&self, order: Order) {
        let mut orders = self.all();
        orders.push(order);
        set_json(self.store.as_ref(), keys::ORDERS, &orders);
    }
}

/// Criteria for narrowing an order list. Empty criteria match everything.
#[derive(Debug, Clone, Default)]
pub struct OrderFilter {
    /// Case-insensitive substring matched against the order number,
    /// customer name, and customer email.
    pub text: Option<String>,
    pub status: Option<OrderStatus>,
    /// Inclusive lower bound on the placement time.
    pub from: Option<DateTime<Utc>>,
    /// Inclusive upper bound on the placement time.
    pub to: Option<DateTime<Utc>>,
}

impl OrderFilter {
    fn matches(&self, order: &Order) -> bool {
        if let Some(text) = &self.text {
            let needle = text.trim().to_lowercase();
            if !needle.is_empty() {
                let hit = order.number.to_lowercase().contains(&needle)
                    || order.customer_name.to_lowercase().contains(&needle)
                    || order.customer_email.as_ref().contains(&needle);
                if !hit {
                    return false;
                }
            }
        }
        if let Some(status) = self.status {
            if order.status != status {
                return false;
            }
        }
        if let Some(from) = self.from {
            if order.created_at < from {
                return false;
            }
        }
        if let Some(to) = self.to {
            if order.created_at > to {
                return false;
            }
        }
        true
    }
}

/// Narrow `orders` to those matching `filter`, preserving order.
#[must_use]
pub fn filter_orders(orders: &[Order], filter: &OrderFilter) -> Vec<Order> {
    orders
        .iter()
        .filter(|order| filter.matches(order))
        .cloned()
        .collect()
}
