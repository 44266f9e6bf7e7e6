//! Order placement.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use jabuticaba_core::{ImagePath, OrderId, OrderStatus, Price};
use rust_decimal::Decimal;

use crate::cart::CartStore;
use crate::catalog::{CatalogSource, CatalogStore};
use crate::models::{CartLine, Order, OrderItem, Product, Session};
use crate::orders::OrderHistory;
use crate::store::{StateStore, get_json, keys, set_json};

/// Name used for an order line when neither the snapshot nor the catalog
/// knows the product.
const FALLBACK_ITEM_NAME: &str = "Produto";

/// Name used when the session carries a blank customer name.
const FALLBACK_CUSTOMER_NAME: &str = "Cliente";

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum CheckoutError {
    #[error("cart is empty")]
    CartEmpty,
    #[error("no customer is signed in")]
    NotSignedIn,
}

/// Order number for an order placed `at` with the given daily-independent
/// sequence value: the date as `yymmdd` followed by the zero-padded
/// sequence. Sequence values are never reused, so numbers are unique even
/// for orders placed in the same millisecond.
#[must_use]
pub fn order_number(at: DateTime<Utc>, sequence: u64) -> String {
    format!("{}{:04}", at.format("%y%m%d"), sequence)
}

/// Build an order from the cart, resolving each line against the catalog.
///
/// Missing snapshot fields fall back to the catalog entry, then to
/// placeholders: [`FALLBACK_ITEM_NAME`], the checkout placeholder image, and
/// a zero price. Totals are exact decimal sums; `total = subtotal + freight`.
#[must_use]
pub fn derive_order(
    lines: &[CartLine],
    catalog: &[Product],
    customer: &Session,
    freight: Decimal,
    created_at: DateTime<Utc>,
    number: String,
) -> Order {
    let items: Vec<OrderItem> = lines
        .iter()
        .map(|line| {
            let known = catalog.iter().find(|p| p.id == line.product_id);
            OrderItem {
                product_id: line.product_id,
                name: line
                    .name
                    .clone()
                    .or_else(|| known.map(|p| p.name.clone()))
                    .unwrap_or_else(|| FALLBACK_ITEM_NAME.to_owned()),
                image: line
                    .image
                    .clone()
                    .or_else(|| known.map(|p| p.image.clone()))
                    .unwrap_or_else(ImagePath::checkout_placeholder),
                price: line
                    .price
                    .or_else(|| known.map(|p| p.price))
                    .unwrap_or(Price::ZERO),
                quantity: line.quantity,
            }
        })
        .collect();

    let subtotal: Decimal = items
        .iter()
        .map(|item| item.price.amount() * Decimal::from(item.quantity))
        .sum();

    let customer_name = if customer.name.trim().is_empty() {
        FALLBACK_CUSTOMER_NAME.to_owned()
    } else {
        customer.name.clone()
    };

    Order {
        id: OrderId::from_number(&number),
        number,
        customer_name,
        customer_email: customer.email.clone(),
        created_at,
        status: OrderStatus::Processing,
        items,
        subtotal,
        freight,
        total: subtotal + freight,
    }
}

/// The checkout flow: session + cart + catalog in, a persisted order out.
pub struct Checkout {
    store: Arc<dyn StateStore>,
}

impl Checkout {
    pub fn new(store: Arc<dyn StateStore>) -> Self {
        Self { store }
    }

    fn next_sequence(&self) -> u64 {
        let next = get_json::<u64>(self.store.as_ref(), keys::ORDER_SEQUENCE).unwrap_or(0) + 1;
        set_json(self.store.as_ref(), keys::ORDER_SEQUENCE, &next);
        next
    }

    /// Place an order for the signed-in customer from the current cart.
    ///
    /// On success the order is appended to the history, the cart emptied,
    /// and the running total reset.
    pub async fn place_order<S: CatalogSource>(
        &self,
        catalog: &CatalogStore<S>,
        freight: Decimal,
    ) -> Result<Order, CheckoutError> {
        let session: Session = get_json(self.store.as_ref(), keys::SESSION)
            .ok_or(CheckoutError::NotSignedIn)?;

        let cart = CartStore::new(self.store.clone());
        let lines = cart.lines();
        if lines.is_empty() {
            return Err(CheckoutError::CartEmpty);
        }

        let products = catalog.list().await;
        let now = Utc::now();
        let number = order_number(now, self.next_sequence());
        let order = derive_order(&lines, &products, &session, freight, now, number);

        tracing::info!(
            number = %order.number,
            items = order.items.len(),
            total = %order.total,
            "placing order"
        );

        OrderHistory::new(self.store.clone()).append(order.clone());
        cart.clear();
        Ok(order)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use jabuticaba_core::{Email, ProductId, UserRole};

    fn session() -> Session {
        Session {
            name: "Maria".to_owned(),
            email: Email::parse("maria@example.com").unwrap(),
            role: UserRole::Customer,
        }
    }

    fn line(id: i64, cents: i64, quantity: u32) -> CartLine {
        CartLine {
            product_id: ProductId::new(id),
            name: Some(format!("Produto {id}")),
            image: Some(ImagePath::normalize("images/p.png")),
            price: Some(Price::new(Decimal::new(cents, 2)).unwrap()),
            quantity,
        }
    }

    #[test]
    fn test_order_number_format() {
        let at = "2026-08-25T10:30:00Z".parse().unwrap();
        assert_eq!(order_number(at, 7), "2608250007");
        assert_eq!(order_number(at, 12345), "26082512345");
    }

    #[test]
    fn test_totals_are_exact() {
        // 2 x 10.00 + 1 x 5.00 with freight 3.00.
        let lines = vec![line(1, 1000, 2), line(2, 500, 1)];
        let order = derive_order(
            &lines,
            &[],
            &session(),
            Decimal::new(300, 2),
            Utc::now(),
            "2608250001".to_owned(),
        );
        assert_eq!(order.subtotal, Decimal::new(2500, 2));
        assert_eq!(order.total, Decimal::new(2800, 2));
        assert_eq!(order.status, OrderStatus::Processing);
        assert_eq!(order.id.as_str(), "p-2608250001");
    }

    #[test]
    fn test_missing_fields_resolved_from_catalog() {
        let lines = vec![CartLine {
            product_id: ProductId::new(1),
            name: None,
            image: None,
            price: None,
            quantity: 2,
        }];
        let catalog = vec![Product {
            id: ProductId::new(1),
            name: "Alfa".to_owned(),
            price: Price::new(Decimal::new(750, 2)).unwrap(),
            image: ImagePath::normalize("images/a.png"),
        }];

        let order = derive_order(
            &lines,
            &catalog,
            &session(),
            Decimal::ZERO,
            Utc::now(),
            "2608250001".to_owned(),
        );
        let item = order.items.first().unwrap();
        assert_eq!(item.name, "Alfa");
        assert_eq!(item.image.as_str(), "images/a.png");
        assert_eq!(order.subtotal, Decimal::new(1500, 2));
    }

    #[test]
    fn test_unknown_product_gets_placeholders() {
        let lines = vec![CartLine {
            product_id: ProductId::new(99),
            name: None,
            image: None,
            price: None,
            quantity: 1,
        }];

        let order = derive_order(
            &lines,
            &[],
            &session(),
            Decimal::ZERO,
            Utc::now(),
            "2608250001".to_owned(),
        );
        let item = order.items.first().unwrap();
        assert_eq!(item.name, FALLBACK_ITEM_NAME);
        assert_eq!(item.image, ImagePath::checkout_placeholder());
        assert_eq!(item.price, Price::ZERO);
        assert_eq!(order.total, Decimal::ZERO);
    }

    #[test]
    fn test_blank_customer_name_falls_back() {
        let customer = Session {
            name: "   ".to_owned(),
            ..session()
        };
        let order = derive_order(
            &[line(1, 100, 1)],
            &[],
            &customer,
            Decimal::ZERO,
            Utc::now(),
            "2608250001".to_owned(),
        );
        assert_eq!(order.customer_name, FALLBACK_CUSTOMER_NAME);
    }
}
