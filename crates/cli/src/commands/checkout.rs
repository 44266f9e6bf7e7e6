//! Checkout command.

use jabuticaba_storefront::checkout::{Checkout, CheckoutError};
use jabuticaba_storefront::store::{StateStore, keys};
use rust_decimal::Decimal;
use thiserror::Error;

use super::Context;

/// Errors that can occur while placing an order.
#[derive(Debug, Error)]
pub enum PlaceError {
    /// Freight argument did not parse as a decimal.
    #[error("Invalid freight: {0}")]
    InvalidFreight(String),

    /// The storefront rejected the checkout.
    #[error(transparent)]
    Checkout(#[from] CheckoutError),
}

/// Freight for this order: the explicit argument, else the stored default,
/// else the configured default.
fn resolve_freight(ctx: &Context, arg: Option<&str>) -> Result<Decimal, PlaceError> {
    if let Some(raw) = arg {
        let freight = raw
            .trim()
            .parse()
            .map_err(|_| PlaceError::InvalidFreight(raw.to_owned()))?;
        // Remember the choice for the next checkout.
        ctx.store.set(keys::DEFAULT_FREIGHT, raw.trim());
        return Ok(freight);
    }
    let stored = ctx
        .store
        .get(keys::DEFAULT_FREIGHT)
        .and_then(|raw| raw.trim().parse().ok());
    Ok(stored.unwrap_or(ctx.config.default_freight))
}

/// Place an order from the current cart.
#[allow(clippy::print_stdout)]
pub async fn place(ctx: &Context, freight: Option<&str>) -> Result<(), PlaceError> {
    let freight = resolve_freight(ctx, freight)?;

    let checkout = Checkout::new(ctx.store.clone());
    let order = checkout.place_order(&ctx.catalog, freight).await?;

    println!("Order {} placed for {}", order.number, order.customer_name);
    for item in &order.items {
        println!("  {:<32} x{:<4} R$ {:>9}", item.name, item.quantity, item.price);
    }
    println!("Subtotal: R$ {:.2}", order.subtotal);
    println!("Freight:  R$ {:.2}", order.freight);
    println!("Total:    R$ {:.2}", order.total);
    Ok(())
}
