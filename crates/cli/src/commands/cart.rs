//! Cart commands.

use jabuticaba_core::ProductId;
use jabuticaba_storefront::cart::CartStore;
use thiserror::Error;

use super::Context;

/// Errors that can occur during cart operations.
#[derive(Debug, Error)]
pub enum CartError {
    /// No product with the given id in the catalog.
    #[error("No product with id {0}")]
    NotFound(i64),
}

/// Print the cart, one line per product, with the running total.
#[allow(clippy::print_stdout)]
pub fn show(ctx: &Context) {
    let cart = CartStore::new(ctx.store.clone());
    let lines = cart.lines();
    if lines.is_empty() {
        println!("Cart is empty.");
        return;
    }
    for line in &lines {
        println!(
            "{:>5}  {:<32}  x{:<4}  R$ {:>9.2}",
            line.product_id,
            line.name.as_deref().unwrap_or("(unnamed)"),
            line.quantity,
            line.line_total()
        );
    }
    println!("Total: R$ {:.2}", cart.subtotal());
}

/// Add one unit of a catalog product to the cart.
#[allow(clippy::print_stdout)]
pub async fn add(ctx: &Context, id: i64) -> Result<(), CartError> {
    let product = ctx
        .catalog
        .get(ProductId::new(id))
        .await
        .ok_or(CartError::NotFound(id))?;

    let cart = CartStore::new(ctx.store.clone());
    cart.add(&product);
    println!("Added {} (total R$ {:.2})", product.name, cart.subtotal());
    Ok(())
}

/// Set a line's quantity; zero removes the line.
#[allow(clippy::print_stdout)]
pub fn set(ctx: &Context, id: i64, quantity: u32) {
    let cart = CartStore::new(ctx.store.clone());
    cart.set_quantity(ProductId::new(id), quantity);
    println!("Total: R$ {:.2}", cart.subtotal());
}

/// Remove a line from the cart.
#[allow(clippy::print_stdout)]
pub fn remove(ctx: &Context, id: i64) {
    let cart = CartStore::new(ctx.store.clone());
    cart.remove(ProductId::new(id));
    println!("Total: R$ {:.2}", cart.subtotal());
}
