//! Catalog management commands.

use jabuticaba_core::{Price, PriceParseError, ProductId};
use jabuticaba_storefront::models::{ProductDraft, ProductPatch};
use thiserror::Error;

use super::Context;

/// Errors that can occur during product operations.
#[derive(Debug, Error)]
pub enum ProductError {
    /// Price argument did not parse as a non-negative decimal.
    #[error("Invalid price: {0}")]
    InvalidPrice(#[from] PriceParseError),

    /// No product with the given id.
    #[error("No product with id {0}")]
    NotFound(i64),
}

/// Print the current catalog, one product per line.
#[allow(clippy::print_stdout)]
pub async fn list(ctx: &Context) {
    let products = ctx.catalog.list().await;
    if products.is_empty() {
        println!("No products.");
        return;
    }
    for product in products {
        println!(
            "{:>5}  {:<32}  R$ {:>9}  {}",
            product.id, product.name, product.price, product.image
        );
    }
}

/// Create a local product.
#[allow(clippy::print_stdout)]
pub async fn add(ctx: &Context, name: &str, price: &str, image: String) -> Result<(), ProductError> {
    let price: Price = price.parse()?;
    let product = ctx
        .catalog
        .create(ProductDraft {
            name: name.to_owned(),
            price,
            image,
        })
        .await;
    println!("Created product {} ({})", product.id, product.name);
    Ok(())
}

/// Edit a product's name, price, or image.
#[allow(clippy::print_stdout)]
pub async fn edit(
    ctx: &Context,
    id: i64,
    name: Option<String>,
    price: Option<&str>,
    image: Option<String>,
) -> Result<(), ProductError> {
    let price = price.map(str::parse).transpose()?;
    let patch = ProductPatch { name, price, image };

    match ctx.catalog.edit(ProductId::new(id), patch).await {
        Some(product) => {
            println!(
                "Updated product {}: {} @ R$ {}",
                product.id, product.name, product.price
            );
            Ok(())
        }
        None => Err(ProductError::NotFound(id)),
    }
}

/// Remove a product.
#[allow(clippy::print_stdout)]
pub async fn remove(ctx: &Context, id: i64) {
    ctx.catalog.delete(ProductId::new(id)).await;
    println!("Removed product {id}");
}
