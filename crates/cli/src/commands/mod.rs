//! Command implementations.

pub mod cart;
pub mod search;
pub mod wishlist;

use maison_core::{Product, ProductId};
use maison_storefront::catalog::Catalog;
use maison_storefront::{AppError, AppState, Result};

/// Resolve a product id against the configured catalog.
async fn find_product(state: &AppState, product_id: &str) -> Result<Product> {
    let id = ProductId::new(product_id);
    state
        .catalog()
        .find(&id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("product {id}")))
}
