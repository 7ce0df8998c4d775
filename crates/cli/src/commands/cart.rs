//! Cart commands.

use maison_core::ProductId;
use maison_storefront::{AppState, Result};
use tracing::info;

use crate::render;

/// Add `quantity` of a catalog product to the cart.
pub async fn add(state: &AppState, product_id: &str, quantity: i64) -> Result<()> {
    let product = super::find_product(state, product_id).await?;
    info!(product_id, quantity, "Adding to cart");

    let snapshot = state.with_cart(|cart| {
        cart.add_item(product, quantity);
        cart.snapshot()
    });
    render::cart(&snapshot);
    Ok(())
}

pub fn remove(state: &AppState, product_id: &str) {
    let id = ProductId::new(product_id);
    let snapshot = state.with_cart(|cart| {
        cart.remove_item(&id);
        cart.snapshot()
    });
    render::cart(&snapshot);
}

pub fn update(state: &AppState, product_id: &str, quantity: i64) {
    let id = ProductId::new(product_id);
    let snapshot = state.with_cart(|cart| {
        cart.update_quantity(&id, quantity);
        cart.snapshot()
    });
    render::cart(&snapshot);
}

pub fn clear(state: &AppState) {
    let snapshot = state.with_cart(|cart| {
        cart.clear_cart();
        cart.snapshot()
    });
    render::cart(&snapshot);
}

pub fn show(state: &AppState) {
    render::cart(&state.with_cart(|cart| cart.snapshot()));
}
