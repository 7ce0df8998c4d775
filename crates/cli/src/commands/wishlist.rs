//! Wishlist commands.

use maison_core::ProductId;
use maison_storefront::{AppError, AppState, Result};
use tracing::info;

use crate::render;

/// Save a catalog product to the wishlist.
pub async fn add(state: &AppState, product_id: &str) -> Result<()> {
    let product = super::find_product(state, product_id).await?;
    info!(product_id, "Saving to wishlist");

    let items = state.with_wishlist(|wishlist| {
        wishlist.add_item(product);
        wishlist.items().to_vec()
    });
    render::wishlist(&items);
    Ok(())
}

pub fn remove(state: &AppState, product_id: &str) {
    let id = ProductId::new(product_id);
    let items = state.with_wishlist(|wishlist| {
        wishlist.remove_item(&id);
        wishlist.items().to_vec()
    });
    render::wishlist(&items);
}

/// Move a saved product into the cart.
///
/// Fails with `NotFound` if the product is not on the wishlist.
pub fn move_to_cart(state: &AppState, product_id: &str) -> Result<()> {
    let id = ProductId::new(product_id);
    if !state.move_to_cart(&id) {
        return Err(AppError::NotFound(format!("wishlist item {id}")));
    }
    render::cart(&state.with_cart(|cart| cart.snapshot()));
    Ok(())
}

pub fn clear(state: &AppState) {
    let items = state.with_wishlist(|wishlist| {
        wishlist.clear_wishlist();
        wishlist.items().to_vec()
    });
    render::wishlist(&items);
}

pub fn show(state: &AppState) {
    render::wishlist(&state.with_wishlist(|wishlist| wishlist.items().to_vec()));
}
