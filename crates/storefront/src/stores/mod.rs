//! Client-side state containers.
//!
//! - [`CartStore`] - line items and derived totals, persisted
//! - [`WishlistStore`] - saved products, persisted
//! - [`SearchStore`] - query and results over a catalog, ephemeral
//!
//! The stores are independent. They share only the [`maison_core::Product`]
//! shape; combined flows like "move to cart" live on
//! [`AppState`](crate::state::AppState).

pub mod cart;
pub mod search;
pub mod wishlist;

pub use cart::{CART_STORAGE_KEY, CartItem, CartSnapshot, CartStore, CartTotals};
pub use search::{DEFAULT_SEARCH_DELAY, SearchState, SearchStore};
pub use wishlist::{WISHLIST_STORAGE_KEY, WishlistSnapshot, WishlistStore};
