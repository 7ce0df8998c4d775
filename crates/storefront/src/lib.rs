//! Maison Storefront library.
//!
//! Client-side state for the Maison luxury storefront: the cart with its
//! derived totals, the wishlist, and catalog search.
//!
//! # Architecture
//!
//! - [`stores`] - the three state containers
//! - [`storage`] - snapshot persistence (memory or JSON files, inline or
//!   write-behind)
//! - [`catalog`] - built-in mock catalog or a remote `Product[]` endpoint
//! - [`state`] - `AppState`, which owns everything above
//!
//! # Example
//!
//! ```rust,ignore
//! use maison_storefront::{AppState, StorefrontConfig};
//!
//! let state = AppState::new(StorefrontConfig::from_env()?)?;
//! state.with_cart(|cart| cart.add_item(product, 1));
//! state.search().search("ring").await;
//! state.shutdown().await?;
//! ```

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod catalog;
pub mod config;
pub mod error;
pub mod state;
pub mod storage;
pub mod stores;

pub use config::StorefrontConfig;
pub use error::{AppError, Result};
pub use state::AppState;
