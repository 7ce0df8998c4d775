//! Maison Core - Shared types library.
//!
//! This crate provides the types shared by every Maison component:
//! - `storefront` - Cart, wishlist and search state stores
//! - `cli` - Command-line front end over the stores
//!
//! # Architecture
//!
//! The core crate contains only types - no I/O, no storage access,
//! no HTTP clients. This keeps it lightweight and allows it to be used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Product identifiers, products, and decimal prices

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
