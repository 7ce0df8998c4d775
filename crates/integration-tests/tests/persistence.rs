//! Integration tests for snapshot persistence.
//!
//! Cart and wishlist state must survive a restart, and the files on disk
//! keep the `cart-storage` / `wishlist-storage` layout.

#![allow(clippy::unwrap_used, clippy::indexing_slicing)]

use std::str::FromStr;

use maison_core::ProductId;
use maison_integration_tests::{TestContext, config, product};
use maison_storefront::AppState;
use rust_decimal::Decimal;
use serde_json::Value;

fn decimal(value: &Value) -> Decimal {
    Decimal::from_str(value.as_str().expect("Money should be a JSON string")).unwrap()
}

// ============================================================================
// Restart
// ============================================================================

#[tokio::test]
async fn test_cart_survives_restart() {
    let mut ctx = TestContext::new();
    ctx.state
        .with_cart(|cart| cart.add_item(product("a", "Widget", 60), 2));

    ctx.restart().await;

    ctx.state.with_cart(|cart| {
        assert_eq!(cart.items().len(), 1);
        assert_eq!(cart.item_count(), 2);
        assert_eq!(cart.subtotal(), Decimal::from(120));
        assert_eq!(cart.total(), Decimal::from(132));
    });
}

#[tokio::test]
async fn test_wishlist_survives_restart() {
    let mut ctx = TestContext::new();
    ctx.state.with_wishlist(|wishlist| {
        wishlist.add_item(product("a", "Widget", 60));
        wishlist.add_item(product("b", "Gadget", 20));
    });

    ctx.restart().await;

    let ids: Vec<String> = ctx.state.with_wishlist(|wishlist| {
        wishlist.items().iter().map(|p| p.id.to_string()).collect()
    });
    assert_eq!(ids, vec!["a", "b"]);
}

#[tokio::test]
async fn test_cleared_cart_restarts_zeroed() {
    let mut ctx = TestContext::new();
    ctx.state.with_cart(|cart| {
        cart.add_item(product("a", "Widget", 20), 1);
        cart.clear_cart();
    });

    ctx.restart().await;

    ctx.state.with_cart(|cart| {
        assert!(cart.is_empty());
        assert_eq!(cart.subtotal(), Decimal::ZERO);
        assert_eq!(cart.shipping(), Decimal::ZERO);
        assert_eq!(cart.total(), Decimal::ZERO);
    });
}

#[tokio::test]
async fn test_immediate_mode_writes_without_flush() {
    let dir = tempfile::tempdir().unwrap();
    let mut config = config(dir.path());
    config.write_behind = false;
    let state = AppState::new(config).unwrap();

    state.with_cart(|cart| cart.add_item(product("a", "Widget", 20), 1));

    assert!(dir.path().join("cart-storage.json").exists());
    state.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_corrupt_snapshot_starts_empty() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("cart-storage.json"), "{not json").unwrap();
    std::fs::write(dir.path().join("wishlist-storage.json"), "[]").unwrap();

    let state = maison_integration_tests::open(dir.path());

    assert!(state.with_cart(|cart| cart.is_empty()));
    assert!(state.with_wishlist(|wishlist| wishlist.is_empty()));
    state.shutdown().await.unwrap();
}

// ============================================================================
// On-disk layout
// ============================================================================

#[tokio::test]
async fn test_cart_snapshot_layout() {
    let ctx = TestContext::new();
    ctx.state
        .with_cart(|cart| cart.add_item(product("a", "Widget", 60), 2));
    ctx.state.flush().await.unwrap();

    let json = ctx.stored_json("cart-storage").expect("Cart was not persisted");

    let items = json["items"].as_array().unwrap();
    assert_eq!(items.len(), 1);
    assert_eq!(items[0]["product"]["id"], "a");
    assert_eq!(items[0]["product"]["name"], "Widget");
    assert_eq!(items[0]["quantity"], 2);

    assert_eq!(decimal(&json["subtotal"]), Decimal::from(120));
    assert_eq!(decimal(&json["tax"]), Decimal::from(12));
    assert_eq!(decimal(&json["shipping"]), Decimal::ZERO);
    assert_eq!(decimal(&json["total"]), Decimal::from(132));
}

#[tokio::test]
async fn test_wishlist_snapshot_layout() {
    let ctx = TestContext::new();
    ctx.state
        .with_wishlist(|wishlist| wishlist.add_item(product("a", "Widget", 60)));
    ctx.state.flush().await.unwrap();

    let json = ctx
        .stored_json("wishlist-storage")
        .expect("Wishlist was not persisted");

    let items = json["items"].as_array().unwrap();
    assert_eq!(items.len(), 1);
    assert_eq!(items[0]["id"], "a");
    assert_eq!(items[0]["inStock"], true);
}

#[tokio::test]
async fn test_restores_numeric_ids_and_number_prices() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(
        dir.path().join("wishlist-storage.json"),
        r#"{"items":[
            {"id":7,"name":"Widget","price":19.5,"category":"test"},
            {"id":"7","name":"Widget again","price":"19.50","category":"test"}
        ]}"#,
    )
    .unwrap();

    let state = maison_integration_tests::open(dir.path());

    state.with_wishlist(|wishlist| {
        assert_eq!(wishlist.len(), 1);
        assert!(wishlist.is_in_wishlist(&ProductId::from(7_u64)));
        assert_eq!(wishlist.items()[0].name, "Widget");
        assert_eq!(wishlist.items()[0].price, Decimal::new(195, 1));
    });
    state.shutdown().await.unwrap();
}
