//! Integration tests for the stores working together over the built-in
//! catalog.

#![allow(clippy::unwrap_used, clippy::indexing_slicing)]

use std::time::Duration;

use maison_core::ProductId;
use maison_integration_tests::{TestContext, config, product};
use maison_storefront::AppState;
use maison_storefront::catalog::Catalog;
use rust_decimal::Decimal;

// ============================================================================
// Cart totals
// ============================================================================

#[tokio::test]
async fn test_totals_over_free_shipping_threshold() {
    let ctx = TestContext::new();
    ctx.state
        .with_cart(|cart| cart.add_item(product("a", "Widget", 60), 2));

    ctx.state.with_cart(|cart| {
        assert_eq!(cart.subtotal(), Decimal::from(120));
        assert_eq!(cart.tax(), Decimal::from(12));
        assert_eq!(cart.shipping(), Decimal::ZERO);
        assert_eq!(cart.total(), Decimal::from(132));
    });
}

#[tokio::test]
async fn test_totals_under_free_shipping_threshold() {
    let ctx = TestContext::new();
    ctx.state
        .with_cart(|cart| cart.add_item(product("b", "Gadget", 20), 1));

    ctx.state.with_cart(|cart| {
        assert_eq!(cart.subtotal(), Decimal::from(20));
        assert_eq!(cart.tax(), Decimal::from(2));
        assert_eq!(cart.shipping(), Decimal::from(10));
        assert_eq!(cart.total(), Decimal::from(32));
    });
}

#[tokio::test]
async fn test_catalog_products_in_cart() {
    let ctx = TestContext::new();
    let ring = ctx
        .state
        .catalog()
        .find(&ProductId::new("ring-001"))
        .await
        .unwrap()
        .expect("Built-in catalog should contain ring-001");

    ctx.state.with_cart(|cart| {
        cart.add_item(ring.clone(), 1);
        cart.add_item(ring, 1);
    });

    ctx.state.with_cart(|cart| {
        assert_eq!(cart.items().len(), 1);
        assert_eq!(cart.subtotal(), Decimal::from(9000));
        assert_eq!(cart.tax(), Decimal::from(900));
        assert_eq!(cart.shipping(), Decimal::ZERO);
        assert_eq!(cart.total(), Decimal::from(9900));
    });
}

// ============================================================================
// Wishlist to cart
// ============================================================================

#[tokio::test]
async fn test_move_to_cart_persists_both_stores() {
    let mut ctx = TestContext::new();
    ctx.state
        .with_wishlist(|wishlist| wishlist.add_item(product("a", "Widget", 60)));

    assert!(ctx.state.move_to_cart(&ProductId::new("a")));
    ctx.restart().await;

    assert!(ctx.state.with_wishlist(|wishlist| wishlist.is_empty()));
    let quantity = ctx
        .state
        .with_cart(|cart| cart.get_item(&ProductId::new("a")).map(|i| i.quantity));
    assert_eq!(quantity, Some(1));
}

#[tokio::test]
async fn test_wishlist_dedup() {
    let ctx = TestContext::new();
    ctx.state.with_wishlist(|wishlist| {
        wishlist.add_item(product("a", "Widget", 60));
        wishlist.add_item(product("a", "Widget (renamed)", 70));
    });

    ctx.state.with_wishlist(|wishlist| {
        assert_eq!(wishlist.len(), 1);
        assert_eq!(wishlist.items()[0].name, "Widget");
    });
}

// ============================================================================
// Search
// ============================================================================

#[tokio::test(start_paused = true)]
async fn test_search_ring_over_built_in_catalog() {
    let dir = tempfile::tempdir().unwrap();
    let mut config = config(dir.path());
    config.search_delay = Duration::from_millis(300);
    let state = AppState::new(config).unwrap();

    let search = {
        let state = state.clone();
        tokio::spawn(async move { state.search().search("ring").await })
    };

    tokio::task::yield_now().await;
    assert!(state.search().is_loading());

    tokio::time::advance(Duration::from_millis(300)).await;
    search.await.unwrap();

    let search_state = state.search().snapshot();
    assert!(!search_state.is_loading);

    let mut ids: Vec<String> = search_state
        .results
        .iter()
        .map(|r| r.id.to_string())
        .collect();
    ids.sort();
    // "Earrings" contains "ring" too.
    assert_eq!(ids, vec!["earr-001", "ring-001", "ring-002"]);

    state.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_search_is_case_insensitive() {
    let ctx = TestContext::new();
    ctx.state.search().search("PEARL").await;

    let results = ctx.state.search().results();
    assert_eq!(results.len(), 1);
    assert_eq!(results[0].name, "Pearl Necklace");
    assert_eq!(results[0].price, Decimal::from(1250));
}

#[tokio::test]
async fn test_clear_search_resets_results() {
    let ctx = TestContext::new();
    ctx.state.search().set_query("ring");
    ctx.state.search().search("ring").await;
    assert!(!ctx.state.search().results().is_empty());

    ctx.state.search().clear_search();

    let search_state = ctx.state.search().snapshot();
    assert!(search_state.query.is_empty());
    assert!(search_state.results.is_empty());
    assert!(!search_state.is_loading);
}
