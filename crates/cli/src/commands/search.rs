//! Search and catalog commands.

use maison_core::ProductSummary;
use maison_storefront::catalog::Catalog;
use maison_storefront::{AppState, Result};

use crate::render;

/// Run a name search with the configured latency and print the matches.
pub async fn run(state: &AppState, query: &str) {
    let search = state.search();
    search.set_query(query);
    search.search(query).await;
    render::search_results(&search.query(), &search.results());
}

/// Print every catalog product.
pub async fn list_catalog(state: &AppState) -> Result<()> {
    let products = state.catalog().products().await?;
    let summaries: Vec<ProductSummary> = products.iter().map(ProductSummary::from).collect();
    render::catalog(&summaries);
    Ok(())
}
