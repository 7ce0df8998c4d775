//! In-memory catalog.

use std::sync::Arc;

use maison_core::Product;
use rust_decimal::Decimal;

use super::{Catalog, CatalogError};

/// Catalog served from a fixed product list.
///
/// `StaticCatalog::default()` is the storefront's mocked luxury collection.
#[derive(Debug, Clone)]
pub struct StaticCatalog {
    products: Arc<[Product]>,
}

impl StaticCatalog {
    /// Create a catalog over `products`.
    #[must_use]
    pub fn new(products: Vec<Product>) -> Self {
        Self {
            products: products.into(),
        }
    }
}

impl Default for StaticCatalog {
    fn default() -> Self {
        Self::new(default_products())
    }
}

impl Catalog for StaticCatalog {
    async fn products(&self) -> Result<Vec<Product>, CatalogError> {
        Ok(self.products.to_vec())
    }
}

fn item(id: &str, name: &str, category: &str, price: i64, tags: &[&str]) -> Product {
    Product::new(id, name, Decimal::from(price))
        .with_category(category)
        .with_image(format!("/images/products/{id}.jpg"))
        .with_tags(tags.iter().copied())
}

fn default_products() -> Vec<Product> {
    vec![
        item("ring-001", "Diamond Solitaire Ring", "rings", 4500, &["diamond", "bridal", "platinum"])
            .with_description("A brilliant-cut diamond set in hand-finished platinum."),
        item("ring-002", "Emerald Cocktail Ring", "rings", 3200, &["emerald", "gold", "statement"])
            .with_description("Colombian emerald framed by a halo of pavé diamonds."),
        item("neck-001", "Pearl Necklace", "necklaces", 1250, &["pearl", "classic"])
            .with_description("Hand-knotted strand of Akoya pearls with a gold clasp."),
        item("neck-002", "Sapphire Pendant", "necklaces", 2100, &["sapphire", "white-gold"])
            .with_description("Ceylon sapphire pendant on a fine white gold chain."),
        item("brac-001", "Gold Tennis Bracelet", "bracelets", 2800, &["gold", "diamond"])
            .with_description("Line bracelet of matched round diamonds in 18k gold."),
        item("earr-001", "Diamond Drop Earrings", "earrings", 1900, &["diamond", "evening"])
            .with_description("Pear-shaped diamonds suspended from platinum hooks."),
        item("watch-001", "Automatic Chronograph Watch", "watches", 8900, &["watch", "steel", "automatic"])
            .with_description("Swiss automatic movement in a brushed steel case."),
        item("bag-001", "Silk Evening Clutch", "accessories", 650, &["silk", "evening"])
            .with_description("Hand-pleated silk clutch with a gilded frame."),
        item("scarf-001", "Cashmere Wrap", "accessories", 95, &["cashmere", "gift"])
            .with_description("Featherweight cashmere wrap, woven in Scotland."),
        item("card-001", "Gift Card", "gifts", 50, &["gift"])
            .with_description("Redeemable across the entire collection."),
    ]
}
