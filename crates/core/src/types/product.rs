//! Catalog product types.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::id::ProductId;

/// A catalog product.
///
/// The cart and wishlist store products by value: a line item keeps the
/// product exactly as it looked when it was added.
///
/// Matches the `Product[]` JSON returned by catalog endpoints
/// (`{id, name, description, price, images, category, tags, inStock,
/// stockQuantity, createdAt, updatedAt}`). Only `id`, `name` and `price` are
/// required.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    #[serde(default)]
    pub description: String,
    /// Unit price, currency-agnostic and non-negative.
    pub price: Decimal,
    #[serde(default)]
    pub images: Vec<String>,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default = "default_in_stock")]
    pub in_stock: bool,
    #[serde(default)]
    pub stock_quantity: Option<u32>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

const fn default_in_stock() -> bool {
    true
}

impl Product {
    /// Create an in-stock product with only the required fields set.
    #[must_use]
    pub fn new(id: impl Into<ProductId>, name: impl Into<String>, price: Decimal) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            description: String::new(),
            price,
            images: Vec::new(),
            category: String::new(),
            tags: Vec::new(),
            in_stock: true,
            stock_quantity: None,
            created_at: None,
            updated_at: None,
        }
    }

    /// Set the category.
    #[must_use]
    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = category.into();
        self
    }

    /// Set the description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Append an image URL.
    #[must_use]
    pub fn with_image(mut self, url: impl Into<String>) -> Self {
        self.images.push(url.into());
        self
    }

    /// Replace the tag list.
    #[must_use]
    pub fn with_tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tags = tags.into_iter().map(Into::into).collect();
        self
    }

    /// First image, used as the thumbnail.
    #[must_use]
    pub fn primary_image(&self) -> Option<&str> {
        self.images.first().map(String::as_str)
    }
}

/// Lightweight product view returned by search.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductSummary {
    pub id: ProductId,
    pub name: String,
    pub category: String,
    pub price: Decimal,
    pub image: Option<String>,
}

impl From<&Product> for ProductSummary {
    fn from(product: &Product) -> Self {
        Self {
            id: product.id.clone(),
            name: product.name.clone(),
            category: product.category.clone(),
            price: product.price,
            image: product.primary_image().map(String::from),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_full_catalog_entry() {
        let json = r#"{
            "id": 7,
            "name": "Diamond Ring",
            "description": "Platinum solitaire",
            "price": 4500,
            "images": ["/img/ring.jpg", "/img/ring-side.jpg"],
            "category": "rings",
            "tags": ["diamond", "bridal"],
            "inStock": false,
            "stockQuantity": 0,
            "createdAt": "2024-01-15T10:00:00Z",
            "updatedAt": "2024-02-01T08:30:00Z"
        }"#;

        let product: Product = serde_json::from_str(json).unwrap();
        assert_eq!(product.id, ProductId::new("7"));
        assert_eq!(product.price, Decimal::from(4500));
        assert_eq!(product.primary_image(), Some("/img/ring.jpg"));
        assert!(!product.in_stock);
        assert_eq!(product.stock_quantity, Some(0));
        assert!(product.created_at.is_some());
    }

    #[test]
    fn test_deserialize_minimal_entry_uses_defaults() {
        let json = r#"{"id": "p-1", "name": "Pearl Necklace", "price": "1250.50"}"#;

        let product: Product = serde_json::from_str(json).unwrap();
        assert_eq!(product.price, Decimal::new(125_050, 2));
        assert!(product.in_stock);
        assert!(product.images.is_empty());
        assert!(product.tags.is_empty());
        assert_eq!(product.updated_at, None);
    }

    #[test]
    fn test_serialize_uses_camel_case() {
        let product = Product::new("p-2", "Silk Scarf", Decimal::from(180));
        let value = serde_json::to_value(&product).unwrap();
        assert!(value.get("inStock").is_some());
        assert!(value.get("stockQuantity").is_some());
        assert!(value.get("in_stock").is_none());
    }

    #[test]
    fn test_summary_from_product() {
        let product = Product::new("p-3", "Emerald Ring", Decimal::from(3200))
            .with_category("rings")
            .with_image("/img/emerald.jpg")
            .with_image("/img/emerald-2.jpg");

        let summary = ProductSummary::from(&product);
        assert_eq!(summary.id, product.id);
        assert_eq!(summary.category, "rings");
        assert_eq!(summary.image.as_deref(), Some("/img/emerald.jpg"));
    }
}
