//! Product catalog sources.
//!
//! # Sources
//!
//! - [`StaticCatalog`] - built-in mocked luxury catalog, or any injected list
//! - [`HttpCatalog`] - `Product[]` JSON fetched with `reqwest`, cached via
//!   `moka` (5 minute TTL)
//! - [`CatalogSource`] - runtime choice between the two, picked from config
//!
//! # Example
//!
//! ```rust,ignore
//! use maison_storefront::catalog::{Catalog, StaticCatalog};
//!
//! let catalog = StaticCatalog::default();
//! let products = catalog.products().await?;
//! let ring = catalog.find(&"ring-001".into()).await?;
//! ```

mod fixtures;
mod http;

use std::future::Future;

use maison_core::{Product, ProductId};
use thiserror::Error;

pub use fixtures::StaticCatalog;
pub use http::HttpCatalog;

/// Errors that can occur when loading the catalog.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// HTTP request failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Catalog endpoint returned a non-success status.
    #[error("Catalog returned HTTP {status}: {body}")]
    Status { status: u16, body: String },

    /// JSON parsing failed.
    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),

    /// Catalog cannot serve requests right now.
    #[error("Catalog unavailable: {0}")]
    Unavailable(String),
}

/// A source of catalog products.
pub trait Catalog: Send + Sync {
    /// Fetch every product in the catalog.
    fn products(&self) -> impl Future<Output = Result<Vec<Product>, CatalogError>> + Send;

    /// Look up a single product by id.
    fn find(
        &self,
        id: &ProductId,
    ) -> impl Future<Output = Result<Option<Product>, CatalogError>> + Send {
        async move {
            Ok(self
                .products()
                .await?
                .into_iter()
                .find(|product| &product.id == id))
        }
    }
}

/// Catalog selected at startup.
#[derive(Debug, Clone)]
pub enum CatalogSource {
    Static(StaticCatalog),
    Http(HttpCatalog),
}

impl Catalog for CatalogSource {
    async fn products(&self) -> Result<Vec<Product>, CatalogError> {
        match self {
            Self::Static(catalog) => catalog.products().await,
            Self::Http(catalog) => catalog.products().await,
        }
    }
}

impl From<StaticCatalog> for CatalogSource {
    fn from(catalog: StaticCatalog) -> Self {
        Self::Static(catalog)
    }
}

impl From<HttpCatalog> for CatalogSource {
    fn from(catalog: HttpCatalog) -> Self {
        Self::Http(catalog)
    }
}
