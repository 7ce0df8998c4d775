//! Catalog fetched from an HTTP endpoint returning `Product[]` JSON.

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use maison_core::Product;
use moka::future::Cache;
use tracing::{debug, instrument};
use url::Url;

use super::{Catalog, CatalogError};

/// Longest response excerpt kept in errors and logs.
const BODY_EXCERPT_CHARS: usize = 200;

/// Client for a JSON catalog endpoint.
///
/// The product list is cached for 5 minutes.
#[derive(Clone)]
pub struct HttpCatalog {
    inner: Arc<HttpCatalogInner>,
}

struct HttpCatalogInner {
    client: reqwest::Client,
    endpoint: Url,
    cache: Cache<String, Arc<Vec<Product>>>,
}

impl fmt::Debug for HttpCatalog {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HttpCatalog")
            .field("endpoint", &self.inner.endpoint.as_str())
            .finish_non_exhaustive()
    }
}

impl HttpCatalog {
    /// Create a new catalog client for `endpoint`.
    #[must_use]
    pub fn new(endpoint: Url) -> Self {
        let cache = Cache::builder()
            .max_capacity(16)
            .time_to_live(Duration::from_secs(300)) // 5 minutes
            .build();

        Self {
            inner: Arc::new(HttpCatalogInner {
                client: reqwest::Client::new(),
                endpoint,
                cache,
            }),
        }
    }

    /// Catalog endpoint URL.
    #[must_use]
    pub fn endpoint(&self) -> &Url {
        &self.inner.endpoint
    }

    /// Drop the cached product list so the next call refetches.
    pub async fn invalidate(&self) {
        self.inner
            .cache
            .invalidate(self.inner.endpoint.as_str())
            .await;
    }

    async fn fetch(&self) -> Result<Vec<Product>, CatalogError> {
        let response = self
            .inner
            .client
            .get(self.inner.endpoint.clone())
            .header("Accept", "application/json")
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            tracing::error!(
                status = %status,
                body = %excerpt(&body),
                "Catalog endpoint returned non-success status"
            );
            return Err(CatalogError::Status {
                status: status.as_u16(),
                body: excerpt(&body),
            });
        }

        decode_products(&body)
    }
}

impl Catalog for HttpCatalog {
    #[instrument(skip(self), fields(endpoint = %self.inner.endpoint))]
    async fn products(&self) -> Result<Vec<Product>, CatalogError> {
        let cache_key = self.inner.endpoint.as_str().to_string();

        if let Some(products) = self.inner.cache.get(&cache_key).await {
            debug!("Cache hit for catalog");
            return Ok(products.as_ref().clone());
        }

        let products = self.fetch().await?;
        debug!(count = products.len(), "Fetched catalog");

        self.inner
            .cache
            .insert(cache_key, Arc::new(products.clone()))
            .await;

        Ok(products)
    }
}

/// Decode a `Product[]` response body.
///
/// # Errors
///
/// Returns `CatalogError::Parse` if the body is not a JSON product array.
pub fn decode_products(body: &str) -> Result<Vec<Product>, CatalogError> {
    serde_json::from_str(body).map_err(|e| {
        tracing::error!(
            error = %e,
            body = %excerpt(body),
            "Failed to parse catalog response"
        );
        CatalogError::Parse(e)
    })
}

fn excerpt(body: &str) -> String {
    body.chars().take(BODY_EXCERPT_CHARS).collect()
}
