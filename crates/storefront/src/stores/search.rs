//! Product search store.
//!
//! Holds the query, the visibility flag of the search panel, and the results
//! of the latest search. A search waits out a simulated network delay, then
//! does a case-insensitive substring match of the query against product names.
//!
//! Every `search` call takes a new generation number. When a search resolves
//! it only writes its results if no newer search (or `clear_search`) has
//! started in the meantime, so a slow early response can never overwrite a
//! fast later one.

use std::sync::{PoisonError, RwLock, RwLockWriteGuard};
use std::time::Duration;

use maison_core::ProductSummary;
use tracing::{debug, error, instrument};

use crate::catalog::{Catalog, CatalogError};

/// Simulated latency applied before each search resolves.
pub const DEFAULT_SEARCH_DELAY: Duration = Duration::from_millis(300);

/// Observable search state.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SearchState {
    pub query: String,
    pub results: Vec<ProductSummary>,
    pub is_loading: bool,
    pub is_open: bool,
}

#[derive(Debug, Default)]
struct SearchInner {
    state: SearchState,
    generation: u64,
}

/// The search state container.
#[derive(Debug)]
pub struct SearchStore<C> {
    catalog: C,
    delay: Duration,
    inner: RwLock<SearchInner>,
}

impl<C: Catalog> SearchStore<C> {
    /// Create a search store over `catalog`.
    #[must_use]
    pub fn new(catalog: C, delay: Duration) -> Self {
        Self {
            catalog,
            delay,
            inner: RwLock::new(SearchInner::default()),
        }
    }

    /// Get a reference to the catalog being searched.
    #[must_use]
    pub const fn catalog(&self) -> &C {
        &self.catalog
    }

    /// Update the query without searching.
    pub fn set_query(&self, query: impl Into<String>) {
        self.write().state.query = query.into();
    }

    /// Search product names for `query` and store the matches.
    ///
    /// Never fails: catalog errors are logged and leave an empty result list.
    /// The loading flag is cleared when this search finishes, fails, or is
    /// dropped, unless a newer search has taken over.
    #[instrument(skip(self), fields(generation = tracing::field::Empty))]
    pub async fn search(&self, query: &str) {
        let pending = self.begin();
        tracing::Span::current().record("generation", pending.generation);

        let results = match self.matching(query).await {
            Ok(results) => results,
            Err(e) => {
                error!(error = %e, "Search failed");
                Vec::new()
            }
        };

        let count = results.len();
        if pending.settle(results) {
            debug!(count, "Search results applied");
        } else {
            debug!(count, "Discarding stale search results");
        }
    }

    /// Reset the query and results. Any in-flight search is abandoned.
    pub fn clear_search(&self) {
        let mut inner = self.write();
        inner.generation += 1;
        inner.state.query.clear();
        inner.state.results.clear();
        inner.state.is_loading = false;
    }

    /// Show or hide the search panel. Returns the new visibility.
    pub fn toggle_search(&self) -> bool {
        let mut inner = self.write();
        inner.state.is_open = !inner.state.is_open;
        inner.state.is_open
    }

    /// Copy of the current state.
    #[must_use]
    pub fn snapshot(&self) -> SearchState {
        self.inner
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .state
            .clone()
    }

    #[must_use]
    pub fn query(&self) -> String {
        self.snapshot().query
    }

    #[must_use]
    pub fn results(&self) -> Vec<ProductSummary> {
        self.snapshot().results
    }

    #[must_use]
    pub fn is_loading(&self) -> bool {
        self.inner
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .state
            .is_loading
    }

    #[must_use]
    pub fn is_open(&self) -> bool {
        self.inner
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .state
            .is_open
    }

    fn write(&self) -> RwLockWriteGuard<'_, SearchInner> {
        self.inner.write().unwrap_or_else(PoisonError::into_inner)
    }

    fn begin(&self) -> PendingSearch<'_> {
        let mut inner = self.write();
        inner.generation += 1;
        inner.state.is_loading = true;
        PendingSearch {
            inner: &self.inner,
            generation: inner.generation,
            settled: false,
        }
    }

    async fn matching(&self, query: &str) -> Result<Vec<ProductSummary>, CatalogError> {
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }

        let needle = query.to_lowercase();
        let products = self.catalog.products().await?;

        Ok(products
            .iter()
            .filter(|p| p.name.to_lowercase().contains(&needle))
            .map(ProductSummary::from)
            .collect())
    }
}

/// A started search. Clears the loading flag on drop if it never settled.
struct PendingSearch<'a> {
    inner: &'a RwLock<SearchInner>,
    generation: u64,
    settled: bool,
}

impl PendingSearch<'_> {
    /// Apply `results` if this is still the latest search.
    fn settle(mut self, results: Vec<ProductSummary>) -> bool {
        self.settled = true;
        let mut inner = self.inner.write().unwrap_or_else(PoisonError::into_inner);
        if inner.generation != self.generation {
            return false;
        }
        inner.state.results = results;
        inner.state.is_loading = false;
        true
    }
}

impl Drop for PendingSearch<'_> {
    fn drop(&mut self) {
        if self.settled {
            return;
        }
        let mut inner = self.inner.write().unwrap_or_else(PoisonError::into_inner);
        if inner.generation == self.generation {
            inner.state.is_loading = false;
        }
    }
}
