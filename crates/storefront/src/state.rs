//! Application state shared across the storefront.
//!
//! `AppState` is built once at the application root and passed to whatever
//! needs the stores. Nothing in this crate is a global: two `AppState`s over
//! different storage are fully independent.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use maison_core::ProductId;
use tracing::{info, instrument};

use crate::catalog::{CatalogSource, HttpCatalog, StaticCatalog};
use crate::config::StorefrontConfig;
use crate::error::Result;
use crate::storage::{FileStorage, KeyValueStore, SnapshotPersister};
use crate::stores::{CartStore, SearchStore, WishlistStore};

/// Application state shared across all callers.
///
/// This struct is cheaply cloneable via `Arc`. Cart and wishlist each sit
/// behind their own mutex, so every store operation is atomic.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: StorefrontConfig,
    persister: SnapshotPersister,
    cart: Mutex<CartStore>,
    wishlist: Mutex<WishlistStore>,
    search: SearchStore<CatalogSource>,
}

impl AppState {
    /// Create application state from configuration.
    ///
    /// Snapshots live in `config.data_dir`. The catalog is fetched from
    /// `config.catalog_url` when set, otherwise the built-in catalog is used.
    ///
    /// # Errors
    ///
    /// Returns an error if the snapshot writer cannot be started.
    pub fn new(config: StorefrontConfig) -> Result<Self> {
        let storage: Arc<dyn KeyValueStore> = Arc::new(FileStorage::new(&config.data_dir));
        let catalog = config.catalog_url.clone().map_or_else(
            || CatalogSource::from(StaticCatalog::default()),
            |url| CatalogSource::from(HttpCatalog::new(url)),
        );
        Self::with_parts(config, storage, catalog)
    }

    /// Create application state over explicit storage and catalog.
    ///
    /// # Errors
    ///
    /// Returns an error if the snapshot writer cannot be started.
    pub fn with_parts(
        config: StorefrontConfig,
        storage: Arc<dyn KeyValueStore>,
        catalog: CatalogSource,
    ) -> Result<Self> {
        let persister = if config.write_behind {
            SnapshotPersister::write_behind(storage)?
        } else {
            SnapshotPersister::immediate(storage)
        };

        let cart = CartStore::load(persister.clone());
        let wishlist = WishlistStore::load(persister.clone());
        let search = SearchStore::new(catalog, config.search_delay);

        info!(
            data_dir = %config.data_dir.display(),
            write_behind = config.write_behind,
            "Storefront state ready"
        );

        Ok(Self {
            inner: Arc::new(AppStateInner {
                config,
                persister,
                cart: Mutex::new(cart),
                wishlist: Mutex::new(wishlist),
                search,
            }),
        })
    }

    /// Get a reference to the storefront configuration.
    #[must_use]
    pub fn config(&self) -> &StorefrontConfig {
        &self.inner.config
    }

    /// Run `f` with exclusive access to the cart.
    pub fn with_cart<R>(&self, f: impl FnOnce(&mut CartStore) -> R) -> R {
        f(&mut lock(&self.inner.cart))
    }

    /// Run `f` with exclusive access to the wishlist.
    pub fn with_wishlist<R>(&self, f: impl FnOnce(&mut WishlistStore) -> R) -> R {
        f(&mut lock(&self.inner.wishlist))
    }

    /// Get a reference to the search store.
    #[must_use]
    pub fn search(&self) -> &SearchStore<CatalogSource> {
        &self.inner.search
    }

    /// Get a reference to the catalog.
    #[must_use]
    pub fn catalog(&self) -> &CatalogSource {
        self.inner.search.catalog()
    }

    /// Move a saved product from the wishlist into the cart (quantity 1).
    ///
    /// Returns `false` and changes nothing if the product is not saved.
    #[instrument(skip_all, fields(product_id = %product_id))]
    pub fn move_to_cart(&self, product_id: &ProductId) -> bool {
        // Lock order: wishlist, then cart.
        let mut wishlist = lock(&self.inner.wishlist);
        let Some(product) = wishlist
            .items()
            .iter()
            .find(|p| &p.id == product_id)
            .cloned()
        else {
            return false;
        };

        lock(&self.inner.cart).add_item(product, 1);
        wishlist.remove_item(product_id);
        info!("Moved wishlist item to cart");
        true
    }

    /// Flush pending snapshot writes and stop the writer.
    ///
    /// Call once when the application shuts down.
    ///
    /// # Errors
    ///
    /// Returns an error if the writer stopped before draining.
    pub async fn shutdown(&self) -> Result<()> {
        self.inner.persister.shutdown().await?;
        info!("Storefront state shut down");
        Ok(())
    }

    /// Wait until every snapshot persisted so far is durable.
    ///
    /// # Errors
    ///
    /// Returns an error if the writer has stopped.
    pub async fn flush(&self) -> Result<()> {
        self.inner.persister.flush().await?;
        Ok(())
    }
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}
