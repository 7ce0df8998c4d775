//! Integration tests for Maison.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p maison-integration-tests
//! ```
//!
//! # Test Categories
//!
//! - `persistence` - snapshots survive a restart, on-disk layout
//! - `storefront_flows` - cart, wishlist and search working together
//! - `http_catalog` - remote catalog against a local HTTP server
//!
//! Everything runs against a temporary data directory; no external
//! services are needed.

use std::path::Path;
use std::time::Duration;

use maison_core::Product;
use maison_storefront::{AppState, StorefrontConfig};
use rust_decimal::Decimal;
use tempfile::TempDir;

/// A storefront over its own temporary data directory.
pub struct TestContext {
    pub dir: TempDir,
    pub state: AppState,
}

impl TestContext {
    /// Fresh storefront with write-behind persistence and no search delay.
    ///
    /// # Panics
    ///
    /// Panics if the temporary directory or state cannot be created.
    #[must_use]
    pub fn new() -> Self {
        let dir = TempDir::new().expect("Failed to create temp dir");
        let state = open(dir.path());
        Self { dir, state }
    }

    /// Shut the current state down and open a new one over the same directory.
    ///
    /// # Panics
    ///
    /// Panics if the snapshot writer fails to drain.
    pub async fn restart(&mut self) {
        self.state
            .shutdown()
            .await
            .expect("Failed to shut down storefront");
        self.state = open(self.dir.path());
    }

    /// Raw JSON persisted under `key`, if any.
    ///
    /// # Panics
    ///
    /// Panics if the snapshot file is not valid JSON.
    #[must_use]
    pub fn stored_json(&self, key: &str) -> Option<serde_json::Value> {
        let raw = std::fs::read_to_string(self.dir.path().join(format!("{key}.json"))).ok()?;
        Some(serde_json::from_str(&raw).expect("Snapshot is not valid JSON"))
    }
}

impl Default for TestContext {
    fn default() -> Self {
        Self::new()
    }
}

/// Test configuration over `dir`.
#[must_use]
pub fn config(dir: &Path) -> StorefrontConfig {
    let mut config = StorefrontConfig::new(dir);
    config.search_delay = Duration::ZERO;
    config
}

/// Open a storefront over `dir` with [`config`].
///
/// # Panics
///
/// Panics if the snapshot writer cannot be started.
#[must_use]
pub fn open(dir: &Path) -> AppState {
    AppState::new(config(dir)).expect("Failed to create storefront state")
}

/// Build a product with a whole-dollar price.
#[must_use]
pub fn product(id: &str, name: &str, price: i64) -> Product {
    Product::new(id, name, Decimal::from(price)).with_category("test")
}
