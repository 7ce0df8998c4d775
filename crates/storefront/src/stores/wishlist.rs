//! Wishlist store.

use maison_core::{Product, ProductId};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::storage::SnapshotPersister;

/// Storage key for wishlist snapshots.
pub const WISHLIST_STORAGE_KEY: &str = "wishlist-storage";

/// Persisted wishlist layout: `{ items: [Product] }`.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct WishlistSnapshot {
    pub items: Vec<Product>,
}

/// Saved products, at most one entry per product id.
#[derive(Debug)]
pub struct WishlistStore {
    items: Vec<Product>,
    persister: SnapshotPersister,
}

impl WishlistStore {
    /// Create a wishlist, restoring the last persisted snapshot if one exists.
    ///
    /// Duplicate ids in a restored snapshot collapse to their first entry.
    #[must_use]
    pub fn load(persister: SnapshotPersister) -> Self {
        let restored = persister
            .load::<WishlistSnapshot>(WISHLIST_STORAGE_KEY)
            .unwrap_or_default();

        let mut items: Vec<Product> = Vec::with_capacity(restored.items.len());
        for product in restored.items {
            if !items.iter().any(|p| p.id == product.id) {
                items.push(product);
            }
        }

        debug!(items = items.len(), "Wishlist restored");
        Self { items, persister }
    }

    /// Save `product`. Already-saved ids are left untouched.
    pub fn add_item(&mut self, product: Product) {
        if self.is_in_wishlist(&product.id) {
            return;
        }
        self.items.push(product);
        self.persist();
    }

    /// Remove `product_id`. No-op if absent.
    pub fn remove_item(&mut self, product_id: &ProductId) {
        self.items.retain(|p| &p.id != product_id);
        self.persist();
    }

    pub fn clear_wishlist(&mut self) {
        self.items.clear();
        self.persist();
    }

    #[must_use]
    pub fn is_in_wishlist(&self, product_id: &ProductId) -> bool {
        self.items.iter().any(|p| &p.id == product_id)
    }

    /// Saved products in the order they were added.
    #[must_use]
    pub fn items(&self) -> &[Product] {
        &self.items
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    fn persist(&self) {
        let snapshot = WishlistSnapshot {
            items: self.items.clone(),
        };
        self.persister.persist(WISHLIST_STORAGE_KEY, &snapshot);
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::sync::Arc;

    use rust_decimal::Decimal;

    use super::*;
    use crate::storage::{KeyValueStore, MemoryStorage};
    use crate::stores::cart::CART_STORAGE_KEY;

    fn product(id: &str) -> Product {
        Product::new(id, format!("Product {id}"), Decimal::from(100))
    }

    fn empty_wishlist() -> (Arc<MemoryStorage>, WishlistStore) {
        let storage = Arc::new(MemoryStorage::new());
        let persister = SnapshotPersister::immediate(storage.clone());
        (storage, WishlistStore::load(persister))
    }

    #[test]
    fn test_add_twice_keeps_one_entry() {
        let (_storage, mut wishlist) = empty_wishlist();
        wishlist.add_item(product("a"));
        wishlist.add_item(product("a"));

        assert_eq!(wishlist.len(), 1);
        assert!(wishlist.is_in_wishlist(&ProductId::new("a")));
    }

    #[test]
    fn test_duplicate_add_keeps_original_snapshot() {
        let (_storage, mut wishlist) = empty_wishlist();
        wishlist.add_item(product("a"));
        wishlist.add_item(Product::new("a", "Renamed", Decimal::from(1)));

        assert_eq!(wishlist.items().first().map(|p| p.name.as_str()), Some("Product a"));
    }

    #[test]
    fn test_remove_and_missing_remove() {
        let (_storage, mut wishlist) = empty_wishlist();
        wishlist.add_item(product("a"));
        wishlist.add_item(product("b"));

        wishlist.remove_item(&ProductId::new("missing"));
        assert_eq!(wishlist.len(), 2);

        wishlist.remove_item(&ProductId::new("a"));
        assert!(!wishlist.is_in_wishlist(&ProductId::new("a")));
        assert!(wishlist.is_in_wishlist(&ProductId::new("b")));
    }

    #[test]
    fn test_clear() {
        let (_storage, mut wishlist) = empty_wishlist();
        wishlist.add_item(product("a"));
        wishlist.clear_wishlist();
        assert!(wishlist.is_empty());
    }

    #[test]
    fn test_persists_under_own_key() {
        let (storage, mut wishlist) = empty_wishlist();
        wishlist.add_item(product("a"));

        let raw = storage.get(WISHLIST_STORAGE_KEY).unwrap().unwrap();
        let snapshot: WishlistSnapshot = serde_json::from_str(&raw).unwrap();
        assert_eq!(snapshot.items.len(), 1);
        assert_eq!(storage.get(CART_STORAGE_KEY).unwrap(), None);
    }

    #[test]
    fn test_load_restores_and_dedupes() {
        let storage = Arc::new(MemoryStorage::new());
        storage
            .set(
                WISHLIST_STORAGE_KEY,
                r#"{"items":[
                    {"id":1,"name":"Diamond Ring","price":"4500"},
                    {"id":"1","name":"Diamond Ring (copy)","price":"4500"},
                    {"id":"2","name":"Pearl Necklace","price":"1250"}
                ]}"#,
            )
            .unwrap();

        let wishlist = WishlistStore::load(SnapshotPersister::immediate(storage));
        assert_eq!(wishlist.len(), 2);
        assert_eq!(
            wishlist.items().first().map(|p| p.name.as_str()),
            Some("Diamond Ring")
        );
    }
}
