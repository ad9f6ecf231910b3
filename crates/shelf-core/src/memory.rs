//! # In-Memory Product Store
//!
//! A `ProductStore` backed by a `Vec`, for tests and for running the
//! controller without a database file.
//!
//! It follows the SQLite backend's rules so controller tests exercise the
//! same behavior:
//! - ids start at 1 and are never reused (AUTOINCREMENT)
//! - scans return rows in ascending id order
//! - update of a missing id writes nothing and reports `false`
//! - delete of a missing id is `ProductNotFound`
//! - every operation except `create_table` fails with `TableMissing` until
//!   the table exists

use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use tokio::sync::Mutex;
use tracing::debug;

use crate::error::{CoreError, CoreResult};
use crate::store::{ProductFilter, ProductStore};
use crate::types::Product;

#[derive(Debug, Default)]
struct Table {
    created: bool,
    rows: Vec<Product>,
    last_id: i64,
}

impl Table {
    fn ready(&self) -> CoreResult<()> {
        if self.created {
            Ok(())
        } else {
            Err(CoreError::TableMissing)
        }
    }
}

/// In-memory product table.
///
/// ## Usage
/// ```rust
/// use shelf_core::{MemoryProductStore, Product, ProductStore};
///
/// # tokio::runtime::Builder::new_current_thread().build().unwrap().block_on(async {
/// let store = MemoryProductStore::new();
/// store.create_table().await.unwrap();
/// let id = store.insert(&Product::new()).await.unwrap();
/// assert_eq!(id, 1);
/// # });
/// ```
#[derive(Debug, Default)]
pub struct MemoryProductStore {
    table: Mutex<Table>,
    unavailable: AtomicBool,
}

impl MemoryProductStore {
    /// Creates an empty store. The table does not exist yet.
    pub fn new() -> Self {
        MemoryProductStore::default()
    }

    /// Creates a store whose table already holds `products`.
    ///
    /// Ids are assigned in order starting at 1, as if each had been inserted.
    pub fn with_products(products: impl IntoIterator<Item = Product>) -> Self {
        let mut table = Table {
            created: true,
            ..Table::default()
        };
        for mut product in products {
            table.last_id += 1;
            product.id = table.last_id;
            table.rows.push(product);
        }

        MemoryProductStore {
            table: Mutex::new(table),
            unavailable: AtomicBool::new(false),
        }
    }

    /// Makes every following operation fail with `StoreUnavailable`
    /// (or succeed again when `false`).
    pub fn set_unavailable(&self, unavailable: bool) {
        self.unavailable.store(unavailable, Ordering::SeqCst);
    }

    /// Number of rows currently stored.
    pub async fn len(&self) -> usize {
        self.table.lock().await.rows.len()
    }

    fn check_available(&self) -> CoreResult<()> {
        if self.unavailable.load(Ordering::SeqCst) {
            Err(CoreError::StoreUnavailable("store marked unavailable".to_string()))
        } else {
            Ok(())
        }
    }
}

#[async_trait]
impl ProductStore for MemoryProductStore {
    type Error = CoreError;

    async fn create_table(&self) -> CoreResult<()> {
        self.check_available()?;
        self.table.lock().await.created = true;
        Ok(())
    }

    async fn insert(&self, product: &Product) -> CoreResult<i64> {
        self.check_available()?;
        let mut table = self.table.lock().await;
        table.ready()?;

        table.last_id += 1;
        let id = table.last_id;
        table.rows.push(Product {
            id,
            ..product.clone()
        });

        debug!(id, name = %product.name, "Inserted product (memory)");
        Ok(id)
    }

    async fn update(&self, product: &Product) -> CoreResult<bool> {
        self.check_available()?;
        let mut table = self.table.lock().await;
        table.ready()?;

        let Some(row) = table.rows.iter_mut().find(|row| row.id == product.id) else {
            return Ok(false);
        };
        row.name = product.name.clone();
        row.price_cents = product.price_cents;
        Ok(true)
    }

    async fn delete(&self, id: i64) -> CoreResult<()> {
        self.check_available()?;
        let mut table = self.table.lock().await;
        table.ready()?;

        let before = table.rows.len();
        table.rows.retain(|row| row.id != id);
        if table.rows.len() == before {
            return Err(CoreError::ProductNotFound(id));
        }
        Ok(())
    }

    async fn scan(&self, filter: ProductFilter) -> CoreResult<Vec<Product>> {
        self.check_available()?;
        let table = self.table.lock().await;
        table.ready()?;

        Ok(table
            .rows
            .iter()
            .filter(|row| filter.matches(row))
            .cloned()
            .collect())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::money::Money;

    async fn ready_store() -> MemoryProductStore {
        let store = MemoryProductStore::new();
        store.create_table().await.unwrap();
        store
    }

    #[tokio::test]
    async fn test_requires_table() {
        let store = MemoryProductStore::new();
        assert_eq!(
            store.scan(ProductFilter::All).await.unwrap_err(),
            CoreError::TableMissing
        );

        store.create_table().await.unwrap();
        store.create_table().await.unwrap();
        assert!(store.scan(ProductFilter::All).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_insert_assigns_increasing_ids() {
        let store = ready_store().await;

        let mut product = Product::with_details("Widget", Money::from_cents(999));
        product.id = 500;
        let first = store.insert(&product).await.unwrap();
        let second = store.insert(&Product::new()).await.unwrap();

        assert_eq!(first, 1);
        assert_eq!(second, 2);
        assert_eq!(store.find(1).await.unwrap().unwrap().name, "Widget");
        assert!(store.find(500).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_ids_not_reused_after_delete() {
        let store = ready_store().await;
        let first = store.insert(&Product::new()).await.unwrap();
        store.delete(first).await.unwrap();

        let second = store.insert(&Product::new()).await.unwrap();
        assert_eq!(second, first + 1);
    }

    #[tokio::test]
    async fn test_update_and_delete_missing() {
        let store = ready_store().await;
        let mut ghost = Product::new();
        ghost.id = 9;

        assert!(!store.update(&ghost).await.unwrap());
        assert_eq!(store.len().await, 0);
        assert_eq!(
            store.delete(9).await.unwrap_err(),
            CoreError::ProductNotFound(9)
        );
    }

    #[tokio::test]
    async fn test_update_overwrites_fields() {
        let store = ready_store().await;
        let id = store
            .insert(&Product::with_details("Old", Money::from_cents(100)))
            .await
            .unwrap();

        let updated = store
            .update(&Product {
                id,
                name: "New".to_string(),
                price_cents: 250,
            })
            .await
            .unwrap();

        assert!(updated);

        let row = store.find(id).await.unwrap().unwrap();
        assert_eq!(row.name, "New");
        assert_eq!(row.price_cents, 250);
        assert_eq!(store.len().await, 1);
    }

    #[tokio::test]
    async fn test_with_products_and_unavailable() {
        let store = MemoryProductStore::with_products(vec![
            Product::with_details("A", Money::from_cents(1)),
            Product::with_details("B", Money::from_cents(2)),
        ]);
        let ids: Vec<i64> = store
            .scan(ProductFilter::All)
            .await
            .unwrap()
            .iter()
            .map(|p| p.id)
            .collect();
        assert_eq!(ids, vec![1, 2]);

        store.set_unavailable(true);
        assert!(matches!(
            store.scan(ProductFilter::All).await,
            Err(CoreError::StoreUnavailable(_))
        ));

        store.set_unavailable(false);
        assert_eq!(store.len().await, 2);
    }
}
