//! # Product Repository
//!
//! Database operations for products.
//!
//! ## Schema
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  products                                                               │
//! │  ───────────────────────────────────────────────────────────────────    │
//! │  id           INTEGER PRIMARY KEY AUTOINCREMENT   (0 never stored)      │
//! │  name         TEXT    NOT NULL DEFAULT ''                               │
//! │  price_cents  INTEGER NOT NULL DEFAULT 0          (9.99 → 999)          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! AUTOINCREMENT keeps SQLite from handing a deleted id to a new row, so an
//! id the page still shows can never point at a different product.

use async_trait::async_trait;
use sqlx::SqlitePool;
use tracing::debug;

use crate::error::{DbError, DbResult};
use shelf_core::{Product, ProductFilter, ProductStore};

const CREATE_PRODUCTS_TABLE: &str = r#"
    CREATE TABLE IF NOT EXISTS products (
        id          INTEGER PRIMARY KEY AUTOINCREMENT,
        name        TEXT    NOT NULL DEFAULT '',
        price_cents INTEGER NOT NULL DEFAULT 0
    )
"#;

/// Repository for product database operations.
///
/// ## Usage
/// ```rust,ignore
/// let repo = ProductRepository::new(pool);
///
/// let id = repo.insert(&product).await?;
/// let product = repo.get_by_id(id).await?;
/// ```
#[derive(Debug, Clone)]
pub struct ProductRepository {
    pool: SqlitePool,
}

impl ProductRepository {
    /// Creates a new ProductRepository.
    pub fn new(pool: SqlitePool) -> Self {
        ProductRepository { pool }
    }

    /// Creates the products table if it doesn't exist.
    pub async fn create_schema(&self) -> DbResult<()> {
        debug!("Ensuring products table exists");
        sqlx::query(CREATE_PRODUCTS_TABLE)
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    /// Lists every product in ascending id order.
    pub async fn list_all(&self) -> DbResult<Vec<Product>> {
        let products = sqlx::query_as::<_, Product>(
            "SELECT id, name, price_cents FROM products ORDER BY id",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(products)
    }

    /// Gets a product by its id.
    ///
    /// ## Returns
    /// * `Ok(Some(Product))` - Product found
    /// * `Ok(None)` - Product not found
    pub async fn get_by_id(&self, id: i64) -> DbResult<Option<Product>> {
        let product = sqlx::query_as::<_, Product>(
            "SELECT id, name, price_cents FROM products WHERE id = ?1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(product)
    }

    /// Inserts a new product and returns its assigned id.
    ///
    /// `product.id` is ignored; SQLite assigns the next id.
    pub async fn insert_product(&self, product: &Product) -> DbResult<i64> {
        debug!(name = %product.name, "Inserting product");

        let result = sqlx::query("INSERT INTO products (name, price_cents) VALUES (?1, ?2)")
            .bind(&product.name)
            .bind(product.price_cents)
            .execute(&self.pool)
            .await?;

        Ok(result.last_insert_rowid())
    }

    /// Updates an existing product.
    ///
    /// ## Returns
    /// * `Ok(true)` - Row updated
    /// * `Ok(false)` - No row with this id; nothing written
    pub async fn update_product(&self, product: &Product) -> DbResult<bool> {
        debug!(id = product.id, "Updating product");

        let result = sqlx::query("UPDATE products SET name = ?2, price_cents = ?3 WHERE id = ?1")
            .bind(product.id)
            .bind(&product.name)
            .bind(product.price_cents)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Deletes a product row.
    ///
    /// ## Returns
    /// * `Ok(())` - Row removed
    /// * `Err(DbError::NotFound)` - Product doesn't exist
    pub async fn delete_product(&self, id: i64) -> DbResult<()> {
        debug!(id, "Deleting product");

        let result = sqlx::query("DELETE FROM products WHERE id = ?1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Product", id));
        }

        Ok(())
    }

    /// Counts total products (for diagnostics).
    pub async fn count(&self) -> DbResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM products")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }
}

#[async_trait]
impl ProductStore for ProductRepository {
    type Error = DbError;

    async fn create_table(&self) -> DbResult<()> {
        self.create_schema().await
    }

    async fn insert(&self, product: &Product) -> DbResult<i64> {
        self.insert_product(product).await
    }

    async fn update(&self, product: &Product) -> DbResult<bool> {
        self.update_product(product).await
    }

    async fn delete(&self, id: i64) -> DbResult<()> {
        self.delete_product(id).await
    }

    async fn scan(&self, filter: ProductFilter) -> DbResult<Vec<Product>> {
        match filter {
            ProductFilter::All => self.list_all().await,
            ProductFilter::Id(id) => Ok(self.get_by_id(id).await?.into_iter().collect()),
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
