//! # Product Store
//!
//! The seam between the list controller and whatever persists products.
//!
//! ## Implementations
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        ProductStore                                     │
//! │  ├── create_table()                                                     │
//! │  ├── insert(&product)      → assigned id                                │
//! │  ├── update(&product)      by id                                        │
//! │  ├── delete(id)            by id                                        │
//! │  └── scan(filter)          full-table scan, ascending id                │
//! │                                                                         │
//! │        ▲                                 ▲                              │
//! │        │                                 │                              │
//! │  shelf_db::ProductRepository       MemoryProductStore                   │
//! │  (SQLite)                          (Vec behind a Mutex)                 │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use async_trait::async_trait;

use crate::types::Product;

// =============================================================================
// Scan Filter
// =============================================================================

/// Predicate applied during a full-table scan.
///
/// Backends either evaluate it row by row with [`ProductFilter::matches`]
/// or translate it into a `WHERE` clause.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProductFilter {
    /// Every row.
    All,
    /// The row with this id.
    Id(i64),
}

impl ProductFilter {
    /// Returns true if the product passes this filter.
    pub fn matches(&self, product: &Product) -> bool {
        match self {
            ProductFilter::All => true,
            ProductFilter::Id(id) => product.id == *id,
        }
    }
}

// =============================================================================
// Store Trait
// =============================================================================

/// Table-scoped CRUD over products.
///
/// Every method is a single round trip to the backend. No method spans a
/// transaction with another.
#[async_trait]
pub trait ProductStore: Send + Sync {
    /// Backend error type, returned unchanged by the list controller.
    type Error: std::error::Error + Send + Sync + 'static;

    /// Creates the products table if it does not exist.
    async fn create_table(&self) -> Result<(), Self::Error>;

    /// Inserts a product and returns the id the store assigned.
    ///
    /// The incoming `product.id` is ignored.
    async fn insert(&self, product: &Product) -> Result<i64, Self::Error>;

    /// Overwrites the name and price of the row with `product.id`.
    ///
    /// Returns `false` when no such row exists; nothing is written then.
    async fn update(&self, product: &Product) -> Result<bool, Self::Error>;

    /// Removes the row with this id.
    async fn delete(&self, id: i64) -> Result<(), Self::Error>;

    /// Returns every row passing `filter`, in ascending id order.
    async fn scan(&self, filter: ProductFilter) -> Result<Vec<Product>, Self::Error>;

    /// Returns the row with this id, if any.
    async fn find(&self, id: i64) -> Result<Option<Product>, Self::Error> {
        Ok(self.scan(ProductFilter::Id(id)).await?.into_iter().next())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_filter_matches() {
        let mut product = Product::new();
        product.id = 4;

        assert!(ProductFilter::All.matches(&product));
        assert!(ProductFilter::Id(4).matches(&product));
        assert!(!ProductFilter::Id(5).matches(&product));
    }
}
