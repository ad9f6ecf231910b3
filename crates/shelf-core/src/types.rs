//! # Domain Types
//!
//! The `Product` record shared by every layer of Shelf.
//!
//! ## Identity
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Product Lifecycle                                │
//! │                                                                         │
//! │  Product::new()          id = 0   (unsaved, lives only in the form)    │
//! │       │                                                                 │
//! │       │ save → store.insert                                             │
//! │       ▼                                                                 │
//! │  Product { id: 7, .. }   id > 0   (exactly one row with this id)       │
//! │       │                                                                 │
//! │       │ save → store.update(id = 7)                                     │
//! │       │ delete(7) → store.delete(7)                                     │
//! │       ▼                                                                 │
//! │  gone from the store; the next reload drops it from the list           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::{Deserialize, Serialize};

use crate::money::Money;

/// Identity value of a product that has never been saved.
pub const UNSAVED_ID: i64 = 0;

// =============================================================================
// Product
// =============================================================================

/// A product row.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct Product {
    /// Store-assigned identity. `0` until the first insert.
    pub id: i64,

    /// Display name.
    pub name: String,

    /// Price in cents.
    pub price_cents: i64,
}

impl Product {
    /// Creates a blank, unsaved product.
    pub fn new() -> Self {
        Product::default()
    }

    /// Creates an unsaved product with a name and price.
    pub fn with_details(name: impl Into<String>, price: Money) -> Self {
        Product {
            id: UNSAVED_ID,
            name: name.into(),
            price_cents: price.cents(),
        }
    }

    /// Returns true if this product has never been inserted.
    #[inline]
    pub fn is_new(&self) -> bool {
        self.id == UNSAVED_ID
    }

    /// Returns the price as a Money type.
    #[inline]
    pub fn price(&self) -> Money {
        Money::from_cents(self.price_cents)
    }

    /// Replaces the price.
    #[inline]
    pub fn set_price(&mut self, price: Money) {
        self.price_cents = price.cents();
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_product_is_unsaved() {
        let product = Product::new();
        assert!(product.is_new());
        assert_eq!(product.id, 0);
        assert!(product.name.is_empty());
        assert_eq!(product.price(), Money::zero());
    }

    #[test]
    fn test_with_details() {
        let product = Product::with_details("Widget", Money::from_cents(999));
        assert!(product.is_new());
        assert_eq!(product.name, "Widget");
        assert_eq!(product.price().to_string(), "9.99");
    }

    #[test]
    fn test_saved_product_is_not_new() {
        let mut product = Product::new();
        product.id = 3;
        assert!(!product.is_new());
    }

    #[test]
    fn test_serializes_fields() {
        let product = Product::with_details("Gadget", Money::from_cents(250));
        let json = serde_json::to_value(&product).unwrap();
        assert_eq!(json["id"], 0);
        assert_eq!(json["name"], "Gadget");
        assert_eq!(json["price_cents"], 250);
    }
}
