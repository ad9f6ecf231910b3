//! # Error Types
//!
//! Domain-specific error types for shelf-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  shelf-core errors (this file)                                         │
//! │  └── CoreError        - Money parsing, in-memory store failures        │
//! │                                                                         │
//! │  shelf-db errors (separate crate)                                      │
//! │  └── DbError          - Database operation failures                    │
//! │                                                                         │
//! │  App errors (apps/shelf)                                               │
//! │  └── ApiError         - What the page sees (code + message)            │
//! │                                                                         │
//! │  Flow: CoreError / DbError → ApiError → Page                           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The list controller is generic over its store, so it returns whatever
//! error type the store declares (`ProductStore::Error`). `CoreError` is the
//! error type of [`MemoryProductStore`](crate::MemoryProductStore).

use thiserror::Error;

/// Core domain errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CoreError {
    /// No product with the given id exists in the store.
    ///
    /// ## When This Occurs
    /// - Updating a product whose row was deleted
    /// - Deleting an id twice
    #[error("Product not found: {0}")]
    ProductNotFound(i64),

    /// A price string could not be read as a decimal amount.
    ///
    /// ## Examples
    /// - `"abc"`, `"1.2.3"`, `"1,50"`
    #[error("Invalid price '{input}': {reason}")]
    InvalidPrice { input: String, reason: String },

    /// The products table has not been created yet.
    #[error("Products table does not exist")]
    TableMissing,

    /// The store refused the operation.
    #[error("Store unavailable: {0}")]
    StoreUnavailable(String),
}

impl CoreError {
    /// Creates an InvalidPrice error.
    pub fn invalid_price(input: impl Into<String>, reason: impl Into<String>) -> Self {
        CoreError::InvalidPrice {
            input: input.into(),
            reason: reason.into(),
        }
    }
}

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        assert_eq!(
            CoreError::ProductNotFound(42).to_string(),
            "Product not found: 42"
        );
        assert_eq!(
            CoreError::invalid_price("abc", "not a number").to_string(),
            "Invalid price 'abc': not a number"
        );
        assert_eq!(
            CoreError::TableMissing.to_string(),
            "Products table does not exist"
        );
    }
}
