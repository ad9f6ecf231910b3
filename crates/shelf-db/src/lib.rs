//! # shelf-db: Database Layer for Shelf
//!
//! This crate provides database access for Shelf.
//! It uses SQLite for local storage with sqlx for async operations.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                          Shelf Data Flow                                │
//! │                                                                         │
//! │  ProductListController::save()                                         │
//! │       │                                                                 │
//! │       │ ProductStore::insert / update / delete / scan                  │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                     shelf-db (THIS CRATE)                       │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────────┐    ┌───────────────────┐                   │   │
//! │  │   │   Database    │    │ ProductRepository │                   │   │
//! │  │   │   (pool.rs)   │◄───│ (product.rs)      │                   │   │
//! │  │   │  SqlitePool   │    │ impl ProductStore │                   │   │
//! │  │   └───────────────┘    └───────────────────┘                   │   │
//! │  │                                                                 │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                     SQLite Database                             │   │
//! │  │   <data dir>/Products.db3                                       │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Organization
//!
//! - [`pool`] - Connection pool creation and configuration
//! - [`error`] - Database error types
//! - [`repository`] - Repository implementations
//!
//! ## Usage
//!
//! ```rust,ignore
//! use shelf_core::ProductListController;
//! use shelf_db::{Database, DbConfig};
//!
//! let db = Database::new(DbConfig::new("path/to/Products.db3")).await?;
//! let list = ProductListController::open(db.products()).await?;
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod pool;
pub mod repository;

// =============================================================================
// Re-exports
// =============================================================================

pub use error::{DbError, DbResult};
pub use pool::{Database, DbConfig};

pub use repository::product::ProductRepository;

/// File name of the products database inside the data directory.
pub const DATABASE_FILE_NAME: &str = "Products.db3";
