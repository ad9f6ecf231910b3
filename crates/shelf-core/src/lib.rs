//! # shelf-core: Product Model and List Controller
//!
//! This crate holds everything about products that does not touch a disk:
//! the `Product` record, the `Money` type used for its price, the
//! `ProductStore` trait that storage backends implement, and the
//! `ProductListController` that keeps a UI-bound list in step with a store.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                          Shelf Architecture                             │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                    Page (apps/shelf)                            │   │
//! │  │      list ──► edit form ──► save / delete buttons               │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │ commands / change events               │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ shelf-core (THIS CRATE) ★                       │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌──────────────┐  ┌─────────┐  │   │
//! │  │   │   types   │  │   money   │  │ product_list │  │  store  │  │   │
//! │  │   │  Product  │  │   Money   │  │  Controller  │  │  trait  │  │   │
//! │  │   └───────────┘  └───────────┘  └──────────────┘  └────┬────┘  │   │
//! │  │                                                        │       │   │
//! │  │   NO I/O • storage only through ProductStore           │       │   │
//! │  └────────────────────────────────────────────────────────┼───────┘   │
//! │                                                           │            │
//! │  ┌────────────────────────────────────┐  ┌────────────────▼───────┐   │
//! │  │  shelf-db::ProductRepository       │  │  MemoryProductStore    │   │
//! │  │  (SQLite file, Products.db3)       │  │  (tests, no file)      │   │
//! │  └────────────────────────────────────┘  └────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - The `Product` record
//! - [`money`] - Integer money with decimal parsing
//! - [`error`] - Domain error types
//! - [`store`] - The `ProductStore` trait and scan filters
//! - [`memory`] - In-memory `ProductStore`
//! - [`product_list`] - The list controller and its change events
//!
//! ## Example Usage
//!
//! ```rust
//! use shelf_core::{MemoryProductStore, Money, ProductListController};
//!
//! # tokio_test_block(async {
//! let mut list = ProductListController::open(MemoryProductStore::new()).await.unwrap();
//!
//! list.edit_operating(|p| {
//!     p.name = "Widget".to_string();
//!     p.set_price("9.99".parse::<Money>().unwrap());
//! });
//! let saved = list.save().await.unwrap();
//!
//! assert!(saved.id > 0);
//! assert_eq!(list.products().len(), 1);
//! # });
//! # fn tokio_test_block<F: std::future::Future>(f: F) -> F::Output {
//! #     tokio::runtime::Builder::new_current_thread().build().unwrap().block_on(f)
//! # }
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod memory;
pub mod money;
pub mod product_list;
pub mod store;
pub mod types;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use error::{CoreError, CoreResult};
pub use memory::MemoryProductStore;
pub use money::Money;
pub use product_list::{ProductListController, ProductListEvent, ProductListSnapshot};
pub use store::{ProductFilter, ProductStore};
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Caption shown next to the busy indicator while the list reloads.
pub const DEFAULT_BUSY_TEXT: &str = "Loading products...";

/// Capacity of the change-event channel.
///
/// Slow subscribers that fall further behind than this see a `Lagged`
/// error and should re-read the snapshot.
pub const EVENT_CHANNEL_CAPACITY: usize = 64;
