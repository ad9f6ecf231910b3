//! # Repository Module
//!
//! Database repository implementations for Shelf.
//!
//! ## Repository Pattern
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Repository Pattern                                   │
//! │                                                                         │
//! │  ProductListController<ProductRepository>                              │
//! │       │                                                                 │
//! │       │  store.insert(&product)                                        │
//! │       ▼                                                                 │
//! │  ProductRepository (impl ProductStore)                                 │
//! │  ├── create_table()                                                    │
//! │  ├── insert / update / delete                                          │
//! │  └── scan(filter)                                                      │
//! │       │                                                                 │
//! │       │  SQL Query                                                      │
//! │       ▼                                                                 │
//! │  SQLite Database                                                       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Available Repositories
//!
//! - [`ProductRepository`](product::ProductRepository) - Product CRUD and scans

pub mod product;
