//! # Commands Module
//!
//! All commands the page invokes.
//!
//! ## How Commands Work
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Command Flow                                         │
//! │                                                                         │
//! │  Page line: "price 9.99"                                                │
//! │         │                                                               │
//! │         ▼                                                               │
//! │  edit_operating_product(&state, None, Some("9.99"))                     │
//! │         │  parse price, lock ProductListState, edit                     │
//! │         ▼                                                               │
//! │  Result<ProductDto, ApiError>                                           │
//! │         │                                                               │
//! │         ▼                                                               │
//! │  Controller publishes OperatingProductChanged → page re-renders         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Commands are generic over the store so they can be exercised against
//! `MemoryProductStore` in tests.

pub mod product;
