//! # State Module
//!
//! Manages application state.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    State Architecture                                   │
//! │                                                                         │
//! │  ┌──────────────────────────────┐  ┌──────────────────────────────┐    │
//! │  │   ProductListState           │  │   ConfigState                │    │
//! │  │                              │  │                              │    │
//! │  │  Arc<Mutex<                  │  │  database_path               │    │
//! │  │    ProductListController     │  │  busy_text                   │    │
//! │  │  >>                          │  │  log_filter                  │    │
//! │  └──────────────────────────────┘  └──────────────────────────────┘    │
//! │                                                                         │
//! │  THREAD SAFETY:                                                        │
//! │  • ProductListState: one command at a time holds the Mutex             │
//! │  • ConfigState: Read-only after initialization                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

pub mod config;
mod products;

pub use config::ConfigState;
pub use products::ProductListState;
