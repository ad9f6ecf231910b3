//! # Product List State
//!
//! Shares one `ProductListController` between the page and the commands.
//!
//! ## Thread Safety
//! The controller is wrapped in `Arc<Mutex<T>>` because:
//! 1. Every command mutates it (`&mut self`)
//! 2. Only one command may run at a time; a second save must wait for the
//!    first reload to finish instead of interleaving with it
//! 3. The page and background tasks may hold clones of the state
//!
//! The controller's busy flag stays a display hint. Exclusivity comes from
//! the Mutex.

use std::sync::Arc;

use tokio::sync::{broadcast, Mutex, MutexGuard};

use shelf_core::{ProductListController, ProductListEvent, ProductListSnapshot};
use shelf_db::ProductRepository;

/// Shared, mutex-guarded product list.
#[derive(Debug)]
pub struct ProductListState<S = ProductRepository> {
    inner: Arc<Mutex<ProductListController<S>>>,
}

impl<S> Clone for ProductListState<S> {
    fn clone(&self) -> Self {
        ProductListState {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<S: shelf_core::ProductStore> ProductListState<S> {
    /// Wraps an opened controller.
    pub fn new(controller: ProductListController<S>) -> Self {
        ProductListState {
            inner: Arc::new(Mutex::new(controller)),
        }
    }

    /// Locks the controller for one command.
    pub async fn lock(&self) -> MutexGuard<'_, ProductListController<S>> {
        self.inner.lock().await
    }

    /// Subscribes to change events.
    pub async fn subscribe(&self) -> broadcast::Receiver<ProductListEvent> {
        self.inner.lock().await.subscribe()
    }

    /// Copies the observable properties.
    pub async fn snapshot(&self) -> ProductListSnapshot {
        self.inner.lock().await.snapshot()
    }
}
