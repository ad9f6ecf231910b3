//! # Product List Controller
//!
//! Keeps an in-memory product list in step with a [`ProductStore`] and
//! tells observers when anything they display has changed.
//!
//! ## Command Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Product List Commands                                │
//! │                                                                         │
//! │  Page Action           Controller                 Store                 │
//! │  ───────────           ──────────                 ─────                 │
//! │                                                                         │
//! │  Tap row / "New" ────► select_for_edit(p?) ─────► (nothing)            │
//! │                                                                         │
//! │  Tap "Save" ─────────► save()                                          │
//! │                         busy = true                                     │
//! │                         id == 0 ? ─────────────► insert(p) → new id    │
//! │                                 : ─────────────► update(p)             │
//! │                         operating = blank                               │
//! │                         reload ────────────────► scan(All)             │
//! │                         busy = false                                    │
//! │                                                                         │
//! │  Tap "Delete" ───────► delete(id)                                      │
//! │                         lookup ────────────────► scan(Id(id))          │
//! │                         found? ────────────────► delete(id)            │
//! │                         reload ────────────────► scan(All)             │
//! │                                                                         │
//! │  Every state change publishes a ProductListEvent to subscribers.       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Exclusivity
//! Commands take `&mut self`, so one owner cannot interleave them. Shared
//! owners wrap the controller in a `tokio::sync::Mutex`. The busy flag is
//! for display only.
//!
//! ## Failures
//! A store error ends the command and is returned unchanged. The busy flag
//! is cleared first, and the collection keeps whatever it held before.

use serde::Serialize;
use tokio::sync::broadcast;
use tracing::{debug, info, warn};

use crate::store::{ProductFilter, ProductStore};
use crate::types::Product;
use crate::{DEFAULT_BUSY_TEXT, EVENT_CHANNEL_CAPACITY};

// =============================================================================
// Events & Snapshot
// =============================================================================

/// Change notification published after a property changes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case", tag = "kind", content = "value")]
pub enum ProductListEvent {
    /// The collection was rebuilt from the store.
    ProductsChanged,
    /// The operating product was replaced or edited.
    OperatingProductChanged,
    /// The busy flag changed to the carried value.
    BusyChanged(bool),
}

/// Everything a page binds to, copied out of the controller.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductListSnapshot {
    pub products: Vec<Product>,
    pub operating_product: Product,
    pub is_busy: bool,
    pub busy_text: String,
}

// =============================================================================
// Controller
// =============================================================================

/// The product list and the record being edited.
///
/// ## Usage
/// ```rust,ignore
/// let mut list = ProductListController::open(db.products()).await?;
/// let mut events = list.subscribe();
///
/// list.select_for_edit(None);
/// list.edit_operating(|p| p.name = "Widget".into());
/// let saved = list.save().await?;
/// ```
#[derive(Debug)]
pub struct ProductListController<S> {
    store: S,
    products: Vec<Product>,
    operating_product: Product,
    is_busy: bool,
    busy_text: String,
    events: broadcast::Sender<ProductListEvent>,
}

impl<S: ProductStore> ProductListController<S> {
    /// Wraps a store without touching it.
    ///
    /// The collection starts empty. Call [`initialize`](Self::initialize)
    /// (or use [`open`](Self::open)) before issuing commands.
    pub fn new(store: S) -> Self {
        let (events, _) = broadcast::channel(EVENT_CHANNEL_CAPACITY);
        ProductListController {
            store,
            products: Vec::new(),
            operating_product: Product::new(),
            is_busy: false,
            busy_text: DEFAULT_BUSY_TEXT.to_string(),
            events,
        }
    }

    /// Wraps a store, creates the table and loads the list.
    pub async fn open(store: S) -> Result<Self, S::Error> {
        let mut controller = ProductListController::new(store);
        controller.initialize().await?;
        Ok(controller)
    }

    /// Creates the products table if needed, then loads the list.
    pub async fn initialize(&mut self) -> Result<(), S::Error> {
        self.store.create_table().await?;
        self.load().await
    }

    /// Replaces the caption shown while busy.
    pub fn with_busy_text(mut self, text: impl Into<String>) -> Self {
        self.busy_text = text.into();
        self
    }

    // -------------------------------------------------------------------------
    // Observable properties
    // -------------------------------------------------------------------------

    /// Returns a receiver for change events published from now on.
    pub fn subscribe(&self) -> broadcast::Receiver<ProductListEvent> {
        self.events.subscribe()
    }

    /// Products in store order.
    pub fn products(&self) -> &[Product] {
        &self.products
    }

    /// The product staged for creation or edit.
    pub fn operating_product(&self) -> &Product {
        &self.operating_product
    }

    /// True while a store operation is in flight.
    pub fn is_busy(&self) -> bool {
        self.is_busy
    }

    pub fn busy_text(&self) -> &str {
        &self.busy_text
    }

    /// Copies every observable property.
    pub fn snapshot(&self) -> ProductListSnapshot {
        ProductListSnapshot {
            products: self.products.clone(),
            operating_product: self.operating_product.clone(),
            is_busy: self.is_busy,
            busy_text: self.busy_text.clone(),
        }
    }

    /// The underlying store.
    pub fn store(&self) -> &S {
        &self.store
    }

    // -------------------------------------------------------------------------
    // Commands
    // -------------------------------------------------------------------------

    /// Stages `product` for editing, or a blank product when `None`.
    pub fn select_for_edit(&mut self, product: Option<Product>) {
        self.operating_product = product.unwrap_or_default();
        debug!(id = self.operating_product.id, "Operating product selected");
        self.publish(ProductListEvent::OperatingProductChanged);
    }

    /// Applies `edit` to the operating product and notifies observers.
    pub fn edit_operating<F>(&mut self, edit: F)
    where
        F: FnOnce(&mut Product),
    {
        edit(&mut self.operating_product);
        self.publish(ProductListEvent::OperatingProductChanged);
    }

    /// Persists the operating product and reloads the list.
    ///
    /// ## Behavior
    /// - `id == 0`: inserted, the store assigns the id
    /// - `id != 0`: the row with that id is updated; if the row is gone
    ///   nothing is written and the reload drops it from the list
    ///
    /// On success the operating product is reset to blank and the saved
    /// product (with its id) is returned. On failure the operating product
    /// is left as it was.
    pub async fn save(&mut self) -> Result<Product, S::Error> {
        self.set_busy(true);
        let result = self.save_inner().await;
        self.set_busy(false);

        if let Err(e) = &result {
            warn!(error = %e, "Saving product failed");
        }
        result
    }

    async fn save_inner(&mut self) -> Result<Product, S::Error> {
        let mut product = self.operating_product.clone();

        if product.is_new() {
            product.id = self.store.insert(&product).await?;
            info!(id = product.id, name = %product.name, "Product created");
        } else {
            if self.store.update(&product).await? {
                info!(id = product.id, name = %product.name, "Product updated");
            } else {
                warn!(id = product.id, "Product no longer stored, nothing updated");
            }
        }

        self.operating_product = Product::new();
        self.publish(ProductListEvent::OperatingProductChanged);

        self.reload().await?;
        Ok(product)
    }

    /// Deletes the product with `id` and reloads the list.
    ///
    /// Returns `false` without touching the store's rows (or the busy flag)
    /// when no such product exists.
    pub async fn delete(&mut self, id: i64) -> Result<bool, S::Error> {
        let product = match self.store.find(id).await {
            Ok(Some(product)) => product,
            Ok(None) => {
                debug!(id, "Delete skipped, product not found");
                return Ok(false);
            }
            Err(e) => {
                warn!(id, error = %e, "Looking up product for delete failed");
                return Err(e);
            }
        };

        self.set_busy(true);
        let result = self.delete_inner(product).await;
        self.set_busy(false);

        if let Err(e) = &result {
            warn!(id, error = %e, "Deleting product failed");
        }
        result.map(|_| true)
    }

    async fn delete_inner(&mut self, product: Product) -> Result<(), S::Error> {
        self.store.delete(product.id).await?;
        info!(id = product.id, name = %product.name, "Product deleted");
        self.reload().await
    }

    /// Rebuilds the list from a full-table scan.
    pub async fn load(&mut self) -> Result<(), S::Error> {
        self.set_busy(true);
        let result = self.reload().await;
        self.set_busy(false);

        if let Err(e) = &result {
            warn!(error = %e, "Loading products failed");
        }
        result
    }

    async fn reload(&mut self) -> Result<(), S::Error> {
        let products = self.store.scan(ProductFilter::All).await?;

        self.products.clear();
        self.products.extend(products);
        debug!(count = self.products.len(), "Products loaded");

        self.publish(ProductListEvent::ProductsChanged);
        Ok(())
    }

    // -------------------------------------------------------------------------
    // Notification helpers
    // -------------------------------------------------------------------------

    fn set_busy(&mut self, busy: bool) {
        if self.is_busy != busy {
            self.is_busy = busy;
            self.publish(ProductListEvent::BusyChanged(busy));
        }
    }

    fn publish(&self, event: ProductListEvent) {
        // No subscribers is fine
        let _ = self.events.send(event);
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CoreError;
    use crate::memory::MemoryProductStore;
    use crate::money::Money;
    use tokio::sync::broadcast::error::TryRecvError;

    fn drain(rx: &mut broadcast::Receiver<ProductListEvent>) -> Vec<ProductListEvent> {
        let mut events = Vec::new();
        loop {
            match rx.try_recv() {
                Ok(event) => events.push(event),
                Err(TryRecvError::Empty) | Err(TryRecvError::Closed) => break,
                Err(TryRecvError::Lagged(_)) => continue,
            }
        }
        events
    }

    async fn open_empty() -> ProductListController<MemoryProductStore> {
        ProductListController::open(MemoryProductStore::new())
            .await
            .unwrap()
    }

    async fn open_with(names: &[&str]) -> ProductListController<MemoryProductStore> {
        let store = MemoryProductStore::with_products(
            names
                .iter()
                .map(|name| Product::with_details(*name, Money::from_cents(100))),
        );
        ProductListController::open(store).await.unwrap()
    }

    #[tokio::test]
    async fn test_load_empty_store_toggles_busy() {
        let mut list = ProductListController::new(MemoryProductStore::new());
        let mut rx = list.subscribe();

        list.initialize().await.unwrap();

        assert!(list.products().is_empty());
        assert!(!list.is_busy());
        assert_eq!(
            drain(&mut rx),
            vec![
                ProductListEvent::BusyChanged(true),
                ProductListEvent::ProductsChanged,
                ProductListEvent::BusyChanged(false),
            ]
        );
    }

    #[tokio::test]
    async fn test_open_loads_existing_rows_in_store_order() {
        let list = open_with(&["A", "B", "C"]).await;
        let names: Vec<&str> = list.products().iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["A", "B", "C"]);
    }

    #[tokio::test]
    async fn test_save_widget_scenario() {
        let mut list = open_empty().await;

        list.select_for_edit(Some(Product::with_details(
            "Widget",
            "9.99".parse().unwrap(),
        )));
        let saved = list.save().await.unwrap();

        assert!(saved.id > 0);
        assert_eq!(list.products().len(), 1);
        let row = &list.products()[0];
        assert_eq!(row.id, saved.id);
        assert_eq!(row.name, "Widget");
        assert_eq!(row.price().to_string(), "9.99");
    }

    #[tokio::test]
    async fn test_save_new_appears_exactly_once() {
        let mut list = open_with(&["A", "B"]).await;

        list.edit_operating(|p| p.name = "C".to_string());
        let saved = list.save().await.unwrap();

        assert!(saved.id > 0);
        assert_eq!(list.products().len(), 3);
        assert_eq!(
            list.products().iter().filter(|p| p.id == saved.id).count(),
            1
        );
    }

    #[tokio::test]
    async fn test_save_resets_operating_product() {
        let mut list = open_empty().await;
        list.edit_operating(|p| p.name = "Widget".to_string());

        list.save().await.unwrap();

        assert!(list.operating_product().is_new());
        assert!(list.operating_product().name.is_empty());
    }

    #[tokio::test]
    async fn test_save_existing_updates_without_duplicate() {
        let mut list = open_with(&["A", "B"]).await;
        let mut edited = list.products()[1].clone();
        edited.name = "B2".to_string();
        edited.set_price(Money::from_cents(4200));

        list.select_for_edit(Some(edited.clone()));
        let saved = list.save().await.unwrap();

        assert_eq!(saved.id, edited.id);
        assert_eq!(list.products().len(), 2);
        assert_eq!(list.products()[1], edited);
        assert_eq!(list.store().len().await, 2);
    }

    #[tokio::test]
    async fn test_save_event_order() {
        let mut list = open_empty().await;
        let mut rx = list.subscribe();

        list.save().await.unwrap();

        assert_eq!(
            drain(&mut rx),
            vec![
                ProductListEvent::BusyChanged(true),
                ProductListEvent::OperatingProductChanged,
                ProductListEvent::ProductsChanged,
                ProductListEvent::BusyChanged(false),
            ]
        );
    }

    #[tokio::test]
    async fn test_save_failure_clears_busy_and_keeps_state() {
        let mut list = open_with(&["A"]).await;
        list.edit_operating(|p| p.name = "Pending".to_string());
        list.store().set_unavailable(true);

        let err = list.save().await.unwrap_err();

        assert!(matches!(err, CoreError::StoreUnavailable(_)));
        assert!(!list.is_busy());
        assert_eq!(list.operating_product().name, "Pending");
        assert_eq!(list.products().len(), 1);
    }

    #[tokio::test]
    async fn test_save_of_deleted_row_drops_it_from_list() {
        let mut list = open_with(&["A", "B"]).await;
        let stale = list.products()[0].clone();
        list.store().delete(stale.id).await.unwrap();

        list.select_for_edit(Some(stale.clone()));
        list.edit_operating(|p| p.name = "A2".to_string());
        let saved = list.save().await.unwrap();

        assert_eq!(saved.id, stale.id);
        assert!(list.operating_product().is_new());
        assert!(!list.is_busy());
        assert_eq!(list.products().len(), 1);
        assert!(list.products().iter().all(|p| p.id != stale.id));
        assert_eq!(list.store().len().await, 1);
    }

    #[tokio::test]
    async fn test_delete_lookup_failure_is_returned() {
        let mut list = open_with(&["A"]).await;
        let mut rx = list.subscribe();
        list.store().set_unavailable(true);

        let err = list.delete(1).await.unwrap_err();

        assert!(matches!(err, CoreError::StoreUnavailable(_)));
        assert!(!list.is_busy());
        assert_eq!(list.products().len(), 1);
        assert!(drain(&mut rx).is_empty());
    }

    #[tokio::test]
    async fn test_delete_missing_is_noop() {
        let mut list = open_with(&["A", "B"]).await;
        let before = list.products().to_vec();
        let mut rx = list.subscribe();

        let deleted = list.delete(99).await.unwrap();

        assert!(!deleted);
        assert_eq!(list.products(), before.as_slice());
        assert!(drain(&mut rx).is_empty());
    }

    #[tokio::test]
    async fn test_delete_existing_removes_exactly_one() {
        let mut list = open_with(&["A", "B", "C"]).await;
        let target = list.products()[1].id;

        let deleted = list.delete(target).await.unwrap();

        assert!(deleted);
        assert_eq!(list.products().len(), 2);
        assert!(list.products().iter().all(|p| p.id != target));
        assert_eq!(list.store().len().await, 2);
    }

    #[tokio::test]
    async fn test_delete_failure_clears_busy() {
        let mut list = open_with(&["A"]).await;
        list.store().set_unavailable(true);

        assert!(list.delete(1).await.is_err());
        assert!(!list.is_busy());
        assert_eq!(list.products().len(), 1);
    }

    #[tokio::test]
    async fn test_select_none_yields_blank() {
        let mut list = open_with(&["A"]).await;
        list.select_for_edit(Some(list.products()[0].clone()));
        assert!(!list.operating_product().is_new());

        list.select_for_edit(None);

        assert_eq!(list.operating_product().id, 0);
        assert_eq!(list.operating_product(), &Product::new());
    }

    #[tokio::test]
    async fn test_select_publishes_change() {
        let mut list = open_empty().await;
        let mut rx = list.subscribe();

        list.select_for_edit(None);
        list.edit_operating(|p| p.name = "X".to_string());

        assert_eq!(
            drain(&mut rx),
            vec![
                ProductListEvent::OperatingProductChanged,
                ProductListEvent::OperatingProductChanged,
            ]
        );
    }

    #[tokio::test]
    async fn test_load_failure_keeps_previous_collection() {
        let mut list = open_with(&["A", "B"]).await;
        list.store().set_unavailable(true);

        assert!(list.load().await.is_err());
        assert_eq!(list.products().len(), 2);
        assert!(!list.is_busy());
    }

    #[tokio::test]
    async fn test_snapshot_copies_properties() {
        let list = open_with(&["A"]).await.with_busy_text("Working...");
        let snapshot = list.snapshot();

        assert_eq!(snapshot.products.len(), 1);
        assert!(snapshot.operating_product.is_new());
        assert!(!snapshot.is_busy);
        assert_eq!(snapshot.busy_text, "Working...");

        let json = serde_json::to_value(&snapshot).unwrap();
        assert_eq!(json["isBusy"], false);
        assert_eq!(json["operatingProduct"]["id"], 0);
    }

    #[test]
    fn test_event_serialization() {
        let json = serde_json::to_value(ProductListEvent::BusyChanged(true)).unwrap();
        assert_eq!(json["kind"], "busy_changed");
        assert_eq!(json["value"], true);
    }
}
