//! # Product Commands
//!
//! Commands for listing, selecting, editing, saving and deleting products.

use serde::Serialize;
use tracing::debug;

use crate::error::ApiError;
use crate::state::ProductListState;
use shelf_core::{Money, Product, ProductListSnapshot, ProductStore};

/// Product DTO (Data Transfer Object) for the page.
///
/// Carries the price both as display text and as cents.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductDto {
    pub id: i64,
    pub name: String,
    pub price: String,
    pub price_cents: i64,
    pub is_new: bool,
}

impl From<Product> for ProductDto {
    fn from(p: Product) -> Self {
        ProductDto {
            id: p.id,
            price: p.price().to_string(),
            price_cents: p.price_cents,
            is_new: p.is_new(),
            name: p.name,
        }
    }
}

/// Everything the page binds to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PageDto {
    pub products: Vec<ProductDto>,
    pub operating_product: ProductDto,
    pub is_busy: bool,
    pub busy_text: String,
}

impl From<ProductListSnapshot> for PageDto {
    fn from(s: ProductListSnapshot) -> Self {
        PageDto {
            products: s.products.into_iter().map(ProductDto::from).collect(),
            operating_product: ProductDto::from(s.operating_product),
            is_busy: s.is_busy,
            busy_text: s.busy_text,
        }
    }
}

/// Returns the list as last loaded (no store access).
pub async fn get_products<S: ProductStore>(state: &ProductListState<S>) -> Vec<ProductDto> {
    let list = state.lock().await;
    list.products().iter().cloned().map(ProductDto::from).collect()
}

/// Returns every observable property.
pub async fn get_page<S: ProductStore>(state: &ProductListState<S>) -> PageDto {
    PageDto::from(state.snapshot().await)
}

/// Reloads the list from the store.
pub async fn reload_products<S>(state: &ProductListState<S>) -> Result<Vec<ProductDto>, ApiError>
where
    S: ProductStore,
    ApiError: From<S::Error>,
{
    debug!("reload_products command");
    let mut list = state.lock().await;
    list.load().await?;
    Ok(list.products().iter().cloned().map(ProductDto::from).collect())
}

/// Stages a listed product for editing, or a blank one when `id` is `None`.
///
/// ## Returns
/// The new operating product, or `NOT_FOUND` if `id` is not in the list.
pub async fn select_product<S: ProductStore>(
    state: &ProductListState<S>,
    id: Option<i64>,
) -> Result<ProductDto, ApiError> {
    debug!(?id, "select_product command");
    let mut list = state.lock().await;

    let product = match id {
        None => None,
        Some(id) => Some(
            list.products()
                .iter()
                .find(|p| p.id == id)
                .cloned()
                .ok_or_else(|| ApiError::not_found("Product", id))?,
        ),
    };

    list.select_for_edit(product);
    Ok(ProductDto::from(list.operating_product().clone()))
}

/// Changes the name and/or price of the operating product.
///
/// The price is parsed before anything changes, so a bad price leaves the
/// name untouched too.
pub async fn edit_operating_product<S: ProductStore>(
    state: &ProductListState<S>,
    name: Option<String>,
    price: Option<String>,
) -> Result<ProductDto, ApiError> {
    debug!(?name, ?price, "edit_operating_product command");

    let price = price.map(|p| p.parse::<Money>()).transpose()?;

    let mut list = state.lock().await;
    list.edit_operating(|product| {
        if let Some(name) = name {
            product.name = name;
        }
        if let Some(price) = price {
            product.set_price(price);
        }
    });
    Ok(ProductDto::from(list.operating_product().clone()))
}

/// Saves the operating product (insert when new, update otherwise).
///
/// ## Returns
/// The saved product with its id.
pub async fn save_product<S>(state: &ProductListState<S>) -> Result<ProductDto, ApiError>
where
    S: ProductStore,
    ApiError: From<S::Error>,
{
    debug!("save_product command");
    let saved = state.lock().await.save().await?;
    Ok(ProductDto::from(saved))
}

/// Deletes a product by id.
///
/// ## Returns
/// `true` if a row was removed, `false` if no such product existed.
pub async fn delete_product<S>(state: &ProductListState<S>, id: i64) -> Result<bool, ApiError>
where
    S: ProductStore,
    ApiError: From<S::Error>,
{
    debug!(id, "delete_product command");
    let deleted = state.lock().await.delete(id).await?;
    Ok(deleted)
}

// =============================================================================
// Unit Tests
// =============================================================================
