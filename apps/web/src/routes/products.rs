//! # Product Routes
//!
//! Administrators see and edit the full product row. Sellers get the reduced
//! [`CatalogEntry`] view: code, name, price and stock.

use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, Query, State};
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Deserialize;
use serde_json::{json, Value};
use tracing::{debug, info};

use pernos_core::access::{ADMIN_ONLY, STAFF};
use pernos_core::input::ProductInput;
use pernos_core::validation::validate_search_query;
use pernos_core::{CatalogEntry, Product, ProductDetail};
use pernos_db::repository::product::QUICK_SEARCH_LIMIT;

use super::ListQuery;
use crate::auth::CurrentUser;
use crate::error::ApiError;
use crate::AppState;

#[derive(Debug, Default, Deserialize)]
pub struct SearchQuery {
    #[serde(default)]
    pub q: String,
}

/// `GET /api/products?q=&page=`
pub async fn list(
    State(state): State<AppState>,
    current: CurrentUser,
    Query(query): Query<ListQuery>,
) -> Result<Response, ApiError> {
    let actor = current.require(STAFF)?;
    let search = query.search().map(validate_search_query).transpose()?;
    let page = state.page(query.page());

    let products = state.db.products();
    if actor.is_administrator() {
        let listing = products.list(search.as_deref(), page).await?;
        Ok(Json(listing).into_response())
    } else {
        let listing = products.list_catalog(search.as_deref(), page).await?;
        Ok(Json(listing).into_response())
    }
}

/// `GET /api/products/search?q=`: the POS search box.
pub async fn search(
    State(state): State<AppState>,
    current: CurrentUser,
    Query(query): Query<SearchQuery>,
) -> Result<Json<Vec<CatalogEntry>>, ApiError> {
    current.require(STAFF)?;
    let q = validate_search_query(&query.q)?;

    let matches = state.db.products().quick_search(&q, QUICK_SEARCH_LIMIT).await?;
    debug!(query = %q, count = matches.len(), "Product search");
    Ok(Json(matches))
}

/// `GET /api/products/low-stock`
pub async fn low_stock(
    State(state): State<AppState>,
    current: CurrentUser,
) -> Result<Json<Vec<ProductDetail>>, ApiError> {
    current.require(ADMIN_ONLY)?;
    Ok(Json(state.db.products().low_stock().await?))
}

/// `GET /api/products/{id}`
pub async fn get(
    State(state): State<AppState>,
    current: CurrentUser,
    Path(id): Path<i64>,
) -> Result<Response, ApiError> {
    let actor = current.require(STAFF)?;

    let product = state
        .db
        .products()
        .get_by_id(id)
        .await?
        .ok_or_else(|| ApiError::not_found("Product", id))?;

    if actor.is_administrator() {
        Ok(Json(product).into_response())
    } else {
        Ok(Json(CatalogEntry::from(&product)).into_response())
    }
}

/// `POST /api/products`
pub async fn create(
    State(state): State<AppState>,
    current: CurrentUser,
    payload: Result<Json<ProductInput>, JsonRejection>,
) -> Result<Json<Product>, ApiError> {
    let actor = current.require(ADMIN_ONLY)?;
    let Json(input) = payload?;
    let input = input.validate()?;

    let product = state.db.products().insert(&input).await?;
    info!(user_id = actor.id, product_id = product.id, code = %product.code, "Product created");
    Ok(Json(product))
}

/// `PUT /api/products/{id}`
pub async fn update(
    State(state): State<AppState>,
    current: CurrentUser,
    Path(id): Path<i64>,
    payload: Result<Json<ProductInput>, JsonRejection>,
) -> Result<Json<Product>, ApiError> {
    let actor = current.require(ADMIN_ONLY)?;
    let Json(input) = payload?;
    let input = input.validate()?;

    let product = state.db.products().update(id, &input).await?;
    info!(user_id = actor.id, product_id = id, "Product updated");
    Ok(Json(product))
}

/// `DELETE /api/products/{id}`: refused once the product has been sold.
pub async fn remove(
    State(state): State<AppState>,
    current: CurrentUser,
    Path(id): Path<i64>,
) -> Result<Json<Value>, ApiError> {
    let actor = current.require(ADMIN_ONLY)?;

    state.db.products().delete(id).await?;
    info!(user_id = actor.id, product_id = id, "Product deleted");
    Ok(Json(json!({ "success": true })))
}
