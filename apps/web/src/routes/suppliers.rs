//! Supplier routes. Sellers may look, only administrators may change.

use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, Query, State};
use axum::Json;
use serde_json::{json, Value};
use tracing::info;

use pernos_core::access::{ADMIN_ONLY, STAFF};
use pernos_core::input::SupplierInput;
use pernos_core::{Page, Supplier};

use super::ListQuery;
use crate::auth::CurrentUser;
use crate::error::ApiError;
use crate::AppState;

/// `GET /api/suppliers?page=`
pub async fn list(
    State(state): State<AppState>,
    current: CurrentUser,
    Query(query): Query<ListQuery>,
) -> Result<Json<Page<Supplier>>, ApiError> {
    current.require(STAFF)?;
    let suppliers = state.db.suppliers().list(state.page(query.page())).await?;
    Ok(Json(suppliers))
}

/// `GET /api/suppliers/{id}`
pub async fn get(
    State(state): State<AppState>,
    current: CurrentUser,
    Path(id): Path<i64>,
) -> Result<Json<Supplier>, ApiError> {
    current.require(STAFF)?;
    state
        .db
        .suppliers()
        .get_by_id(id)
        .await?
        .map(Json)
        .ok_or_else(|| ApiError::not_found("Supplier", id))
}

/// `POST /api/suppliers`
pub async fn create(
    State(state): State<AppState>,
    current: CurrentUser,
    payload: Result<Json<SupplierInput>, JsonRejection>,
) -> Result<Json<Supplier>, ApiError> {
    let actor = current.require(ADMIN_ONLY)?;
    let Json(input) = payload?;
    let input = input.validate()?;

    let supplier = state.db.suppliers().insert(&input).await?;
    info!(user_id = actor.id, supplier_id = supplier.id, "Supplier created");
    Ok(Json(supplier))
}

/// `PUT /api/suppliers/{id}`
pub async fn update(
    State(state): State<AppState>,
    current: CurrentUser,
    Path(id): Path<i64>,
    payload: Result<Json<SupplierInput>, JsonRejection>,
) -> Result<Json<Supplier>, ApiError> {
    let actor = current.require(ADMIN_ONLY)?;
    let Json(input) = payload?;
    let input = input.validate()?;

    let supplier = state.db.suppliers().update(id, &input).await?;
    info!(user_id = actor.id, supplier_id = id, "Supplier updated");
    Ok(Json(supplier))
}

/// `DELETE /api/suppliers/{id}`: refused while products reference it.
pub async fn remove(
    State(state): State<AppState>,
    current: CurrentUser,
    Path(id): Path<i64>,
) -> Result<Json<Value>, ApiError> {
    let actor = current.require(ADMIN_ONLY)?;
    state.db.suppliers().delete(id).await?;
    info!(user_id = actor.id, supplier_id = id, "Supplier deleted");
    Ok(Json(json!({ "success": true })))
}
