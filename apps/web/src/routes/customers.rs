//! Customer routes.
//!
//! Both roles register and edit customers at the till; deleting one is an
//! administrator task.

use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, Query, State};
use axum::Json;
use serde_json::{json, Value};
use tracing::info;

use pernos_core::access::{ADMIN_ONLY, STAFF};
use pernos_core::input::CustomerInput;
use pernos_core::validation::validate_search_query;
use pernos_core::{Customer, Page};

use super::ListQuery;
use crate::auth::CurrentUser;
use crate::error::ApiError;
use crate::AppState;

/// `GET /api/customers?q=&page=`
pub async fn list(
    State(state): State<AppState>,
    current: CurrentUser,
    Query(query): Query<ListQuery>,
) -> Result<Json<Page<Customer>>, ApiError> {
    current.require(STAFF)?;
    let search = query.search().map(validate_search_query).transpose()?;

    let customers = state
        .db
        .customers()
        .list(search.as_deref(), state.page(query.page()))
        .await?;
    Ok(Json(customers))
}

/// `GET /api/customers/{id}`
pub async fn get(
    State(state): State<AppState>,
    current: CurrentUser,
    Path(id): Path<i64>,
) -> Result<Json<Customer>, ApiError> {
    current.require(STAFF)?;
    state
        .db
        .customers()
        .get_by_id(id)
        .await?
        .map(Json)
        .ok_or_else(|| ApiError::not_found("Customer", id))
}

/// `POST /api/customers`
pub async fn create(
    State(state): State<AppState>,
    current: CurrentUser,
    payload: Result<Json<CustomerInput>, JsonRejection>,
) -> Result<Json<Customer>, ApiError> {
    let actor = current.require(STAFF)?;
    let Json(input) = payload?;
    let input = input.validate()?;

    let customer = state.db.customers().insert(&input).await?;
    info!(user_id = actor.id, customer_id = customer.id, "Customer created");
    Ok(Json(customer))
}

/// `PUT /api/customers/{id}`
pub async fn update(
    State(state): State<AppState>,
    current: CurrentUser,
    Path(id): Path<i64>,
    payload: Result<Json<CustomerInput>, JsonRejection>,
) -> Result<Json<Customer>, ApiError> {
    let actor = current.require(STAFF)?;
    let Json(input) = payload?;
    let input = input.validate()?;

    let customer = state.db.customers().update(id, &input).await?;
    info!(user_id = actor.id, customer_id = id, "Customer updated");
    Ok(Json(customer))
}

/// `DELETE /api/customers/{id}`
pub async fn remove(
    State(state): State<AppState>,
    current: CurrentUser,
    Path(id): Path<i64>,
) -> Result<Json<Value>, ApiError> {
    let actor = current.require(ADMIN_ONLY)?;
    state.db.customers().delete(id).await?;
    info!(user_id = actor.id, customer_id = id, "Customer deleted");
    Ok(Json(json!({ "success": true })))
}
