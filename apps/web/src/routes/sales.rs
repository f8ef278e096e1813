//! # Sale Routes
//!
//! `POST /api/sales/finalize` turns a till cart into a committed sale. The
//! body is taken as-is and every check happens in
//! [`SaleRepository::finalize`](pernos_db::SaleRepository::finalize):
//!
//! ```text
//!   200 {"success": true,  "sale_id": 17}
//!   400 {"success": false, "message": "cart[1].quantity must be an integer ..."}
//!   409 {"success": false, "message": "Insufficient stock for PER-M8 ..."}
//!   500 {"success": false, "message": "The sale could not be recorded ..."}
//! ```

use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, Query, State};
use axum::Json;
use serde::Serialize;

use pernos_core::access::STAFF;
use pernos_core::{CartSubmission, Page, SaleDetail, SaleSummary};

use super::ListQuery;
use crate::auth::CurrentUser;
use crate::error::ApiError;
use crate::AppState;

#[derive(Debug, Serialize)]
pub struct FinalizeResponse {
    pub success: bool,
    pub sale_id: i64,
}

/// `POST /api/sales/finalize`
pub async fn finalize(
    State(state): State<AppState>,
    current: CurrentUser,
    payload: Result<Json<CartSubmission>, JsonRejection>,
) -> Result<Json<FinalizeResponse>, ApiError> {
    let actor = current.require(STAFF)?;
    let Json(submission) = payload?;

    // Outcome is logged by the repository
    let sale_id = state.db.sales().finalize(&submission, actor).await?;

    Ok(Json(FinalizeResponse {
        success: true,
        sale_id,
    }))
}

/// `GET /api/sales?page=`: newest first.
pub async fn list(
    State(state): State<AppState>,
    current: CurrentUser,
    Query(query): Query<ListQuery>,
) -> Result<Json<Page<SaleSummary>>, ApiError> {
    current.require(STAFF)?;
    Ok(Json(state.db.sales().list(state.page(query.page())).await?))
}

/// `GET /api/sales/{id}`
pub async fn get(
    State(state): State<AppState>,
    current: CurrentUser,
    Path(id): Path<i64>,
) -> Result<Json<SaleDetail>, ApiError> {
    current.require(STAFF)?;
    state
        .db
        .sales()
        .get_detail(id)
        .await?
        .map(Json)
        .ok_or_else(|| ApiError::not_found("Sale", id))
}
