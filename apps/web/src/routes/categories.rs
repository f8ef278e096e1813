//! Category routes.

use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::Json;
use tracing::info;

use pernos_core::access::{ADMIN_ONLY, STAFF};
use pernos_core::input::NewCategory;
use pernos_core::Category;

use crate::auth::CurrentUser;
use crate::error::ApiError;
use crate::AppState;

/// `GET /api/categories`
pub async fn list(
    State(state): State<AppState>,
    current: CurrentUser,
) -> Result<Json<Vec<Category>>, ApiError> {
    current.require(STAFF)?;
    Ok(Json(state.db.categories().list().await?))
}

/// `POST /api/categories`
pub async fn create(
    State(state): State<AppState>,
    current: CurrentUser,
    payload: Result<Json<NewCategory>, JsonRejection>,
) -> Result<Json<Category>, ApiError> {
    let actor = current.require(ADMIN_ONLY)?;
    let Json(input) = payload?;
    let input = input.validate()?;

    let category = state.db.categories().insert(&input).await?;
    info!(user_id = actor.id, category_id = category.id, "Category created");
    Ok(Json(category))
}
