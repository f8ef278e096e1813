//! Staff account administration (administrators only).

use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::Json;
use serde_json::{json, Value};
use tracing::{info, warn};

use pernos_core::access::ADMIN_ONLY;
use pernos_core::input::NewUser;
use pernos_core::User;

use crate::auth::{hash_password, CurrentUser};
use crate::error::ApiError;
use crate::AppState;

/// `GET /api/users`
pub async fn list(
    State(state): State<AppState>,
    current: CurrentUser,
) -> Result<Json<Vec<User>>, ApiError> {
    current.require(ADMIN_ONLY)?;
    Ok(Json(state.db.users().list().await?))
}

/// `POST /api/users`
///
/// The password is validated, then hashed; the plaintext never reaches the
/// store or the logs.
pub async fn create(
    State(state): State<AppState>,
    current: CurrentUser,
    payload: Result<Json<NewUser>, JsonRejection>,
) -> Result<Json<User>, ApiError> {
    let actor = current.require(ADMIN_ONLY)?;
    let Json(input) = payload?;
    let input = input.validate()?;

    let password_hash = hash_password(&input.password)?;
    let user = state
        .db
        .users()
        .insert(&input.email, &input.name, &password_hash, input.role)
        .await?;

    info!(user_id = actor.id, new_user_id = user.id, role = %user.role, "User created");
    Ok(Json(user))
}

/// `DELETE /api/users/{id}`: an administrator cannot delete themself.
pub async fn remove(
    State(state): State<AppState>,
    current: CurrentUser,
    Path(id): Path<i64>,
) -> Result<Json<Value>, ApiError> {
    let actor = current.require(ADMIN_ONLY)?;
    if actor.id == id {
        warn!(user_id = actor.id, "Refused self-deletion");
        return Err(ApiError::validation("You cannot delete your own account"));
    }

    state.db.users().delete(id).await?;
    info!(user_id = actor.id, deleted_user_id = id, "User deleted");
    Ok(Json(json!({ "success": true })))
}
