//! Login and session introspection.

use axum::extract::State;
use axum::Json;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use pernos_core::access::STAFF;
use pernos_core::validation::validate_required_text;
use pernos_core::{Actor, User};

use crate::auth::{verify_password, CurrentUser};
use crate::error::{ApiError, ErrorCode};
use crate::AppState;

#[derive(Deserialize)]
pub struct LoginRequest {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub success: bool,
    pub token: String,
    pub token_type: &'static str,
    pub expires_in: i64,
    pub user: User,
}

/// `POST /api/auth/login`
///
/// Unknown email and wrong password get the same answer.
pub async fn login(
    State(state): State<AppState>,
    Json(request): Json<LoginRequest>,
) -> Result<Json<LoginResponse>, ApiError> {
    let email = validate_required_text("email", &request.email, 255)?;
    if request.password.is_empty() {
        return Err(pernos_core::ValidationError::required("password").into());
    }

    let user = state.db.users().get_by_email(&email).await?;
    let user = match user {
        Some(user) if verify_password(&request.password, &user.password_hash) => user,
        _ => {
            warn!(email = %email, "Failed login attempt");
            return Err(ApiError::new(
                ErrorCode::Unauthenticated,
                "Invalid email or password",
            ));
        }
    };

    let token = state.jwt.generate_token(&user)?;
    info!(user_id = user.id, role = %user.role, "User logged in");

    Ok(Json(LoginResponse {
        success: true,
        token,
        token_type: "Bearer",
        expires_in: state.jwt.lifetime_secs(),
        user,
    }))
}

/// `GET /api/auth/me`
pub async fn me(current: CurrentUser) -> Result<Json<Actor>, ApiError> {
    let actor = current.require(STAFF)?;
    Ok(Json(actor.clone()))
}
