//! JWT authentication module.
//!
//! Handles token issuance and validation, password hashing, and the
//! [`CurrentUser`] extractor every protected handler starts from.
//!
//! ```text
//!   Authorization: Bearer <jwt>
//!          │
//!          ▼
//!   JwtManager::validate_token ──✗──► CurrentUser(None)
//!          │
//!          ▼
//!   users.get_by_id(claims.sub) ─✗──► CurrentUser(None)   (account deleted)
//!          │
//!          ▼
//!   CurrentUser(Some(actor)) ──► handler calls .require(roles)
//! ```

use argon2::password_hash::{rand_core::OsRng, SaltString};
use argon2::{Argon2, PasswordHash, PasswordHasher, PasswordVerifier};
use axum::extract::FromRequestParts;
use axum::http::header::AUTHORIZATION;
use axum::http::request::Parts;
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, TokenData, Validation};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};
use uuid::Uuid;

use pernos_core::{require_role, Actor, CoreError, Role, User};

use crate::error::ApiError;
use crate::AppState;

/// JWT claims structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Subject (user id)
    pub sub: String,

    /// Email at issue time
    pub email: String,

    /// Role at issue time; the live row wins on every request
    pub role: Role,

    /// Issued at (Unix timestamp)
    pub iat: i64,

    /// Expiration (Unix timestamp)
    pub exp: i64,

    /// JWT ID (unique identifier for this token)
    pub jti: String,
}

impl Claims {
    pub fn user_id(&self) -> Option<i64> {
        self.sub.parse().ok()
    }
}

/// JWT token manager.
pub struct JwtManager {
    secret: String,
    lifetime_secs: i64,
}

impl JwtManager {
    /// Create a new JWT manager.
    pub fn new(secret: String, lifetime_secs: i64) -> Self {
        JwtManager {
            secret,
            lifetime_secs,
        }
    }

    pub fn lifetime_secs(&self) -> i64 {
        self.lifetime_secs
    }

    /// Generate a bearer token for `user`.
    pub fn generate_token(&self, user: &User) -> Result<String, ApiError> {
        let now = Utc::now();
        let exp = now + Duration::seconds(self.lifetime_secs);

        let claims = Claims {
            sub: user.id.to_string(),
            email: user.email.clone(),
            role: user.role,
            iat: now.timestamp(),
            exp: exp.timestamp(),
            jti: Uuid::new_v4().to_string(),
        };

        encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(self.secret.as_bytes()),
        )
        .map_err(|e| {
            tracing::error!("Failed to generate token: {}", e);
            ApiError::internal("Failed to generate token")
        })
    }

    /// Validate and decode a token.
    pub fn validate_token(&self, token: &str) -> Result<Claims, jsonwebtoken::errors::Error> {
        let token_data: TokenData<Claims> = decode(
            token,
            &DecodingKey::from_secret(self.secret.as_bytes()),
            &Validation::default(),
        )?;

        Ok(token_data.claims)
    }
}

/// Extract bearer token from authorization header.
pub fn extract_bearer_token(auth_header: &str) -> Option<&str> {
    auth_header
        .strip_prefix("Bearer ")
        .map(str::trim)
        .filter(|token| !token.is_empty())
}

// =============================================================================
// Passwords
// =============================================================================

/// Hash a password for storage (argon2id PHC string).
pub fn hash_password(password: &str) -> Result<String, ApiError> {
    let salt = SaltString::generate(&mut OsRng);

    let hash = Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| {
            tracing::error!("Failed to hash password: {}", e);
            ApiError::internal("Failed to hash password")
        })?;

    Ok(hash.to_string())
}

/// Verify a password against its stored hash. A malformed hash never matches.
pub fn verify_password(password: &str, hash: &str) -> bool {
    let parsed_hash = match PasswordHash::new(hash) {
        Ok(h) => h,
        Err(_) => return false,
    };

    Argon2::default()
        .verify_password(password.as_bytes(), &parsed_hash)
        .is_ok()
}

// =============================================================================
// Extractor
// =============================================================================

/// The user behind a request, if any.
///
/// Extraction never rejects for a missing or bad token; handlers decide what
/// an anonymous caller may do through [`CurrentUser::require`].
#[derive(Debug, Clone)]
pub struct CurrentUser(pub Option<Actor>);

impl CurrentUser {
    pub fn actor(&self) -> Option<&Actor> {
        self.0.as_ref()
    }

    /// Applies a role gate.
    ///
    /// ## Returns
    /// * `Ok(actor)` - Logged in with one of `allowed`
    /// * `Err(401)` - Nobody is logged in
    /// * `Err(403)` - Logged in with another role; carries the redirect target
    pub fn require(&self, allowed: &[Role]) -> Result<&Actor, ApiError> {
        require_role(self.actor(), allowed).map_err(|err| {
            if let CoreError::AccessDenied { required } = &err {
                warn!(
                    user_id = self.actor().map(|a| a.id),
                    role = ?self.actor().map(|a| a.role),
                    required = %required,
                    "Access denied"
                );
            }
            ApiError::from(err)
        })
    }
}

impl FromRequestParts<AppState> for CurrentUser {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let token = parts
            .headers
            .get(AUTHORIZATION)
            .and_then(|h| h.to_str().ok())
            .and_then(extract_bearer_token);

        let Some(token) = token else {
            return Ok(CurrentUser(None));
        };

        let claims = match state.jwt.validate_token(token) {
            Ok(claims) => claims,
            Err(e) => {
                debug!(error = %e, uri = %parts.uri, "Rejected bearer token");
                return Ok(CurrentUser(None));
            }
        };

        let Some(user_id) = claims.user_id() else {
            return Ok(CurrentUser(None));
        };

        // The account may have been deleted or changed role since issue
        let user = state.db.users().get_by_id(user_id).await?;
        Ok(CurrentUser(user.as_ref().map(Actor::from)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user(role: Role) -> User {
        User {
            id: 7,
            email: "seller@pernos.local".to_string(),
            name: "Seller".to_string(),
            password_hash: String::new(),
            role,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_jwt_roundtrip() {
        let manager = JwtManager::new("test-secret".to_string(), 3600);

        let token = manager.generate_token(&user(Role::Seller)).unwrap();
        let claims = manager.validate_token(&token).unwrap();

        assert_eq!(claims.user_id(), Some(7));
        assert_eq!(claims.email, "seller@pernos.local");
        assert_eq!(claims.role, Role::Seller);
        assert!(claims.exp > claims.iat);
    }

    #[test]
    fn test_wrong_secret() {
        let issuer = JwtManager::new("secret-a".to_string(), 3600);
        let verifier = JwtManager::new("secret-b".to_string(), 3600);

        let token = issuer.generate_token(&user(Role::Administrator)).unwrap();
        assert!(verifier.validate_token(&token).is_err());
    }

    #[test]
    fn test_extract_bearer_token() {
        assert_eq!(extract_bearer_token("Bearer abc.def"), Some("abc.def"));
        assert_eq!(extract_bearer_token("Basic abc"), None);
        assert_eq!(extract_bearer_token("Bearer "), None);
    }

    #[test]
    fn test_password_hashing() {
        let hash = hash_password("correct horse").unwrap();
        assert!(hash.starts_with("$argon2"));
        assert!(verify_password("correct horse", &hash));
        assert!(!verify_password("wrong horse", &hash));
        assert!(!verify_password("correct horse", "not-a-phc-string"));
    }

    #[test]
    fn test_require() {
        let seller = CurrentUser(Some(Actor::from(&user(Role::Seller))));
        assert!(seller.require(pernos_core::access::STAFF).is_ok());

        let denied = seller.require(pernos_core::access::ADMIN_ONLY).unwrap_err();
        assert_eq!(denied.status(), axum::http::StatusCode::FORBIDDEN);
        assert_eq!(denied.redirect, Some("/dashboard"));

        let anonymous = CurrentUser(None);
        let denied = anonymous.require(pernos_core::access::STAFF).unwrap_err();
        assert_eq!(denied.status(), axum::http::StatusCode::UNAUTHORIZED);
    }
}
