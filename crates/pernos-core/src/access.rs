//! # Access Control
//!
//! Role gates evaluated at the top of every protected handler.
//!
//! ```text
//!   authorize(actor, allowed)
//!        │
//!        ├── no actor ─────────────────► DeniedUnauthenticated  (401)
//!        ├── role ∉ allowed ───────────► DeniedRedirect         (403)
//!        └── role ∈ allowed ───────────► Allowed
//! ```
//!
//! The decision is a plain value so handlers can map it to a response
//! themselves; nothing here knows about HTTP.

use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::types::{Role, User};

/// Both staff roles.
pub const STAFF: &[Role] = &[Role::Administrator, Role::Seller];

/// Administrators only.
pub const ADMIN_ONLY: &[Role] = &[Role::Administrator];

/// Where a denied user is sent back to.
pub const DENIED_REDIRECT: &str = "/dashboard";

/// The authenticated user making a request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Actor {
    pub id: i64,
    pub email: String,
    pub name: String,
    pub role: Role,
}

impl From<&User> for Actor {
    fn from(user: &User) -> Self {
        Actor {
            id: user.id,
            email: user.email.clone(),
            name: user.name.clone(),
            role: user.role,
        }
    }
}

impl Actor {
    pub fn is_administrator(&self) -> bool {
        self.role == Role::Administrator
    }
}

/// Outcome of a role check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Authorization {
    Allowed,
    /// Logged in, but the role is not permitted here.
    DeniedRedirect { to: &'static str },
    /// Nobody is logged in.
    DeniedUnauthenticated,
}

/// Decides whether `actor` may perform an operation restricted to `allowed`.
///
/// ## Example
/// ```rust
/// use pernos_core::access::{authorize, Actor, Authorization, ADMIN_ONLY, STAFF};
/// use pernos_core::types::Role;
///
/// let seller = Actor { id: 2, email: "s@pernos.local".into(), name: "S".into(), role: Role::Seller };
/// assert_eq!(authorize(Some(&seller), STAFF), Authorization::Allowed);
/// assert_ne!(authorize(Some(&seller), ADMIN_ONLY), Authorization::Allowed);
/// assert_eq!(authorize(None, STAFF), Authorization::DeniedUnauthenticated);
/// ```
pub fn authorize(actor: Option<&Actor>, allowed: &[Role]) -> Authorization {
    match actor {
        None => Authorization::DeniedUnauthenticated,
        Some(actor) if allowed.contains(&actor.role) => Authorization::Allowed,
        Some(_) => Authorization::DeniedRedirect {
            to: DENIED_REDIRECT,
        },
    }
}

/// Like [`authorize`], but as a `Result` carrying the actor on success.
///
/// This is the gate the web handlers apply.
pub fn require_role<'a>(actor: Option<&'a Actor>, allowed: &[Role]) -> Result<&'a Actor, CoreError> {
    match (authorize(actor, allowed), actor) {
        (Authorization::Allowed, Some(actor)) => Ok(actor),
        (Authorization::DeniedRedirect { .. }, _) => Err(CoreError::AccessDenied {
            required: allowed
                .iter()
                .map(Role::as_str)
                .collect::<Vec<_>>()
                .join(", "),
        }),
        _ => Err(CoreError::Unauthenticated),
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn actor(role: Role) -> Actor {
        Actor {
            id: 1,
            email: "x@pernos.local".to_string(),
            name: "X".to_string(),
            role,
        }
    }

    #[test]
    fn test_authorize_matrix() {
        let admin = actor(Role::Administrator);
        let seller = actor(Role::Seller);

        assert_eq!(authorize(Some(&admin), ADMIN_ONLY), Authorization::Allowed);
        assert_eq!(authorize(Some(&admin), STAFF), Authorization::Allowed);
        assert_eq!(authorize(Some(&seller), STAFF), Authorization::Allowed);
        assert_eq!(
            authorize(Some(&seller), ADMIN_ONLY),
            Authorization::DeniedRedirect { to: "/dashboard" }
        );
        assert_eq!(authorize(None, ADMIN_ONLY), Authorization::DeniedUnauthenticated);
    }

    #[test]
    fn test_empty_role_set_denies_everyone() {
        assert_ne!(
            authorize(Some(&actor(Role::Administrator)), &[]),
            Authorization::Allowed
        );
    }

    #[test]
    fn test_require_role() {
        let seller = actor(Role::Seller);
        assert_eq!(require_role(Some(&seller), STAFF).unwrap().id, 1);

        match require_role(Some(&seller), ADMIN_ONLY) {
            Err(CoreError::AccessDenied { required }) => assert_eq!(required, "administrator"),
            other => panic!("expected AccessDenied, got {other:?}"),
        }

        assert!(matches!(require_role(None, STAFF), Err(CoreError::Unauthenticated)));
    }
}
