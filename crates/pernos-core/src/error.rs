//! # Error Types
//!
//! Domain-specific error types for pernos-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  pernos-core errors (this file)                                        │
//! │  ├── CoreError        - Access decisions (401 / 403)                   │
//! │  └── ValidationError  - Client input failures                          │
//! │                                                                         │
//! │  pernos-db errors                                                      │
//! │  ├── DbError          - Database operation failures                    │
//! │  └── FinalizeError    - Sale checkout failures (always rolled back)    │
//! │                                                                         │
//! │  apps/web errors                                                       │
//! │  └── ApiError         - JSON envelope + HTTP status                    │
//! │                                                                         │
//! │  Flow: ValidationError → FinalizeError → ApiError → client             │
//! │        CoreError ─────────────────────► ApiError → client             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use thiserror::Error;

// =============================================================================
// Core Error
// =============================================================================

/// Role gate failures, produced by [`crate::access::require_role`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CoreError {
    /// Caller is not logged in.
    #[error("Authentication required")]
    Unauthenticated,

    /// Caller is logged in but lacks one of the required roles.
    #[error("Access denied: requires one of the roles: {required}")]
    AccessDenied { required: String },
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// Every variant is client-caused: the request can be corrected and resent.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Field value is too short.
    #[error("{field} must be at least {min} characters")]
    TooShort { field: String, min: usize },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// Numeric value is out of range.
    #[error("{field} must be between {min} and {max}")]
    OutOfRange { field: String, min: i64, max: i64 },

    /// Value must be positive.
    #[error("{field} must be positive")]
    MustBePositive { field: String },

    /// Invalid format (e.g., malformed email).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },

    /// Value is not a number of the expected kind.
    #[error("{field} is not a valid {expected}: '{value}'")]
    InvalidNumber {
        field: String,
        expected: &'static str,
        value: String,
    },

    /// Value is not in allowed set.
    #[error("{field} must be one of: {allowed:?}")]
    NotAllowed { field: String, allowed: Vec<String> },

    /// The submitted cart has no lines.
    #[error("Cart is empty")]
    EmptyCart,

    /// A cart line references a product that does not exist.
    #[error("Cart line {line}: product {product_id} does not exist")]
    UnknownProduct { line: usize, product_id: i64 },

    /// The client's unit price differs from the catalog price.
    #[error("Cart line {line}: unit price {submitted} does not match catalog price {expected}")]
    PriceMismatch {
        line: usize,
        submitted: String,
        expected: String,
    },

    /// The client's line subtotal differs from quantity × unit price.
    #[error("Cart line {line}: subtotal {submitted} does not match computed {expected}")]
    SubtotalMismatch {
        line: usize,
        submitted: String,
        expected: String,
    },

    /// The declared cart total differs from the sum of line subtotals.
    #[error("Declared total {declared} does not match line subtotals {computed}")]
    TotalMismatch { declared: String, computed: String },
}

impl ValidationError {
    /// Shorthand for [`ValidationError::Required`].
    pub fn required(field: impl Into<String>) -> Self {
        ValidationError::Required {
            field: field.into(),
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = CoreError::AccessDenied {
            required: "administrator".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Access denied: requires one of the roles: administrator"
        );
    }

    #[test]
    fn test_validation_error_messages() {
        assert_eq!(ValidationError::required("total").to_string(), "total is required");
        assert_eq!(ValidationError::EmptyCart.to_string(), "Cart is empty");

        let err = ValidationError::InvalidNumber {
            field: "cart[0].quantity".to_string(),
            expected: "integer",
            value: "abc".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "cart[0].quantity is not a valid integer: 'abc'"
        );
    }
}
