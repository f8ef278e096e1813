//! # pernos-core: Pure Business Logic for Pernos POS
//!
//! Domain types and rules for the hardware-store point of sale, with zero I/O
//! dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Pernos POS Architecture                          │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                    apps/web (axum JSON API)                     │   │
//! │  │    login ──► authorize ──► finalize sale ──► list / search      │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ pernos-core (THIS CRATE) ★                      │   │
//! │  │                                                                 │   │
//! │  │   ┌─────────┐ ┌─────────┐ ┌─────────┐ ┌──────────┐ ┌────────┐  │   │
//! │  │   │  types  │ │  money  │ │  cart   │ │validation│ │ access │  │   │
//! │  │   └─────────┘ └─────────┘ └─────────┘ └──────────┘ └────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO DATABASE • NO NETWORK • PURE FUNCTIONS           │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                    pernos-db (Database Layer)                   │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Entities (Product, Sale, Customer, ...)
//! - [`input`] - Create/update payloads with their validation
//! - [`money`] - Integer-cent money with decimal parsing
//! - [`cart`] - Submitted cart parsing and price verification
//! - [`access`] - Role gates for handlers
//! - [`pagination`] - Page requests and paged results
//! - [`validation`] - Field validators
//! - [`error`] - Domain error types
//!
//! ## Example Usage
//!
//! ```rust
//! use pernos_core::money::Money;
//!
//! let price = Money::parse_decimal("5.00").unwrap();
//! assert_eq!(price.cents(), 500);
//! assert_eq!((price * 2i64).to_string(), "$10.00");
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod access;
pub mod cart;
pub mod error;
pub mod input;
pub mod money;
pub mod pagination;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use access::{authorize, require_role, Actor, Authorization};
pub use cart::{CartHeader, CartLine, CartLineRequest, CartSubmission, NumericInput};
pub use error::{CoreError, ValidationError};
pub use money::Money;
pub use pagination::{Page, Pagination};
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Customer document recorded on sales made to walk-in customers.
///
/// Sales listings show these as "General Public".
pub const WALK_IN_CUSTOMER_DOCUMENT: &str = "9999999999";

/// Display name used for sales without a registered customer.
pub const WALK_IN_CUSTOMER_NAME: &str = "General Public";

/// Store location recorded on every sale (single-store deployment).
pub const DEFAULT_LOCATION_ID: i64 = 1;

/// Maximum lines allowed in a single cart.
pub const MAX_CART_LINES: usize = 100;

/// Maximum quantity of a single line.
pub const MAX_ITEM_QUANTITY: i64 = 9_999;

/// Default minimum-stock threshold for new products.
pub const DEFAULT_STOCK_MINIMUM: i64 = 10;
