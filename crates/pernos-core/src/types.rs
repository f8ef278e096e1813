//! # Domain Types
//!
//! Entities stored by Pernos POS.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌──────────────┐    ┌──────────────┐    ┌──────────────┐              │
//! │  │   Supplier   │◄───│   Product    │───►│   Category   │              │
//! │  └──────────────┘    │  code, stock │    └──────────────┘              │
//! │                      └──────▲───────┘                                   │
//! │                             │ referenced                                │
//! │  ┌──────────────┐    ┌──────┴───────┐    ┌──────────────┐              │
//! │  │    Sale      │───►│   SaleItem   │    │   Customer   │              │
//! │  │ (owns items) │    │ qty × price  │    │  document    │              │
//! │  └──────┬───────┘    └──────────────┘    └──────▲───────┘              │
//! │         │ employee_id                           │ customer_document     │
//! │         ▼                                       │ (or walk-in sentinel) │
//! │  ┌──────────────┐                               │                       │
//! │  │     User     │  role: administrator | seller ┘                       │
//! │  └──────────────┘                                                       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Identifiers are SQLite integer row ids. Money columns are integer cents.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::money::Money;

// =============================================================================
// Roles & Users
// =============================================================================

/// Staff role controlling which operations a user may perform.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::Type))]
#[cfg_attr(feature = "sqlx", sqlx(rename_all = "lowercase"))]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Full access: catalog, suppliers, users, reports.
    Administrator,
    /// Point of sale and read access to catalog data.
    Seller,
}

impl Role {
    /// Stable lowercase name, as stored and serialized.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Role::Administrator => "administrator",
            Role::Seller => "seller",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = crate::error::ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "administrator" | "admin" => Ok(Role::Administrator),
            "seller" => Ok(Role::Seller),
            _ => Err(crate::error::ValidationError::NotAllowed {
                field: "role".to_string(),
                allowed: vec!["administrator".to_string(), "seller".to_string()],
            }),
        }
    }
}

/// A staff account.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct User {
    pub id: i64,
    pub email: String,
    pub name: String,
    /// Argon2 PHC string. Never serialized to clients.
    #[serde(skip_serializing, default)]
    pub password_hash: String,
    pub role: Role,
    pub created_at: DateTime<Utc>,
}

// =============================================================================
// Catalog
// =============================================================================

/// Product grouping (bolts, nuts, washers, ...).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct Category {
    pub id: i64,
    pub name: String,
    pub description: Option<String>,
}

/// A company the store buys products from.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct Supplier {
    pub id: i64,
    /// Tax registration number (RUC), unique.
    pub tax_id: String,
    pub company_name: String,
    pub contact_name: String,
    pub phone: String,
    pub email: Option<String>,
    pub address: Option<String>,
    pub registered_at: DateTime<Utc>,
}

/// A product available for sale.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct Product {
    pub id: i64,

    /// Business identifier, unique and stored upper-cased.
    pub code: String,

    pub name: String,
    pub description: Option<String>,

    /// Steel, stainless, brass, ...
    pub material: String,

    /// Thread type (metric, UNC, ...), when applicable.
    pub thread_type: Option<String>,

    /// Nominal size, e.g. "M8x40".
    pub size: String,

    /// Sale unit ("unit", "box", "kg").
    pub unit_of_measure: String,

    pub purchase_price_cents: i64,

    /// Canonical sale price. Cart lines are checked against it.
    pub sale_price_cents: i64,

    /// Units on hand. Never negative.
    pub stock_actual: i64,

    /// Threshold at or under which the product shows on the low-stock report.
    pub stock_minimum: i64,

    pub supplier_id: Option<i64>,
    pub category_id: Option<i64>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Product {
    /// Returns the sale price as Money.
    #[inline]
    pub fn sale_price(&self) -> Money {
        Money::from_cents(self.sale_price_cents)
    }
}

/// Administrator listing row: the product plus supplier and category names.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct ProductDetail {
    #[serde(flatten)]
    #[cfg_attr(feature = "sqlx", sqlx(flatten))]
    pub product: Product,
    pub supplier_name: Option<String>,
    pub category_name: Option<String>,
}

/// Reduced product view for sellers and the POS search box.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct CatalogEntry {
    pub id: i64,
    pub code: String,
    pub name: String,
    pub sale_price_cents: i64,
    pub stock_actual: i64,
}

impl From<&Product> for CatalogEntry {
    fn from(p: &Product) -> Self {
        CatalogEntry {
            id: p.id,
            code: p.code.clone(),
            name: p.name.clone(),
            sale_price_cents: p.sale_price_cents,
            stock_actual: p.stock_actual,
        }
    }
}

// =============================================================================
// Customers
// =============================================================================

/// Pricing segment of a customer.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::Type))]
#[cfg_attr(feature = "sqlx", sqlx(rename_all = "lowercase"))]
#[serde(rename_all = "lowercase")]
pub enum CustomerKind {
    #[default]
    Retail,
    Wholesale,
}

/// A registered customer, identified at the till by national document.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct Customer {
    pub id: i64,
    /// National id or RUC, unique.
    pub document: String,
    pub first_names: String,
    pub last_names: String,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub address: Option<String>,
    pub kind: CustomerKind,
    pub created_at: DateTime<Utc>,
}

impl Customer {
    /// "First Last", as printed on sale history.
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_names, self.last_names)
    }
}

// =============================================================================
// Sales
// =============================================================================

/// The status of a sale.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::Type))]
#[cfg_attr(feature = "sqlx", sqlx(rename_all = "lowercase"))]
#[serde(rename_all = "lowercase")]
pub enum SaleStatus {
    /// Recorded at the till. Every finalized sale starts here.
    #[default]
    Completed,
    Pending,
    Cancelled,
}

/// How the customer paid.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::Type))]
#[cfg_attr(feature = "sqlx", sqlx(rename_all = "snake_case"))]
#[serde(rename_all = "snake_case")]
pub enum PaymentMethod {
    #[default]
    Cash,
    Card,
    Transfer,
}

/// When the customer paid.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::Type))]
#[cfg_attr(feature = "sqlx", sqlx(rename_all = "snake_case"))]
#[serde(rename_all = "snake_case")]
pub enum PaymentTerms {
    /// Paid in full at the till.
    #[default]
    CashOnDelivery,
    Credit,
}

/// A sale header. Created once by checkout and never modified afterward.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct Sale {
    pub id: i64,
    /// Customer document, or the walk-in sentinel.
    pub customer_document: String,
    /// The user who rang up the sale.
    pub employee_id: i64,
    pub location_id: i64,
    pub sold_at: DateTime<Utc>,
    pub total_cents: i64,
    pub status: SaleStatus,
    pub payment_terms: PaymentTerms,
    pub payment_method: PaymentMethod,
}

/// A line item of a sale.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct SaleItem {
    pub id: i64,
    pub sale_id: i64,
    pub product_id: i64,
    pub quantity: i64,
    pub unit_price_cents: i64,
    /// quantity × unit price.
    pub subtotal_cents: i64,
}

/// Sale history row.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct SaleSummary {
    pub id: i64,
    pub sold_at: DateTime<Utc>,
    pub total_cents: i64,
    pub status: SaleStatus,
    /// Registered customer name, or "General Public".
    pub customer_name: String,
    pub employee_name: String,
}

/// A line item joined with its product name.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct SaleItemDetail {
    #[serde(flatten)]
    #[cfg_attr(feature = "sqlx", sqlx(flatten))]
    pub item: SaleItem,
    pub product_name: String,
}

/// A sale with all of its lines.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SaleDetail {
    pub sale: Sale,
    pub items: Vec<SaleItemDetail>,
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn product(stock_actual: i64, stock_minimum: i64) -> Product {
        let now = Utc::now();
        Product {
            id: 1,
            code: "PER-M8X40".to_string(),
            name: "Perno hexagonal M8x40".to_string(),
            description: None,
            material: "steel".to_string(),
            thread_type: Some("metric".to_string()),
            size: "M8x40".to_string(),
            unit_of_measure: "unit".to_string(),
            purchase_price_cents: 20,
            sale_price_cents: 35,
            stock_actual,
            stock_minimum,
            supplier_id: None,
            category_id: None,
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn test_role_parse_and_display() {
        assert_eq!("Administrator".parse::<Role>().unwrap(), Role::Administrator);
        assert_eq!(" seller ".parse::<Role>().unwrap(), Role::Seller);
        assert!("cashier".parse::<Role>().is_err());
        assert_eq!(Role::Seller.to_string(), "seller");
    }

    #[test]
    fn test_product_sale_price() {
        assert_eq!(product(5, 10).sale_price().cents(), 35);
    }

    #[test]
    fn test_user_hash_not_serialized() {
        let user = User {
            id: 1,
            email: "admin@pernos.local".to_string(),
            name: "Admin".to_string(),
            password_hash: "$argon2id$secret".to_string(),
            role: Role::Administrator,
            created_at: Utc::now(),
        };
        let json = serde_json::to_value(&user).unwrap();
        assert!(json.get("password_hash").is_none());
        assert_eq!(json["role"], "administrator");
    }

    #[test]
    fn test_status_defaults() {
        assert_eq!(SaleStatus::default(), SaleStatus::Completed);
        assert_eq!(PaymentMethod::default(), PaymentMethod::Cash);
        assert_eq!(PaymentTerms::default(), PaymentTerms::CashOnDelivery);
        assert_eq!(CustomerKind::default(), CustomerKind::Retail);
    }

    #[test]
    fn test_catalog_entry_from_product() {
        let entry = CatalogEntry::from(&product(3, 10));
        assert_eq!(entry.code, "PER-M8X40");
        assert_eq!(entry.stock_actual, 3);
    }
}
