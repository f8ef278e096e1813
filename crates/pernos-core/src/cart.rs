//! # Cart Module
//!
//! Parsing and verification of a cart submitted for checkout.
//!
//! ## Trust Boundary
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Browser cart (JSON)                                                    │
//! │  {"cart":[{"id":1,"quantity":"2","price":"5.00","subtotal":10.0}],      │
//! │   "total":"10.00"}                                                      │
//! │       │  numbers or strings, any field may be malformed                 │
//! │       ▼                                                                 │
//! │  CartSubmission::check_header()   → CartHeader  (total, customer)      │
//! │  CartLineRequest::parse(index)    → CartLine    (typed, cents)         │
//! │       │                                                                 │
//! │       ▼  inside the checkout transaction                                │
//! │  verify_line_pricing(line, catalog price)                              │
//! │  verify_total(declared, Σ subtotals)                                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Nothing here touches the database. The repository calls these helpers in
//! order so that a bad field aborts the whole sale.

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;
use crate::money::Money;
use crate::validation::{validate_cart_size, validate_quantity, ValidationResult};
use crate::WALK_IN_CUSTOMER_DOCUMENT;

// =============================================================================
// Numeric Input
// =============================================================================

/// A numeric field as it arrives from the browser: a JSON integer, a JSON
/// float, or a string.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum NumericInput {
    Integer(i64),
    Float(f64),
    Text(String),
}

impl NumericInput {
    /// Reads the value as a whole number.
    ///
    /// Floats are accepted only without a fractional part (`2.0`, not `2.5`).
    pub fn to_integer(&self, field: &str) -> ValidationResult<i64> {
        let invalid = || ValidationError::InvalidNumber {
            field: field.to_string(),
            expected: "integer",
            value: self.to_string(),
        };

        match self {
            NumericInput::Integer(n) => Ok(*n),
            NumericInput::Float(f) => {
                if f.is_finite() && f.fract() == 0.0 && f.abs() <= i64::MAX as f64 {
                    Ok(*f as i64)
                } else {
                    Err(invalid())
                }
            }
            NumericInput::Text(s) => {
                let s = s.trim();
                if s.is_empty() {
                    return Err(ValidationError::required(field));
                }
                s.parse::<i64>().map_err(|_| invalid())
            }
        }
    }

    /// Reads the value as a decimal amount of money.
    pub fn to_money(&self, field: &str) -> ValidationResult<Money> {
        let invalid = || ValidationError::InvalidNumber {
            field: field.to_string(),
            expected: "decimal",
            value: self.to_string(),
        };

        match self {
            NumericInput::Integer(n) => Money::from_cents(*n)
                .checked_multiply(100)
                .ok_or_else(invalid),
            NumericInput::Float(f) if f.is_finite() => {
                Money::parse_decimal(&f.to_string()).ok_or_else(invalid)
            }
            NumericInput::Float(_) => Err(invalid()),
            NumericInput::Text(s) => {
                if s.trim().is_empty() {
                    return Err(ValidationError::required(field));
                }
                Money::parse_decimal(s).ok_or_else(invalid)
            }
        }
    }
}

impl std::fmt::Display for NumericInput {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            NumericInput::Integer(n) => write!(f, "{n}"),
            NumericInput::Float(x) => write!(f, "{x}"),
            NumericInput::Text(s) => f.write_str(s),
        }
    }
}

fn require<'a>(value: &'a Option<NumericInput>, field: &str) -> ValidationResult<&'a NumericInput> {
    value.as_ref().ok_or_else(|| ValidationError::required(field))
}

// =============================================================================
// Submission
// =============================================================================

/// One cart line exactly as submitted.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CartLineRequest {
    #[serde(default, alias = "id")]
    pub product_id: Option<NumericInput>,
    #[serde(default, alias = "cantidad")]
    pub quantity: Option<NumericInput>,
    #[serde(default, alias = "price", alias = "precio")]
    pub unit_price: Option<NumericInput>,
    #[serde(default)]
    pub subtotal: Option<NumericInput>,
}

/// A cart line after parsing. Amounts are in cents.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CartLine {
    /// Zero-based position in the submitted cart.
    pub index: usize,
    pub product_id: i64,
    pub quantity: i64,
    pub unit_price: Money,
    pub subtotal: Money,
}

impl CartLineRequest {
    /// Parses every field of the line at `index`.
    ///
    /// ## Example
    /// ```rust
    /// use pernos_core::cart::{CartLineRequest, NumericInput};
    ///
    /// let line = CartLineRequest {
    ///     product_id: Some(NumericInput::Integer(1)),
    ///     quantity: Some(NumericInput::Text("2".into())),
    ///     unit_price: Some(NumericInput::Text("5.00".into())),
    ///     subtotal: Some(NumericInput::Float(10.0)),
    /// };
    /// let parsed = line.parse(0).unwrap();
    /// assert_eq!(parsed.quantity, 2);
    /// assert_eq!(parsed.subtotal.cents(), 1000);
    /// ```
    pub fn parse(&self, index: usize) -> ValidationResult<CartLine> {
        let field = |name: &str| format!("cart[{index}].{name}");

        let product_field = field("product_id");
        let product_id = require(&self.product_id, &product_field)?.to_integer(&product_field)?;
        if product_id <= 0 {
            return Err(ValidationError::MustBePositive {
                field: product_field,
            });
        }

        let quantity_field = field("quantity");
        let quantity = require(&self.quantity, &quantity_field)?.to_integer(&quantity_field)?;
        validate_quantity(&quantity_field, quantity)?;

        let price_field = field("unit_price");
        let unit_price = require(&self.unit_price, &price_field)?.to_money(&price_field)?;
        if unit_price.is_negative() {
            return Err(ValidationError::OutOfRange {
                field: price_field,
                min: 0,
                max: i64::MAX,
            });
        }

        let subtotal_field = field("subtotal");
        let subtotal = require(&self.subtotal, &subtotal_field)?.to_money(&subtotal_field)?;

        Ok(CartLine {
            index,
            product_id,
            quantity,
            unit_price,
            subtotal,
        })
    }
}

/// The checkout request body.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CartSubmission {
    #[serde(default, alias = "carrito")]
    pub cart: Option<Vec<CartLineRequest>>,
    #[serde(default, alias = "total")]
    pub declared_total: Option<NumericInput>,
    #[serde(default, alias = "cedula_cliente", alias = "customer_ref")]
    pub customer_document: Option<String>,
}

/// Header values checked before any write.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CartHeader {
    pub declared_total: Money,
    /// Registered customer document, or the walk-in sentinel.
    pub customer_document: String,
}

impl CartSubmission {
    /// Submitted lines, empty when the cart was absent.
    pub fn lines(&self) -> &[CartLineRequest] {
        self.cart.as_deref().unwrap_or_default()
    }

    /// Checks the cart size, the declared total and the customer document.
    ///
    /// Lines are parsed later, one by one, inside the checkout transaction.
    pub fn check_header(&self) -> ValidationResult<CartHeader> {
        validate_cart_size(self.lines().len())?;

        let declared_total = require(&self.declared_total, "total")?.to_money("total")?;
        if declared_total.is_negative() {
            return Err(ValidationError::OutOfRange {
                field: "total".to_string(),
                min: 0,
                max: i64::MAX,
            });
        }

        let customer_document = match self.customer_document.as_deref().map(str::trim) {
            None | Some("") => WALK_IN_CUSTOMER_DOCUMENT.to_string(),
            Some(doc) if doc.chars().count() > 13 => {
                return Err(ValidationError::TooLong {
                    field: "customer_document".to_string(),
                    max: 13,
                })
            }
            Some(doc) => doc.to_string(),
        };

        Ok(CartHeader {
            declared_total,
            customer_document,
        })
    }
}

// =============================================================================
// Verification
// =============================================================================

/// Checks a parsed line against the product's catalog price.
///
/// The unit price must equal `catalog_price` and the subtotal must equal
/// `quantity × unit_price`.
pub fn verify_line_pricing(line: &CartLine, catalog_price: Money) -> ValidationResult<()> {
    if line.unit_price != catalog_price {
        return Err(ValidationError::PriceMismatch {
            line: line.index,
            submitted: line.unit_price.to_string(),
            expected: catalog_price.to_string(),
        });
    }

    let expected = line
        .unit_price
        .checked_multiply(line.quantity)
        .ok_or_else(|| ValidationError::OutOfRange {
            field: format!("cart[{}].subtotal", line.index),
            min: 0,
            max: i64::MAX,
        })?;

    if line.subtotal != expected {
        return Err(ValidationError::SubtotalMismatch {
            line: line.index,
            submitted: line.subtotal.to_string(),
            expected: expected.to_string(),
        });
    }

    Ok(())
}

/// Checks the declared total against the sum of line subtotals.
pub fn verify_total(declared: Money, computed: Money) -> ValidationResult<()> {
    if declared != computed {
        return Err(ValidationError::TotalMismatch {
            declared: declared.to_string(),
            computed: computed.to_string(),
        });
    }
    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn submission(value: serde_json::Value) -> CartSubmission {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_accepts_numbers_and_strings() {
        let sub = submission(json!({
            "cart": [
                {"id": 1, "quantity": 2, "price": "5.00", "subtotal": 10.0},
                {"product_id": "2", "cantidad": "3", "unit_price": 0.35, "subtotal": "1.05"}
            ],
            "total": "11.05"
        }));

        let header = sub.check_header().unwrap();
        assert_eq!(header.declared_total.cents(), 1105);
        assert_eq!(header.customer_document, WALK_IN_CUSTOMER_DOCUMENT);

        let first = sub.lines()[0].parse(0).unwrap();
        assert_eq!(
            first,
            CartLine {
                index: 0,
                product_id: 1,
                quantity: 2,
                unit_price: Money::from_cents(500),
                subtotal: Money::from_cents(1000),
            }
        );

        let second = sub.lines()[1].parse(1).unwrap();
        assert_eq!(second.product_id, 2);
        assert_eq!(second.quantity, 3);
        assert_eq!(second.unit_price.cents(), 35);
        assert_eq!(second.subtotal.cents(), 105);
    }

    #[test]
    fn test_spanish_field_names() {
        let sub = submission(json!({
            "carrito": [{"id": 1, "cantidad": 1, "precio": "2.50", "subtotal": "2.50"}],
            "total": 2.5,
            "cedula_cliente": " 0102030405 "
        }));
        let header = sub.check_header().unwrap();
        assert_eq!(header.customer_document, "0102030405");
        assert_eq!(sub.lines()[0].parse(0).unwrap().unit_price.cents(), 250);
    }

    #[test]
    fn test_empty_or_missing_cart() {
        let empty = submission(json!({"cart": [], "total": "0"}));
        assert_eq!(empty.check_header(), Err(ValidationError::EmptyCart));

        let missing = submission(json!({"total": "10.00"}));
        assert_eq!(missing.check_header(), Err(ValidationError::EmptyCart));
    }

    #[test]
    fn test_total_required_and_numeric() {
        let line = json!({"id": 1, "quantity": 1, "price": "1", "subtotal": "1"});

        let missing = submission(json!({"cart": [line.clone()]}));
        assert_eq!(missing.check_header(), Err(ValidationError::required("total")));

        let blank = submission(json!({"cart": [line.clone()], "total": "  "}));
        assert_eq!(blank.check_header(), Err(ValidationError::required("total")));

        let garbage = submission(json!({"cart": [line], "total": "ten"}));
        assert!(matches!(
            garbage.check_header(),
            Err(ValidationError::InvalidNumber { expected: "decimal", .. })
        ));
    }

    #[test]
    fn test_non_numeric_quantity_names_the_field() {
        let req = CartLineRequest {
            product_id: Some(NumericInput::Integer(1)),
            quantity: Some(NumericInput::Text("abc".into())),
            unit_price: Some(NumericInput::Text("5.00".into())),
            subtotal: Some(NumericInput::Text("10.00".into())),
        };
        let err = req.parse(3).unwrap_err();
        assert_eq!(
            err,
            ValidationError::InvalidNumber {
                field: "cart[3].quantity".to_string(),
                expected: "integer",
                value: "abc".to_string(),
            }
        );
    }

    #[test]
    fn test_quantity_rules() {
        let line = |qty: NumericInput| CartLineRequest {
            product_id: Some(NumericInput::Integer(1)),
            quantity: Some(qty),
            unit_price: Some(NumericInput::Integer(1)),
            subtotal: Some(NumericInput::Integer(1)),
        };

        assert_eq!(line(NumericInput::Float(2.0)).parse(0).unwrap().quantity, 2);
        assert!(line(NumericInput::Float(2.5)).parse(0).is_err());
        assert!(line(NumericInput::Integer(0)).parse(0).is_err());
        assert!(line(NumericInput::Integer(-4)).parse(0).is_err());
        assert!(line(NumericInput::Text("1.5".into())).parse(0).is_err());
    }

    #[test]
    fn test_missing_line_field() {
        let req = CartLineRequest {
            product_id: Some(NumericInput::Integer(1)),
            quantity: Some(NumericInput::Integer(1)),
            unit_price: None,
            subtotal: Some(NumericInput::Integer(1)),
        };
        assert_eq!(
            req.parse(0).unwrap_err(),
            ValidationError::required("cart[0].unit_price")
        );
    }

    #[test]
    fn test_verify_line_pricing() {
        let line = CartLine {
            index: 0,
            product_id: 1,
            quantity: 2,
            unit_price: Money::from_cents(500),
            subtotal: Money::from_cents(1000),
        };
        assert!(verify_line_pricing(&line, Money::from_cents(500)).is_ok());

        assert!(matches!(
            verify_line_pricing(&line, Money::from_cents(450)),
            Err(ValidationError::PriceMismatch { line: 0, .. })
        ));

        let wrong_subtotal = CartLine {
            subtotal: Money::from_cents(900),
            ..line
        };
        assert!(matches!(
            verify_line_pricing(&wrong_subtotal, Money::from_cents(500)),
            Err(ValidationError::SubtotalMismatch { line: 0, .. })
        ));
    }

    #[test]
    fn test_verify_total() {
        assert!(verify_total(Money::from_cents(1000), Money::from_cents(1000)).is_ok());
        assert_eq!(
            verify_total(Money::from_cents(999), Money::from_cents(1000)),
            Err(ValidationError::TotalMismatch {
                declared: "$9.99".to_string(),
                computed: "$10.00".to_string(),
            })
        );
    }
}
