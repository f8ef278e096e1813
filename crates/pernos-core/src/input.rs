//! # Create/Update Payloads
//!
//! Request bodies for the catalog and account endpoints.
//!
//! Each payload has a `validate()` that trims and normalizes it, returning a
//! clean copy ready for the repository. Repositories never see raw input.
//!
//! ```rust
//! use pernos_core::input::NewCategory;
//!
//! let category = NewCategory { name: "  Tornillos ".into(), description: None };
//! assert_eq!(category.validate().unwrap().name, "Tornillos");
//! ```

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;
use crate::types::{CustomerKind, Role};
use crate::validation::{
    validate_document, validate_email, validate_optional_text, validate_password,
    validate_price_cents, validate_product_code, validate_required_text, validate_stock,
    ValidationResult,
};
use crate::DEFAULT_STOCK_MINIMUM;

fn default_unit_of_measure() -> String {
    "unit".to_string()
}

fn default_stock_minimum() -> i64 {
    DEFAULT_STOCK_MINIMUM
}

// =============================================================================
// Products
// =============================================================================

/// Product create/update body. Updates replace every field.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductInput {
    pub code: String,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    pub material: String,
    #[serde(default)]
    pub thread_type: Option<String>,
    pub size: String,
    #[serde(default = "default_unit_of_measure")]
    pub unit_of_measure: String,
    pub purchase_price_cents: i64,
    pub sale_price_cents: i64,
    #[serde(default)]
    pub stock_actual: i64,
    #[serde(default = "default_stock_minimum")]
    pub stock_minimum: i64,
    #[serde(default)]
    pub supplier_id: Option<i64>,
    #[serde(default)]
    pub category_id: Option<i64>,
}

impl ProductInput {
    /// Validates every field and upper-cases the code.
    pub fn validate(&self) -> ValidationResult<ProductInput> {
        validate_price_cents("purchase_price_cents", self.purchase_price_cents)?;
        validate_price_cents("sale_price_cents", self.sale_price_cents)?;
        validate_stock("stock_actual", self.stock_actual)?;
        validate_stock("stock_minimum", self.stock_minimum)?;

        let unit_of_measure = match self.unit_of_measure.trim() {
            "" => default_unit_of_measure(),
            unit => validate_required_text("unit_of_measure", unit, 20)?,
        };

        Ok(ProductInput {
            code: validate_product_code(&self.code)?,
            name: validate_required_text("name", &self.name, 200)?,
            description: validate_optional_text("description", self.description.as_deref(), 1000)?,
            material: validate_required_text("material", &self.material, 50)?,
            thread_type: validate_optional_text("thread_type", self.thread_type.as_deref(), 30)?,
            size: validate_required_text("size", &self.size, 50)?,
            unit_of_measure,
            purchase_price_cents: self.purchase_price_cents,
            sale_price_cents: self.sale_price_cents,
            stock_actual: self.stock_actual,
            stock_minimum: self.stock_minimum,
            supplier_id: self.supplier_id,
            category_id: self.category_id,
        })
    }
}

// =============================================================================
// Suppliers
// =============================================================================

/// Supplier create/update body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SupplierInput {
    pub tax_id: String,
    pub company_name: String,
    pub contact_name: String,
    pub phone: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub address: Option<String>,
}

impl SupplierInput {
    pub fn validate(&self) -> ValidationResult<SupplierInput> {
        let email = match validate_optional_text("email", self.email.as_deref(), 254)? {
            Some(email) => Some(validate_email("email", &email)?),
            None => None,
        };

        Ok(SupplierInput {
            tax_id: validate_document("tax_id", &self.tax_id)?,
            company_name: validate_required_text("company_name", &self.company_name, 200)?,
            contact_name: validate_required_text("contact_name", &self.contact_name, 200)?,
            phone: validate_required_text("phone", &self.phone, 20)?,
            email,
            address: validate_optional_text("address", self.address.as_deref(), 300)?,
        })
    }
}

// =============================================================================
// Customers
// =============================================================================

/// Customer create/update body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CustomerInput {
    pub document: String,
    pub first_names: String,
    pub last_names: String,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub kind: CustomerKind,
}

impl CustomerInput {
    pub fn validate(&self) -> ValidationResult<CustomerInput> {
        let document = validate_document("document", &self.document)?;
        if document == crate::WALK_IN_CUSTOMER_DOCUMENT {
            return Err(ValidationError::NotAllowed {
                field: "document".to_string(),
                allowed: vec!["any document except the walk-in placeholder".to_string()],
            });
        }

        let email = match validate_optional_text("email", self.email.as_deref(), 254)? {
            Some(email) => Some(validate_email("email", &email)?),
            None => None,
        };

        Ok(CustomerInput {
            document,
            first_names: validate_required_text("first_names", &self.first_names, 100)?,
            last_names: validate_required_text("last_names", &self.last_names, 100)?,
            phone: validate_optional_text("phone", self.phone.as_deref(), 20)?,
            email,
            address: validate_optional_text("address", self.address.as_deref(), 300)?,
            kind: self.kind,
        })
    }
}

// =============================================================================
// Categories
// =============================================================================

/// Category create body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewCategory {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
}

impl NewCategory {
    pub fn validate(&self) -> ValidationResult<NewCategory> {
        Ok(NewCategory {
            name: validate_required_text("name", &self.name, 100)?,
            description: validate_optional_text("description", self.description.as_deref(), 500)?,
        })
    }
}

// =============================================================================
// Users
// =============================================================================

/// User create body. The password is hashed by the caller after validation.
#[derive(Clone, Deserialize)]
pub struct NewUser {
    pub email: String,
    pub name: String,
    pub password: String,
    pub role: String,
}

/// A validated [`NewUser`] with its role resolved.
#[derive(Clone)]
pub struct ValidNewUser {
    pub email: String,
    pub name: String,
    pub password: String,
    pub role: Role,
}

impl NewUser {
    pub fn validate(&self) -> ValidationResult<ValidNewUser> {
        let email = validate_email("email", &self.email)?;
        let name = validate_required_text("name", &self.name, 100)?;
        validate_password(&self.password)?;
        if self.role.trim().is_empty() {
            return Err(ValidationError::required("role"));
        }
        let role = self.role.parse::<Role>()?;

        Ok(ValidNewUser {
            email,
            name,
            password: self.password.clone(),
            role,
        })
    }
}

// Passwords stay out of logs.
impl std::fmt::Debug for NewUser {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NewUser")
            .field("email", &self.email)
            .field("name", &self.name)
            .field("role", &self.role)
            .finish_non_exhaustive()
    }
}

impl std::fmt::Debug for ValidNewUser {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ValidNewUser")
            .field("email", &self.email)
            .field("name", &self.name)
            .field("role", &self.role)
            .finish_non_exhaustive()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn product_input() -> ProductInput {
        serde_json::from_value(serde_json::json!({
            "code": " per-m8x40 ",
            "name": "Perno hexagonal M8x40",
            "material": "steel",
            "size": "M8x40",
            "purchase_price_cents": 20,
            "sale_price_cents": 35
        }))
        .unwrap()
    }

    #[test]
    fn test_product_input_defaults_and_normalization() {
        let input = product_input().validate().unwrap();
        assert_eq!(input.code, "PER-M8X40");
        assert_eq!(input.unit_of_measure, "unit");
        assert_eq!(input.stock_actual, 0);
        assert_eq!(input.stock_minimum, DEFAULT_STOCK_MINIMUM);
        assert_eq!(input.description, None);
    }

    #[test]
    fn test_product_input_rejects_bad_fields() {
        let mut input = product_input();
        input.name = "  ".to_string();
        assert_eq!(input.validate().unwrap_err(), ValidationError::required("name"));

        let mut input = product_input();
        input.sale_price_cents = -1;
        assert!(input.validate().is_err());

        let mut input = product_input();
        input.stock_actual = -3;
        assert!(input.validate().is_err());
    }

    #[test]
    fn test_supplier_input() {
        let input = SupplierInput {
            tax_id: "1790012345001".to_string(),
            company_name: "Ferretería Central".to_string(),
            contact_name: "Ana Pérez".to_string(),
            phone: "0991234567".to_string(),
            email: Some("  ".to_string()),
            address: None,
        };
        let valid = input.validate().unwrap();
        assert_eq!(valid.email, None);

        let mut bad = input.clone();
        bad.email = Some("nope".to_string());
        assert!(bad.validate().is_err());
    }

    #[test]
    fn test_customer_input_rejects_walk_in_document() {
        let input = CustomerInput {
            document: crate::WALK_IN_CUSTOMER_DOCUMENT.to_string(),
            first_names: "Juan".to_string(),
            last_names: "Torres".to_string(),
            phone: None,
            email: None,
            address: None,
            kind: CustomerKind::Retail,
        };
        assert!(input.validate().is_err());

        let mut ok = input.clone();
        ok.document = "0102030405".to_string();
        assert!(ok.validate().is_ok());
    }

    #[test]
    fn test_new_user_requires_every_field() {
        let user = NewUser {
            email: "seller2@pernos.local".to_string(),
            name: "Seller Two".to_string(),
            password: "long enough".to_string(),
            role: "seller".to_string(),
        };
        assert_eq!(user.validate().unwrap().role, Role::Seller);

        let mut no_role = user.clone();
        no_role.role = String::new();
        assert_eq!(no_role.validate().unwrap_err(), ValidationError::required("role"));

        let mut bad_role = user.clone();
        bad_role.role = "owner".to_string();
        assert!(bad_role.validate().is_err());
    }

    #[test]
    fn test_new_user_debug_hides_password() {
        let user = NewUser {
            email: "a@pernos.local".to_string(),
            name: "A".to_string(),
            password: "hunter2hunter2".to_string(),
            role: "seller".to_string(),
        };
        assert!(!format!("{user:?}").contains("hunter2"));
    }
}
