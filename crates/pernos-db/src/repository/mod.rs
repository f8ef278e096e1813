//! # Repository Module
//!
//! Database repository implementations for Pernos POS.
//!
//! ## Repository Pattern
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Repository Pattern                                   │
//! │                                                                         │
//! │  HTTP handler                                                          │
//! │       │                                                                 │
//! │       │  state.db.products().quick_search("m8", 10)                    │
//! │       ▼                                                                 │
//! │  ProductRepository                                                     │
//! │  ├── list / list_catalog / quick_search / low_stock                    │
//! │  ├── get_by_id / get_by_code                                           │
//! │  └── insert / update / delete                                          │
//! │       │                                                                 │
//! │       │  SQL                                                            │
//! │       ▼                                                                 │
//! │  SQLite Database                                                       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Every repository holds a clone of the shared pool and reads the store on
//! each call. There is no in-process cache of products.
//!
//! ## Available Repositories
//!
//! - [`ProductRepository`] - Product CRUD, search, low-stock report
//! - [`SupplierRepository`] - Supplier CRUD
//! - [`CustomerRepository`] - Customer CRUD and search
//! - [`CategoryRepository`] - Category list/create
//! - [`UserRepository`] - Staff accounts
//! - [`SaleRepository`] - Checkout transaction and sale history

pub mod category;
pub mod customer;
pub mod product;
pub mod sale;
pub mod supplier;
pub mod user;

pub use category::CategoryRepository;
pub use customer::CustomerRepository;
pub use product::ProductRepository;
pub use sale::SaleRepository;
pub use supplier::SupplierRepository;
pub use user::UserRepository;

/// Builds a `LIKE` pattern matching `term` anywhere, with `%`, `_` and `\`
/// escaped. Use with `ESCAPE '\'`.
pub(crate) fn contains_pattern(term: &str) -> String {
    let mut pattern = String::with_capacity(term.len() + 2);
    pattern.push('%');
    for c in term.chars() {
        if matches!(c, '%' | '_' | '\\') {
            pattern.push('\\');
        }
        pattern.push(c);
    }
    pattern.push('%');
    pattern
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_contains_pattern_escapes_wildcards() {
        assert_eq!(contains_pattern("m8"), "%m8%");
        assert_eq!(contains_pattern("50%_off"), "%50\\%\\_off%");
        assert_eq!(contains_pattern("a\\b"), "%a\\\\b%");
    }
}
