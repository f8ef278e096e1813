//! # HTTP Routes
//!
//! Every handler starts from [`CurrentUser`](crate::auth::CurrentUser) and
//! applies its own role gate before touching the store.
//!
//! ## Route Map
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Path                          GET        POST       PUT       DELETE   │
//! │  ────                          ───        ────       ───       ──────   │
//! │  /health                       public                                   │
//! │  /api/auth/login                          public                        │
//! │  /api/auth/me                  A,S                                      │
//! │  /api/products                 A,S        A                             │
//! │  /api/products/search          A,S                                      │
//! │  /api/products/low-stock       A                                        │
//! │  /api/products/{id}            A,S                   A         A        │
//! │  /api/suppliers                A,S        A                             │
//! │  /api/suppliers/{id}           A,S                   A         A        │
//! │  /api/customers                A,S        A,S                           │
//! │  /api/customers/{id}           A,S                   A,S       A        │
//! │  /api/categories               A,S        A                             │
//! │  /api/users                    A          A                             │
//! │  /api/users/{id}                                               A        │
//! │  /api/sales                    A,S                                      │
//! │  /api/sales/finalize                      A,S                           │
//! │  /api/sales/{id}               A,S                                      │
//! │                                                                         │
//! │  A = administrator, S = seller                                          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

pub mod auth;
pub mod categories;
pub mod customers;
pub mod health;
pub mod products;
pub mod sales;
pub mod suppliers;
pub mod users;

use axum::routing::{delete, get, post};
use axum::Router;
use serde::Deserialize;

use crate::AppState;

/// `?q=&page=` on list endpoints.
///
/// `page` is kept as text so that `?page=abc` falls back to the first page
/// instead of failing extraction.
#[derive(Debug, Default, Deserialize)]
pub struct ListQuery {
    #[serde(default)]
    pub q: Option<String>,
    #[serde(default)]
    pub page: Option<String>,
}

impl ListQuery {
    /// The search term, or `None` when blank.
    pub fn search(&self) -> Option<&str> {
        self.q.as_deref().map(str::trim).filter(|q| !q.is_empty())
    }

    /// The requested page number, or `None` when absent or not an integer.
    /// Zero and negative pages are clamped later by `Pagination`.
    pub fn page(&self) -> Option<i64> {
        self.page.as_deref().and_then(|p| p.trim().parse().ok())
    }
}

/// All application routes, before state is attached.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/health", get(health::health))
        // Auth
        .route("/api/auth/login", post(auth::login))
        .route("/api/auth/me", get(auth::me))
        // Products
        .route("/api/products", get(products::list).post(products::create))
        .route("/api/products/search", get(products::search))
        .route("/api/products/low-stock", get(products::low_stock))
        .route(
            "/api/products/{id}",
            get(products::get).put(products::update).delete(products::remove),
        )
        // Suppliers
        .route("/api/suppliers", get(suppliers::list).post(suppliers::create))
        .route(
            "/api/suppliers/{id}",
            get(suppliers::get).put(suppliers::update).delete(suppliers::remove),
        )
        // Customers
        .route("/api/customers", get(customers::list).post(customers::create))
        .route(
            "/api/customers/{id}",
            get(customers::get).put(customers::update).delete(customers::remove),
        )
        // Categories
        .route("/api/categories", get(categories::list).post(categories::create))
        // Users
        .route("/api/users", get(users::list).post(users::create))
        .route("/api/users/{id}", delete(users::remove))
        // Sales
        .route("/api/sales", get(sales::list))
        .route("/api/sales/finalize", post(sales::finalize))
        .route("/api/sales/{id}", get(sales::get))
}
