//! # Product Repository
//!
//! Database operations for products.
//!
//! ## Key Operations
//! - Paginated listing and search by name or code
//! - POS quick search (top 10 matches)
//! - Low-stock report
//! - CRUD
//!
//! ## Two Views of a Product
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Administrator                         Seller                           │
//! │  list()          → ProductDetail       list_catalog() → CatalogEntry    │
//! │  (all columns + supplier/category)     (id, code, name, price, stock)   │
//! │                                                                         │
//! │  Both search:  name LIKE %q%  OR  code LIKE %q%                        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Stock is only ever decremented by the checkout transaction
//! ([`super::sale::SaleRepository::finalize`]); here it is set through
//! create/update.

use chrono::Utc;
use sqlx::SqlitePool;
use tracing::{debug, info};

use crate::error::{DbError, DbResult};
use crate::repository::contains_pattern;
use pernos_core::input::ProductInput;
use pernos_core::{CatalogEntry, Page, Pagination, Product, ProductDetail};

/// Maximum rows returned by the POS search box.
pub const QUICK_SEARCH_LIMIT: i64 = 10;

/// Repository for product database operations.
///
/// ## Usage
/// ```rust,ignore
/// let repo = db.products();
///
/// let matches = repo.quick_search("m8", QUICK_SEARCH_LIMIT).await?;
/// let product = repo.get_by_id(1).await?;
/// ```
#[derive(Debug, Clone)]
pub struct ProductRepository {
    pool: SqlitePool,
}

impl ProductRepository {
    /// Creates a new ProductRepository.
    pub fn new(pool: SqlitePool) -> Self {
        ProductRepository { pool }
    }

    /// Lists products with supplier and category names, newest first.
    ///
    /// ## Arguments
    /// * `search` - Optional filter on name or code (partial, case-insensitive)
    /// * `page` - Page to return
    pub async fn list(
        &self,
        search: Option<&str>,
        page: Pagination,
    ) -> DbResult<Page<ProductDetail>> {
        let pattern = search
            .map(str::trim)
            .filter(|q| !q.is_empty())
            .map(contains_pattern);

        debug!(search = ?pattern, page = page.page, "Listing products");

        let total: i64 = sqlx::query_scalar(
            r#"
            SELECT COUNT(*) FROM products
            WHERE ?1 IS NULL OR name LIKE ?1 ESCAPE '\' OR code LIKE ?1 ESCAPE '\'
            "#,
        )
        .bind(&pattern)
        .fetch_one(&self.pool)
        .await?;

        let items = sqlx::query_as::<_, ProductDetail>(
            r#"
            SELECT
                p.*,
                s.company_name AS supplier_name,
                c.name AS category_name
            FROM products p
            LEFT JOIN suppliers s ON s.id = p.supplier_id
            LEFT JOIN categories c ON c.id = p.category_id
            WHERE ?1 IS NULL OR p.name LIKE ?1 ESCAPE '\' OR p.code LIKE ?1 ESCAPE '\'
            ORDER BY p.id DESC
            LIMIT ?2 OFFSET ?3
            "#,
        )
        .bind(&pattern)
        .bind(page.limit())
        .bind(page.offset())
        .fetch_all(&self.pool)
        .await?;

        Ok(Page::new(items, page, total))
    }

    /// Lists the reduced catalog view shown to sellers, ordered by name.
    pub async fn list_catalog(
        &self,
        search: Option<&str>,
        page: Pagination,
    ) -> DbResult<Page<CatalogEntry>> {
        let pattern = search
            .map(str::trim)
            .filter(|q| !q.is_empty())
            .map(contains_pattern);

        debug!(search = ?pattern, page = page.page, "Listing catalog");

        let total: i64 = sqlx::query_scalar(
            r#"
            SELECT COUNT(*) FROM products
            WHERE ?1 IS NULL OR name LIKE ?1 ESCAPE '\' OR code LIKE ?1 ESCAPE '\'
            "#,
        )
        .bind(&pattern)
        .fetch_one(&self.pool)
        .await?;

        let items = sqlx::query_as::<_, CatalogEntry>(
            r#"
            SELECT id, code, name, sale_price_cents, stock_actual
            FROM products
            WHERE ?1 IS NULL OR name LIKE ?1 ESCAPE '\' OR code LIKE ?1 ESCAPE '\'
            ORDER BY name
            LIMIT ?2 OFFSET ?3
            "#,
        )
        .bind(&pattern)
        .bind(page.limit())
        .bind(page.offset())
        .fetch_all(&self.pool)
        .await?;

        Ok(Page::new(items, page, total))
    }

    /// POS search box: products whose code or name contains `query`.
    ///
    /// An empty query returns no rows rather than the whole catalog.
    pub async fn quick_search(&self, query: &str, limit: i64) -> DbResult<Vec<CatalogEntry>> {
        let query = query.trim();
        if query.is_empty() {
            return Ok(Vec::new());
        }

        debug!(query = %query, limit, "Quick product search");

        let products = sqlx::query_as::<_, CatalogEntry>(
            r#"
            SELECT id, code, name, sale_price_cents, stock_actual
            FROM products
            WHERE code LIKE ?1 ESCAPE '\' OR name LIKE ?1 ESCAPE '\'
            ORDER BY name
            LIMIT ?2
            "#,
        )
        .bind(contains_pattern(query))
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;

        debug!(count = products.len(), "Search returned products");
        Ok(products)
    }

    /// Products at or under their minimum stock, lowest stock first.
    pub async fn low_stock(&self) -> DbResult<Vec<ProductDetail>> {
        let products = sqlx::query_as::<_, ProductDetail>(
            r#"
            SELECT
                p.*,
                s.company_name AS supplier_name,
                c.name AS category_name
            FROM products p
            LEFT JOIN suppliers s ON s.id = p.supplier_id
            LEFT JOIN categories c ON c.id = p.category_id
            WHERE p.stock_actual <= p.stock_minimum
            ORDER BY p.stock_actual, p.name
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        debug!(count = products.len(), "Low-stock report");
        Ok(products)
    }

    /// Gets a product by its ID.
    ///
    /// ## Returns
    /// * `Ok(Some(Product))` - Product found
    /// * `Ok(None)` - Product not found
    pub async fn get_by_id(&self, id: i64) -> DbResult<Option<Product>> {
        let product = sqlx::query_as::<_, Product>("SELECT * FROM products WHERE id = ?1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(product)
    }

    /// Gets a product by its code (case-insensitive).
    pub async fn get_by_code(&self, code: &str) -> DbResult<Option<Product>> {
        let product = sqlx::query_as::<_, Product>("SELECT * FROM products WHERE code = ?1")
            .bind(code.trim().to_uppercase())
            .fetch_optional(&self.pool)
            .await?;

        Ok(product)
    }

    /// Inserts a new product from validated input.
    ///
    /// ## Returns
    /// * `Ok(Product)` - The stored row
    /// * `Err(DbError::UniqueViolation)` - Code already exists
    /// * `Err(DbError::ForeignKeyViolation)` - Unknown supplier or category
    pub async fn insert(&self, input: &ProductInput) -> DbResult<Product> {
        debug!(code = %input.code, "Inserting product");

        let now = Utc::now();
        let id = sqlx::query(
            r#"
            INSERT INTO products (
                code, name, description, material, thread_type, size,
                unit_of_measure, purchase_price_cents, sale_price_cents,
                stock_actual, stock_minimum, supplier_id, category_id,
                created_at, updated_at
            ) VALUES (
                ?1, ?2, ?3, ?4, ?5, ?6,
                ?7, ?8, ?9,
                ?10, ?11, ?12, ?13,
                ?14, ?14
            )
            "#,
        )
        .bind(&input.code)
        .bind(&input.name)
        .bind(&input.description)
        .bind(&input.material)
        .bind(&input.thread_type)
        .bind(&input.size)
        .bind(&input.unit_of_measure)
        .bind(input.purchase_price_cents)
        .bind(input.sale_price_cents)
        .bind(input.stock_actual)
        .bind(input.stock_minimum)
        .bind(input.supplier_id)
        .bind(input.category_id)
        .bind(now)
        .execute(&self.pool)
        .await
        .map_err(|e| DbError::from(e).with_duplicate_value(&input.code))?
        .last_insert_rowid();

        info!(id, code = %input.code, "Product created");

        self.get_by_id(id)
            .await?
            .ok_or_else(|| DbError::not_found("Product", id))
    }

    /// Replaces every editable field of a product.
    ///
    /// ## Returns
    /// * `Ok(Product)` - The updated row
    /// * `Err(DbError::NotFound)` - Product doesn't exist
    /// * `Err(DbError::UniqueViolation)` - Another product already has the code
    pub async fn update(&self, id: i64, input: &ProductInput) -> DbResult<Product> {
        debug!(id, code = %input.code, "Updating product");

        let now = Utc::now();
        let result = sqlx::query(
            r#"
            UPDATE products SET
                code = ?2,
                name = ?3,
                description = ?4,
                material = ?5,
                thread_type = ?6,
                size = ?7,
                unit_of_measure = ?8,
                purchase_price_cents = ?9,
                sale_price_cents = ?10,
                stock_actual = ?11,
                stock_minimum = ?12,
                supplier_id = ?13,
                category_id = ?14,
                updated_at = ?15
            WHERE id = ?1
            "#,
        )
        .bind(id)
        .bind(&input.code)
        .bind(&input.name)
        .bind(&input.description)
        .bind(&input.material)
        .bind(&input.thread_type)
        .bind(&input.size)
        .bind(&input.unit_of_measure)
        .bind(input.purchase_price_cents)
        .bind(input.sale_price_cents)
        .bind(input.stock_actual)
        .bind(input.stock_minimum)
        .bind(input.supplier_id)
        .bind(input.category_id)
        .bind(now)
        .execute(&self.pool)
        .await
        .map_err(|e| DbError::from(e).with_duplicate_value(&input.code))?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Product", id));
        }

        info!(id, "Product updated");

        self.get_by_id(id)
            .await?
            .ok_or_else(|| DbError::not_found("Product", id))
    }

    /// Number of products in the catalog.
    pub async fn count(&self) -> DbResult<i64> {
        let count = sqlx::query_scalar("SELECT COUNT(*) FROM products")
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }

    /// Deletes a product.
    ///
    /// Products that appear on any sale cannot be deleted; the store refuses
    /// with a foreign-key violation.
    pub async fn delete(&self, id: i64) -> DbResult<()> {
        debug!(id, "Deleting product");

        let result = sqlx::query("DELETE FROM products WHERE id = ?1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Product", id));
        }

        info!(id, "Product deleted");
        Ok(())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
