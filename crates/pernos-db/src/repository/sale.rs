//! # Sale Repository
//!
//! The checkout transaction and sale history.
//!
//! ## Checkout
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       finalize(cart, actor)                             │
//! │                                                                         │
//! │  0. check_header()  empty cart / bad total → ValidationError (no I/O)  │
//! │                                                                         │
//! │  BEGIN ─────────────────────────────────────────────────────────────┐  │
//! │  1. INSERT sales (declared total, status completed)                 │  │
//! │  2. for each line, in order:                                        │  │
//! │     ├── parse fields          → ValidationError                     │  │
//! │     ├── load product          → UnknownProduct                      │  │
//! │     ├── price == catalog, subtotal == qty × price                   │  │
//! │     ├── INSERT sale_items                                           │  │
//! │     └── UPDATE stock_actual = stock_actual - qty                    │  │
//! │              WHERE stock_actual >= qty   (0 rows → InsufficientStock)│  │
//! │  3. declared total == Σ subtotals                                   │  │
//! │  COMMIT ◄── only when every step succeeded                          │  │
//! │  ROLLBACK ◄── on any error: no header, no lines, no stock change ───┘  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Checkout is not idempotent: submitting the same cart twice records two
//! sales and decrements stock twice.

use chrono::Utc;
use sqlx::{SqliteConnection, SqlitePool};
use tracing::{debug, error, info, warn};

use crate::error::{DbResult, FinalizeError};
use pernos_core::cart::{verify_line_pricing, verify_total, CartHeader, CartLineRequest};
use pernos_core::{
    Actor, CartSubmission, Money, Page, Pagination, PaymentMethod, PaymentTerms, Product, Sale,
    SaleDetail, SaleItemDetail, SaleStatus, SaleSummary, ValidationError, DEFAULT_LOCATION_ID,
    WALK_IN_CUSTOMER_DOCUMENT, WALK_IN_CUSTOMER_NAME,
};

/// Repository for sale database operations.
#[derive(Debug, Clone)]
pub struct SaleRepository {
    pool: SqlitePool,
}

impl SaleRepository {
    /// Creates a new SaleRepository.
    pub fn new(pool: SqlitePool) -> Self {
        SaleRepository { pool }
    }

    /// Records a submitted cart as one sale and decrements stock, atomically.
    ///
    /// ## Returns
    /// * `Ok(sale_id)` - The sale and all its lines were committed
    /// * `Err(FinalizeError::Validation)` - Malformed cart or price mismatch
    /// * `Err(FinalizeError::InsufficientStock)` - A line exceeds stock on hand
    /// * `Err(FinalizeError::Finalization)` - The store failed
    ///
    /// On any error the transaction is rolled back before returning.
    pub async fn finalize(
        &self,
        submission: &CartSubmission,
        actor: &Actor,
    ) -> Result<i64, FinalizeError> {
        let header = submission.check_header().map_err(|err| {
            warn!(employee_id = actor.id, error = %err, "Sale rejected before write");
            FinalizeError::from(err)
        })?;

        debug!(
            employee_id = actor.id,
            lines = submission.lines().len(),
            declared_total = %header.declared_total,
            "Finalizing sale"
        );

        let mut tx = self.pool.begin().await?;

        match write_sale(&mut *tx, submission.lines(), &header, actor).await {
            Ok(sale_id) => {
                tx.commit().await?;
                info!(
                    sale_id,
                    employee_id = actor.id,
                    total = %header.declared_total,
                    "Sale finalized"
                );
                Ok(sale_id)
            }
            Err(err) => {
                if let Err(rollback_err) = tx.rollback().await {
                    error!(error = %rollback_err, "Rollback failed after sale error");
                }
                match &err {
                    FinalizeError::Finalization(cause) => {
                        error!(employee_id = actor.id, error = %cause, "Sale failed in store, rolled back")
                    }
                    other => warn!(employee_id = actor.id, error = %other, "Sale rejected, rolled back"),
                }
                Err(err)
            }
        }
    }

    /// Sale history, newest first.
    ///
    /// Walk-in sales show [`WALK_IN_CUSTOMER_NAME`]; sales to a document that
    /// is no longer registered show the document itself.
    pub async fn list(&self, page: Pagination) -> DbResult<Page<SaleSummary>> {
        let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM sales")
            .fetch_one(&self.pool)
            .await?;

        let items = sqlx::query_as::<_, SaleSummary>(
            r#"
            SELECT
                s.id,
                s.sold_at,
                s.total_cents,
                s.status,
                CASE
                    WHEN c.id IS NOT NULL THEN c.first_names || ' ' || c.last_names
                    WHEN s.customer_document = ?3 THEN ?4
                    ELSE s.customer_document
                END AS customer_name,
                u.name AS employee_name
            FROM sales s
            LEFT JOIN customers c ON c.document = s.customer_document
            JOIN users u ON u.id = s.employee_id
            ORDER BY s.id DESC
            LIMIT ?1 OFFSET ?2
            "#,
        )
        .bind(page.limit())
        .bind(page.offset())
        .bind(WALK_IN_CUSTOMER_DOCUMENT)
        .bind(WALK_IN_CUSTOMER_NAME)
        .fetch_all(&self.pool)
        .await?;

        debug!(total, page = page.page, "Listed sales");
        Ok(Page::new(items, page, total))
    }

    /// Gets a sale header by ID.
    pub async fn get_by_id(&self, id: i64) -> DbResult<Option<Sale>> {
        let sale = sqlx::query_as::<_, Sale>("SELECT * FROM sales WHERE id = ?1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(sale)
    }

    /// Gets a sale with its lines, in the order they were submitted.
    pub async fn get_detail(&self, id: i64) -> DbResult<Option<SaleDetail>> {
        let Some(sale) = self.get_by_id(id).await? else {
            return Ok(None);
        };

        let items = sqlx::query_as::<_, SaleItemDetail>(
            r#"
            SELECT si.*, p.name AS product_name
            FROM sale_items si
            JOIN products p ON p.id = si.product_id
            WHERE si.sale_id = ?1
            ORDER BY si.id
            "#,
        )
        .bind(id)
        .fetch_all(&self.pool)
        .await?;

        Ok(Some(SaleDetail { sale, items }))
    }
}

// =============================================================================
// Transaction Body
// =============================================================================

/// Every write of a checkout. Runs inside the caller's transaction; the
/// caller commits or rolls back depending on the result.
async fn write_sale(
    conn: &mut SqliteConnection,
    lines: &[CartLineRequest],
    header: &CartHeader,
    actor: &Actor,
) -> Result<i64, FinalizeError> {
    let now = Utc::now();

    let sale_id = sqlx::query(
        r#"
        INSERT INTO sales (
            customer_document, employee_id, location_id, sold_at,
            total_cents, status, payment_terms, payment_method
        ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)
        "#,
    )
    .bind(&header.customer_document)
    .bind(actor.id)
    .bind(DEFAULT_LOCATION_ID)
    .bind(now)
    .bind(header.declared_total.cents())
    .bind(SaleStatus::Completed)
    .bind(PaymentTerms::CashOnDelivery)
    .bind(PaymentMethod::Cash)
    .execute(&mut *conn)
    .await?
    .last_insert_rowid();

    debug!(sale_id, "Sale header inserted");

    let mut computed = Money::zero();

    for (index, request) in lines.iter().enumerate() {
        let line = request.parse(index)?;

        let product = sqlx::query_as::<_, Product>("SELECT * FROM products WHERE id = ?1")
            .bind(line.product_id)
            .fetch_optional(&mut *conn)
            .await?
            .ok_or(ValidationError::UnknownProduct {
                line: index,
                product_id: line.product_id,
            })?;

        verify_line_pricing(&line, product.sale_price())?;

        sqlx::query(
            r#"
            INSERT INTO sale_items (
                sale_id, product_id, quantity, unit_price_cents, subtotal_cents
            ) VALUES (?1, ?2, ?3, ?4, ?5)
            "#,
        )
        .bind(sale_id)
        .bind(product.id)
        .bind(line.quantity)
        .bind(line.unit_price.cents())
        .bind(line.subtotal.cents())
        .execute(&mut *conn)
        .await?;

        let decremented = sqlx::query(
            r#"
            UPDATE products
            SET stock_actual = stock_actual - ?1,
                updated_at = ?3
            WHERE id = ?2 AND stock_actual >= ?1
            "#,
        )
        .bind(line.quantity)
        .bind(product.id)
        .bind(now)
        .execute(&mut *conn)
        .await?;

        if decremented.rows_affected() == 0 {
            return Err(FinalizeError::InsufficientStock {
                product_id: product.id,
                code: product.code,
                available: product.stock_actual,
                requested: line.quantity,
            });
        }

        computed = computed
            .checked_add(line.subtotal)
            .ok_or_else(|| ValidationError::OutOfRange {
                field: "total".to_string(),
                min: 0,
                max: i64::MAX,
            })?;

        debug!(sale_id, product_id = product.id, quantity = line.quantity, "Line recorded");
    }

    verify_total(header.declared_total, computed)?;

    Ok(sale_id)
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::DbError;
    use crate::pool::{Database, DbConfig};
    use crate::repository::fixtures;
    use pernos_core::input::CustomerInput;
    use pernos_core::CustomerKind;
    use serde_json::json;

    fn cart(value: serde_json::Value) -> CartSubmission {
        serde_json::from_value(value).unwrap()
    }

    async fn count(db: &Database, table: &str) -> i64 {
        sqlx::query_scalar(&format!("SELECT COUNT(*) FROM {table}"))
            .fetch_one(db.pool())
            .await
            .unwrap()
    }

    async fn stock(db: &Database, id: i64) -> i64 {
        db.products().get_by_id(id).await.unwrap().unwrap().stock_actual
    }

    async fn setup() -> (Database, Actor, Product, Product) {
        let db = fixtures::database().await;
        let seller = Actor::from(&fixtures::seller(&db).await);
        let bolt = fixtures::product(&db, "PER-M8X40", 500, 10).await;
        let nut = fixtures::product(&db, "TUE-M8", 35, 100).await;
        (db, seller, bolt, nut)
    }

    #[tokio::test]
    async fn test_single_line_sale() {
        let (db, seller, bolt, _) = setup().await;

        let sale_id = db
            .sales()
            .finalize(
                &cart(json!({
                    "cart": [{"id": bolt.id, "quantity": 2, "price": 5.00, "subtotal": 10.00}],
                    "total": "10.00"
                })),
                &seller,
            )
            .await
            .unwrap();

        assert_eq!(stock(&db, bolt.id).await, 8);

        let sale = db.sales().get_by_id(sale_id).await.unwrap().unwrap();
        assert_eq!(sale.total_cents, 1000);
        assert_eq!(sale.employee_id, seller.id);
        assert_eq!(sale.customer_document, WALK_IN_CUSTOMER_DOCUMENT);
        assert_eq!(sale.location_id, DEFAULT_LOCATION_ID);
        assert_eq!(sale.status, SaleStatus::Completed);
        assert_eq!(sale.payment_terms, PaymentTerms::CashOnDelivery);
        assert_eq!(sale.payment_method, PaymentMethod::Cash);
    }

    #[tokio::test]
    async fn test_multi_line_sale_writes_every_line() {
        let (db, seller, bolt, nut) = setup().await;

        let sale_id = db
            .sales()
            .finalize(
                &cart(json!({
                    "cart": [
                        {"id": bolt.id, "quantity": "3", "price": "5.00", "subtotal": "15.00"},
                        {"id": nut.id, "quantity": 20, "price": "0.35", "subtotal": 7.0}
                    ],
                    "total": 22.0,
                    "customer_document": "0102030405"
                })),
                &seller,
            )
            .await
            .unwrap();

        assert_eq!(count(&db, "sales").await, 1);
        assert_eq!(count(&db, "sale_items").await, 2);
        assert_eq!(stock(&db, bolt.id).await, 7);
        assert_eq!(stock(&db, nut.id).await, 80);

        let detail = db.sales().get_detail(sale_id).await.unwrap().unwrap();
        assert_eq!(detail.sale.customer_document, "0102030405");
        assert_eq!(detail.items.len(), 2);
        assert_eq!(detail.items[0].item.product_id, bolt.id);
        assert_eq!(detail.items[0].product_name, bolt.name);
        assert_eq!(detail.items[1].item.subtotal_cents, 700);
    }

    #[tokio::test]
    async fn test_same_product_on_two_lines() {
        let (db, seller, bolt, _) = setup().await;

        db.sales()
            .finalize(
                &cart(json!({
                    "cart": [
                        {"id": bolt.id, "quantity": 6, "price": "5", "subtotal": "30"},
                        {"id": bolt.id, "quantity": 4, "price": "5", "subtotal": "20"}
                    ],
                    "total": "50"
                })),
                &seller,
            )
            .await
            .unwrap();
        assert_eq!(stock(&db, bolt.id).await, 0);

        let err = db
            .sales()
            .finalize(
                &cart(json!({
                    "cart": [{"id": bolt.id, "quantity": 1, "price": "5", "subtotal": "5"}],
                    "total": "5"
                })),
                &seller,
            )
            .await
            .unwrap_err();
        assert!(matches!(err, FinalizeError::InsufficientStock { available: 0, requested: 1, .. }));
    }

    #[tokio::test]
    async fn test_empty_cart_writes_nothing() {
        let (db, seller, _, _) = setup().await;

        let err = db
            .sales()
            .finalize(&cart(json!({"cart": [], "total": "0"})), &seller)
            .await
            .unwrap_err();

        assert!(matches!(err, FinalizeError::Validation(ValidationError::EmptyCart)));
        assert_eq!(count(&db, "sales").await, 0);
    }

    #[tokio::test]
    async fn test_missing_or_bad_total() {
        let (db, seller, bolt, _) = setup().await;
        let line = json!({"id": bolt.id, "quantity": 1, "price": "5", "subtotal": "5"});

        for body in [
            json!({"cart": [line.clone()]}),
            json!({"cart": [line.clone()], "total": ""}),
            json!({"cart": [line.clone()], "total": "five"}),
        ] {
            let err = db.sales().finalize(&cart(body), &seller).await.unwrap_err();
            assert!(matches!(err, FinalizeError::Validation(_)));
        }
        assert_eq!(count(&db, "sales").await, 0);
        assert_eq!(stock(&db, bolt.id).await, 10);
    }

    #[tokio::test]
    async fn test_malformed_line_rolls_back_header_and_earlier_lines() {
        let (db, seller, bolt, nut) = setup().await;

        let err = db
            .sales()
            .finalize(
                &cart(json!({
                    "cart": [
                        {"id": bolt.id, "quantity": 2, "price": "5.00", "subtotal": "10.00"},
                        {"id": nut.id, "quantity": "abc", "price": "0.35", "subtotal": "0.35"}
                    ],
                    "total": "10.35"
                })),
                &seller,
            )
            .await
            .unwrap_err();

        match err {
            FinalizeError::Validation(ValidationError::InvalidNumber { field, .. }) => {
                assert_eq!(field, "cart[1].quantity")
            }
            other => panic!("expected InvalidNumber, got {other:?}"),
        }
        assert_eq!(count(&db, "sales").await, 0);
        assert_eq!(count(&db, "sale_items").await, 0);
        assert_eq!(stock(&db, bolt.id).await, 10);
    }

    #[tokio::test]
    async fn test_unknown_product() {
        let (db, seller, _, _) = setup().await;

        let err = db
            .sales()
            .finalize(
                &cart(json!({
                    "cart": [{"id": 999, "quantity": 1, "price": "1", "subtotal": "1"}],
                    "total": "1"
                })),
                &seller,
            )
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            FinalizeError::Validation(ValidationError::UnknownProduct { line: 0, product_id: 999 })
        ));
        assert_eq!(count(&db, "sales").await, 0);
    }

    #[tokio::test]
    async fn test_client_prices_must_match_catalog() {
        let (db, seller, bolt, _) = setup().await;

        // Discounted unit price
        let err = db
            .sales()
            .finalize(
                &cart(json!({
                    "cart": [{"id": bolt.id, "quantity": 2, "price": "0.01", "subtotal": "0.02"}],
                    "total": "0.02"
                })),
                &seller,
            )
            .await
            .unwrap_err();
        assert!(matches!(err, FinalizeError::Validation(ValidationError::PriceMismatch { .. })));

        // Wrong subtotal
        let err = db
            .sales()
            .finalize(
                &cart(json!({
                    "cart": [{"id": bolt.id, "quantity": 2, "price": "5.00", "subtotal": "5.00"}],
                    "total": "5.00"
                })),
                &seller,
            )
            .await
            .unwrap_err();
        assert!(matches!(err, FinalizeError::Validation(ValidationError::SubtotalMismatch { .. })));

        // Wrong total
        let err = db
            .sales()
            .finalize(
                &cart(json!({
                    "cart": [{"id": bolt.id, "quantity": 2, "price": "5.00", "subtotal": "10.00"}],
                    "total": "1.00"
                })),
                &seller,
            )
            .await
            .unwrap_err();
        assert!(matches!(err, FinalizeError::Validation(ValidationError::TotalMismatch { .. })));

        assert_eq!(count(&db, "sales").await, 0);
        assert_eq!(count(&db, "sale_items").await, 0);
        assert_eq!(stock(&db, bolt.id).await, 10);
    }

    #[tokio::test]
    async fn test_insufficient_stock_rolls_back() {
        let (db, seller, bolt, nut) = setup().await;

        let err = db
            .sales()
            .finalize(
                &cart(json!({
                    "cart": [
                        {"id": nut.id, "quantity": 1, "price": "0.35", "subtotal": "0.35"},
                        {"id": bolt.id, "quantity": 11, "price": "5", "subtotal": "55"}
                    ],
                    "total": "55.35"
                })),
                &seller,
            )
            .await
            .unwrap_err();

        match err {
            FinalizeError::InsufficientStock {
                product_id,
                code,
                available,
                requested,
            } => {
                assert_eq!(product_id, bolt.id);
                assert_eq!(code, "PER-M8X40");
                assert_eq!(available, 10);
                assert_eq!(requested, 11);
            }
            other => panic!("expected InsufficientStock, got {other:?}"),
        }
        assert_eq!(count(&db, "sales").await, 0);
        assert_eq!(stock(&db, nut.id).await, 100);
        assert_eq!(stock(&db, bolt.id).await, 10);
    }

    #[tokio::test]
    async fn test_store_failure_after_header_leaves_nothing() {
        let (db, seller, bolt, nut) = setup().await;

        sqlx::query(&format!(
            "CREATE TRIGGER fail_second_line BEFORE INSERT ON sale_items \
             WHEN NEW.product_id = {} \
             BEGIN SELECT RAISE(ABORT, 'simulated storage failure'); END;",
            nut.id
        ))
        .execute(db.pool())
        .await
        .unwrap();

        let err = db
            .sales()
            .finalize(
                &cart(json!({
                    "cart": [
                        {"id": bolt.id, "quantity": 2, "price": "5", "subtotal": "10"},
                        {"id": nut.id, "quantity": 1, "price": "0.35", "subtotal": "0.35"}
                    ],
                    "total": "10.35"
                })),
                &seller,
            )
            .await
            .unwrap_err();

        assert!(matches!(err, FinalizeError::Finalization(_)));
        assert_eq!(count(&db, "sales").await, 0);
        assert_eq!(count(&db, "sale_items").await, 0);
        assert_eq!(stock(&db, bolt.id).await, 10);
    }

    #[tokio::test]
    async fn test_total_overflow_is_a_validation_error() {
        let (db, seller, _, _) = setup().await;
        // Half of i64::MAX cents, plus one: two of these cannot be summed
        let costly = fixtures::product(&db, "ORO-1", i64::MAX / 2 + 1, 10).await;
        let price = Money::from_cents(costly.sale_price_cents);
        let price = format!("{}.{:02}", price.dollars(), price.cents_part());

        let err = db
            .sales()
            .finalize(
                &cart(json!({
                    "cart": [
                        {"id": costly.id, "quantity": 1, "price": price, "subtotal": price},
                        {"id": costly.id, "quantity": 1, "price": price, "subtotal": price}
                    ],
                    "total": "1"
                })),
                &seller,
            )
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            FinalizeError::Validation(ValidationError::OutOfRange { ref field, .. }) if field == "total"
        ));
        assert_eq!(count(&db, "sales").await, 0);
        assert_eq!(stock(&db, costly.id).await, 10);
    }

    #[tokio::test]
    async fn test_same_cart_twice_records_two_sales() {
        let (db, seller, bolt, _) = setup().await;
        let body = cart(json!({
            "cart": [{"id": bolt.id, "quantity": 2, "price": "5", "subtotal": "10"}],
            "total": "10"
        }));

        let first = db.sales().finalize(&body, &seller).await.unwrap();
        let second = db.sales().finalize(&body, &seller).await.unwrap();

        assert_ne!(first, second);
        assert_eq!(count(&db, "sales").await, 2);
        assert_eq!(stock(&db, bolt.id).await, 6);
    }

    #[tokio::test]
    async fn test_back_to_back_sales_of_last_unit() {
        let (db, seller, _, _) = setup().await;
        let last = fixtures::product(&db, "ULT-1", 100, 1).await;
        let body = cart(json!({
            "cart": [{"id": last.id, "quantity": 1, "price": "1", "subtotal": "1"}],
            "total": "1"
        }));

        let repo_a = db.sales();
        let repo_b = db.sales();
        let (a, b) = tokio::join!(
            repo_a.finalize(&body, &seller),
            repo_b.finalize(&body, &seller)
        );

        let outcomes = [a, b];
        assert_eq!(outcomes.iter().filter(|r| r.is_ok()).count(), 1);
        assert!(outcomes
            .iter()
            .any(|r| matches!(r, Err(FinalizeError::InsufficientStock { .. }))));
        assert_eq!(stock(&db, last.id).await, 0);
        assert_eq!(count(&db, "sales").await, 1);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_racing_checkouts_never_oversell() {
        let dir = tempfile::TempDir::new().unwrap();
        let db = Database::new(
            DbConfig::new(dir.path().join("race.db"))
                .max_connections(5)
                .busy_timeout(std::time::Duration::from_secs(10)),
        )
        .await
        .unwrap();

        let seller = Actor::from(&fixtures::seller(&db).await);
        let scarce = fixtures::product(&db, "ULT-10", 100, 10).await;
        let body = cart(json!({
            "cart": [{"id": scarce.id, "quantity": 1, "price": "1", "subtotal": "1"}],
            "total": "1"
        }));

        let handles: Vec<_> = (0..20)
            .map(|_| {
                let repo = db.sales();
                let body = body.clone();
                let seller = seller.clone();
                tokio::spawn(async move { repo.finalize(&body, &seller).await })
            })
            .collect();

        let mut sold = 0;
        let mut refused = 0;
        for handle in handles {
            match handle.await.unwrap() {
                Ok(_) => sold += 1,
                Err(FinalizeError::InsufficientStock { .. }) => refused += 1,
                Err(other) => panic!("unexpected checkout failure: {other}"),
            }
        }

        assert_eq!(sold, 10);
        assert_eq!(refused, 10);
        assert_eq!(stock(&db, scarce.id).await, 0);
        assert_eq!(count(&db, "sales").await, 10);
        assert_eq!(count(&db, "sale_items").await, 10);

        db.close().await;
    }

    #[tokio::test]
    async fn test_history_names() {
        let (db, seller, bolt, _) = setup().await;
        db.customers()
            .insert(&CustomerInput {
                document: "0102030405".to_string(),
                first_names: "Juan".to_string(),
                last_names: "Torres".to_string(),
                phone: None,
                email: None,
                address: None,
                kind: CustomerKind::Retail,
            })
            .await
            .unwrap();

        for document in [None, Some("0102030405"), Some("1111111111")] {
            let mut body = json!({
                "cart": [{"id": bolt.id, "quantity": 1, "price": "5", "subtotal": "5"}],
                "total": "5"
            });
            if let Some(doc) = document {
                body["customer_document"] = json!(doc);
            }
            db.sales().finalize(&cart(body), &seller).await.unwrap();
        }

        let page = db.sales().list(Pagination::default()).await.unwrap();
        assert_eq!(page.total, 3);
        let names: Vec<_> = page.items.iter().map(|s| s.customer_name.as_str()).collect();
        assert_eq!(names, vec!["1111111111", "Juan Torres", WALK_IN_CUSTOMER_NAME]);
        assert!(page.items.iter().all(|s| s.employee_name == "Seller"));
    }

    #[tokio::test]
    async fn test_sold_products_cannot_be_deleted() {
        let (db, seller, bolt, _) = setup().await;
        db.sales()
            .finalize(
                &cart(json!({
                    "cart": [{"id": bolt.id, "quantity": 1, "price": "5", "subtotal": "5"}],
                    "total": "5"
                })),
                &seller,
            )
            .await
            .unwrap();

        assert!(matches!(
            db.products().delete(bolt.id).await,
            Err(DbError::ForeignKeyViolation { .. })
        ));
    }

    #[tokio::test]
    async fn test_get_detail_missing() {
        let db = fixtures::database().await;
        assert!(db.sales().get_detail(1).await.unwrap().is_none());
    }
}
