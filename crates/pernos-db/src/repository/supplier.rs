//! # Supplier Repository
//!
//! Suppliers are identified by their tax id (RUC). A supplier that products
//! still point at cannot be deleted.

use chrono::Utc;
use sqlx::SqlitePool;
use tracing::{debug, info};

use crate::error::{DbError, DbResult};
use pernos_core::input::SupplierInput;
use pernos_core::{Page, Pagination, Supplier};

#[derive(Debug, Clone)]
pub struct SupplierRepository {
    pool: SqlitePool,
}

impl SupplierRepository {
    pub fn new(pool: SqlitePool) -> Self {
        SupplierRepository { pool }
    }

    /// Lists suppliers by company name.
    pub async fn list(&self, page: Pagination) -> DbResult<Page<Supplier>> {
        let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM suppliers")
            .fetch_one(&self.pool)
            .await?;

        let items = sqlx::query_as::<_, Supplier>(
            "SELECT * FROM suppliers ORDER BY company_name LIMIT ?1 OFFSET ?2",
        )
        .bind(page.limit())
        .bind(page.offset())
        .fetch_all(&self.pool)
        .await?;

        debug!(total, page = page.page, "Listed suppliers");
        Ok(Page::new(items, page, total))
    }

    pub async fn get_by_id(&self, id: i64) -> DbResult<Option<Supplier>> {
        let supplier = sqlx::query_as::<_, Supplier>("SELECT * FROM suppliers WHERE id = ?1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(supplier)
    }

    /// Inserts a supplier.
    ///
    /// ## Returns
    /// * `Err(DbError::UniqueViolation)` - The tax id is already registered
    pub async fn insert(&self, input: &SupplierInput) -> DbResult<Supplier> {
        let now = Utc::now();
        let id = sqlx::query(
            r#"
            INSERT INTO suppliers (
                tax_id, company_name, contact_name, phone, email, address, registered_at
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)
            "#,
        )
        .bind(&input.tax_id)
        .bind(&input.company_name)
        .bind(&input.contact_name)
        .bind(&input.phone)
        .bind(&input.email)
        .bind(&input.address)
        .bind(now)
        .execute(&self.pool)
        .await
        .map_err(|e| DbError::from(e).with_duplicate_value(&input.tax_id))?
        .last_insert_rowid();

        info!(id, tax_id = %input.tax_id, "Supplier created");

        self.get_by_id(id)
            .await?
            .ok_or_else(|| DbError::not_found("Supplier", id))
    }

    pub async fn update(&self, id: i64, input: &SupplierInput) -> DbResult<Supplier> {
        let result = sqlx::query(
            r#"
            UPDATE suppliers SET
                tax_id = ?2,
                company_name = ?3,
                contact_name = ?4,
                phone = ?5,
                email = ?6,
                address = ?7
            WHERE id = ?1
            "#,
        )
        .bind(id)
        .bind(&input.tax_id)
        .bind(&input.company_name)
        .bind(&input.contact_name)
        .bind(&input.phone)
        .bind(&input.email)
        .bind(&input.address)
        .execute(&self.pool)
        .await
        .map_err(|e| DbError::from(e).with_duplicate_value(&input.tax_id))?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Supplier", id));
        }

        info!(id, "Supplier updated");

        self.get_by_id(id)
            .await?
            .ok_or_else(|| DbError::not_found("Supplier", id))
    }

    /// Deletes a supplier that no product references.
    pub async fn delete(&self, id: i64) -> DbResult<()> {
        let result = sqlx::query("DELETE FROM suppliers WHERE id = ?1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Supplier", id));
        }

        info!(id, "Supplier deleted");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::fixtures;

    fn input(tax_id: &str, company: &str) -> SupplierInput {
        SupplierInput {
            tax_id: tax_id.to_string(),
            company_name: company.to_string(),
            contact_name: "Ana Pérez".to_string(),
            phone: "0991234567".to_string(),
            email: None,
            address: Some("Av. Loja 1-23".to_string()),
        }
    }

    #[tokio::test]
    async fn test_crud_roundtrip() {
        let db = fixtures::database().await;
        let repo = db.suppliers();

        let created = repo.insert(&input("1790012345001", "Importadora Norte")).await.unwrap();
        assert_eq!(created.company_name, "Importadora Norte");

        let mut changed = input("1790012345001", "Importadora Sur");
        changed.email = Some("ventas@sur.ec".to_string());
        let updated = repo.update(created.id, &changed).await.unwrap();
        assert_eq!(updated.company_name, "Importadora Sur");
        assert_eq!(updated.email.as_deref(), Some("ventas@sur.ec"));

        let page = repo.list(Pagination::default()).await.unwrap();
        assert_eq!(page.total, 1);

        repo.delete(created.id).await.unwrap();
        assert!(repo.get_by_id(created.id).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_duplicate_tax_id() {
        let db = fixtures::database().await;
        let repo = db.suppliers();
        repo.insert(&input("1790012345001", "A")).await.unwrap();

        match repo.insert(&input("1790012345001", "B")).await {
            Err(DbError::UniqueViolation { value, .. }) => assert_eq!(value, "1790012345001"),
            other => panic!("expected UniqueViolation, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_delete_refused_while_referenced() {
        let db = fixtures::database().await;
        let supplier = db.suppliers().insert(&input("1790012345001", "A")).await.unwrap();

        let mut product = fixtures::product_input("PER-1", 10, 1);
        product.supplier_id = Some(supplier.id);
        db.products().insert(&product).await.unwrap();

        assert!(matches!(
            db.suppliers().delete(supplier.id).await,
            Err(DbError::ForeignKeyViolation { .. })
        ));
    }
}
