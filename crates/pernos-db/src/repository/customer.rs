//! # Customer Repository
//!
//! Customers are looked up at the till by national document. Sales store the
//! document as text, so deleting a customer leaves their past sales intact;
//! the history then shows those sales under the raw document.

use chrono::Utc;
use sqlx::SqlitePool;
use tracing::{debug, info};

use crate::error::{DbError, DbResult};
use crate::repository::contains_pattern;
use pernos_core::input::CustomerInput;
use pernos_core::{Customer, Page, Pagination};

#[derive(Debug, Clone)]
pub struct CustomerRepository {
    pool: SqlitePool,
}

impl CustomerRepository {
    pub fn new(pool: SqlitePool) -> Self {
        CustomerRepository { pool }
    }

    /// Lists customers by last name, optionally filtered by document or name.
    pub async fn list(&self, search: Option<&str>, page: Pagination) -> DbResult<Page<Customer>> {
        let pattern = search
            .map(str::trim)
            .filter(|q| !q.is_empty())
            .map(contains_pattern);

        let total: i64 = sqlx::query_scalar(
            r#"
            SELECT COUNT(*) FROM customers
            WHERE ?1 IS NULL
               OR document LIKE ?1 ESCAPE '\'
               OR first_names LIKE ?1 ESCAPE '\'
               OR last_names LIKE ?1 ESCAPE '\'
            "#,
        )
        .bind(&pattern)
        .fetch_one(&self.pool)
        .await?;

        let items = sqlx::query_as::<_, Customer>(
            r#"
            SELECT * FROM customers
            WHERE ?1 IS NULL
               OR document LIKE ?1 ESCAPE '\'
               OR first_names LIKE ?1 ESCAPE '\'
               OR last_names LIKE ?1 ESCAPE '\'
            ORDER BY last_names, first_names
            LIMIT ?2 OFFSET ?3
            "#,
        )
        .bind(&pattern)
        .bind(page.limit())
        .bind(page.offset())
        .fetch_all(&self.pool)
        .await?;

        debug!(total, search = ?pattern, "Listed customers");
        Ok(Page::new(items, page, total))
    }

    pub async fn get_by_id(&self, id: i64) -> DbResult<Option<Customer>> {
        let customer = sqlx::query_as::<_, Customer>("SELECT * FROM customers WHERE id = ?1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(customer)
    }

    pub async fn get_by_document(&self, document: &str) -> DbResult<Option<Customer>> {
        let customer =
            sqlx::query_as::<_, Customer>("SELECT * FROM customers WHERE document = ?1")
                .bind(document.trim())
                .fetch_optional(&self.pool)
                .await?;

        Ok(customer)
    }

    pub async fn insert(&self, input: &CustomerInput) -> DbResult<Customer> {
        let now = Utc::now();
        let id = sqlx::query(
            r#"
            INSERT INTO customers (
                document, first_names, last_names, phone, email, address, kind, created_at
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)
            "#,
        )
        .bind(&input.document)
        .bind(&input.first_names)
        .bind(&input.last_names)
        .bind(&input.phone)
        .bind(&input.email)
        .bind(&input.address)
        .bind(input.kind)
        .bind(now)
        .execute(&self.pool)
        .await
        .map_err(|e| DbError::from(e).with_duplicate_value(&input.document))?
        .last_insert_rowid();

        info!(id, "Customer created");

        self.get_by_id(id)
            .await?
            .ok_or_else(|| DbError::not_found("Customer", id))
    }

    pub async fn update(&self, id: i64, input: &CustomerInput) -> DbResult<Customer> {
        let result = sqlx::query(
            r#"
            UPDATE customers SET
                document = ?2,
                first_names = ?3,
                last_names = ?4,
                phone = ?5,
                email = ?6,
                address = ?7,
                kind = ?8
            WHERE id = ?1
            "#,
        )
        .bind(id)
        .bind(&input.document)
        .bind(&input.first_names)
        .bind(&input.last_names)
        .bind(&input.phone)
        .bind(&input.email)
        .bind(&input.address)
        .bind(input.kind)
        .execute(&self.pool)
        .await
        .map_err(|e| DbError::from(e).with_duplicate_value(&input.document))?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Customer", id));
        }

        info!(id, "Customer updated");

        self.get_by_id(id)
            .await?
            .ok_or_else(|| DbError::not_found("Customer", id))
    }

    pub async fn delete(&self, id: i64) -> DbResult<()> {
        let result = sqlx::query("DELETE FROM customers WHERE id = ?1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Customer", id));
        }

        info!(id, "Customer deleted");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::fixtures;
    use pernos_core::CustomerKind;

    fn input(document: &str, first: &str, last: &str) -> CustomerInput {
        CustomerInput {
            document: document.to_string(),
            first_names: first.to_string(),
            last_names: last.to_string(),
            phone: None,
            email: None,
            address: None,
            kind: CustomerKind::Retail,
        }
    }

    #[tokio::test]
    async fn test_insert_and_lookup_by_document() {
        let db = fixtures::database().await;
        let repo = db.customers();

        let created = repo.insert(&input("0102030405", "Juan", "Torres")).await.unwrap();
        assert_eq!(created.full_name(), "Juan Torres");
        assert_eq!(created.kind, CustomerKind::Retail);

        let found = repo.get_by_document(" 0102030405 ").await.unwrap().unwrap();
        assert_eq!(found.id, created.id);

        assert!(matches!(
            repo.insert(&input("0102030405", "Otro", "Cliente")).await,
            Err(DbError::UniqueViolation { .. })
        ));
    }

    #[tokio::test]
    async fn test_search_and_update() {
        let db = fixtures::database().await;
        let repo = db.customers();

        let juan = repo.insert(&input("0102030405", "Juan", "Torres")).await.unwrap();
        repo.insert(&input("0908070605", "María", "Vélez")).await.unwrap();

        let hits = repo.list(Some("torres"), Pagination::default()).await.unwrap();
        assert_eq!(hits.total, 1);
        assert_eq!(hits.items[0].id, juan.id);

        let by_doc = repo.list(Some("0908"), Pagination::default()).await.unwrap();
        assert_eq!(by_doc.total, 1);

        let mut wholesale = input("0102030405", "Juan", "Torres");
        wholesale.kind = CustomerKind::Wholesale;
        let updated = repo.update(juan.id, &wholesale).await.unwrap();
        assert_eq!(updated.kind, CustomerKind::Wholesale);

        repo.delete(juan.id).await.unwrap();
        assert_eq!(repo.list(None, Pagination::default()).await.unwrap().total, 1);
    }
}
