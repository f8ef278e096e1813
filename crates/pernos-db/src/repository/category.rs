//! # Category Repository

use sqlx::SqlitePool;
use tracing::{debug, info};

use crate::error::{DbError, DbResult};
use pernos_core::input::NewCategory;
use pernos_core::Category;

#[derive(Debug, Clone)]
pub struct CategoryRepository {
    pool: SqlitePool,
}

impl CategoryRepository {
    pub fn new(pool: SqlitePool) -> Self {
        CategoryRepository { pool }
    }

    /// All categories, alphabetically.
    pub async fn list(&self) -> DbResult<Vec<Category>> {
        let categories = sqlx::query_as::<_, Category>("SELECT * FROM categories ORDER BY name")
            .fetch_all(&self.pool)
            .await?;

        debug!(count = categories.len(), "Listed categories");
        Ok(categories)
    }

    pub async fn get_by_id(&self, id: i64) -> DbResult<Option<Category>> {
        let category = sqlx::query_as::<_, Category>("SELECT * FROM categories WHERE id = ?1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(category)
    }

    /// Inserts a category. Names are unique.
    pub async fn insert(&self, input: &NewCategory) -> DbResult<Category> {
        let id = sqlx::query("INSERT INTO categories (name, description) VALUES (?1, ?2)")
            .bind(&input.name)
            .bind(&input.description)
            .execute(&self.pool)
            .await
            .map_err(|e| DbError::from(e).with_duplicate_value(&input.name))?
            .last_insert_rowid();

        info!(id, name = %input.name, "Category created");

        Ok(Category {
            id,
            name: input.name.clone(),
            description: input.description.clone(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::fixtures;

    #[tokio::test]
    async fn test_insert_list_and_duplicate() {
        let db = fixtures::database().await;
        let repo = db.categories();

        for name in ["Tuercas", "Arandelas", "Pernos"] {
            repo.insert(&NewCategory {
                name: name.to_string(),
                description: None,
            })
            .await
            .unwrap();
        }

        let names: Vec<_> = repo.list().await.unwrap().into_iter().map(|c| c.name).collect();
        assert_eq!(names, vec!["Arandelas", "Pernos", "Tuercas"]);

        let dup = repo
            .insert(&NewCategory {
                name: "Pernos".to_string(),
                description: Some("again".to_string()),
            })
            .await;
        assert!(matches!(dup, Err(DbError::UniqueViolation { .. })));
    }
}
