//! # Schema Migrations
//!
//! The SQL under `migrations/sqlite/` is compiled into the crate and applied
//! in file order when the store is opened.
//!
//! ```text
//!   Database::new
//!        │
//!        ▼
//!   _sqlx_migrations  ── which versions are recorded?
//!        │
//!        ├── 001_initial_schema.sql   categories, suppliers, products,
//!        │                            customers, users, sales, sale_items
//!        ▼
//!   apply the missing ones, record version + checksum
//! ```
//!
//! The schema is fixed by these files. Nothing at runtime inspects tables and
//! patches in missing columns. Changes go in a new numbered file
//! (`002_....sql`); an applied file is never edited.

use sqlx::migrate::Migrator;
use sqlx::SqlitePool;
use tracing::{debug, info};

use crate::error::DbResult;

static MIGRATOR: Migrator = sqlx::migrate!("../../migrations/sqlite");

/// Applies every embedded migration the store has not recorded yet.
pub async fn run_migrations(pool: &SqlitePool) -> DbResult<()> {
    debug!(embedded = MIGRATOR.migrations.len(), "Applying migrations");
    MIGRATOR.run(pool).await?;
    info!("Schema up to date");
    Ok(())
}

/// `(embedded, applied)` counts; equal once the schema is current.
pub async fn migration_status(pool: &SqlitePool) -> DbResult<(usize, usize)> {
    let applied: i64 =
        sqlx::query_scalar("SELECT COUNT(*) FROM _sqlx_migrations WHERE success = 1")
            .fetch_one(pool)
            .await?;

    Ok((MIGRATOR.migrations.len(), applied.max(0) as usize))
}
