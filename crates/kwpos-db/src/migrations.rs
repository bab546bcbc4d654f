//! # Schema Migrations
//!
//! The SQL files under `migrations/sqlite/` are compiled into the binary by
//! `sqlx::migrate!`, so a deployed server carries its own schema and never
//! reads migration files at runtime. sqlx tracks what has been applied in
//! the `_sqlx_migrations` table and runs only the remainder, each inside its
//! own transaction.
//!
//! To evolve the schema, add `migrations/sqlite/NNN_description.sql` with
//! the next number. Applied files are checksummed; editing one in place
//! fails the startup check, so fixes always go in a new file.

use sqlx::SqlitePool;
use tracing::info;

use crate::error::DbResult;

static MIGRATOR: sqlx::migrate::Migrator = sqlx::migrate!("../../migrations/sqlite");

/// Brings the database up to the schema this binary was built with.
/// Idempotent; called on every [`crate::Database`] open.
pub async fn run_migrations(pool: &SqlitePool) -> DbResult<()> {
    MIGRATOR.run(pool).await?;

    info!(
        migrations = MIGRATOR.migrations.len(),
        "Database schema up to date"
    );
    Ok(())
}
