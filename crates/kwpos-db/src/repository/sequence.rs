//! # Number Sequence Allocation
//!
//! Year-scoped counters for sale and refund numbers.
//!
//! ## Why a single statement
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  THE READ-THEN-WRITE RACE                                               │
//! │                                                                         │
//! │  Handler A: SELECT next_seq  → 7                                       │
//! │  Handler B: SELECT next_seq  → 7        (both read before either       │
//! │  Handler A: UPDATE ... seq=8             writes: duplicate number!)    │
//! │  Handler B: UPDATE ... seq=8                                           │
//! │                                                                         │
//! │  OUR SOLUTION: one upsert-returning statement                          │
//! │                                                                         │
//! │    INSERT INTO number_sequences (scope, year, next_seq)                │
//! │    VALUES (?, ?, 1)                                                    │
//! │    ON CONFLICT(scope, year) DO UPDATE SET next_seq = next_seq + 1      │
//! │    RETURNING next_seq                                                  │
//! │                                                                         │
//! │  SQLite executes this atomically; two callers can never see the        │
//! │  same value. Run inside the same transaction as the insert that        │
//! │  uses the number, a rollback also rolls the counter back.              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use kwpos_core::numbering::NumberKind;

use crate::error::DbResult;

/// Allocates the next sequence value for `(kind, year)` and returns it.
///
/// Callers pass the transaction that will also insert the numbered row, so
/// a failed insert returns the value to the counter.
pub async fn next_in_year<'e, E>(executor: E, kind: NumberKind, year: i32) -> DbResult<i64>
where
    E: sqlx::Executor<'e, Database = sqlx::Sqlite>,
{
    let seq: i64 = sqlx::query_scalar(
        r#"
        INSERT INTO number_sequences (scope, year, next_seq)
        VALUES (?1, ?2, 1)
        ON CONFLICT(scope, year) DO UPDATE SET next_seq = next_seq + 1
        RETURNING next_seq
        "#,
    )
    .bind(kind.scope())
    .bind(year)
    .fetch_one(executor)
    .await?;

    Ok(seq)
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pool::{Database, DbConfig};

    #[tokio::test]
    async fn test_sequences_are_monotonic_per_scope_and_year() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();

        let a = next_in_year(db.pool(), NumberKind::Sale, 2026).await.unwrap();
        let b = next_in_year(db.pool(), NumberKind::Sale, 2026).await.unwrap();
        assert_eq!((a, b), (1, 2));

        // refunds count independently
        let r = next_in_year(db.pool(), NumberKind::Refund, 2026)
            .await
            .unwrap();
        assert_eq!(r, 1);

        // a new year restarts the sale counter
        let next_year = next_in_year(db.pool(), NumberKind::Sale, 2027)
            .await
            .unwrap();
        assert_eq!(next_year, 1);
    }

    #[tokio::test]
    async fn test_rollback_returns_the_number() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();

        let mut tx = db.pool().begin().await.unwrap();
        let seq = next_in_year(&mut *tx, NumberKind::Sale, 2026).await.unwrap();
        assert_eq!(seq, 1);
        tx.rollback().await.unwrap();

        let seq = next_in_year(db.pool(), NumberKind::Sale, 2026).await.unwrap();
        assert_eq!(seq, 1);
    }
}
