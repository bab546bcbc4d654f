//! # Refund Repository
//!
//! Full refunds of completed sales.
//!
//! ## Refund Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       create_refund() Flow                              │
//! │                                                                         │
//! │  1. VALIDATE reason (non-blank)                                        │
//! │                                                                         │
//! │  2. ONE TRANSACTION                                                    │
//! │     ├── load sale: missing → NotFound                                  │
//! │     ├── allocate REFUND-YYYY-NNNNNN                                    │
//! │     ├── insert refund (amount = sale.total_fils, always the full       │
//! │     │   total: partial refunds don't exist)                            │
//! │     └── guarded UPDATE sales SET status='refunded'                     │
//! │           WHERE id=? AND status='completed'                            │
//! │         0 rows → InvalidState (already refunded or cancelled)          │
//! │                                                                         │
//! │  3. POST-COMMIT                                                        │
//! │     └── CREATE_REFUND audit entry, best effort                         │
//! │                                                                         │
//! │  The UNIQUE constraint on refunds.sale_id backs up the guard: even a   │
//! │  racing writer that saw 'completed' cannot insert a second refund.     │
//! │  A writer losing that race reports InvalidState, same as a sequential  │
//! │  double refund.                                                        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::Utc;
use sqlx::SqlitePool;
use tracing::{debug, info};
use uuid::Uuid;

use kwpos_core::calendar::business_year;
use kwpos_core::numbering::{format_number, NumberKind};
use kwpos_core::validation::validate_reason;
use kwpos_core::{AuditAction, Cashier, Refund, Sale};

use crate::error::{DbError, DbResult};
use crate::repository::audit::AuditRepository;
use crate::repository::sequence;

/// How many times number allocation is retried on a collision.
const NUMBER_RETRY_LIMIT: u32 = 3;

/// Repository for refund operations.
#[derive(Debug, Clone)]
pub struct RefundRepository {
    pool: SqlitePool,
}

impl RefundRepository {
    /// Creates a new RefundRepository.
    pub fn new(pool: SqlitePool) -> Self {
        RefundRepository { pool }
    }

    fn audit(&self) -> AuditRepository {
        AuditRepository::new(self.pool.clone())
    }

    /// Refunds a completed sale in full and flips its status to `refunded`.
    pub async fn create_refund(
        &self,
        sale_id: &str,
        reason: &str,
        cashier: &Cashier,
    ) -> DbResult<Refund> {
        validate_reason(reason)?;

        let mut attempt = 0;
        let refund = loop {
            attempt += 1;
            match self.insert_refund_txn(sale_id, reason).await {
                Ok(refund) => break refund,
                // a concurrent refund committed between our sale load and
                // insert; the sale is refunded either way
                Err(e) if e.is_unique_violation_on("refunds.sale_id") => {
                    return Err(DbError::invalid_state("Sale", sale_id, "refunded"));
                }
                Err(e)
                    if e.is_unique_violation_on("refund_number")
                        && attempt < NUMBER_RETRY_LIMIT =>
                {
                    debug!(attempt, "Refund number collision, retrying");
                    continue;
                }
                Err(e) => return Err(e),
            }
        };

        info!(
            refund_number = %refund.refund_number,
            amount = %refund.amount(),
            cashier = %cashier.name,
            "Refund created"
        );
        self.audit()
            .append_best_effort(
                &cashier.name,
                AuditAction::CreateRefund,
                &format!(
                    "Refund {} of {} for sale {}: {}",
                    refund.refund_number,
                    refund.amount(),
                    sale_id,
                    reason.trim()
                ),
            )
            .await;

        Ok(refund)
    }

    async fn insert_refund_txn(&self, sale_id: &str, reason: &str) -> DbResult<Refund> {
        let mut tx = self.pool.begin().await?;

        let sale = sqlx::query_as::<_, Sale>(
            r#"
            SELECT id, sale_number, status, sale_date,
                   cashier_id, cashier_name,
                   subtotal_fils, discount_fils, discount_bps, total_fils,
                   payment_method, knet_reference, cheque_number, notes
            FROM sales
            WHERE id = ?1
            "#,
        )
        .bind(sale_id)
        .fetch_optional(&mut *tx)
        .await?
        .ok_or_else(|| DbError::not_found("Sale", sale_id))?;

        let now = Utc::now();
        let year = business_year(now);
        let seq = sequence::next_in_year(&mut *tx, NumberKind::Refund, year).await?;

        let refund = Refund {
            id: Uuid::new_v4().to_string(),
            refund_number: format_number(NumberKind::Refund, year, seq),
            sale_id: sale.id.clone(),
            amount_fils: sale.total_fils,
            reason: reason.trim().to_string(),
            created_at: now,
        };

        sqlx::query(
            r#"
            INSERT INTO refunds (id, refund_number, sale_id, amount_fils, reason, created_at)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6)
            "#,
        )
        .bind(&refund.id)
        .bind(&refund.refund_number)
        .bind(&refund.sale_id)
        .bind(refund.amount_fils)
        .bind(&refund.reason)
        .bind(refund.created_at)
        .execute(&mut *tx)
        .await?;

        // The guard carries the state machine: only a completed sale flips.
        let result = sqlx::query(
            r#"
            UPDATE sales SET status = 'refunded'
            WHERE id = ?1 AND status = 'completed'
            "#,
        )
        .bind(sale_id)
        .execute(&mut *tx)
        .await?;

        if result.rows_affected() == 0 {
            tx.rollback().await?;
            return Err(DbError::invalid_state(
                "Sale",
                sale_id,
                format!("{:?}", sale.status).to_lowercase(),
            ));
        }

        tx.commit().await?;
        Ok(refund)
    }

    /// Gets a refund by business number, e.g. `REFUND-2026-000001`.
    pub async fn get_by_number(&self, number: &str) -> DbResult<Option<Refund>> {
        let refund = sqlx::query_as::<_, Refund>(
            r#"
            SELECT id, refund_number, sale_id, amount_fils, reason, created_at
            FROM refunds
            WHERE refund_number = ?1
            "#,
        )
        .bind(number)
        .fetch_optional(&self.pool)
        .await?;

        Ok(refund)
    }

    /// Lists refunds newest-first.
    pub async fn list(&self) -> DbResult<Vec<Refund>> {
        let refunds = sqlx::query_as::<_, Refund>(
            r#"
            SELECT id, refund_number, sale_id, amount_fils, reason, created_at
            FROM refunds
            ORDER BY created_at DESC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(refunds)
    }
}

// =============================================================================
// Tests
// =============================================================================
