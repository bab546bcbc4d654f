//! # Audit Repository
//!
//! Append-only audit trail of every mutating action.
//!
//! Failure to append must never fail the operation being audited; callers
//! use [`AuditRepository::append_best_effort`] after their commit and a
//! failed append only produces a `warn!`.

use chrono::Utc;
use sqlx::SqlitePool;
use tracing::{debug, warn};
use uuid::Uuid;

use kwpos_core::{AuditAction, AuditLogEntry};

use crate::error::DbResult;

/// Default and maximum page sizes for audit listing.
const DEFAULT_LIST_LIMIT: i64 = 100;
const MAX_LIST_LIMIT: i64 = 1_000;

/// Repository for the audit log.
#[derive(Debug, Clone)]
pub struct AuditRepository {
    pool: SqlitePool,
}

impl AuditRepository {
    /// Creates a new AuditRepository.
    pub fn new(pool: SqlitePool) -> Self {
        AuditRepository { pool }
    }

    /// Appends one audit entry and returns it.
    pub async fn append(
        &self,
        actor_name: &str,
        action: AuditAction,
        details: &str,
    ) -> DbResult<AuditLogEntry> {
        let entry = AuditLogEntry {
            id: Uuid::new_v4().to_string(),
            actor_name: actor_name.to_string(),
            action,
            details: details.to_string(),
            timestamp: Utc::now(),
        };

        debug!(action = ?action, actor = %actor_name, "Appending audit entry");

        sqlx::query(
            r#"
            INSERT INTO audit_log (id, actor_name, action, details, timestamp)
            VALUES (?1, ?2, ?3, ?4, ?5)
            "#,
        )
        .bind(&entry.id)
        .bind(&entry.actor_name)
        .bind(entry.action)
        .bind(&entry.details)
        .bind(entry.timestamp)
        .execute(&self.pool)
        .await?;

        Ok(entry)
    }

    /// Appends an entry after a committed mutation. The primary operation
    /// already succeeded, so an audit failure is logged and swallowed.
    pub async fn append_best_effort(&self, actor_name: &str, action: AuditAction, details: &str) {
        if let Err(e) = self.append(actor_name, action, details).await {
            warn!(action = ?action, error = %e, "Audit append failed");
        }
    }

    /// Lists entries newest-first, optionally filtered by action.
    pub async fn list(
        &self,
        limit: Option<i64>,
        action: Option<AuditAction>,
    ) -> DbResult<Vec<AuditLogEntry>> {
        let limit = limit.unwrap_or(DEFAULT_LIST_LIMIT).clamp(1, MAX_LIST_LIMIT);

        let entries = sqlx::query_as::<_, AuditLogEntry>(
            r#"
            SELECT id, actor_name, action, details, timestamp
            FROM audit_log
            WHERE (?1 IS NULL OR action = ?1)
            ORDER BY timestamp DESC
            LIMIT ?2
            "#,
        )
        .bind(action)
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;

        Ok(entries)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
