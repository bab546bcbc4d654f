//! Audit log routes (read-only: the log is append-only by construction).

use axum::extract::{Query, State};
use axum::Json;
use serde::Deserialize;

use kwpos_core::AuditAction;

use crate::dto::AuditLogDto;
use crate::error::ApiError;
use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct AuditQuery {
    pub limit: Option<i64>,
    /// Filter by action tag, e.g. `CREATE_SALE`.
    pub action: Option<AuditAction>,
}

/// `GET /api/audit-logs?limit=&action=`
pub async fn list(
    State(state): State<AppState>,
    Query(query): Query<AuditQuery>,
) -> Result<Json<Vec<AuditLogDto>>, ApiError> {
    let entries = state.db.audit().list(query.limit, query.action).await?;
    Ok(Json(entries.into_iter().map(AuditLogDto::from).collect()))
}
