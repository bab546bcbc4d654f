//! # API Error Types
//!
//! What the frontend sees when an operation fails.
//!
//! ## Status Mapping
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  DbError::Validation        → 400 validation_error                     │
//! │  (missing actor headers)    → 401 unauthorized                         │
//! │  DbError::NotFound          → 404 not_found                            │
//! │  DbError::InvalidState      → 409 invalid_state                        │
//! │  DbError::TotalsMismatch    → 422 totals_mismatch                      │
//! │  DbError::UniqueViolation   → 422 integrity_error                      │
//! │  DbError::ForeignKey...     → 422 integrity_error                      │
//! │  everything else            → 500 internal_error (detail logged,       │
//! │                                   never leaked to the client)          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use tracing::error;

use kwpos_db::DbError;

/// The JSON error body: a machine-readable code plus a human message.
#[derive(Debug, Clone, Serialize)]
pub struct ApiError {
    #[serde(skip)]
    pub status: StatusCode,
    pub code: &'static str,
    pub message: String,
}

impl ApiError {
    pub fn new(status: StatusCode, code: &'static str, message: impl Into<String>) -> Self {
        ApiError {
            status,
            code,
            message: message.into(),
        }
    }

    /// 401 for mutating requests without actor identity headers.
    pub fn unauthorized() -> Self {
        ApiError::new(
            StatusCode::UNAUTHORIZED,
            "unauthorized",
            "actor identity headers (x-actor-id, x-actor-name) are required",
        )
    }

    /// 400 for malformed request input the repositories never see.
    pub fn bad_request(message: impl Into<String>) -> Self {
        ApiError::new(StatusCode::BAD_REQUEST, "validation_error", message)
    }

    /// 404 for a missing resource addressed by the URL.
    pub fn not_found(message: impl Into<String>) -> Self {
        ApiError::new(StatusCode::NOT_FOUND, "not_found", message)
    }
}

impl From<DbError> for ApiError {
    fn from(err: DbError) -> Self {
        match &err {
            DbError::Validation(e) => ApiError::new(
                StatusCode::BAD_REQUEST,
                "validation_error",
                e.to_string(),
            ),
            DbError::NotFound { .. } => {
                ApiError::new(StatusCode::NOT_FOUND, "not_found", err.to_string())
            }
            DbError::InvalidState { .. } => {
                ApiError::new(StatusCode::CONFLICT, "invalid_state", err.to_string())
            }
            DbError::TotalsMismatch { .. } => ApiError::new(
                StatusCode::UNPROCESSABLE_ENTITY,
                "totals_mismatch",
                err.to_string(),
            ),
            DbError::UniqueViolation { .. } | DbError::ForeignKeyViolation { .. } => {
                ApiError::new(
                    StatusCode::UNPROCESSABLE_ENTITY,
                    "integrity_error",
                    err.to_string(),
                )
            }
            _ => {
                // storage faults get logged with detail, the client gets a
                // generic message
                error!(error = %err, "Internal error");
                ApiError::new(
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "internal_error",
                    "internal server error",
                )
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status;
        (status, Json(self)).into_response()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use kwpos_core::ValidationError;

    #[test]
    fn test_status_mapping() {
        let err: ApiError = DbError::Validation(ValidationError::Required {
            field: "reason".to_string(),
        })
        .into();
        assert_eq!(err.status, StatusCode::BAD_REQUEST);
        assert_eq!(err.code, "validation_error");

        let err: ApiError = DbError::not_found("Sale", "x").into();
        assert_eq!(err.status, StatusCode::NOT_FOUND);

        let err: ApiError = DbError::invalid_state("Sale", "x", "refunded").into();
        assert_eq!(err.status, StatusCode::CONFLICT);

        let err: ApiError = DbError::TotalsMismatch {
            field: "total".to_string(),
            submitted: "1.000".to_string(),
            computed: "2.000".to_string(),
        }
        .into();
        assert_eq!(err.status, StatusCode::UNPROCESSABLE_ENTITY);

        let err: ApiError = DbError::PoolExhausted.into();
        assert_eq!(err.status, StatusCode::INTERNAL_SERVER_ERROR);
        // internal detail never reaches the client
        assert_eq!(err.message, "internal server error");
    }
}
