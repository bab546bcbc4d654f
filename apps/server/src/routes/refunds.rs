//! Refund routes.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;

use crate::actor::Actor;
use crate::dto::{CreateRefundBody, RefundDto};
use crate::error::ApiError;
use crate::AppState;

/// `POST /api/refunds` - full refund of a completed sale.
pub async fn create(
    State(state): State<AppState>,
    Actor(cashier): Actor,
    Json(body): Json<CreateRefundBody>,
) -> Result<(StatusCode, Json<RefundDto>), ApiError> {
    let refund = state
        .db
        .refunds()
        .create_refund(&body.sale_id, &body.reason, &cashier)
        .await?;

    Ok((StatusCode::CREATED, Json(refund.into())))
}

/// `GET /api/refunds`
pub async fn list(State(state): State<AppState>) -> Result<Json<Vec<RefundDto>>, ApiError> {
    let refunds = state.db.refunds().list().await?;
    Ok(Json(refunds.into_iter().map(RefundDto::from).collect()))
}

/// `GET /api/refunds/:number` - lookup by business number.
pub async fn get_by_number(
    State(state): State<AppState>,
    Path(number): Path<String>,
) -> Result<Json<RefundDto>, ApiError> {
    let refund = state
        .db
        .refunds()
        .get_by_number(&number)
        .await?
        .ok_or_else(|| ApiError::not_found(format!("Refund not found: {number}")))?;

    Ok(Json(refund.into()))
}
