//! Sale ledger routes.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;

use kwpos_core::calendar::parse_date;

use crate::actor::Actor;
use crate::dto::{CancelSaleBody, CreateSaleBody, SaleDto};
use crate::error::ApiError;
use crate::AppState;

/// `POST /api/sales` - checkout.
pub async fn create(
    State(state): State<AppState>,
    Actor(cashier): Actor,
    Json(body): Json<CreateSaleBody>,
) -> Result<(StatusCode, Json<SaleDto>), ApiError> {
    let request = body.into_request().map_err(kwpos_db::DbError::from)?;
    let created = state.db.sales().create_sale(request, &cashier).await?;

    Ok((StatusCode::CREATED, Json(created.into())))
}

#[derive(Debug, Deserialize)]
pub struct ListSalesQuery {
    /// Business date filter, `YYYY-MM-DD` in the reporting timezone.
    pub date: Option<String>,
}

/// `GET /api/sales?date=`
pub async fn list(
    State(state): State<AppState>,
    Query(query): Query<ListSalesQuery>,
) -> Result<Json<Vec<SaleDto>>, ApiError> {
    let date = query
        .date
        .as_deref()
        .map(parse_date)
        .transpose()
        .map_err(kwpos_db::DbError::from)?;

    let sales = state.db.sales().list(date).await?;
    Ok(Json(sales.into_iter().map(SaleDto::from).collect()))
}

/// `GET /api/sales/:number` - lookup by business number.
pub async fn get_by_number(
    State(state): State<AppState>,
    Path(number): Path<String>,
) -> Result<Json<SaleDto>, ApiError> {
    let sale = state
        .db
        .sales()
        .get_by_number(&number)
        .await?
        .ok_or_else(|| ApiError::not_found(format!("Sale not found: {number}")))?;

    Ok(Json(sale.into()))
}

/// `POST /api/sales/:id/cancel`
pub async fn cancel(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Actor(cashier): Actor,
    Json(body): Json<CancelSaleBody>,
) -> Result<Json<SaleDto>, ApiError> {
    let sale = state
        .db
        .sales()
        .cancel_sale(&id, &body.reason, &cashier)
        .await?;

    Ok(Json(sale.into()))
}
