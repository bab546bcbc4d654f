//! Catalog item routes.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;

use kwpos_core::Money;
use kwpos_db::repository::item::NewItem;

use crate::actor::Actor;
use crate::dto::{CreateItemBody, ItemDto, UpdatePriceBody};
use crate::error::ApiError;
use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct ListItemsQuery {
    /// Include deactivated items (admin screens). Default: false.
    #[serde(default)]
    pub include_inactive: bool,
}

/// `GET /api/items`
pub async fn list(
    State(state): State<AppState>,
    Query(query): Query<ListItemsQuery>,
) -> Result<Json<Vec<ItemDto>>, ApiError> {
    let items = state.db.items().list(!query.include_inactive).await?;
    Ok(Json(items.into_iter().map(ItemDto::from).collect()))
}

/// `POST /api/items`
pub async fn create(
    State(state): State<AppState>,
    Actor(cashier): Actor,
    Json(body): Json<CreateItemBody>,
) -> Result<(StatusCode, Json<ItemDto>), ApiError> {
    let price: Money = body.price.parse().map_err(kwpos_db::DbError::from)?;

    let item = state
        .db
        .items()
        .create(
            NewItem {
                name_en: body.name_en,
                name_ar: body.name_ar,
                unit: body.unit,
                price_fils: price.fils(),
            },
            &cashier,
        )
        .await?;

    Ok((StatusCode::CREATED, Json(item.into())))
}

/// `GET /api/items/:id`
pub async fn get(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<ItemDto>, ApiError> {
    let item = state
        .db
        .items()
        .get(&id)
        .await?
        .ok_or_else(|| ApiError::not_found(format!("Item not found: {id}")))?;

    Ok(Json(item.into()))
}

/// `PATCH /api/items/:id/price`
pub async fn update_price(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Actor(cashier): Actor,
    Json(body): Json<UpdatePriceBody>,
) -> Result<Json<ItemDto>, ApiError> {
    let price: Money = body.price.parse().map_err(kwpos_db::DbError::from)?;

    let item = state
        .db
        .items()
        .update_price(&id, price.fils(), &cashier)
        .await?;

    Ok(Json(item.into()))
}

/// `DELETE /api/items/:id` - soft delete.
pub async fn deactivate(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Actor(cashier): Actor,
) -> Result<Json<ItemDto>, ApiError> {
    let item = state.db.items().deactivate(&id, &cashier).await?;
    Ok(Json(item.into()))
}
