//! Reporting routes: the daily aggregate and the CSV export.

use axum::extract::{Query, State};
use axum::http::{header, HeaderMap, StatusCode};
use axum::response::IntoResponse;
use axum::Json;
use chrono::{NaiveDate, Utc};
use serde::Deserialize;

use kwpos_core::calendar::{business_date, parse_date, reporting_offset};

use crate::dto::DailyReportDto;
use crate::error::ApiError;
use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct ReportQuery {
    /// Business date, `YYYY-MM-DD`. Default: today in the reporting timezone.
    pub date: Option<String>,
}

fn resolve_date(query: &ReportQuery) -> Result<Option<NaiveDate>, ApiError> {
    query
        .date
        .as_deref()
        .map(parse_date)
        .transpose()
        .map_err(|e| kwpos_db::DbError::from(e).into())
}

/// `GET /api/reports/daily?date=`
pub async fn daily(
    State(state): State<AppState>,
    Query(query): Query<ReportQuery>,
) -> Result<Json<DailyReportDto>, ApiError> {
    let report = state.db.reports().daily(resolve_date(&query)?).await?;
    Ok(Json(report.into()))
}

/// `GET /api/reports/sales-csv?date=`
///
/// One row per completed sale; the `csv` writer handles quoting for values
/// containing commas or quotes (bilingual item names can carry either).
pub async fn sales_csv(
    State(state): State<AppState>,
    Query(query): Query<ReportQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let date = resolve_date(&query)?.unwrap_or_else(|| business_date(Utc::now()));
    let rows = state
        .db
        .reports()
        .completed_sales_with_lines(Some(date))
        .await?;

    let tz = reporting_offset();
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer
        .write_record([
            "Sale Number",
            "Date",
            "Time",
            "Cashier",
            "Status",
            "Total",
            "Payment Method",
            "Reference",
            "Items",
        ])
        .map_err(csv_error)?;

    for row in rows {
        let local = row.sale.sale_date.with_timezone(&tz);
        let items = row
            .lines
            .iter()
            .map(|l| format!("{} ({})", l.name_en_snapshot, l.quantity))
            .collect::<Vec<_>>()
            .join("; ");

        writer
            .write_record([
                row.sale.sale_number.as_str(),
                &local.format("%Y-%m-%d").to_string(),
                &local.format("%H:%M:%S").to_string(),
                row.sale.cashier_name.as_str(),
                "completed",
                &row.sale.total().to_decimal_string(),
                row.sale.payment_method.as_str(),
                row.sale.payment_reference().unwrap_or(""),
                &items,
            ])
            .map_err(csv_error)?;
    }

    let bytes = writer
        .into_inner()
        .map_err(|e| ApiError::new(StatusCode::INTERNAL_SERVER_ERROR, "internal_error", e.to_string()))?;

    let mut headers = HeaderMap::new();
    headers.insert(
        header::CONTENT_TYPE,
        header::HeaderValue::from_static("text/csv; charset=utf-8"),
    );
    if let Ok(value) =
        header::HeaderValue::from_str(&format!("attachment; filename=\"sales-{date}.csv\""))
    {
        headers.insert(header::CONTENT_DISPOSITION, value);
    }

    Ok((StatusCode::OK, headers, bytes))
}

fn csv_error(e: csv::Error) -> ApiError {
    ApiError::new(
        StatusCode::INTERNAL_SERVER_ERROR,
        "internal_error",
        e.to_string(),
    )
}
