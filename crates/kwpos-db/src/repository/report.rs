//! # Report Repository
//!
//! Fetches one business day's rows and hands them to the pure aggregation in
//! `kwpos_core::report`. The SQL here only filters by UTC range; all shaping
//! (payment buckets, top items, completed-only) happens in core where it is
//! unit-testable without a database.

use chrono::{NaiveDate, Utc};
use sqlx::SqlitePool;
use tracing::debug;

use kwpos_core::calendar::{business_date, day_bounds_utc};
use kwpos_core::report::{daily_report, DailyReport};
use kwpos_core::{Sale, SaleLine, SaleStatus};

use crate::error::DbResult;
use crate::repository::sale::SaleWithLines;

/// Repository for reporting queries.
#[derive(Debug, Clone)]
pub struct ReportRepository {
    pool: SqlitePool,
}

impl ReportRepository {
    /// Creates a new ReportRepository.
    pub fn new(pool: SqlitePool) -> Self {
        ReportRepository { pool }
    }

    /// Builds the daily report for `date` (default: today in the reporting
    /// timezone).
    pub async fn daily(&self, date: Option<NaiveDate>) -> DbResult<DailyReport> {
        let date = date.unwrap_or_else(|| business_date(Utc::now()));
        let (start, end) = day_bounds_utc(date);

        debug!(%date, "Building daily report");

        let sales = sqlx::query_as::<_, Sale>(
            r#"
            SELECT id, sale_number, status, sale_date,
                   cashier_id, cashier_name,
                   subtotal_fils, discount_fils, discount_bps, total_fils,
                   payment_method, knet_reference, cheque_number, notes
            FROM sales
            WHERE sale_date >= ?1 AND sale_date < ?2
            "#,
        )
        .bind(start)
        .bind(end)
        .fetch_all(&self.pool)
        .await?;

        let lines = sqlx::query_as::<_, SaleLine>(
            r#"
            SELECT sl.id, sl.sale_id, sl.item_id,
                   sl.name_en_snapshot, sl.name_ar_snapshot, sl.unit_snapshot,
                   sl.unit_price_fils, sl.quantity, sl.line_total_fils
            FROM sale_lines sl
            JOIN sales s ON s.id = sl.sale_id
            WHERE s.sale_date >= ?1 AND s.sale_date < ?2
            "#,
        )
        .bind(start)
        .bind(end)
        .fetch_all(&self.pool)
        .await?;

        Ok(daily_report(date, &sales, &lines))
    }

    /// The day's completed sales with lines, newest-first. This is the row
    /// set behind the CSV export; the rendering lives in the server crate.
    pub async fn completed_sales_with_lines(
        &self,
        date: Option<NaiveDate>,
    ) -> DbResult<Vec<SaleWithLines>> {
        let date = date.unwrap_or_else(|| business_date(Utc::now()));
        let (start, end) = day_bounds_utc(date);

        let sales = sqlx::query_as::<_, Sale>(
            r#"
            SELECT id, sale_number, status, sale_date,
                   cashier_id, cashier_name,
                   subtotal_fils, discount_fils, discount_bps, total_fils,
                   payment_method, knet_reference, cheque_number, notes
            FROM sales
            WHERE sale_date >= ?1 AND sale_date < ?2 AND status = 'completed'
            ORDER BY sale_date DESC
            "#,
        )
        .bind(start)
        .bind(end)
        .fetch_all(&self.pool)
        .await?;

        let mut result = Vec::with_capacity(sales.len());
        for sale in sales {
            debug_assert_eq!(sale.status, SaleStatus::Completed);
            let lines = sqlx::query_as::<_, SaleLine>(
                r#"
                SELECT id, sale_id, item_id,
                       name_en_snapshot, name_ar_snapshot, unit_snapshot,
                       unit_price_fils, quantity, line_total_fils
                FROM sale_lines
                WHERE sale_id = ?1
                ORDER BY rowid
                "#,
            )
            .bind(&sale.id)
            .fetch_all(&self.pool)
            .await?;
            result.push(SaleWithLines { sale, lines });
        }

        Ok(result)
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pool::{Database, DbConfig};
    use crate::repository::item::NewItem;
    use crate::repository::sale::{CreateSaleRequest, SaleLineInput};
    use kwpos_core::{Cashier, PaymentMethod};

    fn cashier() -> Cashier {
        Cashier {
            id: "u1".to_string(),
            name: "Cashier One".to_string(),
            role: "cashier".to_string(),
        }
    }

    async fn seeded() -> (Database, String, String) {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let sand = db
            .items()
            .create(
                NewItem {
                    name_en: "Washed Sand".to_string(),
                    name_ar: "رمل مغسول".to_string(),
                    unit: "cbm".to_string(),
                    price_fils: 15_500,
                },
                &cashier(),
            )
            .await
            .unwrap();
        let gatch = db
            .items()
            .create(
                NewItem {
                    name_en: "Gatch".to_string(),
                    name_ar: "جص".to_string(),
                    unit: "cbm".to_string(),
                    price_fils: 18_750,
                },
                &cashier(),
            )
            .await
            .unwrap();
        (db, sand.id, gatch.id)
    }

    fn request(item_id: &str, qty: i64, unit_price: i64, method: PaymentMethod) -> CreateSaleRequest {
        let total = qty * unit_price;
        CreateSaleRequest {
            lines: vec![SaleLineInput {
                item_id: item_id.to_string(),
                quantity: qty,
                line_total_fils: total,
            }],
            discount: None,
            subtotal_fils: total,
            discount_fils: 0,
            total_fils: total,
            payment_method: method,
            knet_reference: matches!(method, PaymentMethod::Knet).then(|| "KN-4821".to_string()),
            cheque_number: None,
            notes: None,
        }
    }

    #[tokio::test]
    async fn test_daily_report_shape() {
        let (db, sand, gatch) = seeded().await;

        db.sales()
            .create_sale(request(&sand, 2, 15_500, PaymentMethod::Cash), &cashier())
            .await
            .unwrap();
        db.sales()
            .create_sale(request(&gatch, 3, 18_750, PaymentMethod::Knet), &cashier())
            .await
            .unwrap();

        let report = db.reports().daily(None).await.unwrap();

        assert_eq!(report.total_sales_count, 2);
        assert_eq!(report.total_revenue_fils, 31_000 + 56_250);
        assert_eq!(report.sales_by_payment.len(), 4);
        assert_eq!(report.sales_by_payment[0].total_fils, 31_000); // cash
        assert_eq!(report.sales_by_payment[1].total_fils, 56_250); // knet
        assert_eq!(report.sales_by_payment[2].count, 0); // cheque
        assert_eq!(report.sales_by_payment[3].count, 0); // credit
        assert_eq!(report.top_items[0].name_en, "Gatch");
        assert_eq!(report.top_items[0].quantity, 3);
    }

    #[tokio::test]
    async fn test_refunded_sale_leaves_the_report() {
        let (db, sand, _) = seeded().await;

        let sale = db
            .sales()
            .create_sale(request(&sand, 2, 15_500, PaymentMethod::Cash), &cashier())
            .await
            .unwrap();
        db.refunds()
            .create_refund(&sale.sale.id, "returned", &cashier())
            .await
            .unwrap();

        let report = db.reports().daily(None).await.unwrap();
        assert_eq!(report.total_sales_count, 0);
        assert_eq!(report.total_revenue_fils, 0);
        assert!(report.top_items.is_empty());
    }

    #[tokio::test]
    async fn test_other_dates_are_empty() {
        let (db, sand, _) = seeded().await;

        db.sales()
            .create_sale(request(&sand, 1, 15_500, PaymentMethod::Cash), &cashier())
            .await
            .unwrap();

        let yesterday = business_date(Utc::now()).pred_opt().unwrap();
        let report = db.reports().daily(Some(yesterday)).await.unwrap();
        assert_eq!(report.total_sales_count, 0);
    }

    #[tokio::test]
    async fn test_export_rows_are_completed_only() {
        let (db, sand, gatch) = seeded().await;

        db.sales()
            .create_sale(request(&sand, 1, 15_500, PaymentMethod::Cash), &cashier())
            .await
            .unwrap();
        let cancelled = db
            .sales()
            .create_sale(request(&gatch, 1, 18_750, PaymentMethod::Cash), &cashier())
            .await
            .unwrap();
        db.sales()
            .cancel_sale(&cancelled.sale.id, "mistake", &cashier())
            .await
            .unwrap();

        let rows = db.reports().completed_sales_with_lines(None).await.unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].lines[0].name_en_snapshot, "Washed Sand");
    }
}
