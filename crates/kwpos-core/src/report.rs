//! # Daily Report Module
//!
//! Pure aggregation of one business day's completed sales into the shape the
//! end-of-day screen shows.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                      Daily Report (2026-03-02)                      │
//! │                                                                     │
//! │   Revenue: KD 131.250          Sales: 7                             │
//! │                                                                     │
//! │   By payment:   cash KD 58.500 (3)   knet   KD 72.750 (4)           │
//! │                 cheque KD 0.000 (0)  credit KD 0.000 (0)            │
//! │                                                                     │
//! │   Top items:    1. Washed Sand (14 cbm)   2. Gatch (6 cbm) ...      │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The storage layer fetches the day's rows; this module only reduces them.
//! Cancelled and refunded sales are excluded from every figure. Every
//! payment method gets a bucket even when it took nothing that day, so the
//! report shape never shifts under the UI.

use std::collections::{HashMap, HashSet};

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::money::Money;
use crate::types::{PaymentMethod, Sale, SaleLine, SaleStatus};
use crate::REPORT_TOP_ITEMS;

// =============================================================================
// Report Types
// =============================================================================

/// Per-payment-method totals. Present for every method, zeros included.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct PaymentBreakdown {
    pub method: PaymentMethod,
    pub count: i64,
    pub total_fils: i64,
}

impl PaymentBreakdown {
    /// Returns the bucket total as Money.
    #[inline]
    pub fn total(&self) -> Money {
        Money::from_fils(self.total_fils)
    }
}

/// One entry in the best-sellers list, grouped by English snapshot name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct TopItem {
    pub name_en: String,
    /// Total units sold across the day.
    pub quantity: i64,
    /// Revenue attributed to this item across the day, in fils.
    pub revenue_fils: i64,
}

/// The aggregated end-of-day figures.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct DailyReport {
    /// The business date the figures cover (UTC+3 calendar day).
    #[ts(as = "String")]
    pub date: NaiveDate,
    pub total_sales_count: i64,
    pub total_revenue_fils: i64,
    /// One bucket per payment method, in [`PaymentMethod::ALL`] order.
    pub sales_by_payment: Vec<PaymentBreakdown>,
    /// Best sellers by quantity desc, name asc; at most five entries.
    pub top_items: Vec<TopItem>,
}

impl DailyReport {
    /// Returns the day's revenue as Money.
    #[inline]
    pub fn total_revenue(&self) -> Money {
        Money::from_fils(self.total_revenue_fils)
    }
}

// =============================================================================
// Aggregation
// =============================================================================

/// Reduces one day's sales and lines into a [`DailyReport`].
///
/// Only `SaleStatus::Completed` sales count; lines belonging to cancelled or
/// refunded sales are dropped even if the caller passed them in.
pub fn daily_report(date: NaiveDate, sales: &[Sale], lines: &[SaleLine]) -> DailyReport {
    let completed: Vec<&Sale> = sales
        .iter()
        .filter(|s| s.status == SaleStatus::Completed)
        .collect();
    let completed_ids: HashSet<&str> = completed.iter().map(|s| s.id.as_str()).collect();

    let total_revenue_fils = completed.iter().map(|s| s.total_fils).sum();

    let sales_by_payment = PaymentMethod::ALL
        .iter()
        .map(|&method| {
            let bucket: Vec<&&Sale> = completed
                .iter()
                .filter(|s| s.payment_method == method)
                .collect();
            PaymentBreakdown {
                method,
                count: bucket.len() as i64,
                total_fils: bucket.iter().map(|s| s.total_fils).sum(),
            }
        })
        .collect();

    // name -> (quantity, revenue)
    let mut by_item: HashMap<&str, (i64, i64)> = HashMap::new();
    for line in lines {
        if !completed_ids.contains(line.sale_id.as_str()) {
            continue;
        }
        let entry = by_item.entry(line.name_en_snapshot.as_str()).or_default();
        entry.0 += line.quantity;
        entry.1 += line.line_total_fils;
    }

    let mut top_items: Vec<TopItem> = by_item
        .into_iter()
        .map(|(name, (quantity, revenue_fils))| TopItem {
            name_en: name.to_string(),
            quantity,
            revenue_fils,
        })
        .collect();
    top_items.sort_by(|a, b| {
        b.quantity
            .cmp(&a.quantity)
            .then_with(|| a.name_en.cmp(&b.name_en))
    });
    top_items.truncate(REPORT_TOP_ITEMS);

    DailyReport {
        date,
        total_sales_count: completed.len() as i64,
        total_revenue_fils,
        sales_by_payment,
        top_items,
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn sale(id: &str, total_fils: i64, method: PaymentMethod, status: SaleStatus) -> Sale {
        Sale {
            id: id.to_string(),
            sale_number: format!("SALE-2026-{:06}", 1),
            status,
            sale_date: Utc::now(),
            cashier_id: "u1".to_string(),
            cashier_name: "Cashier One".to_string(),
            subtotal_fils: total_fils,
            discount_fils: 0,
            discount_bps: 0,
            total_fils,
            payment_method: method,
            knet_reference: None,
            cheque_number: None,
            notes: None,
        }
    }

    fn line(sale_id: &str, name: &str, quantity: i64, unit_price_fils: i64) -> SaleLine {
        SaleLine {
            id: format!("{sale_id}-{name}"),
            sale_id: sale_id.to_string(),
            item_id: name.to_string(),
            name_en_snapshot: name.to_string(),
            name_ar_snapshot: name.to_string(),
            unit_snapshot: "cbm".to_string(),
            unit_price_fils,
            quantity,
            line_total_fils: quantity * unit_price_fils,
        }
    }

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 3, 2).unwrap()
    }

    #[test]
    fn test_empty_day_keeps_all_buckets() {
        let report = daily_report(date(), &[], &[]);

        assert_eq!(report.total_sales_count, 0);
        assert_eq!(report.total_revenue_fils, 0);
        assert_eq!(report.sales_by_payment.len(), 4);
        for bucket in &report.sales_by_payment {
            assert_eq!(bucket.count, 0);
            assert_eq!(bucket.total_fils, 0);
        }
        assert!(report.top_items.is_empty());
    }

    #[test]
    fn test_payment_buckets_and_revenue() {
        let sales = vec![
            sale("s1", 27_900, PaymentMethod::Cash, SaleStatus::Completed),
            sale("s2", 12_000, PaymentMethod::Cash, SaleStatus::Completed),
            sale("s3", 18_750, PaymentMethod::Knet, SaleStatus::Completed),
        ];
        let report = daily_report(date(), &sales, &[]);

        assert_eq!(report.total_sales_count, 3);
        assert_eq!(report.total_revenue_fils, 58_650);

        let cash = &report.sales_by_payment[0];
        assert_eq!(cash.method, PaymentMethod::Cash);
        assert_eq!(cash.count, 2);
        assert_eq!(cash.total_fils, 39_900);

        let knet = &report.sales_by_payment[1];
        assert_eq!(knet.count, 1);
        assert_eq!(knet.total_fils, 18_750);

        // cheque and credit took nothing but are still present
        assert_eq!(report.sales_by_payment[2].count, 0);
        assert_eq!(report.sales_by_payment[3].count, 0);
    }

    #[test]
    fn test_excludes_refunded_and_cancelled() {
        let sales = vec![
            sale("s1", 27_900, PaymentMethod::Cash, SaleStatus::Completed),
            sale("s2", 50_000, PaymentMethod::Cash, SaleStatus::Refunded),
            sale("s3", 40_000, PaymentMethod::Knet, SaleStatus::Cancelled),
        ];
        let lines = vec![
            line("s1", "Washed Sand", 2, 15_500),
            line("s2", "Gatch", 3, 18_750),
        ];
        let report = daily_report(date(), &sales, &lines);

        assert_eq!(report.total_sales_count, 1);
        assert_eq!(report.total_revenue_fils, 27_900);
        // the refunded sale's lines do not reach the top-items list
        assert_eq!(report.top_items.len(), 1);
        assert_eq!(report.top_items[0].name_en, "Washed Sand");
    }

    #[test]
    fn test_top_items_sorted_and_truncated() {
        let sales = vec![sale("s1", 0, PaymentMethod::Cash, SaleStatus::Completed)];
        let lines = vec![
            line("s1", "Washed Sand", 5, 15_500),
            line("s1", "Sand", 5, 12_000),
            line("s1", "Gatch", 9, 18_750),
            line("s1", "Gravel", 2, 9_000),
            line("s1", "Cement", 1, 22_000),
            line("s1", "Bricks", 1, 4_000),
        ];
        let report = daily_report(date(), &sales, &lines);

        assert_eq!(report.top_items.len(), REPORT_TOP_ITEMS);
        assert_eq!(report.top_items[0].name_en, "Gatch");
        // tie on quantity 5 broken alphabetically
        assert_eq!(report.top_items[1].name_en, "Sand");
        assert_eq!(report.top_items[2].name_en, "Washed Sand");
        assert_eq!(report.top_items[3].name_en, "Gravel");
        // Bricks/Cement tie on quantity 1; Bricks wins alphabetically
        assert_eq!(report.top_items[4].name_en, "Bricks");
        assert!(!report.top_items.iter().any(|t| t.name_en == "Cement"));
    }

    #[test]
    fn test_top_items_merge_across_sales() {
        let sales = vec![
            sale("s1", 0, PaymentMethod::Cash, SaleStatus::Completed),
            sale("s2", 0, PaymentMethod::Knet, SaleStatus::Completed),
        ];
        let lines = vec![
            line("s1", "Washed Sand", 2, 15_500),
            line("s2", "Washed Sand", 3, 15_500),
        ];
        let report = daily_report(date(), &sales, &lines);

        assert_eq!(report.top_items.len(), 1);
        assert_eq!(report.top_items[0].quantity, 5);
        assert_eq!(report.top_items[0].revenue_fils, 5 * 15_500);
    }
}
