//! # Wire DTOs
//!
//! Request and response shapes for the REST API.
//!
//! ## Money on the wire
//! Every monetary field crosses the wire as a 3-decimal string (`"27.900"`),
//! never a float: JSON numbers are IEEE doubles and cannot carry fils
//! exactly. Parsing and formatting go through `Money`, so a malformed amount
//! fails loudly instead of rounding quietly.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use kwpos_core::cart::Discount;
use kwpos_core::report::DailyReport;
use kwpos_core::{
    AuditLogEntry, Item, Money, PaymentMethod, Refund, Sale, SaleLine, SaleStatus,
    ValidationError,
};
use kwpos_db::{CreateSaleRequest, SaleLineInput, SaleWithLines};

// =============================================================================
// Items
// =============================================================================

#[derive(Debug, Serialize)]
pub struct ItemDto {
    pub id: String,
    pub name_en: String,
    pub name_ar: String,
    pub unit: String,
    /// Unit price as a 3-decimal string.
    pub price: String,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Item> for ItemDto {
    fn from(item: Item) -> Self {
        ItemDto {
            price: item.price().to_decimal_string(),
            id: item.id,
            name_en: item.name_en,
            name_ar: item.name_ar,
            unit: item.unit,
            is_active: item.is_active,
            created_at: item.created_at,
            updated_at: item.updated_at,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct CreateItemBody {
    pub name_en: String,
    pub name_ar: String,
    pub unit: String,
    /// Unit price as a 3-decimal string.
    pub price: String,
}

#[derive(Debug, Deserialize)]
pub struct UpdatePriceBody {
    pub price: String,
}

// =============================================================================
// Sales
// =============================================================================

/// A submitted cart line; `line_total` is the client preview's figure.
#[derive(Debug, Deserialize)]
pub struct SaleLineBody {
    pub item_id: String,
    pub quantity: i64,
    pub line_total: String,
}

/// The discount input, as the cashier entered it.
#[derive(Debug, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DiscountBody {
    /// Flat amount off, 3-decimal string.
    Amount { value: String },
    /// Percentage off in basis points (1000 = 10%).
    Percent { bps: u32 },
}

impl DiscountBody {
    pub fn into_discount(self) -> Result<Discount, ValidationError> {
        Ok(match self {
            DiscountBody::Amount { value } => Discount::Amount(value.parse()?),
            DiscountBody::Percent { bps } => Discount::Percent(bps),
        })
    }
}

#[derive(Debug, Deserialize)]
pub struct CreateSaleBody {
    pub lines: Vec<SaleLineBody>,
    pub discount: Option<DiscountBody>,
    /// Client-computed totals, re-verified server-side.
    pub subtotal: String,
    pub discount_total: String,
    pub total: String,
    pub payment_method: PaymentMethod,
    pub knet_reference: Option<String>,
    pub cheque_number: Option<String>,
    pub notes: Option<String>,
}

impl CreateSaleBody {
    /// Parses the wire strings into the repository request.
    pub fn into_request(self) -> Result<CreateSaleRequest, ValidationError> {
        let lines = self
            .lines
            .into_iter()
            .map(|l| {
                Ok(SaleLineInput {
                    item_id: l.item_id,
                    quantity: l.quantity,
                    line_total_fils: l.line_total.parse::<Money>()?.fils(),
                })
            })
            .collect::<Result<Vec<_>, ValidationError>>()?;

        Ok(CreateSaleRequest {
            lines,
            discount: self.discount.map(DiscountBody::into_discount).transpose()?,
            subtotal_fils: self.subtotal.parse::<Money>()?.fils(),
            discount_fils: self.discount_total.parse::<Money>()?.fils(),
            total_fils: self.total.parse::<Money>()?.fils(),
            payment_method: self.payment_method,
            knet_reference: self.knet_reference,
            cheque_number: self.cheque_number,
            notes: self.notes,
        })
    }
}

#[derive(Debug, Deserialize)]
pub struct CancelSaleBody {
    pub reason: String,
}

#[derive(Debug, Serialize)]
pub struct SaleLineDto {
    pub item_id: String,
    pub name_en: String,
    pub name_ar: String,
    pub unit: String,
    pub unit_price: String,
    pub quantity: i64,
    pub line_total: String,
}

impl From<SaleLine> for SaleLineDto {
    fn from(line: SaleLine) -> Self {
        SaleLineDto {
            unit_price: line.unit_price().to_decimal_string(),
            line_total: line.line_total().to_decimal_string(),
            item_id: line.item_id,
            name_en: line.name_en_snapshot,
            name_ar: line.name_ar_snapshot,
            unit: line.unit_snapshot,
            quantity: line.quantity,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct SaleDto {
    pub id: String,
    pub sale_number: String,
    pub status: SaleStatus,
    pub sale_date: DateTime<Utc>,
    pub cashier_id: String,
    pub cashier_name: String,
    pub subtotal: String,
    pub discount: String,
    pub discount_bps: i64,
    pub total: String,
    pub payment_method: PaymentMethod,
    pub knet_reference: Option<String>,
    pub cheque_number: Option<String>,
    pub notes: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub lines: Vec<SaleLineDto>,
}

impl From<Sale> for SaleDto {
    fn from(sale: Sale) -> Self {
        SaleDto {
            subtotal: sale.subtotal().to_decimal_string(),
            discount: sale.discount().to_decimal_string(),
            total: sale.total().to_decimal_string(),
            id: sale.id,
            sale_number: sale.sale_number,
            status: sale.status,
            sale_date: sale.sale_date,
            cashier_id: sale.cashier_id,
            cashier_name: sale.cashier_name,
            discount_bps: sale.discount_bps,
            payment_method: sale.payment_method,
            knet_reference: sale.knet_reference,
            cheque_number: sale.cheque_number,
            notes: sale.notes,
            lines: Vec::new(),
        }
    }
}

impl From<SaleWithLines> for SaleDto {
    fn from(swl: SaleWithLines) -> Self {
        let mut dto = SaleDto::from(swl.sale);
        dto.lines = swl.lines.into_iter().map(SaleLineDto::from).collect();
        dto
    }
}

// =============================================================================
// Refunds
// =============================================================================

#[derive(Debug, Deserialize)]
pub struct CreateRefundBody {
    pub sale_id: String,
    pub reason: String,
}

#[derive(Debug, Serialize)]
pub struct RefundDto {
    pub id: String,
    pub refund_number: String,
    pub sale_id: String,
    pub amount: String,
    pub reason: String,
    pub created_at: DateTime<Utc>,
}

impl From<Refund> for RefundDto {
    fn from(refund: Refund) -> Self {
        RefundDto {
            amount: refund.amount().to_decimal_string(),
            id: refund.id,
            refund_number: refund.refund_number,
            sale_id: refund.sale_id,
            reason: refund.reason,
            created_at: refund.created_at,
        }
    }
}

// =============================================================================
// Reports
// =============================================================================

#[derive(Debug, Serialize)]
pub struct PaymentBreakdownDto {
    pub method: PaymentMethod,
    pub count: i64,
    pub total: String,
}

#[derive(Debug, Serialize)]
pub struct TopItemDto {
    pub name_en: String,
    pub quantity: i64,
    pub revenue: String,
}

#[derive(Debug, Serialize)]
pub struct DailyReportDto {
    /// YYYY-MM-DD
    pub date: String,
    pub total_sales_count: i64,
    pub total_revenue: String,
    pub sales_by_payment: Vec<PaymentBreakdownDto>,
    pub top_items: Vec<TopItemDto>,
}

impl From<DailyReport> for DailyReportDto {
    fn from(report: DailyReport) -> Self {
        DailyReportDto {
            date: report.date.format("%Y-%m-%d").to_string(),
            total_sales_count: report.total_sales_count,
            total_revenue: report.total_revenue().to_decimal_string(),
            sales_by_payment: report
                .sales_by_payment
                .into_iter()
                .map(|b| PaymentBreakdownDto {
                    method: b.method,
                    count: b.count,
                    total: b.total().to_decimal_string(),
                })
                .collect(),
            top_items: report
                .top_items
                .into_iter()
                .map(|t| TopItemDto {
                    revenue: Money::from_fils(t.revenue_fils).to_decimal_string(),
                    name_en: t.name_en,
                    quantity: t.quantity,
                })
                .collect(),
        }
    }
}

// =============================================================================
// Audit
// =============================================================================

#[derive(Debug, Serialize)]
pub struct AuditLogDto {
    pub id: String,
    pub actor_name: String,
    pub action: kwpos_core::AuditAction,
    pub details: String,
    pub timestamp: DateTime<Utc>,
}

impl From<AuditLogEntry> for AuditLogDto {
    fn from(entry: AuditLogEntry) -> Self {
        AuditLogDto {
            id: entry.id,
            actor_name: entry.actor_name,
            action: entry.action,
            details: entry.details,
            timestamp: entry.timestamp,
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
