//! # Domain Types
//!
//! Core domain types used throughout KWPOS.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                │
//! │                                                                     │
//! │  ┌───────────────┐   ┌───────────────┐   ┌───────────────┐          │
//! │  │     Item      │   │     Sale      │   │    Refund     │          │
//! │  │  ───────────  │   │  ───────────  │   │  ───────────  │          │
//! │  │  id (UUID)    │   │  id (UUID)    │   │  id (UUID)    │          │
//! │  │  name_en/_ar  │   │  sale_number  │   │ refund_number │          │
//! │  │  price_fils   │   │  status       │   │  sale_id (FK) │          │
//! │  │  is_active    │   │  total_fils   │   │  amount_fils  │          │
//! │  └───────────────┘   └───────────────┘   └───────────────┘          │
//! │                                                                     │
//! │  ┌───────────────┐   ┌───────────────┐   ┌───────────────┐          │
//! │  │  SaleStatus   │   │ PaymentMethod │   │  AuditAction  │          │
//! │  │  Completed    │   │  Cash  Knet   │   │  CreateSale   │          │
//! │  │  Refunded     │   │  Cheque       │   │  CreateRefund │          │
//! │  │  Cancelled    │   │  Credit       │   │  ...          │          │
//! │  └───────────────┘   └───────────────┘   └───────────────┘          │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Dual-Key Identity Pattern
//! Sales and refunds have:
//! - `id`: UUID v4 - immutable, used for database relations
//! - Business number: `SALE-2026-000001` / `REFUND-2026-000001` -
//!   human-readable, year-scoped, what cashiers read over the phone

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::money::Money;

// =============================================================================
// Item (catalog)
// =============================================================================

/// A catalog item: a bulk material priced per unit (CBM).
///
/// Items referenced by historical sales are never hard-deleted; they are
/// deactivated via `is_active` instead.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[ts(export)]
pub struct Item {
    /// Unique identifier (UUID v4).
    pub id: String,

    /// English display name.
    pub name_en: String,

    /// Arabic display name.
    pub name_ar: String,

    /// Unit of measure (always "cbm" for bulk materials today).
    pub unit: String,

    /// Price per unit in fils.
    pub price_fils: i64,

    /// Whether the item can be sold (soft delete).
    pub is_active: bool,

    /// When the item was created.
    #[ts(as = "String")]
    pub created_at: DateTime<Utc>,

    /// When the item was last updated.
    #[ts(as = "String")]
    pub updated_at: DateTime<Utc>,
}

impl Item {
    /// Returns the unit price as a Money type.
    #[inline]
    pub fn price(&self) -> Money {
        Money::from_fils(self.price_fils)
    }
}

// =============================================================================
// Sale Status
// =============================================================================

/// The status of a sale transaction.
///
/// State machine: `Completed -> Refunded` or `Completed -> Cancelled`;
/// both targets are terminal. Sales are only persisted once paid, so there
/// is no draft state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::Type))]
#[cfg_attr(feature = "sqlx", sqlx(rename_all = "lowercase"))]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum SaleStatus {
    /// Sale has been paid and persisted.
    Completed,
    /// Sale was fully refunded (terminal).
    Refunded,
    /// Sale was cancelled by an operator (terminal).
    Cancelled,
}

impl SaleStatus {
    /// Whether the status still allows a transition.
    #[inline]
    pub const fn is_terminal(&self) -> bool {
        !matches!(self, SaleStatus::Completed)
    }
}

// =============================================================================
// Payment Method
// =============================================================================

/// How a sale was paid.
///
/// `Credit` exists for reporting over historical data, but new credit-method
/// sales are rejected until the external credit-ledger integration lands
/// (see `validation::validate_payment`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::Type))]
#[cfg_attr(feature = "sqlx", sqlx(rename_all = "lowercase"))]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum PaymentMethod {
    /// Physical cash payment.
    Cash,
    /// KNET debit-card payment; requires a transaction reference.
    Knet,
    /// Cheque payment; requires a cheque number.
    Cheque,
    /// Deferred payment against a customer credit ledger.
    Credit,
}

impl PaymentMethod {
    /// All known methods, in report ordering.
    pub const ALL: [PaymentMethod; 4] = [
        PaymentMethod::Cash,
        PaymentMethod::Knet,
        PaymentMethod::Cheque,
        PaymentMethod::Credit,
    ];

    /// Lowercase wire name, matching the serde representation.
    pub const fn as_str(&self) -> &'static str {
        match self {
            PaymentMethod::Cash => "cash",
            PaymentMethod::Knet => "knet",
            PaymentMethod::Cheque => "cheque",
            PaymentMethod::Credit => "credit",
        }
    }
}

// =============================================================================
// Sale
// =============================================================================

/// A persisted sale transaction.
///
/// Invariants (enforced by cart math before persistence):
/// - `0 <= discount_fils <= subtotal_fils`
/// - `total_fils = subtotal_fils - discount_fils >= 0`
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[ts(export)]
pub struct Sale {
    pub id: String,
    /// Year-scoped business number, e.g. `SALE-2026-000001`.
    pub sale_number: String,
    pub status: SaleStatus,
    /// Creation timestamp; immutable once persisted.
    #[ts(as = "String")]
    pub sale_date: DateTime<Utc>,
    pub cashier_id: String,
    pub cashier_name: String,
    pub subtotal_fils: i64,
    pub discount_fils: i64,
    /// Discount percentage in basis points (1000 = 10%); 0 for flat discounts.
    pub discount_bps: i64,
    pub total_fils: i64,
    pub payment_method: PaymentMethod,
    /// Required iff payment_method = knet.
    pub knet_reference: Option<String>,
    /// Required iff payment_method = cheque.
    pub cheque_number: Option<String>,
    pub notes: Option<String>,
}

impl Sale {
    /// Returns the subtotal as Money.
    #[inline]
    pub fn subtotal(&self) -> Money {
        Money::from_fils(self.subtotal_fils)
    }

    /// Returns the discount as Money.
    #[inline]
    pub fn discount(&self) -> Money {
        Money::from_fils(self.discount_fils)
    }

    /// Returns the total as Money.
    #[inline]
    pub fn total(&self) -> Money {
        Money::from_fils(self.total_fils)
    }

    /// The method-specific payment reference, if any (KNET ref, else cheque
    /// number). This is the "Reference" column of the CSV export.
    pub fn payment_reference(&self) -> Option<&str> {
        self.knet_reference
            .as_deref()
            .or(self.cheque_number.as_deref())
    }
}

// =============================================================================
// Sale Line
// =============================================================================

/// A line item in a sale.
/// Uses the snapshot pattern to freeze catalog data at time of sale.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[ts(export)]
pub struct SaleLine {
    pub id: String,
    pub sale_id: String,
    pub item_id: String,
    /// English name at time of sale (frozen).
    pub name_en_snapshot: String,
    /// Arabic name at time of sale (frozen).
    pub name_ar_snapshot: String,
    /// Unit of measure at time of sale (frozen).
    pub unit_snapshot: String,
    /// Unit price in fils at time of sale (frozen).
    pub unit_price_fils: i64,
    /// Quantity sold (whole units, > 0).
    pub quantity: i64,
    /// quantity × unit_price, exact integer fils.
    pub line_total_fils: i64,
}

impl SaleLine {
    /// Returns the unit price as Money.
    #[inline]
    pub fn unit_price(&self) -> Money {
        Money::from_fils(self.unit_price_fils)
    }

    /// Returns the line total as Money.
    #[inline]
    pub fn line_total(&self) -> Money {
        Money::from_fils(self.line_total_fils)
    }
}

// =============================================================================
// Refund
// =============================================================================

/// A full refund of a completed sale.
///
/// Creating a refund is the sole trigger that flips its sale to
/// `SaleStatus::Refunded`; a sale can carry at most one refund.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[ts(export)]
pub struct Refund {
    pub id: String,
    /// Year-scoped business number, e.g. `REFUND-2026-000001`.
    pub refund_number: String,
    pub sale_id: String,
    /// Always the sale's full total; partial refunds are not supported.
    pub amount_fils: i64,
    pub reason: String,
    #[ts(as = "String")]
    pub created_at: DateTime<Utc>,
}

impl Refund {
    /// Returns the refunded amount as Money.
    #[inline]
    pub fn amount(&self) -> Money {
        Money::from_fils(self.amount_fils)
    }
}

// =============================================================================
// Audit Log
// =============================================================================

/// Audit action tags. Stored as `SCREAMING_SNAKE_CASE` text so the log reads
/// the same in SQL and in the admin UI.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::Type))]
#[cfg_attr(feature = "sqlx", sqlx(rename_all = "SCREAMING_SNAKE_CASE"))]
#[ts(export)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AuditAction {
    CreateSale,
    CreateRefund,
    CancelSale,
    CreateItem,
    UpdatePrice,
    DeactivateItem,
}

/// An immutable audit record of a mutating action.
///
/// Append-only: there is no update or delete path anywhere in the codebase.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[ts(export)]
pub struct AuditLogEntry {
    pub id: String,
    /// Display name of the actor, supplied by the auth collaborator.
    pub actor_name: String,
    pub action: AuditAction,
    /// Free-text details, e.g. "Sale SALE-2026-000001 created for KD 27.900".
    pub details: String,
    #[ts(as = "String")]
    pub timestamp: DateTime<Utc>,
}

// =============================================================================
// Cashier (actor identity)
// =============================================================================

/// Authenticated actor identity, supplied by the auth collaborator.
/// The core never validates credentials; it only attributes actions.
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct Cashier {
    pub id: String,
    pub name: String,
    pub role: String,
}

// =============================================================================
// Unit Tests
// =============================================================================
