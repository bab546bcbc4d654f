//! # kwpos-core: Pure Business Logic for KWPOS
//!
//! This crate is the **heart** of KWPOS, a point-of-sale system for a
//! building-materials yard in Kuwait. It contains all business logic as pure
//! functions with zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                        KWPOS Architecture                           │
//! │                                                                     │
//! │  ┌───────────────────────────────────────────────────────────────┐  │
//! │  │                    Frontend (React)                           │  │
//! │  │    Catalog UI ──► Cart UI ──► Payment UI ──► Receipt UI       │  │
//! │  └────────────────────────────┬──────────────────────────────────┘  │
//! │                               │ JSON over HTTP                      │
//! │  ┌────────────────────────────▼──────────────────────────────────┐  │
//! │  │                    apps/server (axum)                         │  │
//! │  │    POST /api/sales, POST /api/refunds, GET /api/reports/...   │  │
//! │  └────────────────────────────┬──────────────────────────────────┘  │
//! │                               │                                     │
//! │  ┌────────────────────────────▼──────────────────────────────────┐  │
//! │  │               ★ kwpos-core (THIS CRATE) ★                     │  │
//! │  │                                                               │  │
//! │  │   ┌─────────┐ ┌─────────┐ ┌─────────┐ ┌──────────┐            │  │
//! │  │   │  types  │ │  money  │ │  cart   │ │  report  │            │  │
//! │  │   │  Item   │ │  Money  │ │  Cart   │ │ DailyRpt │            │  │
//! │  │   │  Sale   │ │  fils   │ │ Discount│ │ TopItems │            │  │
//! │  │   └─────────┘ └─────────┘ └─────────┘ └──────────┘            │  │
//! │  │                                                               │  │
//! │  │   NO I/O • NO DATABASE • NO NETWORK • PURE FUNCTIONS          │  │
//! │  └────────────────────────────┬──────────────────────────────────┘  │
//! │                               │                                     │
//! │  ┌────────────────────────────▼──────────────────────────────────┐  │
//! │  │                    kwpos-db (Ledger)                          │  │
//! │  │     SQLite repositories, migrations, number sequences         │  │
//! │  └───────────────────────────────────────────────────────────────┘  │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (Item, Sale, Refund, AuditLogEntry, ...)
//! - [`money`] - Money type with integer fils arithmetic (no floating point!)
//! - [`cart`] - Cart math: line merging, discount clamping, totals
//! - [`numbering`] - Year-scoped sale/refund number formatting
//! - [`calendar`] - Fixed UTC+3 reporting timezone helpers
//! - [`report`] - Daily report aggregation over completed sales
//! - [`validation`] - Input and payment-method validation
//! - [`error`] - Domain error types
//!
//! ## Design Principles
//!
//! 1. **Pure Functions**: same input = same output, always
//! 2. **No I/O**: database, network, file system access is FORBIDDEN here
//! 3. **Integer Money**: all monetary values are fils (i64, 1/1000 KWD)
//! 4. **Explicit Errors**: all errors are typed, never strings or panics
//!
//! ## Example Usage
//!
//! ```rust
//! use kwpos_core::cart::{compute_totals, Discount};
//! use kwpos_core::money::Money;
//!
//! // 2 CBM of washed sand at KD 15.500 per CBM, 10% discount
//! let lines = [(2, Money::from_fils(15_500))];
//! let totals = compute_totals(lines.iter().copied(), Some(Discount::Percent(1000)));
//!
//! assert_eq!(totals.subtotal, Money::from_fils(31_000)); // KD 31.000
//! assert_eq!(totals.discount, Money::from_fils(3_100));  // KD  3.100
//! assert_eq!(totals.total, Money::from_fils(27_900));    // KD 27.900
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod calendar;
pub mod cart;
pub mod error;
pub mod money;
pub mod numbering;
pub mod report;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================
// These allow users to do `use kwpos_core::Money` instead of
// `use kwpos_core::money::Money`

pub use error::ValidationError;
pub use money::Money;
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Maximum distinct lines allowed in a single cart
///
/// ## Business Reason
/// Prevents runaway carts and ensures reasonable transaction sizes.
/// The yard sells a handful of bulk materials per delivery, not hundreds.
pub const MAX_CART_LINES: usize = 100;

/// Maximum quantity of a single item per line (whole CBM units)
///
/// ## Business Reason
/// Prevents accidental over-ordering (e.g., typing 1000 instead of 10).
pub const MAX_LINE_QUANTITY: i64 = 999;

/// How many items the daily report's "top items" list keeps.
pub const REPORT_TOP_ITEMS: usize = 5;
