//! # Repository Module
//!
//! Database repository implementations for KWPOS.
//!
//! ## Repository Pattern
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Repository Pattern Explained                         │
//! │                                                                         │
//! │  The Repository pattern abstracts database access behind a clean API.  │
//! │                                                                         │
//! │  HTTP Handler                                                          │
//! │       │                                                                 │
//! │       │  db.sales().create_sale(request, &cashier)                     │
//! │       │  ↓                                                              │
//! │       ▼                                                                 │
//! │  SaleRepository                                                        │
//! │  ├── create_sale(&self, request, cashier)                              │
//! │  ├── get_by_number(&self, number)                                      │
//! │  ├── list(&self, date)                                                 │
//! │  └── cancel_sale(&self, id, reason, cashier)                           │
//! │       │                                                                 │
//! │       │  SQL Query                                                      │
//! │       ▼                                                                 │
//! │  SQLite Database                                                       │
//! │                                                                         │
//! │  Benefits:                                                              │
//! │  • Clean separation of concerns                                        │
//! │  • SQL is isolated in one place                                        │
//! │  • Transactions stay inside repository methods                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Available Repositories
//!
//! - [`item::ItemRepository`] - Catalog CRUD (soft delete)
//! - [`sale::SaleRepository`] - Sale ledger: create, lookup, cancel
//! - [`refund::RefundRepository`] - Full refunds with status flip
//! - [`audit::AuditRepository`] - Append-only audit trail
//! - [`report::ReportRepository`] - Daily aggregates and export rows
//! - [`sequence`] - Year-scoped number allocation (used inside transactions)

pub mod audit;
pub mod item;
pub mod refund;
pub mod report;
pub mod sale;
pub mod sequence;
