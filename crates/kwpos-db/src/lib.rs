//! # kwpos-db: Database Layer for KWPOS
//!
//! This crate provides database access for the KWPOS system.
//! It uses SQLite for local storage with sqlx for async operations.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        KWPOS Data Flow                                  │
//! │                                                                         │
//! │  HTTP Handler (POST /api/sales)                                        │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                     kwpos-db (THIS CRATE)                       │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────────┐    ┌───────────────┐    ┌──────────────┐  │   │
//! │  │   │   Database    │    │  Repositories │    │  Migrations  │  │   │
//! │  │   │   (pool.rs)   │    │  item, sale,  │    │  (embedded)  │  │   │
//! │  │   │               │    │  refund,      │    │              │  │   │
//! │  │   │ SqlitePool    │◄───│  audit,       │    │ 001_init.sql │  │   │
//! │  │   │ Connection    │    │  report,      │    │ ...          │  │   │
//! │  │   │ Management    │    │  sequence     │    │              │  │   │
//! │  │   └───────────────┘    └───────────────┘    └──────────────┘  │   │
//! │  │                                                                 │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  SQLite Database (kwpos.db, WAL mode)                                  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Organization
//!
//! - [`pool`] - Connection pool creation and configuration
//! - [`migrations`] - Embedded database migrations
//! - [`error`] - Database error types
//! - [`repository`] - Repository implementations (item, sale, refund, ...)
//!
//! ## Usage
//!
//! ```rust,ignore
//! use kwpos_db::{Database, DbConfig};
//!
//! let db = Database::new(DbConfig::new("path/to/kwpos.db")).await?;
//! let sale = db.sales().create_sale(request, &cashier).await?;
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod migrations;
pub mod pool;
pub mod repository;

// =============================================================================
// Re-exports
// =============================================================================

pub use error::{DbError, DbResult};
pub use pool::{Database, DbConfig};

// Repository re-exports for convenience
pub use repository::audit::AuditRepository;
pub use repository::item::ItemRepository;
pub use repository::refund::RefundRepository;
pub use repository::report::ReportRepository;
pub use repository::sale::{CreateSaleRequest, SaleLineInput, SaleRepository, SaleWithLines};
