//! # kwpos-server: REST API for KWPOS
//!
//! Exposes the KWPOS operations over HTTP for the web front end.
//!
//! ## Request Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                          Request Flow                                   │
//! │                                                                         │
//! │  HTTP Request                                                          │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  TraceLayer / CorsLayer                                                │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  Actor extractor ── x-actor-* headers → Cashier (401 if missing       │
//! │       │             on mutating routes)                                │
//! │       ▼                                                                 │
//! │  Handler (routes/*) ── DTO parse, Money wire strings → fils            │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  Repository (kwpos-db) ── validation, totals recompute, transaction    │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  DTO response / ApiError { code, message }                             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

pub mod actor;
pub mod config;
pub mod dto;
pub mod error;
pub mod routes;

use kwpos_db::Database;

pub use config::ServerConfig;
pub use routes::build_router;

/// Shared state handed to every handler. Clones share the underlying pool.
#[derive(Clone)]
pub struct AppState {
    pub db: Database,
}
