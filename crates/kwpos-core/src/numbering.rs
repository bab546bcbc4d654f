//! # Business Number Formatting
//!
//! Sale and refund numbers are year-scoped sequential identifiers distinct
//! from internal UUIDs:
//!
//! ```text
//! SALE-2026-000001     REFUND-2026-000001
//! ^    ^    ^
//! kind year 6-digit sequence, resets per calendar year (UTC+3)
//! ```
//!
//! This module only *formats* numbers; allocating the next sequence value is
//! the ledger's job, because uniqueness under concurrency needs the database
//! transaction (a read-increment-write here would race).

/// Which counter a number belongs to. Each kind has an independent per-year
/// sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NumberKind {
    Sale,
    Refund,
}

impl NumberKind {
    /// Prefix used in the formatted number.
    pub const fn prefix(&self) -> &'static str {
        match self {
            NumberKind::Sale => "SALE",
            NumberKind::Refund => "REFUND",
        }
    }

    /// Scope key for the sequence table.
    pub const fn scope(&self) -> &'static str {
        match self {
            NumberKind::Sale => "sale",
            NumberKind::Refund => "refund",
        }
    }
}

/// Formats a business number, e.g. `format_number(NumberKind::Sale, 2026, 7)`
/// = `SALE-2026-000007`.
pub fn format_number(kind: NumberKind, year: i32, seq: i64) -> String {
    format!("{}-{}-{:06}", kind.prefix(), year, seq)
}

// =============================================================================
// Unit Tests
// =============================================================================
