//! # Error Types
//!
//! Domain-specific error types for kwpos-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                 │
//! │                                                                     │
//! │  kwpos-core errors (this file)                                      │
//! │  └── ValidationError  - Malformed or out-of-range input             │
//! │                                                                     │
//! │  kwpos-db errors (separate crate)                                   │
//! │  └── DbError          - NotFound / InvalidState / integrity /       │
//! │                         storage failures (wraps ValidationError)    │
//! │                                                                     │
//! │  API errors (apps/server)                                           │
//! │  └── ApiError         - What the frontend sees (code + message)     │
//! │                                                                     │
//! │  Flow: ValidationError → DbError → ApiError → Frontend              │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Design Principles
//! 1. Use `thiserror` for derive macros (not manual impl)
//! 2. Include context in error messages (field, limits, value)
//! 3. Errors are enum variants, never String
//! 4. Each error variant maps to a user-facing message

use thiserror::Error;

/// Input validation errors.
///
/// These errors occur when caller input doesn't meet requirements. They are
/// raised before any state is touched, so a validation failure never leaves
/// a partial write behind.
#[derive(Debug, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// Numeric value is out of range.
    #[error("{field} must be between {min} and {max}")]
    OutOfRange { field: String, min: i64, max: i64 },

    /// Value must be positive.
    #[error("{field} must be positive")]
    MustBePositive { field: String },

    /// Invalid format (e.g., invalid UUID, malformed decimal, bad date).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },

    /// Value is not in the allowed set (e.g. an unsupported payment method).
    #[error("{field} must be one of: {allowed:?}")]
    NotAllowed { field: String, allowed: Vec<String> },
}

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// Unit Tests
// =============================================================================
