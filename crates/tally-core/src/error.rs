//! # Error Types
//!
//! Domain-specific error types for tally-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  tally-core errors (this file)                                         │
//! │  ├── CoreError        - Pricing and catalog failures                   │
//! │  └── ValidationError  - Identifier / price / quantity checks           │
//! │                                                                         │
//! │  tally-catalog errors (separate crate)                                 │
//! │  └── CatalogError     - File, parse and env failures                   │
//! │                                                                         │
//! │  Flow: ValidationError → CoreError → CatalogError → caller             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Every error here is a programmer or configuration error. Nothing is
//! transient, so nothing is retried.

use thiserror::Error;

// =============================================================================
// Core Error
// =============================================================================

/// Pricing and catalog errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CoreError {
    /// A scanned item has no catalog entry.
    ///
    /// ## When This Occurs
    /// `scan` accepts any identifier; the lookup happens in `total()`.
    /// ```text
    /// scan("xyz")  ──► cart { xyz: 1 }
    ///      │
    ///      ▼
    /// total() ──► catalog.get("xyz") = None
    ///      │
    ///      ▼
    /// UnknownItem("xyz")
    /// ```
    #[error("Unknown item: {0}")]
    UnknownItem(String),

    /// A pricing rule was built with parameters that make its arithmetic
    /// undefined (e.g. buy 0 get 0 free).
    #[error("Invalid {rule} rule: {reason}")]
    InvalidRuleConfiguration { rule: String, reason: String },

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

impl CoreError {
    pub(crate) fn invalid_rule(rule: &str, reason: impl Into<String>) -> Self {
        CoreError::InvalidRuleConfiguration {
            rule: rule.to_string(),
            reason: reason.into(),
        }
    }
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
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

    /// Invalid format.
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },

    /// Duplicate value (e.g. the same item id inserted twice).
    #[error("{field} '{value}' already exists")]
    Duplicate { field: String, value: String },
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;
