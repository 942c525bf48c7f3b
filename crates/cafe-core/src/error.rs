//! # Error Types
//!
//! Domain-specific error types for cafe-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  CoreError                                                             │
//! │  ├── InvalidArgument(ValidationError) - caller supplied a bad option   │
//! │  │     ├── NotAllowed       - value outside a fixed enumeration        │
//! │  │     ├── OutOfRange       - numeric value outside its range          │
//! │  │     ├── SizeUnavailable  - size not sold for that drink type        │
//! │  │     └── InvalidType      - JSON value of the wrong kind             │
//! │  ├── MissingPrice    - price table has no entry for a key              │
//! │  ├── InvalidTables   - custom price tables failed validation           │
//! │  └── Json            - order or table JSON is malformed            │
//! │                                                                         │
//! │  Flow: ValidationError → CoreError → caller → end user (verbatim)      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Design Principles
//! 1. Use `thiserror` for derive macros (not manual impl)
//! 2. Every validation message names the field and the accepted values
//! 3. Messages are shown to the end user as-is

use thiserror::Error;

// =============================================================================
// Core Error
// =============================================================================

/// Errors returned by the pricing engine and the price tables.
#[derive(Debug, Error)]
pub enum CoreError {
    /// An order option failed validation.
    ///
    /// The message is the inner [`ValidationError`] unchanged.
    #[error(transparent)]
    InvalidArgument(#[from] ValidationError),

    /// The price tables have no entry for a key.
    ///
    /// ## When This Occurs
    /// Only with tables that skipped
    /// [`PriceTables::validate`](crate::tables::PriceTables::validate).
    /// Standard tables, [`PriceTables::from_json`](crate::tables::PriceTables::from_json)
    /// and serde deserialization all validate, so none of them can produce
    /// incomplete tables. Inside the crate, tables edited after validation
    /// still reach this error instead of panicking.
    #[error("No price for {key} in {table} table")]
    MissingPrice { table: &'static str, key: String },

    /// Custom price tables were rejected.
    #[error("Invalid price tables: {0}")]
    InvalidTables(String),

    /// Order or price table JSON could not be parsed.
    ///
    /// Covers syntax errors, missing keys and unknown keys.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl CoreError {
    /// Returns the validation failure, if this is an invalid argument.
    pub fn as_validation(&self) -> Option<&ValidationError> {
        match self {
            CoreError::InvalidArgument(err) => Some(err),
            _ => None,
        }
    }
}

// =============================================================================
// Validation Error
// =============================================================================

/// The InvalidArgument error kind.
///
/// Raised synchronously before any price is computed. Every variant carries
/// the offending field (wire name, e.g. `drinkType`) and what it accepts.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// Value is not in allowed set.
    #[error("Invalid {field} '{value}'. Please choose from {}.", .allowed.join(", "))]
    NotAllowed {
        field: &'static str,
        value: String,
        allowed: &'static [&'static str],
    },

    /// Numeric value is out of range.
    #[error("Invalid {field} {value}. Please choose between {min} and {max}.")]
    OutOfRange {
        field: &'static str,
        value: i64,
        min: i64,
        max: i64,
    },

    /// The size is not sold for this drink type.
    #[error("{size} size is only available for {} drinks.", .allowed.join(" and "))]
    SizeUnavailable {
        size: &'static str,
        drink_type: &'static str,
        allowed: &'static [&'static str],
    },

    /// A JSON value has the wrong kind (a fraction where a count belongs).
    #[error("Invalid {field} {value}. Expected {expected}.")]
    InvalidType {
        field: &'static str,
        value: String,
        expected: &'static str,
    },
}

impl ValidationError {
    /// Name of the field that failed validation.
    pub fn field(&self) -> &'static str {
        match self {
            ValidationError::NotAllowed { field, .. } => *field,
            ValidationError::OutOfRange { field, .. } => *field,
            ValidationError::SizeUnavailable { .. } => "size",
            ValidationError::InvalidType { field, .. } => *field,
        }
    }
}

// =============================================================================
// Result Type Aliases
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// Unit Tests
// =============================================================================
