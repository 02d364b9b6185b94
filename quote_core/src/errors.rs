//! # Error Types
//!
//! Structured error types for quote_core boundary operations.
//!
//! The pricing pipeline itself never returns errors: malformed formulas,
//! dangling catalog ids, and degenerate geometry all coerce to zero so a
//! live preview keeps working while the user edits. `QuoteError` exists for
//! the explicit boundary helpers (catalog JSON loading, input validation)
//! where a caller actually wants a diagnostic.
//!
//! ## Example
//!
//! ```rust
//! use quote_core::errors::{QuoteError, QuoteResult};
//!
//! fn validate_width(width_mm: f64) -> QuoteResult<()> {
//!     if width_mm <= 0.0 {
//!         return Err(QuoteError::invalid_input(
//!             "width_mm",
//!             width_mm.to_string(),
//!             "Width must be positive",
//!         ));
//!     }
//!     Ok(())
//! }
//! ```

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Result type alias for quote_core operations
pub type QuoteResult<T> = Result<T, QuoteError>;

/// Structured error type for boundary operations.
///
/// Each variant provides specific context about what went wrong, enabling
/// programmatic handling by callers (UI, import tooling).
#[derive(Error, Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", content = "details")]
pub enum QuoteError {
    /// An input value is invalid (out of range, wrong type, etc.)
    #[error("Invalid input for '{field}': {value} - {reason}")]
    InvalidInput {
        field: String,
        value: String,
        reason: String,
    },

    /// Catalog record not found by id
    #[error("Catalog record not found: {kind} '{id}'")]
    CatalogMissing { kind: String, id: String },

    /// A cut-length or pane formula could not be parsed
    #[error("Formula error in '{formula}': {reason}")]
    FormulaError { formula: String, reason: String },

    /// JSON serialization/deserialization error
    #[error("Serialization error: {reason}")]
    SerializationError { reason: String },

    /// Generic internal error (should be rare)
    #[error("Internal error: {message}")]
    Internal { message: String },
}

impl QuoteError {
    /// Create an InvalidInput error
    pub fn invalid_input(
        field: impl Into<String>,
        value: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        QuoteError::InvalidInput {
            field: field.into(),
            value: value.into(),
            reason: reason.into(),
        }
    }

    /// Create a CatalogMissing error
    pub fn catalog_missing(kind: impl Into<String>, id: impl Into<String>) -> Self {
        QuoteError::CatalogMissing {
            kind: kind.into(),
            id: id.into(),
        }
    }

    /// Create a FormulaError
    pub fn formula_error(formula: impl Into<String>, reason: impl Into<String>) -> Self {
        QuoteError::FormulaError {
            formula: formula.into(),
            reason: reason.into(),
        }
    }

    /// Get a short error code for programmatic handling
    pub fn error_code(&self) -> &'static str {
        match self {
            QuoteError::InvalidInput { .. } => "INVALID_INPUT",
            QuoteError::CatalogMissing { .. } => "CATALOG_MISSING",
            QuoteError::FormulaError { .. } => "FORMULA_ERROR",
            QuoteError::SerializationError { .. } => "SERIALIZATION_ERROR",
            QuoteError::Internal { .. } => "INTERNAL_ERROR",
        }
    }
}

impl From<serde_json::Error> for QuoteError {
    fn from(err: serde_json::Error) -> Self {
        QuoteError::SerializationError {
            reason: err.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_serialization() {
        let error = QuoteError::invalid_input("width_mm", "-500", "Width must be positive");
        let json = serde_json::to_string(&error).unwrap();
        let roundtrip: QuoteError = serde_json::from_str(&json).unwrap();
        assert_eq!(error, roundtrip);
    }

    #[test]
    fn test_error_codes() {
        assert_eq!(
            QuoteError::catalog_missing("profile", "p-1").error_code(),
            "CATALOG_MISSING"
        );
        assert_eq!(
            QuoteError::formula_error("W+(", "unbalanced parenthesis").error_code(),
            "FORMULA_ERROR"
        );
    }
}
