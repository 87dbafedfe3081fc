//! # Error Types
//!
//! Domain-specific error types for bookcart-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  bookcart-core errors (this file)                                      │
//! │  ├── CoreError        - Payload decoding failures                      │
//! │  └── ValidationError  - Field-level validation failures                │
//! │                                                                         │
//! │  bookcart-store errors                                                 │
//! │  └── StoreError       - Persistence failures                           │
//! │                                                                         │
//! │  bookcart-offers errors                                                │
//! │  └── OffersError      - Remote offer retrieval failures                │
//! │                                                                         │
//! │  Flow: ValidationError → CoreError → (ignored: add becomes a no-op)    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use thiserror::Error;

// =============================================================================
// Core Error
// =============================================================================

/// Core domain errors.
///
/// None of these ever escape a cart operation: the cart manager treats a
/// payload that fails here as "nothing to add".
#[derive(Debug, Error)]
pub enum CoreError {
    /// The trigger payload is not valid percent-encoding.
    #[error("Payload is not valid percent-encoded UTF-8: {0}")]
    InvalidEncoding(String),

    /// The decoded payload is not the JSON object we expect.
    ///
    /// ## When This Occurs
    /// - Payload is not JSON at all
    /// - Payload is a JSON array, string or number instead of an object
    #[error("Malformed item payload: {reason}")]
    MalformedPayload { reason: String },

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Invalid format (e.g. a number where a string was expected).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_error_messages() {
        let err = ValidationError::Required {
            field: "isbn".to_string(),
        };
        assert_eq!(err.to_string(), "isbn is required");

        let err = ValidationError::InvalidFormat {
            field: "isbn".to_string(),
            reason: "expected a string".to_string(),
        };
        assert_eq!(err.to_string(), "isbn has invalid format: expected a string");
    }

    #[test]
    fn test_validation_converts_to_core_error() {
        let validation_err = ValidationError::Required {
            field: "isbn".to_string(),
        };
        let core_err: CoreError = validation_err.into();
        assert!(matches!(core_err, CoreError::Validation(_)));
    }
}
