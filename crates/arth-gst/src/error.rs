//! # Error Types
//!
//! Domain-specific error types for arth-gst.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  arth-gst errors (this file)                                           │
//! │  ├── EngineError      - Structurally invalid configuration             │
//! │  └── ValidationError  - Input validation failures                      │
//! │                                                                         │
//! │  Business-data anomalies are NOT errors here. They come back as        │
//! │  `ValidationIssue` values from `reconcile::validate` so the calling    │
//! │  UI/service decides whether to block, warn or log.                     │
//! │                                                                         │
//! │  Flow: ValidationError → EngineError → caller                          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Design Principles
//! 1. Use `thiserror` for derive macros (not manual impl)
//! 2. Include context in error messages (product ref, offending value)
//! 3. Errors are enum variants, never String
//! 4. `calculate` only fails for corrupt configuration, never for data

use rust_decimal::Decimal;
use thiserror::Error;

// =============================================================================
// Engine Error
// =============================================================================

/// Hard failures of the calculation engine.
///
/// `calculate` always produces a result for business data, even degenerate
/// data (zero items, zero prices). The only hard failures are structurally
/// invalid configuration, which indicate corruption rather than a business
/// anomaly and therefore fail fast.
#[derive(Debug, Error)]
pub enum EngineError {
    /// A rate percentage is outside the legal `[0, 100]` band.
    ///
    /// ## When This Occurs
    /// - A corrupt `default_rate` in the engine configuration
    /// - A corrupt `rate_override` in a catalog snapshot
    /// - A transaction-level override built from bad input
    #[error("Invalid rate percentage {percentage}: must be between 0 and 100")]
    InvalidRate { percentage: Decimal },

    /// A catalog entry uses `RateCategory::Custom` without supplying the
    /// custom percentage it stands for.
    #[error("Catalog entry for {product_ref} is 'custom' but carries no rate override")]
    MissingCustomRate { product_ref: String },

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// These errors occur when caller input doesn't meet the documented
/// preconditions. Used for early validation before the engine runs; the
/// calculation hot path does not re-check them.
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

    /// Monetary value must not be negative.
    #[error("{field} must not be negative")]
    MustBeNonNegative { field: String },

    /// Invalid format (e.g., malformed commodity code).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with EngineError.
pub type EngineResult<T> = Result<T, EngineError>;

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_error_messages() {
        let err = EngineError::InvalidRate {
            percentage: dec!(118),
        };
        assert_eq!(
            err.to_string(),
            "Invalid rate percentage 118: must be between 0 and 100"
        );

        let err = EngineError::MissingCustomRate {
            product_ref: "SKU-42".to_string(),
        };
        assert!(err.to_string().contains("SKU-42"));
    }

    #[test]
    fn test_validation_error_messages() {
        let err = ValidationError::Required {
            field: "product_ref".to_string(),
        };
        assert_eq!(err.to_string(), "product_ref is required");

        let err = ValidationError::MustBeNonNegative {
            field: "unit_price".to_string(),
        };
        assert_eq!(err.to_string(), "unit_price must not be negative");
    }

    #[test]
    fn test_validation_converts_to_engine_error() {
        let validation_err = ValidationError::MustBePositive {
            field: "quantity".to_string(),
        };
        let engine_err: EngineError = validation_err.into();
        assert!(matches!(engine_err, EngineError::Validation(_)));
    }
}
