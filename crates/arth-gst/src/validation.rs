//! # Validation Module
//!
//! Input validation utilities for the GST engine.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Caller boundary (THIS MODULE)                                │
//! │  ├── Preconditions: quantity >= 1, unit_price >= 0                     │
//! │  └── Run BEFORE `calculate`; the hot path does not re-check them       │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: Construction (types.rs)                                      │
//! │  └── RateInfo::new fails fast on rates outside [0, 100]                │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: Reconciliation (reconcile.rs)                                │
//! │  └── Post-hoc cross-checks producing ValidationIssue values            │
//! │                                                                         │
//! │  Defense in depth: each layer catches a different class of error       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use arth_gst::validation::{validate_quantity, validate_unit_price};
//! use rust_decimal_macros::dec;
//!
//! validate_quantity(5).unwrap();
//! validate_unit_price(dec!(149.99)).unwrap();
//! ```

use rust_decimal::Decimal;

use crate::error::ValidationError;
use crate::types::LineItem;
use crate::MAX_LINE_ITEMS;

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// String Validators
// =============================================================================

/// Validates a product reference (SKU, barcode, or similar).
///
/// ## Rules
/// - Must not be empty
/// - Must be at most 64 characters
/// - Should contain only alphanumeric characters, hyphens, underscores
pub fn validate_product_ref(product_ref: &str) -> ValidationResult<()> {
    let product_ref = product_ref.trim();

    if product_ref.is_empty() {
        return Err(ValidationError::Required {
            field: "product_ref".to_string(),
        });
    }

    if product_ref.len() > 64 {
        return Err(ValidationError::TooLong {
            field: "product_ref".to_string(),
            max: 64,
        });
    }

    if !product_ref
        .chars()
        .all(|c| c.is_alphanumeric() || c == '-' || c == '_')
    {
        return Err(ValidationError::InvalidFormat {
            field: "product_ref".to_string(),
            reason: "must contain only letters, numbers, hyphens, and underscores".to_string(),
        });
    }

    Ok(())
}

/// Validates an HSN/commodity classification code.
///
/// ## Rules
/// - HSN codes are numeric, 4, 6 or 8 digits
pub fn validate_commodity_code(code: &str) -> ValidationResult<()> {
    let code = code.trim();

    if code.is_empty() {
        return Err(ValidationError::Required {
            field: "commodity_code".to_string(),
        });
    }

    if !code.chars().all(|c| c.is_ascii_digit()) || !matches!(code.len(), 4 | 6 | 8) {
        return Err(ValidationError::InvalidFormat {
            field: "commodity_code".to_string(),
            reason: "must be a 4, 6 or 8 digit HSN code".to_string(),
        });
    }

    Ok(())
}

// =============================================================================
// Numeric Validators
// =============================================================================

/// Validates a line-item quantity.
///
/// ## Rules
/// - Must be at least 1 (zero-quantity lines are rejected upstream so the
///   calculation hot path stays branch-minimal)
pub fn validate_quantity(qty: u32) -> ValidationResult<()> {
    if qty == 0 {
        return Err(ValidationError::MustBePositive {
            field: "quantity".to_string(),
        });
    }

    Ok(())
}

/// Validates a unit price.
///
/// ## Rules
/// - Must be non-negative (zero is allowed: free items)
pub fn validate_unit_price(price: Decimal) -> ValidationResult<()> {
    if price < Decimal::ZERO {
        return Err(ValidationError::MustBeNonNegative {
            field: "unit_price".to_string(),
        });
    }

    Ok(())
}

// =============================================================================
// Collection Validators
// =============================================================================

/// Validates a full line-item list before calculation.
///
/// This is the caller-boundary check `calculate` documents as its
/// precondition: every item individually valid and a sane item count.
pub fn validate_line_items(items: &[LineItem]) -> ValidationResult<()> {
    if items.len() > MAX_LINE_ITEMS {
        return Err(ValidationError::OutOfRange {
            field: "line_items".to_string(),
            min: 0,
            max: MAX_LINE_ITEMS as i64,
        });
    }

    for item in items {
        validate_product_ref(&item.product_ref)?;
        validate_quantity(item.quantity)?;
        validate_unit_price(item.unit_price)?;
    }

    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================
