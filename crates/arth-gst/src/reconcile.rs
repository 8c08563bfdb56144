//! # Reconciliation Validator
//!
//! Read-only, side-effect-free cross-checks over a finished
//! [`CalculationResult`].
//!
//! ## Calculate-then-Validate
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                  Reconciliation Checks                                  │
//! │                                                                         │
//! │  calculate(...) ──► CalculationResult ──► validate(&result)             │
//! │                                               │                          │
//! │                                               ▼                          │
//! │                                       Vec<ValidationIssue>               │
//! │                                                                         │
//! │  Checks (each reports an issue instead of aborting):                    │
//! │  ├── tax levied?  seller id present and valid                           │
//! │  ├── buyer id, if present, valid                                        │
//! │  ├── subtotal >= 0 and total_gst >= 0                                   │
//! │  └── Σ rate_breakdown.total_gst == totals.total_gst (exact Decimal)     │
//! │                                                                         │
//! │  No issue is EVER silently auto-corrected. The caller decides whether   │
//! │  to block, warn or log - a mismatch means an aggregation or rounding    │
//! │  bug and must stay visible.                                             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::warn;
use ts_rs::TS;

use crate::engine::CalculationResult;
use crate::jurisdiction::IdentifierValidator;

// =============================================================================
// Validation Issue
// =============================================================================

/// One finding from the reconciliation pass.
///
/// Issues are data, not errors: calculation has already succeeded, and the
/// calling UI/service chooses how to surface each finding.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum ValidationIssue {
    /// Tax is levied but no seller registration identifier was supplied.
    MissingSellerIdentifier,

    /// The seller identifier fails external validation.
    InvalidSellerIdentifier,

    /// A buyer identifier was supplied but fails external validation.
    InvalidBuyerIdentifier,

    /// A total that must be non-negative is negative.
    NegativeAmount { field: String },

    /// The rate-wise breakdown does not foot to the transaction total.
    /// Indicates an aggregation or rounding bug; never auto-fixed.
    ReconciliationMismatch {
        #[ts(as = "String")]
        expected: Decimal,
        #[ts(as = "String")]
        actual: Decimal,
    },
}

// =============================================================================
// Validator
// =============================================================================

/// Runs every reconciliation check and returns all findings.
///
/// Read-only over the result; invoked separately from `calculate`, never
/// inline with it.
pub fn validate<V: IdentifierValidator>(
    result: &CalculationResult,
    validator: &V,
) -> Vec<ValidationIssue> {
    let mut issues = Vec::new();

    if result.mode.requires_tax() {
        match &result.seller_id {
            None => issues.push(ValidationIssue::MissingSellerIdentifier),
            Some(id) if !validator.is_valid(id) => {
                issues.push(ValidationIssue::InvalidSellerIdentifier)
            }
            Some(_) => {}
        }
    }

    if let Some(buyer) = &result.buyer_id {
        if !validator.is_valid(buyer) {
            issues.push(ValidationIssue::InvalidBuyerIdentifier);
        }
    }

    if result.totals.subtotal < Decimal::ZERO {
        issues.push(ValidationIssue::NegativeAmount {
            field: "subtotal".to_string(),
        });
    }
    if result.totals.total_gst < Decimal::ZERO {
        issues.push(ValidationIssue::NegativeAmount {
            field: "total_gst".to_string(),
        });
    }

    let footed: Decimal = result.rate_breakdowns.iter().map(|row| row.total_gst).sum();
    if footed != result.totals.total_gst {
        issues.push(ValidationIssue::ReconciliationMismatch {
            expected: result.totals.total_gst,
            actual: footed,
        });
    }

    if !issues.is_empty() {
        warn!(count = issues.len(), "reconciliation found issues");
    }

    issues
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::calculate;
    use crate::jurisdiction::StateCodeValidator;
    use crate::rates::CatalogSnapshot;
    use crate::types::{EngineConfig, LineItem, RateCategory, TaxIdentifier, TaxMode};
    use rust_decimal_macros::dec;

    fn items() -> Vec<LineItem> {
        vec![LineItem {
            product_ref: "SKU-1".to_string(),
            description: "Notebook".to_string(),
            quantity: 2,
            unit_price: dec!(1000),
        }]
    }

    fn config() -> EngineConfig {
        EngineConfig {
            default_rate: dec!(18),
            default_category: RateCategory::R18,
            ..EngineConfig::default()
        }
    }

    fn result_with(
        seller: Option<&TaxIdentifier>,
        buyer: Option<&TaxIdentifier>,
        config: &EngineConfig,
    ) -> CalculationResult {
        calculate(
            &items(),
            &CatalogSnapshot::default(),
            config,
            seller,
            buyer,
            &StateCodeValidator,
        )
        .unwrap()
    }

    #[test]
    fn test_clean_result_has_no_issues() {
        let seller = TaxIdentifier::new("27AAPFU0939F1ZV");
        let result = result_with(Some(&seller), None, &config());
        assert!(validate(&result, &StateCodeValidator).is_empty());
    }

    #[test]
    fn test_missing_seller_reported_when_tax_required() {
        let result = result_with(None, None, &config());
        let issues = validate(&result, &StateCodeValidator);
        assert!(issues.contains(&ValidationIssue::MissingSellerIdentifier));
    }

    #[test]
    fn test_missing_seller_not_reported_in_no_tax_mode() {
        let no_tax = EngineConfig {
            mode: TaxMode::NoTax,
            ..config()
        };
        let result = result_with(None, None, &no_tax);
        assert!(validate(&result, &StateCodeValidator).is_empty());
    }

    #[test]
    fn test_invalid_seller_reported() {
        let seller = TaxIdentifier::new("BOGUS");
        let result = result_with(Some(&seller), None, &config());
        let issues = validate(&result, &StateCodeValidator);
        assert!(issues.contains(&ValidationIssue::InvalidSellerIdentifier));
    }

    #[test]
    fn test_invalid_buyer_reported_when_present() {
        let seller = TaxIdentifier::new("27AAPFU0939F1ZV");
        let buyer = TaxIdentifier::new("NOT-A-GSTIN");
        let result = result_with(Some(&seller), Some(&buyer), &config());
        let issues = validate(&result, &StateCodeValidator);
        assert_eq!(issues, vec![ValidationIssue::InvalidBuyerIdentifier]);
    }

    #[test]
    fn test_tampered_total_reported_as_mismatch() {
        let seller = TaxIdentifier::new("27AAPFU0939F1ZV");
        let mut result = result_with(Some(&seller), None, &config());
        // Simulate an aggregation bug downstream of calculation.
        result.totals.total_gst += dec!(0.01);

        let issues = validate(&result, &StateCodeValidator);
        assert!(matches!(
            issues.as_slice(),
            [ValidationIssue::ReconciliationMismatch { .. }]
        ));
    }

    #[test]
    fn test_tampered_negative_amounts_reported() {
        let seller = TaxIdentifier::new("27AAPFU0939F1ZV");
        let mut result = result_with(Some(&seller), None, &config());
        result.totals.subtotal = dec!(-1);

        let issues = validate(&result, &StateCodeValidator);
        assert!(issues.contains(&ValidationIssue::NegativeAmount {
            field: "subtotal".to_string()
        }));
    }

    #[test]
    fn test_validate_is_read_only() {
        let seller = TaxIdentifier::new("27AAPFU0939F1ZV");
        let result = result_with(Some(&seller), None, &config());
        let before = result.clone();
        let _ = validate(&result, &StateCodeValidator);
        assert_eq!(result, before);
    }

    #[test]
    fn test_issue_serialization() {
        let issue = ValidationIssue::ReconciliationMismatch {
            expected: dec!(360),
            actual: dec!(359.99),
        };
        let json = serde_json::to_string(&issue).unwrap();
        let parsed: ValidationIssue = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, issue);
    }
}
