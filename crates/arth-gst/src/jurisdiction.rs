//! # Jurisdiction Resolution
//!
//! Decides whether a transaction is intrastate (CGST + SGST) or interstate
//! (IGST) from the seller and buyer registration identifiers.
//!
//! ## Resolution Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                   Jurisdiction Resolution                               │
//! │                                                                         │
//! │  seller_id?  buyer_id?                                                  │
//! │      │           │                                                      │
//! │      ▼           ▼                                                      │
//! │  ┌───────────────────────┐    both present                              │
//! │  │ same_jurisdiction(s,b)│ ─────────────► equal? Intrastate             │
//! │  └───────────────────────┘                 else   Interstate            │
//! │      │                                                                  │
//! │      │ either missing                                                   │
//! │      ▼                                                                  │
//! │  MissingIdentifierPolicy (default: AssumeIntrastate)                    │
//! │                                                                         │
//! │  NOTE: The missing-data fallback is deliberate but risk-bearing. It is  │
//! │        a configurable policy, never a silent hard-coded branch, so a    │
//! │        caller that prefers to flag ambiguity can choose differently.    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The identifier format itself (checksum, structure) is an external
//! concern: the engine only needs [`IdentifierValidator`].

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::types::TaxIdentifier;

// =============================================================================
// Jurisdiction
// =============================================================================

/// Intrastate vs. interstate classification for one transaction.
///
/// Resolved ONCE per calculation, never per item; a single result never
/// mixes CGST/SGST lines with IGST lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum Jurisdiction {
    /// Seller and buyer in the same state: tax splits into CGST + SGST.
    Intrastate,
    /// Different states: the whole tax goes to IGST.
    Interstate,
}

// =============================================================================
// Missing Identifier Policy
// =============================================================================

/// What to assume when seller or buyer identifier is absent.
///
/// The observed legal default is `AssumeIntrastate` (a walk-in customer with
/// no registration is billed locally). It is surfaced as configuration
/// because it silently picks CGST/SGST for a transaction whose buyer
/// jurisdiction is actually unknown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum MissingIdentifierPolicy {
    /// Treat the transaction as local (CGST + SGST).
    AssumeIntrastate,
    /// Treat the transaction as crossing state lines (IGST).
    AssumeInterstate,
}

impl Default for MissingIdentifierPolicy {
    fn default() -> Self {
        MissingIdentifierPolicy::AssumeIntrastate
    }
}

impl MissingIdentifierPolicy {
    /// The jurisdiction this policy falls back to.
    #[inline]
    pub fn fallback(&self) -> Jurisdiction {
        match self {
            MissingIdentifierPolicy::AssumeIntrastate => Jurisdiction::Intrastate,
            MissingIdentifierPolicy::AssumeInterstate => Jurisdiction::Interstate,
        }
    }
}

// =============================================================================
// Identifier Validator (external collaborator seam)
// =============================================================================

/// External tax-identifier validator.
///
/// Checksum rules and jurisdiction extraction live behind this trait; the
/// engine only consumes `is_valid` and `same_jurisdiction`.
pub trait IdentifierValidator {
    /// Whether the identifier is structurally valid.
    fn is_valid(&self, id: &TaxIdentifier) -> bool;

    /// The jurisdiction (state) code carried by the identifier, if it can
    /// be extracted.
    fn jurisdiction_code(&self, id: &TaxIdentifier) -> Option<String>;

    /// Whether two identifiers belong to the same jurisdiction.
    ///
    /// When either code cannot be extracted the comparison is
    /// indeterminate and treated as same-jurisdiction, consistent with the
    /// engine-wide missing-data default.
    fn same_jurisdiction(&self, a: &TaxIdentifier, b: &TaxIdentifier) -> bool {
        match (self.jurisdiction_code(a), self.jurisdiction_code(b)) {
            (Some(code_a), Some(code_b)) => code_a == code_b,
            _ => true,
        }
    }
}

/// Minimal structural validator for GSTIN-shaped identifiers.
///
/// A GSTIN is 15 uppercase alphanumeric characters whose first two digits
/// are the state code. This implementation checks shape only; the real
/// checksum validator is an external collaborator and can replace this via
/// the [`IdentifierValidator`] seam.
#[derive(Debug, Clone, Copy, Default)]
pub struct StateCodeValidator;

impl IdentifierValidator for StateCodeValidator {
    fn is_valid(&self, id: &TaxIdentifier) -> bool {
        let raw = id.as_str();
        raw.len() == 15
            && raw.chars().all(|c| c.is_ascii_alphanumeric())
            && raw[..2].chars().all(|c| c.is_ascii_digit())
            && &raw[..2] != "00"
    }

    fn jurisdiction_code(&self, id: &TaxIdentifier) -> Option<String> {
        // get(..2) rather than slicing: identifiers are caller input and may
        // not be ASCII at all.
        let code = id.as_str().get(..2)?;
        if code.chars().all(|c| c.is_ascii_digit()) {
            Some(code.to_string())
        } else {
            None
        }
    }
}

// =============================================================================
// Resolver
// =============================================================================

/// Resolves the transaction jurisdiction from the two identifiers.
///
/// Both identifiers present: `Interstate` iff they carry different state
/// codes. Either missing: the configured fallback policy decides.
pub fn resolve<V: IdentifierValidator>(
    seller_id: Option<&TaxIdentifier>,
    buyer_id: Option<&TaxIdentifier>,
    policy: MissingIdentifierPolicy,
    validator: &V,
) -> Jurisdiction {
    match (seller_id, buyer_id) {
        (Some(seller), Some(buyer)) => {
            if validator.same_jurisdiction(seller, buyer) {
                Jurisdiction::Intrastate
            } else {
                Jurisdiction::Interstate
            }
        }
        _ => policy.fallback(),
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn id(raw: &str) -> TaxIdentifier {
        TaxIdentifier::new(raw)
    }

    #[test]
    fn test_state_code_validator_shape() {
        let v = StateCodeValidator;
        assert!(v.is_valid(&id("27AAPFU0939F1ZV")));
        assert!(!v.is_valid(&id("27AAPFU0939F1Z"))); // 14 chars
        assert!(!v.is_valid(&id("XXAAPFU0939F1ZV"))); // no state digits
        assert!(!v.is_valid(&id("00AAPFU0939F1ZV"))); // state 00 reserved
        assert!(!v.is_valid(&id("27AAPFU0939F1Z!"))); // non-alphanumeric
    }

    #[test]
    fn test_jurisdiction_code_extraction() {
        let v = StateCodeValidator;
        assert_eq!(v.jurisdiction_code(&id("27AAPFU0939F1ZV")).as_deref(), Some("27"));
        assert_eq!(v.jurisdiction_code(&id("XX")), None);
    }

    #[test]
    fn test_same_state_is_intrastate() {
        let v = StateCodeValidator;
        let seller = id("27AAPFU0939F1ZV");
        let buyer = id("27BBPFU0939F1ZX");
        let j = resolve(Some(&seller), Some(&buyer), MissingIdentifierPolicy::default(), &v);
        assert_eq!(j, Jurisdiction::Intrastate);
    }

    #[test]
    fn test_different_state_is_interstate() {
        let v = StateCodeValidator;
        let seller = id("27AAPFU0939F1ZV");
        let buyer = id("29BBPFU0939F1ZX");
        let j = resolve(Some(&seller), Some(&buyer), MissingIdentifierPolicy::default(), &v);
        assert_eq!(j, Jurisdiction::Interstate);
    }

    #[test]
    fn test_missing_buyer_uses_fallback_policy() {
        let v = StateCodeValidator;
        let seller = id("27AAPFU0939F1ZV");

        let j = resolve(Some(&seller), None, MissingIdentifierPolicy::AssumeIntrastate, &v);
        assert_eq!(j, Jurisdiction::Intrastate);

        let j = resolve(Some(&seller), None, MissingIdentifierPolicy::AssumeInterstate, &v);
        assert_eq!(j, Jurisdiction::Interstate);
    }

    #[test]
    fn test_both_missing_uses_fallback_policy() {
        let v = StateCodeValidator;
        let j = resolve(None, None, MissingIdentifierPolicy::default(), &v);
        assert_eq!(j, Jurisdiction::Intrastate);
    }

    #[test]
    fn test_indeterminate_codes_compare_as_same() {
        let v = StateCodeValidator;
        // Buyer identifier present but its state code is unreadable.
        let seller = id("27AAPFU0939F1ZV");
        let buyer = id("UNREADABLE");
        let j = resolve(Some(&seller), Some(&buyer), MissingIdentifierPolicy::default(), &v);
        assert_eq!(j, Jurisdiction::Intrastate);
    }
}
