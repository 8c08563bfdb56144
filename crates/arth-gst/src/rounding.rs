//! # Round-Off Policy
//!
//! Computes and isolates the grand-total rounding adjustment.
//!
//! ## Rounding Rules
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       Round-Off Policy                                  │
//! │                                                                         │
//! │  gross_total = subtotal + total_gst + total_cess                        │
//! │                                                                         │
//! │  round_off disabled:  adjustment = 0                                    │
//! │                       grand_total = gross_total                         │
//! │                                                                         │
//! │  round_off enabled:   rounded = half-up(gross_total) to whole unit      │
//! │                       (0.5 rounds away from zero)                       │
//! │                       adjustment = rounded - gross_total                │
//! │                       grand_total = rounded                             │
//! │                                                                         │
//! │  The adjustment is ALWAYS surfaced as its own field. It is never        │
//! │  folded into a line item or a tax component; auditors reconcile the     │
//! │  invoice against it.                                                    │
//! │                                                                         │
//! │  Only the grand total is rounded. Per-line tax components keep their    │
//! │  full precision so that rate-wise sums reconcile exactly.               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use rust_decimal::{Decimal, RoundingStrategy};

/// Applies the round-off policy to a gross total.
///
/// Returns `(adjustment, grand_total)`. When rounding is enabled the
/// adjustment satisfies `-0.5 < adjustment <= 0.5`.
pub fn apply_round_off(gross_total: Decimal, round_off_enabled: bool) -> (Decimal, Decimal) {
    if !round_off_enabled {
        return (Decimal::ZERO, gross_total);
    }

    let rounded = gross_total.round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero);
    (rounded - gross_total, rounded)
}

// =============================================================================
// Unit Tests
// =============================================================================
