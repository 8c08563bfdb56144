//! # Calculation Engine
//!
//! The `calculate` entry point wiring all components together.
//!
//! ## Control Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    calculate(...)                                       │
//! │                                                                         │
//! │  jurisdiction::resolve(seller, buyer) ──► resolved ONCE per call        │
//! │       │                                                                 │
//! │       ▼  per item                                                       │
//! │  rates::resolve(item) ──► calculator::calculate_line(item, rate)        │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  aggregate::aggregate(items) ──► breakdowns, summaries, totals          │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  rounding::apply_round_off(subtotal + gst + cess)                       │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  CalculationResult (immutable; built once, never mutated)               │
//! │                                                                         │
//! │  reconcile::validate(&result) is a SEPARATE entry point - calculation   │
//! │  always produces a result, validation reports issues afterwards.        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! `calculate` is a pure function of its inputs: no I/O, no clocks, no
//! hidden state. Identical inputs produce a bit-identical result, which is
//! what makes results safe to cache, compare and audit. Any "latest result"
//! convenience slot belongs to the caller, with plain last-write-wins
//! semantics.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::debug;
use ts_rs::TS;

use crate::aggregate::{self, CommodityCodeSummary, RateBreakdown, TaxTotals};
use crate::calculator;
use crate::error::EngineResult;
use crate::jurisdiction::{self, IdentifierValidator, Jurisdiction};
use crate::rates::{self, CatalogSnapshot};
use crate::rounding;
use crate::types::{CalculatedLineItem, DisplayPolicy, EngineConfig, LineItem, TaxIdentifier, TaxMode};

// =============================================================================
// Calculation Result
// =============================================================================

/// The complete, immutable output of one calculation.
///
/// Constructed once per `calculate` call and never mutated; any change to
/// the inputs produces a fresh result. Fully serializable plain data.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct CalculationResult {
    /// Intrastate (CGST/SGST) or interstate (IGST), resolved once per call.
    pub jurisdiction: Jurisdiction,

    /// The tax mode the result was computed under.
    pub mode: TaxMode,

    /// How presentation layers should render this result. Derived purely
    /// from `mode`.
    pub display_policy: DisplayPolicy,

    /// Seller registration identifier the calculation ran with, if any.
    pub seller_id: Option<TaxIdentifier>,

    /// Buyer registration identifier the calculation ran with, if any.
    pub buyer_id: Option<TaxIdentifier>,

    /// Every input line with its resolved rate and tax split.
    pub line_items: Vec<CalculatedLineItem>,

    /// Per-rate aggregation, ascending by rate percentage.
    pub rate_breakdowns: Vec<RateBreakdown>,

    /// Per-commodity-code aggregation, ascending by code.
    pub commodity_summaries: Vec<CommodityCodeSummary>,

    /// Column-wise sums over all line items.
    pub totals: TaxTotals,

    /// Grand-total rounding adjustment, isolated in its own field.
    #[ts(as = "String")]
    pub round_off_amount: Decimal,

    /// `subtotal + total_gst + total_cess + round_off_amount`.
    #[ts(as = "String")]
    pub grand_total: Decimal,
}

// =============================================================================
// Entry Point
// =============================================================================

/// Calculates the full tax breakdown for a set of line items.
///
/// Never fails for business-data reasons; zero items or zero prices still
/// produce a (degenerate) result. The only hard failures are structurally
/// invalid configuration: a rate outside `[0, 100]`, or a `Custom` catalog
/// entry without its override.
///
/// ## Preconditions
/// `quantity >= 1` and `unit_price >= 0` for every item, enforced at the
/// caller boundary via [`validation::validate_line_items`]. They are not
/// re-validated on this path.
///
/// [`validation::validate_line_items`]: crate::validation::validate_line_items
pub fn calculate<V: IdentifierValidator>(
    line_items: &[LineItem],
    catalog: &CatalogSnapshot,
    config: &EngineConfig,
    seller_id: Option<&TaxIdentifier>,
    buyer_id: Option<&TaxIdentifier>,
    validator: &V,
) -> EngineResult<CalculationResult> {
    let jurisdiction = jurisdiction::resolve(
        seller_id,
        buyer_id,
        config.missing_identifier_policy,
        validator,
    );

    debug!(
        items = line_items.len(),
        ?jurisdiction,
        mode = ?config.mode,
        "calculating gst breakdown"
    );

    let mut calculated = Vec::with_capacity(line_items.len());
    for item in line_items {
        let rate = rates::resolve(item, catalog, config)?;
        calculated.push(calculator::calculate_line(item, rate, jurisdiction, config));
    }

    let (rate_breakdowns, commodity_summaries, totals) = aggregate::aggregate(&calculated);

    let gross_total = totals.subtotal + totals.total_gst + totals.total_cess;
    let (round_off_amount, grand_total) = rounding::apply_round_off(gross_total, config.round_off);

    debug!(%grand_total, %round_off_amount, "gst breakdown calculated");

    Ok(CalculationResult {
        jurisdiction,
        mode: config.mode,
        display_policy: config.mode.display_policy(),
        seller_id: seller_id.cloned(),
        buyer_id: buyer_id.cloned(),
        line_items: calculated,
        rate_breakdowns,
        commodity_summaries,
        totals,
        round_off_amount,
        grand_total,
    })
}

// =============================================================================
// Unit Tests
// =============================================================================
