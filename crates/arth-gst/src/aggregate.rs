//! # Aggregation
//!
//! Folds calculated line items into rate-wise and commodity-code-wise
//! summaries plus column-wise totals.
//!
//! ## Aggregation Shape
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Aggregation                                      │
//! │                                                                         │
//! │  [CalculatedLineItem]                                                   │
//! │      │                                                                  │
//! │      ├──► group by rate.percentage ───► Vec<RateBreakdown>              │
//! │      │    (ascending rate; percentage is the unique group key)          │
//! │      │                                                                  │
//! │      ├──► group by commodity_code ───► Vec<CommodityCodeSummary>        │
//! │      │    (items without a code are excluded; ascending code)           │
//! │      │                                                                  │
//! │      └──► column-wise sums ──────────► TaxTotals                        │
//! │                                                                         │
//! │  Transaction-level invariant: jurisdiction is resolved once per call,   │
//! │  so either the CGST/SGST columns or the IGST column is all zero across  │
//! │  the whole result - never a mix.                                        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::collections::BTreeMap;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::types::CalculatedLineItem;

// =============================================================================
// Rate Breakdown
// =============================================================================

/// Per-rate aggregation row (the classic invoice tax table).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct RateBreakdown {
    /// The rate percentage all items in this row share.
    #[ts(as = "String")]
    pub rate_percentage: Decimal,

    #[ts(as = "String")]
    pub taxable_amount: Decimal,
    #[ts(as = "String")]
    pub cgst: Decimal,
    #[ts(as = "String")]
    pub sgst: Decimal,
    #[ts(as = "String")]
    pub igst: Decimal,
    #[ts(as = "String")]
    pub cess: Decimal,

    /// `cgst + sgst + igst` for this row. Reconciliation cross-checks that
    /// these sum to the transaction's `total_gst`.
    #[ts(as = "String")]
    pub total_gst: Decimal,
}

// =============================================================================
// Commodity Code Summary
// =============================================================================

/// Per-HSN-code aggregation row for summary reporting.
///
/// Items without a commodity code do not appear in any row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct CommodityCodeSummary {
    /// The HSN/commodity code all items in this row share.
    pub commodity_code: String,

    /// Total quantity across the group.
    pub quantity: u64,

    /// Sum of taxable amounts across the group.
    #[ts(as = "String")]
    pub total_amount: Decimal,

    /// `total_amount / quantity`; explicitly 0 when quantity is 0, never a
    /// division error.
    #[ts(as = "String")]
    pub unit_price: Decimal,

    #[ts(as = "String")]
    pub cgst: Decimal,
    #[ts(as = "String")]
    pub sgst: Decimal,
    #[ts(as = "String")]
    pub igst: Decimal,
    #[ts(as = "String")]
    pub cess: Decimal,
}

// =============================================================================
// Totals
// =============================================================================

/// Column-wise sums over all calculated line items.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct TaxTotals {
    /// Sum of taxable amounts.
    #[ts(as = "String")]
    pub subtotal: Decimal,
    #[ts(as = "String")]
    pub total_cgst: Decimal,
    #[ts(as = "String")]
    pub total_sgst: Decimal,
    #[ts(as = "String")]
    pub total_igst: Decimal,
    #[ts(as = "String")]
    pub total_cess: Decimal,
    /// `total_cgst + total_sgst + total_igst`.
    #[ts(as = "String")]
    pub total_gst: Decimal,
}

// =============================================================================
// Aggregator
// =============================================================================

/// Builds both aggregations and the totals in one pass over the items.
pub fn aggregate(
    items: &[CalculatedLineItem],
) -> (Vec<RateBreakdown>, Vec<CommodityCodeSummary>, TaxTotals) {
    // BTreeMap keys give ascending rate / ascending code ordering for free,
    // which keeps output deterministic.
    let mut by_rate: BTreeMap<Decimal, RateBreakdown> = BTreeMap::new();
    let mut by_code: BTreeMap<String, CommodityCodeSummary> = BTreeMap::new();

    let mut totals = TaxTotals {
        subtotal: Decimal::ZERO,
        total_cgst: Decimal::ZERO,
        total_sgst: Decimal::ZERO,
        total_igst: Decimal::ZERO,
        total_cess: Decimal::ZERO,
        total_gst: Decimal::ZERO,
    };

    for item in items {
        let row = by_rate
            .entry(item.rate.percentage)
            .or_insert_with(|| RateBreakdown {
                rate_percentage: item.rate.percentage,
                taxable_amount: Decimal::ZERO,
                cgst: Decimal::ZERO,
                sgst: Decimal::ZERO,
                igst: Decimal::ZERO,
                cess: Decimal::ZERO,
                total_gst: Decimal::ZERO,
            });
        row.taxable_amount += item.taxable_amount;
        row.cgst += item.cgst;
        row.sgst += item.sgst;
        row.igst += item.igst;
        row.cess += item.cess;
        row.total_gst += item.total_gst();

        if let Some(code) = &item.rate.commodity_code {
            let row = by_code
                .entry(code.clone())
                .or_insert_with(|| CommodityCodeSummary {
                    commodity_code: code.clone(),
                    quantity: 0,
                    total_amount: Decimal::ZERO,
                    unit_price: Decimal::ZERO,
                    cgst: Decimal::ZERO,
                    sgst: Decimal::ZERO,
                    igst: Decimal::ZERO,
                    cess: Decimal::ZERO,
                });
            row.quantity += u64::from(item.quantity);
            row.total_amount += item.taxable_amount;
            row.cgst += item.cgst;
            row.sgst += item.sgst;
            row.igst += item.igst;
            row.cess += item.cess;
        }

        totals.subtotal += item.taxable_amount;
        totals.total_cgst += item.cgst;
        totals.total_sgst += item.sgst;
        totals.total_igst += item.igst;
        totals.total_cess += item.cess;
    }

    totals.total_gst = totals.total_cgst + totals.total_sgst + totals.total_igst;

    let commodity_summaries = by_code
        .into_values()
        .map(|mut row| {
            row.unit_price = if row.quantity == 0 {
                Decimal::ZERO
            } else {
                row.total_amount / Decimal::from(row.quantity)
            };
            row
        })
        .collect();

    (by_rate.into_values().collect(), commodity_summaries, totals)
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{RateCategory, RateInfo};
    use rust_decimal_macros::dec;

    fn line(
        pct: Decimal,
        code: Option<&str>,
        quantity: u32,
        taxable: Decimal,
        cgst: Decimal,
        sgst: Decimal,
        igst: Decimal,
    ) -> CalculatedLineItem {
        CalculatedLineItem {
            product_ref: "SKU".to_string(),
            description: "Item".to_string(),
            quantity,
            unit_price: dec!(0),
            rate: RateInfo::new(RateCategory::Custom, pct, code.map(str::to_string)).unwrap(),
            taxable_amount: taxable,
            cgst,
            sgst,
            igst,
            cess: dec!(0),
        }
    }

    #[test]
    fn test_mixed_rates_two_rows_ascending() {
        // Scenario D: one 12% item, one 18% item → rows ordered [12, 18]
        let items = vec![
            line(dec!(18), None, 1, dec!(1000), dec!(90), dec!(90), dec!(0)),
            line(dec!(12), None, 1, dec!(500), dec!(30), dec!(30), dec!(0)),
        ];

        let (breakdowns, _, totals) = aggregate(&items);

        assert_eq!(breakdowns.len(), 2);
        assert_eq!(breakdowns[0].rate_percentage, dec!(12));
        assert_eq!(breakdowns[1].rate_percentage, dec!(18));
        assert_eq!(breakdowns[0].total_gst, dec!(60));
        assert_eq!(breakdowns[1].total_gst, dec!(180));

        assert_eq!(totals.subtotal, dec!(1500));
        assert_eq!(totals.total_gst, dec!(240));
        assert_eq!(
            totals.total_gst,
            totals.total_cgst + totals.total_sgst + totals.total_igst
        );
    }

    #[test]
    fn test_same_rate_items_share_one_row() {
        let items = vec![
            line(dec!(18), None, 1, dec!(1000), dec!(90), dec!(90), dec!(0)),
            line(dec!(18), None, 1, dec!(2000), dec!(180), dec!(180), dec!(0)),
        ];

        let (breakdowns, _, _) = aggregate(&items);
        assert_eq!(breakdowns.len(), 1);
        assert_eq!(breakdowns[0].taxable_amount, dec!(3000));
        assert_eq!(breakdowns[0].cgst, dec!(270));
    }

    #[test]
    fn test_commodity_summary_weighted_unit_price() {
        // Scenario E: quantities 2 and 3 at totals 2000 and 4500 → qty 5,
        // total 6500, unit price 1300
        let items = vec![
            line(dec!(18), Some("4820"), 2, dec!(2000), dec!(180), dec!(180), dec!(0)),
            line(dec!(18), Some("4820"), 3, dec!(4500), dec!(405), dec!(405), dec!(0)),
        ];

        let (_, summaries, _) = aggregate(&items);

        assert_eq!(summaries.len(), 1);
        let row = &summaries[0];
        assert_eq!(row.commodity_code, "4820");
        assert_eq!(row.quantity, 5);
        assert_eq!(row.total_amount, dec!(6500));
        assert_eq!(row.unit_price, dec!(1300));
        assert_eq!(row.cgst, dec!(585));
    }

    #[test]
    fn test_items_without_code_excluded_from_summary() {
        let items = vec![
            line(dec!(18), Some("4820"), 1, dec!(100), dec!(9), dec!(9), dec!(0)),
            line(dec!(18), None, 1, dec!(100), dec!(9), dec!(9), dec!(0)),
        ];

        let (_, summaries, totals) = aggregate(&items);
        assert_eq!(summaries.len(), 1);
        assert_eq!(summaries[0].total_amount, dec!(100));
        // Totals still cover BOTH items.
        assert_eq!(totals.subtotal, dec!(200));
    }

    #[test]
    fn test_commodity_codes_sorted_ascending() {
        let items = vec![
            line(dec!(5), Some("9403"), 1, dec!(10), dec!(0.25), dec!(0.25), dec!(0)),
            line(dec!(5), Some("0910"), 1, dec!(10), dec!(0.25), dec!(0.25), dec!(0)),
        ];

        let (_, summaries, _) = aggregate(&items);
        assert_eq!(summaries[0].commodity_code, "0910");
        assert_eq!(summaries[1].commodity_code, "9403");
    }

    #[test]
    fn test_empty_input_yields_zero_totals() {
        let (breakdowns, summaries, totals) = aggregate(&[]);
        assert!(breakdowns.is_empty());
        assert!(summaries.is_empty());
        assert_eq!(totals.subtotal, dec!(0));
        assert_eq!(totals.total_gst, dec!(0));
    }

    #[test]
    fn test_interstate_totals_only_igst_column() {
        let items = vec![
            line(dec!(18), None, 1, dec!(1000), dec!(0), dec!(0), dec!(180)),
            line(dec!(12), None, 1, dec!(500), dec!(0), dec!(0), dec!(60)),
        ];

        let (_, _, totals) = aggregate(&items);
        assert_eq!(totals.total_cgst, dec!(0));
        assert_eq!(totals.total_sgst, dec!(0));
        assert_eq!(totals.total_igst, dec!(240));
        assert_eq!(totals.total_gst, dec!(240));
    }
}
