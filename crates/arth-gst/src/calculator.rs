//! # Line Item Tax Calculator
//!
//! Computes the taxable base and the jurisdiction split for one line item.
//!
//! ## Calculation Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                  Line Item Calculation                                  │
//! │                                                                         │
//! │  gross = unit_price × quantity                                          │
//! │      │                                                                  │
//! │      ├── rate is Exempt ──► taxable = gross, all components 0           │
//! │      │                                                                  │
//! │      ▼                                                                  │
//! │  taxable = tax_included_in_price ? gross / (1 + rate/100) : gross       │
//! │      │                                                                  │
//! │      ▼                                                                  │
//! │  tax = taxable × rate / 100                                             │
//! │      │                                                                  │
//! │      ├── Intrastate ──► cgst = sgst = tax / 2, igst = 0                 │
//! │      └── Interstate ──► igst = tax,  cgst = sgst = 0                    │
//! │                                                                         │
//! │  cess = 0 (reserved field; cess computation lives outside this core)    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! This step is a pure function and never fails. Negative quantities or
//! prices are rejected upstream (`validation` module); re-checking here
//! would put branches on the hot path for inputs that cannot occur.

use rust_decimal::Decimal;

use crate::jurisdiction::Jurisdiction;
use crate::types::{CalculatedLineItem, EngineConfig, LineItem, RateInfo};

/// Computes the tax breakdown for one line item.
pub fn calculate_line(
    item: &LineItem,
    rate: RateInfo,
    jurisdiction: Jurisdiction,
    config: &EngineConfig,
) -> CalculatedLineItem {
    let gross = item.gross_amount();

    // Exempt short-circuits independent of jurisdiction and pricing mode.
    if rate.is_exempt() {
        return with_components(item, rate, gross, Decimal::ZERO, jurisdiction);
    }

    let taxable = if config.tax_included_in_price {
        gross / (Decimal::ONE + rate.percentage / Decimal::ONE_HUNDRED)
    } else {
        gross
    };

    let tax_amount = taxable * rate.percentage / Decimal::ONE_HUNDRED;

    with_components(item, rate, taxable, tax_amount, jurisdiction)
}

/// Splits the tax amount by jurisdiction and snapshots the input fields.
fn with_components(
    item: &LineItem,
    rate: RateInfo,
    taxable_amount: Decimal,
    tax_amount: Decimal,
    jurisdiction: Jurisdiction,
) -> CalculatedLineItem {
    // Decimal division by two is exact in base 10, so cgst + sgst always
    // reconstructs tax_amount exactly.
    let (cgst, sgst, igst) = match jurisdiction {
        Jurisdiction::Intrastate => {
            let half = tax_amount / Decimal::TWO;
            (half, half, Decimal::ZERO)
        }
        Jurisdiction::Interstate => (Decimal::ZERO, Decimal::ZERO, tax_amount),
    };

    CalculatedLineItem {
        product_ref: item.product_ref.clone(),
        description: item.description.clone(),
        quantity: item.quantity,
        unit_price: item.unit_price,
        rate,
        taxable_amount,
        cgst,
        sgst,
        igst,
        cess: Decimal::ZERO,
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
