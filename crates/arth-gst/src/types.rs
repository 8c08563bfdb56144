//! # Domain Types
//!
//! Core domain types used throughout the GST engine.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │    LineItem     │   │    RateInfo     │   │  EngineConfig   │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  product_ref    │   │  category       │   │  mode           │       │
//! │  │  quantity       │   │  percentage     │   │  default_rate   │       │
//! │  │  unit_price     │   │  commodity_code │   │  round_off ...  │       │
//! │  └─────────────────┘   └─────────────────┘   └─────────────────┘       │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │  RateCategory   │   │     TaxMode     │   │  DisplayPolicy  │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  Exempt, R5,    │   │  FullTax        │   │  FullBreakdown  │       │
//! │  │  R12, R18, R28, │   │  PartialTax     │   │  Hidden         │       │
//! │  │  Custom         │   │  ReferenceOnly  │   │  IdentifierOnly │       │
//! │  │                 │   │  NoTax          │   │                 │       │
//! │  └─────────────────┘   └─────────────────┘   └─────────────────┘       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! All monetary fields are `rust_decimal::Decimal`. Binary floats never
//! touch money anywhere in this crate.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::{EngineError, EngineResult};
use crate::jurisdiction::MissingIdentifierPolicy;
use crate::rates::RateTable;

// =============================================================================
// Tax Identifier
// =============================================================================

/// An opaque, jurisdiction-bearing registration identifier (e.g. a GSTIN).
///
/// The engine never interprets the identifier itself; checksum rules and
/// jurisdiction extraction belong to an [`IdentifierValidator`]
/// implementation supplied by the caller.
///
/// [`IdentifierValidator`]: crate::jurisdiction::IdentifierValidator
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct TaxIdentifier(String);

impl TaxIdentifier {
    /// Wraps a raw identifier string. No validation happens here; validity
    /// is a post-hoc reconciliation concern, not a construction concern.
    pub fn new(raw: impl Into<String>) -> Self {
        TaxIdentifier(raw.into())
    }

    /// Returns the raw identifier string.
    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for TaxIdentifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

// =============================================================================
// Rate Category
// =============================================================================

/// The closed set of GST rate slabs.
///
/// The percentage each slab stands for is NOT hard-coded into branches; it
/// is supplied as data by a [`RateTable`] so that slab-to-rate mapping stays
/// injectable and auditable.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS,
)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum RateCategory {
    /// Exempt goods/services - always 0%.
    Exempt,
    /// 5% slab.
    R5,
    /// 12% slab.
    R12,
    /// 18% slab.
    R18,
    /// 28% slab.
    R28,
    /// Non-slab rate; the exact percentage comes from a catalog override.
    Custom,
}

// =============================================================================
// Rate Info
// =============================================================================

/// A fully resolved rate for one line item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct RateInfo {
    /// The slab this rate belongs to.
    pub category: RateCategory,

    /// Rate percentage, e.g. `18` for 18%. Always within `[0, 100]`.
    #[ts(as = "String")]
    pub percentage: Decimal,

    /// HSN/commodity classification code, when the catalog knows one.
    pub commodity_code: Option<String>,
}

impl RateInfo {
    /// Creates a rate, failing fast on a percentage outside `[0, 100]`.
    ///
    /// An out-of-band rate indicates corrupt configuration or catalog data,
    /// not a business anomaly, so this is the one place the engine rejects
    /// input instead of reporting an issue post-hoc.
    pub fn new(
        category: RateCategory,
        percentage: Decimal,
        commodity_code: Option<String>,
    ) -> EngineResult<Self> {
        if percentage < Decimal::ZERO || percentage > Decimal::ONE_HUNDRED {
            return Err(EngineError::InvalidRate { percentage });
        }

        Ok(RateInfo {
            category,
            percentage,
            commodity_code,
        })
    }

    /// The 0% exempt rate.
    pub fn exempt() -> Self {
        RateInfo {
            category: RateCategory::Exempt,
            percentage: Decimal::ZERO,
            commodity_code: None,
        }
    }

    /// Whether this rate is the exempt slab.
    #[inline]
    pub fn is_exempt(&self) -> bool {
        self.category == RateCategory::Exempt
    }
}

// =============================================================================
// Line Item
// =============================================================================

/// One sale line item, as supplied by the caller.
///
/// ## Preconditions (enforced by `validation`, not re-checked here)
/// - `quantity >= 1`
/// - `unit_price >= 0`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct LineItem {
    /// Business reference used for catalog lookup (SKU, barcode, etc.).
    pub product_ref: String,

    /// Display name shown on the invoice.
    pub description: String,

    /// Quantity sold.
    pub quantity: u32,

    /// Price of a single unit. May be tax-inclusive depending on
    /// `EngineConfig::tax_included_in_price`.
    #[ts(as = "String")]
    pub unit_price: Decimal,
}

impl LineItem {
    /// Gross amount for the line: `unit_price × quantity`.
    #[inline]
    pub fn gross_amount(&self) -> Decimal {
        self.unit_price * Decimal::from(self.quantity)
    }
}

// =============================================================================
// Calculated Line Item
// =============================================================================

/// A line item after tax calculation, owned by the result.
///
/// Input fields are copied in (snapshot pattern: the result stays internally
/// consistent even if the caller mutates its own line-item list afterwards).
///
/// ## Invariant
/// For a non-exempt item, exactly one of `(cgst, sgst)` or `igst` is
/// non-zero - never both, and never both zero unless the rate is 0.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct CalculatedLineItem {
    pub product_ref: String,
    pub description: String,
    pub quantity: u32,
    #[ts(as = "String")]
    pub unit_price: Decimal,

    /// The rate this line was taxed at.
    pub rate: RateInfo,

    /// The amount tax was applied to. Equals the gross amount under
    /// exclusive pricing; the back-computed base under inclusive pricing.
    #[ts(as = "String")]
    pub taxable_amount: Decimal,

    /// Central GST component (intrastate only).
    #[ts(as = "String")]
    pub cgst: Decimal,

    /// State GST component (intrastate only, always equals cgst).
    #[ts(as = "String")]
    pub sgst: Decimal,

    /// Integrated GST component (interstate only).
    #[ts(as = "String")]
    pub igst: Decimal,

    /// Additional levy for specific commodity classes. Reserved; the engine
    /// always emits 0 today.
    #[ts(as = "String")]
    pub cess: Decimal,
}

impl CalculatedLineItem {
    /// Total GST for this line: `cgst + sgst + igst`.
    #[inline]
    pub fn total_gst(&self) -> Decimal {
        self.cgst + self.sgst + self.igst
    }

    /// Line total including tax and cess.
    #[inline]
    pub fn line_total(&self) -> Decimal {
        self.taxable_amount + self.total_gst() + self.cess
    }
}

// =============================================================================
// Tax Mode & Display Policy
// =============================================================================

/// How the transaction participates in the tax regime.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum TaxMode {
    /// Registered seller; full itemized tax breakdown on the invoice.
    FullTax,
    /// Composition-style seller; tax is levied but not shown to the buyer.
    PartialTax,
    /// Registration shown for reference; no tax breakdown.
    ReferenceOnly,
    /// Tax regime does not apply at all.
    NoTax,
}

impl TaxMode {
    /// Whether this mode levies tax, and therefore requires a valid seller
    /// registration identifier at reconciliation time.
    #[inline]
    pub fn requires_tax(&self) -> bool {
        matches!(self, TaxMode::FullTax | TaxMode::PartialTax)
    }

    /// Whether the counterparty gets to see tax/identifier details.
    #[inline]
    pub fn show_to_counterparty(&self) -> bool {
        matches!(self, TaxMode::FullTax | TaxMode::ReferenceOnly)
    }

    /// The display policy a result computed under this mode carries.
    pub fn display_policy(&self) -> DisplayPolicy {
        match self {
            TaxMode::FullTax => DisplayPolicy::FullBreakdown,
            TaxMode::PartialTax => DisplayPolicy::Hidden,
            TaxMode::ReferenceOnly => DisplayPolicy::IdentifierOnly,
            TaxMode::NoTax => DisplayPolicy::Hidden,
        }
    }
}

impl Default for TaxMode {
    fn default() -> Self {
        TaxMode::FullTax
    }
}

/// How downstream presentation layers should render the result.
///
/// Derived purely from [`TaxMode`]; the engine never formats anything.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum DisplayPolicy {
    /// Itemized rate-wise breakdown.
    FullBreakdown,
    /// No tax details shown.
    Hidden,
    /// Registration identifier only, no amounts.
    IdentifierOnly,
}

// =============================================================================
// Engine Configuration
// =============================================================================

/// Per-transaction engine configuration snapshot.
///
/// This is plain data supplied by the caller for each `calculate` call.
/// The engine holds no configuration state of its own.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct EngineConfig {
    /// How this transaction participates in the tax regime.
    pub mode: TaxMode,

    /// Rate applied when neither an override nor a catalog entry matches.
    #[ts(as = "String")]
    pub default_rate: Decimal,

    /// Slab recorded alongside `default_rate`.
    pub default_category: RateCategory,

    /// When true, `unit_price` already contains tax and the taxable base is
    /// back-computed (`gross / (1 + rate/100)`).
    pub tax_included_in_price: bool,

    /// When true, the grand total is rounded to the nearest whole currency
    /// unit and the adjustment surfaced as `round_off_amount`.
    pub round_off: bool,

    /// Config-level kill switch. When false, every item resolves to the
    /// exempt 0% rate regardless of catalog data.
    pub allows_tax: bool,

    /// Transaction-level rate override. Takes precedence over catalog
    /// lookups and the config default for every item in the call.
    #[serde(default)]
    pub transaction_rate_override: Option<RateInfo>,

    /// What to assume when seller or buyer identifier is missing.
    #[serde(default)]
    pub missing_identifier_policy: MissingIdentifierPolicy,

    /// Slab-to-percentage mapping, injected as data.
    #[serde(default = "RateTable::standard")]
    pub rate_table: RateTable,
}

impl Default for EngineConfig {
    fn default() -> Self {
        EngineConfig {
            mode: TaxMode::default(),
            default_rate: Decimal::ZERO,
            default_category: RateCategory::Exempt,
            tax_included_in_price: false,
            round_off: false,
            allows_tax: true,
            transaction_rate_override: None,
            missing_identifier_policy: MissingIdentifierPolicy::default(),
            rate_table: RateTable::standard(),
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
