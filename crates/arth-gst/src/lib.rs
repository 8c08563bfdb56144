//! # arth-gst: Pure GST Calculation & Reconciliation Engine
//!
//! This crate is the **heart** of Arth POS. It turns a set of sale line
//! items into a fully itemized, auditable GST breakdown as pure functions
//! with zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Arth POS Architecture                             │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │         Host Application (UI, persistence, printing, sync)      │   │
//! │  │   builds line items ──► snapshots catalog ──► renders results   │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │ plain data in, plain data out          │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ arth-gst (THIS CRATE) ★                          │   │
//! │  │                                                                 │   │
//! │  │  ┌────────────┐ ┌───────┐ ┌────────────┐ ┌───────────┐         │   │
//! │  │  │jurisdiction│ │ rates │ │ calculator │ │ aggregate │         │   │
//! │  │  │  CGST/SGST │ │ slabs │ │ line split │ │ summaries │         │   │
//! │  │  │  vs IGST   │ │ table │ │            │ │ + totals  │         │   │
//! │  │  └────────────┘ └───────┘ └────────────┘ └───────────┘         │   │
//! │  │  ┌────────────┐ ┌───────────┐                                  │   │
//! │  │  │  rounding  │ │ reconcile │                                  │   │
//! │  │  │  half-up   │ │ post-hoc  │                                  │   │
//! │  │  └────────────┘ └───────────┘                                  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO DATABASE • NO CLOCKS • PURE FUNCTIONS             │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │                                                                         │
//! │  External collaborators (behind seams, not implemented here):           │
//! │  • Tax-identifier validator  → `IdentifierValidator` trait              │
//! │  • Catalog/rate lookup store → `CatalogSnapshot` passed by value        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (LineItem, RateInfo, EngineConfig, ...)
//! - [`jurisdiction`] - Intrastate vs. interstate resolution
//! - [`rates`] - Table-driven rate resolution with catalog snapshots
//! - [`calculator`] - Per-line taxable base and CGST/SGST/IGST split
//! - [`aggregate`] - Rate-wise and commodity-code-wise summaries
//! - [`rounding`] - Isolated grand-total round-off
//! - [`engine`] - The `calculate` entry point and `CalculationResult`
//! - [`reconcile`] - Post-hoc `validate` producing `ValidationIssue`s
//! - [`error`] - Typed errors
//! - [`validation`] - Caller-boundary input validation
//!
//! ## Design Principles
//!
//! 1. **Pure Functions**: identical inputs (down to decimal representation)
//!    produce a bit-identical `CalculationResult`
//! 2. **No I/O**: database, network, clocks and random ids are FORBIDDEN here
//! 3. **Decimal Money**: every monetary value is a `rust_decimal::Decimal`;
//!    binary floats never touch money
//! 4. **Calculate-then-Validate**: calculation always produces a result;
//!    reconciliation reports issues separately and never auto-corrects
//!
//! ## Example Usage
//!
//! ```rust
//! use arth_gst::{
//!     calculate, validate, CatalogSnapshot, EngineConfig, LineItem, RateCategory,
//!     StateCodeValidator, TaxIdentifier,
//! };
//! use rust_decimal_macros::dec;
//!
//! let items = vec![LineItem {
//!     product_ref: "SKU-1".to_string(),
//!     description: "Notebook".to_string(),
//!     quantity: 2,
//!     unit_price: dec!(1000),
//! }];
//!
//! let config = EngineConfig {
//!     default_rate: dec!(18),
//!     default_category: RateCategory::R18,
//!     ..EngineConfig::default()
//! };
//! let seller = TaxIdentifier::new("27AAPFU0939F1ZV");
//!
//! let result = calculate(
//!     &items,
//!     &CatalogSnapshot::default(),
//!     &config,
//!     Some(&seller),
//!     None, // walk-in buyer: intrastate by policy
//!     &StateCodeValidator,
//! )
//! .unwrap();
//!
//! assert_eq!(result.grand_total, dec!(2360));
//! assert_eq!(result.totals.total_cgst, dec!(180));
//! assert_eq!(result.totals.total_sgst, dec!(180));
//! assert!(validate(&result, &StateCodeValidator).is_empty());
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod aggregate;
pub mod calculator;
pub mod engine;
pub mod error;
pub mod jurisdiction;
pub mod rates;
pub mod reconcile;
pub mod rounding;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================
// These allow users to do `use arth_gst::CalculationResult` instead of
// `use arth_gst::engine::CalculationResult`

pub use aggregate::{CommodityCodeSummary, RateBreakdown, TaxTotals};
pub use engine::{calculate, CalculationResult};
pub use error::{EngineError, EngineResult, ValidationError};
pub use jurisdiction::{
    IdentifierValidator, Jurisdiction, MissingIdentifierPolicy, StateCodeValidator,
};
pub use rates::{CatalogEntry, CatalogSnapshot, RateTable};
pub use reconcile::{validate, ValidationIssue};
pub use types::{
    CalculatedLineItem, DisplayPolicy, EngineConfig, LineItem, RateCategory, RateInfo,
    TaxIdentifier, TaxMode,
};

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Maximum line items accepted in a single calculation.
///
/// ## Business Reason
/// Keeps a calculation O(items) and bounded; a runaway import pipeline
/// should split its batches rather than ship a million-line invoice. The
/// limit is enforced at the caller boundary by
/// [`validation::validate_line_items`], not on the hot path.
pub const MAX_LINE_ITEMS: usize = 1_000;
