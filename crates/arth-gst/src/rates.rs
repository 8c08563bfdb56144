//! # Rate Resolution
//!
//! Resolves the applicable rate for each line item.
//!
//! ## Precedence (first match wins)
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Rate Resolution                                    │
//! │                                                                         │
//! │  Kill switch: !allows_tax || mode == NoTax ──► Exempt 0% (stop)         │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  1. Transaction override (config.transaction_rate_override)             │
//! │       │ none                                                            │
//! │       ▼                                                                 │
//! │  2. Catalog lookup by product_ref                                       │
//! │     ├── entry.rate_override, if present                                 │
//! │     └── else RateTable[entry.category]                                  │
//! │       │ no entry                                                        │
//! │       ▼                                                                 │
//! │  3. config.default_rate + config.default_category                       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The slab-to-percentage mapping is a [`RateTable`] injected as data, not
//! a hard-coded `match` - there is no silent "else" branch anywhere in the
//! lookup.

use std::collections::BTreeMap;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::{EngineError, EngineResult};
use crate::types::{EngineConfig, LineItem, RateCategory, RateInfo, TaxMode};

// =============================================================================
// Rate Table
// =============================================================================

/// Slab-to-percentage mapping, injected as configuration data.
///
/// `Custom` is deliberately absent from the standard table: a custom rate
/// must always come with an explicit catalog override.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct RateTable {
    #[ts(as = "std::collections::BTreeMap<RateCategory, String>")]
    rates: BTreeMap<RateCategory, Decimal>,
}

impl RateTable {
    /// The statutory slab table: 0 / 5 / 12 / 18 / 28 percent.
    pub fn standard() -> Self {
        let mut rates = BTreeMap::new();
        rates.insert(RateCategory::Exempt, Decimal::ZERO);
        rates.insert(RateCategory::R5, Decimal::from(5));
        rates.insert(RateCategory::R12, Decimal::from(12));
        rates.insert(RateCategory::R18, Decimal::from(18));
        rates.insert(RateCategory::R28, Decimal::from(28));
        RateTable { rates }
    }

    /// Sets or replaces the percentage for a slab, failing fast on a
    /// percentage outside `[0, 100]`.
    pub fn set(&mut self, category: RateCategory, percentage: Decimal) -> EngineResult<()> {
        if percentage < Decimal::ZERO || percentage > Decimal::ONE_HUNDRED {
            return Err(EngineError::InvalidRate { percentage });
        }
        self.rates.insert(category, percentage);
        Ok(())
    }

    /// The percentage mapped to a slab, if the table knows it.
    pub fn percentage_for(&self, category: RateCategory) -> Option<Decimal> {
        self.rates.get(&category).copied()
    }
}

impl Default for RateTable {
    fn default() -> Self {
        RateTable::standard()
    }
}

// =============================================================================
// Catalog Snapshot
// =============================================================================

/// One product's rate data in a catalog snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct CatalogEntry {
    /// Business reference this entry is keyed by.
    pub product_ref: String,

    /// The slab this product falls under.
    pub category: RateCategory,

    /// Product-specific percentage that beats the slab table (required for
    /// `Custom` entries).
    #[serde(default)]
    #[ts(as = "Option<String>")]
    pub rate_override: Option<Decimal>,

    /// HSN/commodity classification code, if known.
    #[serde(default)]
    pub commodity_code: Option<String>,
}

/// An immutable point-in-time view of the rate catalog.
///
/// The engine never reads a live store; the caller snapshots whatever rate
/// data applies (including any effective-date filtering, which is the rate
/// store's job) and hands it in as plain data.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct CatalogSnapshot {
    entries: BTreeMap<String, CatalogEntry>,
}

impl CatalogSnapshot {
    /// Builds a snapshot from entries. When two entries share a
    /// product_ref the later one wins.
    pub fn new(entries: impl IntoIterator<Item = CatalogEntry>) -> Self {
        let entries = entries
            .into_iter()
            .map(|entry| (entry.product_ref.clone(), entry))
            .collect();
        CatalogSnapshot { entries }
    }

    /// Looks up the entry for a product reference.
    pub fn lookup(&self, product_ref: &str) -> Option<&CatalogEntry> {
        self.entries.get(product_ref)
    }

    /// Number of products in the snapshot.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the snapshot carries no entries at all.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

// =============================================================================
// Resolver
// =============================================================================

/// Resolves the rate for one line item.
///
/// Only structurally corrupt rate data fails (`InvalidRate`,
/// `MissingCustomRate`); a product simply absent from the catalog falls
/// through to the config default.
pub fn resolve(
    item: &LineItem,
    catalog: &CatalogSnapshot,
    config: &EngineConfig,
) -> EngineResult<RateInfo> {
    // Config-level kill switch, checked before any per-item resolution.
    if !config.allows_tax || config.mode == TaxMode::NoTax {
        return Ok(RateInfo::exempt());
    }

    if let Some(override_rate) = &config.transaction_rate_override {
        // Re-validate: the config may have been deserialized, bypassing
        // RateInfo::new.
        return RateInfo::new(
            override_rate.category,
            override_rate.percentage,
            override_rate.commodity_code.clone(),
        );
    }

    if let Some(entry) = catalog.lookup(&item.product_ref) {
        let percentage = match entry.rate_override {
            Some(percentage) => percentage,
            None => match config.rate_table.percentage_for(entry.category) {
                Some(percentage) => percentage,
                None => {
                    return Err(EngineError::MissingCustomRate {
                        product_ref: item.product_ref.clone(),
                    })
                }
            },
        };
        return RateInfo::new(entry.category, percentage, entry.commodity_code.clone());
    }

    RateInfo::new(config.default_category, config.default_rate, None)
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn item(product_ref: &str) -> LineItem {
        LineItem {
            product_ref: product_ref.to_string(),
            description: "Test".to_string(),
            quantity: 1,
            unit_price: dec!(100),
        }
    }

    fn entry(product_ref: &str, category: RateCategory) -> CatalogEntry {
        CatalogEntry {
            product_ref: product_ref.to_string(),
            category,
            rate_override: None,
            commodity_code: Some("4820".to_string()),
        }
    }

    #[test]
    fn test_standard_table_slabs() {
        let table = RateTable::standard();
        assert_eq!(table.percentage_for(RateCategory::Exempt), Some(dec!(0)));
        assert_eq!(table.percentage_for(RateCategory::R5), Some(dec!(5)));
        assert_eq!(table.percentage_for(RateCategory::R12), Some(dec!(12)));
        assert_eq!(table.percentage_for(RateCategory::R18), Some(dec!(18)));
        assert_eq!(table.percentage_for(RateCategory::R28), Some(dec!(28)));
        assert_eq!(table.percentage_for(RateCategory::Custom), None);
    }

    #[test]
    fn test_table_rejects_out_of_band_rate() {
        let mut table = RateTable::standard();
        assert!(table.set(RateCategory::Custom, dec!(101)).is_err());
        assert!(table.set(RateCategory::Custom, dec!(40)).is_ok());
        assert_eq!(table.percentage_for(RateCategory::Custom), Some(dec!(40)));
    }

    #[test]
    fn test_catalog_lookup_resolves_slab_rate() {
        let catalog = CatalogSnapshot::new([entry("SKU-1", RateCategory::R18)]);
        let config = EngineConfig::default();

        let rate = resolve(&item("SKU-1"), &catalog, &config).unwrap();
        assert_eq!(rate.category, RateCategory::R18);
        assert_eq!(rate.percentage, dec!(18));
        assert_eq!(rate.commodity_code.as_deref(), Some("4820"));
    }

    #[test]
    fn test_catalog_rate_override_beats_slab() {
        let catalog = CatalogSnapshot::new([CatalogEntry {
            rate_override: Some(dec!(14.5)),
            ..entry("SKU-1", RateCategory::Custom)
        }]);
        let config = EngineConfig::default();

        let rate = resolve(&item("SKU-1"), &catalog, &config).unwrap();
        assert_eq!(rate.category, RateCategory::Custom);
        assert_eq!(rate.percentage, dec!(14.5));
    }

    #[test]
    fn test_custom_without_override_is_hard_failure() {
        let catalog = CatalogSnapshot::new([entry("SKU-1", RateCategory::Custom)]);
        let config = EngineConfig::default();

        let err = resolve(&item("SKU-1"), &catalog, &config).unwrap_err();
        assert!(matches!(err, EngineError::MissingCustomRate { .. }));
    }

    #[test]
    fn test_unknown_product_falls_back_to_config_default() {
        let catalog = CatalogSnapshot::default();
        let config = EngineConfig {
            default_rate: dec!(12),
            default_category: RateCategory::R12,
            ..EngineConfig::default()
        };

        let rate = resolve(&item("UNLISTED"), &catalog, &config).unwrap();
        assert_eq!(rate.category, RateCategory::R12);
        assert_eq!(rate.percentage, dec!(12));
        assert!(rate.commodity_code.is_none());
    }

    #[test]
    fn test_transaction_override_beats_catalog() {
        let catalog = CatalogSnapshot::new([entry("SKU-1", RateCategory::R28)]);
        let config = EngineConfig {
            transaction_rate_override: Some(
                RateInfo::new(RateCategory::Custom, dec!(8), None).unwrap(),
            ),
            ..EngineConfig::default()
        };

        let rate = resolve(&item("SKU-1"), &catalog, &config).unwrap();
        assert_eq!(rate.percentage, dec!(8));
    }

    #[test]
    fn test_kill_switch_forces_exempt() {
        let catalog = CatalogSnapshot::new([entry("SKU-1", RateCategory::R28)]);

        let no_tax_mode = EngineConfig {
            mode: TaxMode::NoTax,
            ..EngineConfig::default()
        };
        assert!(resolve(&item("SKU-1"), &catalog, &no_tax_mode)
            .unwrap()
            .is_exempt());

        let tax_disallowed = EngineConfig {
            allows_tax: false,
            ..EngineConfig::default()
        };
        assert!(resolve(&item("SKU-1"), &catalog, &tax_disallowed)
            .unwrap()
            .is_exempt());
    }

    #[test]
    fn test_corrupt_default_rate_fails_fast() {
        let config = EngineConfig {
            default_rate: dec!(118),
            ..EngineConfig::default()
        };
        let err = resolve(&item("X"), &CatalogSnapshot::default(), &config).unwrap_err();
        assert!(matches!(err, EngineError::InvalidRate { .. }));
    }

    #[test]
    fn test_later_catalog_entry_wins() {
        let catalog = CatalogSnapshot::new([
            entry("SKU-1", RateCategory::R5),
            entry("SKU-1", RateCategory::R18),
        ]);
        assert_eq!(catalog.len(), 1);
        assert_eq!(
            catalog.lookup("SKU-1").unwrap().category,
            RateCategory::R18
        );
    }
}
