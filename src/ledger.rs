//! Stock ledger
//!
//! In-memory collection of inventory rows: merge-on-add, proportional
//! quantity updates, withdrawals, deletion, and near-zero pruning.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::models::StockEntry;
use crate::units::UnitNormalizer;

/// Entries at or below this many grams are dropped by pruning
pub const NEAR_ZERO_GRAMS: f64 = 0.01;

/// Ledger operation errors; surfaced conditions, never fatal
#[derive(Debug, Error, PartialEq)]
pub enum LedgerError {
    #[error("no stock entry at index {0}")]
    IndexOutOfBounds(usize),

    #[error("cannot rescale an entry with zero base quantity")]
    ZeroBaseQuantity,
}

/// Grams and price removed by a withdrawal
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Withdrawal {
    pub grams: f64,
    pub price: f64,
}

/// The live collection of stock entries, in insertion order
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StockLedger {
    entries: Vec<StockEntry>,
}

impl StockLedger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_entries(entries: Vec<StockEntry>) -> Self {
        Self { entries }
    }

    pub fn entries(&self) -> &[StockEntry] {
        &self.entries
    }

    pub fn get(&self, index: usize) -> Option<&StockEntry> {
        self.entries.get(index)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Add a purchase, merging into an existing row of the same (name, brand).
    ///
    /// Merging conserves total mass in grams, sums the absolute prices, and
    /// keeps the earlier expiry date.
    pub fn add_or_merge(&mut self, entry: StockEntry, normalizer: &UnitNormalizer) {
        match self.entries.iter().position(|e| e.same_item(&entry)) {
            Some(index) => {
                let existing = &mut self.entries[index];
                let base_g = normalizer.to_grams(existing.quantity, existing.unit, &existing.name);
                let added_g = normalizer.to_grams(entry.quantity, entry.unit, &entry.name);
                existing.quantity =
                    normalizer.from_grams(base_g + added_g, existing.unit, &existing.name);
                existing.price += entry.price;
                existing.expiry = existing.expiry.min(entry.expiry);
            }
            None => self.entries.push(entry),
        }
    }

    /// Set a new quantity, rescaling the price linearly by
    /// `new_quantity / old_quantity`.
    ///
    /// A zero base quantity cannot be rescaled: the entry is left unchanged
    /// and the condition is surfaced to the caller.
    pub fn update_quantity(
        &mut self,
        index: usize,
        new_quantity: f64,
    ) -> Result<&StockEntry, LedgerError> {
        let entry = self
            .entries
            .get_mut(index)
            .ok_or(LedgerError::IndexOutOfBounds(index))?;
        if entry.quantity <= 0.0 {
            return Err(LedgerError::ZeroBaseQuantity);
        }
        entry.price *= new_quantity / entry.quantity;
        entry.quantity = new_quantity;
        Ok(&self.entries[index])
    }

    /// Remove up to `grams` from the entry, cutting its price proportionally.
    ///
    /// The withdrawal is capped at what the entry holds; the actual grams and
    /// price removed are reported back.
    pub fn withdraw(
        &mut self,
        index: usize,
        grams: f64,
        normalizer: &UnitNormalizer,
    ) -> Result<Withdrawal, LedgerError> {
        let entry = self
            .entries
            .get_mut(index)
            .ok_or(LedgerError::IndexOutOfBounds(index))?;
        let available = normalizer.to_grams(entry.quantity, entry.unit, &entry.name);
        let take = grams.min(available).max(0.0);
        if take <= 0.0 || available <= 0.0 {
            return Ok(Withdrawal {
                grams: 0.0,
                price: 0.0,
            });
        }
        let price_cut = entry.price / available * take;
        entry.quantity = normalizer.from_grams(available - take, entry.unit, &entry.name);
        entry.price = (entry.price - price_cut).max(0.0);
        Ok(Withdrawal {
            grams: take,
            price: price_cut,
        })
    }

    /// Remove the row at `index`
    pub fn delete(&mut self, index: usize) -> Result<StockEntry, LedgerError> {
        if index >= self.entries.len() {
            return Err(LedgerError::IndexOutOfBounds(index));
        }
        Ok(self.entries.remove(index))
    }

    /// Drop entries whose remaining mass is at or below [`NEAR_ZERO_GRAMS`],
    /// returning the removed rows
    pub fn prune_near_zero(&mut self, normalizer: &UnitNormalizer) -> Vec<StockEntry> {
        self.prune_below(NEAR_ZERO_GRAMS, normalizer)
    }

    /// Drop entries whose remaining mass is at or below `epsilon_grams`
    pub fn prune_below(
        &mut self,
        epsilon_grams: f64,
        normalizer: &UnitNormalizer,
    ) -> Vec<StockEntry> {
        let mut removed = Vec::new();
        let mut kept = Vec::with_capacity(self.entries.len());
        for entry in self.entries.drain(..) {
            if normalizer.to_grams(entry.quantity, entry.unit, &entry.name) <= epsilon_grams {
                removed.push(entry);
            } else {
                kept.push(entry);
            }
        }
        self.entries = kept;
        removed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::NutrientVector;
    use crate::units::Unit;
    use chrono::NaiveDate;

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    fn entry(name: &str, quantity: f64, unit: Unit, price: f64, expiry: &str) -> StockEntry {
        StockEntry {
            name: name.to_string(),
            brand: None,
            quantity,
            unit,
            price,
            expiry: date(expiry),
            nutrient_per_100: NutrientVector::zero(),
        }
    }

    #[test]
    fn test_merge_conserves_grams_and_sums_price() {
        let normalizer = UnitNormalizer::default();
        let mut ledger = StockLedger::new();
        ledger.add_or_merge(entry("Rice", 500.0, Unit::Gram, 1.0, "2024-09-01"), &normalizer);
        ledger.add_or_merge(entry("Rice", 300.0, Unit::Gram, 0.6, "2024-12-01"), &normalizer);

        assert_eq!(ledger.len(), 1);
        let merged = ledger.get(0).unwrap();
        assert!((merged.quantity - 800.0).abs() < 1e-9);
        assert!((merged.price - 1.6).abs() < 1e-9);
    }

    #[test]
    fn test_merge_converts_units_into_existing_entry() {
        let normalizer = UnitNormalizer::default();
        let mut ledger = StockLedger::new();
        ledger.add_or_merge(entry("Rice", 500.0, Unit::Gram, 1.0, "2024-09-01"), &normalizer);
        ledger.add_or_merge(
            entry("Rice", 0.3, Unit::Kilogram, 0.6, "2024-12-01"),
            &normalizer,
        );

        let merged = ledger.get(0).unwrap();
        assert_eq!(merged.unit, Unit::Gram);
        assert!((merged.quantity - 800.0).abs() < 1e-9);
    }

    #[test]
    fn test_merge_keeps_earlier_expiry() {
        let normalizer = UnitNormalizer::default();
        let mut ledger = StockLedger::new();
        ledger.add_or_merge(entry("Rice", 500.0, Unit::Gram, 1.0, "2024-09-01"), &normalizer);
        ledger.add_or_merge(entry("Rice", 300.0, Unit::Gram, 0.6, "2024-06-01"), &normalizer);
        assert_eq!(ledger.get(0).unwrap().expiry, date("2024-06-01"));

        // the other order keeps the same date
        let mut ledger = StockLedger::new();
        ledger.add_or_merge(entry("Rice", 300.0, Unit::Gram, 0.6, "2024-06-01"), &normalizer);
        ledger.add_or_merge(entry("Rice", 500.0, Unit::Gram, 1.0, "2024-09-01"), &normalizer);
        assert_eq!(ledger.get(0).unwrap().expiry, date("2024-06-01"));
    }

    #[test]
    fn test_different_brands_do_not_merge() {
        let normalizer = UnitNormalizer::default();
        let mut ledger = StockLedger::new();
        ledger.add_or_merge(entry("Rice", 500.0, Unit::Gram, 1.0, "2024-09-01"), &normalizer);
        let mut branded = entry("Rice", 300.0, Unit::Gram, 0.6, "2024-09-01");
        branded.brand = Some("Acme".to_string());
        ledger.add_or_merge(branded, &normalizer);
        assert_eq!(ledger.len(), 2);
    }

    #[test]
    fn test_update_quantity_rescales_price() {
        let normalizer = UnitNormalizer::default();
        let mut ledger = StockLedger::new();
        ledger.add_or_merge(entry("Rice", 1000.0, Unit::Gram, 3.0, "2024-09-01"), &normalizer);

        let updated = ledger.update_quantity(0, 500.0).unwrap();
        assert!((updated.quantity - 500.0).abs() < 1e-9);
        assert!((updated.price - 1.5).abs() < 1e-9);
    }

    #[test]
    fn test_update_quantity_on_zero_base_surfaces_condition() {
        let normalizer = UnitNormalizer::default();
        let mut ledger = StockLedger::new();
        ledger.add_or_merge(entry("Rice", 0.0, Unit::Gram, 0.0, "2024-09-01"), &normalizer);

        assert_eq!(
            ledger.update_quantity(0, 500.0),
            Err(LedgerError::ZeroBaseQuantity)
        );
        // entry untouched
        assert_eq!(ledger.get(0).unwrap().quantity, 0.0);
    }

    #[test]
    fn test_update_quantity_out_of_bounds() {
        let mut ledger = StockLedger::new();
        assert_eq!(
            ledger.update_quantity(3, 500.0),
            Err(LedgerError::IndexOutOfBounds(3))
        );
    }

    #[test]
    fn test_withdraw_caps_at_available() {
        let normalizer = UnitNormalizer::default();
        let mut ledger = StockLedger::new();
        ledger.add_or_merge(entry("Tomato", 500.0, Unit::Gram, 2.0, "2024-09-01"), &normalizer);

        let taken = ledger.withdraw(0, 700.0, &normalizer).unwrap();
        assert!((taken.grams - 500.0).abs() < 1e-9);
        assert!((taken.price - 2.0).abs() < 1e-9);
        let remaining = ledger.get(0).unwrap();
        assert!(remaining.quantity.abs() < 1e-9);
        assert!(remaining.price.abs() < 1e-9);
    }

    #[test]
    fn test_withdraw_partial_cuts_price_proportionally() {
        let normalizer = UnitNormalizer::default();
        let mut ledger = StockLedger::new();
        ledger.add_or_merge(entry("Rice", 1000.0, Unit::Gram, 3.0, "2024-09-01"), &normalizer);

        let taken = ledger.withdraw(0, 250.0, &normalizer).unwrap();
        assert!((taken.grams - 250.0).abs() < 1e-9);
        assert!((taken.price - 0.75).abs() < 1e-9);
        let remaining = ledger.get(0).unwrap();
        assert!((remaining.quantity - 750.0).abs() < 1e-9);
        assert!((remaining.price - 2.25).abs() < 1e-9);
    }

    #[test]
    fn test_delete() {
        let normalizer = UnitNormalizer::default();
        let mut ledger = StockLedger::new();
        ledger.add_or_merge(entry("Rice", 500.0, Unit::Gram, 1.0, "2024-09-01"), &normalizer);

        assert!(ledger.delete(0).is_ok());
        assert!(ledger.is_empty());
        assert_eq!(ledger.delete(0), Err(LedgerError::IndexOutOfBounds(0)));
    }

    #[test]
    fn test_prune_near_zero() {
        let normalizer = UnitNormalizer::default();
        let mut ledger = StockLedger::from_entries(vec![
            entry("Rice", 500.0, Unit::Gram, 1.0, "2024-09-01"),
            entry("Tomato", 0.009, Unit::Gram, 0.0, "2024-09-01"),
            entry("Milk", 0.0, Unit::Milliliter, 0.0, "2024-09-01"),
        ]);

        let removed = ledger.prune_near_zero(&normalizer);
        assert_eq!(removed.len(), 2);
        assert_eq!(ledger.len(), 1);
        assert_eq!(ledger.get(0).unwrap().name, "Rice");
    }
}
