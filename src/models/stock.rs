//! Stock entries
//!
//! Rows of the live inventory ledger.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::{NutrientVector, ValidationError};
use crate::units::Unit;

/// Derived state of a stock row at a given date
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StockStatus {
    InStock,
    Expired,
    Empty,
}

/// One row of physical inventory.
///
/// Unique by (name, brand). Created on purchase, mutated by merges, updates
/// and deductions, removed when the quantity reaches near zero.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StockEntry {
    pub name: String,
    pub brand: Option<String>,
    pub quantity: f64,
    pub unit: Unit,
    /// Absolute price of the stored quantity, not per unit
    pub price: f64,
    pub expiry: NaiveDate,
    /// Copied from the library entry at purchase time
    pub nutrient_per_100: NutrientVector,
}

impl StockEntry {
    /// Check creation inputs before the entry enters the engine
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.name.trim().is_empty() {
            return Err(ValidationError::EmptyName);
        }
        if self.quantity <= 0.0 {
            return Err(ValidationError::NonPositiveQuantity(self.quantity));
        }
        if self.price < 0.0 {
            return Err(ValidationError::NegativePrice(self.price));
        }
        Ok(())
    }

    /// Whether this row and `other` refer to the same item
    pub fn same_item(&self, other: &StockEntry) -> bool {
        self.name == other.name && self.brand == other.brand
    }

    /// Derived status relative to `today`
    pub fn status(&self, today: NaiveDate) -> StockStatus {
        if self.quantity <= 0.0 {
            StockStatus::Empty
        } else if self.expiry < today {
            StockStatus::Expired
        } else {
            StockStatus::InStock
        }
    }
}
