//! Recipes
//!
//! Recipe lines with derived contributions and the assembled recipe record
//! with pre-aggregated totals.

use serde::{Deserialize, Serialize};

use super::NutrientVector;
use crate::units::Unit;

/// One ingredient line within a recipe
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecipeLine {
    pub name: String,
    pub brand: Option<String>,
    pub quantity: f64,
    pub unit: Unit,
    /// Derived canonical mass
    pub grams: f64,
    /// Derived share of the reference price
    pub cost: f64,
    /// Absolute nutrient contribution of this line
    pub nutrients: NutrientVector,
    /// Joker lines (water, salt) are skipped by deduction and contribute
    /// no cost or nutrients; their mass still counts toward recipe weight
    #[serde(default)]
    pub is_joker: bool,
}

/// A saved recipe
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recipe {
    pub id: String,
    pub name: String,
    pub category: String,
    pub portions: f64,
    pub total_weight_g: f64,
    pub total_price: f64,
    /// Per 100 g of total weight
    pub nutrient_per_100: NutrientVector,
    pub lines: Vec<RecipeLine>,
    pub instructions: String,
}

impl Recipe {
    /// Absolute nutrient totals for the whole recipe
    pub fn total_nutrients(&self) -> NutrientVector {
        self.nutrient_per_100.scale(self.total_weight_g / 100.0)
    }

    /// Absolute nutrient totals for a single portion
    pub fn portion_nutrients(&self) -> NutrientVector {
        if self.portions > 0.0 {
            self.total_nutrients().scale(1.0 / self.portions)
        } else {
            NutrientVector::zero()
        }
    }

    /// Price of a single portion
    pub fn portion_price(&self) -> f64 {
        if self.portions > 0.0 {
            self.total_price / self.portions
        } else {
            0.0
        }
    }
}
