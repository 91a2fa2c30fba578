//! Recipe costing and aggregation
//!
//! Derives per-line gram, cost, and nutrient contributions from library
//! references and folds lines into recipe totals. The per-100 nutrient
//! profile is a normalized rate: scaling every line quantity scales weight
//! and cost but leaves the profile unchanged.

use serde::Serialize;

use crate::models::{LibraryEntry, NutrientVector, Recipe, RecipeLine, ValidationError};
use crate::units::{Unit, UnitNormalizer};

/// Aggregate weight, cost, and normalized nutrient profile of a line list
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RecipeTotals {
    pub total_weight_g: f64,
    pub total_cost: f64,
    /// Per 100 g of total weight
    pub nutrient_per_100: NutrientVector,
}

/// Builds recipe lines from library references and aggregates them
#[derive(Debug, Clone, Default)]
pub struct RecipeAggregator {
    normalizer: UnitNormalizer,
}

impl RecipeAggregator {
    pub fn new(normalizer: UnitNormalizer) -> Self {
        Self { normalizer }
    }

    pub fn normalizer(&self) -> &UnitNormalizer {
        &self.normalizer
    }

    /// Derive a recipe line from a library reference.
    ///
    /// The cost is the requested share of the reference price; a reference
    /// that normalizes to zero grams contributes nothing.
    pub fn line_from_library(
        &self,
        reference: &LibraryEntry,
        quantity: f64,
        unit: Unit,
    ) -> RecipeLine {
        let grams = self.normalizer.to_grams(quantity, unit, &reference.name);
        let base_grams = self.normalizer.to_grams(
            reference.reference_quantity,
            reference.reference_unit,
            &reference.name,
        );
        let cost = if base_grams > 0.0 {
            reference.price * grams / base_grams
        } else {
            0.0
        };
        RecipeLine {
            name: reference.name.clone(),
            brand: reference.brand.clone(),
            quantity,
            unit,
            grams,
            cost,
            nutrients: reference.nutrient_per_100.scale(grams / 100.0),
            is_joker: false,
        }
    }

    /// A joker line: mass only, no cost, no nutrients, never deducted
    pub fn joker_line(&self, name: &str, quantity: f64, unit: Unit) -> RecipeLine {
        RecipeLine {
            name: name.to_string(),
            brand: None,
            quantity,
            unit,
            grams: self.normalizer.to_grams(quantity, unit, name),
            cost: 0.0,
            nutrients: NutrientVector::zero(),
            is_joker: true,
        }
    }

    /// Fold lines into totals
    pub fn compute_totals(&self, lines: &[RecipeLine]) -> RecipeTotals {
        let mut total_weight_g = 0.0;
        let mut total_cost = 0.0;
        let mut nutrient_sum = NutrientVector::zero();
        for line in lines {
            total_weight_g += line.grams;
            total_cost += line.cost;
            nutrient_sum = nutrient_sum.add(&line.nutrients);
        }
        let nutrient_per_100 = if total_weight_g > 0.0 {
            nutrient_sum.scale(100.0 / total_weight_g)
        } else {
            NutrientVector::zero()
        };
        RecipeTotals {
            total_weight_g,
            total_cost,
            nutrient_per_100,
        }
    }

    /// Assemble a recipe record from its lines and computed totals
    pub fn assemble_recipe(
        &self,
        id: String,
        name: String,
        category: String,
        portions: f64,
        lines: Vec<RecipeLine>,
        instructions: String,
    ) -> Result<Recipe, ValidationError> {
        if name.trim().is_empty() {
            return Err(ValidationError::EmptyName);
        }
        if portions <= 0.0 {
            return Err(ValidationError::NonPositivePortions(portions));
        }
        let totals = self.compute_totals(&lines);
        Ok(Recipe {
            id,
            name,
            category,
            portions,
            total_weight_g: totals.total_weight_g,
            total_price: totals.total_cost,
            nutrient_per_100: totals.nutrient_per_100,
            lines,
            instructions,
        })
    }
}
