//! Nutrient lookup
//!
//! Record contract for external nutrition sources and priority merging of
//! their results. The sources themselves (barcode databases, national food
//! databases) live outside the engine; only their records pass through.

use serde::{Deserialize, Serialize};

use crate::models::NutrientVector;

/// How a product is looked up by a collaborator
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LookupQuery {
    Barcode(String),
    Text(String),
}

/// A product record returned by a nutrition source.
///
/// Fields the source does not know are zero-filled.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductInfo {
    pub name: String,
    pub brand: Option<String>,
    pub nutrient_per_100: NutrientVector,
}

/// An external nutrition source
pub trait NutrientLookup {
    fn lookup(&self, query: &LookupQuery) -> Option<ProductInfo>;
}

/// Merge lookup results in priority order.
///
/// For every nutrient field the first non-zero value wins; name and brand
/// fall back to later results when the leading ones are empty. Returns None
/// for an empty result list.
pub fn merge_products(results: &[ProductInfo]) -> Option<ProductInfo> {
    let mut merged = results.first()?.clone();
    for result in &results[1..] {
        merged.nutrient_per_100 = merged.nutrient_per_100.or_fill(&result.nutrient_per_100);
        if merged.name.trim().is_empty() {
            merged.name = result.name.clone();
        }
        if merged.brand.is_none() {
            merged.brand = result.brand.clone();
        }
    }
    Some(merged)
}
