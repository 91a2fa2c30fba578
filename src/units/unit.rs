//! Measurement unit types and conversion constants
//!
//! Provides the units stock and recipe quantities are expressed in and the
//! standard factors to canonical grams.

use serde::{Deserialize, Serialize};

/// Grams per kilogram
pub const G_PER_KG: f64 = 1000.0;
/// Milliliters per liter
pub const ML_PER_L: f64 = 1000.0;

/// A measurement unit for stock and recipe quantities
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Unit {
    #[serde(rename = "g")]
    Gram,
    #[serde(rename = "kg")]
    Kilogram,
    #[serde(rename = "ml")]
    Milliliter,
    #[serde(rename = "l")]
    Liter,
    #[serde(rename = "piece")]
    Piece,
}

impl Unit {
    /// Get the canonical short string for this unit
    pub fn as_str(&self) -> &'static str {
        match self {
            Unit::Gram => "g",
            Unit::Kilogram => "kg",
            Unit::Milliliter => "ml",
            Unit::Liter => "l",
            Unit::Piece => "piece",
        }
    }

    /// Parse from a string, accepting common aliases
    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "g" | "gram" | "grams" => Some(Unit::Gram),
            "kg" | "kilogram" | "kilograms" => Some(Unit::Kilogram),
            "ml" | "milliliter" | "milliliters" | "millilitre" | "millilitres" => {
                Some(Unit::Milliliter)
            }
            "l" | "liter" | "liters" | "litre" | "litres" => Some(Unit::Liter),
            "piece" | "pieces" | "pc" | "pcs" | "each" | "stk" => Some(Unit::Piece),
            _ => None,
        }
    }

    /// Conversion factor to grams for mass/volume units.
    ///
    /// Milliliters are treated 1:1 with grams. Piece counts have no fixed
    /// factor; they convert through the piece-weight table.
    pub fn gram_factor(&self) -> Option<f64> {
        match self {
            Unit::Gram | Unit::Milliliter => Some(1.0),
            Unit::Kilogram => Some(G_PER_KG),
            Unit::Liter => Some(ML_PER_L),
            Unit::Piece => None,
        }
    }
}
