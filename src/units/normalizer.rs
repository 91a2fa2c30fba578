//! Gram normalization
//!
//! Converts (quantity, unit, item name) to and from canonical grams. Piece
//! counts go through an injectable average-weight table; the heuristic is an
//! approximation and both directions use the same table so that the round
//! trip returns the input quantity.

use super::unit::Unit;

/// Average weight assumed for a piece with no table entry, in grams
pub const DEFAULT_PIECE_GRAMS: f64 = 100.0;

/// Average piece weights keyed by item-name fragment.
///
/// Lookup is a case-insensitive substring match against the item name; the
/// first matching entry wins, so more specific fragments belong first.
#[derive(Debug, Clone)]
pub struct PieceWeightTable {
    entries: Vec<(String, f64)>,
    default_grams: f64,
}

impl PieceWeightTable {
    /// Create a table from (name fragment, grams) entries and a fallback
    pub fn new(entries: Vec<(String, f64)>, default_grams: f64) -> Self {
        let entries = entries
            .into_iter()
            .map(|(fragment, grams)| (fragment.to_lowercase(), grams))
            .collect();
        Self {
            entries,
            default_grams,
        }
    }

    /// Average grams for one piece of the named item
    pub fn grams_for(&self, item_name: &str) -> f64 {
        let name = item_name.to_lowercase();
        for (fragment, grams) in &self.entries {
            if name.contains(fragment.as_str()) {
                return *grams;
            }
        }
        tracing::warn!(
            "no piece weight for '{}', assuming {} g",
            item_name,
            self.default_grams
        );
        self.default_grams
    }
}

impl Default for PieceWeightTable {
    fn default() -> Self {
        Self::new(
            vec![
                ("egg".to_string(), 60.0),
                ("tomato".to_string(), 120.0),
                ("potato".to_string(), 170.0),
                ("onion".to_string(), 90.0),
                ("apple".to_string(), 180.0),
                ("banana".to_string(), 120.0),
                ("bell pepper".to_string(), 150.0),
                ("carrot".to_string(), 80.0),
                ("zucchini".to_string(), 200.0),
                ("cucumber".to_string(), 300.0),
                ("lemon".to_string(), 100.0),
                ("garlic".to_string(), 40.0),
            ],
            DEFAULT_PIECE_GRAMS,
        )
    }
}

/// Converts quantities between their display unit and canonical grams
#[derive(Debug, Clone, Default)]
pub struct UnitNormalizer {
    piece_weights: PieceWeightTable,
}

impl UnitNormalizer {
    /// Create a normalizer with the given piece-weight table
    pub fn new(piece_weights: PieceWeightTable) -> Self {
        Self { piece_weights }
    }

    /// The table used to resolve piece counts
    pub fn piece_weights(&self) -> &PieceWeightTable {
        &self.piece_weights
    }

    /// Convert a quantity in the given unit to grams
    pub fn to_grams(&self, quantity: f64, unit: Unit, item_name: &str) -> f64 {
        match unit.gram_factor() {
            Some(factor) => quantity * factor,
            None => quantity * self.piece_weights.grams_for(item_name),
        }
    }

    /// Convert grams back into the given unit
    pub fn from_grams(&self, grams: f64, unit: Unit, item_name: &str) -> f64 {
        match unit.gram_factor() {
            Some(factor) => grams / factor,
            None => {
                let per_piece = self.piece_weights.grams_for(item_name);
                if per_piece > 0.0 {
                    grams / per_piece
                } else {
                    0.0
                }
            }
        }
    }
}
