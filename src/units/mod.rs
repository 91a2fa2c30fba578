//! Unit model and gram normalization
//!
//! Provides measurement units and conversion to/from canonical grams.

pub mod normalizer;
pub mod unit;

pub use normalizer::{PieceWeightTable, UnitNormalizer, DEFAULT_PIECE_GRAMS};
pub use unit::{Unit, G_PER_KG, ML_PER_L};
