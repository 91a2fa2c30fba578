//! Ingredient matching module
//!
//! Decides whether a requested ingredient name refers to a ledger entry.

pub mod matcher;
pub mod similarity;

pub use matcher::{IngredientMatcher, DEFAULT_MATCH_THRESHOLD};
pub use similarity::{LcsRatio, Similarity, TokenSubset};
