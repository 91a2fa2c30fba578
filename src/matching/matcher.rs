//! Ingredient name matching
//!
//! Decides whether a requested ingredient name refers to a given ledger
//! entry. The decision is deterministic: the first qualifying rule wins, so
//! an ambiguous name never needs a tie-break.

use std::fmt;

use super::similarity::{LcsRatio, Similarity};

/// Default similarity threshold
pub const DEFAULT_MATCH_THRESHOLD: f64 = 0.7;

/// Matches ingredient names against ledger entry names.
///
/// Decision order: case-insensitive equality, substring containment in
/// either direction, then the similarity ratio against the threshold.
pub struct IngredientMatcher {
    threshold: f64,
    similarity: Box<dyn Similarity>,
}

impl IngredientMatcher {
    /// Create a matcher with a custom threshold and similarity strategy
    pub fn new(threshold: f64, similarity: Box<dyn Similarity>) -> Self {
        Self {
            threshold,
            similarity,
        }
    }

    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    /// Whether `query` refers to `candidate`
    pub fn is_match(&self, query: &str, candidate: &str) -> bool {
        let query = query.trim().to_lowercase();
        let candidate = candidate.trim().to_lowercase();
        if query.is_empty() || candidate.is_empty() {
            return false;
        }
        if query == candidate {
            return true;
        }
        if query.contains(&candidate) || candidate.contains(&query) {
            return true;
        }
        self.similarity.ratio(&query, &candidate) >= self.threshold
    }
}

impl Default for IngredientMatcher {
    fn default() -> Self {
        Self::new(DEFAULT_MATCH_THRESHOLD, Box::new(LcsRatio))
    }
}

impl fmt::Debug for IngredientMatcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("IngredientMatcher")
            .field("threshold", &self.threshold)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::matching::similarity::TokenSubset;

    #[test]
    fn test_exact_match_ignores_case() {
        let matcher = IngredientMatcher::default();
        assert!(matcher.is_match("Tomato", "tomato"));
        assert!(matcher.is_match("  Milk ", "milk"));
    }

    #[test]
    fn test_substring_match_either_direction() {
        let matcher = IngredientMatcher::default();
        assert!(matcher.is_match("Tomate", "Bio Tomaten"));
        assert!(matcher.is_match("Bio Tomaten", "Tomate"));
    }

    #[test]
    fn test_unrelated_names_do_not_match() {
        let matcher = IngredientMatcher::default();
        assert!(!matcher.is_match("Milk", "Chocolate"));
        assert!(!matcher.is_match("", "Chocolate"));
        assert!(!matcher.is_match("Milk", ""));
    }

    #[test]
    fn test_similarity_threshold() {
        let matcher = IngredientMatcher::default();
        // "tomatoes" vs "tomatos": lcs = 7, ratio = 14/15
        assert!(matcher.is_match("tomatoes", "tomatos"));

        let strict = IngredientMatcher::new(0.99, Box::new(LcsRatio));
        assert!(!strict.is_match("tomatoes", "tomatos"));
    }

    #[test]
    fn test_pluggable_strategy() {
        let matcher = IngredientMatcher::new(DEFAULT_MATCH_THRESHOLD, Box::new(TokenSubset));
        // word-set subset, not a substring: "rice brown" vs "brown rice organic"
        assert!(matcher.is_match("rice brown", "brown rice organic"));
    }
}
