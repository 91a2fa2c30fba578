//! String similarity strategies
//!
//! Pluggable metrics producing a normalized ratio in [0, 1]. The metric can
//! be swapped without touching ledger or transaction code.

use std::collections::HashSet;

/// A normalized string-similarity metric
pub trait Similarity {
    /// Similarity ratio in [0, 1]; 1 means identical
    fn ratio(&self, a: &str, b: &str) -> f64;
}

/// Longest-common-subsequence ratio: `2 * lcs / (|a| + |b|)`
#[derive(Debug, Clone, Copy, Default)]
pub struct LcsRatio;

impl Similarity for LcsRatio {
    fn ratio(&self, a: &str, b: &str) -> f64 {
        let a: Vec<char> = a.chars().collect();
        let b: Vec<char> = b.chars().collect();
        if a.is_empty() && b.is_empty() {
            return 1.0;
        }
        if a.is_empty() || b.is_empty() {
            return 0.0;
        }
        let lcs = lcs_length(&a, &b);
        2.0 * lcs as f64 / (a.len() + b.len()) as f64
    }
}

/// LCS length via the rolling-row dynamic program
fn lcs_length(a: &[char], b: &[char]) -> usize {
    let mut prev = vec![0usize; b.len() + 1];
    let mut curr = vec![0usize; b.len() + 1];
    for &ca in a {
        for (j, &cb) in b.iter().enumerate() {
            curr[j + 1] = if ca == cb {
                prev[j] + 1
            } else {
                prev[j + 1].max(curr[j])
            };
        }
        std::mem::swap(&mut prev, &mut curr);
    }
    prev[b.len()]
}

/// Alternate rule: one name's word set being a subset of the other's counts
/// as a full match; everything else falls back to the LCS ratio.
#[derive(Debug, Clone, Copy, Default)]
pub struct TokenSubset;

impl Similarity for TokenSubset {
    fn ratio(&self, a: &str, b: &str) -> f64 {
        let a_words: HashSet<&str> = a.split_whitespace().collect();
        let b_words: HashSet<&str> = b.split_whitespace().collect();
        if !a_words.is_empty()
            && !b_words.is_empty()
            && (a_words.is_subset(&b_words) || b_words.is_subset(&a_words))
        {
            return 1.0;
        }
        LcsRatio.ratio(a, b)
    }
}
