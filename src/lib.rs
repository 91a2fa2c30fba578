//! Larder
//!
//! Pantry inventory and recipe costing engine: unit normalization, fuzzy
//! ingredient matching, stock ledger bookkeeping, recipe aggregation, and
//! deduction transactions.

pub mod costing;
pub mod ledger;
pub mod lookup;
pub mod matching;
pub mod models;
pub mod store;
pub mod transaction;
pub mod units;
