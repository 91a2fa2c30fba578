//! Deduction transactions
//!
//! Deducts a recipe's lines against the stock ledger in a single
//! deterministic greedy pass: no retries, no backtracking, no cross-line
//! optimization. Commit mode consumes stock; dry-run only reports.

use serde::Serialize;

use crate::ledger::StockLedger;
use crate::matching::IngredientMatcher;
use crate::models::{EventAction, RecipeLine, StockEvent};
use crate::store::EventSink;
use crate::units::{Unit, UnitNormalizer};

/// Whether a deduction mutates the ledger or only reports
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeductMode {
    Commit,
    DryRun,
}

/// Order in which ledger entries are scanned for a match
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ScanOrder {
    /// First match in insertion order wins
    #[default]
    InsertionOrder,
    /// Entries closest to expiry are consumed first
    EarliestExpiryFirst,
}

/// Unmet requirement of one line, in the line's original unit
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Shortfall {
    pub name: String,
    pub missing_quantity: f64,
    pub unit: Unit,
}

/// Result of a deduction pass
#[derive(Debug, Clone, PartialEq)]
pub struct Deduction {
    pub ledger: StockLedger,
    pub shortfalls: Vec<Shortfall>,
}

/// Deducts recipe lines against a ledger snapshot
#[derive(Debug, Default)]
pub struct TransactionEngine {
    normalizer: UnitNormalizer,
    matcher: IngredientMatcher,
    scan_order: ScanOrder,
}

impl TransactionEngine {
    pub fn new(normalizer: UnitNormalizer, matcher: IngredientMatcher) -> Self {
        Self {
            normalizer,
            matcher,
            scan_order: ScanOrder::default(),
        }
    }

    pub fn with_scan_order(mut self, scan_order: ScanOrder) -> Self {
        self.scan_order = scan_order;
        self
    }

    pub fn normalizer(&self) -> &UnitNormalizer {
        &self.normalizer
    }

    /// Deduct every non-joker line from a snapshot of `ledger`.
    ///
    /// Commit mode withdraws from matching entries, appends one consumption
    /// event per entry touched, tolerates shortfalls silently, and prunes
    /// near-empty rows at the end. Dry-run mode returns the input ledger
    /// unmodified plus the list of shortfalls. Event sink failures are
    /// swallowed; the computation never depends on the log.
    pub fn deduct(
        &self,
        lines: &[RecipeLine],
        ledger: &StockLedger,
        mode: DeductMode,
        events: &mut dyn EventSink,
    ) -> Deduction {
        let mut working = ledger.clone();
        let mut shortfalls = Vec::new();

        for line in lines.iter().filter(|line| !line.is_joker) {
            let mut required = self
                .normalizer
                .to_grams(line.quantity, line.unit, &line.name);

            for index in self.scan_indices(&working) {
                if required <= 0.0 {
                    break;
                }
                let entry = &working.entries()[index];
                if !self.matcher.is_match(&line.name, &entry.name) {
                    continue;
                }
                let available = self
                    .normalizer
                    .to_grams(entry.quantity, entry.unit, &entry.name);
                let take = required.min(available);
                if take <= 0.0 {
                    continue;
                }
                if mode == DeductMode::Commit {
                    let (name, brand, unit) = (entry.name.clone(), entry.brand.clone(), entry.unit);
                    if let Ok(withdrawal) = working.withdraw(index, take, &self.normalizer) {
                        tracing::debug!(
                            "consumed {:.1} g of '{}' for line '{}'",
                            withdrawal.grams,
                            name,
                            line.name
                        );
                        let event = StockEvent::now(
                            EventAction::Cook,
                            name.clone(),
                            brand,
                            -self.normalizer.from_grams(withdrawal.grams, unit, &name),
                            unit,
                            -withdrawal.price,
                        );
                        if let Err(err) = events.append(&event) {
                            tracing::warn!("event log append failed: {err}");
                        }
                    }
                }
                required -= take;
            }

            if required > 0.0 && mode == DeductMode::DryRun {
                shortfalls.push(Shortfall {
                    name: line.name.clone(),
                    missing_quantity: self.normalizer.from_grams(required, line.unit, &line.name),
                    unit: line.unit,
                });
            }
        }

        if mode == DeductMode::Commit {
            working.prune_near_zero(&self.normalizer);
        }

        Deduction {
            ledger: working,
            shortfalls,
        }
    }

    /// Candidate indices in the configured scan order.
    ///
    /// The expiry sort is stable, so equal dates fall back to insertion
    /// order and the pass stays deterministic.
    fn scan_indices(&self, ledger: &StockLedger) -> Vec<usize> {
        let mut indices: Vec<usize> = (0..ledger.len()).collect();
        if self.scan_order == ScanOrder::EarliestExpiryFirst {
            indices.sort_by_key(|&i| ledger.entries()[i].expiry);
        }
        indices
    }
}
