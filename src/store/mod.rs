//! Persistence contracts and stores
//!
//! Snapshot-oriented table store and append-only event log. The engine only
//! ever sees these traits; concrete stores live behind them.

pub mod migrations;
mod sqlite;

pub use sqlite::SqliteStore;

use thiserror::Error;

use crate::ledger::StockLedger;
use crate::models::{Library, Recipe, StockEvent};

/// Storage error types
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    #[error("serialization error: {0}")]
    Serde(#[from] serde_json::Error),

    #[error("corrupt row: {0}")]
    Corrupt(String),
}

/// Result type for storage operations
pub type StoreResult<T> = Result<T, StoreError>;

/// Full-snapshot persistence for the logical tables.
///
/// Loads return complete tables and saves replace them wholesale; there is
/// no row-level protocol.
pub trait TableStore {
    fn load_library(&self) -> StoreResult<Library>;
    fn save_library(&mut self, library: &Library) -> StoreResult<()>;

    fn load_stock(&self) -> StoreResult<StockLedger>;
    fn save_stock(&mut self, ledger: &StockLedger) -> StoreResult<()>;

    fn load_recipes(&self) -> StoreResult<Vec<Recipe>>;
    fn save_recipes(&mut self, recipes: &[Recipe]) -> StoreResult<()>;
}

/// Append-only sink for audit events.
///
/// Callers treat failures as non-fatal; a lost audit record never corrupts
/// an in-memory computation.
pub trait EventSink {
    fn append(&mut self, event: &StockEvent) -> StoreResult<()>;
}

/// In-memory event log for callers without a database
#[derive(Debug, Clone, Default)]
pub struct MemoryEventLog {
    events: Vec<StockEvent>,
}

impl MemoryEventLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> &[StockEvent] {
        &self.events
    }
}

impl EventSink for MemoryEventLog {
    fn append(&mut self, event: &StockEvent) -> StoreResult<()> {
        self.events.push(event.clone());
        Ok(())
    }
}
