//! SQLite snapshot store
//!
//! Single-connection store persisting full table snapshots. Nutrient
//! vectors and recipe lines are stored as JSON columns; loads read rows in
//! rowid order so ledger insertion order survives a round trip.

use std::path::Path;

use chrono::{DateTime, NaiveDate, Utc};
use rusqlite::{params, Connection, OpenFlags};

use super::{migrations, EventSink, StoreError, StoreResult, TableStore};
use crate::ledger::StockLedger;
use crate::models::{
    EventAction, Library, LibraryEntry, Recipe, StockEntry, StockEvent,
};
use crate::units::Unit;

const DATE_FORMAT: &str = "%Y-%m-%d";

/// SQLite-backed table store over a single connection
pub struct SqliteStore {
    conn: Connection,
}

impl SqliteStore {
    /// Open (or create) a store at `path` and bring the schema up to date
    pub fn open<P: AsRef<Path>>(path: P) -> StoreResult<Self> {
        let conn = Connection::open_with_flags(
            path,
            OpenFlags::SQLITE_OPEN_READ_WRITE
                | OpenFlags::SQLITE_OPEN_CREATE
                | OpenFlags::SQLITE_OPEN_URI,
        )?;
        Self::init(conn)
    }

    /// In-memory store, used by tests and throwaway sessions
    pub fn open_in_memory() -> StoreResult<Self> {
        Self::init(Connection::open_in_memory()?)
    }

    fn init(conn: Connection) -> StoreResult<Self> {
        conn.execute_batch(
            "PRAGMA foreign_keys = ON;
             PRAGMA journal_mode = WAL;
             PRAGMA synchronous = NORMAL;",
        )?;
        migrations::run_migrations(&conn)?;
        Ok(Self { conn })
    }

    /// Read the audit log, oldest first
    pub fn load_events(&self) -> StoreResult<Vec<StockEvent>> {
        let mut stmt = self.conn.prepare(
            "SELECT timestamp, action, name, brand, delta_quantity, unit, price
             FROM event_log ORDER BY id",
        )?;
        let rows = stmt
            .query_map([], |row| {
                Ok((
                    row.get::<_, String>(0)?,
                    row.get::<_, String>(1)?,
                    row.get::<_, String>(2)?,
                    row.get::<_, Option<String>>(3)?,
                    row.get::<_, f64>(4)?,
                    row.get::<_, String>(5)?,
                    row.get::<_, f64>(6)?,
                ))
            })?
            .collect::<Result<Vec<_>, _>>()?;

        let mut events = Vec::with_capacity(rows.len());
        for (timestamp, action, name, brand, delta_quantity, unit, price) in rows {
            events.push(StockEvent {
                timestamp: parse_timestamp(&timestamp)?,
                action: EventAction::from_str(&action)
                    .ok_or_else(|| StoreError::Corrupt(format!("unknown action '{action}'")))?,
                name,
                brand,
                delta_quantity,
                unit: parse_unit(&unit)?,
                price,
            });
        }
        Ok(events)
    }
}

impl TableStore for SqliteStore {
    fn load_library(&self) -> StoreResult<Library> {
        let mut stmt = self.conn.prepare(
            "SELECT name, brand, category, reference_quantity, reference_unit, price, nutrients
             FROM library ORDER BY id",
        )?;
        let rows = stmt
            .query_map([], |row| {
                Ok((
                    row.get::<_, String>(0)?,
                    row.get::<_, Option<String>>(1)?,
                    row.get::<_, String>(2)?,
                    row.get::<_, f64>(3)?,
                    row.get::<_, String>(4)?,
                    row.get::<_, f64>(5)?,
                    row.get::<_, String>(6)?,
                ))
            })?
            .collect::<Result<Vec<_>, _>>()?;

        let mut entries = Vec::with_capacity(rows.len());
        for (name, brand, category, reference_quantity, reference_unit, price, nutrients) in rows {
            entries.push(LibraryEntry {
                name,
                brand,
                category,
                reference_quantity,
                reference_unit: parse_unit(&reference_unit)?,
                price,
                nutrient_per_100: serde_json::from_str(&nutrients)?,
            });
        }
        Ok(Library::from_entries(entries))
    }

    fn save_library(&mut self, library: &Library) -> StoreResult<()> {
        let tx = self.conn.transaction()?;
        tx.execute("DELETE FROM library", [])?;
        {
            let mut stmt = tx.prepare(
                "INSERT INTO library
                 (name, brand, category, reference_quantity, reference_unit, price, nutrients)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
            )?;
            for entry in library.entries() {
                stmt.execute(params![
                    entry.name,
                    entry.brand,
                    entry.category,
                    entry.reference_quantity,
                    entry.reference_unit.as_str(),
                    entry.price,
                    serde_json::to_string(&entry.nutrient_per_100)?,
                ])?;
            }
        }
        tx.commit()?;
        Ok(())
    }

    fn load_stock(&self) -> StoreResult<StockLedger> {
        let mut stmt = self.conn.prepare(
            "SELECT name, brand, quantity, unit, price, expiry, nutrients
             FROM stock ORDER BY id",
        )?;
        let rows = stmt
            .query_map([], |row| {
                Ok((
                    row.get::<_, String>(0)?,
                    row.get::<_, Option<String>>(1)?,
                    row.get::<_, f64>(2)?,
                    row.get::<_, String>(3)?,
                    row.get::<_, f64>(4)?,
                    row.get::<_, String>(5)?,
                    row.get::<_, String>(6)?,
                ))
            })?
            .collect::<Result<Vec<_>, _>>()?;

        let mut entries = Vec::with_capacity(rows.len());
        for (name, brand, quantity, unit, price, expiry, nutrients) in rows {
            entries.push(StockEntry {
                name,
                brand,
                quantity,
                unit: parse_unit(&unit)?,
                price,
                expiry: parse_date(&expiry)?,
                nutrient_per_100: serde_json::from_str(&nutrients)?,
            });
        }
        Ok(StockLedger::from_entries(entries))
    }

    fn save_stock(&mut self, ledger: &StockLedger) -> StoreResult<()> {
        let tx = self.conn.transaction()?;
        tx.execute("DELETE FROM stock", [])?;
        {
            let mut stmt = tx.prepare(
                "INSERT INTO stock (name, brand, quantity, unit, price, expiry, nutrients)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
            )?;
            for entry in ledger.entries() {
                stmt.execute(params![
                    entry.name,
                    entry.brand,
                    entry.quantity,
                    entry.unit.as_str(),
                    entry.price,
                    entry.expiry.format(DATE_FORMAT).to_string(),
                    serde_json::to_string(&entry.nutrient_per_100)?,
                ])?;
            }
        }
        tx.commit()?;
        Ok(())
    }

    fn load_recipes(&self) -> StoreResult<Vec<Recipe>> {
        let mut stmt = self.conn.prepare(
            "SELECT id, name, category, portions, total_weight, total_price,
                    nutrients, lines, instructions
             FROM recipes ORDER BY rowid",
        )?;
        let rows = stmt
            .query_map([], |row| {
                Ok((
                    row.get::<_, String>(0)?,
                    row.get::<_, String>(1)?,
                    row.get::<_, String>(2)?,
                    row.get::<_, f64>(3)?,
                    row.get::<_, f64>(4)?,
                    row.get::<_, f64>(5)?,
                    row.get::<_, String>(6)?,
                    row.get::<_, String>(7)?,
                    row.get::<_, String>(8)?,
                ))
            })?
            .collect::<Result<Vec<_>, _>>()?;

        let mut recipes = Vec::with_capacity(rows.len());
        for (id, name, category, portions, total_weight, total_price, nutrients, lines, instructions) in
            rows
        {
            recipes.push(Recipe {
                id,
                name,
                category,
                portions,
                total_weight_g: total_weight,
                total_price,
                nutrient_per_100: serde_json::from_str(&nutrients)?,
                lines: serde_json::from_str(&lines)?,
                instructions,
            });
        }
        Ok(recipes)
    }

    fn save_recipes(&mut self, recipes: &[Recipe]) -> StoreResult<()> {
        let tx = self.conn.transaction()?;
        tx.execute("DELETE FROM recipes", [])?;
        {
            let mut stmt = tx.prepare(
                "INSERT INTO recipes
                 (id, name, category, portions, total_weight, total_price,
                  nutrients, lines, instructions)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)",
            )?;
            for recipe in recipes {
                stmt.execute(params![
                    recipe.id,
                    recipe.name,
                    recipe.category,
                    recipe.portions,
                    recipe.total_weight_g,
                    recipe.total_price,
                    serde_json::to_string(&recipe.nutrient_per_100)?,
                    serde_json::to_string(&recipe.lines)?,
                    recipe.instructions,
                ])?;
            }
        }
        tx.commit()?;
        Ok(())
    }
}

impl EventSink for SqliteStore {
    fn append(&mut self, event: &StockEvent) -> StoreResult<()> {
        self.conn.execute(
            "INSERT INTO event_log (timestamp, action, name, brand, delta_quantity, unit, price)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
            params![
                event.timestamp.to_rfc3339(),
                event.action.as_str(),
                event.name,
                event.brand,
                event.delta_quantity,
                event.unit.as_str(),
                event.price,
            ],
        )?;
        Ok(())
    }
}

fn parse_unit(s: &str) -> StoreResult<Unit> {
    Unit::from_str(s).ok_or_else(|| StoreError::Corrupt(format!("unknown unit '{s}'")))
}

fn parse_date(s: &str) -> StoreResult<NaiveDate> {
    NaiveDate::parse_from_str(s, DATE_FORMAT)
        .map_err(|e| StoreError::Corrupt(format!("bad date '{s}': {e}")))
}

fn parse_timestamp(s: &str) -> StoreResult<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(s)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| StoreError::Corrupt(format!("bad timestamp '{s}': {e}")))
}
