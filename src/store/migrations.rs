//! Schema migrations
//!
//! Schema creation and versioning for the snapshot store.

use rusqlite::Connection;

use super::StoreResult;

/// Run all migrations to bring the database up to the current schema version
pub fn run_migrations(conn: &Connection) -> StoreResult<()> {
    conn.execute(
        "CREATE TABLE IF NOT EXISTS schema_migrations (
            version INTEGER PRIMARY KEY,
            applied_at TEXT NOT NULL DEFAULT (datetime('now'))
        )",
        [],
    )?;

    let current_version = schema_version(conn)?;

    if current_version < 1 {
        migrate_v1(conn)?;
        conn.execute("INSERT INTO schema_migrations (version) VALUES (1)", [])?;
    }

    Ok(())
}

/// Get the currently applied schema version
pub fn schema_version(conn: &Connection) -> StoreResult<i32> {
    let version: i32 = conn
        .query_row(
            "SELECT COALESCE(MAX(version), 0) FROM schema_migrations",
            [],
            |row| row.get(0),
        )
        .unwrap_or(0);
    Ok(version)
}

/// Migration v1: initial schema
fn migrate_v1(conn: &Connection) -> StoreResult<()> {
    conn.execute_batch(
        r#"
        -- ============================================
        -- LIBRARY
        -- Reference nutrient/price profiles per item
        -- ============================================
        CREATE TABLE library (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            name TEXT NOT NULL,
            brand TEXT,
            category TEXT NOT NULL DEFAULT 'general',
            reference_quantity REAL NOT NULL,
            reference_unit TEXT NOT NULL,
            price REAL NOT NULL DEFAULT 0,
            nutrients TEXT NOT NULL              -- JSON, per 100 units
        );

        CREATE INDEX idx_library_name ON library(name);

        -- ============================================
        -- STOCK
        -- Live inventory rows, insertion order by rowid
        -- ============================================
        CREATE TABLE stock (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            name TEXT NOT NULL,
            brand TEXT,
            quantity REAL NOT NULL,
            unit TEXT NOT NULL,
            price REAL NOT NULL DEFAULT 0,       -- absolute, not per unit
            expiry TEXT NOT NULL,
            nutrients TEXT NOT NULL              -- JSON, per 100 units
        );

        CREATE INDEX idx_stock_name ON stock(name);

        -- ============================================
        -- RECIPES
        -- Saved recipes with pre-aggregated totals
        -- ============================================
        CREATE TABLE recipes (
            id TEXT PRIMARY KEY,
            name TEXT NOT NULL,
            category TEXT NOT NULL DEFAULT 'general',
            portions REAL NOT NULL DEFAULT 1,
            total_weight REAL NOT NULL DEFAULT 0,
            total_price REAL NOT NULL DEFAULT 0,
            nutrients TEXT NOT NULL,             -- JSON, per 100 g
            lines TEXT NOT NULL,                 -- JSON array of recipe lines
            instructions TEXT NOT NULL DEFAULT ''
        );

        CREATE INDEX idx_recipes_name ON recipes(name);

        -- ============================================
        -- EVENT LOG
        -- Append-only audit records
        -- ============================================
        CREATE TABLE event_log (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            timestamp TEXT NOT NULL,
            action TEXT NOT NULL,
            name TEXT NOT NULL,
            brand TEXT,
            delta_quantity REAL NOT NULL,
            unit TEXT NOT NULL,
            price REAL NOT NULL DEFAULT 0
        );
        "#,
    )?;
    Ok(())
}
