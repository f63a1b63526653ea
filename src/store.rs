//! SQLite output: the `Food` table
//!
//! Rows are inserted one statement at a time with no surrounding
//! transaction. A failing row does not stop the run; it is recorded in the
//! returned [`InsertReport`].

use crate::nutrients::NUTRIENT_COLUMNS;
use crate::types::FoodRecord;
use anyhow::{Context, Result};
use rusqlite::{Connection, ToSql};
use std::path::Path;
use tracing::{debug, info, warn};

/// Name of the output table
pub const FOOD_TABLE: &str = "Food";

/// `CREATE TABLE IF NOT EXISTS` statement for the `Food` table
pub fn create_table_sql() -> String {
    let nutrient_columns: Vec<String> = NUTRIENT_COLUMNS
        .iter()
        .map(|column| format!("{} REAL", column.name))
        .collect();
    format!(
        "CREATE TABLE IF NOT EXISTS {} (id INTEGER PRIMARY KEY, name TEXT, {})",
        FOOD_TABLE,
        nutrient_columns.join(", ")
    )
}

/// Parameterized insert binding every column of the `Food` table
pub fn insert_sql() -> String {
    let names: Vec<&str> = ["id", "name"]
        .into_iter()
        .chain(NUTRIENT_COLUMNS.iter().map(|column| column.name))
        .collect();
    let placeholders = vec!["?"; names.len()].join(", ");
    format!(
        "INSERT INTO {} ({}) VALUES ({})",
        FOOD_TABLE,
        names.join(", "),
        placeholders
    )
}

/// A row that could not be inserted
#[derive(Debug, Clone, PartialEq)]
pub struct RowFailure {
    pub id: i64,
    pub message: String,
}

/// Outcome of [`FoodStore::insert_all`]
#[derive(Debug, Clone, Default, PartialEq)]
pub struct InsertReport {
    pub inserted: usize,
    pub failures: Vec<RowFailure>,
}

impl InsertReport {
    pub fn is_clean(&self) -> bool {
        self.failures.is_empty()
    }
}

pub struct FoodStore {
    conn: Connection,
}

impl FoodStore {
    /// Open a database on disk at `path`, creating the file if it doesn't exist.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let conn = Connection::open(path)
            .with_context(|| format!("Failed to open database {}", path.display()))?;
        debug!(path = %path.display(), "opened database");
        Ok(FoodStore { conn })
    }

    /// Open an in-memory database
    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory().context("Failed to open in-memory database")?;
        Ok(FoodStore { conn })
    }

    /// Create the `Food` table unless it already exists
    pub fn ensure_schema(&self) -> Result<()> {
        self.conn
            .execute(&create_table_sql(), [])
            .context("Failed to create table Food")?;
        info!("table {} ready", FOOD_TABLE);
        Ok(())
    }

    /// Insert one row per record, in order, collecting per-row failures
    pub fn insert_all(&self, records: &[FoodRecord]) -> Result<InsertReport> {
        let mut statement = self
            .conn
            .prepare(&insert_sql())
            .context("Failed to prepare Food insert")?;
        let mut report = InsertReport::default();

        for record in records {
            let mut values: Vec<&dyn ToSql> = Vec::with_capacity(2 + record.nutrients.len());
            values.push(&record.id);
            values.push(&record.name);
            values.extend(record.nutrients.iter().map(|amount| amount as &dyn ToSql));

            match statement.execute(values.as_slice()) {
                Ok(_) => report.inserted += 1,
                Err(err) => {
                    warn!(id = record.id, error = %err, "failed to insert food row");
                    report.failures.push(RowFailure {
                        id: record.id,
                        message: err.to_string(),
                    });
                }
            }
        }

        info!(
            "inserted {} of {} food rows into {}",
            report.inserted,
            records.len(),
            FOOD_TABLE
        );
        Ok(report)
    }

    /// Number of rows in the `Food` table
    pub fn count(&self) -> Result<i64> {
        self.conn
            .query_row(&format!("SELECT COUNT(*) FROM {}", FOOD_TABLE), [], |row| row.get(0))
            .context("Failed to count Food rows")
    }
}
