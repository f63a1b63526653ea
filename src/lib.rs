//! # foodmelt - FoodData Central trimming
//!
//! Turns a bulk FoodData Central "Foundation Foods" JSON export into:
//!
//! - a trimmed JSON file holding only the id, name and a fixed set of key
//!   nutrients per food
//! - a SQLite `Food` table with one row per food and one column per nutrient
//!
//! ## Pipeline
//!
//! - **loader**: read the export and pull out the food list
//! - **projector**: drop metadata, keep allow-listed nutrients with an amount,
//!   flatten them onto the food as `name: amount`
//! - **writer**: pretty-printed JSON export
//! - **store**: `Food` table creation and row inserts
//!
//! ## Quick Start
//!
//! ```rust
//! use foodmelt::{project, to_records};
//! use serde_json::json;
//!
//! # fn main() -> anyhow::Result<()> {
//! let foods = vec![json!({
//!     "fdcId": 1,
//!     "description": "Apple",
//!     "foodNutrients": [
//!         {"nutrient": {"name": "Protein"}, "amount": 0.3},
//!         {"nutrient": {"name": "Water"}, "amount": 85.6}
//!     ]
//! })];
//!
//! let projected = project(foods)?;
//! let records = to_records(&projected)?;
//!
//! assert_eq!(records[0].nutrient("protein"), Some(0.3));
//! assert_eq!(records[0].nutrient("calories"), Some(0.0));
//! # Ok(())
//! # }
//! ```

use anyhow::Result;
use tracing::info;

pub mod error;
pub mod loader;
pub mod nutrients;
pub mod projector;
pub mod store;
pub mod types;
pub mod writer;

// Re-export commonly used types for convenience
pub use error::FoodError;
pub use projector::{project, to_records, NutrientEntry};
pub use store::{FoodStore, InsertReport, RowFailure};
pub use types::{FoodRecord, PrepConfig};
pub use writer::{export_json, JsonExporter};

/// Main entry point: load, project, export JSON, then fill the `Food` table.
///
/// Structural errors abort before anything is written. Per-row insert
/// failures are returned in the report rather than as an error.
pub fn run(config: &PrepConfig) -> Result<InsertReport> {
    let foods = loader::load_food_list(&config.input_path, &config.food_list_key)?;
    let projected = project(foods)?;
    let records = to_records(&projected)?;

    export_json(&config.json_output_path, &projected)?;

    let store = FoodStore::open(&config.db_path)?;
    store.ensure_schema()?;
    let report = store.insert_all(&records)?;

    info!(
        inserted = report.inserted,
        failed = report.failures.len(),
        "run complete"
    );
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{json, Value};
    use std::path::Path;

    const APPLE_EXPORT: &str = concat!(
        r#"{"FoundationFoods":[{"fdcId":1,"description":"Apple","foodNutrients":["#,
        r#"{"nutrient":{"name":"Protein"},"amount":0.3},"#,
        r#"{"nutrient":{"name":"Unwanted"},"amount":5}]}]}"#
    );

    fn config_in(dir: &Path) -> PrepConfig {
        PrepConfig {
            input_path: dir.join("original-food.json"),
            json_output_path: dir.join("food.json"),
            db_path: dir.join("food.db"),
            ..PrepConfig::default()
        }
    }

    #[test]
    fn test_apple_end_to_end() {
        let dir = tempfile::tempdir().unwrap();
        let config = config_in(dir.path());
        std::fs::write(&config.input_path, APPLE_EXPORT).unwrap();

        let report = run(&config).unwrap();
        assert_eq!(report.inserted, 1);
        assert!(report.is_clean());

        let exported = loader::load(&config.json_output_path).unwrap();
        assert_eq!(
            exported,
            json!([{"fdcId": 1, "description": "Apple", "Protein": 0.3}])
        );

        let store = FoodStore::open(&config.db_path).unwrap();
        assert_eq!(store.count().unwrap(), 1);
    }

    #[test]
    fn test_second_run_reports_duplicates() {
        let dir = tempfile::tempdir().unwrap();
        let config = config_in(dir.path());
        std::fs::write(&config.input_path, APPLE_EXPORT).unwrap();

        run(&config).unwrap();
        let report = run(&config).unwrap();

        assert_eq!(report.inserted, 0);
        assert_eq!(report.failures.len(), 1);
        assert_eq!(report.failures[0].id, 1);
    }

    #[test]
    fn test_structural_error_writes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let config = config_in(dir.path());
        std::fs::write(
            &config.input_path,
            r#"{"FoundationFoods":[{"fdcId":"one","description":"Apple","foodNutrients":[]}]}"#,
        )
        .unwrap();

        assert!(run(&config).is_err());
        assert!(!config.json_output_path.exists());
        assert!(!config.db_path.exists());
    }

    #[test]
    fn test_missing_amount_contributes_nothing() {
        let foods = vec![json!({
            "fdcId": 5,
            "description": "Egg",
            "foodNutrients": [
                {"nutrient": {"name": "Protein"}},
                {"nutrient": {"name": "Zinc, Zn"}, "amount": 1.29}
            ]
        })];

        let projected = project(foods).unwrap();
        assert_eq!(
            Value::Object(projected[0].clone()),
            json!({"fdcId": 5, "description": "Egg", "Zinc, Zn": 1.29})
        );

        let records = to_records(&projected).unwrap();
        assert_eq!(records[0].nutrient("protein"), Some(0.0));
        assert_eq!(records[0].nutrient("zinc"), Some(1.29));
    }
}
