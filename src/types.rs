use crate::error::FoodError;
use crate::nutrients::{
    DESCRIPTION_FIELD, FDC_ID_FIELD, NUTRIENT_COLUMNS, NUTRIENT_COLUMN_COUNT,
};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::path::PathBuf;

/// A projected food item - represents one row in the `Food` table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FoodRecord {
    /// FoodData Central id (`fdcId`)
    pub id: i64,

    /// Food name (`description`)
    pub name: String,

    /// Nutrient amounts in [`NUTRIENT_COLUMNS`] order, 0.0 when absent
    pub nutrients: [f64; NUTRIENT_COLUMN_COUNT],
}

impl FoodRecord {
    /// Build a typed record from a projected food map.
    ///
    /// `index` is the record's position in the food list and is only used
    /// for error reporting.
    pub fn from_projected(index: usize, food: &Map<String, Value>) -> Result<Self, FoodError> {
        let id = food
            .get(FDC_ID_FIELD)
            .and_then(integral_id)
            .ok_or(FoodError::InvalidField {
                index,
                field: FDC_ID_FIELD,
                expected: "an integer",
            })?;

        let name = food
            .get(DESCRIPTION_FIELD)
            .and_then(Value::as_str)
            .ok_or(FoodError::InvalidField {
                index,
                field: DESCRIPTION_FIELD,
                expected: "a string",
            })?
            .to_string();

        let mut nutrients = [0.0; NUTRIENT_COLUMN_COUNT];
        for (slot, column) in nutrients.iter_mut().zip(NUTRIENT_COLUMNS.iter()) {
            *slot = nutrient_amount(food, column.candidates);
        }

        Ok(FoodRecord { id, name, nutrients })
    }

    /// Get the amount stored for a column by its table name
    pub fn nutrient(&self, column: &str) -> Option<f64> {
        NUTRIENT_COLUMNS
            .iter()
            .position(|c| c.name == column)
            .map(|idx| self.nutrients[idx])
    }
}

/// Return the first numeric amount found under any of `candidates`, or 0.0
pub fn nutrient_amount(food: &Map<String, Value>, candidates: &[&str]) -> f64 {
    candidates
        .iter()
        .find_map(|name| food.get(*name).and_then(Value::as_f64))
        .unwrap_or(0.0)
}

// Ids arrive as JSON integers, but an integral float such as 1.0 is accepted too.
fn integral_id(value: &Value) -> Option<i64> {
    if let Some(id) = value.as_i64() {
        return Some(id);
    }
    value
        .as_f64()
        .filter(|f| f.fract() == 0.0 && f.abs() < i64::MAX as f64)
        .map(|f| f as i64)
}

/// Configuration for a run
#[derive(Debug, Clone)]
pub struct PrepConfig {
    /// FoodData Central export to read
    pub input_path: PathBuf,

    /// Trimmed JSON output
    pub json_output_path: PathBuf,

    /// SQLite database receiving the `Food` table
    pub db_path: PathBuf,

    /// Top-level key holding the food list
    pub food_list_key: String,
}

impl Default for PrepConfig {
    fn default() -> Self {
        PrepConfig {
            input_path: PathBuf::from("original-food.json"),
            json_output_path: PathBuf::from("food.json"),
            db_path: PathBuf::from("food.db"),
            food_list_key: String::from("FoundationFoods"),
        }
    }
}
