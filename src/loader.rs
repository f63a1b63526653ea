//! Reading the FoodData Central export

use crate::error::FoodError;
use anyhow::{Context, Result};
use serde_json::Value;
use std::path::Path;
use tracing::{debug, info};

/// Read and decode a whole JSON document.
///
/// The file is read into memory and parsed with simd-json's serde bridge.
pub fn load<P: AsRef<Path>>(path: P) -> Result<Value> {
    let path = path.as_ref();
    let mut content = std::fs::read(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    debug!(bytes = content.len(), path = %path.display(), "read input");

    let document: Value = simd_json::serde::from_slice(&mut content)
        .with_context(|| format!("Failed to parse JSON in {}", path.display()))?;
    Ok(document)
}

/// Take the food list stored under `key` out of a decoded document
pub fn food_list(document: Value, key: &str) -> Result<Vec<Value>, FoodError> {
    let Value::Object(mut root) = document else {
        return Err(FoodError::DocumentNotObject);
    };

    match root.remove(key) {
        Some(Value::Array(foods)) => Ok(foods),
        Some(_) => Err(FoodError::FoodListNotArray {
            key: key.to_string(),
        }),
        None => Err(FoodError::MissingFoodList {
            key: key.to_string(),
        }),
    }
}

/// Load `path` and return its food list
pub fn load_food_list<P: AsRef<Path>>(path: P, key: &str) -> Result<Vec<Value>> {
    let path = path.as_ref();
    let document = load(path)?;
    let foods = food_list(document, key)
        .with_context(|| format!("Unexpected layout in {}", path.display()))?;
    info!("loaded {} food records from {}", foods.len(), path.display());
    Ok(foods)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::io::Write;

    #[test]
    fn test_food_list_extracted() {
        let document = json!({"FoundationFoods": [{"fdcId": 1}, {"fdcId": 2}]});
        let foods = food_list(document, "FoundationFoods").unwrap();
        assert_eq!(foods.len(), 2);
        assert_eq!(foods[1]["fdcId"], 2);
    }

    #[test]
    fn test_food_list_structure_errors() {
        let err = food_list(json!({"SurveyFoods": []}), "FoundationFoods").unwrap_err();
        assert!(matches!(err, FoodError::MissingFoodList { .. }));

        let err = food_list(json!({"FoundationFoods": {}}), "FoundationFoods").unwrap_err();
        assert!(matches!(err, FoodError::FoodListNotArray { .. }));

        let err = food_list(json!([1, 2]), "FoundationFoods").unwrap_err();
        assert!(matches!(err, FoodError::DocumentNotObject));
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{"FoundationFoods":[{{"fdcId":1,"description":"Apple"}}]}}"#
        )
        .unwrap();

        let foods = load_food_list(file.path(), "FoundationFoods").unwrap();
        assert_eq!(foods.len(), 1);
        assert_eq!(foods[0]["description"], "Apple");
    }

    #[test]
    fn test_load_rejects_invalid_json() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "{{\"FoundationFoods\": [").unwrap();
        assert!(load(file.path()).is_err());
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        assert!(load(dir.path().join("missing.json")).is_err());
    }
}
