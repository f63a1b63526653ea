use crate::error::FoodError;
use crate::nutrients::{
    is_allowed, is_retained_field, DISCARDED_FOOD_ATTRIBUTES, NUTRIENTS_FIELD,
};
use crate::types::FoodRecord;
use serde_json::{Map, Number, Value};
use tracing::{debug, trace};

/// A nutrient that passed the keep rule, reduced to name and amount
#[derive(Debug, Clone, PartialEq)]
pub struct NutrientEntry {
    pub name: String,

    /// Amount as decoded, so integers stay integers in the JSON export
    pub amount: Number,
}

/// Project every food record, preserving order
pub fn project(records: Vec<Value>) -> Result<Vec<Map<String, Value>>, FoodError> {
    let projected = records
        .into_iter()
        .enumerate()
        .map(|(index, record)| project_record(index, record))
        .collect::<Result<Vec<_>, _>>()?;
    debug!(records = projected.len(), "projection complete");
    Ok(projected)
}

/// Strip one food record down to its id, name and allowed nutrients.
///
/// Retained nutrients are flattened onto the record as `name: amount` and the
/// `foodNutrients` list is removed.
pub fn project_record(index: usize, record: Value) -> Result<Map<String, Value>, FoodError> {
    let Value::Object(mut food) = record else {
        return Err(FoodError::RecordNotObject { index });
    };

    for attribute in DISCARDED_FOOD_ATTRIBUTES {
        food.remove(attribute);
    }

    let entries = match food.remove(NUTRIENTS_FIELD) {
        Some(Value::Array(entries)) => entries,
        Some(_) => return Err(FoodError::NutrientsNotArray { index }),
        None => Vec::new(),
    };
    let kept = keep_nutrients(index, entries)?;

    food.retain(|key, _| {
        let keep = is_retained_field(key);
        if !keep {
            debug!(record = index, field = %key, "dropping unexpected food attribute");
        }
        keep
    });

    for entry in kept {
        food.insert(entry.name, Value::Number(entry.amount));
    }

    Ok(food)
}

/// Apply the keep rule: allow-listed name and a numeric `amount`
pub fn keep_nutrients(
    index: usize,
    entries: Vec<Value>,
) -> Result<Vec<NutrientEntry>, FoodError> {
    let mut kept = Vec::with_capacity(entries.len());

    for (position, entry) in entries.iter().enumerate() {
        let name = nutrient_name(entry).ok_or(FoodError::NutrientNameMissing {
            index,
            entry: position,
        })?;

        if !is_allowed(name) {
            continue;
        }

        let amount = match entry.get("amount") {
            Some(Value::Number(amount)) if amount.as_f64().is_some() => amount.clone(),
            _ => {
                trace!(record = index, nutrient = name, "allowed nutrient has no amount");
                continue;
            }
        };

        kept.push(NutrientEntry {
            name: name.to_string(),
            amount,
        });
    }

    Ok(kept)
}

fn nutrient_name(entry: &Value) -> Option<&str> {
    entry.get("nutrient")?.get("name")?.as_str()
}

/// Convert projected maps into typed records, failing on the first bad one
pub fn to_records(projected: &[Map<String, Value>]) -> Result<Vec<FoodRecord>, FoodError> {
    projected
        .iter()
        .enumerate()
        .map(|(index, food)| FoodRecord::from_projected(index, food))
        .collect()
}
