use thiserror::Error as ThisError;

/// Structural problems with the input document.
///
/// The dataset is expected to follow the FoodData Central schema; any of
/// these aborts the run before output is written.
#[derive(Debug, ThisError)]
pub enum FoodError {
    #[error("input document is not a JSON object")]
    DocumentNotObject,

    #[error("input document has no '{key}' key")]
    MissingFoodList { key: String },

    #[error("'{key}' is not a list")]
    FoodListNotArray { key: String },

    #[error("food record #{index} is not a JSON object")]
    RecordNotObject { index: usize },

    #[error("food record #{index}: 'foodNutrients' is not a list")]
    NutrientsNotArray { index: usize },

    #[error("food record #{index}: nutrient entry #{entry} has no string 'nutrient.name'")]
    NutrientNameMissing { index: usize, entry: usize },

    #[error("food record #{index}: '{field}' is missing or not {expected}")]
    InvalidField {
        index: usize,
        field: &'static str,
        expected: &'static str,
    },
}
