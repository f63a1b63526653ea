//! Fixed nutrient tables: which nutrients survive projection and which
//! `Food` column each one lands in.

use once_cell::sync::Lazy;
use std::collections::HashSet;

/// Source field carrying the food id
pub const FDC_ID_FIELD: &str = "fdcId";

/// Source field carrying the food name
pub const DESCRIPTION_FIELD: &str = "description";

/// Source field carrying the raw nutrient list
pub const NUTRIENTS_FIELD: &str = "foodNutrients";

/// Top-level food attributes that are always dropped
pub const DISCARDED_FOOD_ATTRIBUTES: [&str; 11] = [
    "foodClass",
    "isHistoricalReference",
    "ndbNumber",
    "foodPortions",
    "publicationDate",
    "nutrientConversionFactors",
    "dataType",
    "foodCategory",
    "foodAttributes",
    "inputFoods",
    "scientificName",
];

/// A nutrient column of the `Food` table
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NutrientColumn {
    /// Column name in the `Food` table
    pub name: &'static str,

    /// Source nutrient names, in priority order
    pub candidates: &'static [&'static str],
}

const fn column(name: &'static str, candidates: &'static [&'static str]) -> NutrientColumn {
    NutrientColumn { name, candidates }
}

pub const NUTRIENT_COLUMN_COUNT: usize = 20;

/// Nutrient columns in table order, after `id` and `name`
pub const NUTRIENT_COLUMNS: [NutrientColumn; NUTRIENT_COLUMN_COUNT] = [
    column("calories", &["Energy (Atwater General Factors)"]),
    column("protein", &["Protein"]),
    column("carbs", &["Carbohydrate, by summation"]),
    column("fat", &["Total lipid (fat)"]),
    column("fiber", &["Fiber, total dietary"]),
    column("vitaminA", &["Vitamin A, RAE"]),
    column("vitaminB1", &["Thiamin"]),
    column("vitaminB2", &["Riboflavin"]),
    column("vitaminB5", &["Pantothenic acid"]),
    column("vitaminB6", &["Vitamin B-6"]),
    column("vitaminB12", &["Vitamin B-12"]),
    column("vitaminC", &["Vitamin C, total ascorbic acid"]),
    column("vitaminE", &["Vitamin E (alpha-tocopherol)"]),
    column("vitaminK", &["Vitamin K (Menaquinone-4)"]),
    column("calcium", &["Calcium, Ca"]),
    column("iron", &["Iron, Fe"]),
    column("magnesium", &["Magnesium, Mg"]),
    column("phospher", &["Phosphorus, P"]),
    column("potassium", &["Potassium, K"]),
    column("zinc", &["Zinc, Zn"]),
];

/// Kept in the JSON export but not read into any `Food` column
pub const EXPORT_ONLY_NUTRIENTS: [&str; 1] = ["Total dietary fiber (AOAC 2011.25)"];

/// Every nutrient name that may appear on a projected record
pub static ALLOWED_NUTRIENTS: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    NUTRIENT_COLUMNS
        .iter()
        .flat_map(|column| column.candidates.iter().copied())
        .chain(EXPORT_ONLY_NUTRIENTS)
        .collect()
});

/// Check if a nutrient name is on the allow-list
pub fn is_allowed(name: &str) -> bool {
    ALLOWED_NUTRIENTS.contains(name)
}

/// Check if a top-level key may remain on a projected record
pub fn is_retained_field(key: &str) -> bool {
    key == FDC_ID_FIELD || key == DESCRIPTION_FIELD || is_allowed(key)
}
