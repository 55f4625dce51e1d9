use std::sync::LazyLock;

use indexmap::IndexMap;
use regex::Regex;
use serde_json::Value;
use tracing::debug;

use crate::domain::meal_analysis::entities::{FoodItem, MealAnalysisError};

static GRAM_QUANTITY: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^\s*(\d+(?:[.,]\d+)?)\s*(?:g|gr|gramm)?\s*$").expect("valid quantity regex")
});

/// Rounds half to even, the way the rendered totals have always been rounded.
pub fn round_kcal(kcal: f64) -> i64 {
    kcal.round_ties_even() as i64
}

/// Reads a gram amount from an extracted JSON value.
///
/// Numbers pass through; strings like `"200"` or `"150 g"` are accepted. Anything
/// else counts as an unknown amount (0).
pub fn parse_quantity(value: &Value) -> f64 {
    let quantity = match value {
        Value::Number(number) => number.as_f64(),
        Value::String(text) => GRAM_QUANTITY
            .captures(text)
            .and_then(|captures| captures.get(1))
            .and_then(|amount| amount.as_str().replace(',', ".").parse::<f64>().ok()),
        _ => None,
    };

    quantity.filter(|quantity| quantity.is_finite()).unwrap_or(0.0)
}

pub fn parse_kcal_figure(token: &str) -> Result<f64, MealAnalysisError> {
    token
        .parse::<f64>()
        .ok()
        .filter(|kcal| kcal.is_finite())
        .ok_or_else(|| MealAnalysisError::KcalParse(token.to_string()))
}

/// Recovers a kcal figure from a rendered info line.
///
/// Scans whitespace tokens for one containing `kcal` and parses the token right
/// before it. Every hit is tried and the last successful parse wins. Only used for
/// records that carry no structured figure.
pub fn parse_kcal_from_info(info: &str) -> Option<f64> {
    let tokens = info.split_whitespace().collect::<Vec<_>>();
    let mut kcal_per_100g = None;

    for (index, token) in tokens.iter().enumerate() {
        if !token.to_lowercase().contains("kcal") {
            continue;
        }

        let Some(previous) = index.checked_sub(1).map(|previous| tokens[previous]) else {
            continue;
        };

        match parse_kcal_figure(previous) {
            Ok(kcal) => kcal_per_100g = Some(kcal),
            Err(e) => debug!(error = %e, "ignoring kcal token"),
        }
    }

    kcal_per_100g
}

/// Lowercase food name to quantity, in first-seen order.
///
/// A repeated name overwrites the earlier quantity but keeps its position.
pub fn quantity_index(food_items: &[FoodItem]) -> IndexMap<String, f64> {
    let mut quantities = IndexMap::with_capacity(food_items.len());

    for item in food_items {
        // A blank key would match every record.
        if item.name.trim().is_empty() {
            continue;
        }
        quantities.insert(item.name.to_lowercase(), item.quantity);
    }

    quantities
}

/// Quantity of the first indexed name contained in `original`, or 0.
///
/// Matching is by substring, so a short name can claim a longer one ("ei" in "eis").
pub fn match_quantity(quantities: &IndexMap<String, f64>, original: &str) -> f64 {
    let original = original.to_lowercase();

    quantities
        .iter()
        .find(|(name, _)| original.contains(name.as_str()))
        .map(|(_, quantity)| *quantity)
        .unwrap_or(0.0)
}
