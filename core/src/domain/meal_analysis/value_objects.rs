use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

pub const UNKNOWN_BRAND: &str = "Unbekannt";

#[derive(Debug, Clone)]
pub struct AnalyzeMealInput {
    pub meal_description: String,
}

/// One entry of the classification answer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassifiedFood {
    pub name: String,
    pub is_basic: bool,
}

/// Search answer of the product database, reduced to what the lookup stage reads.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProductSearchResponse {
    #[serde(default, deserialize_with = "lenient_count")]
    pub count: u64,
    #[serde(default)]
    pub products: Vec<Product>,
}

impl ProductSearchResponse {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn first_match(&self) -> Option<&Product> {
        if self.count == 0 {
            return None;
        }

        self.products.first()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Product {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub product_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub brands: Option<String>,
    #[serde(default)]
    pub nutriments: Nutriments,
}

impl Product {
    pub fn brand(&self) -> &str {
        self.brands
            .as_deref()
            .map(str::trim)
            .filter(|brand| !brand.is_empty())
            .unwrap_or(UNKNOWN_BRAND)
    }

    /// Energy per 100g, falling back to the bare kcal field. Zero counts as missing.
    pub fn kcal_per_100g(&self) -> Option<f64> {
        let known = |kcal: &f64| kcal.is_finite() && *kcal != 0.0;

        self.nutriments
            .energy_kcal_100g
            .filter(known)
            .or_else(|| self.nutriments.energy_kcal.filter(known))
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Nutriments {
    #[serde(
        rename = "energy-kcal_100g",
        default,
        deserialize_with = "lenient_number",
        skip_serializing_if = "Option::is_none"
    )]
    pub energy_kcal_100g: Option<f64>,
    #[serde(
        rename = "energy-kcal",
        default,
        deserialize_with = "lenient_number",
        skip_serializing_if = "Option::is_none"
    )]
    pub energy_kcal: Option<f64>,
}

fn number_from_value(value: &Value) -> Option<f64> {
    match value {
        Value::Number(number) => number.as_f64(),
        Value::String(text) => text.trim().parse::<f64>().ok(),
        _ => None,
    }
}

// The product database is not consistent about numbers vs numeric strings.
fn lenient_number<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.as_ref().and_then(number_from_value))
}

fn lenient_count<'de, D>(deserializer: D) -> Result<u64, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value
        .as_ref()
        .and_then(number_from_value)
        .filter(|count| *count > 0.0)
        .map(|count| count as u64)
        .unwrap_or(0))
}
