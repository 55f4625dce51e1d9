use serde_json::Value;
use tracing::{debug, warn};

use crate::domain::meal_analysis::{
    entities::{FoodItem, MealAnalysisError, PipelineState},
    helpers::parse_quantity,
    ports::LLMClient,
    prompts::build_extraction_prompt,
    schema::get_extraction_schema,
};

/// First stage: asks the completion backend for `{name, quantity}` objects.
///
/// Never fails. An unusable answer leaves the meal without food items.
pub async fn extract_food_items<L>(llm_client: &L, state: PipelineState) -> PipelineState
where
    L: LLMClient,
{
    let prompt = build_extraction_prompt(&state.meal_description);

    let food_items = match llm_client
        .generate_with_text(prompt, Some(get_extraction_schema()))
        .await
    {
        Ok(raw_response) => {
            debug!(response = %raw_response, "extraction response");
            parse_food_items(&raw_response).unwrap_or_else(|e| {
                warn!(error = %e, "discarding extraction response");
                Vec::new()
            })
        }
        Err(e) => {
            warn!(error = %e, "extraction request failed");
            Vec::new()
        }
    };

    debug!(count = food_items.len(), "extracted food items");

    PipelineState {
        food_items,
        ..state
    }
}

/// Strict JSON parse of the extraction answer. Only a top-level list is accepted.
pub fn parse_food_items(raw_response: &str) -> Result<Vec<FoodItem>, MealAnalysisError> {
    let parsed: Value = serde_json::from_str(raw_response)
        .map_err(|e| MealAnalysisError::ExtractionParse(e.to_string()))?;

    let Value::Array(entries) = parsed else {
        return Err(MealAnalysisError::ExtractionParse(
            "expected a JSON list of food items".to_string(),
        ));
    };

    Ok(entries.iter().filter_map(food_item_from_value).collect())
}

fn food_item_from_value(value: &Value) -> Option<FoodItem> {
    let Some(entry) = value.as_object() else {
        warn!(entry = %value, "skipping extracted entry that is not an object");
        return None;
    };

    let name = match entry.get("name") {
        Some(Value::String(name)) if !name.trim().is_empty() => name.clone(),
        _ => {
            warn!(entry = %value, "skipping extracted entry without a name");
            return None;
        }
    };
    let quantity = entry.get("quantity").map(parse_quantity).unwrap_or(0.0);

    Some(FoodItem::new(name, quantity))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{
        common::entities::app_errors::CoreError, meal_analysis::test_support::ScriptedLLMClient,
    };

    #[test]
    fn valid_list_becomes_food_items_verbatim() {
        let items = parse_food_items(
            r#"[{"name": "Nutella", "quantity": 200}, {"name": "Ja! Schokolade", "quantity": 60.5}]"#,
        )
        .unwrap();

        assert_eq!(
            items,
            vec![
                FoodItem::new("Nutella", 200.0),
                FoodItem::new("Ja! Schokolade", 60.5),
            ]
        );
        assert!(items.iter().all(|item| item.is_basic().is_none()));
    }

    #[test]
    fn arithmetic_in_quantities_is_rejected_as_invalid_json() {
        let result = parse_food_items(r#"[{"name": "Brötchen", "quantity": 2 * 100}]"#);

        assert!(matches!(result, Err(MealAnalysisError::ExtractionParse(_))));
    }

    #[test]
    fn non_list_json_is_rejected() {
        let result = parse_food_items(r#"{"name": "Apfel", "quantity": 100}"#);

        assert!(matches!(result, Err(MealAnalysisError::ExtractionParse(_))));
    }

    #[test]
    fn missing_quantity_defaults_and_non_objects_are_dropped() {
        let items = parse_food_items(r#"[{"name": "Butter"}, 42, {"name": "Käse", "quantity": "30 g"}]"#).unwrap();

        assert_eq!(
            items,
            vec![FoodItem::new("Butter", 0.0), FoodItem::new("Käse", 30.0)]
        );
    }

    #[test]
    fn entries_without_a_usable_name_are_dropped() {
        let items = parse_food_items(
            r#"[{"quantity": 500}, {"name": null, "quantity": 20}, {"name": "  ", "quantity": 5}, {"name": 7, "quantity": 1}, {"name": "Apfel", "quantity": 100}]"#,
        )
        .unwrap();

        assert_eq!(items, vec![FoodItem::new("Apfel", 100.0)]);
    }

    #[tokio::test]
    async fn prose_answer_yields_no_food_items() {
        let llm = ScriptedLLMClient::new(vec![Ok(
            "Hier ist deine Liste: Apfel, 100g".to_string()
        )]);

        let state = extract_food_items(&llm, PipelineState::new("100g Apfel")).await;

        assert!(state.food_items.is_empty());
        assert_eq!(state.meal_description, "100g Apfel");
        assert!(llm.prompts()[0].contains("100g Apfel"));
    }

    #[tokio::test]
    async fn failed_completion_yields_no_food_items() {
        let llm = ScriptedLLMClient::new(vec![Err(CoreError::ExternalServiceError(
            "connection refused".to_string(),
        ))]);

        let state = extract_food_items(&llm, PipelineState::new("100g Apfel")).await;

        assert!(state.food_items.is_empty());
    }
}
