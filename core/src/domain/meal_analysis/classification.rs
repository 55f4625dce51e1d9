use serde_json::Value;
use tracing::{debug, warn};

use crate::domain::meal_analysis::{
    entities::{FoodItem, MealAnalysisError, PipelineState},
    ports::LLMClient,
    prompts::build_classification_prompt,
    schema::get_classification_schema,
    value_objects::ClassifiedFood,
};

/// Second stage: flags each food as basic (table lookup) or processed (product lookup).
///
/// Items the answer does not cover, or every item when the answer is unusable, end up
/// processed.
pub async fn classify_food_items<L>(llm_client: &L, state: PipelineState) -> PipelineState
where
    L: LLMClient,
{
    if state.food_items.is_empty() {
        debug!("no food items to classify");
        return state;
    }

    let names = state
        .food_items
        .iter()
        .map(|item| item.name.as_str())
        .collect::<Vec<_>>();
    let prompt = build_classification_prompt(&names);

    let classified = match llm_client
        .generate_with_text(prompt, Some(get_classification_schema()))
        .await
    {
        Ok(raw_response) => {
            debug!(response = %raw_response, "classification response");
            parse_classifications(&raw_response).unwrap_or_else(|e| {
                warn!(error = %e, "treating every food item as processed");
                Vec::new()
            })
        }
        Err(e) => {
            warn!(error = %e, "classification request failed, treating every food item as processed");
            Vec::new()
        }
    };

    let food_items = merge_classifications(state.food_items, &classified);

    PipelineState {
        food_items,
        ..state
    }
}

/// Entries without a string `name` and a boolean `is_basic` are ignored.
pub fn parse_classifications(raw_response: &str) -> Result<Vec<ClassifiedFood>, MealAnalysisError> {
    let parsed: Value = serde_json::from_str(raw_response)
        .map_err(|e| MealAnalysisError::ClassificationParse(e.to_string()))?;

    let Value::Array(entries) = parsed else {
        return Err(MealAnalysisError::ClassificationParse(
            "expected a JSON list of classifications".to_string(),
        ));
    };

    Ok(entries
        .into_iter()
        .filter_map(|entry| serde_json::from_value::<ClassifiedFood>(entry).ok())
        .collect())
}

/// Copies `is_basic` from the first entry whose name matches case-insensitively.
pub fn merge_classifications(
    food_items: Vec<FoodItem>,
    classified: &[ClassifiedFood],
) -> Vec<FoodItem> {
    food_items
        .into_iter()
        .map(|item| {
            let name = item.name.to_lowercase();
            let is_basic = classified
                .iter()
                .find(|entry| entry.name.to_lowercase() == name)
                .map(|entry| entry.is_basic)
                .unwrap_or(false);

            item.classified(is_basic)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::meal_analysis::{
        entities::FoodClassification, test_support::ScriptedLLMClient,
    };

    fn items() -> Vec<FoodItem> {
        vec![
            FoodItem::new("Apfel", 100.0),
            FoodItem::new("Nutella", 200.0),
            FoodItem::new("Drachenfrucht", 80.0),
        ]
    }

    #[test]
    fn merge_is_case_insensitive_and_defaults_to_processed() {
        let classified = vec![
            ClassifiedFood {
                name: "APFEL".to_string(),
                is_basic: true,
            },
            ClassifiedFood {
                name: "nutella".to_string(),
                is_basic: false,
            },
            ClassifiedFood {
                name: "Banane".to_string(),
                is_basic: true,
            },
        ];

        let merged = merge_classifications(items(), &classified);

        assert_eq!(
            merged.iter().map(FoodItem::is_basic).collect::<Vec<_>>(),
            vec![Some(true), Some(false), Some(false)]
        );
        assert_eq!(merged.len(), 3);
    }

    #[test]
    fn incomplete_entries_are_ignored() {
        let classified =
            parse_classifications(r#"[{"name": "Apfel"}, {"name": "Nutella", "is_basic": false}, "Ei"]"#)
                .unwrap();

        assert_eq!(
            classified,
            vec![ClassifiedFood {
                name: "Nutella".to_string(),
                is_basic: false
            }]
        );
    }

    #[tokio::test]
    async fn unparsable_answer_marks_everything_processed() {
        let llm = ScriptedLLMClient::new(vec![Ok("Apfel ist ein Grundnahrungsmittel.".to_string())]);
        let state = PipelineState {
            food_items: items(),
            ..PipelineState::new("Apfel, Nutella, Drachenfrucht")
        };

        let state = classify_food_items(&llm, state).await;

        assert!(
            state
                .food_items
                .iter()
                .all(|item| item.classification == FoodClassification::Processed)
        );
    }

    #[tokio::test]
    async fn classification_prompt_only_lists_names() {
        let llm = ScriptedLLMClient::new(vec![Ok(
            r#"[{"name": "apfel", "is_basic": true}]"#.to_string()
        )]);
        let state = PipelineState {
            food_items: items(),
            ..PipelineState::new("Apfel, Nutella, Drachenfrucht")
        };

        let state = classify_food_items(&llm, state).await;

        assert_eq!(state.food_items[0].is_basic(), Some(true));
        assert_eq!(state.food_items[1].is_basic(), Some(false));
        let prompt = &llm.prompts()[0];
        assert!(prompt.contains(r#"{"name":"Drachenfrucht"}"#));
        assert!(!prompt.contains("quantity"));
    }

    #[tokio::test]
    async fn empty_meal_skips_the_completion_call() {
        let llm = ScriptedLLMClient::new(Vec::new());

        let state = classify_food_items(&llm, PipelineState::new("nichts")).await;

        assert!(state.food_items.is_empty());
        assert!(llm.prompts().is_empty());
    }
}
