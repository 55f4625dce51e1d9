use futures::{StreamExt, stream};
use tracing::{debug, warn};

use crate::domain::meal_analysis::{
    basic_foods::get_kcal_for_basic_food,
    entities::{FoodItem, MealAnalysisError, NutritionRecord, PipelineState},
    helpers::round_kcal,
    ports::ProductLookupClient,
    value_objects::{Product, ProductSearchResponse, UNKNOWN_BRAND},
};

const PRODUCT_PAGE_SIZE: u32 = 1;

/// Third stage: resolves kcal per 100g for every food item.
///
/// Basic foods come from the static table, everything else from the product
/// database. At most `concurrency` lookups run at once and records keep the order of
/// the food items.
pub async fn lookup_nutrition_info<P>(
    product_lookup_client: &P,
    country_tag: &str,
    concurrency: usize,
    state: PipelineState,
) -> PipelineState
where
    P: ProductLookupClient,
{
    let lookups = state
        .food_items
        .iter()
        .map(|item| resolve_nutrition(product_lookup_client, country_tag, item))
        .collect::<Vec<_>>();

    let nutrition_info = stream::iter(lookups)
        .buffered(concurrency.max(1))
        .collect::<Vec<_>>()
        .await;

    PipelineState {
        nutrition_info,
        ..state
    }
}

async fn resolve_nutrition<P>(
    product_lookup_client: &P,
    country_tag: &str,
    item: &FoodItem,
) -> NutritionRecord
where
    P: ProductLookupClient,
{
    if item.is_basic() == Some(true) {
        return basic_food_record(&item.name);
    }

    let response = product_lookup_client
        .search(item.name.clone(), country_tag.to_string(), PRODUCT_PAGE_SIZE)
        .await
        .unwrap_or_else(|e| {
            let error = MealAnalysisError::LookupTransport(e.to_string());
            warn!(food = %item.name, error = %error, "treating lookup as no result");
            ProductSearchResponse::empty()
        });

    product_record(&item.name, response.first_match())
}

pub fn basic_food_record(name: &str) -> NutritionRecord {
    match get_kcal_for_basic_food(name) {
        Some(kcal) => {
            let rounded = round_kcal(kcal);
            NutritionRecord::new(
                name.to_string(),
                format!("{name} (Grundnahrungsmittel): ca. {rounded} kcal"),
                Some(rounded as f64),
            )
        }
        None => {
            debug!(food = %name, "basic food missing from table");
            NutritionRecord::new(
                name.to_string(),
                format!("{name} (Grundnahrungsmittel): Kalorieninfo nicht verfügbar"),
                None,
            )
        }
    }
}

pub fn product_record(name: &str, product: Option<&Product>) -> NutritionRecord {
    let Some(product) = product else {
        return NutritionRecord::new(
            format!("{name} von {UNKNOWN_BRAND}"),
            format!("{name} ({UNKNOWN_BRAND}): Kein Produkt gefunden"),
            None,
        );
    };

    let brand = product.brand();
    let kcal_per_100g = product.kcal_per_100g();
    let info = match kcal_per_100g {
        Some(kcal) => format!("{name} ({brand}): {kcal} kcal pro 100g"),
        None => format!("{name} ({brand}): Keine Kalorienangabe gefunden"),
    };

    NutritionRecord::new(format!("{name} von {brand}"), info, kcal_per_100g)
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;
    use crate::domain::meal_analysis::{
        ports::MockProductLookupClient, test_support::StaticProductLookup,
    };

    #[test]
    fn basic_food_hit_renders_rounded_kcal() {
        let record = basic_food_record("Apfel");

        assert_eq!(record.original, "Apfel");
        assert_eq!(record.info, "Apfel (Grundnahrungsmittel): ca. 52 kcal");
        assert_eq!(record.kcal_per_100g, Some(52.0));
    }

    #[test]
    fn basic_food_miss_is_not_available() {
        let record = basic_food_record("Drachenfrucht");

        assert_eq!(
            record.info,
            "Drachenfrucht (Grundnahrungsmittel): Kalorieninfo nicht verfügbar"
        );
        assert_eq!(record.kcal_per_100g, None);
    }

    #[test]
    fn missing_product_uses_unknown_brand() {
        let record = product_record("Nutella", None);

        assert_eq!(record.original, "Nutella von Unbekannt");
        assert_eq!(record.info, "Nutella (Unbekannt): Kein Produkt gefunden");
    }

    #[test]
    fn product_without_kcal_says_so() {
        let product = Product {
            brands: Some("Ja!".to_string()),
            ..Product::default()
        };

        let record = product_record("Schokolade", Some(&product));

        assert_eq!(record.original, "Schokolade von Ja!");
        assert_eq!(
            record.info,
            "Schokolade (Ja!): Keine Kalorienangabe gefunden"
        );
        assert_eq!(record.kcal_per_100g, None);
    }

    #[tokio::test]
    async fn routes_items_and_keeps_their_order() {
        let lookup = StaticProductLookup::new()
            .with_product("Nutella", Some("Ferrero"), Some(539.0))
            .with_product("Schokolade", Some("Ja!"), Some(535.5));
        let state = PipelineState {
            food_items: vec![
                FoodItem::new("Nutella", 200.0).classified(false),
                FoodItem::new("Apfel", 100.0).classified(true),
                FoodItem::new("Schokolade", 60.0).classified(false),
                FoodItem::new("Fantasie", 10.0),
            ],
            ..PipelineState::new("Nutella, Apfel, Schokolade")
        };

        let state = lookup_nutrition_info(&lookup, "de", 4, state).await;

        let infos = state
            .nutrition_info
            .iter()
            .map(|record| record.info.as_str())
            .collect::<Vec<_>>();
        assert_eq!(
            infos,
            vec![
                "Nutella (Ferrero): 539 kcal pro 100g",
                "Apfel (Grundnahrungsmittel): ca. 52 kcal",
                "Schokolade (Ja!): 535.5 kcal pro 100g",
                "Fantasie (Unbekannt): Kein Produkt gefunden",
            ]
        );

        let mut searches = lookup.searches();
        searches.sort();
        assert_eq!(
            searches,
            vec![
                ("Fantasie".to_string(), "de".to_string(), 1),
                ("Nutella".to_string(), "de".to_string(), 1),
                ("Schokolade".to_string(), "de".to_string(), 1),
            ]
        );
    }

    #[tokio::test]
    async fn failed_lookup_only_affects_its_own_item() {
        let lookup = StaticProductLookup::new()
            .with_error("Cola")
            .with_product("Nutella", Some("Ferrero"), Some(539.0));
        let state = PipelineState {
            food_items: vec![
                FoodItem::new("Cola", 330.0).classified(false),
                FoodItem::new("Nutella", 20.0).classified(false),
            ],
            ..PipelineState::new("Cola und Nutella")
        };

        let state = lookup_nutrition_info(&lookup, "de", 1, state).await;

        assert_eq!(
            state.nutrition_info[0].info,
            "Cola (Unbekannt): Kein Produkt gefunden"
        );
        assert_eq!(state.nutrition_info[1].kcal_per_100g, Some(539.0));
    }

    #[tokio::test]
    async fn basic_foods_never_reach_the_product_database() {
        let mut lookup = MockProductLookupClient::new();
        lookup.expect_search().never();
        let state = PipelineState {
            food_items: vec![
                FoodItem::new("Banane", 120.0).classified(true),
                FoodItem::new("Reis", 150.0).classified(true),
            ],
            ..PipelineState::new("Banane mit Reis")
        };

        let state = lookup_nutrition_info(&lookup, "de", 4, state).await;

        assert_eq!(state.nutrition_info.len(), 2);
        assert_eq!(state.nutrition_info[0].kcal_per_100g, Some(89.0));
    }

    #[tokio::test]
    async fn slow_lookups_do_not_reorder_records() {
        let lookup = StaticProductLookup::new()
            .with_product("Nutella", Some("Ferrero"), Some(539.0))
            .with_product("Cola", Some("Coca-Cola"), Some(42.0))
            .with_product("Chips", Some("Funny-frisch"), Some(536.0))
            .with_delay("Nutella", Duration::from_millis(120))
            .with_delay("Cola", Duration::from_millis(60));
        let state = PipelineState {
            food_items: vec![
                FoodItem::new("Nutella", 20.0).classified(false),
                FoodItem::new("Cola", 330.0).classified(false),
                FoodItem::new("Chips", 50.0).classified(false),
            ],
            ..PipelineState::new("Nutella, Cola und Chips")
        };

        let state = lookup_nutrition_info(&lookup, "de", 3, state).await;

        assert_eq!(lookup.completed(), vec!["Chips", "Cola", "Nutella"]);
        let originals = state
            .nutrition_info
            .iter()
            .map(|record| record.original.as_str())
            .collect::<Vec<_>>();
        assert_eq!(
            originals,
            vec!["Nutella von Ferrero", "Cola von Coca-Cola", "Chips von Funny-frisch"]
        );
    }
}
