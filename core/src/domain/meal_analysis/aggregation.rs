use tracing::debug;

use crate::domain::meal_analysis::{
    entities::{PipelineState, SummaryMessage},
    helpers::{match_quantity, parse_kcal_from_info, quantity_index, round_kcal},
};

const SUMMARY_HEADER: &str = "🧾 Hier ist deine Nährwertanalyse:\n\n";

/// Last stage: scales every resolved kcal figure by its quantity and renders the summary.
///
/// Quantities are matched to records by food name, not by position. Records without a
/// kcal figure or a positive quantity are listed as unknown and left out of the total.
pub fn summarize_nutrition(state: PipelineState) -> PipelineState {
    let quantities = quantity_index(&state.food_items);
    let mut summary = String::from(SUMMARY_HEADER);
    let mut total_kcal = 0.0;

    for record in &state.nutrition_info {
        let kcal_per_100g = record
            .kcal_per_100g
            .or_else(|| parse_kcal_from_info(&record.info));
        let quantity = match_quantity(&quantities, &record.original);

        match kcal_per_100g {
            Some(kcal_per_100g) if quantity > 0.0 => {
                let kcal_total = quantity / 100.0 * kcal_per_100g;
                total_kcal += kcal_total;
                summary.push_str(&format!(
                    "- {}: insgesamt also {} kcal ({}g)\n",
                    record.info,
                    round_kcal(kcal_total),
                    quantity
                ));
            }
            _ => {
                debug!(record = %record.original, quantity, "kcal or quantity unknown");
                summary.push_str(&format!("- {}: kcal-Wert oder Menge unbekannt\n", record.info));
            }
        }
    }

    summary.push_str(&format!(
        "\n👉 Geschätzte Gesamtkalorien: **{} kcal**",
        round_kcal(total_kcal)
    ));

    let mut messages = state.messages;
    messages.push(SummaryMessage::summary(summary));

    PipelineState {
        messages,
        total_kcal,
        ..state
    }
}
