use serde_json::json;

pub fn build_extraction_prompt(meal_description: &str) -> String {
    format!(
        "Extrahiere alle Lebensmittel aus dem folgenden Text als Liste von Objekten.\n\
         Jedes Objekt hat genau diese Felder:\n\
         - name: Name des Lebensmittels\n\
         - quantity: Menge in Gramm; ist die Menge ungenau angegeben, schätze sie in Gramm (z. B. 1 Glas = 200g)\n\
         Die Antwort MUSS gültiges JSON sein. Mengen sind reine Zahlen, KEINE Rechnungen oder Ausdrücke.\n\
         Steht eine Rechnung im Text (z. B. \"2 * 100\"), gib nur das Ergebnis an (also 200).\n\
         Keine Anführungszeichen um Zahlen, keine Kommentare, keine Erklärungen.\n\
         Antworte nur mit der reinen JSON-Liste.\n\n\
         Text:\n{meal_description}\n\n\
         Beispiel:\n\
         [\n  {{\"name\": \"Brötchen\", \"quantity\": 200}},\n  {{\"name\": \"Butter\", \"quantity\": 50}},\n  {{\"name\": \"Ei\", \"quantity\": 50}}\n]\n\n\
         So NICHT (Negativbeispiel):\n\
         [\n  {{\"name\": \"Brötchen\", \"quantity\": 10 * 200}},\n  {{\"name\": \"Butter\", \"quantity\": 3 * 50}} // Kommentar\n]"
    )
}

pub fn build_classification_prompt(names: &[&str]) -> String {
    let foods = names
        .iter()
        .map(|name| json!({ "name": name }))
        .collect::<Vec<_>>();
    let foods = serde_json::Value::Array(foods).to_string();

    format!(
        "Klassifiziere ausschließlich die unten aufgeführten Lebensmittel nach diesen Regeln:\n\n\
         is_basic = true: natürliche, unverarbeitete Lebensmittel (z. B. Ei, Apfel, Karotte, Brokkoli, Milch)\n\
         is_basic = false: verarbeitete Lebensmittel (z. B. Butter, Brötchen, Saft, Käse, Margarine)\n\n\
         Verwende nur die Lebensmittel aus der Liste. Füge nichts hinzu und lass nichts weg.\n\
         Antworte nur mit einer JSON-Liste im Format:\n\
         [{{\"name\": \"...\", \"is_basic\": true}}, ...]\n\n\
         Lebensmittel:\n{foods}"
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extraction_prompt_embeds_meal_description() {
        let prompt = build_extraction_prompt("200g Nutella und 100 Gramm Apfel");

        assert!(prompt.contains("Text:\n200g Nutella und 100 Gramm Apfel\n"));
        assert!(prompt.contains("{\"name\": \"Brötchen\", \"quantity\": 200}"));
    }

    #[test]
    fn classification_prompt_lists_names_without_escaping_umlauts() {
        let prompt = build_classification_prompt(&["Brötchen", "Apfel"]);

        assert!(prompt.ends_with(r#"[{"name":"Brötchen"},{"name":"Apfel"}]"#));
    }
}
