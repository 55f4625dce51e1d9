//! Energy density of unprocessed foods, in kcal per 100g.
//!
//! Keys are lowercase German food names. Lookups never touch the network.

const BASIC_FOODS: &[(&str, f64)] = &[
    ("reis", 130.0),
    ("weizenmehl", 340.0),
    ("haferflocken", 380.0),
    ("gerste", 354.0),
    ("dinkel", 338.0),
    ("quinoa", 368.0),
    ("hirse", 378.0),
    ("linsen", 116.0),
    ("kichererbsen", 164.0),
    ("schwarze bohnen", 341.0),
    ("grüne bohnen", 31.0),
    ("brokkoli", 34.0),
    ("spinat", 23.0),
    ("karotten", 41.0),
    ("tomaten", 18.0),
    ("gurke", 16.0),
    ("paprika", 31.0),
    ("zwiebeln", 40.0),
    ("knoblauch", 149.0),
    ("süßkartoffeln", 86.0),
    ("kartoffeln", 77.0),
    ("kohl", 25.0),
    ("blumenkohl", 25.0),
    ("salat", 15.0),
    ("grünkohl", 49.0),
    ("apfel", 52.0),
    ("banane", 89.0),
    ("birne", 57.0),
    ("orange", 47.0),
    ("mandarine", 53.0),
    ("erdbeeren", 32.0),
    ("himbeeren", 52.0),
    ("blaubeeren", 57.0),
    ("ei", 137.0),
    ("trauben", 69.0),
    ("pfirsich", 39.0),
    ("kirschen", 50.0),
    ("avocado", 160.0),
    ("walnüsse", 654.0),
    ("mandeln", 575.0),
    ("cashewkerne", 553.0),
    ("sonnenblumenkerne", 584.0),
    ("chia-samen", 486.0),
    ("leinsamen", 534.0),
    ("hefe", 105.0),
    ("sojabohnen", 173.0),
    ("tofu", 76.0),
    ("edamame", 121.0),
    ("mais", 86.0),
    ("erbsen", 81.0),
    ("sellerie", 16.0),
    ("fenchel", 31.0),
    ("rote beete", 43.0),
    ("rüben", 43.0),
    ("kürbis", 26.0),
    ("artischocken", 47.0),
    ("spargel", 20.0),
    ("aubergine", 25.0),
    ("zucchini", 17.0),
];

/// kcal per 100g for a basic food, matched case-insensitively on the full name.
pub fn get_kcal_for_basic_food(name: &str) -> Option<f64> {
    let key = name.trim().to_lowercase();

    BASIC_FOODS
        .iter()
        .find(|(food, _)| *food == key)
        .map(|(_, kcal)| *kcal)
}
