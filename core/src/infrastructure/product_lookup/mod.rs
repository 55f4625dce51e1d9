pub mod open_food_facts;

pub use open_food_facts::OpenFoodFactsClient;
