pub mod health;
pub mod home;
pub mod meal_analysis;
pub mod server;
