use std::sync::Arc;

use mealkcal_core::application::MealKcalService;

use crate::args::Args;

#[derive(Clone)]
pub struct AppState {
    pub args: Arc<Args>,
    pub service: MealKcalService,
}

impl AppState {
    pub fn new(args: Arc<Args>, service: MealKcalService) -> Self {
        Self { args, service }
    }
}
