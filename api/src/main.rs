use std::sync::Arc;

use clap::Parser;
use mealkcal_api::{
    application::{
        http::server::http_server::{router, state},
        logger::init_logger,
    },
    args::Args,
};
use mealkcal_core::domain::meal_analysis::{
    ports::MealAnalysisService, value_objects::AnalyzeMealInput,
};
use tracing::info;

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    dotenv::dotenv().ok();

    let args = Arc::new(Args::parse());
    init_logger(&args.log)?;

    let app_state = state(args.clone())?;

    if let Some(meal) = args.meal.clone() {
        let result = app_state
            .service
            .analyze_meal(AnalyzeMealInput {
                meal_description: meal,
            })
            .await?;
        println!("{}", result.summary);
        return Ok(());
    }

    let router = router(app_state)?;

    let addr = format!("{}:{}", args.server.host, args.server.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("listening on {}", listener.local_addr()?);

    axum::serve(listener, router).await?;

    Ok(())
}
